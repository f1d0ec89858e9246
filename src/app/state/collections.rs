//! Route-local state for the tabbed list pages.

use crate::config::PageSizes;
use crate::domain::{
    Activity, AppliedCommunity, CollectionKind, LibraryBook, ListEntry, RecruitingCommunity,
    Snapshot, WishlistBook,
};
use crate::paging::filters::{
    ActivityFilter, AppliedFilter, LibraryFilter, RecruitingFilter, WishlistFilter,
};
use crate::paging::{
    PAGE_BLOCK_SIZE, PageBlock, PagedCollection, Searchable, TabFilter, page_block, paginate,
};

/// Display-ready row of a list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRow {
    pub title: String,
    pub detail: String,
    pub badge: String,
    pub timestamp: String,
}

/// Everything the list screen needs to draw the active page.
#[derive(Debug, Clone)]
pub struct CollectionView {
    pub rows: Vec<CollectionRow>,
    pub filter_labels: Vec<&'static str>,
    pub active_filter: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub block: PageBlock,
    pub matching: usize,
    pub total: usize,
}

/// Type-erased controls over one `PagedCollection`, so the screen can drive
/// whichever list is active without knowing its item or filter type.
pub trait CollectionControls {
    fn cycle_filter(&mut self);
    fn set_query(&mut self, query: &str);
    fn query(&self) -> &str;
    fn set_page(&mut self, page: usize);
    fn next_page(&mut self);
    fn previous_page(&mut self);
    fn next_block(&mut self);
    fn previous_block(&mut self);
    fn view(&self) -> CollectionView;
}

impl<T, F> CollectionControls for PagedCollection<T, F>
where
    T: Clone + Searchable + ListEntry,
    F: TabFilter<T>,
{
    fn cycle_filter(&mut self) {
        PagedCollection::cycle_filter(self);
    }

    fn set_query(&mut self, query: &str) {
        PagedCollection::set_query(self, query);
    }

    fn query(&self) -> &str {
        PagedCollection::query(self)
    }

    fn set_page(&mut self, page: usize) {
        PagedCollection::set_page(self, page);
    }

    fn next_page(&mut self) {
        PagedCollection::next_page(self);
    }

    fn previous_page(&mut self) {
        PagedCollection::previous_page(self);
    }

    fn next_block(&mut self) {
        PagedCollection::next_block(self);
    }

    fn previous_block(&mut self) {
        PagedCollection::previous_block(self);
    }

    fn view(&self) -> CollectionView {
        let filtered = self.filtered();
        let page = paginate(&filtered, self.current_page(), self.page_size());

        CollectionView {
            rows: page
                .items
                .iter()
                .map(|item| CollectionRow {
                    title: item.title(),
                    detail: item.detail(),
                    badge: item.badge(),
                    timestamp: item.timestamp().to_owned(),
                })
                .collect(),
            filter_labels: F::ALL.iter().map(|filter| filter.label()).collect(),
            active_filter: self.active_filter().index(),
            current_page: self.current_page(),
            total_pages: page.total_pages,
            block: page_block(self.current_page(), page.total_pages, PAGE_BLOCK_SIZE),
            matching: filtered.len(),
            total: self.items().len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CollectionsState {
    pub active: CollectionKind,
    pub applied: PagedCollection<AppliedCommunity, AppliedFilter>,
    pub recruiting: PagedCollection<RecruitingCommunity, RecruitingFilter>,
    pub library: PagedCollection<LibraryBook, LibraryFilter>,
    pub wishlist: PagedCollection<WishlistBook, WishlistFilter>,
    pub activities: PagedCollection<Activity, ActivityFilter>,
    search_focused: bool,
    pub selected_row: usize,
}

impl CollectionsState {
    pub fn new(page_sizes: PageSizes) -> Self {
        Self {
            active: CollectionKind::AppliedCommunities,
            applied: PagedCollection::new(Vec::new(), page_sizes.applied),
            recruiting: PagedCollection::new(Vec::new(), page_sizes.recruiting),
            library: PagedCollection::new(Vec::new(), page_sizes.library),
            wishlist: PagedCollection::new(Vec::new(), page_sizes.wishlist),
            activities: PagedCollection::new(Vec::new(), page_sizes.activities),
            search_focused: false,
            selected_row: 0,
        }
    }

    /// Replaces every list after a (re)load. Tabs survive, pages are clamped.
    pub fn set_snapshot(&mut self, snapshot: &Snapshot) {
        self.applied.set_items(snapshot.applied_communities.clone());
        self.recruiting
            .set_items(snapshot.recruiting_communities.clone());
        self.library.set_items(snapshot.library.clone());
        self.wishlist.set_items(snapshot.wishlist.clone());
        self.activities.set_items(snapshot.activities.clone());
        self.clamp_selection();
    }

    pub fn active(&self) -> &dyn CollectionControls {
        match self.active {
            CollectionKind::AppliedCommunities => &self.applied,
            CollectionKind::RecruitingCommunities => &self.recruiting,
            CollectionKind::Library => &self.library,
            CollectionKind::Wishlist => &self.wishlist,
            CollectionKind::Activities => &self.activities,
        }
    }

    fn active_mut(&mut self) -> &mut dyn CollectionControls {
        match self.active {
            CollectionKind::AppliedCommunities => &mut self.applied,
            CollectionKind::RecruitingCommunities => &mut self.recruiting,
            CollectionKind::Library => &mut self.library,
            CollectionKind::Wishlist => &mut self.wishlist,
            CollectionKind::Activities => &mut self.activities,
        }
    }

    pub fn view(&self) -> CollectionView {
        self.active().view()
    }

    pub fn select_kind(&mut self, kind: CollectionKind) {
        self.active = kind;
        self.selected_row = 0;
    }

    pub fn next_kind(&mut self) {
        self.select_kind(self.active.next());
    }

    pub fn previous_kind(&mut self) {
        self.select_kind(self.active.previous());
    }

    pub fn cycle_filter(&mut self) {
        self.active_mut().cycle_filter();
        self.selected_row = 0;
    }

    pub fn next_page(&mut self) {
        self.active_mut().next_page();
        self.selected_row = 0;
    }

    pub fn previous_page(&mut self) {
        self.active_mut().previous_page();
        self.selected_row = 0;
    }

    pub fn next_block(&mut self) {
        self.active_mut().next_block();
        self.selected_row = 0;
    }

    pub fn previous_block(&mut self) {
        self.active_mut().previous_block();
        self.selected_row = 0;
    }

    pub fn first_page(&mut self) {
        self.active_mut().set_page(1);
        self.selected_row = 0;
    }

    pub fn last_page(&mut self) {
        self.active_mut().set_page(usize::MAX);
        self.selected_row = 0;
    }

    pub fn focus_search(&mut self) {
        self.search_focused = true;
    }

    pub fn is_search_focused(&self) -> bool {
        self.search_focused
    }

    pub fn unfocus_search(&mut self) {
        self.search_focused = false;
    }

    pub fn search_push_char(&mut self, ch: char) {
        let mut query = self.query().to_owned();
        query.push(ch);
        self.set_query(&query);
    }

    pub fn search_backspace(&mut self) {
        let mut query = self.query().to_owned();
        if query.pop().is_some() {
            self.set_query(&query);
        }
    }

    /// The search text of the active list. Each list keeps its own.
    pub fn query(&self) -> &str {
        self.active().query()
    }

    fn set_query(&mut self, query: &str) {
        self.active_mut().set_query(query);
        self.selected_row = 0;
    }

    pub fn move_down(&mut self) {
        let rows = self.view().rows.len();
        if rows == 0 {
            self.selected_row = 0;
            return;
        }
        self.selected_row = (self.selected_row + 1).min(rows - 1);
    }

    pub fn move_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let rows = self.view().rows.len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
    }

    /// The activity under the cursor when the activities page is open.
    pub fn selected_activity(&self) -> Option<Activity> {
        if self.active != CollectionKind::Activities {
            return None;
        }
        self.activities
            .view()
            .items
            .into_iter()
            .nth(self.selected_row)
    }
}

#[cfg(test)]
mod tests {
    use super::CollectionsState;
    use crate::config::PageSizes;
    use crate::domain::CollectionKind;
    use crate::fixtures;
    use crate::paging::filters::AppliedFilter;

    fn demo_state() -> CollectionsState {
        let mut state = CollectionsState::new(PageSizes::default());
        state.set_snapshot(&fixtures::demo_snapshot());
        state
    }

    #[test]
    fn view_reports_filter_tabs_and_blocks() {
        let state = demo_state();
        let view = state.view();

        assert_eq!(view.filter_labels, ["all", "pending", "accepted", "rejected"]);
        assert_eq!(view.active_filter, 0);
        assert_eq!(view.rows.len(), 8);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.block.pages().collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(view.total, 20);
    }

    #[test]
    fn filter_cycle_returns_to_first_page() {
        let mut state = demo_state();
        state.next_page();
        state.move_down();
        assert_eq!(state.view().current_page, 2);

        state.cycle_filter();

        assert_eq!(state.applied.active_filter(), AppliedFilter::Pending);
        assert_eq!(state.view().current_page, 1);
        assert_eq!(state.selected_row, 0);
    }

    #[test]
    fn each_list_keeps_its_own_query() {
        let mut state = demo_state();
        state.select_kind(CollectionKind::Library);
        for ch in "cosmos".chars() {
            state.search_push_char(ch);
        }
        let matching = state.view().matching;
        assert!(matching > 0 && matching < 30);

        state.next_kind();
        assert_eq!(state.active, CollectionKind::Wishlist);
        assert!(state.query().is_empty());

        state.previous_kind();
        assert_eq!(state.query(), "cosmos");
    }

    #[test]
    fn last_page_clamps_and_selection_stays_in_range() {
        let mut state = demo_state();
        state.select_kind(CollectionKind::Activities);
        state.last_page();

        let view = state.view();
        assert_eq!(view.current_page, 3);
        assert_eq!(view.rows.len(), 5);

        for _ in 0..10 {
            state.move_down();
        }
        assert_eq!(state.selected_row, 4);
        assert!(state.selected_activity().is_some());
    }
}
