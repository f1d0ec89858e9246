//! Filtered, paginated views over in-memory collections.

mod block;
pub mod filters;

pub use self::block::{PAGE_BLOCK_SIZE, PageBlock, page_block};
use crate::search::fuzzy::QueryMatcher;
use std::fmt;

/// One page of a filtered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
}

/// The closed set of tabs a list page can filter by.
///
/// `Default` must be the variant that matches every item.
pub trait TabFilter<T>: Copy + Eq + Default + fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn matches(self, item: &T) -> bool;

    fn next(self) -> Self {
        let position = Self::ALL
            .iter()
            .position(|candidate| *candidate == self)
            .unwrap_or_default();
        Self::ALL
            .get((position + 1) % Self::ALL.len().max(1))
            .copied()
            .unwrap_or_default()
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|candidate| *candidate == self)
            .unwrap_or_default()
    }
}

/// Text a list item exposes to the search box.
pub trait Searchable {
    fn search_text(&self) -> String;
}

/// Keeps the items for which `predicate` holds, in their original order.
pub fn apply_filter<T, P>(items: &[T], predicate: P) -> Vec<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    items.iter().filter(|item| predicate(item)).cloned().collect()
}

/// Returns `max(1, ceil(len / page_size))`.
///
/// `page_size` must be at least 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size).max(1)
}

/// Slices page `page` (1-based) out of `filtered`.
///
/// Callers guarantee `page >= 1` and `page_size >= 1`. A page past the end
/// yields no items; it is never wrapped or corrected here.
pub fn paginate<T: Clone>(filtered: &[T], page: usize, page_size: usize) -> Page<T> {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let end = page.saturating_mul(page_size).min(filtered.len());
    let items = if start < end {
        filtered[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page {
        items,
        total_pages: total_pages(filtered.len(), page_size),
    }
}

/// Host-side page state: the full collection plus the active tab, search
/// query, and page. Every filter or query change lands back on page 1.
#[derive(Debug, Clone)]
pub struct PagedCollection<T, F> {
    items: Vec<T>,
    active_filter: F,
    query: String,
    current_page: usize,
    page_size: usize,
}

impl<T, F> PagedCollection<T, F>
where
    T: Clone + Searchable,
    F: TabFilter<T>,
{
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            active_filter: F::default(),
            query: String::new(),
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn active_filter(&self) -> F {
        self.active_filter
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the collection after a reload, keeping the tab and clamping
    /// the page into the new range.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.current_page = self.current_page.clamp(1, self.total_pages());
    }

    pub fn set_filter(&mut self, filter: F) {
        self.active_filter = filter;
        self.current_page = 1;
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.active_filter.next());
    }

    pub fn set_query(&mut self, query: &str) {
        if self.query == query {
            return;
        }
        self.query = query.to_owned();
        self.current_page = 1;
    }

    pub fn filtered(&self) -> Vec<T> {
        let matcher = QueryMatcher::new(&self.query);
        let filter = self.active_filter;
        apply_filter(&self.items, |item| {
            filter.matches(item) && (matcher.is_empty() || matcher.matches(&item.search_text()))
        })
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page_size)
    }

    pub fn view(&self) -> Page<T> {
        paginate(&self.filtered(), self.current_page, self.page_size)
    }

    /// Moves to `page`, clamped into `[1, total_pages]`. The tab is untouched.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.current_page.saturating_sub(1));
    }

    pub fn block(&self) -> PageBlock {
        page_block(self.current_page, self.total_pages(), PAGE_BLOCK_SIZE)
    }

    pub fn next_block(&mut self) {
        if let Some(page) = self.block().next {
            self.set_page(page);
        }
    }

    pub fn previous_block(&mut self) {
        if let Some(page) = self.block().previous {
            self.set_page(page);
        }
    }
}
