//! Tab filters for each list page.

use super::{Searchable, TabFilter};
use crate::domain::{
    Activity, ActivityKind, AppliedCommunity, ApplicationStatus, BookCategory, LibraryBook,
    ReadingStatus, RecruitStatus, RecruitingCommunity, WishlistBook,
};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum AppliedFilter {
    #[default]
    All,
    Pending,
    Accepted,
    Rejected,
}

impl TabFilter<AppliedCommunity> for AppliedFilter {
    const ALL: &'static [Self] = &[Self::All, Self::Pending, Self::Accepted, Self::Rejected];

    fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    fn matches(self, item: &AppliedCommunity) -> bool {
        match self {
            Self::All => true,
            Self::Pending => item.status == ApplicationStatus::Pending,
            Self::Accepted => item.status == ApplicationStatus::Accepted,
            Self::Rejected => item.status == ApplicationStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum RecruitingFilter {
    #[default]
    All,
    Recruiting,
    Closed,
}

impl TabFilter<RecruitingCommunity> for RecruitingFilter {
    const ALL: &'static [Self] = &[Self::All, Self::Recruiting, Self::Closed];

    fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Recruiting => "recruiting",
            Self::Closed => "closed",
        }
    }

    fn matches(self, item: &RecruitingCommunity) -> bool {
        match self {
            Self::All => true,
            Self::Recruiting => item.recruit_status == RecruitStatus::Recruiting,
            Self::Closed => item.recruit_status == RecruitStatus::Closed,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum LibraryFilter {
    #[default]
    All,
    Reading,
    Finished,
}

impl TabFilter<LibraryBook> for LibraryFilter {
    const ALL: &'static [Self] = &[Self::All, Self::Reading, Self::Finished];

    fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Reading => "reading",
            Self::Finished => "finished",
        }
    }

    fn matches(self, item: &LibraryBook) -> bool {
        match self {
            Self::All => true,
            Self::Reading => item.reading_status == ReadingStatus::Reading,
            Self::Finished => item.reading_status == ReadingStatus::Finished,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum WishlistFilter {
    #[default]
    All,
    Category(BookCategory),
}

impl TabFilter<WishlistBook> for WishlistFilter {
    const ALL: &'static [Self] = &[
        Self::All,
        Self::Category(BookCategory::Fiction),
        Self::Category(BookCategory::Essay),
        Self::Category(BookCategory::Humanities),
        Self::Category(BookCategory::Science),
        Self::Category(BookCategory::Other),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Category(category) => category.label(),
        }
    }

    fn matches(self, item: &WishlistBook) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => item.category == category,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum ActivityFilter {
    #[default]
    All,
    Posts,
    Comments,
}

impl TabFilter<Activity> for ActivityFilter {
    const ALL: &'static [Self] = &[Self::All, Self::Posts, Self::Comments];

    fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Posts => "posts",
            Self::Comments => "comments",
        }
    }

    fn matches(self, item: &Activity) -> bool {
        match self {
            Self::All => true,
            Self::Posts => item.kind == ActivityKind::Post,
            Self::Comments => item.kind == ActivityKind::Comment,
        }
    }
}

impl Searchable for AppliedCommunity {
    fn search_text(&self) -> String {
        format!("{} {}", self.community.name, self.community.book_title)
    }
}

impl Searchable for RecruitingCommunity {
    fn search_text(&self) -> String {
        format!("{} {}", self.community.name, self.community.book_title)
    }
}

impl Searchable for LibraryBook {
    fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.author, self.publisher)
    }
}

impl Searchable for WishlistBook {
    fn search_text(&self) -> String {
        format!("{} {}", self.title, self.author)
    }
}

impl Searchable for Activity {
    fn search_text(&self) -> String {
        format!("{} {}", self.community_name, self.excerpt)
    }
}
