//! Domain models shared across loading, paging, and UI layers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A comment on a community post.
///
/// `depth` and `replies` are derived by [`crate::thread::build_tree`]; values
/// arriving from a snapshot are ignored.
///
/// `Clone` and `Drop` walk `replies` with an explicit stack, so reply chains
/// of any length are safe to copy and release.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author_id: u64,
    #[serde(default)]
    pub author_nickname: Option<String>,
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub is_edited: bool,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default, skip_deserializing)]
    pub depth: usize,
    #[serde(default, skip_deserializing)]
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn new(
        id: impl Into<String>,
        author_id: u64,
        content: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author_id,
            author_nickname: None,
            content: content.into(),
            created_at: created_at.into(),
            updated_at: None,
            is_edited: false,
            parent_id: None,
            depth: 0,
            replies: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.author_nickname = Some(nickname.into());
        self
    }

    /// Returns the nickname when known, otherwise a stable `user#id` label.
    pub fn author_label(&self) -> String {
        match self
            .author_nickname
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            Some(nickname) => nickname.to_owned(),
            None => format!("user#{}", self.author_id),
        }
    }
}

impl Comment {
    fn without_replies(&self) -> Self {
        Self {
            id: self.id.clone(),
            author_id: self.author_id,
            author_nickname: self.author_nickname.clone(),
            content: self.content.clone(),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
            is_edited: self.is_edited,
            parent_id: self.parent_id.clone(),
            depth: self.depth,
            replies: Vec::new(),
        }
    }
}

impl Clone for Comment {
    fn clone(&self) -> Self {
        // Breadth-first listing: every parent precedes its replies.
        let mut nodes: Vec<(&Comment, usize)> = vec![(self, 0)];
        let mut cursor = 0;
        while let Some((node, _)) = nodes.get(cursor).copied() {
            nodes.extend(node.replies.iter().map(|reply| (reply, cursor)));
            cursor += 1;
        }

        let mut copied: Vec<Vec<Comment>> = (0..nodes.len()).map(|_| Vec::new()).collect();
        for position in (1..nodes.len()).rev() {
            let (node, parent) = nodes[position];
            let mut copy = node.without_replies();
            copy.replies = std::mem::take(&mut copied[position]);
            copy.replies.reverse();
            copied[parent].push(copy);
        }

        let mut root = self.without_replies();
        root.replies = std::mem::take(&mut copied[0]);
        root.replies.reverse();
        root
    }
}

impl Drop for Comment {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.replies);
        while let Some(mut comment) = pending.pop() {
            pending.append(&mut comment.replies);
        }
    }
}

/// The signed-in reader. Passed explicitly wherever authorship matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub id: u64,
    pub nickname: String,
}

/// A community board post with its flat comment list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub community_name: String,
    pub title: String,
    pub author_id: u64,
    #[serde(default)]
    pub author_nickname: Option<String>,
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Fields shared by every community listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunitySummary {
    pub id: u64,
    pub name: String,
    pub book_title: String,
    pub member_count: u32,
    pub capacity: u32,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

/// A community the viewer applied to join.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedCommunity {
    #[serde(flatten)]
    pub community: CommunitySummary,
    pub status: ApplicationStatus,
    pub applied_at: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecruitStatus {
    Recruiting,
    Closed,
}

impl RecruitStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Recruiting => "recruiting",
            Self::Closed => "closed",
        }
    }
}

/// A community the viewer runs that is (or was) recruiting members.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruitingCommunity {
    #[serde(flatten)]
    pub community: CommunitySummary,
    pub recruit_status: RecruitStatus,
    #[serde(default)]
    pub pending_applications: u32,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingStatus {
    Reading,
    Finished,
}

impl ReadingStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Reading => "reading",
            Self::Finished => "finished",
        }
    }
}

/// A book on the viewer's shelf.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub publisher: String,
    pub reading_status: ReadingStatus,
    pub added_at: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookCategory {
    Fiction,
    Essay,
    Humanities,
    Science,
    Other,
}

impl BookCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Fiction => "fiction",
            Self::Essay => "essay",
            Self::Humanities => "humanities",
            Self::Science => "science",
            Self::Other => "other",
        }
    }
}

/// A book the viewer wants to read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub category: BookCategory,
    pub added_at: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Post,
    Comment,
}

/// An entry in the viewer's activity history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub kind: ActivityKind,
    pub post_id: String,
    pub community_name: String,
    pub excerpt: String,
    pub created_at: String,
}

/// Everything the client knows after one load from the data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub viewer: Viewer,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub applied_communities: Vec<AppliedCommunity>,
    #[serde(default)]
    pub recruiting_communities: Vec<RecruitingCommunity>,
    #[serde(default)]
    pub library: Vec<LibraryBook>,
    #[serde(default)]
    pub wishlist: Vec<WishlistBook>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// The current application route.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Route {
    Collections,
    Post,
}

/// The list pages reachable from the collections route.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CollectionKind {
    AppliedCommunities,
    RecruitingCommunities,
    Library,
    Wishlist,
    Activities,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 5] = [
        Self::AppliedCommunities,
        Self::RecruitingCommunities,
        Self::Library,
        Self::Wishlist,
        Self::Activities,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::AppliedCommunities => "Applied",
            Self::RecruitingCommunities => "Recruiting",
            Self::Library => "Library",
            Self::Wishlist => "Wishlist",
            Self::Activities => "Activities",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Display fields for one row of a list page.
pub trait ListEntry {
    fn title(&self) -> String;
    fn detail(&self) -> String;
    fn badge(&self) -> String;
    fn timestamp(&self) -> &str;
}

impl ListEntry for AppliedCommunity {
    fn title(&self) -> String {
        self.community.name.clone()
    }

    fn detail(&self) -> String {
        format!(
            "{}  {}/{} members",
            self.community.book_title, self.community.member_count, self.community.capacity
        )
    }

    fn badge(&self) -> String {
        self.status.label().to_owned()
    }

    fn timestamp(&self) -> &str {
        &self.applied_at
    }
}

impl ListEntry for RecruitingCommunity {
    fn title(&self) -> String {
        self.community.name.clone()
    }

    fn detail(&self) -> String {
        let mut detail = format!(
            "{}  {}/{} members",
            self.community.book_title, self.community.member_count, self.community.capacity
        );
        if self.pending_applications > 0 {
            detail.push_str(&format!("  {} waiting", self.pending_applications));
        }
        detail
    }

    fn badge(&self) -> String {
        self.recruit_status.label().to_owned()
    }

    fn timestamp(&self) -> &str {
        &self.community.created_at
    }
}

impl ListEntry for LibraryBook {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn detail(&self) -> String {
        if self.publisher.trim().is_empty() {
            self.author.clone()
        } else {
            format!("{} · {}", self.author, self.publisher)
        }
    }

    fn badge(&self) -> String {
        self.reading_status.label().to_owned()
    }

    fn timestamp(&self) -> &str {
        &self.added_at
    }
}

impl ListEntry for WishlistBook {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn detail(&self) -> String {
        self.author.clone()
    }

    fn badge(&self) -> String {
        self.category.label().to_owned()
    }

    fn timestamp(&self) -> &str {
        &self.added_at
    }
}

impl ListEntry for Activity {
    fn title(&self) -> String {
        self.excerpt.clone()
    }

    fn detail(&self) -> String {
        self.community_name.clone()
    }

    fn badge(&self) -> String {
        self.kind.to_string()
    }

    fn timestamp(&self) -> &str {
        &self.created_at
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Post => write!(f, "post"),
            Self::Comment => write!(f, "comment"),
        }
    }
}
