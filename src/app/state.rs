//! Application state models and route-local behavior.

mod collections;
mod comment_rows;
mod post;

pub use self::collections::{CollectionRow, CollectionView, CollectionsState};
pub use self::comment_rows::CommentRow;
pub use self::post::{CommentActionError, PostScreenState};
use crate::config::PageSizes;
use crate::domain::{Post, Route, Snapshot, Viewer};

/// Spinner frames used for active async operations.
pub const SPINNER_FRAMES: [&str; 8] = ["⢎⡰", "⢎⡡", "⢎⡑", "⢎⠱", "⠎⡱", "⢊⡱", "⢌⡱", "⢆⡱"];

/// Top-level mutable application state.
#[derive(Debug)]
pub struct AppState {
    pub route: Route,
    pub should_quit: bool,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
    pub source_label: String,
    pub viewer: Option<Viewer>,
    pub collections: CollectionsState,
    pub posts: Vec<Post>,
    pub post: Option<PostScreenState>,
    pub input: Option<InputState>,
    pub editor_requested: bool,
    viewer_override: Option<u64>,
    operation: Option<OperationState>,
}

#[derive(Debug)]
struct OperationState {
    label: String,
    spinner_index: usize,
}

/// What the input popup submits to.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum InputAction {
    Comment,
    Reply { parent_id: String },
    Edit { comment_id: String },
}

impl InputAction {
    /// Key under which an unfinished body is kept as a draft.
    pub fn draft_key(&self) -> String {
        match self {
            Self::Comment => "comment".to_owned(),
            Self::Reply { parent_id } => format!("reply:{parent_id}"),
            Self::Edit { comment_id } => format!("edit:{comment_id}"),
        }
    }

    /// Points a reply or edit aimed at `from` at `to` instead.
    pub fn retarget(&mut self, from: &str, to: &str) -> bool {
        let target = match self {
            Self::Comment => return false,
            Self::Reply { parent_id } => parent_id,
            Self::Edit { comment_id } => comment_id,
        };
        if target != from {
            return false;
        }
        *target = to.to_owned();
        true
    }
}

/// Single-buffer text input shown as a popup over the post screen.
#[derive(Debug, Clone)]
pub struct InputState {
    pub title: String,
    pub prompt: String,
    pub buffer: String,
    pub action: InputAction,
}

impl InputState {
    pub fn push_char(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    pub fn newline(&mut self) {
        self.buffer.push('\n');
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn trimmed(&self) -> String {
        self.buffer.trim().to_owned()
    }
}

impl AppState {
    pub fn new(page_sizes: PageSizes, viewer_override: Option<u64>) -> Self {
        Self {
            route: Route::Collections,
            should_quit: false,
            error_message: None,
            status_message: None,
            source_label: "(loading)".to_owned(),
            viewer: None,
            collections: CollectionsState::new(page_sizes),
            posts: Vec::new(),
            post: None,
            input: None,
            editor_requested: false,
            viewer_override,
            operation: None,
        }
    }

    /// Installs a freshly loaded snapshot. An open post is refreshed in place,
    /// or closed when it no longer exists.
    pub fn set_snapshot(&mut self, source_label: String, snapshot: Snapshot) {
        let mut viewer = snapshot.viewer.clone();
        if let Some(id) = self.viewer_override {
            viewer.id = id;
        }

        self.source_label = source_label;
        self.collections.set_snapshot(&snapshot);
        self.posts = snapshot.posts;
        self.viewer = Some(viewer);

        let Some(open_post_id) = self.post.as_ref().map(|post| post.post.id.clone()) else {
            return;
        };
        match self.posts.iter().find(|post| post.id == open_post_id).cloned() {
            Some(post) => {
                if let Some(screen) = self.post.as_mut() {
                    screen.set_post(post);
                }
            }
            None => {
                log::warn!("post {open_post_id} disappeared after reload");
                self.post = None;
                self.input = None;
                self.route = Route::Collections;
                self.error_message = Some(format!("post {open_post_id} is no longer available"));
            }
        }
    }

    pub fn viewer_label(&self) -> Option<String> {
        self.viewer
            .as_ref()
            .map(|viewer| format!("{}#{}", viewer.nickname, viewer.id))
    }

    /// Opens `post_id` on the post route. Returns `false` if it is unknown.
    pub fn open_post(&mut self, post_id: &str) -> bool {
        let Some(post) = self.posts.iter().find(|post| post.id == post_id).cloned() else {
            return false;
        };
        let Some(viewer) = self.viewer.clone() else {
            return false;
        };

        self.post = Some(PostScreenState::new(post, viewer));
        self.route = Route::Post;
        self.collections.unfocus_search();
        true
    }

    pub fn back_to_collections(&mut self) {
        self.route = Route::Collections;
        self.input = None;
    }

    pub fn begin_input(&mut self, input: InputState) {
        self.error_message = None;
        self.input = Some(input);
    }

    /// Closes the popup, keeping a non-empty buffer as a draft.
    pub fn cancel_input(&mut self) {
        let Some(input) = self.input.take() else {
            return;
        };
        if let Some(post) = self.post.as_mut() {
            post.set_draft(input.action.draft_key(), input.buffer);
        }
    }

    pub fn begin_operation(&mut self, label: impl Into<String>) {
        self.operation = Some(OperationState {
            label: label.into(),
            spinner_index: 0,
        });
    }

    pub fn end_operation(&mut self) {
        self.operation = None;
    }

    pub fn is_busy(&self) -> bool {
        self.operation.is_some()
    }

    pub fn advance_spinner(&mut self) {
        if let Some(operation) = self.operation.as_mut() {
            operation.spinner_index = (operation.spinner_index + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn operation_display(&self) -> Option<String> {
        let operation = self.operation.as_ref()?;
        let frame = SPINNER_FRAMES
            .get(operation.spinner_index)
            .copied()
            .unwrap_or("⢎⡰");
        Some(format!("{frame} {}", operation.label))
    }
}
