//! Route-local state for a single post and its comment thread.

use super::InputAction;
use super::comment_rows::{CommentRow, build_comment_rows};
use crate::domain::{Comment, Post, Viewer};
use crate::thread::policy::{TempIdAllocator, can_reply, is_own_comment};
use crate::thread::{
    append_root, build_tree, count_all, edit_comment, find_comment, insert_reply, reconcile_id,
};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Why a comment action was refused.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum CommentActionError {
    #[error("comment is empty")]
    Empty,
    #[error("comment {0} was not found")]
    NotFound(String),
    #[error("only top-level comments accept replies")]
    ReplyTooDeep,
    #[error("only your own comments can be edited")]
    NotOwner,
}

#[derive(Debug, Clone)]
pub struct PostScreenState {
    pub post: Post,
    tree: Vec<Comment>,
    pub rows: Vec<CommentRow>,
    pub selected_row: usize,
    pub right_scroll: u16,
    pub drafts: HashMap<String, String>,
    collapsed: HashSet<String>,
    temp_ids: TempIdAllocator,
    viewer: Viewer,
}

impl PostScreenState {
    pub fn new(post: Post, viewer: Viewer) -> Self {
        let tree = build_tree(post.comments.clone());
        let mut state = Self {
            post,
            tree,
            rows: Vec::new(),
            selected_row: 0,
            right_scroll: 0,
            drafts: HashMap::new(),
            collapsed: HashSet::new(),
            temp_ids: TempIdAllocator::default(),
            viewer,
        };
        state.rebuild_rows(None);
        state
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn comment_count(&self) -> usize {
        count_all(&self.tree)
    }

    /// Replaces the post after a reload. Unconfirmed local comments are dropped.
    pub fn set_post(&mut self, post: Post) {
        let selected = self.selected_comment_id();
        self.tree = build_tree(post.comments.clone());
        self.post = post;
        self.rebuild_rows(selected.as_deref());
    }

    fn rebuild_rows(&mut self, select_id: Option<&str>) {
        self.rows = build_comment_rows(&self.tree, &self.collapsed, self.viewer.id);

        self.selected_row = select_id
            .and_then(|id| self.rows.iter().position(|row| row.comment_id == id))
            .unwrap_or(self.selected_row)
            .min(self.rows.len().saturating_sub(1));
        self.right_scroll = 0;
    }

    pub fn selected(&self) -> Option<&CommentRow> {
        self.rows.get(self.selected_row)
    }

    fn selected_comment_id(&self) -> Option<String> {
        self.selected().map(|row| row.comment_id.clone())
    }

    pub fn selected_comment(&self) -> Option<&Comment> {
        let row = self.selected()?;
        find_comment(&self.tree, &row.comment_id)
    }

    /// The root comment of the selected row's thread.
    pub fn selected_thread(&self) -> Option<&Comment> {
        let row = self.selected()?;
        find_comment(&self.tree, &row.root_id)
    }

    pub fn move_down(&mut self) {
        if self.rows.is_empty() {
            self.selected_row = 0;
            return;
        }
        self.selected_row = (self.selected_row + 1).min(self.rows.len() - 1);
        self.right_scroll = 0;
    }

    pub fn move_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
        self.right_scroll = 0;
    }

    pub fn scroll_preview_down(&mut self) {
        self.right_scroll = self.right_scroll.saturating_add(1);
    }

    pub fn scroll_preview_up(&mut self) {
        self.right_scroll = self.right_scroll.saturating_sub(1);
    }

    /// Collapses or expands the thread containing the selected row.
    pub fn toggle_selected_thread_collapsed(&mut self) {
        let Some(root_id) = self.selected().map(|row| row.root_id.clone()) else {
            return;
        };

        if !self.collapsed.remove(&root_id) {
            self.collapsed.insert(root_id.clone());
        }
        self.rebuild_rows(Some(&root_id));
    }

    /// Adds a top-level comment under a temporary id and selects it.
    pub fn add_comment(
        &mut self,
        content: &str,
        created_at: &str,
    ) -> Result<String, CommentActionError> {
        let comment = self.new_local_comment(content, created_at)?;
        let id = comment.id.clone();

        self.tree = append_root(&self.tree, comment);
        self.rebuild_rows(Some(&id));
        Ok(id)
    }

    /// Adds a reply to `parent_id` under a temporary id and selects it.
    pub fn add_reply(
        &mut self,
        parent_id: &str,
        content: &str,
        created_at: &str,
    ) -> Result<String, CommentActionError> {
        let parent = find_comment(&self.tree, parent_id)
            .ok_or_else(|| CommentActionError::NotFound(parent_id.to_owned()))?;
        if !can_reply(parent) {
            return Err(CommentActionError::ReplyTooDeep);
        }

        let comment = self.new_local_comment(content, created_at)?;
        let id = comment.id.clone();

        self.collapsed.remove(parent_id);
        self.tree = insert_reply(&self.tree, parent_id, comment);
        self.rebuild_rows(Some(&id));
        Ok(id)
    }

    /// Replaces the content of one of the viewer's comments.
    pub fn edit(
        &mut self,
        comment_id: &str,
        content: &str,
        updated_at: &str,
    ) -> Result<(), CommentActionError> {
        let comment = find_comment(&self.tree, comment_id)
            .ok_or_else(|| CommentActionError::NotFound(comment_id.to_owned()))?;
        if !is_own_comment(comment, self.viewer.id) {
            return Err(CommentActionError::NotOwner);
        }
        let content = content.trim();
        if content.is_empty() {
            return Err(CommentActionError::Empty);
        }

        self.tree = edit_comment(&self.tree, comment_id, content, updated_at);
        self.rebuild_rows(Some(comment_id));
        Ok(())
    }

    /// Swaps a temporary id for the confirmed one. Returns `false` when the
    /// temporary comment is gone, e.g. after a reload.
    pub fn confirm_comment(&mut self, temp_id: &str, server_id: &str) -> bool {
        if find_comment(&self.tree, temp_id).is_none() {
            return false;
        }

        let selected = self
            .selected_comment_id()
            .map(|id| if id == temp_id { server_id.to_owned() } else { id });
        self.tree = reconcile_id(&self.tree, temp_id, server_id);
        self.rebuild_rows(selected.as_deref());

        let pending = [
            InputAction::Reply {
                parent_id: temp_id.to_owned(),
            },
            InputAction::Edit {
                comment_id: temp_id.to_owned(),
            },
        ];
        for mut action in pending {
            if let Some(body) = self.drafts.remove(&action.draft_key()) {
                action.retarget(temp_id, server_id);
                self.drafts.insert(action.draft_key(), body);
            }
        }
        true
    }

    fn new_local_comment(
        &mut self,
        content: &str,
        created_at: &str,
    ) -> Result<Comment, CommentActionError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(CommentActionError::Empty);
        }

        Ok(
            Comment::new(self.temp_ids.next_id(), self.viewer.id, content, created_at)
                .with_nickname(self.viewer.nickname.clone()),
        )
    }

    pub fn draft(&self, key: &str) -> Option<&str> {
        self.drafts.get(key).map(String::as_str)
    }

    pub fn set_draft(&mut self, key: String, body: String) {
        if body.trim().is_empty() {
            self.drafts.remove(&key);
        } else {
            self.drafts.insert(key, body);
        }
    }

    pub fn clear_draft(&mut self, key: &str) {
        self.drafts.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::{CommentActionError, PostScreenState};
    use crate::domain::{Comment, Post, Viewer};

    const NOW: &str = "2026-03-05T08:00:00Z";

    fn post() -> Post {
        Post {
            id: "p1".to_owned(),
            community_name: "Slow Readers".to_owned(),
            title: "Chapter 1".to_owned(),
            author_id: 2,
            author_nickname: None,
            content: "Discuss".to_owned(),
            created_at: "2026-03-01T09:00:00Z".to_owned(),
            comments: vec![
                Comment::new("a", 2, "first", "2026-03-01T10:00:00Z"),
                Comment::new("b", 1, "mine", "2026-03-01T10:05:00Z").with_parent("a"),
                Comment::new("c", 1, "also mine", "2026-03-01T11:00:00Z"),
            ],
        }
    }

    fn state() -> PostScreenState {
        PostScreenState::new(
            post(),
            Viewer {
                id: 1,
                nickname: "mina".to_owned(),
            },
        )
    }

    #[test]
    fn reply_lands_under_parent_with_temp_id() {
        let mut state = state();
        let id = state.add_reply("c", " hello ", NOW).unwrap();

        assert_eq!(id, "temp-1");
        assert_eq!(state.comment_count(), 4);
        let row = state.selected().unwrap();
        assert_eq!(row.comment_id, "temp-1");
        assert_eq!(row.depth, 1);
        assert!(row.is_unsent && row.is_own);
        assert_eq!(state.selected_comment().unwrap().content, "hello");
    }

    #[test]
    fn replies_to_replies_are_refused() {
        let mut state = state();
        assert_eq!(
            state.add_reply("b", "nested", NOW),
            Err(CommentActionError::ReplyTooDeep)
        );
        assert_eq!(
            state.add_reply("zz", "hi", NOW),
            Err(CommentActionError::NotFound("zz".to_owned()))
        );
        assert_eq!(state.add_reply("a", "   ", NOW), Err(CommentActionError::Empty));
        assert_eq!(state.comment_count(), 3);
    }

    #[test]
    fn only_own_comments_are_editable() {
        let mut state = state();
        assert_eq!(state.edit("a", "changed", NOW), Err(CommentActionError::NotOwner));

        state.edit("b", "changed", NOW).unwrap();
        let edited = state.selected_comment().unwrap();
        assert_eq!(edited.content, "changed");
        assert!(edited.is_edited);
        assert_eq!(edited.updated_at.as_deref(), Some(NOW));
    }

    #[test]
    fn confirm_swaps_temp_id_and_keeps_selection() {
        let mut state = state();
        let temp = state.add_comment("new root", NOW).unwrap();

        assert!(state.confirm_comment(&temp, "c-900"));
        assert_eq!(state.selected().unwrap().comment_id, "c-900");
        assert!(!state.selected().unwrap().is_unsent);
        assert!(!state.confirm_comment(&temp, "c-901"));
    }

    #[test]
    fn collapse_hides_thread_replies() {
        let mut state = state();
        assert_eq!(state.rows.len(), 3);

        state.move_down();
        state.toggle_selected_thread_collapsed();

        assert_eq!(state.rows.len(), 2);
        assert_eq!(state.selected().unwrap().comment_id, "a");
        assert!(state.rows[0].is_collapsed);
    }

    #[test]
    fn confirmation_moves_drafts_to_the_server_id() {
        let mut state = state();
        let temp_id = state.add_comment("fresh", "2026-03-02T00:00:00Z").unwrap();
        state.set_draft(format!("reply:{temp_id}"), "half a reply".to_owned());
        state.set_draft("reply:a".to_owned(), "untouched".to_owned());

        assert!(state.confirm_comment(&temp_id, "local-9"));

        assert_eq!(state.draft("reply:local-9"), Some("half a reply"));
        assert_eq!(state.draft(&format!("reply:{temp_id}")), None);
        assert_eq!(state.draft("reply:a"), Some("untouched"));
    }

    #[test]
    fn blank_draft_is_not_kept() {
        let mut state = state();
        state.set_draft("reply:a".to_owned(), "draft".to_owned());
        assert_eq!(state.draft("reply:a"), Some("draft"));

        state.set_draft("reply:a".to_owned(), "  ".to_owned());
        assert_eq!(state.draft("reply:a"), None);
    }
}
