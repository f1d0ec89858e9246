//! Action-availability rules for comments. These gate what the UI offers;
//! the tree itself accepts any depth.

use crate::domain::Comment;

/// Comments at a depth below this value accept new replies.
pub const MAX_REPLY_DEPTH: usize = 1;

const TEMP_ID_PREFIX: &str = "temp-";

pub fn can_reply(comment: &Comment) -> bool {
    comment.depth < MAX_REPLY_DEPTH
}

pub fn is_own_comment(comment: &Comment, viewer_id: u64) -> bool {
    comment.author_id == viewer_id
}

/// Hands out ids for comments the server has not confirmed yet.
#[derive(Debug, Clone, Default)]
pub struct TempIdAllocator {
    next: u64,
}

impl TempIdAllocator {
    pub fn next_id(&mut self) -> String {
        self.next += 1;
        format!("{TEMP_ID_PREFIX}{}", self.next)
    }
}

pub fn is_temp_id(id: &str) -> bool {
    id.starts_with(TEMP_ID_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::{TempIdAllocator, can_reply, is_own_comment, is_temp_id};
    use crate::domain::Comment;

    #[test]
    fn only_top_level_comments_accept_replies() {
        let mut comment = Comment::new("c1", 4, "hello", "2026-03-01T00:00:00Z");
        assert!(can_reply(&comment));

        comment.depth = 1;
        assert!(!can_reply(&comment));
    }

    #[test]
    fn ownership_compares_author_with_viewer() {
        let comment = Comment::new("c1", 4, "hello", "2026-03-01T00:00:00Z");
        assert!(is_own_comment(&comment, 4));
        assert!(!is_own_comment(&comment, 5));
    }

    #[test]
    fn temp_ids_are_sequential_and_recognizable() {
        let mut ids = TempIdAllocator::default();
        assert_eq!(ids.next_id(), "temp-1");
        assert_eq!(ids.next_id(), "temp-2");
        assert!(is_temp_id("temp-2"));
        assert!(!is_temp_id("c-17"));
    }
}
