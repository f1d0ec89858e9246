use crate::domain::Comment;
use crate::thread::count_all;
use crate::thread::policy::{can_reply, is_own_comment, is_temp_id};
use std::collections::HashSet;

/// One visible line of the comment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRow {
    pub comment_id: String,
    pub root_id: String,
    pub depth: usize,
    pub author: String,
    pub content: String,
    pub reply_count: usize,
    pub is_own: bool,
    pub is_unsent: bool,
    pub is_edited: bool,
    pub can_reply: bool,
    pub is_collapsed: bool,
}

pub(super) fn build_comment_rows(
    tree: &[Comment],
    collapsed: &HashSet<String>,
    viewer_id: u64,
) -> Vec<CommentRow> {
    let mut rows = Vec::new();
    for root in tree {
        append_comment_rows(&mut rows, root, collapsed, viewer_id);
    }
    rows
}

/// Pushes `root` and its visible replies in depth-first order.
fn append_comment_rows(
    rows: &mut Vec<CommentRow>,
    root: &Comment,
    collapsed: &HashSet<String>,
    viewer_id: u64,
) {
    let mut stack = vec![root];
    while let Some(comment) = stack.pop() {
        let is_collapsed = collapsed.contains(&comment.id) && !comment.replies.is_empty();

        rows.push(CommentRow {
            comment_id: comment.id.clone(),
            root_id: root.id.clone(),
            depth: comment.depth,
            author: comment.author_label(),
            content: comment.content.clone(),
            reply_count: count_all(&comment.replies),
            is_own: is_own_comment(comment, viewer_id),
            is_unsent: is_temp_id(&comment.id),
            is_edited: comment.is_edited,
            can_reply: can_reply(comment),
            is_collapsed,
        });

        if !is_collapsed {
            stack.extend(comment.replies.iter().rev());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::build_comment_rows;
    use crate::domain::Comment;
    use crate::thread::build_tree;
    use std::collections::HashSet;

    fn tree() -> Vec<Comment> {
        build_tree(vec![
            Comment::new("a", 1, "root", "2026-03-01T10:00:00Z"),
            Comment::new("b", 2, "reply", "2026-03-01T10:05:00Z").with_parent("a"),
            Comment::new("c", 1, "nested", "2026-03-01T10:06:00Z").with_parent("b"),
            Comment::new("d", 2, "second root", "2026-03-01T11:00:00Z"),
        ])
    }

    #[test]
    fn rows_follow_depth_first_order() {
        let rows = build_comment_rows(&tree(), &HashSet::new(), 1);
        let ids: Vec<&str> = rows.iter().map(|row| row.comment_id.as_str()).collect();

        assert_eq!(ids, ["a", "b", "c", "d"]);
        assert_eq!(rows[2].root_id, "a");
        assert_eq!(rows[0].reply_count, 2);
        assert!(rows[0].is_own && !rows[1].is_own);
        assert!(rows[0].can_reply && !rows[1].can_reply);
    }

    #[test]
    fn collapsed_comment_hides_its_replies() {
        let collapsed = HashSet::from(["a".to_owned(), "d".to_owned()]);
        let rows = build_comment_rows(&tree(), &collapsed, 1);
        let ids: Vec<&str> = rows.iter().map(|row| row.comment_id.as_str()).collect();

        assert_eq!(ids, ["a", "d"]);
        assert!(rows[0].is_collapsed);
        assert!(!rows[1].is_collapsed);
    }

    #[test]
    fn long_reply_chain_flattens_in_order() {
        let chain: Vec<Comment> = (0..5_000)
            .map(|index| {
                let comment = Comment::new(format!("c{index}"), 2, "hop", "2026-03-01T10:00:00Z");
                match index {
                    0 => comment,
                    _ => comment.with_parent(format!("c{}", index - 1)),
                }
            })
            .collect();

        let rows = build_comment_rows(&build_tree(chain), &HashSet::new(), 1);

        assert_eq!(rows.len(), 5_000);
        assert_eq!(rows[4_999].comment_id, "c4999");
        assert_eq!(rows[4_999].depth, 4_999);
        assert_eq!(rows[4_999].root_id, "c0");
        assert_eq!(rows[0].reply_count, 4_999);
    }
}
