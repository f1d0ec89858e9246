//! Comment thread construction and immutable tree edits.
//!
//! Every operation here is pure: trees go in by reference and a new tree
//! comes back. Malformed input degrades instead of failing.

mod order;
pub mod policy;

use self::order::{CreatedAtKey, created_at_key};
use crate::domain::Comment;
use std::collections::{HashMap, HashSet};

/// Builds a nested reply tree from a flat, order-independent comment list.
///
/// Siblings are ordered by `created_at` ascending, ties keep input order.
/// Comments whose parent is missing become roots. Parent cycles are broken
/// by promoting the earliest-listed member of the cycle to a root, so every
/// input comment appears exactly once in the output. Promoted roots lose
/// their `parent_id`.
///
/// No step recurses, so reply chains of any length are accepted.
pub fn build_tree(comments: Vec<Comment>) -> Vec<Comment> {
    let mut builder = TreeBuilder::new(comments);

    let mut roots: Vec<(usize, Comment)> = Vec::new();
    let root_indices: Vec<usize> = (0..builder.parents.len())
        .filter(|index| builder.parents[*index].is_none())
        .collect();
    for index in root_indices {
        if let Some(comment) = builder.materialize(index) {
            roots.push((index, comment));
        }
    }

    // Anything left is unreachable from a root: it sits on or below a cycle.
    while let Some(start) = builder.first_unplaced() {
        let entry = builder.cycle_entry(start);
        log::debug!(
            "breaking parent cycle at comment {}",
            builder.id_of(entry).unwrap_or("?")
        );
        if let Some(comment) = builder.materialize(entry) {
            roots.push((entry, comment));
        }
    }

    roots.sort_by(|a, b| builder.keys[a.0].cmp(&builder.keys[b.0]).then(a.0.cmp(&b.0)));
    roots.into_iter().map(|(_, comment)| comment).collect()
}

/// Returns a new tree with `reply` appended as the last reply of `parent_id`.
///
/// The reply's depth is derived from its parent. When no comment has id
/// `parent_id`, the returned tree equals the input.
pub fn insert_reply(tree: &[Comment], parent_id: &str, reply: Comment) -> Vec<Comment> {
    let mut next = tree.to_vec();
    let Some(parent) = find_comment_mut(&mut next, parent_id) else {
        log::debug!("reply target {parent_id} not found; tree left unchanged");
        return next;
    };

    let mut reply = reply;
    reply.parent_id = Some(parent.id.clone());
    assign_depths(&mut reply, parent.depth + 1);
    parent.replies.push(reply);
    next
}

/// Returns a new tree with `comment` added as the last root.
pub fn append_root(tree: &[Comment], comment: Comment) -> Vec<Comment> {
    let mut comment = comment;
    comment.parent_id = None;
    assign_depths(&mut comment, 0);

    let mut next = tree.to_vec();
    next.push(comment);
    next
}

/// Returns a new tree where comment `id` carries `content` and is marked edited.
///
/// Unknown ids leave the tree unchanged.
pub fn edit_comment(
    tree: &[Comment],
    id: &str,
    content: impl Into<String>,
    updated_at: impl Into<String>,
) -> Vec<Comment> {
    let mut next = tree.to_vec();
    if let Some(target) = find_comment_mut(&mut next, id) {
        target.content = content.into();
        target.updated_at = Some(updated_at.into());
        target.is_edited = true;
    }
    next
}

/// Returns a new tree where a client-assigned `temp_id` is replaced by the
/// id the server confirmed. Direct replies are re-pointed at the new id.
pub fn reconcile_id(tree: &[Comment], temp_id: &str, server_id: &str) -> Vec<Comment> {
    let mut next = tree.to_vec();
    if let Some(target) = find_comment_mut(&mut next, temp_id) {
        target.id = server_id.to_owned();
        for reply in &mut target.replies {
            if reply.parent_id.as_deref() == Some(temp_id) {
                reply.parent_id = Some(server_id.to_owned());
            }
        }
    }
    next
}

/// Finds a comment anywhere in the tree, depth-first.
pub fn find_comment<'a>(tree: &'a [Comment], id: &str) -> Option<&'a Comment> {
    let mut stack: Vec<&Comment> = tree.iter().rev().collect();
    while let Some(comment) = stack.pop() {
        if comment.id == id {
            return Some(comment);
        }
        stack.extend(comment.replies.iter().rev());
    }
    None
}

/// Counts every comment in the tree, nested replies included.
pub fn count_all(tree: &[Comment]) -> usize {
    let mut stack: Vec<&[Comment]> = vec![tree];
    let mut total = 0;
    while let Some(level) = stack.pop() {
        total += level.len();
        stack.extend(level.iter().map(|comment| comment.replies.as_slice()));
    }
    total
}

fn find_comment_mut<'a>(tree: &'a mut [Comment], id: &str) -> Option<&'a mut Comment> {
    let mut stack: Vec<&mut Comment> = tree.iter_mut().rev().collect();
    while let Some(comment) = stack.pop() {
        if comment.id == id {
            return Some(comment);
        }
        stack.extend(comment.replies.iter_mut().rev());
    }
    None
}

fn assign_depths(comment: &mut Comment, depth: usize) {
    let mut stack = vec![(comment, depth)];
    while let Some((node, depth)) = stack.pop() {
        node.depth = depth;
        stack.extend(node.replies.iter_mut().map(|reply| (reply, depth + 1)));
    }
}

struct TreeBuilder {
    slots: Vec<Option<Comment>>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    keys: Vec<CreatedAtKey>,
}

impl TreeBuilder {
    fn new(comments: Vec<Comment>) -> Self {
        let mut index_by_id: HashMap<&str, usize> = HashMap::with_capacity(comments.len());
        for (index, comment) in comments.iter().enumerate() {
            index_by_id.entry(comment.id.as_str()).or_insert(index);
        }

        let parents: Vec<Option<usize>> = comments
            .iter()
            .enumerate()
            .map(|(index, comment)| {
                let parent_id = comment.parent_id.as_deref()?;
                match index_by_id.get(parent_id) {
                    Some(parent) if *parent != index => Some(*parent),
                    Some(_) => {
                        log::debug!("comment {} names itself as parent", comment.id);
                        None
                    }
                    None => {
                        log::debug!(
                            "comment {} replies to missing comment {parent_id}; promoting to root",
                            comment.id
                        );
                        None
                    }
                }
            })
            .collect();

        let keys: Vec<CreatedAtKey> = comments
            .iter()
            .map(|comment| created_at_key(&comment.created_at))
            .collect();

        let mut children = vec![Vec::new(); comments.len()];
        for (index, parent) in parents.iter().enumerate() {
            if let Some(parent) = parent {
                children[*parent].push(index);
            }
        }
        for siblings in &mut children {
            siblings.sort_by(|a, b| keys[*a].cmp(&keys[*b]).then(a.cmp(b)));
        }

        let slots = comments
            .into_iter()
            .map(|mut comment| {
                comment.replies.clear();
                Some(comment)
            })
            .collect();

        Self {
            slots,
            parents,
            children,
            keys,
        }
    }

    /// Detaches the subtree under `root` from the slots and returns it with
    /// `root` at depth 0. Comments already placed are skipped, which is what
    /// stops a walk that re-enters its own cycle.
    fn materialize(&mut self, root: usize) -> Option<Comment> {
        // Pre-order visit: each entry is (slot, placed parent slot).
        let mut visited: Vec<(usize, Option<usize>, Comment)> = Vec::new();
        let mut stack = vec![(root, None, 0)];
        while let Some((index, parent, depth)) = stack.pop() {
            let Some(mut comment) = self.slots[index].take() else {
                continue;
            };
            comment.depth = depth;
            if parent.is_none() {
                comment.parent_id = None;
            }
            stack.extend(
                self.children[index]
                    .iter()
                    .rev()
                    .map(|child| (*child, Some(index), depth + 1)),
            );
            visited.push((index, parent, comment));
        }

        // Reverse pre-order finishes every subtree before its parent.
        let mut replies: HashMap<usize, Vec<Comment>> = HashMap::new();
        let mut placed = None;
        while let Some((index, parent, mut comment)) = visited.pop() {
            if let Some(mut children) = replies.remove(&index) {
                children.reverse();
                comment.replies = children;
            }
            match parent {
                Some(parent) => replies.entry(parent).or_default().push(comment),
                None => placed = Some(comment),
            }
        }
        placed
    }

    fn first_unplaced(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_some)
    }

    /// Walks parent links from `start` until a comment repeats, then returns
    /// the lowest input index on that cycle.
    fn cycle_entry(&self, start: usize) -> usize {
        let mut seen = HashSet::new();
        let mut current = start;
        while seen.insert(current) {
            match self.parents[current] {
                Some(parent) => current = parent,
                None => return start,
            }
        }

        let mut entry = current;
        let mut member = current;
        loop {
            match self.parents[member] {
                Some(parent) if parent != current => {
                    member = parent;
                    entry = entry.min(member);
                }
                _ => break,
            }
        }
        entry
    }

    fn id_of(&self, index: usize) -> Option<&str> {
        self.slots[index].as_ref().map(|comment| comment.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        append_root, build_tree, count_all, edit_comment, find_comment, insert_reply,
        reconcile_id,
    };
    use crate::domain::Comment;

    fn comment(id: &str, parent: Option<&str>, created_at: &str) -> Comment {
        let comment = Comment::new(id, 1, format!("comment {id}"), created_at);
        match parent {
            Some(parent) => comment.with_parent(parent),
            None => comment,
        }
    }

    fn ids(tree: &[Comment]) -> Vec<&str> {
        tree.iter().map(|comment| comment.id.as_str()).collect()
    }

    fn assert_depths(tree: &[Comment], expected: usize) {
        for node in tree {
            assert_eq!(node.depth, expected, "depth of {}", node.id);
            assert_depths(&node.replies, expected + 1);
        }
    }

    fn sample() -> Vec<Comment> {
        vec![
            comment("c3", Some("c1"), "2026-03-01T10:05:00Z"),
            comment("c1", None, "2026-03-01T10:00:00Z"),
            comment("c4", Some("c3"), "2026-03-01T10:06:00Z"),
            comment("c2", None, "2026-03-01T09:00:00Z"),
            comment("c5", Some("c1"), "2026-03-01T10:01:00Z"),
        ]
    }

    #[test]
    fn empty_input_builds_empty_tree() {
        assert!(build_tree(Vec::new()).is_empty());
    }

    #[test]
    fn nests_replies_and_preserves_count() {
        let tree = build_tree(sample());

        assert_eq!(count_all(&tree), 5);
        assert_eq!(ids(&tree), ["c2", "c1"]);
        assert_eq!(ids(&tree[1].replies), ["c5", "c3"]);
        assert_eq!(ids(&tree[1].replies[1].replies), ["c4"]);
        assert_depths(&tree, 0);
    }

    #[test]
    fn upstream_depth_and_replies_are_recomputed() {
        let mut root = comment("root", None, "2026-03-01T10:00:00Z");
        root.depth = 7;
        root.replies = vec![comment("ghost", None, "2026-03-01T10:00:00Z")];
        let mut reply = comment("reply", Some("root"), "2026-03-01T10:01:00Z");
        reply.depth = 0;

        let tree = build_tree(vec![root, reply]);

        assert_eq!(count_all(&tree), 2);
        assert_eq!(tree[0].depth, 0);
        assert_eq!(tree[0].replies[0].depth, 1);
        assert!(find_comment(&tree, "ghost").is_none());
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let tree = build_tree(vec![
            comment("b", None, "2026-03-01T10:00:00Z"),
            comment("a", None, "2026-03-01T10:00:00Z"),
            comment("r2", Some("b"), "2026-03-01T11:00:00Z"),
            comment("r1", Some("b"), "2026-03-01T11:00:00Z"),
        ]);

        assert_eq!(ids(&tree), ["b", "a"]);
        assert_eq!(ids(&tree[0].replies), ["r2", "r1"]);
    }

    #[test]
    fn orders_by_instant_not_by_text() {
        let tree = build_tree(vec![
            comment("utc", None, "2026-03-01T02:00:00Z"),
            comment("seoul", None, "2026-03-01T10:00:00+09:00"),
        ]);

        assert_eq!(ids(&tree), ["seoul", "utc"]);
    }

    #[test]
    fn orphan_reply_becomes_root() {
        let tree = build_tree(vec![
            comment("root", None, "2026-03-01T10:00:00Z"),
            comment("orphan", Some("missing"), "2026-03-01T09:00:00Z"),
        ]);

        assert_eq!(ids(&tree), ["orphan", "root"]);
        assert_eq!(tree[0].depth, 0);
        assert!(tree[0].parent_id.is_none());
    }

    #[test]
    fn two_comment_cycle_terminates_with_both_once() {
        let tree = build_tree(vec![
            comment("a", Some("b"), "2026-03-01T10:00:00Z"),
            comment("b", Some("a"), "2026-03-01T10:01:00Z"),
        ]);

        assert_eq!(count_all(&tree), 2);
        assert_eq!(ids(&tree), ["a"]);
        assert_eq!(ids(&tree[0].replies), ["b"]);
        assert_depths(&tree, 0);
    }

    #[test]
    fn cycle_is_broken_at_a_member_not_at_a_descendant() {
        let tree = build_tree(vec![
            comment("tail", Some("a"), "2026-03-01T10:02:00Z"),
            comment("a", Some("b"), "2026-03-01T10:00:00Z"),
            comment("b", Some("a"), "2026-03-01T10:01:00Z"),
            comment("ok", None, "2026-03-01T09:00:00Z"),
        ]);

        assert_eq!(count_all(&tree), 4);
        assert_eq!(ids(&tree), ["ok", "a"]);
        assert_eq!(ids(&tree[1].replies), ["b", "tail"]);
        assert!(tree[1].parent_id.is_none());
        assert_eq!(tree[1].replies[0].parent_id.as_deref(), Some("a"));
    }

    #[test]
    fn self_parent_is_treated_as_root() {
        let tree = build_tree(vec![comment("loop", Some("loop"), "2026-03-01T10:00:00Z")]);

        assert_eq!(ids(&tree), ["loop"]);
        assert!(tree[0].replies.is_empty());
        assert!(tree[0].parent_id.is_none());
    }

    #[test]
    fn deep_reply_chain_builds() {
        const LEN: usize = 10_000;
        let chain: Vec<Comment> = (0..LEN)
            .rev()
            .map(|index| {
                let id = format!("c{index}");
                let parent = index.checked_sub(1).map(|parent| format!("c{parent}"));
                comment(&id, parent.as_deref(), "2026-03-01T10:00:00Z")
            })
            .collect();

        let tree = build_tree(chain);

        assert_eq!(count_all(&tree), LEN);
        assert_eq!(ids(&tree), ["c0"]);
        let leaf = find_comment(&tree, "c9999").expect("leaf present");
        assert_eq!(leaf.depth, LEN - 1);
        assert_eq!(leaf.parent_id.as_deref(), Some("c9998"));

        let next = insert_reply(&tree, "c9999", comment("tip", None, "2026-03-01T11:00:00Z"));
        assert_eq!(count_all(&next), LEN + 1);
        assert_eq!(find_comment(&next, "tip").map(|tip| tip.depth), Some(LEN));

        let cloned = next.clone();
        assert_eq!(count_all(&cloned), LEN + 1);
        let mut cursor = &cloned[0];
        while let Some(reply) = cursor.replies.first() {
            cursor = reply;
        }
        assert_eq!(cursor.id, "tip");
    }

    #[test]
    fn duplicate_ids_are_not_dropped() {
        let tree = build_tree(vec![
            comment("dup", None, "2026-03-01T10:00:00Z"),
            comment("dup", None, "2026-03-01T10:01:00Z"),
        ]);

        assert_eq!(count_all(&tree), 2);
    }

    #[test]
    fn insert_reply_appends_last_with_parent_depth() {
        let tree = build_tree(sample());
        let reply = comment("new", None, "2026-03-01T08:00:00Z");

        let next = insert_reply(&tree, "c3", reply);

        let parent = find_comment(&next, "c3").expect("parent present");
        assert_eq!(ids(&parent.replies), ["c4", "new"]);
        assert_eq!(parent.replies[1].depth, parent.depth + 1);
        assert_eq!(parent.replies[1].parent_id.as_deref(), Some("c3"));
        assert_eq!(count_all(&next), count_all(&tree) + 1);
        assert_eq!(find_comment(&tree, "c3").map(|c| c.replies.len()), Some(1));
    }

    #[test]
    fn insert_reply_to_missing_parent_is_noop() {
        let tree = build_tree(sample());

        let next = insert_reply(&tree, "nonexistent-id", comment("x", None, "2026-03-01T00:00:00Z"));

        assert_eq!(count_all(&next), count_all(&tree));
        assert_eq!(next, tree);
    }

    #[test]
    fn append_root_resets_depth_and_parent() {
        let tree = build_tree(sample());
        let mut fresh = comment("fresh", Some("c1"), "2026-03-02T00:00:00Z");
        fresh.depth = 3;

        let next = append_root(&tree, fresh);

        let last = next.last().expect("root appended");
        assert_eq!(last.id, "fresh");
        assert_eq!(last.depth, 0);
        assert!(last.parent_id.is_none());
    }

    #[test]
    fn edit_comment_reconstructs_target_only() {
        let tree = build_tree(sample());

        let next = edit_comment(&tree, "c4", "revised", "2026-03-02T00:00:00Z");

        let edited = find_comment(&next, "c4").expect("edited comment");
        assert_eq!(edited.content, "revised");
        assert!(edited.is_edited);
        assert_eq!(edited.updated_at.as_deref(), Some("2026-03-02T00:00:00Z"));
        assert_eq!(find_comment(&tree, "c4").map(|c| c.content.as_str()), Some("comment c4"));
        assert_eq!(edit_comment(&tree, "nope", "x", "y"), tree);
    }

    #[test]
    fn reconcile_id_repoints_direct_replies() {
        let tree = append_root(&[], comment("temp-1", None, "2026-03-01T10:00:00Z"));
        let tree = insert_reply(&tree, "temp-1", comment("r", None, "2026-03-01T10:01:00Z"));

        let next = reconcile_id(&tree, "temp-1", "c-900");

        assert!(find_comment(&next, "temp-1").is_none());
        let confirmed = find_comment(&next, "c-900").expect("confirmed id");
        assert_eq!(confirmed.replies[0].parent_id.as_deref(), Some("c-900"));
    }
}
