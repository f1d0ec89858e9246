//! Right-pane renderers for a post and its selected comment thread.

use crate::domain::{Comment, Post};
use crate::thread::policy::{is_own_comment, is_temp_id};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Renders the post body followed by the thread containing `selected_id`.
///
/// `reply_draft` is the unsent reply kept for the thread root, if any.
pub fn render_thread_preview(
    post: &Post,
    thread: Option<&Comment>,
    selected_id: Option<&str>,
    viewer_id: u64,
    reply_draft: Option<&str>,
) -> Vec<Line<'static>> {
    let mut out: Vec<Line<'static>> = Vec::new();

    append_post(&mut out, post);
    out.push(horizontal_rule());

    let Some(thread) = thread else {
        out.push(Line::from(vec![Span::styled(
            "No comments yet.  [c] write the first one",
            Style::default().fg(Color::DarkGray),
        )]));
        return out;
    };

    out.push(Line::from(vec![Span::styled(
        "Thread",
        Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD),
    )]));
    out.push(Line::default());

    let mut pending = vec![thread];
    while let Some(comment) = pending.pop() {
        render_thread_comment(&mut out, comment, selected_id, viewer_id);
        pending.extend(comment.replies.iter().rev());
    }

    out.push(horizontal_rule());
    out.push(Line::from(vec![Span::styled(
        "Draft Reply",
        Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD),
    )]));

    let reply = reply_draft.unwrap_or("").trim();
    if reply.is_empty() {
        out.push(Line::from(vec![Span::styled(
            "  (empty)  [r] reply",
            Style::default().fg(Color::DarkGray),
        )]));
    } else {
        out.extend(prefix_lines(body_lines(reply), "  "));
        out.push(Line::from(vec![Span::styled(
            "  [r] continue  [x] clear",
            Style::default().fg(Color::DarkGray),
        )]));
    }

    out
}

fn append_post(out: &mut Vec<Line<'static>>, post: &Post) {
    out.push(Line::from(vec![Span::styled(
        post.title.clone(),
        Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD),
    )]));
    out.push(Line::from(vec![Span::styled(
        format!(
            "{}  @{}  {}",
            post.community_name,
            post.author_nickname
                .clone()
                .unwrap_or_else(|| format!("user#{}", post.author_id)),
            short_date(&post.created_at)
        ),
        Style::default().fg(Color::DarkGray),
    )]));
    out.push(Line::default());
    out.extend(prefix_lines(body_lines(&post.content), "  "));
}

fn render_thread_comment(
    out: &mut Vec<Line<'static>>,
    comment: &Comment,
    selected_id: Option<&str>,
    viewer_id: u64,
) {
    let indent = "  ".repeat(comment.depth);
    let marker = if selected_id == Some(comment.id.as_str()) {
        "▌"
    } else {
        " "
    };

    let mut header = vec![
        Span::styled(marker.to_owned(), Style::default().fg(Color::LightYellow)),
        Span::styled(
            format!("{indent}@{}", comment.author_label()),
            Style::default().fg(Color::LightBlue),
        ),
        Span::raw("  "),
        Span::styled(
            short_date(comment.updated_at.as_deref().unwrap_or(&comment.created_at)),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if comment.is_edited {
        header.push(Span::styled(
            "  (edited)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    if is_own_comment(comment, viewer_id) {
        header.push(Span::styled("  [you]", Style::default().fg(Color::LightGreen)));
    }
    if is_temp_id(&comment.id) {
        header.push(Span::styled("  [sending]", Style::default().fg(Color::Yellow)));
    }
    out.push(Line::from(header));

    out.extend(prefix_lines(body_lines(&comment.content), &format!(" {indent}  ")));
    out.push(Line::default());
}

fn body_lines(text: &str) -> Vec<Line<'static>> {
    text.lines()
        .map(|line| Line::from(Span::raw(line.to_owned())))
        .collect()
}

fn prefix_lines(lines: Vec<Line<'static>>, prefix: &str) -> Vec<Line<'static>> {
    lines
        .into_iter()
        .map(|line| {
            let mut spans = Vec::with_capacity(line.spans.len() + 1);
            spans.push(Span::styled(
                prefix.to_owned(),
                Style::default().fg(Color::DarkGray),
            ));
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect()
}

fn short_date(value: &str) -> String {
    if value.len() >= 16 && value.is_char_boundary(16) {
        return value[..16].replace('T', " ");
    }
    value.to_owned()
}

fn horizontal_rule() -> Line<'static> {
    Line::from(vec![Span::styled(
        "────────────────────────────────────────────────────────────────────────────",
        Style::default().fg(Color::DarkGray),
    )])
}

#[cfg(test)]
mod tests {
    use super::{render_thread_preview, short_date};
    use crate::domain::Comment;
    use crate::fixtures;
    use crate::thread::build_tree;
    use ratatui::text::Line;

    fn plain(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn preview_marks_own_and_selected_comments() {
        let snapshot = fixtures::demo_snapshot();
        let post = &snapshot.posts[0];
        let tree = build_tree(post.comments.clone());
        let thread = tree.iter().find(|root| root.id == "c-101");

        let text = plain(&render_thread_preview(
            post,
            thread,
            Some("c-106"),
            snapshot.viewer.id,
            Some("half written"),
        ));

        assert!(text.contains("▌  @mina"));
        assert!(text.contains("[you]"));
        assert!(text.contains("half written"));
        assert!(!text.contains("(empty)"));
    }

    #[test]
    fn post_without_comments_invites_first_comment() {
        let snapshot = fixtures::demo_snapshot();
        let text = plain(&render_thread_preview(
            &snapshot.posts[1],
            None,
            None,
            snapshot.viewer.id,
            None,
        ));
        assert!(text.contains("No comments yet."));
    }

    #[test]
    fn long_thread_renders_every_reply_in_order() {
        let snapshot = fixtures::demo_snapshot();
        let chain: Vec<Comment> = (0..2_000)
            .map(|index| {
                let comment =
                    Comment::new(format!("c{index}"), 2, format!("body {index}"), "2026-03-01T10:00:00Z");
                match index {
                    0 => comment,
                    _ => comment.with_parent(format!("c{}", index - 1)),
                }
            })
            .collect();
        let tree = build_tree(chain);

        let text = plain(&render_thread_preview(
            &snapshot.posts[1],
            tree.first(),
            Some("c1999"),
            snapshot.viewer.id,
            None,
        ));

        let first = text.find("body 0").expect("root body");
        let last = text.find("body 1999").expect("leaf body");
        assert!(first < last);
        assert_eq!(text.matches("▌").count(), 1);
    }

    #[test]
    fn dates_are_shortened_to_minutes() {
        assert_eq!(short_date("2026-03-01T10:20:00Z"), "2026-03-01 10:20");
        assert_eq!(short_date("soon"), "soon");
    }
}
