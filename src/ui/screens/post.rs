//! Post split-pane screen renderer with the comment input popup.

use crate::app::state::{InputAction, InputState, PostScreenState};
use crate::render::thread::render_thread_preview;
use crate::ui::components::shared::short_preview;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

const POPUP_WIDTH_PERCENT: u16 = 70;
const POPUP_HEIGHT: u16 = 12;

pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    post: &PostScreenState,
    input: Option<&InputState>,
) {
    let panes =
        Layout::horizontal([Constraint::Percentage(47), Constraint::Percentage(53)]).split(area);

    render_comment_list(frame, panes[0], post);
    render_preview(frame, panes[1], post);

    if let Some(input) = input {
        render_input_popup(frame, area, input);
    }
}

fn render_comment_list(frame: &mut Frame<'_>, area: Rect, post: &PostScreenState) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Comments ({}) ", post.comment_count()),
            theme::title(),
        ))
        .borders(Borders::ALL)
        .border_style(theme::border());

    let preview_width = usize::from(area.width.saturating_sub(20)).max(12);
    let items: Vec<ListItem<'static>> = if post.rows.is_empty() {
        vec![ListItem::new(Line::from(vec![Span::styled(
            "No comments yet.",
            theme::dim(),
        )]))]
    } else {
        post.rows
            .iter()
            .map(|row| {
                let indent = "  ".repeat(row.depth);
                let icon = if row.depth > 0 {
                    "↳"
                } else if row.is_collapsed {
                    "▸"
                } else if row.reply_count > 0 {
                    "▾"
                } else {
                    "•"
                };
                let author_style = if row.is_own {
                    theme::own_comment()
                } else {
                    theme::author()
                };

                let mut spans = vec![
                    Span::styled(format!("{indent}{icon} @{} ", row.author), author_style),
                    Span::styled(
                        short_preview(&row.content, preview_width),
                        if row.depth > 0 {
                            theme::dim()
                        } else {
                            theme::text()
                        },
                    ),
                ];
                if row.is_collapsed {
                    spans.push(Span::styled(
                        format!("  (+{})", row.reply_count),
                        theme::badge(),
                    ));
                }
                if row.is_edited {
                    spans.push(Span::styled("  (edited)", theme::dim()));
                }
                if row.is_unsent {
                    spans.push(Span::styled("  sending", theme::unsent_comment()));
                }
                let reply_key = InputAction::Reply {
                    parent_id: row.comment_id.clone(),
                }
                .draft_key();
                if post.draft(&reply_key).is_some() {
                    spans.push(Span::styled("  [draft]", theme::info()));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::selected())
        .highlight_symbol("▌ ");

    let mut list_state = ListState::default();
    if !post.rows.is_empty() {
        list_state.select(Some(post.selected_row));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_preview(frame: &mut Frame<'_>, area: Rect, post: &PostScreenState) {
    let block = Block::default()
        .title(Span::styled(" Post ", theme::title()))
        .borders(Borders::ALL)
        .border_style(theme::border());

    let thread = post.selected_thread();
    let reply_draft = thread.and_then(|root| {
        post.draft(
            &InputAction::Reply {
                parent_id: root.id.clone(),
            }
            .draft_key(),
        )
    });
    let lines = render_thread_preview(
        &post.post,
        thread,
        post.selected().map(|row| row.comment_id.as_str()),
        post.viewer().id,
        reply_draft,
    );

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((post.right_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_input_popup(frame: &mut Frame<'_>, area: Rect, input: &InputState) {
    let popup = centered_rect(area, POPUP_WIDTH_PERCENT, POPUP_HEIGHT);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(format!(" {} ", input.title), theme::title()),
            Span::styled(format!("{} ", input.prompt), theme::dim()),
        ]))
        .borders(Borders::ALL)
        .border_style(theme::info());

    let mut lines: Vec<Line<'static>> = input
        .buffer
        .split('\n')
        .map(|line| Line::from(Span::styled(line.to_owned(), theme::text())))
        .collect();
    if let Some(last) = lines.last_mut() {
        last.spans.push(Span::styled("|", theme::info()));
    }

    // Keep the cursor line visible once the body outgrows the popup.
    let visible = usize::from(popup.height.saturating_sub(2));
    let scroll = lines.len().saturating_sub(visible) as u16;

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        popup,
    );
}

fn centered_rect(area: Rect, width_percent: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
