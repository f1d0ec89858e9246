use crate::ui::theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct SearchBoxProps<'a> {
    pub title: &'a str,
    pub key_hint: &'a str,
    pub query: &'a str,
    pub focused: bool,
    pub placeholder: &'a str,
    /// Shown on the right edge while focused, e.g. `[⏎/␛]`.
    pub focused_right_hint: Option<&'a str>,
}

pub fn render(frame: &mut Frame<'_>, area: Rect, props: SearchBoxProps<'_>) {
    let title = if props.focused {
        Line::from(Span::styled(format!(" {} ", props.title), theme::info()))
    } else {
        Line::from(vec![
            Span::styled(format!(" {} ", props.title), theme::title()),
            Span::styled(format!("{} ", props.key_hint), theme::info()),
        ])
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if props.focused {
            theme::info()
        } else {
            theme::border()
        });

    let (mut left_text, left_style) = if props.query.is_empty() {
        let value = if props.focused { "" } else { props.placeholder };
        (format!("  {value}"), theme::dim())
    } else {
        (format!("  {}", props.query), theme::text())
    };
    if props.focused {
        left_text.push('|');
    }

    let right_hint = props.focused_right_hint.filter(|_| props.focused);
    let line = line_with_right_hint(left_text, left_style, right_hint, usize::from(area.width));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn line_with_right_hint(
    left_text: String,
    left_style: Style,
    right_hint: Option<&str>,
    total_width: usize,
) -> Line<'static> {
    let Some(hint) = right_hint else {
        return Line::from(Span::styled(left_text, left_style));
    };

    let hint_text = format!(" {hint}");
    let inner_width = total_width.saturating_sub(2);
    let used = left_text.chars().count() + hint_text.chars().count();
    let gap = inner_width.saturating_sub(used);

    Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(gap)),
        Span::styled(hint_text, theme::info()),
    ])
}
