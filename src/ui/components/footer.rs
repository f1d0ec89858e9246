//! Footer bar listing the keys available in the current mode.

use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const SEPARATOR: &str = "  ";

/// One key binding shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub key: &'static str,
    pub desc: &'static str,
}

impl Hint {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self { key, desc }
    }

    fn width(self) -> usize {
        // "[key] desc"
        self.key.chars().count() + 3 + self.desc.chars().count()
    }
}

/// Returns the number of rows needed to show every hint at `screen_width`.
pub fn required_height(screen_width: u16, hints: &[Hint]) -> u16 {
    let width = usize::from(screen_width.max(1));
    wrap_hints(hints, width).len().max(1) as u16
}

pub fn render(frame: &mut Frame<'_>, area: Rect, hints: &[Hint]) {
    let width = usize::from(area.width.max(1));
    let rows = wrap_hints(hints, width);
    let text: Vec<Line<'static>> = if rows.is_empty() {
        vec![Line::from(" ")]
    } else {
        rows.iter().map(|row| styled_row(row)).collect()
    };

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn wrap_hints(hints: &[Hint], width: usize) -> Vec<Vec<Hint>> {
    let mut rows = Vec::new();
    let mut current = Vec::<Hint>::new();
    let mut current_width = 0usize;

    for hint in hints.iter().copied() {
        let separator = if current.is_empty() { 0 } else { SEPARATOR.len() };
        let projected = current_width + separator + hint.width();

        if projected <= width || current.is_empty() {
            current_width = projected.min(width);
            current.push(hint);
            continue;
        }

        rows.push(std::mem::take(&mut current));
        current_width = hint.width().min(width);
        current.push(hint);
    }

    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

fn styled_row(hints: &[Hint]) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    for (index, hint) in hints.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(SEPARATOR, theme::dim()));
        }
        spans.push(Span::styled(format!("[{}]", hint.key), theme::info()));
        spans.push(Span::styled(format!(" {}", hint.desc), theme::dim()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::{Hint, required_height, wrap_hints};

    const HINTS: [Hint; 3] = [
        Hint::new("j/k", "move"),
        Hint::new("enter", "open"),
        Hint::new("q", "quit"),
    ];

    #[test]
    fn hints_share_a_row_when_they_fit() {
        assert_eq!(required_height(80, &HINTS), 1);
    }

    #[test]
    fn narrow_screens_wrap_between_hints() {
        let rows = wrap_hints(&HINTS, 14);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![Hint::new("enter", "open")]);
    }

    #[test]
    fn empty_hint_list_still_takes_a_row() {
        assert_eq!(required_height(80, &[]), 1);
    }
}
