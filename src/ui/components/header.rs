//! Header component shared by the collections and post screens.

use crate::ui::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Header payload consumed by the renderer.
#[derive(Debug, Clone)]
pub struct HeaderModel {
    pub app_label: String,
    pub context_label: String,
    pub viewer_label: Option<String>,
    pub tabs: Option<HeaderTabs>,
    pub operation: Option<String>,
    pub error: Option<String>,
    pub status: Option<String>,
}

/// List tabs displayed on the collections route.
#[derive(Debug, Clone)]
pub struct HeaderTabs {
    pub labels: Vec<&'static str>,
    pub selected: usize,
}

/// Renders the header with title, tabs, and operation or error state.
pub fn render(frame: &mut Frame<'_>, area: Rect, model: &HeaderModel) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut left_spans = vec![
        Span::styled(format!(" {}", model.app_label), theme::title()),
        Span::styled(format!(" {}", model.context_label), theme::dim()),
    ];
    if let Some(tabs) = &model.tabs {
        left_spans.extend(tab_spans(tabs));
    }
    if let Some(error) = &model.error {
        left_spans.push(Span::styled(format!("  error: {error}"), theme::error()));
    } else if let Some(operation) = &model.operation {
        left_spans.push(Span::styled(format!("  {operation}"), theme::info()));
    } else if let Some(status) = &model.status {
        left_spans.push(Span::styled(format!("  {status}"), theme::info()));
    }

    let Some(viewer) = &model.viewer_label else {
        frame.render_widget(Paragraph::new(Line::from(left_spans)), inner);
        return;
    };

    let right_width = (viewer.chars().count() as u16 + 4).min(inner.width / 3);
    let columns =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(right_width)]).split(inner);
    frame.render_widget(Paragraph::new(Line::from(left_spans)), columns[0]);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("@", theme::dim()),
            Span::styled(format!("{viewer} "), theme::author()),
        ]))
        .alignment(Alignment::Right),
        columns[1],
    );
}

fn tab_spans(tabs: &HeaderTabs) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw("  ")];
    for (index, label) in tabs.labels.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("|", theme::dim()));
        }
        let style = if index == tabs.selected {
            theme::selected()
        } else {
            theme::dim()
        };
        spans.push(Span::styled(format!(" {label} "), style));
    }
    spans
}
