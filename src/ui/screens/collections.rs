//! Tabbed list screen: search, filter tabs, one page of rows, and the navigator.

use crate::{
    app::state::{AppState, CollectionView},
    ui::{
        components::{
            pagination, search_box,
            shared::{short_age, short_preview},
        },
        theme,
    },
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Table, TableState},
};

const AGE_COL_WIDTH: u16 = 10;
const BADGE_COL_WIDTH: u16 = 11;
const COLUMN_SPACING: u16 = 1;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let view = state.collections.view();

    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(4),
        Constraint::Length(3),
    ])
    .split(area);
    let controls =
        Layout::horizontal([Constraint::Min(24), Constraint::Percentage(45)]).split(rows[0]);

    search_box::render(
        frame,
        controls[0],
        search_box::SearchBoxProps {
            title: "Search",
            key_hint: "[s]",
            query: state.collections.query(),
            focused: state.collections.is_search_focused(),
            placeholder: "search...",
            focused_right_hint: Some("[⏎/␛]"),
        },
    );
    render_filter_tabs(frame, controls[1], &view);
    render_rows(frame, rows[1], state, &view);
    render_navigator(frame, rows[2], &view);
}

fn render_filter_tabs(frame: &mut Frame<'_>, area: Rect, view: &CollectionView) {
    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(" Filter ", theme::title()),
            Span::styled("[f] ", theme::info()),
        ]))
        .borders(Borders::ALL)
        .border_style(theme::border());

    let mut spans = vec![Span::raw(" ")];
    for (index, label) in view.filter_labels.iter().enumerate() {
        let style = if index == view.active_filter {
            theme::selected()
        } else {
            theme::dim()
        };
        spans.push(Span::styled(format!(" {label} "), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_rows(frame: &mut Frame<'_>, area: Rect, state: &AppState, view: &CollectionView) {
    let counter = if view.matching == view.total {
        format!("({})", view.total)
    } else {
        format!("({}/{})", view.matching, view.total)
    };
    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(format!(" {} ", state.collections.active.title()), theme::title()),
            Span::styled(format!("{counter} "), theme::dim()),
        ]))
        .borders(Borders::ALL)
        .border_style(theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if view.rows.is_empty() {
        let message = if view.total == 0 {
            "Nothing here yet."
        } else {
            "No entries match this filter."
        };
        frame.render_widget(Paragraph::new(Line::styled(message, theme::dim())), inner);
        return;
    }

    let detail_width = usize::from(inner.width / 3).max(8);
    let widths = [
        Constraint::Length(AGE_COL_WIDTH),
        Constraint::Length(BADGE_COL_WIDTH),
        Constraint::Fill(2),
        Constraint::Fill(1),
    ];

    let table_rows: Vec<Row<'_>> = view
        .rows
        .iter()
        .map(|row| {
            Row::new([
                Cell::new(Span::styled(short_age(&row.timestamp), theme::dim())),
                Cell::new(Span::styled(row.badge.clone(), theme::badge())),
                Cell::new(Span::styled(row.title.clone(), theme::text())),
                Cell::new(Span::styled(
                    short_preview(&row.detail, detail_width),
                    theme::dim(),
                )),
            ])
        })
        .collect();

    let table = Table::new(table_rows, widths)
        .column_spacing(COLUMN_SPACING)
        .row_highlight_style(theme::selected())
        .highlight_symbol("▸ ")
        .highlight_spacing(HighlightSpacing::Always);

    let mut table_state = TableState::default();
    table_state.select(Some(state.collections.selected_row));

    frame.render_stateful_widget(table, inner, &mut table_state);
}

fn render_navigator(frame: &mut Frame<'_>, area: Rect, view: &CollectionView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border());

    frame.render_widget(
        Paragraph::new(pagination::line(
            &view.block,
            view.current_page,
            view.total_pages,
        ))
        .alignment(Alignment::Center)
        .block(block),
        area,
    );
}
