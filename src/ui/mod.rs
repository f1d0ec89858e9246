//! Top-level UI composition.

use crate::{
    app::state::AppState,
    domain::{CollectionKind, Route},
    ui::components::{
        footer,
        header::{self, HeaderModel, HeaderTabs},
    },
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

pub mod components;
mod hints;
pub mod screens;
pub mod theme;

/// Draws the active screen.
pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let hints = hints::build(state);

    let root = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(footer::required_height(frame.area().width, &hints)),
    ])
    .split(frame.area());

    let post = state
        .post
        .as_ref()
        .filter(|_| state.route == Route::Post);

    let context_label = match post {
        Some(post) => format!("{} / {}", state.source_label, post.post.community_name),
        None => state.source_label.clone(),
    };
    let tabs = (state.route == Route::Collections).then(|| HeaderTabs {
        labels: CollectionKind::ALL.iter().map(|kind| kind.title()).collect(),
        selected: state.collections.active.index(),
    });

    header::render(
        frame,
        root[0],
        &HeaderModel {
            app_label: "📚 folio".to_owned(),
            context_label,
            viewer_label: state.viewer_label(),
            tabs,
            operation: state.operation_display(),
            error: state.error_message.clone(),
            status: state.status_message.clone(),
        },
    );

    match post {
        Some(post) => screens::post::render(frame, root[1], post, state.input.as_ref()),
        None => screens::collections::render(frame, root[1], state),
    }

    footer::render(frame, root[2], &hints);
}
