//! Visual harness for deterministic rendering snapshots.

use crate::app::state::{AppState, InputAction, InputState};
use crate::config::PageSizes;
use crate::domain::CollectionKind;
use crate::fixtures;
use crate::ui;
use anyhow::{Context, bail};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

const DEMO_POST_ID: &str = "post-1";

/// Renders the demo collections, post, and input screens into plain text.
pub fn render_demo_dump(width: u16, height: u16) -> anyhow::Result<String> {
    let collections = render_demo_collections(width, height)?;
    let post = render_demo_post(width, height, false)?;
    let input = render_demo_post(width, height, true)?;

    Ok(format!(
        "=== COLLECTIONS SCREEN ===\n{collections}\n\n=== POST SCREEN ===\n{post}\n\n=== REPLY INPUT ===\n{input}\n"
    ))
}

fn demo_state() -> AppState {
    let mut state = AppState::new(PageSizes::default(), None);
    state.set_snapshot("demo".to_owned(), fixtures::demo_snapshot());
    state
}

fn render_demo_collections(width: u16, height: u16) -> anyhow::Result<String> {
    let mut state = demo_state();
    state.collections.select_kind(CollectionKind::Library);
    state.collections.next_page();
    render_state_to_string(&state, width, height)
}

fn render_demo_post(width: u16, height: u16, with_input: bool) -> anyhow::Result<String> {
    let mut state = demo_state();
    if !state.open_post(DEMO_POST_ID) {
        bail!("missing demo post {DEMO_POST_ID}");
    }

    if with_input {
        let parent_id = state
            .post
            .as_ref()
            .and_then(|post| post.selected())
            .map(|row| row.comment_id.clone())
            .context("demo post has no comments")?;
        state.begin_input(InputState {
            title: "Reply to sora".to_owned(),
            prompt: "Reply".to_owned(),
            buffer: "The rumour line stuck with me too.".to_owned(),
            action: InputAction::Reply { parent_id },
        });
    }

    render_state_to_string(&state, width, height)
}

fn render_state_to_string(state: &AppState, width: u16, height: u16) -> anyhow::Result<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).context("failed to create test terminal")?;

    terminal
        .draw(|frame| ui::render(frame, state))
        .context("failed to render frame")?;

    let buffer = terminal.backend().buffer().clone();

    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buffer[(x, y)].symbol());
        }
        while out.ends_with(' ') {
            out.pop();
        }
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::render_demo_dump;

    #[test]
    fn demo_dump_contains_every_screen() {
        let dump = render_demo_dump(120, 36).expect("render should succeed");
        assert!(dump.contains("=== COLLECTIONS SCREEN ==="));
        assert!(dump.contains("=== POST SCREEN ==="));
        assert!(dump.contains("folio"));
        assert!(dump.contains("page 2/4"));
        assert!(dump.contains("Comments (6)"));
        assert!(dump.contains("The rumour line stuck with me too.|"));
    }
}
