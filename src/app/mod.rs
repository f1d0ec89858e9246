//! Application runtime, event loop, and keyboard handling.

pub mod drafts;
pub mod editor;
pub mod events;
pub mod state;

use crate::app::drafts::DraftStore;
use crate::app::events::{DataMode, WorkerMessage, spawn_confirm_comment, spawn_load_snapshot};
use crate::app::state::{AppState, InputAction, InputState};
use crate::config::{self, PageSizes};
use crate::domain::Route;
use crate::ui;
use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{Stdout, stdout};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Runtime configuration provided by CLI flags and the config file.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data: Option<PathBuf>,
    pub page_sizes: PageSizes,
    pub viewer_id: Option<u64>,
}

/// Everything key handlers need besides the state itself.
struct Runtime {
    mode: DataMode,
    tx: UnboundedSender<WorkerMessage>,
    drafts: Option<DraftStore>,
}

/// Runs the interactive TUI application.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<WorkerMessage>();

    let mode = match config.data {
        Some(path) => DataMode::Snapshot { path },
        None => DataMode::Demo,
    };
    log::info!("starting with data source {}", mode.label());

    let drafts = match config::app_dir().and_then(|dir| Ok(DraftStore::open(&dir)?)) {
        Ok(store) => Some(store),
        Err(error) => {
            log::warn!("drafts disabled: {error:#}");
            None
        }
    };

    let mut state = AppState::new(config.page_sizes, config.viewer_id);
    state.begin_operation("Loading snapshot");
    spawn_load_snapshot(tx.clone(), mode.clone());

    let runtime = Runtime { mode, tx, drafts };
    let mut terminal = setup_terminal()?;

    let result = run_event_loop(&mut terminal, &mut state, &runtime, &mut rx).await;

    restore_terminal(&mut terminal)?;
    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
    runtime: &Runtime,
    rx: &mut UnboundedReceiver<WorkerMessage>,
) -> anyhow::Result<()> {
    let mut saved_signature: Option<String> = None;

    loop {
        state.advance_spinner();

        while let Ok(message) = rx.try_recv() {
            process_worker_message(state, message);
        }

        if state.editor_requested {
            state.editor_requested = false;
            compose_in_editor(terminal, state);
        }

        persist_drafts(state, runtime, &mut saved_signature);

        terminal.draw(|frame| ui::render(frame, state))?;

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(60))?
            && let Event::Key(key_event) = event::read()?
            && key_event.kind == KeyEventKind::Press
        {
            handle_key_event(state, runtime, key_event);
        }
    }

    Ok(())
}

fn process_worker_message(state: &mut AppState, message: WorkerMessage) {
    match message {
        WorkerMessage::SnapshotLoaded {
            source_label,
            result,
        } => {
            state.end_operation();

            match result {
                Ok(snapshot) => {
                    state.error_message = None;
                    state.set_snapshot(source_label, snapshot);
                }
                Err(error) => {
                    state.source_label = source_label;
                    state.error_message = Some(error);
                }
            }
        }
        WorkerMessage::CommentConfirmed {
            post_id,
            temp_id,
            server_id,
        } => {
            let Some(post) = state.post.as_mut() else {
                return;
            };
            if post.post.id != post_id || !post.confirm_comment(&temp_id, &server_id) {
                return;
            }
            if let Some(input) = state.input.as_mut() {
                input.action.retarget(&temp_id, &server_id);
            }
            state.status_message = Some(format!("comment {server_id} saved"));
        }
    }
}

fn compose_in_editor(terminal: &mut Terminal<CrosstermBackend<Stdout>>, state: &mut AppState) {
    let Some((buffer, title)) = state
        .input
        .as_ref()
        .map(|input| (input.buffer.clone(), input.title.clone()))
    else {
        return;
    };

    match editor::compose_with_system_editor(&buffer, &title, terminal) {
        Ok(body) => {
            if let Some(input) = state.input.as_mut() {
                input.buffer = body.unwrap_or_default();
            }
        }
        Err(error) => {
            log::error!("external editor failed: {error:#}");
            state.error_message = Some(format!("{error:#}"));
        }
    }
}

fn persist_drafts(state: &AppState, runtime: &Runtime, saved_signature: &mut Option<String>) {
    let (Some(store), Some(post)) = (runtime.drafts.as_ref(), state.post.as_ref()) else {
        return;
    };

    let signature = DraftStore::draft_signature(post);
    if saved_signature.as_deref() == Some(signature.as_str()) {
        return;
    }

    if let Err(error) = store.save(post) {
        log::warn!("{error}");
    }
    *saved_signature = Some(signature);
}

fn handle_key_event(state: &mut AppState, runtime: &Runtime, key: KeyEvent) {
    if state.input.is_some() {
        handle_input_key_event(state, runtime, key);
        return;
    }

    state.status_message = None;
    match state.route {
        Route::Collections => handle_collections_key_event(state, runtime, key),
        Route::Post => handle_post_key_event(state, runtime, key),
    }
}

fn handle_input_key_event(state: &mut AppState, runtime: &Runtime, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => state.cancel_input(),
        KeyCode::Backspace => {
            if let Some(input) = state.input.as_mut() {
                input.backspace();
            }
        }
        KeyCode::Char('e') if ctrl => state.editor_requested = true,
        KeyCode::Char('n') if ctrl => {
            if let Some(input) = state.input.as_mut() {
                input.newline();
            }
        }
        KeyCode::Enter => submit_input(state, runtime),
        KeyCode::Char(ch) => {
            if !ch.is_control()
                && let Some(input) = state.input.as_mut()
            {
                input.push_char(ch);
            }
        }
        _ => {}
    }
}

fn submit_input(state: &mut AppState, runtime: &Runtime) {
    let Some(input) = state.input.take() else {
        return;
    };
    let Some(post) = state.post.as_mut() else {
        return;
    };

    let body = input.trimmed();
    let now = now_timestamp();
    let result = match &input.action {
        InputAction::Comment => post.add_comment(&body, &now).map(Some),
        InputAction::Reply { parent_id } => post.add_reply(parent_id, &body, &now).map(Some),
        InputAction::Edit { comment_id } => post.edit(comment_id, &body, &now).map(|()| None),
    };

    match result {
        Ok(temp_id) => {
            post.clear_draft(&input.action.draft_key());
            let post_id = post.post.id.clone();
            state.error_message = None;
            match temp_id {
                Some(temp_id) => {
                    state.status_message = Some("sending comment".to_owned());
                    spawn_confirm_comment(runtime.tx.clone(), post_id, temp_id);
                }
                None => state.status_message = Some("comment updated".to_owned()),
            }
        }
        Err(error) => {
            state.error_message = Some(error.to_string());
            state.input = Some(input);
        }
    }
}

fn handle_collections_key_event(state: &mut AppState, runtime: &Runtime, key: KeyEvent) {
    if state.collections.is_search_focused() {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => state.collections.unfocus_search(),
            KeyCode::Backspace => state.collections.search_backspace(),
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    state.collections.search_push_char(ch);
                }
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
        }
        KeyCode::Tab | KeyCode::Char('l') => state.collections.next_kind(),
        KeyCode::BackTab | KeyCode::Char('h') => state.collections.previous_kind(),
        KeyCode::Down | KeyCode::Char('j') => state.collections.move_down(),
        KeyCode::Up | KeyCode::Char('k') => state.collections.move_up(),
        KeyCode::Char('f') => state.collections.cycle_filter(),
        KeyCode::Right | KeyCode::Char('n') => state.collections.next_page(),
        KeyCode::Left | KeyCode::Char('p') => state.collections.previous_page(),
        KeyCode::Char(']') => state.collections.next_block(),
        KeyCode::Char('[') => state.collections.previous_block(),
        KeyCode::Char('g') => state.collections.first_page(),
        KeyCode::Char('G') => state.collections.last_page(),
        KeyCode::Char('/') | KeyCode::Char('s') => state.collections.focus_search(),
        KeyCode::Enter => open_selected_activity(state, runtime),
        KeyCode::Char('R') => reload(state, runtime),
        _ => {}
    }
}

fn open_selected_activity(state: &mut AppState, runtime: &Runtime) {
    let Some(activity) = state.collections.selected_activity() else {
        return;
    };

    if !state.open_post(&activity.post_id) {
        state.error_message = Some(format!("post {} is not in this snapshot", activity.post_id));
        return;
    }
    state.error_message = None;

    if let (Some(store), Some(post)) = (runtime.drafts.as_ref(), state.post.as_mut()) {
        match store.load_into(post) {
            Ok(0) => {}
            Ok(count) => state.status_message = Some(format!("restored {count} draft(s)")),
            Err(error) => log::warn!("{error}"),
        }
    }
}

fn handle_post_key_event(state: &mut AppState, runtime: &Runtime, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            state.should_quit = true;
        }
        KeyCode::Char('b') | KeyCode::Esc => state.back_to_collections(),
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(post) = state.post.as_mut() {
                post.move_down();
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(post) = state.post.as_mut() {
                post.move_up();
            }
        }
        KeyCode::PageDown => {
            if let Some(post) = state.post.as_mut() {
                for _ in 0..8 {
                    post.scroll_preview_down();
                }
            }
        }
        KeyCode::PageUp => {
            if let Some(post) = state.post.as_mut() {
                for _ in 0..8 {
                    post.scroll_preview_up();
                }
            }
        }
        KeyCode::Char('o') | KeyCode::Char('z') => {
            if let Some(post) = state.post.as_mut() {
                post.toggle_selected_thread_collapsed();
            }
        }
        KeyCode::Char('c') => open_comment_input(state, InputAction::Comment),
        KeyCode::Char('r') => {
            let Some(row) = state.post.as_ref().and_then(|post| post.selected()) else {
                return;
            };
            if !row.can_reply {
                state.error_message = Some("only top-level comments accept replies".to_owned());
                return;
            }
            let parent_id = row.comment_id.clone();
            open_comment_input(state, InputAction::Reply { parent_id });
        }
        KeyCode::Char('e') => {
            let Some(row) = state.post.as_ref().and_then(|post| post.selected()) else {
                return;
            };
            if !row.is_own {
                state.error_message = Some("only your own comments can be edited".to_owned());
                return;
            }
            let comment_id = row.comment_id.clone();
            open_comment_input(state, InputAction::Edit { comment_id });
        }
        KeyCode::Char('x') => {
            let Some(post) = state.post.as_mut() else {
                return;
            };
            let Some(row) = post.selected() else {
                return;
            };
            let key = InputAction::Reply {
                parent_id: row.comment_id.clone(),
            }
            .draft_key();
            post.clear_draft(&key);
        }
        KeyCode::Char('R') => reload(state, runtime),
        _ => {}
    }
}

fn open_comment_input(state: &mut AppState, action: InputAction) {
    let Some(post) = state.post.as_ref() else {
        return;
    };

    let draft = post.draft(&action.draft_key()).map(str::to_owned);
    let (title, prompt, original) = match &action {
        InputAction::Comment => (
            format!("Comment on \"{}\"", post.post.title),
            "New comment",
            None,
        ),
        InputAction::Reply { parent_id } => {
            let author = post
                .selected_comment()
                .filter(|comment| comment.id == *parent_id)
                .map(|comment| comment.author_label())
                .unwrap_or_else(|| parent_id.clone());
            (format!("Reply to {author}"), "Reply", None)
        }
        InputAction::Edit { .. } => (
            "Edit comment".to_owned(),
            "Updated text",
            post.selected_comment().map(|comment| comment.content.clone()),
        ),
    };

    state.begin_input(InputState {
        title,
        prompt: prompt.to_owned(),
        buffer: draft.or(original).unwrap_or_default(),
        action,
    });
}

fn reload(state: &mut AppState, runtime: &Runtime) {
    if state.is_busy() {
        return;
    }

    state.error_message = None;
    state.begin_operation(format!("Reloading {}", runtime.mode.label()));
    spawn_load_snapshot(runtime.tx.clone(), runtime.mode.clone());
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;

    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(out);
    let terminal = Terminal::new(backend).context("failed to create ratatui terminal")?;

    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("failed to leave alternate screen")?;

    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}
