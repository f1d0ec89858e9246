//! External editor integration for composing comments and replies.

use anyhow::{Context, Result, anyhow, bail};
use crossterm::cursor::MoveTo;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::{ErrorKind, Stdout, stdout};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const SCRATCH_MARKER: &str = "#";
const FALLBACK_EDITORS: [&str; 3] = ["nvim", "vim", "vi"];

/// Opens an external editor on `initial_text` and returns the composed body
/// with scratch lines removed.
///
/// `context` is appended as `#`-prefixed lines that the user sees while
/// editing but that never reach the comment. Returns `None` when the result
/// is blank.
///
/// Editor priority:
/// 1) `$VISUAL`
/// 2) `$EDITOR`
/// 3) `nvim`
/// 4) `vim`
/// 5) `vi`
pub fn compose_with_system_editor(
    initial_text: &str,
    context: &str,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result<Option<String>> {
    let path = temp_file_path();
    fs::write(&path, scratch_contents(initial_text, context))
        .with_context(|| format!("failed to write {}", path.display()))?;

    suspend_tui()?;

    let edit_result = run_editor(&path);

    let resume_result = resume_tui(terminal);

    let output = match edit_result {
        Ok(()) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let body = strip_scratch_lines(&text);
            Ok((!body.is_empty()).then_some(body))
        }
        Err(err) => Err(err),
    };

    if let Err(err) = fs::remove_file(&path) {
        log::warn!("failed to remove editor scratch file {}: {err}", path.display());
    }

    if let Err(err) = resume_result {
        return Err(err.context("failed to restore TUI after editor"));
    }

    output
}

fn scratch_contents(initial_text: &str, context: &str) -> String {
    let mut out = initial_text.trim_end().to_owned();
    out.push_str("\n\n");
    for line in context.lines() {
        out.push_str(&format!("{SCRATCH_MARKER} {line}\n"));
    }
    out.push_str(&format!(
        "{SCRATCH_MARKER} Lines starting with '{SCRATCH_MARKER}' are ignored.\n"
    ));
    out
}

fn strip_scratch_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with(SCRATCH_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_owned()
}

/// Opens a file path in the user's preferred editor.
pub fn edit_file_with_system_editor(path: &Path) -> Result<()> {
    run_editor(path)
}

/// One way of launching an editor: a program plus any flags that came with
/// it in `$VISUAL`/`$EDITOR` (for example `code --wait`).
#[derive(Debug, Clone, PartialEq, Eq)]
struct EditorCommand {
    program: String,
    args: Vec<String>,
}

impl EditorCommand {
    fn parse(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_owned);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    fn label(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Editors to try, in order. Blank variables are skipped.
fn editor_candidates(visual: Option<OsString>, editor: Option<OsString>) -> Vec<EditorCommand> {
    [visual, editor]
        .into_iter()
        .flatten()
        .filter_map(|value| EditorCommand::parse(&value.to_string_lossy()))
        .chain(
            FALLBACK_EDITORS
                .iter()
                .filter_map(|program| EditorCommand::parse(program)),
        )
        .collect()
}

fn run_editor(path: &Path) -> Result<()> {
    for candidate in editor_candidates(env::var_os("VISUAL"), env::var_os("EDITOR")) {
        let label = candidate.label();
        log::debug!("launching editor `{label}` on {}", path.display());

        match Command::new(&candidate.program)
            .args(&candidate.args)
            .arg(path)
            .status()
        {
            Ok(status) if status.success() => return Ok(()),
            Ok(status) => {
                let code = status
                    .code()
                    .map_or_else(|| "a signal".to_owned(), |code| code.to_string());
                bail!("editor `{label}` exited with {code}");
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("editor `{label}` is not installed");
            }
            Err(err) => return Err(anyhow!("failed to launch editor `{label}`: {err}")),
        }
    }

    bail!("no editor found (tried $VISUAL, $EDITOR, {})", FALLBACK_EDITORS.join(", "))
}

fn temp_file_path() -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or(0);

    env::temp_dir().join(format!("folio-comment-{}-{}.txt", std::process::id(), millis))
}

fn suspend_tui() -> Result<()> {
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)
        .context("failed to release terminal for external editor")?;
    disable_raw_mode().context("failed to disable raw mode")?;
    Ok(())
}

fn resume_tui(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    execute!(
        stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        Clear(ClearType::All),
        MoveTo(0, 0)
    )
    .context("failed to restore terminal view")?;
    enable_raw_mode().context("failed to enable raw mode")?;
    terminal
        .clear()
        .context("failed to clear terminal buffer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{EditorCommand, editor_candidates, scratch_contents, strip_scratch_lines};
    use std::ffi::OsString;

    #[test]
    fn scratch_lines_are_stripped_from_the_body() {
        let contents = scratch_contents("First line\nSecond line\n", "Reply to sora");
        assert!(contents.contains("# Reply to sora"));
        assert_eq!(strip_scratch_lines(&contents), "First line\nSecond line");
    }

    #[test]
    fn blank_body_strips_to_empty() {
        assert_eq!(strip_scratch_lines(&scratch_contents("", "New comment")), "");
    }

    #[test]
    fn editor_variables_come_before_fallbacks() {
        let candidates = editor_candidates(
            Some(OsString::from("code --wait")),
            Some(OsString::from("   ")),
        );
        let labels: Vec<String> = candidates.iter().map(EditorCommand::label).collect();

        assert_eq!(labels, ["code --wait", "nvim", "vim", "vi"]);
        assert_eq!(candidates[0].args, ["--wait"]);
    }

    #[test]
    fn unset_variables_fall_back_to_vi_family() {
        let candidates = editor_candidates(None, None);
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[2].program, "vi");
    }
}
