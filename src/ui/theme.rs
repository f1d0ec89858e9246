//! Shared styles for the TUI.

use ratatui::style::{Color, Modifier, Style};
use std::sync::{OnceLock, PoisonError, RwLock};

/// Runtime theme palette used by the renderer.
#[derive(Debug, Clone)]
pub struct ThemePalette {
    pub border: Color,
    pub title: Color,
    pub dim: Color,
    pub text: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub error: Color,
    pub info: Color,
    pub author: Color,
    pub own_comment: Color,
    pub unsent_comment: Color,
    pub badge: Color,
    pub page_current: Color,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self {
            border: Color::Rgb(95, 143, 122),
            title: Color::Rgb(159, 211, 184),
            dim: Color::DarkGray,
            text: Color::Rgb(210, 210, 200),
            selected_fg: Color::Black,
            selected_bg: Color::Rgb(159, 211, 184),
            error: Color::Red,
            info: Color::Cyan,
            author: Color::LightBlue,
            own_comment: Color::LightGreen,
            unsent_comment: Color::Yellow,
            badge: Color::Rgb(231, 178, 88),
            page_current: Color::Rgb(245, 205, 82),
        }
    }
}

static ACTIVE_THEME: OnceLock<RwLock<ThemePalette>> = OnceLock::new();

fn store() -> &'static RwLock<ThemePalette> {
    ACTIVE_THEME.get_or_init(|| RwLock::new(ThemePalette::default()))
}

fn with_palette<T>(f: impl FnOnce(&ThemePalette) -> T) -> T {
    let guard = store().read().unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

/// Installs the active runtime theme palette.
pub fn apply(palette: ThemePalette) {
    if let Ok(mut guard) = store().write() {
        *guard = palette;
    }
}

pub fn border() -> Style {
    with_palette(|theme| Style::default().fg(theme.border))
}

pub fn title() -> Style {
    with_palette(|theme| {
        Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD)
    })
}

pub fn dim() -> Style {
    with_palette(|theme| Style::default().fg(theme.dim))
}

pub fn text() -> Style {
    with_palette(|theme| Style::default().fg(theme.text))
}

pub fn selected() -> Style {
    with_palette(|theme| Style::default().fg(theme.selected_fg).bg(theme.selected_bg))
}

pub fn error() -> Style {
    with_palette(|theme| Style::default().fg(theme.error))
}

pub fn info() -> Style {
    with_palette(|theme| Style::default().fg(theme.info))
}

pub fn author() -> Style {
    with_palette(|theme| Style::default().fg(theme.author))
}

pub fn own_comment() -> Style {
    with_palette(|theme| {
        Style::default()
            .fg(theme.own_comment)
            .add_modifier(Modifier::BOLD)
    })
}

pub fn unsent_comment() -> Style {
    with_palette(|theme| {
        Style::default()
            .fg(theme.unsent_comment)
            .add_modifier(Modifier::ITALIC)
    })
}

pub fn badge() -> Style {
    with_palette(|theme| Style::default().fg(theme.badge))
}

pub fn page_current() -> Style {
    with_palette(|theme| {
        Style::default()
            .fg(theme.page_current)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    })
}
