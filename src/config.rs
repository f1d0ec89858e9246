//! User configuration loading from `~/.folio/config.toml`.

use crate::ui::theme::ThemePalette;
use anyhow::{Context, Result, anyhow, bail};
use ratatui::style::Color;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".folio";
const CONFIG_FILE: &str = "config.toml";

const DEFAULT_CONFIG_TOML: &str = r##"# folio configuration
# Colors accept `#RRGGBB` or named ANSI colors (e.g. "yellow", "dark_gray").

[theme]
border = "#5f8f7a"
title = "#9fd3b8"
dim = "dark_gray"
text = "#d2d2c8"
selected_fg = "black"
selected_bg = "#9fd3b8"
error = "red"
info = "cyan"
author = "light_blue"
own_comment = "light_green"
unsent_comment = "yellow"
badge = "#e7b258"
page_current = "#f5cd52"

# Items per page for each list.
[paging]
applied = 8
recruiting = 8
library = 8
wishlist = 8
activities = 10

# Uncomment to act as a different reader than the one in the loaded data.
[viewer]
# id = 1
"##;

/// Application configuration loaded from disk.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub theme: ThemePalette,
    pub paging: PageSizes,
    pub viewer_id: Option<u64>,
}

/// Per-list page sizes. Every value is at least 1.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PageSizes {
    pub applied: usize,
    pub recruiting: usize,
    pub library: usize,
    pub wishlist: usize,
    pub activities: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            applied: 8,
            recruiting: 8,
            library: 8,
            wishlist: 8,
            activities: 10,
        }
    }
}

/// Returns `~/.folio`, the root for config, drafts, and logs.
pub fn app_dir() -> Result<PathBuf> {
    let home =
        env::var_os("HOME").ok_or_else(|| anyhow!("HOME environment variable is not set"))?;
    Ok(PathBuf::from(home).join(APP_DIR))
}

/// Returns the config file path and creates default config if missing.
pub fn ensure_config_file() -> Result<PathBuf> {
    let path = app_dir()?.join(CONFIG_FILE);
    ensure_default_config(&path)?;
    Ok(path)
}

/// Loads configuration from `~/.folio/config.toml`, creating defaults if missing.
pub fn load_or_create() -> Result<AppConfig> {
    let path = ensure_config_file()?;
    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;

    parse_config(&content).with_context(|| format!("invalid config in {}", path.display()))
}

fn parse_config(content: &str) -> Result<AppConfig> {
    let raw: RawConfig = toml::from_str(content).context("failed to parse TOML")?;

    Ok(AppConfig {
        theme: raw.theme.into_theme()?,
        paging: raw.paging.into_page_sizes()?,
        viewer_id: raw.viewer.id,
    })
}

fn ensure_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    let dir = path
        .parent()
        .ok_or_else(|| anyhow!("invalid config path: {}", path.display()))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    fs::write(path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("failed to write default config file {}", path.display()))?;
    log::info!("wrote default config to {}", path.display());
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    theme: RawTheme,
    paging: RawPaging,
    viewer: RawViewer,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawViewer {
    id: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPaging {
    applied: Option<usize>,
    recruiting: Option<usize>,
    library: Option<usize>,
    wishlist: Option<usize>,
    activities: Option<usize>,
}

impl RawPaging {
    fn into_page_sizes(self) -> Result<PageSizes> {
        let defaults = PageSizes::default();

        Ok(PageSizes {
            applied: size_or_default(self.applied, defaults.applied, "paging.applied")?,
            recruiting: size_or_default(self.recruiting, defaults.recruiting, "paging.recruiting")?,
            library: size_or_default(self.library, defaults.library, "paging.library")?,
            wishlist: size_or_default(self.wishlist, defaults.wishlist, "paging.wishlist")?,
            activities: size_or_default(self.activities, defaults.activities, "paging.activities")?,
        })
    }
}

fn size_or_default(value: Option<usize>, default: usize, field: &str) -> Result<usize> {
    match value {
        Some(0) => bail!("`{field}` must be at least 1"),
        Some(size) => Ok(size),
        None => Ok(default),
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawTheme {
    border: Option<String>,
    title: Option<String>,
    dim: Option<String>,
    text: Option<String>,
    selected_fg: Option<String>,
    selected_bg: Option<String>,
    error: Option<String>,
    info: Option<String>,
    author: Option<String>,
    own_comment: Option<String>,
    unsent_comment: Option<String>,
    badge: Option<String>,
    page_current: Option<String>,
}

impl RawTheme {
    fn into_theme(self) -> Result<ThemePalette> {
        let defaults = ThemePalette::default();

        Ok(ThemePalette {
            border: parse_or_default(self.border, defaults.border, "theme.border")?,
            title: parse_or_default(self.title, defaults.title, "theme.title")?,
            dim: parse_or_default(self.dim, defaults.dim, "theme.dim")?,
            text: parse_or_default(self.text, defaults.text, "theme.text")?,
            selected_fg: parse_or_default(
                self.selected_fg,
                defaults.selected_fg,
                "theme.selected_fg",
            )?,
            selected_bg: parse_or_default(
                self.selected_bg,
                defaults.selected_bg,
                "theme.selected_bg",
            )?,
            error: parse_or_default(self.error, defaults.error, "theme.error")?,
            info: parse_or_default(self.info, defaults.info, "theme.info")?,
            author: parse_or_default(self.author, defaults.author, "theme.author")?,
            own_comment: parse_or_default(
                self.own_comment,
                defaults.own_comment,
                "theme.own_comment",
            )?,
            unsent_comment: parse_or_default(
                self.unsent_comment,
                defaults.unsent_comment,
                "theme.unsent_comment",
            )?,
            badge: parse_or_default(self.badge, defaults.badge, "theme.badge")?,
            page_current: parse_or_default(
                self.page_current,
                defaults.page_current,
                "theme.page_current",
            )?,
        })
    }
}

fn parse_or_default(value: Option<String>, default: Color, field: &str) -> Result<Color> {
    match value {
        Some(raw) => parse_color(raw.trim())
            .with_context(|| format!("invalid color value for `{field}`: {raw}")),
        None => Ok(default),
    }
}

fn parse_color(raw: &str) -> Result<Color> {
    if let Some(hex) = raw.strip_prefix('#') {
        if hex.len() != 6 {
            return Err(anyhow!("hex colors must be in #RRGGBB format"));
        }
        let red = u8::from_str_radix(&hex[0..2], 16).context("invalid red hex channel")?;
        let green = u8::from_str_radix(&hex[2..4], 16).context("invalid green hex channel")?;
        let blue = u8::from_str_radix(&hex[4..6], 16).context("invalid blue hex channel")?;
        return Ok(Color::Rgb(red, green, blue));
    }

    let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
    let color = match normalized.as_str() {
        "reset" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" => Color::DarkGray,
        "light_red" => Color::LightRed,
        "light_green" => Color::LightGreen,
        "light_yellow" => Color::LightYellow,
        "light_blue" => Color::LightBlue,
        "light_magenta" => Color::LightMagenta,
        "light_cyan" => Color::LightCyan,
        "white" => Color::White,
        _ => return Err(anyhow!("unsupported color format")),
    };

    Ok(color)
}
