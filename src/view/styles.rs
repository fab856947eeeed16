//! Widget styling configuration.
//!
//! Provides the styles every view widget draws with (selection, marks,
//! pending edits, headers, scroll bars).

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors forced on or off, ignoring the environment.
    pub fn fixed(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== ViewStyles =====

/// Styles shared by the view widgets.
///
/// Without colors, highlighting falls back to modifiers (reverse video,
/// bold, underline) so the selection stays visible on monochrome terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewStyles {
    /// Selected row, cell or byte.
    pub selected: Style,
    /// Marked tree node.
    pub marked: Style,
    /// Byte with a pending edit.
    pub edited: Style,
    /// Table header.
    pub header: Style,
    /// Scroll bar track.
    pub bar_track: Style,
    /// Scroll bar thumb.
    pub bar_thumb: Style,
    /// Hex view address column.
    pub address: Style,
    /// Status line.
    pub status: Style,
}

impl ViewStyles {
    /// Create styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                selected: Style::default().fg(Color::Black).bg(Color::Cyan),
                marked: Style::default().fg(Color::Yellow),
                edited: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                header: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                bar_track: Style::default().fg(Color::DarkGray),
                bar_thumb: Style::default().fg(Color::Gray),
                address: Style::default().fg(Color::Blue),
                status: Style::default().fg(Color::Black).bg(Color::Gray),
            }
        } else {
            Self {
                selected: Style::default().add_modifier(Modifier::REVERSED),
                marked: Style::default().add_modifier(Modifier::BOLD),
                edited: Style::default().add_modifier(Modifier::UNDERLINED),
                header: Style::default().add_modifier(Modifier::BOLD),
                bar_track: Style::default(),
                bar_thumb: Style::default(),
                address: Style::default(),
                status: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }
}

impl Default for ViewStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
