//! Configuration file loading with precedence handling.

use crate::view_state::{ScrollBarPolicy, TableStyle};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/vport/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Lines scrolled per mouse wheel notch.
    #[serde(default)]
    pub wheel_lines: Option<usize>,

    /// Scroll bar visibility: "auto", "always" or "never".
    #[serde(default)]
    pub scroll_bars: Option<ScrollBarPolicy>,

    /// Upper bound on a table column's width.
    #[serde(default)]
    pub max_cell_width: Option<u16>,

    /// Text shown for null table cells.
    #[serde(default)]
    pub null_symbol: Option<String>,

    /// Draw the table header row.
    #[serde(default)]
    pub show_table_header: Option<bool>,

    /// Accept typed edits in the hex view.
    #[serde(default)]
    pub hex_allow_edits: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Lines per wheel notch.
    pub wheel_lines: usize,
    /// Scroll bar visibility for the text view.
    pub scroll_bars: ScrollBarPolicy,
    /// Table column width cap.
    pub max_cell_width: u16,
    /// Null cell text.
    pub null_symbol: String,
    /// Table header on/off.
    pub show_table_header: bool,
    /// Hex edits on/off.
    pub hex_allow_edits: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let table = TableStyle::default();
        Self {
            wheel_lines: 3,
            scroll_bars: ScrollBarPolicy::Auto,
            max_cell_width: table.max_cell_width,
            null_symbol: table.null_symbol,
            show_table_header: table.show_header,
            hex_allow_edits: true,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Table style with the configured overrides on top of the defaults.
    pub fn table_style(&self) -> TableStyle {
        TableStyle {
            max_cell_width: self.max_cell_width.max(1),
            null_symbol: self.null_symbol.clone(),
            show_header: self.show_table_header,
            ..TableStyle::default()
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/vport/vport.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("vport").join("vport.log")
    } else {
        PathBuf::from("vport.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/vport/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vport").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `VPORT_CONFIG` environment variable
/// 3. Default path `~/.config/vport/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("VPORT_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `VPORT_NULL_SYMBOL`: Override the null cell text
/// - `VPORT_LOG_FILE`: Override the log file path
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(symbol) = std::env::var("VPORT_NULL_SYMBOL") {
        config.null_symbol = symbol;
    }

    if let Ok(path) = std::env::var("VPORT_LOG_FILE") {
        if !path.is_empty() {
            config.log_file_path = PathBuf::from(path);
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        wheel_lines: config.wheel_lines.unwrap_or(defaults.wheel_lines),
        scroll_bars: config.scroll_bars.unwrap_or(defaults.scroll_bars),
        max_cell_width: config.max_cell_width.unwrap_or(defaults.max_cell_width),
        null_symbol: config.null_symbol.unwrap_or(defaults.null_symbol),
        show_table_header: config
            .show_table_header
            .unwrap_or(defaults.show_table_header),
        hex_allow_edits: config.hex_allow_edits.unwrap_or(defaults.hex_allow_edits),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Arguments
///
/// * `config` - Base resolved config (already merged with defaults, file, and env vars)
/// * `log_file_override` - Optional path from `--log-file`
/// * `read_only_override` - `Some(true)` from `--read-only` disables hex edits
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    log_file_override: Option<PathBuf>,
    read_only_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(path) = log_file_override {
        config.log_file_path = path;
    }

    if let Some(read_only) = read_only_override {
        config.hex_allow_edits = !read_only;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
