//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

/// RAII guard to ensure environment variable cleanup even under test parallelism.
/// Removes the var on drop, preventing test pollution in parallel execution.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

#[test]
fn default_config_path_contains_vport_config_toml() {
    let Some(path) = default_config_path() else {
        return;
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("vport") && path_str.ends_with("config.toml"),
        "Path should contain 'vport' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = write_temp(
        "vport_test_config.toml",
        r#"
wheel_lines = 5
scroll_bars = "always"
max_cell_width = 40
null_symbol = "∅"
show_table_header = false
hex_allow_edits = false
"#,
    );

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.wheel_lines, Some(5));
    assert_eq!(config.scroll_bars, Some(ScrollBarPolicy::Always));
    assert_eq!(config.max_cell_width, Some(40));
    assert_eq!(config.null_symbol.as_deref(), Some("∅"));
    assert_eq!(config.show_table_header, Some(false));
    assert_eq!(config.hex_allow_edits, Some(false));

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = write_temp("vport_test_invalid.toml", "wheel_lines = [unclosed");

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should be a parse error, got {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_scroll_bar_policy() {
    let config_path = write_temp("vport_test_bad_policy.toml", r#"scroll_bars = "sometimes""#);

    let result = load_config_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"");
    assert!(result.is_err(), "Unknown keys should be rejected");
}

#[test]
fn load_config_file_handles_partial_config() {
    let config_path = write_temp("vport_test_partial.toml", "wheel_lines = 1\n");

    let config = load_config_file(&config_path).unwrap().unwrap();
    assert_eq!(config.wheel_lines, Some(1));
    assert_eq!(config.scroll_bars, None);
    assert_eq!(config.null_symbol, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();
    assert_eq!(config.wheel_lines, 3);
    assert_eq!(config.scroll_bars, ScrollBarPolicy::Auto);
    assert_eq!(config.max_cell_width, 100);
    assert_eq!(config.null_symbol, "-");
    assert!(config.show_table_header);
    assert!(config.hex_allow_edits);
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let file = ConfigFile {
        wheel_lines: Some(7),
        scroll_bars: Some(ScrollBarPolicy::Never),
        null_symbol: Some("null".to_string()),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));
    let defaults = ResolvedConfig::default();
    assert_eq!(resolved.wheel_lines, 7);
    assert_eq!(resolved.scroll_bars, ScrollBarPolicy::Never);
    assert_eq!(resolved.null_symbol, "null");
    assert_eq!(resolved.max_cell_width, defaults.max_cell_width);
    assert_eq!(resolved.hex_allow_edits, defaults.hex_allow_edits);
}

#[test]
fn table_style_carries_table_settings() {
    let config = ResolvedConfig {
        max_cell_width: 12,
        null_symbol: "~".to_string(),
        show_table_header: false,
        ..ResolvedConfig::default()
    };
    let style = config.table_style();
    assert_eq!(style.max_cell_width, 12);
    assert_eq!(style.null_symbol, "~");
    assert!(!style.show_header);
    assert_eq!(style.padding, TableStyle::default().padding);
}

#[test]
fn table_style_never_has_zero_width_cap() {
    let config = ResolvedConfig {
        max_cell_width: 0,
        ..ResolvedConfig::default()
    };
    assert_eq!(config.table_style().max_cell_width, 1);
}

#[test]
#[serial(vport_env)]
fn apply_env_overrides_respects_null_symbol() {
    let _guard = EnvGuard::new("VPORT_NULL_SYMBOL");
    env::set_var("VPORT_NULL_SYMBOL", "NULL");

    let result = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(result.null_symbol, "NULL");
}

#[test]
#[serial(vport_env)]
fn apply_env_overrides_respects_log_file() {
    let _guard = EnvGuard::new("VPORT_LOG_FILE");
    env::set_var("VPORT_LOG_FILE", "/tmp/vport-env.log");

    let result = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(result.log_file_path, PathBuf::from("/tmp/vport-env.log"));
}

#[test]
#[serial(vport_env)]
fn apply_env_overrides_no_change_when_env_vars_not_set() {
    let _symbol = EnvGuard::new("VPORT_NULL_SYMBOL");
    let _log = EnvGuard::new("VPORT_LOG_FILE");

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(vport_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new("VPORT_CONFIG");
    let explicit_path = write_temp("vport_explicit.toml", "wheel_lines = 11\n");
    let env_path = write_temp("vport_env.toml", "wheel_lines = 22\n");
    env::set_var("VPORT_CONFIG", &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(
        config.wheel_lines,
        Some(11),
        "Should use explicit path, not VPORT_CONFIG env var"
    );

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
}

#[test]
#[serial(vport_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new("VPORT_CONFIG");
    let env_path = write_temp("vport_env_only.toml", "wheel_lines = 22\n");
    env::set_var("VPORT_CONFIG", &env_path);

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.wheel_lines, Some(22));

    fs::remove_file(env_path).ok();
}

#[test]
#[serial(vport_config)]
fn load_config_with_precedence_missing_env_file_is_not_an_error() {
    let _guard = EnvGuard::new("VPORT_CONFIG");
    env::set_var("VPORT_CONFIG", "/nonexistent/vport/config.toml");

    assert_eq!(load_config_with_precedence(None), Ok(None));
}

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), None, None), base);
}

#[test]
fn apply_cli_overrides_log_file_and_read_only() {
    let result = apply_cli_overrides(
        ResolvedConfig::default(),
        Some(PathBuf::from("/tmp/cli.log")),
        Some(true),
    );
    assert_eq!(result.log_file_path, PathBuf::from("/tmp/cli.log"));
    assert!(!result.hex_allow_edits);
}

#[test]
#[serial(vport_env)]
fn precedence_chain_full_defaults_to_cli() {
    let _guard = EnvGuard::new("VPORT_LOG_FILE");
    let file = ConfigFile {
        log_file_path: Some(PathBuf::from("/tmp/file.log")),
        wheel_lines: Some(9),
        ..ConfigFile::default()
    };

    let merged = merge_config(Some(file));
    assert_eq!(merged.log_file_path, PathBuf::from("/tmp/file.log"));

    env::set_var("VPORT_LOG_FILE", "/tmp/env.log");
    let with_env = apply_env_overrides(merged);
    assert_eq!(with_env.log_file_path, PathBuf::from("/tmp/env.log"));

    let with_cli = apply_cli_overrides(with_env, Some(PathBuf::from("/tmp/cli.log")), None);
    assert_eq!(with_cli.log_file_path, PathBuf::from("/tmp/cli.log"));
    assert_eq!(with_cli.wheel_lines, 9, "Untouched keys survive every layer");
}
