//! vport - Entry Point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use vport::config::{KeyBindings, ResolvedConfig};
use vport::source::{self, FsTreeBuilder, ReadWriteSeek, TextContent};
use vport::view::{ColorConfig, Screen, ViewOptions};

/// vport - scroll, tree, table and hex viewports in the terminal
#[derive(Parser, Debug)]
#[command(name = "vport")]
#[command(version)]
#[command(about = "Browse text, directories, JSONL tables and binary files in the terminal")]
pub struct Args {
    /// What to open
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Write logs to this file instead of the default location
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// Viewers.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Scroll through a text file
    Text {
        /// File to show
        file: PathBuf,
    },
    /// Browse a directory tree
    Tree {
        /// Root directory
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Include dot files
        #[arg(short = 'a', long)]
        hidden: bool,
    },
    /// Show a JSON Lines file as a table
    Table {
        /// JSONL file
        file: PathBuf,
    },
    /// Hex view (and edit) a file
    Hex {
        /// File to show
        file: PathBuf,
        /// Never write to the file
        #[arg(long)]
        read_only: bool,
    },
}

impl Command {
    fn path(&self) -> &PathBuf {
        match self {
            Command::Text { file } | Command::Table { file } | Command::Hex { file, .. } => file,
            Command::Tree { dir, .. } => dir,
        }
    }
}

/// Load the resolved configuration: defaults, file, env, then CLI.
fn resolve_config(args: &Args) -> Result<ResolvedConfig, vport::config::ConfigError> {
    let config_file = vport::config::load_config_with_precedence(args.config.clone())?;
    let merged = vport::config::merge_config(config_file);
    let with_env = vport::config::apply_env_overrides(merged);

    let read_only_override = match args.command {
        Command::Hex {
            read_only: true, ..
        } => Some(true),
        _ => None,
    };
    Ok(vport::config::apply_cli_overrides(
        with_env,
        args.log_file.clone(),
        read_only_override,
    ))
}

/// Open the content a subcommand names.
fn open_screen(command: &Command, config: &ResolvedConfig) -> Result<Screen, Box<dyn std::error::Error>> {
    let screen = match command {
        Command::Text { file } => {
            let content = TextContent::load(file)?;
            info!(lines = content.height(), width = content.width(), "Loaded text");
            Screen::text(content, config.scroll_bars)
        }
        Command::Tree { dir, hidden } => {
            let builder = FsTreeBuilder {
                show_hidden: *hidden,
            };
            let tree = source::open_tree(dir, &builder)?;
            Screen::tree(tree, Box::new(builder))
        }
        Command::Table { file } => {
            let loaded = source::load_table(file)?;
            if loaded.skipped > 0 {
                warn!(skipped = loaded.skipped, "Some lines were not JSON objects");
            }
            Screen::table(loaded.table, config.table_style())
        }
        Command::Hex { file, .. } => {
            let opened = source::open_stream(file, config.hex_allow_edits)?;
            let stream: Box<dyn ReadWriteSeek> = Box::new(opened.file);
            Screen::hex(stream, config.hex_allow_edits && opened.writable)?
        }
    };
    Ok(screen)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = resolve_config(&args)?;

    vport::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        command = ?args.command,
        "Configuration loaded and resolved"
    );

    let screen = open_screen(&args.command, &config)?;
    let title = args
        .command
        .path()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.command.path().display().to_string());

    let options = ViewOptions {
        title,
        wheel_lines: config.wheel_lines,
        color: ColorConfig::from_env_and_args(args.no_color),
        key_bindings: KeyBindings::default(),
    };

    vport::view::run_with_source(screen, options)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["vport", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["vport", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Args::try_parse_from(["vport"]).is_err());
    }

    #[test]
    fn test_text_subcommand() {
        let args = Args::parse_from(["vport", "text", "notes.txt"]);
        assert_eq!(
            args.command,
            Command::Text {
                file: PathBuf::from("notes.txt")
            }
        );
        assert!(!args.no_color);
        assert_eq!(args.config, None);
        assert_eq!(args.log_file, None);
    }

    #[test]
    fn test_tree_defaults_to_current_directory() {
        let args = Args::parse_from(["vport", "tree"]);
        assert_eq!(
            args.command,
            Command::Tree {
                dir: PathBuf::from("."),
                hidden: false
            }
        );
    }

    #[test]
    fn test_tree_hidden_flag() {
        let args = Args::parse_from(["vport", "tree", "-a", "/tmp"]);
        assert_eq!(
            args.command,
            Command::Tree {
                dir: PathBuf::from("/tmp"),
                hidden: true
            }
        );
    }

    #[test]
    fn test_table_requires_file() {
        let result = Args::try_parse_from(["vport", "table"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_hex_read_only() {
        let args = Args::parse_from(["vport", "hex", "--read-only", "a.bin"]);
        assert_eq!(
            args.command,
            Command::Hex {
                file: PathBuf::from("a.bin"),
                read_only: true
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::parse_from([
            "vport",
            "hex",
            "a.bin",
            "--no-color",
            "--config",
            "/custom/config.toml",
            "--log-file",
            "/tmp/vport.log",
        ]);
        assert!(args.no_color);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/vport.log")));
    }

    #[test]
    fn test_command_path() {
        let args = Args::parse_from(["vport", "table", "rows.jsonl"]);
        assert_eq!(args.command.path(), &PathBuf::from("rows.jsonl"));
    }

    #[test]
    fn test_cli_flags_flow_through_precedence_chain() {
        use vport::config::{apply_cli_overrides, apply_env_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            log_file_path: Some(PathBuf::from("/tmp/from-file.log")),
            hex_allow_edits: Some(true),
            ..ConfigFile::default()
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(merged.log_file_path, PathBuf::from("/tmp/from-file.log"));

        let with_env = apply_env_overrides(merged);
        let with_cli = apply_cli_overrides(with_env, Some(PathBuf::from("/tmp/cli.log")), Some(true));
        assert_eq!(with_cli.log_file_path, PathBuf::from("/tmp/cli.log"));
        assert!(!with_cli.hex_allow_edits, "--read-only beats the config file");
    }
}
