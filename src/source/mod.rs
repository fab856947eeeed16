//! Demo content sources.
//!
//! Each loader turns something on disk into the content one of the view
//! components shows:
//! - [`text`]: lines for a plain scroll view
//! - [`jsonl`]: a [`VecTable`](crate::view_state::VecTable) built from JSON objects
//! - [`fs_tree`]: a directory tree loaded one level at a time
//! - [`file`]: a read/write stream for the hex view

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod file;
pub mod fs_tree;
pub mod jsonl;
pub mod text;

pub use file::{open_stream, OpenedStream, ReadWriteSeek};
pub use fs_tree::{open_tree, FsEntry, FsTreeBuilder};
pub use jsonl::{load_table, table_from_reader, JsonlTable};
pub use text::{expand_tabs, TextContent, TAB_WIDTH};

/// Errors raised while loading demo content.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Path does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Missing path.
        path: PathBuf,
    },

    /// A directory was expected.
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// Offending path.
        path: PathBuf,
    },

    /// Reading or opening failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl SourceError {
    /// Wrap an I/O error for `path`, mapping `NotFound` onto [`SourceError::FileNotFound`].
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            SourceError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SourceError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
