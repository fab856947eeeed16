//! Error types for the viewport core.
//!
//! Layout, scroll and selection arithmetic never fails: out-of-range values
//! are clamped by the component that owns them. Errors are reserved for
//! structural misuse (a stream that can't seek, selecting a node that is
//! hidden) and for I/O against the hex view's backing stream.
//!
//! # Error Hierarchy
//!
//! - [`CoreError`] - failures surfaced by the components in `view_state`
//! - `ConfigError`, `LoggingError`, `SourceError` and `TuiError` live next to
//!   the layers that produce them and wrap `CoreError` where needed.

use crate::model::identifiers::NodeId;
use std::io;
use thiserror::Error;

/// Failures surfaced by the viewport components.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The stream handed to the hex view rejected a seek.
    ///
    /// Fatal to construction: a hex view is random-access by definition.
    #[error("Stream is not seekable: {0}")]
    NotSeekable(#[source] io::Error),

    /// The node exists but one of its ancestors is collapsed.
    ///
    /// **Recovery**: expand the ancestors first, then select again.
    #[error("Node {0} is hidden by a collapsed ancestor")]
    HiddenNode(NodeId),

    /// The node id does not belong to this tree.
    #[error("Node {0} does not exist in this tree")]
    UnknownNode(NodeId),

    /// Reading the backing stream failed.
    #[error("Stream I/O error: {0}")]
    Io(#[from] io::Error),

    /// Writing a pending edit to the primary stream failed.
    ///
    /// Bytes already written in this pass were restored (best effort) and the
    /// pending edits are still held, so the caller can retry or discard.
    #[error("Failed to write edit at offset {offset:#x}: {source}")]
    ApplyFailed {
        /// Offset whose write failed.
        offset: u64,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Flushing the primary stream after writing the edits failed.
    ///
    /// Handled like [`CoreError::ApplyFailed`]: rollback attempted, edits kept.
    #[error("Failed to flush edits: {0}")]
    FlushFailed(#[source] io::Error),

    /// The primary stream was committed but the mirror stream failed.
    ///
    /// The pending edits have already been cleared when this is returned.
    #[error("Edits committed, but mirror write failed at offset {offset:#x}: {source}")]
    MirrorFailed {
        /// Offset whose mirror write failed.
        offset: u64,
        /// Underlying I/O error.
        source: io::Error,
    },
}
