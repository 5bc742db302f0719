//! Error types callers may want to match on.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of one aggregation run.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// Every file was skipped, or the tree held no files at all.
    #[error("no log file produced a record under {}", .root.display())]
    NoRecords { root: PathBuf },

    /// A record disagrees with the field count fixed by the first record.
    #[error(
        "record from {} has {actual} numeric fields, expected {expected}",
        .path.display()
    )]
    FieldCountMismatch {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },
}

/// Malformed coupling-map input.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("each edge should be a list with length 2, edge {index} has {len}")]
    BadEdge { index: usize, len: usize },
}
