//! Failures that abort a request before any search work is done.

use thiserror::Error;

use crate::Cell;

/// Structural errors. An unreachable end or a cancelled run are not errors; those are reported
/// through [PathResult](crate::PathResult).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("cell {cell} lies outside the {size}x{size} grid")]
    OutOfRange { cell: Cell, size: usize },

    #[error("invalid endpoints: {0}")]
    InvalidEndpoints(String),
}

pub type Result<T> = std::result::Result<T, PathError>;
