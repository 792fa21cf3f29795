//! Error types returned from the [`crate::tablebase`] library surface.
//!
//! CLI binaries (`src/bin/*.rs`) work with `anyhow::Result` at their
//! boundary, as is conventional; within the library, errors are a closed,
//! matchable enum so callers can distinguish "bad input" from "I/O failure"
//! from "the rules engine rejected this position".

use thiserror::Error;

/// Errors produced while building or probing a tablebase.
#[derive(Error, Debug)]
pub enum TablebaseError {
    /// A position key could not be parsed or does not describe a legal
    /// position.
    #[error("malformed position '{key}': {reason}")]
    MalformedPosition {
        /// The offending key.
        key: String,
        /// Why it was rejected.
        reason: String,
    },
    /// A piece inventory was out of the supported range or otherwise
    /// unusable.
    #[error("invalid inventory: {reason}")]
    InvalidInventory {
        /// Why it was rejected.
        reason: String,
    },
    /// A numeric parameter (depth, piece count) fell outside its supported
    /// range.
    #[error("value out of range: {reason}")]
    OutOfRange {
        /// Why it was rejected.
        reason: String,
    },
    /// Reading or writing a persisted tablebase failed.
    #[error("persistence failure: {0}")]
    Persistence(#[from] std::io::Error),
    /// The chess rules engine rejected an operation (e.g. tried to apply an
    /// illegal move).
    #[error("rules engine error: {reason}")]
    RulesEngineError {
        /// Why it was rejected.
        reason: String,
    },
}

/// Convenience alias for fallible tablebase operations.
pub type Result<T> = std::result::Result<T, TablebaseError>;
