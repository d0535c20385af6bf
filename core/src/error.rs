//! Error types for the trade-solving engine
//!
//! Builder input problems are collected as diagnostics on [`crate::builder::ParseData`]
//! rather than returned as `Err`, so parsing keeps going and reports everything
//! wrong at the end instead of stopping at the first bad line. The
//! [`BuilderError`] variants here cover the small number of structural
//! problems that make it impossible to continue at all.

use thiserror::Error;

/// Errors that can be returned while constructing a graph from parsed want-lists.
#[derive(Debug, Error, PartialEq)]
pub enum BuilderError {
    #[error("line {line}: {message}")]
    FatalInput { line: usize, message: String },

    #[error("no want lists found in input; nothing to process")]
    NoWantLists,
}

/// Errors surfaced by the pairing heap's addressable API.
///
/// These indicate a programmer error (decreasing a cost that was never lower,
/// or operating on an already-extracted entry) rather than a condition a
/// caller should recover from; see `Scheduler`'s round loop for the only
/// place these are actually checked against live data.
#[derive(Debug, Error, PartialEq)]
pub enum HeapError {
    #[error("cannot decrease cost to {to_cost}, entry already has cost {current_cost}")]
    NotADecrease { current_cost: u64, to_cost: u64 },

    #[error("entry was already extracted from the heap")]
    AlreadyExtracted,
}
