//! Error types for Coptree operations.
//!
//! [`CoptreeError`] wraps everything that can go wrong between reading a
//! document and writing a view of it. Per-sentence validation failures are
//! deliberately absent: they are recorded on the sentence they belong to
//! and never surface here.

use std::io;

use thiserror::Error;

use coptree_parser::error::ParseError;

/// The main error type for Coptree operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the structured
/// diagnostics so reports can show the offending lines.
#[derive(Debug, Error)]
pub enum CoptreeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for CoptreeError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl CoptreeError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

/// Misuse of the document navigator.
///
/// Navigation failures leave the navigator exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// `requested` is a zero-based sentence position.
    #[error("sentence {} is out of range, the document has {len} sentences", .requested + 1)]
    OutOfRange { requested: usize, len: usize },

    #[error("a document load is already in progress")]
    LoadInProgress,

    #[error("no document load is in progress")]
    NoLoadInProgress,

    #[error("the document contains no sentences")]
    EmptyDocument,
}
