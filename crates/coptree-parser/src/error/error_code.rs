//! Error codes for the Coptree diagnostic system.
//!
//! Codes are organized by phase:
//! - `E0xx` - CoNLL-U reading errors
//! - `E2xx` / `W2xx` - Tree validation errors and warnings
//! - `W3xx` - Grammar lint warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Reader Errors (E0xx)
    // =========================================================================
    /// Wrong column count.
    ///
    /// A token line must have exactly ten tab-separated columns.
    E001,

    /// Invalid token ID.
    ///
    /// The ID column must be a word index (`3`), a multi-word range (`3-4`)
    /// or an empty node (`3.1`).
    E002,

    /// Invalid head.
    ///
    /// The HEAD column of a word line must be a non-negative integer.
    E003,

    /// Missing tag or relation.
    ///
    /// The UPOS and DEPREL columns of a word line must not be empty.
    E004,

    // =========================================================================
    // Validation (E2xx / W2xx)
    // =========================================================================
    /// Empty sentence.
    ///
    /// The sentence has no word lines. A placeholder is shown instead.
    W200,

    /// Wrong number of roots.
    ///
    /// Exactly one token must have head `0`.
    E201,

    /// Dangling head.
    ///
    /// A head refers to an index that no token in the sentence has.
    E202,

    /// Cyclic dependency.
    ///
    /// Following heads from some token never reaches the root.
    E203,

    /// Duplicate index.
    ///
    /// Two tokens in one sentence share the same index.
    E204,

    /// Zero index.
    ///
    /// Token indices start at 1; `0` is reserved for the root head.
    E205,

    // =========================================================================
    // Grammar Lint (W3xx)
    // =========================================================================
    /// Unusual subject.
    ///
    /// A subject relation joins tags that rarely take part in one.
    W300,

    /// Unusual determiner.
    ///
    /// A `det` relation whose dependent is not a determiner or whose head
    /// is not nominal.
    W301,

    /// Content word labeled as punctuation.
    W302,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Reader errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            // Validation
            ErrorCode::W200 => "W200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            // Grammar lint
            ErrorCode::W300 => "W300",
            ErrorCode::W301 => "W301",
            ErrorCode::W302 => "W302",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Reader errors
            ErrorCode::E001 => "wrong column count",
            ErrorCode::E002 => "invalid token id",
            ErrorCode::E003 => "invalid head",
            ErrorCode::E004 => "missing tag or relation",
            // Validation
            ErrorCode::W200 => "empty sentence",
            ErrorCode::E201 => "wrong number of roots",
            ErrorCode::E202 => "dangling head",
            ErrorCode::E203 => "cyclic dependency",
            ErrorCode::E204 => "duplicate index",
            ErrorCode::E205 => "zero index",
            // Grammar lint
            ErrorCode::W300 => "unusual subject",
            ErrorCode::W301 => "unusual determiner",
            ErrorCode::W302 => "content word labeled as punctuation",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
