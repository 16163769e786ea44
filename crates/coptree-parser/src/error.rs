//! Error and diagnostic system for Coptree input processing.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans pointing into the CoNLL-U source
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, multiple source
//! locations, and help text. Multiple diagnostics are wrapped in [`ParseError`]
//! when reading a document fails.
//!
//! # Example
//!
//! ```
//! # use coptree_parser::error::{Diagnostic, ErrorCode};
//! # use coptree_parser::Span;
//!
//! let line = Span::new(40..72);
//! let root = Span::new(10..38);
//!
//! let diag = Diagnostic::error("sentence has 2 roots")
//!     .with_code(ErrorCode::E201)
//!     .with_label(line, "second root")
//!     .with_secondary_label(root, "first root")
//!     .with_help("attach one of the roots to another token");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
