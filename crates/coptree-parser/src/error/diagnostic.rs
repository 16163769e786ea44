//! The core diagnostic type for the Coptree error system.
//!
//! A [`Diagnostic`] represents a single error or warning with optional
//! error code, multiple labeled source spans, and help text.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A rich diagnostic message with source location information.
///
/// Diagnostics provide detailed information about errors and warnings,
/// including:
/// - A severity level
/// - An optional error code for documentation and searchability
/// - A primary message describing the issue
/// - One or more labeled source spans
/// - Optional help text with suggestions
///
/// # Example
///
/// ```text
/// error[E202]: token 3 has head 7, which is not a token of this sentence
///   --> shenoute.conllu:12:1
///    |
/// 12 | 3	ⲡⲛⲟⲩⲧⲉ	ⲛⲟⲩⲧⲉ	NOUN	_	_	7	obj	_	_
///    | ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ dangling head
///    |
///    = help: point the head at an existing token or at 0 for the root
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use coptree_parser::error::{Diagnostic, ErrorCode};
    /// # use coptree_parser::Span;
    ///
    /// let span = Span::new(0..10);
    /// let diag = Diagnostic::error("expected 10 columns, found 9")
    ///     .with_code(ErrorCode::E001)
    ///     .with_label(span, "token line")
    ///     .with_help("separate columns with a single tab");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use coptree_parser::error::Diagnostic;
    /// # use coptree_parser::Span;
    ///
    /// let span = Span::new(0..10);
    /// let diag = Diagnostic::warning("subject `ⲡⲉ` is tagged AUX")
    ///     .with_label(span, "unusual subject")
    ///     .with_help("subjects are usually pronouns or nouns");
    /// ```
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Create a new diagnostic with the given severity and message.
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_with_labels() {
        let diag = Diagnostic::error("sentence has 2 roots")
            .with_label(Span::new(30..50), "second root")
            .with_secondary_label(Span::new(5..25), "first root");

        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(diag.labels()[1].message(), "first root");
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::error("token 4 is part of a cycle").with_code(ErrorCode::E203);

        assert_eq!(diag.to_string(), "error[E203]: token 4 is part of a cycle");
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::warning("sentence has no tokens");

        assert_eq!(diag.to_string(), "warning: sentence has no tokens");
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::warning("`ⲡ` is labeled det but tagged NOUN")
            .with_code(ErrorCode::W301)
            .with_label(Span::new(100..120), "unusual determiner")
            .with_help("determiners are usually tagged DET");

        assert!(diag.severity().is_warning());
        assert_eq!(diag.code(), Some(ErrorCode::W301));
        assert_eq!(diag.labels().len(), 1);
        assert_eq!(diag.help(), Some("determiners are usually tagged DET"));
    }
}
