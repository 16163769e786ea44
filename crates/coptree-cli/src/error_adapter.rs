//! miette reports for coptree findings and failures.
//!
//! CoNLL-U syntax errors, per-sentence validation errors and lint warnings
//! all carry a coptree [`Diagnostic`] with byte spans into the document;
//! [`DiagnosticAdapter`] draws them against the document text. A rejected
//! file yields one report per malformed line. Failures without a source
//! location, such as a bad config or an out-of-range sentence, are shown
//! through [`ErrorAdapter`] with a `coptree::*` code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, SourceSpan};

use coptree::CoptreeError;
use coptree_parser::{
    Span,
    error::{Diagnostic, Severity},
};

/// One finding drawn against the CoNLL-U document it came from.
pub struct DiagnosticAdapter<'a> {
    diagnostic: &'a Diagnostic,
    document: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diagnostic: &'a Diagnostic, document: &'a str) -> Self {
        Self {
            diagnostic,
            document,
        }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diagnostic", &self.diagnostic)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagnostic.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diagnostic.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.document as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diagnostic.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// A failure with no place in the document, reported by its category.
pub struct ErrorAdapter<'a>(pub &'a CoptreeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CoptreeError::Io(_) => "coptree::io",
            CoptreeError::Parse { .. } => return None,
            CoptreeError::Navigation(_) => "coptree::navigation",
            CoptreeError::Config(_) => "coptree::config",
            CoptreeError::Export(_) => "coptree::export",
        };
        Some(Box::new(code))
    }
}

/// Either kind of report, so callers can render a list of them.
#[derive(Debug)]
pub enum Reportable<'a> {
    Diagnostic(DiagnosticAdapter<'a>),
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Splits a failed run into reports: one per malformed CoNLL-U line for a
/// rejected document, a single report otherwise.
pub fn to_reportables(err: &CoptreeError) -> Vec<Reportable<'_>> {
    let CoptreeError::Parse { err: rejected, src } = err else {
        return vec![Reportable::Error(ErrorAdapter(err))];
    };
    rejected
        .diagnostics()
        .iter()
        .map(|diagnostic| Reportable::Diagnostic(DiagnosticAdapter::new(diagnostic, src)))
        .collect()
}

/// Renders one reportable with miette's graphical handler.
pub fn render(reporter: &GraphicalReportHandler, reportable: &dyn MietteDiagnostic) -> String {
    let mut writer = String::new();
    // Writing into a String cannot fail.
    let _ = reporter.render_report(&mut writer, reportable);
    writer
}
