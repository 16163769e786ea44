//! CLI logic for the Coptree viewer.
//!
//! This module contains the core CLI logic: loading configuration, reading
//! a CoNLL-U document, reporting its findings and rendering the requested
//! view to a file, to stdout, or through an interactive session.

pub mod browse;
pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
    str::FromStr,
};

use log::{info, warn};
use miette::GraphicalReportHandler;

use coptree::{CoptreeError, DocumentViewer, Navigation, ViewMode, export};

use error_adapter::{DiagnosticAdapter, render};

/// What the CLI writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Sentence(ViewMode),
    /// Every sentence in one HTML page.
    Html,
}

impl FromStr for Output {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(Self::Html),
            _ => s.parse().map(Self::Sentence),
        }
    }
}

/// Run the Coptree CLI application
///
/// This function reads the input document, reports sentence-level findings
/// as warnings, and renders the requested view.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CoptreeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - CoNLL-U syntax errors
/// - Navigation errors such as an out-of-range sentence
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), CoptreeError> {
    info!(
        input_path = args.input,
        view = args.view;
        "Processing document"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let output = Output::from_str(&args.view)
        .map_err(|err| CoptreeError::Config(format!("{err}: {}", args.view)))?;

    let source = fs::read_to_string(&args.input)?;

    let mut viewer = DocumentViewer::new(app_config);
    let count = viewer.load_conllu(&source)?;
    info!(sentences = count; "Document loaded");
    report_findings(&viewer);

    if let Some(number) = args.sentence {
        viewer.navigate(Navigation::Jump(sentence_index(number)?))?;
    }

    if args.interactive {
        let mode = match output {
            Output::Sentence(mode) => mode,
            Output::Html => ViewMode::default(),
        };
        return browse::browse(&mut viewer, mode, io::stdin().lock(), io::stdout().lock());
    }

    let rendered = render_output(&viewer, output, args.all)?;

    match &args.output {
        Some(path) => {
            export::write_output(path, &rendered)?;
            info!(output_file = path; "Output written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }

    Ok(())
}

fn sentence_index(number: usize) -> Result<usize, CoptreeError> {
    number
        .checked_sub(1)
        .ok_or_else(|| CoptreeError::Config("sentence numbers start at 1".to_string()))
}

fn render_output(
    viewer: &DocumentViewer,
    output: Output,
    all: bool,
) -> Result<String, CoptreeError> {
    let mode = match output {
        Output::Html => return viewer.html_document(),
        Output::Sentence(mode) => mode,
    };
    if !all {
        return Ok(viewer.current_view(mode)?.render()?);
    }

    match mode {
        ViewMode::Conllu => viewer.conllu_document(),
        ViewMode::Svg => Err(CoptreeError::Config(
            "the svg view draws one sentence, use --sentence or the html view".to_string(),
        )),
        _ => {
            let len = viewer.navigator().len();
            let mut blocks = Vec::with_capacity(len);
            for index in 0..len {
                let view = viewer.view(index, mode)?.render()?;
                blocks.push(format!(
                    "Sentence {} of {len}\n{}\n",
                    index + 1,
                    view.trim_end()
                ));
            }
            Ok(blocks.join("\n"))
        }
    }
}

/// Logs every validation and lint finding of the document as a warning.
fn report_findings(viewer: &DocumentViewer) {
    let diagnostics = viewer.diagnostics();
    if diagnostics.is_empty() {
        return;
    }

    let reporter = GraphicalReportHandler::new();
    let src = viewer.source_text().unwrap_or_default();
    for diagnostic in &diagnostics {
        let rendered = render(&reporter, &DiagnosticAdapter::new(diagnostic, src));
        warn!("{rendered}");
    }
    let stats = viewer.navigator().stats();
    warn!(
        findings = diagnostics.len(),
        unparseable = stats.unparseable;
        "Document has findings"
    );
}
