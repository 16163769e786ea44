//! Coptree - dependency tree assembly and navigation for Coptic annotations.
//!
//! Token records produced by a tagging and parsing collaborator are
//! validated per sentence, assembled into dependency trees, laid out on a
//! grid and rendered as a text outline, a graph description, a table, an
//! SVG drawing or CoNLL-U. [`DocumentViewer`] ties the stages together for
//! one document at a time.
//!
//! # Example
//!
//! ```
//! use coptree::{DocumentViewer, Navigation, ViewMode, config::AppConfig};
//!
//! let source = "# sent_id = 1\n\
//!               1\tⲁⲛⲟⲕ\tⲁⲛⲟⲕ\tPRON\t_\t_\t2\tnsubj\t_\t_\n\
//!               2\tⲡⲉ\tⲡⲉ\tAUX\t_\t_\t0\troot\t_\t_\n\
//!               3\tⲡⲛⲟⲩⲧⲉ\tⲛⲟⲩⲧⲉ\tNOUN\t_\t_\t2\tnsubj\t_\t_\n";
//!
//! let mut viewer = DocumentViewer::new(AppConfig::default());
//! viewer.load_conllu(source).unwrap();
//!
//! let outline = viewer.current_view(ViewMode::Text).unwrap().render().unwrap();
//! assert!(outline.contains("ⲡⲛⲟⲩⲧⲉ"));
//! assert!(viewer.navigate(Navigation::Next).is_ok());
//! ```

pub mod annotate;
pub mod config;
pub mod export;
pub mod layout;
pub mod lint;
pub mod navigator;
pub mod structure;

mod error;

pub use coptree_core::{color, geometry, label, record, translit};
pub use coptree_parser::{SourceSentence, Span, error as diagnostic};

pub use error::{CoptreeError, NavigationError};

use std::{fmt, str::FromStr};

use log::{debug, info};

use coptree_core::record::SentenceBatch;
use coptree_parser::{
    error::Diagnostic,
    read_conllu,
    segment::BoundarySignal,
    validate::{ValidationError, empty_batch_diagnostic},
};

use annotate::Tagger;
use config::AppConfig;
use export::{
    Exporter,
    conllu::{self, ConlluExporter},
    graph::{GraphDescription, GraphExporter},
    html::HtmlDocument,
    svg::Svg,
    table::{Table, TableExporter},
    text::{TextExporter, TextOutline},
};
use layout::{EngineBuilder, TreeLayout};
use navigator::{Navigator, SentenceEntry};
use structure::DependencyTree;

/// The per-sentence views a [`DocumentViewer`] can produce.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Column-aligned outline (default)
    #[default]
    Text,
    /// Graph description as JSON
    Graph,
    /// HTML table
    Table,
    Svg,
    Conllu,
}

impl FromStr for ViewMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "graph" => Ok(Self::Graph),
            "table" => Ok(Self::Table),
            "svg" => Ok(Self::Svg),
            "conllu" => Ok(Self::Conllu),
            _ => Err("Unsupported view mode"),
        }
    }
}

impl From<ViewMode> for &'static str {
    fn from(val: ViewMode) -> Self {
        match val {
            ViewMode::Text => "text",
            ViewMode::Graph => "graph",
            ViewMode::Table => "table",
            ViewMode::Svg => "svg",
            ViewMode::Conllu => "conllu",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// A cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
    /// Zero-based sentence position.
    Jump(usize),
}

/// One rendered sentence.
#[derive(Debug)]
pub enum View {
    Text(TextOutline),
    Graph(GraphDescription),
    Table(Table),
    Svg(svg::Document),
    Conllu(String),
    /// A sentence that could not be parsed, in place of any other view.
    Unparseable(String),
}

impl View {
    /// Renders the view as text ready to print or write.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a graph description cannot be
    /// serialised.
    pub fn render(&self) -> Result<String, export::Error> {
        Ok(match self {
            View::Text(outline) => outline.to_string(),
            View::Graph(graph) => graph.to_json()?,
            View::Table(table) => table.to_html(),
            View::Svg(doc) => doc.to_string(),
            View::Conllu(block) => block.clone(),
            View::Unparseable(message) => message.clone(),
        })
    }
}

/// Findings of the grammar lint for one sentence.
#[derive(Debug, Clone, Default)]
pub struct LintReport {
    pub diagnostics: Vec<Diagnostic>,
    pub patterns: Vec<lint::Pattern>,
}

/// Loads a document and renders views of its sentences.
///
/// Sentences that cannot be parsed stay in the document as navigable
/// entries; loading only fails when the input as a whole is unusable.
#[derive(Debug, Default)]
pub struct DocumentViewer {
    config: AppConfig,
    navigator: Navigator,
    sources: Vec<SourceSentence>,
    source_text: Option<String>,
}

impl DocumentViewer {
    /// Create a viewer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// The CoNLL-U text of the current document, if it was read from one.
    pub fn source_text(&self) -> Option<&str> {
        self.source_text.as_deref()
    }

    /// Loads already tagged sentences, replacing the current document.
    ///
    /// # Errors
    ///
    /// Returns [`CoptreeError::Navigation`] if there are no sentences; the
    /// current document is kept.
    pub fn load_document<I>(&mut self, batches: I) -> Result<usize, CoptreeError>
    where
        I: IntoIterator<Item = SentenceBatch>,
    {
        let count = self.navigator.load(batches)?;
        self.sources.clear();
        self.source_text = None;
        Ok(count)
    }

    /// Reads a CoNLL-U document and loads its sentences.
    ///
    /// # Errors
    ///
    /// Returns [`CoptreeError::Parse`] carrying every syntax error of the
    /// file, or [`CoptreeError::Navigation`] if the file holds no
    /// sentences. The current document is kept in both cases.
    pub fn load_conllu(&mut self, source: &str) -> Result<usize, CoptreeError> {
        info!("Reading CoNLL-U document");
        let sentences =
            read_conllu(source).map_err(|err| CoptreeError::new_parse_error(err, source))?;
        debug!(sentences = sentences.len(); "Document read");

        let count = self
            .navigator
            .load(sentences.iter().map(|sentence| sentence.batch().clone()))?;
        self.sources = sentences;
        self.source_text = Some(source.to_string());
        Ok(count)
    }

    /// Segments and tags raw text, then loads the resulting sentences.
    ///
    /// # Errors
    ///
    /// Returns [`CoptreeError::Navigation`] if the text holds no sentences.
    pub fn load_text(
        &mut self,
        text: &str,
        signal: &impl BoundarySignal,
        tagger: &impl Tagger,
    ) -> Result<usize, CoptreeError> {
        self.load_document(annotate::annotate_document(text, signal, tagger))
    }

    /// Moves the cursor and returns the sentence now under it.
    ///
    /// # Errors
    ///
    /// Returns [`CoptreeError::Navigation`] if no document is loaded or a
    /// jump is out of range; the cursor does not move.
    pub fn navigate(&mut self, navigation: Navigation) -> Result<&SentenceEntry, CoptreeError> {
        let len = self.navigator.len();
        let entry = match navigation {
            Navigation::Next => self.navigator.next(),
            Navigation::Previous => self.navigator.previous(),
            Navigation::Jump(index) => Some(self.navigator.jump(index)?),
        };
        debug!(navigation:? = navigation, sentences = len; "Cursor moved");
        entry.ok_or(CoptreeError::Navigation(NavigationError::EmptyDocument))
    }

    /// Renders the sentence under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`CoptreeError::Navigation`] if no document is loaded, or
    /// an export error if rendering fails.
    pub fn current_view(&self, mode: ViewMode) -> Result<View, CoptreeError> {
        self.view(self.navigator.current_index(), mode)
    }

    /// Renders the sentence at zero-based `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CoptreeError::Navigation`] if `index` is out of range, or
    /// an export error if rendering fails.
    pub fn view(&self, index: usize, mode: ViewMode) -> Result<View, CoptreeError> {
        let entry = self.entry(index)?;
        let tree = match entry {
            SentenceEntry::Tree(tree) => tree,
            SentenceEntry::Unparseable(sentence) => {
                let message = sentence.to_string();
                return Ok(match mode {
                    ViewMode::Svg => View::Svg(Svg::new().render_message(&message)),
                    ViewMode::Conllu => View::Conllu(conllu::document(std::slice::from_ref(entry))),
                    _ => View::Unparseable(message),
                });
            }
        };

        let layout = self.layout(tree);
        let transliterate = self.config.render().transliterate();
        let view = match mode {
            ViewMode::Text => View::Text(
                TextExporter::new()
                    .with_transliteration(transliterate)
                    .export_tree(tree, &layout)?,
            ),
            ViewMode::Graph => View::Graph(
                GraphExporter::new()
                    .with_transliteration(transliterate)
                    .export_tree(tree, &layout)?,
            ),
            ViewMode::Table => View::Table(TableExporter::new().export_tree(tree, &layout)?),
            ViewMode::Svg => View::Svg(
                Svg::from_style(self.config.style())?
                    .with_transliteration(transliterate)
                    .export_tree(tree, &layout)?,
            ),
            ViewMode::Conllu => View::Conllu(ConlluExporter::new().export_tree(tree, &layout)?),
        };
        Ok(view)
    }

    /// Renders every sentence into one HTML page.
    ///
    /// # Errors
    ///
    /// Returns [`CoptreeError::Navigation`] if no document is loaded.
    pub fn html_document(&self) -> Result<String, CoptreeError> {
        if self.navigator.is_empty() {
            return Err(NavigationError::EmptyDocument.into());
        }
        let mut document = HtmlDocument::new(self.config.render().html_title())
            .with_stats(self.navigator.stats());
        for (position, entry) in self.navigator.entries().iter().enumerate() {
            match entry {
                SentenceEntry::Tree(tree) => {
                    let layout = self.layout(tree);
                    let table = TableExporter::new().export_tree(tree, &layout)?;
                    document.push_table(position + 1, &table);
                }
                SentenceEntry::Unparseable(sentence) => document.push_unparseable(sentence),
            }
        }
        Ok(document.finish())
    }

    /// Writes the whole document back as CoNLL-U.
    ///
    /// # Errors
    ///
    /// Returns [`CoptreeError::Navigation`] if no document is loaded.
    pub fn conllu_document(&self) -> Result<String, CoptreeError> {
        if self.navigator.is_empty() {
            return Err(NavigationError::EmptyDocument.into());
        }
        Ok(conllu::document(self.navigator.entries()))
    }

    /// Runs the grammar lint over the sentence at `index`. Disabled lints
    /// and unparseable sentences give an empty report.
    ///
    /// # Errors
    ///
    /// Returns [`CoptreeError::Navigation`] if `index` is out of range.
    pub fn lint(&self, index: usize) -> Result<LintReport, CoptreeError> {
        let entry = self.entry(index)?;
        match entry.tree() {
            Some(tree) if self.config.lint().enabled() => Ok(LintReport {
                diagnostics: lint::check(tree, self.sources.get(index)),
                patterns: lint::patterns(tree),
            }),
            _ => Ok(LintReport::default()),
        }
    }

    /// Collects the structural findings of every sentence in document
    /// order: validation errors, empty sentence warnings and, when
    /// enabled, grammar lint warnings.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for (position, entry) in self.navigator.entries().iter().enumerate() {
            let source = self.sources.get(position);
            match entry {
                SentenceEntry::Unparseable(sentence) => {
                    diagnostics.push(sentence.error().to_diagnostic(source));
                }
                SentenceEntry::Tree(tree) if tree.is_placeholder() => {
                    diagnostics.push(empty_batch_diagnostic(source));
                }
                SentenceEntry::Tree(tree) => {
                    if self.config.lint().enabled() {
                        diagnostics.extend(lint::check(tree, source));
                    }
                }
            }
        }
        diagnostics
    }

    /// The validation error of every unparseable sentence with its
    /// one-based number.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &ValidationError)> {
        self.navigator
            .entries()
            .iter()
            .filter_map(SentenceEntry::unparseable)
            .map(|sentence| (sentence.number(), sentence.error()))
    }

    fn entry(&self, index: usize) -> Result<&SentenceEntry, CoptreeError> {
        if self.navigator.is_empty() {
            return Err(NavigationError::EmptyDocument.into());
        }
        self.navigator.get(index).ok_or(CoptreeError::Navigation(
            NavigationError::OutOfRange {
                requested: index,
                len: self.navigator.len(),
            },
        ))
    }

    fn layout(&self, tree: &DependencyTree) -> TreeLayout {
        let layout_config = self.config.layout();
        EngineBuilder::from_config(layout_config).build(tree, layout_config.engine())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coptree_core::record::TokenRecord;

    #[test]
    fn test_view_mode_from_str() {
        for mode in [
            ViewMode::Text,
            ViewMode::Graph,
            ViewMode::Table,
            ViewMode::Svg,
            ViewMode::Conllu,
        ] {
            assert_eq!(mode.to_string().parse::<ViewMode>(), Ok(mode));
        }
        assert_eq!("html".parse::<ViewMode>(), Err("Unsupported view mode"));
    }

    #[test]
    fn test_empty_viewer() {
        let mut viewer = DocumentViewer::default();
        assert!(matches!(
            viewer.current_view(ViewMode::Text),
            Err(CoptreeError::Navigation(NavigationError::EmptyDocument))
        ));
        assert!(matches!(
            viewer.navigate(Navigation::Next),
            Err(CoptreeError::Navigation(NavigationError::EmptyDocument))
        ));
        assert!(viewer.html_document().is_err());
        assert!(viewer.diagnostics().is_empty());
    }

    #[test]
    fn test_unparseable_view_shows_reason() {
        let mut viewer = DocumentViewer::default();
        viewer
            .load_document(vec![SentenceBatch::new(vec![
                TokenRecord::new(1, "ⲁ", "ⲁ", "X", 0, "root"),
                TokenRecord::new(2, "ⲃ", "ⲃ", "X", 0, "root"),
            ])])
            .unwrap();
        let rendered = viewer
            .current_view(ViewMode::Table)
            .unwrap()
            .render()
            .unwrap();
        assert_eq!(
            rendered,
            "sentence 1 could not be parsed: sentence has 2 roots, expected exactly one"
        );
        let svg = viewer.current_view(ViewMode::Svg).unwrap().render().unwrap();
        assert!(svg.contains("could not be parsed"));
        assert_eq!(viewer.failures().count(), 1);
    }

    #[test]
    fn test_lint_respects_config() {
        let batch = SentenceBatch::new(vec![
            TokenRecord::new(1, "ⲡⲉ", "ⲡⲉ", "AUX", 0, "root"),
            TokenRecord::new(2, "ϩⲓ", "ϩⲓ", "ADP", 1, "nsubj"),
        ]);

        let mut viewer = DocumentViewer::default();
        viewer.load_document(vec![batch.clone()]).unwrap();
        assert_eq!(viewer.lint(0).unwrap().diagnostics.len(), 1);
        assert_eq!(viewer.diagnostics().len(), 1);

        let config = AppConfig::new(
            config::LayoutConfig::default(),
            config::RenderConfig::default(),
            config::StyleConfig::default(),
            config::LintConfig::new(false),
        );
        let mut viewer = DocumentViewer::new(config);
        viewer.load_document(vec![batch]).unwrap();
        assert!(viewer.lint(0).unwrap().diagnostics.is_empty());
        assert!(viewer.diagnostics().is_empty());
    }
}
