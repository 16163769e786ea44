//! Plain-text outline of a sentence.
//!
//! Columns are padded by display width rather than by byte or char count,
//! so Coptic forms written with combining overlines still line up.

use std::fmt;

use unicode_width::UnicodeWidthStr;

use coptree_core::{record::TokenRecord, translit::transliterate};

use super::{Error, Exporter};
use crate::{layout::TreeLayout, structure::DependencyTree};

const HEADERS: [&str; 6] = ["ID", "FORM", "LEMMA", "UPOS", "HEAD", "DEPREL"];
const LATIN_HEADER: &str = "LATIN";
const GAP: &str = "  ";

/// Column-aligned outline: a header and one line per token in surface
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOutline {
    header: String,
    lines: Vec<String>,
}

impl TextOutline {
    pub fn header(&self) -> &str {
        &self.header
    }

    /// One line per token, in surface order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for TextOutline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Renders [`TextOutline`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter {
    transliterate: bool,
}

impl TextExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a Latin transliteration column.
    pub fn with_transliteration(mut self, transliterate: bool) -> Self {
        self.transliterate = transliterate;
        self
    }

    fn cells(&self, record: &TokenRecord) -> Vec<String> {
        let mut cells = vec![
            record.index().to_string(),
            record.form().to_string(),
            record.lemma().to_string(),
            record.pos_tag().to_string(),
            record.head().to_string(),
            record.relation().to_string(),
        ];
        if self.transliterate {
            cells.push(transliterate(record.form()));
        }
        cells
    }
}

impl Exporter for TextExporter {
    type Output = TextOutline;

    fn export_tree(
        &self,
        tree: &DependencyTree,
        _layout: &TreeLayout,
    ) -> Result<TextOutline, Error> {
        let mut header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
        if self.transliterate {
            header.push(LATIN_HEADER.to_string());
        }
        let rows: Vec<Vec<String>> = tree.records().map(|record| self.cells(record)).collect();

        let mut widths: Vec<usize> = header.iter().map(|cell| cell.width()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        Ok(TextOutline {
            header: align(&header, &widths),
            lines: rows.iter().map(|row| align(row, &widths)).collect(),
        })
    }
}

fn align(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (cell, width) in cells.iter().zip(widths) {
        if !line.is_empty() {
            line.push_str(GAP);
        }
        line.push_str(cell);
        line.extend(std::iter::repeat_n(' ', width.saturating_sub(cell.width())));
    }
    line.truncate(line.trim_end().len());
    line
}

/// Describes every arc as `form (UPOS) --relation--> head form`, the root
/// pointing at `ROOT`.
pub fn arc_lines(tree: &DependencyTree) -> Vec<String> {
    tree.nodes()
        .iter()
        .enumerate()
        .map(|(position, node)| {
            let record = node.record();
            let head = tree
                .head_record(position)
                .map_or("ROOT", TokenRecord::form);
            format!(
                "{} ({}) --{}--> {}",
                record.form(),
                record.pos_tag(),
                record.relation(),
                head
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{EngineBuilder, LayoutEngine};
    use coptree_core::record::SentenceBatch;
    use coptree_parser::validate::{Validated, validate};

    fn copula_sentence() -> DependencyTree {
        let batch = SentenceBatch::new(vec![
            TokenRecord::new(1, "ⲁⲛⲟⲕ", "ⲁⲛⲟⲕ", "PRON", 2, "nsubj"),
            TokenRecord::new(2, "ⲡⲉ", "ⲡⲉ", "AUX", 0, "root"),
            TokenRecord::new(3, "ⲡⲛⲟⲩⲧⲉ", "ⲛⲟⲩⲧⲉ", "NOUN", 2, "nsubj"),
        ]);
        let Ok(Validated::Tree(batch)) = validate(batch) else {
            panic!("sentence is a tree");
        };
        DependencyTree::build(batch)
    }

    fn outline(exporter: TextExporter, tree: &DependencyTree) -> TextOutline {
        let layout = EngineBuilder::new().build(tree, LayoutEngine::Layered);
        exporter.export_tree(tree, &layout).unwrap()
    }

    #[test]
    fn test_outline_lines() {
        let outline = outline(TextExporter::new(), &copula_sentence());
        assert_eq!(outline.header(), "ID  FORM    LEMMA  UPOS  HEAD  DEPREL");
        assert_eq!(
            outline.lines(),
            &[
                "1   ⲁⲛⲟⲕ    ⲁⲛⲟⲕ   PRON  2     nsubj",
                "2   ⲡⲉ      ⲡⲉ     AUX   0     root",
                "3   ⲡⲛⲟⲩⲧⲉ  ⲛⲟⲩⲧⲉ  NOUN  2     nsubj",
            ]
        );
    }

    #[test]
    fn test_combining_marks_do_not_break_alignment() {
        let batch = SentenceBatch::new(vec![
            TokenRecord::new(1, "ⲡ\u{0305}ⲥ\u{0305}", "ⲡⲟⲉⲓⲥ", "PROPN", 2, "nsubj"),
            TokenRecord::new(2, "ⲡⲉ", "ⲡⲉ", "AUX", 0, "root"),
        ]);
        let Ok(Validated::Tree(batch)) = validate(batch) else {
            panic!("sentence is a tree");
        };
        let outline = outline(TextExporter::new(), &DependencyTree::build(batch));
        assert_eq!(
            outline.lines(),
            &[
                "1   ⲡ\u{0305}ⲥ\u{0305}    ⲡⲟⲉⲓⲥ  PROPN  2     nsubj",
                "2   ⲡⲉ    ⲡⲉ     AUX    0     root",
            ]
        );
    }

    #[test]
    fn test_transliteration_column() {
        let outline = outline(
            TextExporter::new().with_transliteration(true),
            &copula_sentence(),
        );
        assert!(outline.header().ends_with("LATIN"));
        assert!(outline.lines()[0].ends_with("anok"));
    }

    #[test]
    fn test_arc_lines() {
        assert_eq!(
            arc_lines(&copula_sentence()),
            vec![
                "ⲁⲛⲟⲕ (PRON) --nsubj--> ⲡⲉ",
                "ⲡⲉ (AUX) --root--> ROOT",
                "ⲡⲛⲟⲩⲧⲉ (NOUN) --nsubj--> ⲡⲉ",
            ]
        );
    }

    #[test]
    fn test_display_includes_header() {
        let outline = outline(TextExporter::new(), &copula_sentence());
        let rendered = outline.to_string();
        assert_eq!(rendered.lines().count(), 4);
        assert!(rendered.starts_with("ID"));
    }
}
