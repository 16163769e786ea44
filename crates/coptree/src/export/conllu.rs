//! CoNLL-U export.
//!
//! Writes the ten standard columns with XPOS, DEPS and MISC left empty.
//! Output read back with [`coptree_parser::read_conllu`] yields the same
//! records.

use std::fmt::Write;

use coptree_core::record::TokenRecord;

use super::{Error, Exporter};
use crate::{layout::TreeLayout, navigator::SentenceEntry, structure::DependencyTree};

/// Renders one sentence block: comments, token lines and a closing blank
/// line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConlluExporter;

impl ConlluExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for ConlluExporter {
    type Output = String;

    fn export_tree(&self, tree: &DependencyTree, _layout: &TreeLayout) -> Result<String, Error> {
        Ok(tree_block(tree))
    }
}

/// Renders every entry of a document. Unparseable sentences are written
/// from their original records so nothing is lost.
pub fn document(entries: &[SentenceEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        match entry {
            SentenceEntry::Tree(tree) => out.push_str(&tree_block(tree)),
            SentenceEntry::Unparseable(sentence) => {
                let batch = sentence.batch();
                let records: Vec<&TokenRecord> = batch.records().iter().collect();
                out.push_str(&sentence_block(batch.id(), batch.text(), &records));
            }
        }
    }
    out
}

fn tree_block(tree: &DependencyTree) -> String {
    // A placeholder has no real tokens; only its metadata survives.
    let records: Vec<&TokenRecord> = if tree.is_placeholder() {
        Vec::new()
    } else {
        tree.records().collect()
    };
    sentence_block(tree.id(), Some(tree.text()), &records)
}

fn sentence_block(id: Option<&str>, text: Option<&str>, records: &[&TokenRecord]) -> String {
    let mut block = String::new();
    if let Some(id) = id {
        let _ = writeln!(block, "# sent_id = {id}");
    }
    if let Some(text) = text.filter(|text| !text.is_empty()) {
        let _ = writeln!(block, "# text = {text}");
    }
    for record in records {
        let _ = writeln!(
            block,
            "{}\t{}\t{}\t{}\t_\t{}\t{}\t{}\t_\t_",
            record.index(),
            field(record.form()),
            field(record.lemma()),
            record.pos_tag(),
            record.feats().map_or("_", field),
            record.head(),
            record.relation(),
        );
    }
    block.push('\n');
    block
}

fn field(value: &str) -> &str {
    if value.is_empty() { "_" } else { value }
}
