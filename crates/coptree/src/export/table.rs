//! Tabular view of a sentence.
//!
//! A [`Table`] carries the outline fields plus each token's depth level,
//! the head's form and the morphological features. It renders as an HTML
//! `<table>` and is what document exports are assembled from.

use std::fmt::Write;

use serde::Serialize;

use coptree_core::label::Label;

use super::{Error, Exporter, html::escape};
use crate::{layout::TreeLayout, structure::DependencyTree};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub index: u32,
    pub form: String,
    pub lemma: String,
    pub pos_tag: Label,
    pub head: u32,
    /// Form of the head token, `None` for the root.
    pub head_form: Option<String>,
    pub relation: Label,
    pub level: u32,
    pub feats: Option<String>,
}

impl TableRow {
    pub fn is_root(&self) -> bool {
        self.head == 0
    }
}

/// Rows in surface order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub id: Option<String>,
    pub text: String,
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Renders the rows as an HTML table; the root row carries the `root`
    /// class.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<table class=\"dependency-table\">\n");
        html.push_str(
            "<thead><tr><th>ID</th><th>Form</th><th>Lemma</th><th>UPOS</th>\
             <th>Head</th><th>Relation</th><th>Level</th><th>Features</th></tr></thead>\n",
        );
        html.push_str("<tbody>\n");
        for row in &self.rows {
            let class = if row.is_root() { " class=\"root\"" } else { "" };
            let head = match &row.head_form {
                Some(form) => format!("{} ({})", row.head, escape(form)),
                None => format!("{} (ROOT)", row.head),
            };
            // Writing into a String cannot fail.
            let _ = writeln!(
                html,
                "<tr{class}><td>{}</td><td class=\"form\">{}</td><td>{}</td><td>{}</td>\
                 <td>{head}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                row.index,
                escape(&row.form),
                escape(&row.lemma),
                escape(&row.pos_tag.to_string()),
                escape(&row.relation.to_string()),
                row.level,
                escape(row.feats.as_deref().unwrap_or("_")),
            );
        }
        html.push_str("</tbody>\n</table>\n");
        html
    }
}

/// Renders [`Table`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableExporter;

impl TableExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for TableExporter {
    type Output = Table;

    fn export_tree(&self, tree: &DependencyTree, layout: &TreeLayout) -> Result<Table, Error> {
        let rows = tree
            .records()
            .enumerate()
            .map(|(position, record)| {
                let level = layout.node(position).map(|cell| cell.level()).ok_or_else(|| {
                    Error::Render(format!("no layout cell for token {}", record.index()))
                })?;
                Ok(TableRow {
                    index: record.index(),
                    form: record.form().to_string(),
                    lemma: record.lemma().to_string(),
                    pos_tag: record.pos_tag(),
                    head: record.head(),
                    head_form: tree.head_record(position).map(|head| head.form().to_string()),
                    relation: record.relation(),
                    level,
                    feats: record.feats().map(str::to_string),
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Table {
            id: tree.id().map(str::to_string),
            text: tree.text().to_string(),
            rows,
        })
    }
}
