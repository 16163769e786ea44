//! Graph description of a sentence: node positions and labelled
//! child→head edges.
//!
//! This is data, not pixels. The SVG renderer draws from it, and the CLI
//! serialises it to JSON for external drawing tools.

use serde::Serialize;

use coptree_core::{label::Label, translit::transliterate};

use super::{Error, Exporter};
use crate::{
    layout::{Orientation, TreeLayout},
    structure::DependencyTree,
};

/// One token placed on the layout grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub index: u32,
    pub form: String,
    pub lemma: String,
    pub pos_tag: Label,
    pub head: u32,
    pub relation: Label,
    pub column: u32,
    pub level: u32,
    /// Drawing coordinates derived from the grid cell and spacing.
    pub x: f32,
    pub y: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latin: Option<String>,
}

impl GraphNode {
    pub fn is_root(&self) -> bool {
        self.head == 0
    }
}

/// A dependency arc from a dependent to its head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    /// Index of the dependent.
    pub from: u32,
    /// Index of the head.
    pub to: u32,
    pub relation: Label,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
    pub orientation: Orientation,
    pub columns: u32,
    pub levels: u32,
    pub root: u32,
    /// Nodes in surface order.
    pub nodes: Vec<GraphNode>,
    /// Edges in surface order of their dependents; the root has none.
    pub edges: Vec<GraphEdge>,
}

impl GraphDescription {
    pub fn node(&self, index: u32) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.index == index)
    }

    /// Serialises the description as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|err| Error::Render(err.to_string()))
    }
}

/// Renders [`GraphDescription`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphExporter {
    transliterate: bool,
}

impl GraphExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a Latin reading to every node.
    pub fn with_transliteration(mut self, transliterate: bool) -> Self {
        self.transliterate = transliterate;
        self
    }
}

impl Exporter for GraphExporter {
    type Output = GraphDescription;

    fn export_tree(
        &self,
        tree: &DependencyTree,
        layout: &TreeLayout,
    ) -> Result<GraphDescription, Error> {
        if layout.len() != tree.len() {
            return Err(Error::Render(format!(
                "layout has {} cells for {} tokens",
                layout.len(),
                tree.len()
            )));
        }

        let mut nodes = Vec::with_capacity(tree.len());
        let mut edges = Vec::with_capacity(tree.len().saturating_sub(1));
        for (position, record) in tree.records().enumerate() {
            let cell = layout.node(position).unwrap_or_default();
            let point = layout.point(position).unwrap_or_default();
            nodes.push(GraphNode {
                index: record.index(),
                form: record.form().to_string(),
                lemma: record.lemma().to_string(),
                pos_tag: record.pos_tag(),
                head: record.head(),
                relation: record.relation(),
                column: cell.column(),
                level: cell.level(),
                x: point.x(),
                y: point.y(),
                latin: self.transliterate.then(|| transliterate(record.form())),
            });
            if let Some(head) = tree.head_record(position) {
                edges.push(GraphEdge {
                    from: record.index(),
                    to: head.index(),
                    relation: record.relation(),
                });
            }
        }

        Ok(GraphDescription {
            id: tree.id().map(str::to_string),
            text: tree.text().to_string(),
            orientation: layout.orientation(),
            columns: layout.columns(),
            levels: layout.levels(),
            root: tree.root().index(),
            nodes,
            edges,
        })
    }
}
