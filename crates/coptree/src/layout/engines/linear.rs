//! Surface-order layout: each token keeps its own column, so the sentence
//! reads left to right along the bottom of every level.

use crate::{
    layout::{LayoutNode, engines::TreeEngine},
    structure::DependencyTree,
};

#[derive(Debug, Default)]
pub struct Linear;

impl Linear {
    pub fn new() -> Self {
        Self
    }
}

impl TreeEngine for Linear {
    fn calculate(&self, tree: &DependencyTree) -> Vec<LayoutNode> {
        tree.nodes()
            .iter()
            .enumerate()
            .map(|(position, node)| LayoutNode::new(position as u32, node.depth()))
            .collect()
    }
}
