//! Layered tree layout.
//!
//! Leaves take consecutive columns from left to right in depth-first order.
//! Every head is then centred over its dependents, bottom-up: its column is
//! the midpoint (rounded down) of the columns of its outermost dependents.
//! A subtree therefore never leaves the column range of its own leaves, so
//! sibling subtrees cannot overlap. Levels are tree depths.

use crate::{
    layout::{LayoutNode, engines::TreeEngine},
    structure::DependencyTree,
};

#[derive(Debug, Default)]
pub struct Layered;

impl Layered {
    pub fn new() -> Self {
        Self
    }
}

impl TreeEngine for Layered {
    fn calculate(&self, tree: &DependencyTree) -> Vec<LayoutNode> {
        let mut columns = vec![0u32; tree.len()];
        let mut next_leaf = 0;

        // Post-order visits leaves in the same order as pre-order and every
        // dependent before its head.
        for position in tree.post_order() {
            let children = tree.children(position);
            let first = children.iter().map(|&child| columns[child]).min();
            let last = children.iter().map(|&child| columns[child]).max();
            columns[position] = match first.zip(last) {
                Some((first, last)) => first + (last - first) / 2,
                None => {
                    next_leaf += 1;
                    next_leaf - 1
                }
            };
        }

        tree.nodes()
            .iter()
            .zip(columns)
            .map(|(node, column)| LayoutNode::new(column, node.depth()))
            .collect()
    }
}
