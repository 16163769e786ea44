//! Dependency tree construction.
//!
//! A [`DependencyTree`] is built once from a [`ValidatedBatch`] and is
//! read-only afterwards. Nodes are stored in surface order and addressed
//! by their *position* in that order, which is independent of the token
//! indices (those may have gaps).

use std::collections::HashMap;

use log::trace;

use coptree_core::record::{ROOT_HEAD, SentenceBatch, TokenRecord};
use coptree_parser::validate::ValidatedBatch;

/// A token together with its place in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    record: TokenRecord,
    parent: Option<usize>,
    children: Vec<usize>,
    depth: u32,
}

impl TreeNode {
    pub fn record(&self) -> &TokenRecord {
        &self.record
    }

    /// Surface position of the head, `None` for the root.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Surface positions of the dependents, in surface order.
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Number of edges between this node and the root.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// One sentence as a rooted tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTree {
    id: Option<String>,
    text: String,
    nodes: Vec<TreeNode>,
    root: usize,
    placeholder: bool,
}

impl DependencyTree {
    /// Builds the tree for a validated batch in linear time.
    ///
    /// # Examples
    ///
    /// ```
    /// use coptree::structure::DependencyTree;
    /// use coptree_core::record::{SentenceBatch, TokenRecord};
    /// use coptree_parser::validate::{Validated, validate};
    ///
    /// let batch = SentenceBatch::new(vec![
    ///     TokenRecord::new(1, "ⲁⲛⲟⲕ", "ⲁⲛⲟⲕ", "PRON", 2, "nsubj"),
    ///     TokenRecord::new(2, "ⲡⲉ", "ⲡⲉ", "AUX", 0, "root"),
    ///     TokenRecord::new(3, "ⲡⲛⲟⲩⲧⲉ", "ⲛⲟⲩⲧⲉ", "NOUN", 2, "nsubj"),
    /// ]);
    /// let Ok(Validated::Tree(validated)) = validate(batch) else {
    ///     panic!("sentence is a tree");
    /// };
    ///
    /// let tree = DependencyTree::build(validated);
    /// assert_eq!(tree.root().index(), 2);
    /// assert_eq!(tree.children(tree.root_position()), &[0, 2]);
    /// ```
    pub fn build(batch: ValidatedBatch) -> Self {
        let batch = batch.into_batch();
        let id = batch.id().map(str::to_string);
        let text = batch.display_text();
        let mut records = batch.into_records();
        // Arrival order is not surface order; indices are unique here.
        records.sort_by_key(TokenRecord::index);

        let positions: HashMap<u32, usize> = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.index(), position))
            .collect();

        let mut root = 0;
        let mut parents = vec![None; records.len()];
        let mut children = vec![Vec::new(); records.len()];
        // Visiting records in surface order keeps every child list sorted.
        for (position, record) in records.iter().enumerate() {
            if record.head() == ROOT_HEAD {
                root = position;
                continue;
            }
            if let Some(&parent) = positions.get(&record.head()) {
                parents[position] = Some(parent);
                children[parent].push(position);
            }
        }

        let mut nodes: Vec<TreeNode> = records
            .into_iter()
            .zip(parents)
            .zip(children)
            .map(|((record, parent), children)| TreeNode {
                record,
                parent,
                children,
                depth: 0,
            })
            .collect();

        let mut stack = vec![root];
        while let Some(position) = stack.pop() {
            let depth = nodes[position].depth + 1;
            for child in nodes[position].children.clone() {
                nodes[child].depth = depth;
                stack.push(child);
            }
        }

        trace!(tokens = nodes.len(), root = root; "Dependency tree built");

        Self {
            id,
            text,
            nodes,
            root,
            placeholder: false,
        }
    }

    /// Builds the stand-in tree for a sentence without tokens: one
    /// synthetic root with form `_`, tag `X` and relation `root`.
    pub fn placeholder(batch: &SentenceBatch) -> Self {
        let record = TokenRecord::new(1, "_", "_", "X", ROOT_HEAD, "root");
        Self {
            id: batch.id().map(str::to_string),
            text: batch.text().unwrap_or_default().to_string(),
            nodes: vec![TreeNode {
                record,
                parent: None,
                children: Vec::new(),
                depth: 0,
            }],
            root: 0,
            placeholder: true,
        }
    }

    /// Returns `true` for the stand-in tree of an empty sentence.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// The `# sent_id` of the sentence, if it had one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The sentence text, or its forms joined by spaces.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root_position(&self) -> usize {
        self.root
    }

    pub fn root(&self) -> &TokenRecord {
        &self.nodes[self.root].record
    }

    /// Nodes in surface order.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn node(&self, position: usize) -> Option<&TreeNode> {
        self.nodes.get(position)
    }

    /// Records in surface order.
    pub fn records(&self) -> impl Iterator<Item = &TokenRecord> {
        self.nodes.iter().map(TreeNode::record)
    }

    /// Surface position of the token with `index`.
    pub fn position_of(&self, index: u32) -> Option<usize> {
        self.nodes
            .iter()
            .position(|node| node.record.index() == index)
    }

    /// Dependents of the node at `position`; empty when out of range.
    pub fn children(&self, position: usize) -> &[usize] {
        self.nodes
            .get(position)
            .map(TreeNode::children)
            .unwrap_or_default()
    }

    pub fn parent(&self, position: usize) -> Option<usize> {
        self.nodes.get(position).and_then(TreeNode::parent)
    }

    /// The head token of the node at `position`, `None` for the root.
    pub fn head_record(&self, position: usize) -> Option<&TokenRecord> {
        self.parent(position).map(|parent| &self.nodes[parent].record)
    }

    pub fn depth(&self, position: usize) -> Option<u32> {
        self.nodes.get(position).map(TreeNode::depth)
    }

    /// Depth of the deepest node.
    pub fn max_depth(&self) -> u32 {
        self.nodes.iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    /// Positions in depth-first pre-order from the root, siblings in
    /// surface order.
    pub fn pre_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(position) = stack.pop() {
            order.push(position);
            stack.extend(self.nodes[position].children.iter().rev());
        }
        order
    }

    /// Positions in depth-first post-order, siblings in surface order.
    pub fn post_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root, false)];
        while let Some((position, expanded)) = stack.pop() {
            if expanded {
                order.push(position);
                continue;
            }
            stack.push((position, true));
            for &child in self.nodes[position].children.iter().rev() {
                stack.push((child, false));
            }
        }
        order
    }
}


#[cfg(test)]
pub(crate) mod proptest_tests {
    use super::*;
    use coptree_parser::validate::{Validated, validate};
    use proptest::prelude::*;
    use proptest::sample::Index;
    use proptest::test_runner::TestCaseError;

    /// Generates projective trees: each token's head is chosen so no two
    /// arcs cross, built by recursively splitting the surface span. The
    /// records reach the validator in shuffled order.
    pub(crate) fn projective_tree() -> impl Strategy<Value = DependencyTree> {
        (1usize..24)
            .prop_flat_map(|len| {
                // One choice per head pick and one per span split.
                prop::collection::vec(any::<Index>(), 2 * len)
                    .prop_map(move |choices| projective_records(len, &choices))
            })
            .prop_flat_map(|records| Just(records).prop_shuffle())
            .prop_map(|records| match validate(SentenceBatch::new(records)) {
                Ok(Validated::Tree(batch)) => DependencyTree::build(batch),
                _ => unreachable!("generated heads always form a tree"),
            })
    }

    fn projective_records(len: usize, choices: &[Index]) -> Vec<TokenRecord> {
        let mut heads = vec![0u32; len];
        let mut choices = choices.iter();
        attach_span(&mut heads, 0, len, 0, &mut choices);
        heads
            .iter()
            .enumerate()
            .map(|(position, &head)| {
                let index = position as u32 + 1;
                let relation = if head == 0 { "root" } else { "dep" };
                TokenRecord::new(index, format!("w{index}"), "", "X", head, relation)
            })
            .collect()
    }

    fn pick(choices: &mut std::slice::Iter<'_, Index>, size: usize) -> usize {
        choices.next().map_or(0, |choice| choice.index(size))
    }

    // Picks a head inside `start..end`, attaches it to `parent` and recurses
    // into the spans on either side of it.
    fn attach_span(
        heads: &mut [u32],
        start: usize,
        end: usize,
        parent: u32,
        choices: &mut std::slice::Iter<'_, Index>,
    ) {
        if start >= end {
            return;
        }
        let head = start + pick(choices, end - start);
        heads[head] = parent;
        let index = head as u32 + 1;
        let mut split = start;
        while split < head {
            let stop = split + 1 + pick(choices, head - split);
            attach_span(heads, split, stop, index, choices);
            split = stop;
        }
        let mut split = head + 1;
        while split < end {
            let stop = split + 1 + pick(choices, end - split);
            attach_span(heads, split, stop, index, choices);
            split = stop;
        }
    }

    fn check_traversal_visits_every_node_once(tree: &DependencyTree) -> Result<(), TestCaseError> {
        let roots = tree.records().filter(|record| record.is_root()).count();
        prop_assert_eq!(roots, 1);

        let mut order = tree.pre_order();
        prop_assert_eq!(order.len(), tree.len());
        order.sort_unstable();
        order.dedup();
        prop_assert_eq!(order.len(), tree.len());
        Ok(())
    }

    fn check_heads_reach_root(tree: &DependencyTree) -> Result<(), TestCaseError> {
        for start in 0..tree.len() {
            let mut position = start;
            let mut steps = 0;
            while let Some(parent) = tree.parent(position) {
                position = parent;
                steps += 1;
                prop_assert!(steps <= tree.len(), "head chain from {} never ends", start);
            }
            prop_assert_eq!(position, tree.root_position());
            prop_assert_eq!(tree.depth(start), Some(steps as u32));
        }
        Ok(())
    }

    fn check_children_sorted(tree: &DependencyTree) -> Result<(), TestCaseError> {
        for node in tree.nodes() {
            prop_assert!(node.children().windows(2).all(|pair| pair[0] < pair[1]));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn test_traversal_visits_every_node_once(tree in projective_tree()) {
            check_traversal_visits_every_node_once(&tree)?;
        }

        #[test]
        fn test_heads_reach_root(tree in projective_tree()) {
            check_heads_reach_root(&tree)?;
        }

        #[test]
        fn test_children_sorted(tree in projective_tree()) {
            check_children_sorted(&tree)?;
        }
    }
}
