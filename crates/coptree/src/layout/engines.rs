//! Layout engine factory.
//!
//! Engines are selected by [`LayoutEngine`] and cached by the
//! [`EngineBuilder`], which also attaches orientation and spacing to every
//! layout it builds so renderers can place cells without knowing which
//! engine produced them.

mod layered;
mod linear;

use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    config::LayoutConfig,
    layout::{LayoutEngine, LayoutNode, Orientation, TreeLayout},
    structure::DependencyTree,
};

/// Interface of tree layout engines.
pub trait TreeEngine {
    /// Calculates one cell per token, indexed by surface position.
    fn calculate(&self, tree: &DependencyTree) -> Vec<LayoutNode>;
}

/// Builder for creating and configuring layout engines.
///
/// The builder can be reused across sentences; engines are created on
/// first use and kept.
#[derive(Default)]
pub struct EngineBuilder {
    // Cache for reusing engines
    engines: HashMap<LayoutEngine, Box<dyn TreeEngine>>,

    // Configuration options
    orientation: Orientation,
    column_spacing: f32,
    level_spacing: f32,
}

impl EngineBuilder {
    /// Create a new engine builder with an empty cache and zero spacing
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine builder with orientation and spacing from `config`
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new()
            .with_orientation(config.orientation())
            .with_column_spacing(config.column_spacing())
            .with_level_spacing(config.level_spacing())
    }

    /// Set the direction in which depth levels grow
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the distance between adjacent columns
    pub fn with_column_spacing(mut self, spacing: f32) -> Self {
        self.column_spacing = spacing;
        self
    }

    /// Set the distance between adjacent depth levels
    pub fn with_level_spacing(mut self, spacing: f32) -> Self {
        self.level_spacing = spacing;
        self
    }

    /// Get an engine of the specified type
    pub fn engine(&mut self, engine_type: LayoutEngine) -> &dyn TreeEngine {
        let engine = self.engines.entry(engine_type).or_insert_with(|| {
            trace!(engine:% = engine_type; "Creating layout engine");
            let engine: Box<dyn TreeEngine> = match engine_type {
                LayoutEngine::Layered => Box::new(layered::Layered::new()),
                LayoutEngine::Linear => Box::new(linear::Linear::new()),
            };
            engine
        });
        // Dereference to avoid returning reference to temporary
        &**engine
    }

    /// Lay out `tree` with the engine of type `engine_type`.
    pub fn build(&mut self, tree: &DependencyTree, engine_type: LayoutEngine) -> TreeLayout {
        let nodes = self.engine(engine_type).calculate(tree);
        let layout = TreeLayout::new(nodes)
            .with_orientation(self.orientation)
            .with_spacing(self.column_spacing, self.level_spacing);
        debug!(
            engine:% = engine_type,
            columns = layout.columns(),
            levels = layout.levels();
            "Layout calculated"
        );
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coptree_core::record::{SentenceBatch, TokenRecord};
    use coptree_parser::validate::{Validated, validate};

    fn copula_sentence() -> DependencyTree {
        let batch = SentenceBatch::new(vec![
            TokenRecord::new(1, "ⲁⲛⲟⲕ", "ⲁⲛⲟⲕ", "PRON", 2, "nsubj"),
            TokenRecord::new(2, "ⲡⲉ", "ⲡⲉ", "AUX", 0, "root"),
            TokenRecord::new(3, "ⲡⲛⲟⲩⲧⲉ", "ⲛⲟⲩⲧⲉ", "NOUN", 2, "nsubj"),
        ]);
        match validate(batch) {
            Ok(Validated::Tree(batch)) => DependencyTree::build(batch),
            other => panic!("expected a valid tree, got {other:?}"),
        }
    }

    #[test]
    fn test_builder_attaches_configuration() {
        let config = LayoutConfig::new(LayoutEngine::Layered, Orientation::LeftRight);
        let mut builder = EngineBuilder::from_config(&config);
        let layout = builder.build(&copula_sentence(), LayoutEngine::Layered);
        assert_eq!(layout.orientation(), Orientation::LeftRight);
        assert_eq!(layout.len(), 3);
        // The root sits at level 0, so it lies on the left edge.
        assert_eq!(layout.point(1).map(|point| point.x()), Some(0.0));
    }

    #[test]
    fn test_builder_is_reusable() {
        let mut builder = EngineBuilder::new();
        let tree = copula_sentence();
        let first = builder.build(&tree, LayoutEngine::Linear);
        let second = builder.build(&tree, LayoutEngine::Linear);
        assert_eq!(first, second);
        assert_ne!(first, builder.build(&tree, LayoutEngine::Layered));
    }
}
