//! Tree layout.
//!
//! Layout assigns every token a grid cell: a column and a depth level.
//! The grid is purely geometric metadata; it never touches the tree.
//! [`TreeLayout`] also carries the orientation and spacing needed to turn
//! cells into drawing coordinates.
//!
//! Engines are selected by [`LayoutEngine`] and created through
//! [`EngineBuilder`].

mod engines;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use coptree_core::geometry::{Point, Size};

pub use engines::{EngineBuilder, TreeEngine};

/// Available layout algorithms.
///
/// # Variants
///
/// - `Layered` - Leaves left to right, heads centred over their dependents (default)
/// - `Linear` - One column per token in surface order, heads at their own position
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutEngine {
    /// Layered tree layout (default)
    #[default]
    Layered,
    /// Surface-order layout
    Linear,
}

impl FromStr for LayoutEngine {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "layered" => Ok(Self::Layered),
            "linear" => Ok(Self::Linear),
            _ => Err("Unsupported layout engine"),
        }
    }
}

impl From<LayoutEngine> for &'static str {
    fn from(val: LayoutEngine) -> Self {
        match val {
            LayoutEngine::Layered => "layered",
            LayoutEngine::Linear => "linear",
        }
    }
}

impl fmt::Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Direction in which depth levels grow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Root at the top, levels grow downwards (default)
    #[default]
    TopDown,
    /// Root at the left, levels grow to the right
    LeftRight,
}

impl FromStr for Orientation {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top_down" => Ok(Self::TopDown),
            "left_right" => Ok(Self::LeftRight),
            _ => Err("Unsupported orientation"),
        }
    }
}

impl From<Orientation> for &'static str {
    fn from(val: Orientation) -> Self {
        match val {
            Orientation::TopDown => "top_down",
            Orientation::LeftRight => "left_right",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Grid cell of one token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct LayoutNode {
    column: u32,
    level: u32,
}

impl LayoutNode {
    pub fn new(column: u32, level: u32) -> Self {
        Self { column, level }
    }

    /// Horizontal grid position.
    pub fn column(self) -> u32 {
        self.column
    }

    /// Distance from the root in edges; the root is level 0.
    pub fn level(self) -> u32 {
        self.level
    }
}

/// Layout of one tree, indexed by surface position.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    nodes: Vec<LayoutNode>,
    orientation: Orientation,
    column_spacing: f32,
    level_spacing: f32,
}

impl TreeLayout {
    pub fn new(nodes: Vec<LayoutNode>) -> Self {
        Self {
            nodes,
            orientation: Orientation::default(),
            column_spacing: 1.0,
            level_spacing: 1.0,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_spacing(mut self, column_spacing: f32, level_spacing: f32) -> Self {
        self.column_spacing = column_spacing;
        self.level_spacing = level_spacing;
        self
    }

    /// Cells in surface order.
    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn node(&self, position: usize) -> Option<LayoutNode> {
        self.nodes.get(position).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of columns spanned by the layout.
    pub fn columns(&self) -> u32 {
        self.nodes
            .iter()
            .map(|node| node.column + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of depth levels in the layout.
    pub fn levels(&self) -> u32 {
        self.nodes
            .iter()
            .map(|node| node.level + 1)
            .max()
            .unwrap_or(0)
    }

    /// Drawing coordinates of the cell at `position`, origin at the first
    /// column of the root level.
    pub fn point(&self, position: usize) -> Option<Point> {
        self.node(position).map(|node| {
            let along = node.column as f32 * self.column_spacing;
            let across = node.level as f32 * self.level_spacing;
            match self.orientation {
                Orientation::TopDown => Point::new(along, across),
                Orientation::LeftRight => Point::new(across, along),
            }
        })
    }

    /// Extent between the outermost cell centres.
    pub fn size(&self) -> Size {
        let along = self.columns().saturating_sub(1) as f32 * self.column_spacing;
        let across = self.levels().saturating_sub(1) as f32 * self.level_spacing;
        match self.orientation {
            Orientation::TopDown => Size::new(along, across),
            Orientation::LeftRight => Size::new(across, along),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_engine_round_trips_names() {
        for engine in [LayoutEngine::Layered, LayoutEngine::Linear] {
            assert_eq!(engine.to_string().parse::<LayoutEngine>(), Ok(engine));
        }
        assert_eq!(
            "sugiyama".parse::<LayoutEngine>(),
            Err("Unsupported layout engine")
        );
        assert_eq!(LayoutEngine::default(), LayoutEngine::Layered);
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!("left_right".parse(), Ok(Orientation::LeftRight));
        assert_eq!("diagonal".parse::<Orientation>(), Err("Unsupported orientation"));
    }

    #[test]
    fn test_points_follow_orientation() {
        let nodes = vec![LayoutNode::new(0, 1), LayoutNode::new(1, 0), LayoutNode::new(2, 1)];
        let top_down = TreeLayout::new(nodes.clone()).with_spacing(10.0, 20.0);
        assert_eq!(top_down.point(0), Some(Point::new(0.0, 20.0)));
        assert_eq!(top_down.point(1), Some(Point::new(10.0, 0.0)));
        assert_eq!(top_down.size(), Size::new(20.0, 20.0));

        let left_right = TreeLayout::new(nodes)
            .with_spacing(10.0, 20.0)
            .with_orientation(Orientation::LeftRight);
        assert_eq!(left_right.point(2), Some(Point::new(20.0, 20.0)));
        assert_eq!(left_right.size(), Size::new(20.0, 20.0));
        assert_eq!(left_right.point(3), None);
    }

    #[test]
    fn test_extent() {
        let layout = TreeLayout::new(vec![LayoutNode::new(3, 0), LayoutNode::new(0, 2)]);
        assert_eq!(layout.columns(), 4);
        assert_eq!(layout.levels(), 3);
        assert_eq!(TreeLayout::new(Vec::new()).columns(), 0);
    }
}
