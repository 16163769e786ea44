//! SVG drawing of a sentence.
//!
//! The drawing is made from the [`GraphDescription`] of a tree: one box per
//! token at its layout point, one line per arc with the relation written at
//! its midpoint, and a `ROOT` marker above the root box.

use log::debug;
use svg::{Document, node::element as svg_element};
use unicode_width::UnicodeWidthStr;

use coptree_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
};

use super::{
    Error, Exporter,
    graph::{GraphDescription, GraphExporter, GraphNode},
};
use crate::{config::StyleConfig, layout::TreeLayout, structure::DependencyTree};

const MARGIN: f32 = 50.0;
const FONT_FAMILY: &str = "'Antinoou', 'Noto Sans Coptic', sans-serif";
const FORM_FONT_SIZE: f32 = 16.0;
const DETAIL_FONT_SIZE: f32 = 11.0;
const LABEL_FONT_SIZE: f32 = 12.0;
/// Approximate advance of one display column at the form font size.
const CHAR_WIDTH: f32 = 9.0;
const LINE_HEIGHT: f32 = 18.0;
const BOX_PADDING: f32 = 8.0;
const ROOT_MARKER_OFFSET: f32 = 30.0;

const DEFAULT_NODE_COLOR: &str = "#eef3fb";
const DEFAULT_ROOT_COLOR: &str = "#fff3c4";
const DEFAULT_EDGE_COLOR: &str = "#4a5568";

/// SVG renderer with its resolved colors.
#[derive(Debug, Clone)]
pub struct Svg {
    transliterate: bool,
    background: Option<Color>,
    node: Color,
    edge: Color,
    root: Color,
}

impl Default for Svg {
    fn default() -> Self {
        Self {
            transliterate: false,
            background: None,
            node: Color::new(DEFAULT_NODE_COLOR).unwrap_or_default(),
            edge: Color::new(DEFAULT_EDGE_COLOR).unwrap_or_default(),
            root: Color::new(DEFAULT_ROOT_COLOR).unwrap_or_default(),
        }
    }
}

impl Svg {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer using the colors of `style`; unset colors keep
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] naming the setting if a configured color
    /// cannot be parsed.
    pub fn from_style(style: &StyleConfig) -> Result<Self, Error> {
        let mut svg = Self::default();
        svg.background = style.background_color().map_err(Error::Render)?;
        if let Some(color) = style.node_color().map_err(Error::Render)? {
            svg.node = color;
        }
        if let Some(color) = style.edge_color().map_err(Error::Render)? {
            svg.edge = color;
        }
        if let Some(color) = style.root_color().map_err(Error::Render)? {
            svg.root = color;
        }
        Ok(svg)
    }

    /// Writes a Latin reading under each form.
    pub fn with_transliteration(mut self, transliterate: bool) -> Self {
        self.transliterate = transliterate;
        self
    }

    /// Calculate the size of the SVG for the given content size, adding a
    /// margin on every side.
    pub fn calculate_svg_dimensions(&self, content_size: Size) -> Size {
        let width = MARGIN.mul_add(2.0, content_size.width());
        let height = MARGIN.mul_add(2.0, content_size.height());

        debug!("Final SVG dimensions: {width}x{height}");

        Size::new(width, height)
    }

    /// Draws a graph description.
    pub fn render_graph(&self, graph: &GraphDescription) -> Document {
        let boxes: Vec<Bounds> = graph
            .nodes
            .iter()
            .map(|node| Point::new(node.x, node.y).to_bounds(self.box_size(node)))
            .collect();

        let root_marker = graph
            .nodes
            .iter()
            .zip(&boxes)
            .find(|(node, _)| node.is_root())
            .map(|(_, bounds)| Point::new(bounds.center_x(), bounds.min_y()));

        let mut content = boxes
            .iter()
            .copied()
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default();
        if let Some(anchor) = root_marker {
            let marker = Point::new(anchor.x(), anchor.y() - ROOT_MARKER_OFFSET)
                .to_bounds(Size::new(text_width("ROOT", LABEL_FONT_SIZE), LINE_HEIGHT));
            content = content.merge(&marker);
        }

        let mut doc = self.document(content.to_size());
        let mut group = svg_element::Group::new().set(
            "transform",
            format!(
                "translate({}, {})",
                MARGIN - content.min_x(),
                MARGIN - content.min_y()
            ),
        );

        // Arcs first so the boxes sit on top of them.
        for edge in &graph.edges {
            let from = graph.nodes.iter().position(|node| node.index == edge.from);
            let to = graph.nodes.iter().position(|node| node.index == edge.to);
            if let (Some(from), Some(to)) = (from, to) {
                let start = Point::new(graph.nodes[from].x, graph.nodes[from].y);
                let end = Point::new(graph.nodes[to].x, graph.nodes[to].y);
                group = group.add(self.render_arc(start, end, &edge.relation.to_string()));
            }
        }

        if let Some(anchor) = root_marker {
            group = group.add(self.render_root_marker(anchor));
        }

        for (node, bounds) in graph.nodes.iter().zip(&boxes) {
            group = group.add(self.render_node(node, *bounds));
        }

        doc = doc.add(group);
        doc
    }

    /// Draws a single message in place of a tree, used for sentences that
    /// could not be parsed.
    pub fn render_message(&self, message: &str) -> Document {
        let size = Size::new(text_width(message, LABEL_FONT_SIZE), LINE_HEIGHT);
        let doc = self.document(size);
        let text = svg_element::Text::new(message)
            .set("x", MARGIN + size.width() / 2.0)
            .set("y", MARGIN + size.height() / 2.0)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", FONT_FAMILY)
            .set("font-size", LABEL_FONT_SIZE)
            .set("fill", "#a00000");
        doc.add(text)
    }

    fn document(&self, content_size: Size) -> Document {
        let svg_size = self.calculate_svg_dimensions(content_size);
        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());

        if let Some(background) = &self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", background),
            );
        }
        doc
    }

    fn detail_line(node: &GraphNode) -> String {
        format!("{} · {}", node.pos_tag, node.lemma)
    }

    fn box_size(&self, node: &GraphNode) -> Size {
        let mut width = text_width(&node.form, FORM_FONT_SIZE)
            .max(text_width(&Self::detail_line(node), DETAIL_FONT_SIZE));
        let mut lines = 2.0;
        if let Some(latin) = node.latin.as_deref().filter(|_| self.transliterate) {
            width = width.max(text_width(latin, DETAIL_FONT_SIZE));
            lines += 1.0;
        }
        Size::new(BOX_PADDING.mul_add(2.0, width), BOX_PADDING.mul_add(2.0, lines * LINE_HEIGHT))
    }

    fn render_node(&self, node: &GraphNode, bounds: Bounds) -> svg_element::Group {
        let fill = if node.is_root() { &self.root } else { &self.node };
        let center_x = bounds.center_x();

        let rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", fill)
            .set("stroke", &self.edge)
            .set("stroke-width", 1.0)
            .set("rx", 4.0);

        let mut lines = vec![(node.form.clone(), FORM_FONT_SIZE)];
        lines.push((Self::detail_line(node), DETAIL_FONT_SIZE));
        if let Some(latin) = node.latin.as_ref().filter(|_| self.transliterate) {
            lines.push((latin.clone(), DETAIL_FONT_SIZE));
        }

        let mut group = svg_element::Group::new()
            .set("class", "token")
            .set("data-index", node.index)
            .add(rect);
        let mut y = bounds.min_y() + BOX_PADDING + LINE_HEIGHT / 2.0;
        for (content, font_size) in lines {
            group = group.add(
                svg_element::Text::new(content)
                    .set("x", center_x)
                    .set("y", y)
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "middle")
                    .set("font-family", FONT_FAMILY)
                    .set("font-size", font_size),
            );
            y += LINE_HEIGHT;
        }
        group
    }

    fn render_arc(&self, start: Point, end: Point, relation: &str) -> svg_element::Group {
        let line = svg_element::Line::new()
            .set("x1", start.x())
            .set("y1", start.y())
            .set("x2", end.x())
            .set("y2", end.y())
            .set("stroke", &self.edge)
            .set("stroke-width", 1.5);

        let mid = start.midpoint(end);
        let label_size = Size::new(text_width(relation, LABEL_FONT_SIZE), LABEL_FONT_SIZE);

        let bg = svg_element::Rectangle::new()
            .set("x", mid.x() - label_size.width() / 2.0 - 3.0)
            .set("y", mid.y() - label_size.height() / 2.0 - 3.0)
            .set("width", label_size.width() + 6.0)
            .set("height", label_size.height() + 6.0)
            .set("fill", "white")
            .set("fill-opacity", 0.8)
            .set("rx", 3.0);

        let text = svg_element::Text::new(relation)
            .set("x", mid.x())
            .set("y", mid.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", FONT_FAMILY)
            .set("font-size", LABEL_FONT_SIZE)
            .set("fill", &self.edge);

        svg_element::Group::new()
            .set("class", "arc")
            .add(line)
            .add(bg)
            .add(text)
    }

    fn render_root_marker(&self, anchor: Point) -> svg_element::Group {
        let label_y = anchor.y() - ROOT_MARKER_OFFSET;
        let line = svg_element::Line::new()
            .set("x1", anchor.x())
            .set("y1", label_y + LINE_HEIGHT / 2.0)
            .set("x2", anchor.x())
            .set("y2", anchor.y())
            .set("stroke", &self.edge)
            .set("stroke-dasharray", "3,3");
        let text = svg_element::Text::new("ROOT")
            .set("x", anchor.x())
            .set("y", label_y)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", FONT_FAMILY)
            .set("font-size", LABEL_FONT_SIZE)
            .set("font-weight", "bold");
        svg_element::Group::new()
            .set("class", "root-marker")
            .add(line)
            .add(text)
    }
}

/// Estimates rendered text width from its display width.
fn text_width(text: &str, font_size: f32) -> f32 {
    text.width() as f32 * CHAR_WIDTH * font_size / FORM_FONT_SIZE
}

impl Exporter for Svg {
    type Output = Document;

    fn export_tree(&self, tree: &DependencyTree, layout: &TreeLayout) -> Result<Document, Error> {
        let graph = GraphExporter::new()
            .with_transliteration(self.transliterate)
            .export_tree(tree, layout)?;
        let doc = self.render_graph(&graph);
        debug!(tokens = graph.nodes.len(); "SVG document rendered");
        Ok(doc)
    }
}
