//! Text labels drawn next to nodes.
//!
//! The [`LabelOverlay`] trait is what the graph talks to when a node's
//! `showLabel` flag changes. [`SvgLabelOverlay`] keeps one label per node in
//! memory and renders them as a transparent SVG layer meant to sit on top of
//! the node canvas.

use indexmap::IndexMap;
use log::trace;
use svg::{Document, node::Text as SvgText, node::element as svg_element};

use netgraph_core::{color::Color, geometry::Point, identifier::NodeId};

use crate::{config::AppConfig, node::Node};

/// Overlay that shows node labels.
pub trait LabelOverlay {
    /// Draw the label of `node` at its position plus its text offset,
    /// replacing any label already drawn for it.
    fn draw_label(&mut self, node: &Node);

    /// Remove the label of `id`. Removing a missing label does nothing.
    fn remove_label(&mut self, id: NodeId);
}

/// A label placed on the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    anchor: Point,
    text: String,
}

impl Label {
    /// Left end of the label baseline.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// In-memory label overlay rendered with the `svg` crate.
#[derive(Debug, Clone)]
pub struct SvgLabelOverlay {
    width: f32,
    height: f32,
    font_family: String,
    font_size: f32,
    color: Color,
    labels: IndexMap<NodeId, Label>,
}

impl SvgLabelOverlay {
    /// Create an empty overlay sized to the configured canvas.
    pub fn new(config: &AppConfig) -> Self {
        let label = config.label();
        Self {
            width: config.width(),
            height: config.height(),
            font_family: label.font_family().to_string(),
            font_size: label.font_size(),
            color: label.color(),
            labels: IndexMap::new(),
        }
    }

    pub fn label(&self, id: NodeId) -> Option<&Label> {
        self.labels.get(&id)
    }

    /// Labels in drawing order.
    pub fn labels(&self) -> impl Iterator<Item = (NodeId, &Label)> {
        self.labels.iter().map(|(id, label)| (*id, label))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Render the overlay as a standalone SVG document.
    ///
    /// The root ignores pointer events so input reaches the canvas below.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", self.width, self.height))
            .set("width", self.width)
            .set("height", self.height)
            .set("style", "position: absolute; left: 0; top: 0; pointer-events: none");

        let mut group = svg_element::Group::new()
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("fill", self.color.to_string())
            .set("fill-opacity", self.color.alpha());

        for (id, label) in &self.labels {
            let text = svg_element::Text::new("")
                .set("data-node", id.to_string())
                .set("x", label.anchor.x())
                .set("y", label.anchor.y())
                .set("text-anchor", "start")
                .set("alignment-baseline", "middle")
                .add(SvgText::new(label.text.as_str()));
            group = group.add(text);
        }

        doc = doc.add(group);
        doc
    }
}

impl LabelOverlay for SvgLabelOverlay {
    fn draw_label(&mut self, node: &Node) {
        let label = Label {
            anchor: node.label_anchor(),
            text: node.text().to_string(),
        };
        trace!(node = node.id().to_string(), text = label.text.as_str(); "Drawing label");
        self.labels.insert(node.id(), label);
    }

    fn remove_label(&mut self, id: NodeId) {
        if self.labels.shift_remove(&id).is_some() {
            trace!(node = id.to_string(); "Removed label");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::NodeConfig, node::NodeData};

    fn node(data: NodeData) -> Node {
        let mut node = Node::new(&data, &NodeConfig::default(), None, None);
        node.assign_id(NodeId::new(&data.id)).unwrap();
        node
    }

    #[test]
    fn test_draw_places_label_at_offset() {
        let mut overlay = SvgLabelOverlay::new(&AppConfig::default());
        let node = node(
            NodeData::new("label-a")
                .at(10.0, 20.0)
                .with_text("A")
                .with_text_offset(Point::new(5.0, -1.0)),
        );

        overlay.draw_label(&node);

        let label = overlay.label(node.id()).unwrap();
        assert_eq!(label.anchor(), Point::new(15.0, 19.0));
        assert_eq!(label.text(), "A");
    }

    #[test]
    fn test_redraw_replaces_label() {
        let mut overlay = SvgLabelOverlay::new(&AppConfig::default());
        let first = node(NodeData::new("label-b").with_text("old"));
        let second = node(NodeData::new("label-b").with_text("new"));

        overlay.draw_label(&first);
        overlay.draw_label(&second);

        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay.label(NodeId::new("label-b")).map(Label::text), Some("new"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut overlay = SvgLabelOverlay::new(&AppConfig::default());
        let node = node(NodeData::new("label-c").with_text("C"));

        overlay.draw_label(&node);
        overlay.remove_label(node.id());
        overlay.remove_label(node.id());
        overlay.remove_label(NodeId::new("never-drawn"));

        assert!(overlay.is_empty());
    }

    #[test]
    fn test_document_attributes() {
        let mut overlay = SvgLabelOverlay::new(&AppConfig::new(320.0, 240.0));
        overlay.draw_label(&node(NodeData::new("label-d").at(1.0, 2.0).with_text("Delta")));

        let rendered = overlay.to_document().to_string();
        assert!(rendered.contains(r#"viewBox="0 0 320 240""#));
        assert!(rendered.contains("pointer-events: none"));
        assert!(rendered.contains(r#"text-anchor="start""#));
        assert!(rendered.contains(r#"alignment-baseline="middle""#));
        assert!(rendered.contains(r#"data-node="label-d""#));
        assert!(rendered.contains("Delta"));
    }

    #[test]
    fn test_document_leaves_background_transparent() {
        let config = AppConfig::default().with_background_color(Color::rgba(0.0, 0.0, 0.0, 1.0));
        let overlay = SvgLabelOverlay::new(&config);

        let rendered = overlay.to_document().to_string();
        assert!(!rendered.contains("<rect"));
        assert!(!rendered.contains("background"));
    }
}
