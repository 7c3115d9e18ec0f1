//! Nodes and their mutable views.
//!
//! A [`Node`] is read through the graph as a plain reference. Mutations go
//! through [`NodeMut`], a short-lived view that also borrows the incident
//! links, the renderer and the label overlay, so that a position change can
//! notify the links attached to the node.
//!
//! # Cascade
//!
//! | Setter | Own notification | Incident links |
//! |---|---|---|
//! | [`NodeMut::set_x`] | `position` | `source`, on every link |
//! | [`NodeMut::set_y`] | `position` | `source` and `target`, on every link |
//! | [`NodeMut::set_position`] | `position` (once) | `source`, on every link |

use std::ops::Deref;

use indexmap::{IndexMap, IndexSet};
use log::trace;
use serde::Deserialize;

use netgraph_core::{
    color::{Color, PartialColor},
    geometry::{PartialPoint, Point},
    identifier::NodeId,
    style::{NodeShape, NodeStyle, NodeStylePatch, StyleError, StyleValue, Value, ValuePatch},
};

use crate::{
    config::NodeConfig,
    element::{Callback, Element},
    error::GraphError,
    label::LabelOverlay,
    link::Link,
    render::{EntityRef, LinkId, Renderer},
};

/// Construction data of a node.
///
/// Deserializes from a TOML/serde table with camelCase keys; callbacks can
/// only be attached in code.
///
/// # Examples
///
/// ```
/// use netgraph::NodeData;
///
/// let data = NodeData::new("hub").at(10.0, 20.0).with_text("Hub");
/// assert_eq!(data.id, "hub");
/// assert_eq!(data.text.as_deref(), Some("Hub"));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct NodeData {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub style: Option<NodeStylePatch>,
    pub show_label: Option<bool>,
    pub text: Option<String>,
    pub text_offset: Option<Point>,
    #[serde(skip)]
    pub click_callback: Option<Callback>,
    #[serde(skip)]
    pub hover_callback: Option<Callback>,
}

impl NodeData {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_style(mut self, style: NodeStylePatch) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_show_label(mut self, show_label: bool) -> Self {
        self.show_label = Some(show_label);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_text_offset(mut self, offset: Point) -> Self {
        self.text_offset = Some(offset);
        self
    }

    pub fn with_click(mut self, callback: Callback) -> Self {
        self.click_callback = Some(callback);
        self
    }

    pub fn with_hover(mut self, callback: Callback) -> Self {
        self.hover_callback = Some(callback);
        self
    }
}

/// A graph node.
#[derive(Debug)]
pub struct Node {
    id: Option<NodeId>,
    element: Element<NodeStyle>,
    position: Point,
    show_label: bool,
    text: String,
    text_offset: Point,
}

impl Node {
    /// Build an unregistered node from its data and the node defaults.
    ///
    /// Callbacks missing from `data` fall back to the given defaults.
    pub(crate) fn new(
        data: &NodeData,
        config: &NodeConfig,
        default_click: Option<&Callback>,
        default_hover: Option<&Callback>,
    ) -> Self {
        Self {
            id: None,
            element: Element::new(
                config.style(),
                data.style.as_ref(),
                data.click_callback.clone().or_else(|| default_click.cloned()),
                data.hover_callback.clone().or_else(|| default_hover.cloned()),
            ),
            position: Point::new(data.x, data.y),
            show_label: data.show_label.unwrap_or(config.show_label()),
            text: data.text.clone().unwrap_or_default(),
            text_offset: data.text_offset.unwrap_or(config.text_offset()),
        }
    }

    /// Set the id once.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ImmutableId`] if the node already has an id.
    pub(crate) fn assign_id(&mut self, id: NodeId) -> Result<(), GraphError> {
        if let Some(existing) = self.id {
            return Err(GraphError::ImmutableId(existing));
        }
        self.id = Some(id);
        Ok(())
    }

    /// Returns the node id.
    ///
    /// # Panics
    ///
    /// Nodes are only reachable through the graph after registration, which
    /// assigns the id.
    pub fn id(&self) -> NodeId {
        self.id.expect("registered nodes always carry an id")
    }

    pub fn x(&self) -> f32 {
        self.position.x()
    }

    pub fn y(&self) -> f32 {
        self.position.y()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn show_label(&self) -> bool {
        self.show_label
    }

    /// Label text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Label offset relative to the node position.
    pub fn text_offset(&self) -> Point {
        self.text_offset
    }

    /// Point where the label is anchored.
    pub fn label_anchor(&self) -> Point {
        self.position.add_point(self.text_offset)
    }

    pub fn element(&self) -> &Element<NodeStyle> {
        &self.element
    }

    pub fn style(&self) -> &NodeStyle {
        self.element.style()
    }

    pub fn shape(&self) -> NodeShape {
        self.element.shape()
    }

    pub fn fill(&self) -> Color {
        self.style().fill()
    }

    pub fn stroke_color(&self) -> Color {
        self.style().stroke_color()
    }

    pub fn stroke_width(&self) -> f32 {
        self.style().stroke_width()
    }

    /// Radius of a circular node.
    pub fn radius(&self) -> Option<f32> {
        self.style().radius()
    }

    pub fn click_callback(&self) -> Option<&Callback> {
        self.element.click_callback()
    }

    pub fn hover_callback(&self) -> Option<&Callback> {
        self.element.hover_callback()
    }
}

/// Mutable view of a registered node.
///
/// Obtained from [`Graph::node_mut`](crate::Graph::node_mut). Every setter
/// stores the value, notifies the node render manager and, for position
/// changes, the link render manager, then returns the stored value.
pub struct NodeMut<'g> {
    node: &'g mut Node,
    links: &'g IndexMap<LinkId, Link>,
    incident: Option<&'g IndexSet<LinkId>>,
    renderer: &'g mut Renderer,
    labels: &'g mut dyn LabelOverlay,
}

impl<'g> NodeMut<'g> {
    pub(crate) fn new(
        node: &'g mut Node,
        links: &'g IndexMap<LinkId, Link>,
        incident: Option<&'g IndexSet<LinkId>>,
        renderer: &'g mut Renderer,
        labels: &'g mut dyn LabelOverlay,
    ) -> Self {
        Self {
            node,
            links,
            incident,
            renderer,
            labels,
        }
    }

    fn entity(&self) -> EntityRef {
        EntityRef::Node(self.node.id())
    }

    fn incident_links(&self) -> impl Iterator<Item = &'g Link> + use<'g> {
        let links = self.links;
        self.incident
            .into_iter()
            .flatten()
            .filter_map(move |link_id| links.get(link_id))
    }

    /// Notify `source` on every incident link, whichever end this node is.
    fn notify_sources(&mut self) {
        for link in self.incident_links() {
            self.renderer
                .change_attribute(EntityRef::Link(link.id()), "source");
        }
    }

    /// Notify both endpoints of every incident link.
    fn notify_incident(&mut self) {
        for link in self.incident_links() {
            let entity = EntityRef::Link(link.id());
            self.renderer.change_attribute(entity, "source");
            self.renderer.change_attribute(entity, "target");
        }
    }

    fn notify_position(&mut self) {
        trace!(node = self.node.id().to_string(), x = self.node.x(), y = self.node.y(); "Node moved");
        self.renderer.change_attribute(self.entity(), "position");
    }

    pub fn set_x(&mut self, x: f32) -> f32 {
        self.node.position = self.node.position.with_x(x);
        self.notify_position();
        self.notify_sources();
        x
    }

    pub fn set_y(&mut self, y: f32) -> f32 {
        self.node.position = self.node.position.with_y(y);
        self.notify_position();
        self.notify_incident();
        y
    }

    /// Move the node, notifying its position once.
    pub fn set_position(&mut self, x: f32, y: f32) -> Point {
        self.node.position = Point::new(x, y);
        self.notify_position();
        self.notify_sources();
        self.node.position
    }

    pub fn set_stroke_width(&mut self, width: f32) -> f32 {
        let entity = self.entity();
        self.node
            .element
            .update_style(entity, "strokeWidth", self.renderer, |style| {
                style.set_stroke_width(width)
            })
    }

    pub fn set_stroke_color(&mut self, color: impl Into<PartialColor>) -> Color {
        let entity = self.entity();
        let color = color.into();
        self.node
            .element
            .update_style(entity, "strokeColor", self.renderer, |style| {
                style.set_stroke_color(color)
            })
    }

    pub fn set_fill(&mut self, color: impl Into<PartialColor>) -> Color {
        let entity = self.entity();
        let color = color.into();
        self.node
            .element
            .update_style(entity, "fill", self.renderer, |style| style.set_fill(color))
    }

    /// Set the radius of a circular node.
    ///
    /// # Errors
    ///
    /// Returns a style error, without notifying, if the node is not a circle.
    pub fn set_radius(&mut self, radius: f32) -> Result<f32, GraphError> {
        let entity = self.entity();
        self.node
            .element
            .try_update_style(entity, "radius", self.renderer, |style| {
                style.set_radius(radius)
            })
    }

    /// Show or hide the node label.
    pub fn set_show_label(&mut self, show_label: bool) -> bool {
        self.node.show_label = show_label;
        if show_label {
            self.labels.draw_label(self.node);
        } else {
            self.labels.remove_label(self.node.id());
        }
        show_label
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &str {
        self.node.text = text.into();
        &self.node.text
    }

    /// Merge an offset patch into the label offset.
    pub fn set_text_offset(&mut self, offset: impl Into<PartialPoint>) -> Point {
        self.node.text_offset.apply(offset.into());
        self.node.text_offset
    }

    pub fn on_click(&mut self, callback: Option<Callback>) {
        self.node.element.on_click(callback);
    }

    pub fn on_hover(&mut self, callback: Option<Callback>) {
        self.node.element.on_hover(callback);
    }

    /// Call an accessor by name.
    ///
    /// With no arguments the accessor reads; with arguments it writes and
    /// returns the stored value. `position` takes exactly zero or two
    /// arguments, every other writable accessor zero or one.
    ///
    /// # Errors
    ///
    /// - [`GraphError::ImmutableId`] when writing `id`.
    /// - [`GraphError::ReadOnly`] when writing `shape`.
    /// - [`GraphError::Arity`] for a wrong argument count.
    /// - [`GraphError::Style`] for an argument of the wrong type, or a style
    ///   key not declared by the node's shape.
    /// - [`GraphError::UnknownAccessor`] for any other name.
    ///
    /// Nothing is stored or notified when an error is returned.
    pub fn call(&mut self, accessor: &str, args: &[ValuePatch]) -> Result<Value, GraphError> {
        match (accessor, args) {
            ("id", []) => Ok(Value::Text(self.node.id().as_string())),
            ("id", _) => Err(GraphError::ImmutableId(self.node.id())),
            ("shape", []) => Ok(Value::Text(self.node.shape().to_string())),
            ("shape", _) => Err(GraphError::ReadOnly(accessor.to_string())),
            ("x", []) => Ok(Value::Number(self.node.x())),
            ("x", [x]) => {
                let x = x.clone().coerce::<f32>(accessor)?;
                Ok(Value::Number(self.set_x(x)))
            }
            ("y", []) => Ok(Value::Number(self.node.y())),
            ("y", [y]) => {
                let y = y.clone().coerce::<f32>(accessor)?;
                Ok(Value::Number(self.set_y(y)))
            }
            ("x" | "y", _) => Err(GraphError::arity(accessor, "0 or 1", args.len())),
            ("position", []) => Ok(Value::Point(self.node.position())),
            ("position", [x, y]) => {
                let x = x.clone().coerce::<f32>("x")?;
                let y = y.clone().coerce::<f32>("y")?;
                Ok(Value::Point(self.set_position(x, y)))
            }
            ("position", _) => Err(GraphError::arity(accessor, "0 or 2", args.len())),
            ("showLabel", []) => Ok(Value::Bool(self.node.show_label())),
            ("showLabel", [flag]) => {
                let flag = flag.clone().coerce::<bool>(accessor)?;
                Ok(Value::Bool(self.set_show_label(flag)))
            }
            ("text", []) => Ok(Value::Text(self.node.text().to_string())),
            ("text", [ValuePatch::Text(text)]) => {
                Ok(Value::Text(self.set_text(text.clone()).to_string()))
            }
            ("text", [other]) => Err(StyleError::TypeMismatch {
                key: accessor.to_string(),
                expected: "text",
                found: other.kind(),
            }
            .into()),
            ("textOffset", []) => Ok(Value::Point(self.node.text_offset())),
            ("textOffset", [offset]) => {
                let offset = offset.clone().coerce::<Point>(accessor)?;
                Ok(self.set_text_offset(offset).to_value())
            }
            ("showLabel" | "text" | "textOffset", _) => {
                Err(GraphError::arity(accessor, "0 or 1", args.len()))
            }
            (key, _) if self.node.element.has_style_key(key) => {
                let entity = self.entity();
                self.node
                    .element
                    .style_accessor(entity, key, args, self.renderer)
            }
            _ => Err(GraphError::UnknownAccessor {
                entity: self.entity(),
                accessor: accessor.to_string(),
            }),
        }
    }
}

impl Deref for NodeMut<'_> {
    type Target = Node;

    fn deref(&self) -> &Node {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn node(data: &NodeData) -> Node {
        let mut node = Node::new(data, &NodeConfig::default(), None, None);
        node.assign_id(NodeId::new(&data.id)).unwrap();
        node
    }

    #[test]
    fn test_new_applies_defaults() {
        let node = node(&NodeData::new("a").at(1.0, 2.0));
        assert_eq!(node.id(), "a");
        assert_eq!(node.position(), Point::new(1.0, 2.0));
        assert!(!node.show_label());
        assert_eq!(node.text(), "");
        assert_eq!(node.text_offset(), Point::new(8.0, 0.0));
        assert_eq!(node.shape(), NodeShape::Circle);
        assert_eq!(node.radius(), Some(5.0));
        assert_approx_eq!(f32, node.stroke_width(), 1.0);
    }

    #[test]
    fn test_new_uses_data_over_defaults() {
        let config = NodeConfig::default().with_show_label(true);
        let data = NodeData::new("b")
            .with_show_label(false)
            .with_text("B")
            .with_text_offset(Point::new(0.0, 4.0));
        let node = Node::new(&data, &config, None, None);

        assert!(!node.show_label());
        assert_eq!(node.text(), "B");
        assert_eq!(node.label_anchor(), Point::new(0.0, 4.0));
    }

    #[test]
    fn test_default_callbacks_fill_missing_ones() {
        let fallback = Callback::new(|_| {});
        let own = Callback::new(|_| {});
        let data = NodeData::new("c").with_click(own);
        let node = Node::new(&data, &NodeConfig::default(), Some(&fallback), Some(&fallback));

        assert!(node.click_callback().is_some());
        assert!(node.hover_callback().is_some());
    }

    #[test]
    fn test_assign_id_twice_fails() {
        let mut node = node(&NodeData::new("d"));
        assert_eq!(
            node.assign_id(NodeId::new("e")),
            Err(GraphError::ImmutableId(NodeId::new("d")))
        );
        assert_eq!(node.id(), "d");
    }

    #[test]
    fn test_node_data_from_toml() {
        let data: NodeData = toml::from_str(
            r#"
            id = "n1"
            x = 3
            y = 4.5
            showLabel = true
            text = "first"
            textOffset = { x = 1, y = 1 }

            [style]
            shape = "rect"
            width = 20
            fill = { a = 0.1 }
            "#,
        )
        .unwrap();

        assert_eq!(data.id, "n1");
        assert_approx_eq!(f32, data.x, 3.0);
        assert_eq!(data.show_label, Some(true));
        assert_eq!(data.text_offset, Some(Point::new(1.0, 1.0)));
        let style = data.style.unwrap();
        assert_eq!(style.shape, Some(NodeShape::Rect));
        assert_eq!(style.width, Some(20.0));
    }
}
