//! Links between nodes.

use std::ops::Deref;

use serde::Deserialize;

use netgraph_core::{
    color::{Color, PartialColor},
    identifier::NodeId,
    style::{LinkShape, LinkStyle, LinkStylePatch, Value, ValuePatch},
};

use crate::{
    config::LinkConfig,
    element::{Callback, Element},
    error::GraphError,
    render::{EntityRef, LinkId, Renderer},
};

/// Construction data of a link.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LinkData {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub style: Option<LinkStylePatch>,
    #[serde(skip)]
    pub click_callback: Option<Callback>,
    #[serde(skip)]
    pub hover_callback: Option<Callback>,
}

impl LinkData {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            style: None,
            click_callback: None,
            hover_callback: None,
        }
    }

    pub fn with_style(mut self, style: LinkStylePatch) -> Self {
        self.style = Some(style);
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

/// A link between two registered nodes.
#[derive(Debug)]
pub struct Link {
    id: LinkId,
    source: NodeId,
    target: NodeId,
    element: Element<LinkStyle>,
}

impl Link {
    pub(crate) fn new(
        id: LinkId,
        data: &LinkData,
        config: &LinkConfig,
        default_click: Option<&Callback>,
        default_hover: Option<&Callback>,
    ) -> Self {
        Self {
            id,
            source: data.source,
            target: data.target,
            element: Element::new(
                config.style(),
                data.style.as_ref(),
                data.click_callback.clone().or_else(|| default_click.cloned()),
                data.hover_callback.clone().or_else(|| default_hover.cloned()),
            ),
        }
    }

    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Whether `node` is one of the endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }

    pub fn element(&self) -> &Element<LinkStyle> {
        &self.element
    }

    pub fn style(&self) -> &LinkStyle {
        self.element.style()
    }

    pub fn shape(&self) -> LinkShape {
        self.element.shape()
    }

    pub fn stroke_color(&self) -> Color {
        self.style().stroke_color()
    }

    pub fn stroke_width(&self) -> f32 {
        self.style().stroke_width()
    }

    pub fn curveness(&self) -> Option<f32> {
        self.style().curveness()
    }

    pub fn click_callback(&self) -> Option<&Callback> {
        self.element.click_callback()
    }

    pub fn hover_callback(&self) -> Option<&Callback> {
        self.element.hover_callback()
    }
}

/// Mutable view of a link, obtained from
/// [`Graph::link_mut`](crate::Graph::link_mut).
pub struct LinkMut<'g> {
    link: &'g mut Link,
    renderer: &'g mut Renderer,
}

impl<'g> LinkMut<'g> {
    pub(crate) fn new(link: &'g mut Link, renderer: &'g mut Renderer) -> Self {
        Self { link, renderer }
    }

    fn entity(&self) -> EntityRef {
        EntityRef::Link(self.link.id)
    }

    pub fn set_stroke_width(&mut self, width: f32) -> f32 {
        let entity = self.entity();
        self.link
            .element
            .update_style(entity, "strokeWidth", self.renderer, |style| {
                style.set_stroke_width(width)
            })
    }

    pub fn set_stroke_color(&mut self, color: impl Into<PartialColor>) -> Color {
        let entity = self.entity();
        let color = color.into();
        self.link
            .element
            .update_style(entity, "strokeColor", self.renderer, |style| {
                style.set_stroke_color(color)
            })
    }

    /// Set the curveness of a curved link.
    ///
    /// # Errors
    ///
    /// Returns a style error, without notifying, for straight links.
    pub fn set_curveness(&mut self, curveness: f32) -> Result<f32, GraphError> {
        let entity = self.entity();
        self.link
            .element
            .try_update_style(entity, "curveness", self.renderer, |style| {
                style.set_curveness(curveness)
            })
    }

    pub fn on_click(&mut self, callback: Option<Callback>) {
        self.link.element.on_click(callback);
    }

    pub fn on_hover(&mut self, callback: Option<Callback>) {
        self.link.element.on_hover(callback);
    }

    /// Call an accessor by name.
    ///
    /// `source`, `target` and `shape` are read-only; style keys of the
    /// link's shape read with no argument and write with one.
    ///
    /// # Errors
    ///
    /// Same contract as [`NodeMut::call`](crate::NodeMut::call).
    pub fn call(&mut self, accessor: &str, args: &[ValuePatch]) -> Result<Value, GraphError> {
        match (accessor, args) {
            ("source", []) => Ok(Value::Text(self.link.source.as_string())),
            ("target", []) => Ok(Value::Text(self.link.target.as_string())),
            ("shape", []) => Ok(Value::Text(self.link.shape().to_string())),
            ("source" | "target" | "shape", _) => Err(GraphError::ReadOnly(accessor.to_string())),
            (key, _) if self.link.element.has_style_key(key) => {
                let entity = self.entity();
                self.link
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

impl Deref for LinkMut<'_> {
    type Target = Link;

    fn deref(&self) -> &Link {
        self.link
    }
}

#[cfg(test)]
mod tests {
    use netgraph_core::style::LinkStyleTree;

    use super::*;
    use crate::render::{AttributeChange, RecordingRenderManager};

    fn link(data: &LinkData) -> Link {
        Link::new(LinkId::new(0), data, &LinkConfig::default(), None, None)
    }

    #[test]
    fn test_new_resolves_style() {
        let link = link(&LinkData::new("a", "b"));
        assert_eq!(link.source(), "a");
        assert_eq!(link.target(), "b");
        assert!(link.touches(NodeId::new("b")));
        assert!(!link.touches(NodeId::new("c")));
        assert_eq!(link.style(), &LinkStyleTree::default().entry(LinkShape::Line));
    }

    #[test]
    fn test_set_curveness_notifies_only_curves() {
        let recorder = RecordingRenderManager::default();
        let mut renderer = Renderer::new(recorder.clone(), recorder.clone());

        let mut line = link(&LinkData::new("a", "b"));
        assert!(LinkMut::new(&mut line, &mut renderer).set_curveness(0.4).is_err());
        assert!(recorder.is_empty());

        let mut curve = link(&LinkData::new("a", "b").with_style(LinkStylePatch {
            shape: Some(LinkShape::Curve),
            ..LinkStylePatch::default()
        }));
        let mut view = LinkMut::new(&mut curve, &mut renderer);
        assert_eq!(view.set_curveness(0.4), Ok(0.4));
        assert_eq!(view.curveness(), Some(0.4));
        assert_eq!(
            recorder.changes(),
            vec![AttributeChange::new(LinkId::new(0), "curveness")]
        );
    }

    #[test]
    fn test_call_endpoints_are_read_only() {
        let mut renderer = Renderer::default();
        let mut link = link(&LinkData::new("a", "b"));
        let mut view = LinkMut::new(&mut link, &mut renderer);

        assert_eq!(view.call("source", &[]), Ok(Value::Text("a".to_string())));
        assert_eq!(
            view.call("target", &[ValuePatch::from("c")]),
            Err(GraphError::ReadOnly("target".to_string()))
        );
        assert!(matches!(
            view.call("curveness", &[]),
            Err(GraphError::UnknownAccessor { .. })
        ));
        assert_eq!(
            view.call("strokeWidth", &[ValuePatch::Number(4.0)]),
            Ok(Value::Number(4.0))
        );
    }

    #[test]
    fn test_link_data_from_toml() {
        let data: LinkData = toml::from_str(
            r#"
            source = "a"
            target = "b"
            style = { shape = "curve", curveness = 0.3 }
            "#,
        )
        .unwrap();
        assert_eq!(data.source, "a");
        assert_eq!(data.style.and_then(|s| s.curveness), Some(0.3));
    }
}
