//! Shared base of nodes and links.
//!
//! An [`Element`] holds the resolved style record of an entity and its
//! optional click and hover callbacks. Style mutations go through the
//! crate-private update helpers, which store the value and then notify the
//! renderer, so no caller can forget the notification.

use std::{fmt, rc::Rc};

use netgraph_core::style::{StyleError, StyleRecord, Value, ValuePatch};

use crate::{
    error::GraphError,
    render::{EntityRef, Renderer},
};

/// The two kinds of graph entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Link,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node => f.write_str("node"),
            Self::Link => f.write_str("link"),
        }
    }
}

/// A click or hover handler, invoked with the entity it is attached to.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(EntityRef)>);

impl Callback {
    pub fn new(f: impl Fn(EntityRef) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, entity: EntityRef) {
        (self.0)(entity)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Style and input callbacks common to every entity.
#[derive(Debug, Clone)]
pub struct Element<S: StyleRecord> {
    style: S,
    click_callback: Option<Callback>,
    hover_callback: Option<Callback>,
}

impl<S: StyleRecord> Element<S> {
    /// Create an element whose style is `individual` resolved against `tree`.
    pub fn new(
        tree: &S::Tree,
        individual: Option<&S::Patch>,
        click_callback: Option<Callback>,
        hover_callback: Option<Callback>,
    ) -> Self {
        Self {
            style: Self::override_default_style(tree, individual),
            click_callback,
            hover_callback,
        }
    }

    /// Resolve an individual style against the kind's default tree.
    ///
    /// The effective shape is the individual shape if set, else the tree's
    /// default shape.
    pub fn override_default_style(tree: &S::Tree, individual: Option<&S::Patch>) -> S {
        S::resolve(tree, individual)
    }

    pub fn style(&self) -> &S {
        &self.style
    }

    pub fn shape(&self) -> S::Shape {
        self.style.shape()
    }

    pub fn click_callback(&self) -> Option<&Callback> {
        self.click_callback.as_ref()
    }

    pub fn hover_callback(&self) -> Option<&Callback> {
        self.hover_callback.as_ref()
    }

    /// Replace the click callback.
    pub fn on_click(&mut self, callback: Option<Callback>) {
        self.click_callback = callback;
    }

    /// Replace the hover callback.
    pub fn on_hover(&mut self, callback: Option<Callback>) {
        self.hover_callback = callback;
    }

    /// Run an infallible style update, then notify `key`.
    pub(crate) fn update_style<R>(
        &mut self,
        entity: EntityRef,
        key: &str,
        renderer: &mut Renderer,
        update: impl FnOnce(&mut S) -> R,
    ) -> R {
        let value = update(&mut self.style);
        renderer.change_attribute(entity, key);
        value
    }

    /// Run a fallible style update; `key` is notified only on success.
    pub(crate) fn try_update_style<R>(
        &mut self,
        entity: EntityRef,
        key: &str,
        renderer: &mut Renderer,
        update: impl FnOnce(&mut S) -> Result<R, StyleError>,
    ) -> Result<R, GraphError> {
        let value = update(&mut self.style)?;
        renderer.change_attribute(entity, key);
        Ok(value)
    }

    /// Dynamic accessor for a style key: no argument reads, one argument
    /// merges and notifies.
    pub(crate) fn style_accessor(
        &mut self,
        entity: EntityRef,
        key: &str,
        args: &[ValuePatch],
        renderer: &mut Renderer,
    ) -> Result<Value, GraphError> {
        match args {
            [] => self.style.get(key).ok_or_else(|| {
                StyleError::UnknownKey {
                    shape: self.style.shape_name(),
                    key: key.to_string(),
                }
                .into()
            }),
            [value] => self.try_update_style(entity, key, renderer, |style| {
                style.apply(key, value.clone())
            }),
            _ => Err(GraphError::arity(key, "0 or 1", args.len())),
        }
    }

    /// Whether `key` is a style key of the resolved shape.
    pub(crate) fn has_style_key(&self, key: &str) -> bool {
        self.style.keys().contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use netgraph_core::{
        color::{Color, PartialColor},
        identifier::NodeId,
        style::{NodeShape, NodeStyle, NodeStylePatch, NodeStyleTree},
    };

    use super::*;
    use crate::render::{AttributeChange, RecordingRenderManager};

    fn entity() -> EntityRef {
        EntityRef::Node(NodeId::new("element-test"))
    }

    fn recorder() -> (RecordingRenderManager, Renderer) {
        let recorder = RecordingRenderManager::default();
        let renderer = Renderer::new(recorder.clone(), recorder.clone());
        (recorder, renderer)
    }

    #[test]
    fn test_new_resolves_style() {
        let patch = NodeStylePatch {
            shape: Some(NodeShape::Rect),
            ..NodeStylePatch::default()
        };
        let element: Element<NodeStyle> =
            Element::new(&NodeStyleTree::default(), Some(&patch), None, None);
        assert_eq!(element.shape(), NodeShape::Rect);
        assert!(element.click_callback().is_none());
    }

    #[test]
    fn test_update_style_notifies_after_store() {
        let (recorder, mut renderer) = recorder();
        let mut element: Element<NodeStyle> =
            Element::new(&NodeStyleTree::default(), None, None, None);

        let fill = element.update_style(entity(), "fill", &mut renderer, |style| {
            style.set_fill(PartialColor::alpha(1.0))
        });

        assert_eq!(fill, Color::rgba(0.3, 0.5, 0.5, 1.0));
        assert_eq!(element.style().fill(), fill);
        assert_eq!(recorder.changes(), vec![AttributeChange::new(entity(), "fill")]);
    }

    #[test]
    fn test_failed_update_does_not_notify() {
        let (recorder, mut renderer) = recorder();
        let patch = NodeStylePatch {
            shape: Some(NodeShape::Triangle),
            ..NodeStylePatch::default()
        };
        let mut element: Element<NodeStyle> =
            Element::new(&NodeStyleTree::default(), Some(&patch), None, None);

        let result =
            element.try_update_style(entity(), "radius", &mut renderer, |style| {
                style.set_radius(2.0)
            });

        assert!(matches!(result, Err(GraphError::Style(StyleError::UnknownKey { .. }))));
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_style_accessor_arity() {
        let (recorder, mut renderer) = recorder();
        let mut element: Element<NodeStyle> =
            Element::new(&NodeStyleTree::default(), None, None, None);

        assert_eq!(
            element.style_accessor(entity(), "radius", &[], &mut renderer),
            Ok(Value::Number(5.0))
        );
        assert_eq!(
            element.style_accessor(entity(), "radius", &[ValuePatch::Number(7.0)], &mut renderer),
            Ok(Value::Number(7.0))
        );
        let err = element
            .style_accessor(
                entity(),
                "radius",
                &[ValuePatch::Number(1.0), ValuePatch::Number(2.0)],
                &mut renderer,
            )
            .unwrap_err();
        assert!(matches!(err, GraphError::Arity { found: 2, .. }));
        assert_eq!(element.style().radius(), Some(7.0));
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_callbacks_replace() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut element: Element<NodeStyle> =
            Element::new(&NodeStyleTree::default(), None, None, None);

        element.on_click(Some(Callback::new(move |_| counter.set(counter.get() + 1))));
        if let Some(callback) = element.click_callback() {
            callback.call(entity());
        }
        assert_eq!(hits.get(), 1);

        element.on_click(None);
        assert!(element.click_callback().is_none());
    }
}
