//! Attribute-change notification to the rendering backend.
//!
//! The graph owns one [`RenderManager`] per entity kind. Every accessor that
//! mutates an entity calls [`RenderManager::change_attribute`] with the
//! entity and the attribute key before it returns, so the backend can
//! re-upload exactly the data that changed.
//!
//! Two managers ship with the crate: [`LogRenderManager`], which only logs,
//! and [`RecordingRenderManager`], which keeps every change in a shared
//! buffer that callers can inspect.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use log::{debug, trace};

use netgraph_core::identifier::NodeId;

use crate::element::ElementKind;

/// Identifier of a link, allocated by the graph in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkId(usize);

impl LinkId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the allocation index of this link.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link #{}", self.0)
    }
}

/// A reference to a node or a link, as passed to render managers and
/// callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Node(NodeId),
    Link(LinkId),
}

impl EntityRef {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Node(_) => ElementKind::Node,
            Self::Link(_) => ElementKind::Link,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => write!(f, "node `{id}`"),
            Self::Link(id) => write!(f, "{id}"),
        }
    }
}

impl From<NodeId> for EntityRef {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<LinkId> for EntityRef {
    fn from(id: LinkId) -> Self {
        Self::Link(id)
    }
}

/// Rendering backend for one entity kind.
pub trait RenderManager {
    /// Called synchronously after `key` of `entity` has been stored.
    fn change_attribute(&mut self, entity: EntityRef, key: &str);

    /// Flush pending changes to the output.
    fn draw(&mut self) {}
}

/// The pair of render managers owned by a graph.
pub struct Renderer {
    node_manager: Box<dyn RenderManager>,
    link_manager: Box<dyn RenderManager>,
}

impl Renderer {
    pub fn new(
        node_manager: impl RenderManager + 'static,
        link_manager: impl RenderManager + 'static,
    ) -> Self {
        Self {
            node_manager: Box::new(node_manager),
            link_manager: Box::new(link_manager),
        }
    }

    /// Route a change to the manager of the entity's kind.
    pub(crate) fn change_attribute(&mut self, entity: EntityRef, key: &str) {
        match entity.kind() {
            ElementKind::Node => self.node_manager.change_attribute(entity, key),
            ElementKind::Link => self.link_manager.change_attribute(entity, key),
        }
    }

    pub(crate) fn draw(&mut self) {
        self.node_manager.draw();
        self.link_manager.draw();
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(
            LogRenderManager::new(ElementKind::Node),
            LogRenderManager::new(ElementKind::Link),
        )
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

/// Render manager that logs every change and draw.
#[derive(Debug)]
pub struct LogRenderManager {
    kind: ElementKind,
    pending: usize,
}

impl LogRenderManager {
    pub fn new(kind: ElementKind) -> Self {
        Self { kind, pending: 0 }
    }
}

impl RenderManager for LogRenderManager {
    fn change_attribute(&mut self, entity: EntityRef, key: &str) {
        self.pending += 1;
        trace!(kind = self.kind.to_string(), entity = entity.to_string(), key; "Attribute changed");
    }

    fn draw(&mut self) {
        debug!(kind = self.kind.to_string(), changes = self.pending; "Drawing");
        self.pending = 0;
    }
}

/// One recorded attribute notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    pub entity: EntityRef,
    pub key: String,
}

impl AttributeChange {
    pub fn new(entity: impl Into<EntityRef>, key: &str) -> Self {
        Self {
            entity: entity.into(),
            key: key.to_string(),
        }
    }
}

/// Render manager that records every notification.
///
/// Clones share the same buffer, so a clone can be handed to the graph while
/// the caller keeps another to inspect what was notified.
///
/// # Examples
///
/// ```
/// use netgraph::{Graph, NodeData, RecordingRenderManager, Renderer, config::AppConfig};
///
/// let recorder = RecordingRenderManager::default();
/// let mut graph = Graph::new(AppConfig::default())
///     .with_renderer(Renderer::new(recorder.clone(), recorder.clone()));
///
/// let id = graph.add_node(NodeData::new("a")).unwrap();
/// graph.node_mut(id).unwrap().set_stroke_width(3.0);
///
/// let changes = recorder.take();
/// assert_eq!(changes.len(), 1);
/// assert_eq!(changes[0].key, "strokeWidth");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderManager {
    changes: Rc<RefCell<Vec<AttributeChange>>>,
    draws: Rc<Cell<usize>>,
}

impl RecordingRenderManager {
    /// Returns a copy of the recorded changes.
    pub fn changes(&self) -> Vec<AttributeChange> {
        self.changes.borrow().clone()
    }

    /// Returns the recorded changes and clears the buffer.
    pub fn take(&self) -> Vec<AttributeChange> {
        self.changes.take()
    }

    /// Number of changes recorded so far.
    pub fn len(&self) -> usize {
        self.changes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.borrow().is_empty()
    }

    /// Number of times `draw` was called on any clone.
    pub fn draw_count(&self) -> usize {
        self.draws.get()
    }
}

impl RenderManager for RecordingRenderManager {
    fn change_attribute(&mut self, entity: EntityRef, key: &str) {
        self.changes
            .borrow_mut()
            .push(AttributeChange::new(entity, key));
    }

    fn draw(&mut self) {
        self.draws.set(self.draws.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_routes_by_kind() {
        let nodes = RecordingRenderManager::default();
        let links = RecordingRenderManager::default();
        let mut renderer = Renderer::new(nodes.clone(), links.clone());

        renderer.change_attribute(EntityRef::Node(NodeId::new("a")), "fill");
        renderer.change_attribute(EntityRef::Link(LinkId::new(0)), "source");

        assert_eq!(nodes.changes(), vec![AttributeChange::new(NodeId::new("a"), "fill")]);
        assert_eq!(links.changes(), vec![AttributeChange::new(LinkId::new(0), "source")]);
    }

    #[test]
    fn test_recording_manager_take_and_draw() {
        let recorder = RecordingRenderManager::default();
        let mut renderer = Renderer::new(recorder.clone(), recorder.clone());

        renderer.change_attribute(EntityRef::Node(NodeId::new("a")), "position");
        assert_eq!(recorder.len(), 1);
        assert_eq!(recorder.take().len(), 1);
        assert!(recorder.is_empty());

        renderer.draw();
        assert_eq!(recorder.draw_count(), 2);
    }

    #[test]
    fn test_entity_display() {
        assert_eq!(EntityRef::Node(NodeId::new("hub")).to_string(), "node `hub`");
        assert_eq!(EntityRef::Link(LinkId::new(3)).to_string(), "link #3");
    }
}
