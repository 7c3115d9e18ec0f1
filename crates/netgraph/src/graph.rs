//! The graph: owner of the registry, the links and the collaborators.
//!
//! [`Graph`] is the only way to create entities, and mutable access to an
//! entity is always a view ([`NodeMut`], [`LinkMut`]) borrowed from it, so
//! every mutation reaches the render managers and the label overlay.

use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;

use netgraph_core::identifier::NodeId;

use crate::{
    config::AppConfig,
    element::{Callback, ElementKind},
    error::GraphError,
    label::{LabelOverlay, SvgLabelOverlay},
    link::{Link, LinkData, LinkMut},
    node::{Node, NodeData, NodeMut},
    registry::Registry,
    render::{EntityRef, LinkId, Renderer},
};

/// Nodes and links to load in one go.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphData {
    pub nodes: Vec<NodeData>,
    pub links: Vec<LinkData>,
}

#[derive(Debug, Default)]
struct DefaultCallbacks {
    click: Option<Callback>,
    hover: Option<Callback>,
}

/// A node/link graph with its renderer and label overlay.
///
/// # Examples
///
/// ```
/// use netgraph::{Graph, LinkData, NodeData, config::AppConfig};
///
/// let mut graph = Graph::new(AppConfig::default());
/// let a = graph.add_node(NodeData::new("a")).unwrap();
/// let b = graph.add_node(NodeData::new("b").at(30.0, 0.0)).unwrap();
/// let link = graph.add_link(LinkData::new(a, b)).unwrap();
///
/// graph.node_mut(b).unwrap().set_y(12.0);
///
/// assert_eq!(graph.node(b).unwrap().y(), 12.0);
/// assert_eq!(graph.links_of(a).next().map(|l| l.id()), Some(link));
/// ```
#[derive(Debug)]
pub struct Graph<L: LabelOverlay = SvgLabelOverlay> {
    config: AppConfig,
    registry: Registry,
    links: IndexMap<LinkId, Link>,
    next_link: usize,
    renderer: Renderer,
    labels: L,
    node_callbacks: DefaultCallbacks,
    link_callbacks: DefaultCallbacks,
}

impl Graph<SvgLabelOverlay> {
    /// Create an empty graph with an SVG label overlay and logging render
    /// managers.
    pub fn new(config: AppConfig) -> Self {
        let labels = SvgLabelOverlay::new(&config);
        Self::with_label_overlay(config, labels)
    }
}

impl<L: LabelOverlay> Graph<L> {
    pub fn with_label_overlay(config: AppConfig, labels: L) -> Self {
        Self {
            config,
            registry: Registry::default(),
            links: IndexMap::new(),
            next_link: 0,
            renderer: Renderer::default(),
            labels,
            node_callbacks: DefaultCallbacks::default(),
            link_callbacks: DefaultCallbacks::default(),
        }
    }

    /// Replace the render managers.
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn labels(&self) -> &L {
        &self.labels
    }

    /// Set the callbacks used by entities of `kind` created from now on
    /// whose data carries none.
    pub fn set_default_click(&mut self, kind: ElementKind, callback: Option<Callback>) {
        self.default_callbacks_mut(kind).click = callback;
    }

    pub fn set_default_hover(&mut self, kind: ElementKind, callback: Option<Callback>) {
        self.default_callbacks_mut(kind).hover = callback;
    }

    fn default_callbacks_mut(&mut self, kind: ElementKind) -> &mut DefaultCallbacks {
        match kind {
            ElementKind::Node => &mut self.node_callbacks,
            ElementKind::Link => &mut self.link_callbacks,
        }
    }

    /// Create and register a node.
    ///
    /// The label is drawn right away if the node shows it.
    ///
    /// # Errors
    ///
    /// Fails with the registry errors for an invalid or duplicate id.
    pub fn add_node(&mut self, data: NodeData) -> Result<NodeId, GraphError> {
        let node = Node::new(
            &data,
            self.config.node(),
            self.node_callbacks.click.as_ref(),
            self.node_callbacks.hover.as_ref(),
        );
        let id = self.registry.register_node(&data.id, node)?;

        if let Some(node) = self.registry.node(id) {
            debug!(node_id = data.id.as_str(), shape = node.shape().name(); "Node added");
            if node.show_label() {
                self.labels.draw_label(node);
            }
        }
        Ok(id)
    }

    /// Create a link between two registered nodes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DanglingReference`] if an endpoint is missing.
    pub fn add_link(&mut self, data: LinkData) -> Result<LinkId, GraphError> {
        let id = LinkId::new(self.next_link);
        self.registry.register_link(id, data.source, data.target)?;
        self.next_link += 1;

        let link = Link::new(
            id,
            &data,
            self.config.link(),
            self.link_callbacks.click.as_ref(),
            self.link_callbacks.hover.as_ref(),
        );
        debug!(
            link = id.index(),
            source = data.source.to_string(),
            target = data.target.to_string(),
            shape = link.shape().name();
            "Link added"
        );
        self.links.insert(id, link);
        Ok(id)
    }

    /// Replace the whole graph content.
    ///
    /// # Errors
    ///
    /// Stops at the first failing node or link. Entities added before the
    /// failure stay in the graph.
    pub fn set_data(&mut self, data: GraphData) -> Result<(), GraphError> {
        self.clear();
        let (node_count, link_count) = (data.nodes.len(), data.links.len());
        for node in data.nodes {
            self.add_node(node)?;
        }
        for link in data.links {
            self.add_link(link)?;
        }
        info!(nodes = node_count, links = link_count; "Graph data loaded");
        Ok(())
    }

    pub fn node(&self, id: impl Into<NodeId>) -> Option<&Node> {
        self.registry.node(id.into())
    }

    /// Mutable view of a node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] for unknown ids.
    pub fn node_mut(&mut self, id: impl Into<NodeId>) -> Result<NodeMut<'_>, GraphError> {
        let id = id.into();
        let (node, incident) = self
            .registry
            .node_entry_mut(id)
            .ok_or(GraphError::NodeNotFound(id))?;
        Ok(NodeMut::new(
            node,
            &self.links,
            incident,
            &mut self.renderer,
            &mut self.labels,
        ))
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(&id)
    }

    /// Mutable view of a link.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::LinkNotFound`] for unknown ids.
    pub fn link_mut(&mut self, id: LinkId) -> Result<LinkMut<'_>, GraphError> {
        let link = self.links.get_mut(&id).ok_or(GraphError::LinkNotFound(id))?;
        Ok(LinkMut::new(link, &mut self.renderer))
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.registry.nodes()
    }

    /// Links in insertion order.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// Links attached to `id`.
    pub fn links_of(&self, id: NodeId) -> impl Iterator<Item = &Link> {
        self.registry
            .lookup_links_of(id)
            .filter_map(|link| self.links.get(&link))
    }

    /// Remove a link and detach it from its endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::LinkNotFound`] for unknown ids.
    pub fn remove_link(&mut self, id: LinkId) -> Result<Link, GraphError> {
        let link = self
            .links
            .shift_remove(&id)
            .ok_or(GraphError::LinkNotFound(id))?;
        self.registry
            .deregister_link(id, link.source(), link.target());
        debug!(link = id.index(); "Link removed");
        Ok(link)
    }

    /// Remove every node, link and label.
    ///
    /// Link ids are never reused, even across clears.
    pub fn clear(&mut self) {
        for id in self.registry.ids() {
            self.labels.remove_label(id);
        }
        let (nodes, links) = (self.registry.len(), self.links.len());
        self.registry.clear();
        self.links.clear();
        info!(nodes, links; "Graph cleared");
    }

    /// Refresh the labels of nodes that show them, then draw both render
    /// managers.
    pub fn draw(&mut self) {
        for node in self.registry.nodes().filter(|node| node.show_label()) {
            self.labels.draw_label(node);
        }
        self.renderer.draw();
    }

    /// Dispatch a click to the entity's callback.
    ///
    /// Returns whether a callback ran.
    pub fn click(&self, entity: EntityRef) -> bool {
        let callback = match entity {
            EntityRef::Node(id) => self.registry.node(id).and_then(Node::click_callback),
            EntityRef::Link(id) => self.links.get(&id).and_then(Link::click_callback),
        };
        Self::dispatch(callback, entity)
    }

    /// Dispatch a hover to the entity's callback.
    pub fn hover(&self, entity: EntityRef) -> bool {
        let callback = match entity {
            EntityRef::Node(id) => self.registry.node(id).and_then(Node::hover_callback),
            EntityRef::Link(id) => self.links.get(&id).and_then(Link::hover_callback),
        };
        Self::dispatch(callback, entity)
    }

    fn dispatch(callback: Option<&Callback>, entity: EntityRef) -> bool {
        match callback {
            Some(callback) => {
                callback.call(entity);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_link_does_not_consume_id_on_failure() {
        let mut graph = Graph::new(AppConfig::default());
        let a = graph.add_node(NodeData::new("a")).unwrap();

        assert!(graph.add_link(LinkData::new(a, "missing")).is_err());
        let link = graph.add_link(LinkData::new(a, a)).unwrap();
        assert_eq!(link.index(), 0);
    }

    #[test]
    fn test_clear_keeps_link_ids_unique() {
        let mut graph = Graph::new(AppConfig::default());
        let a = graph.add_node(NodeData::new("a")).unwrap();
        let first = graph.add_link(LinkData::new(a, a)).unwrap();

        graph.clear();
        assert_eq!(graph.nodes().count(), 0);
        assert_eq!(graph.links().count(), 0);

        let a = graph.add_node(NodeData::new("a")).unwrap();
        let second = graph.add_link(LinkData::new(a, a)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_graph_data_from_toml() {
        let data: GraphData = toml::from_str(
            r#"
            [[nodes]]
            id = "a"

            [[nodes]]
            id = "b"
            x = 10

            [[links]]
            source = "a"
            target = "b"
            "#,
        )
        .unwrap();

        let mut graph = Graph::new(AppConfig::default());
        graph.set_data(data).unwrap();
        assert_eq!(graph.nodes().count(), 2);
        assert_eq!(graph.links_of(NodeId::new("b")).count(), 1);
    }

    #[test]
    fn test_set_data_keeps_entities_before_failure() {
        let data = GraphData {
            nodes: vec![NodeData::new("kept"), NodeData::new("kept"), NodeData::new("lost")],
            links: Vec::new(),
        };

        let mut graph = Graph::new(AppConfig::default());
        let err = graph.set_data(data).unwrap_err();

        assert_eq!(err, GraphError::DuplicateId(NodeId::new("kept")));
        assert_eq!(graph.nodes().count(), 1);
        assert!(graph.node("kept").is_some());
        assert!(graph.node("lost").is_none());
    }
}
