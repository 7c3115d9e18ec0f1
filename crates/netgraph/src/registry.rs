//! Identity registry.
//!
//! Maps node ids to nodes, enforcing uniqueness and immutability, and keeps
//! for each node the set of links attached to it.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use log::debug;

use netgraph_core::identifier::NodeId;

use crate::{error::GraphError, node::Node, render::LinkId};

#[derive(Debug, Default)]
pub struct Registry {
    nodes: IndexMap<NodeId, Node>,
    incident: HashMap<NodeId, IndexSet<LinkId>>,
}

impl Registry {
    /// Register `node` under `id`.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`GraphError::InvalidId`] if `id` is empty or contains whitespace.
    /// - [`GraphError::DuplicateId`] if another node has `id`.
    /// - [`GraphError::ImmutableId`] if `node` already has an id.
    pub(crate) fn register_node(&mut self, id: &str, mut node: Node) -> Result<NodeId, GraphError> {
        if !NodeId::is_valid(id) {
            return Err(GraphError::InvalidId(id.to_string()));
        }
        let node_id = NodeId::new(id);
        if self.nodes.contains_key(&node_id) {
            return Err(GraphError::DuplicateId(node_id));
        }
        node.assign_id(node_id)?;

        debug!(node_id = id; "Node registered");
        self.incident.entry(node_id).or_default();
        self.nodes.insert(node_id, node);
        Ok(node_id)
    }

    /// Add `link` to the incident sets of both endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DanglingReference`] if an endpoint is not
    /// registered; nothing is added in that case.
    pub(crate) fn register_link(
        &mut self,
        link: LinkId,
        source: NodeId,
        target: NodeId,
    ) -> Result<(), GraphError> {
        for endpoint in [source, target] {
            if !self.contains(endpoint) {
                return Err(GraphError::DanglingReference(endpoint));
            }
        }
        for endpoint in [source, target] {
            self.incident.entry(endpoint).or_default().insert(link);
        }
        Ok(())
    }

    pub(crate) fn deregister_link(&mut self, link: LinkId, source: NodeId, target: NodeId) {
        for endpoint in [source, target] {
            if let Some(links) = self.incident.get_mut(&endpoint) {
                links.shift_remove(&link);
            }
        }
    }

    /// Links attached to `id`, in insertion order; empty for unknown ids.
    pub fn lookup_links_of(&self, id: NodeId) -> impl Iterator<Item = LinkId> + '_ {
        self.incident.get(&id).into_iter().flatten().copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// The node with `id` together with its incident-link set.
    pub(crate) fn node_entry_mut(
        &mut self,
        id: NodeId,
    ) -> Option<(&mut Node, Option<&IndexSet<LinkId>>)> {
        let node = self.nodes.get_mut(&id)?;
        Some((node, self.incident.get(&id)))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Registered nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.incident.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::NodeConfig, node::NodeData};

    fn node(id: &str) -> Node {
        Node::new(&NodeData::new(id), &NodeConfig::default(), None, None)
    }

    #[test]
    fn test_register_node() {
        let mut registry = Registry::default();
        let id = registry.register_node("a", node("a")).unwrap();

        assert_eq!(id, "a");
        assert!(registry.contains(id));
        assert_eq!(registry.node(id).map(Node::id), Some(id));
        assert_eq!(registry.lookup_links_of(id).count(), 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_invalid_ids() {
        let mut registry = Registry::default();
        for bad in ["", " ", "a b", "tab\there", "line\n"] {
            assert_eq!(
                registry.register_node(bad, node(bad)),
                Err(GraphError::InvalidId(bad.to_string()))
            );
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_duplicate_keeps_first() {
        let mut registry = Registry::default();
        let placed = NodeData::new("a").at(1.0, 1.0);
        let first = registry
            .register_node("a", Node::new(&placed, &NodeConfig::default(), None, None))
            .unwrap();

        let err = registry.register_node("a", node("a")).unwrap_err();
        assert_eq!(err, GraphError::DuplicateId(first));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.node(first).map(Node::x), Some(1.0));
    }

    #[test]
    fn test_register_node_with_id_is_immutable() {
        let mut registry = Registry::default();
        let mut already_named = node("x");
        already_named.assign_id(NodeId::new("x")).unwrap();

        let err = registry.register_node("y", already_named).unwrap_err();
        assert_eq!(err, GraphError::ImmutableId(NodeId::new("x")));
        assert!(!registry.contains(NodeId::new("y")));
    }

    #[test]
    fn test_checks_run_in_order() {
        let mut registry = Registry::default();
        registry.register_node("dup", node("dup")).unwrap();

        let mut named = node("dup");
        named.assign_id(NodeId::new("dup")).unwrap();
        // Duplicate is reported before immutability.
        assert!(matches!(
            registry.register_node("dup", named),
            Err(GraphError::DuplicateId(_))
        ));

        let mut named = node("z");
        named.assign_id(NodeId::new("z")).unwrap();
        // Invalid is reported before everything else.
        assert!(matches!(
            registry.register_node("", named),
            Err(GraphError::InvalidId(_))
        ));
    }

    #[test]
    fn test_register_and_deregister_links() {
        let mut registry = Registry::default();
        let a = registry.register_node("a", node("a")).unwrap();
        let b = registry.register_node("b", node("b")).unwrap();

        registry.register_link(LinkId::new(0), a, b).unwrap();
        registry.register_link(LinkId::new(1), a, a).unwrap();

        assert_eq!(
            registry.lookup_links_of(a).collect::<Vec<_>>(),
            vec![LinkId::new(0), LinkId::new(1)]
        );
        assert_eq!(registry.lookup_links_of(b).collect::<Vec<_>>(), vec![LinkId::new(0)]);

        registry.deregister_link(LinkId::new(0), a, b);
        assert_eq!(registry.lookup_links_of(a).collect::<Vec<_>>(), vec![LinkId::new(1)]);
        assert_eq!(registry.lookup_links_of(b).count(), 0);
    }

    #[test]
    fn test_dangling_link_rejected() {
        let mut registry = Registry::default();
        let a = registry.register_node("a", node("a")).unwrap();
        let ghost = NodeId::new("ghost");

        assert_eq!(
            registry.register_link(LinkId::new(0), a, ghost),
            Err(GraphError::DanglingReference(ghost))
        );
        assert_eq!(registry.lookup_links_of(a).count(), 0);
    }
}
