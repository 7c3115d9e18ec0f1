//! Entity model of a node/link graph visualization.
//!
//! `netgraph` keeps the canonical state of a graph's nodes and links, resolves
//! each entity's visual style from configurable defaults, and reports every
//! attribute change to a rendering backend.
//!
//! # Overview
//!
//! - [`Graph`] owns the nodes, links, render managers and label overlay.
//! - [`NodeMut`] / [`LinkMut`] are the views through which entities change.
//!   Each setter stores the value, notifies the [`RenderManager`] of the
//!   entity's kind and returns the stored value.
//! - [`Registry`] enforces unique, immutable node ids and tracks the links
//!   attached to every node, so that moving a node also notifies its links.
//! - [`LabelOverlay`] shows node labels; [`SvgLabelOverlay`] renders them as
//!   an SVG document.
//!
//! # Example
//!
//! ```
//! use netgraph::{
//!     Graph, LinkData, NodeData, RecordingRenderManager, Renderer, config::AppConfig,
//! };
//!
//! let recorder = RecordingRenderManager::default();
//! let mut graph = Graph::new(AppConfig::default())
//!     .with_renderer(Renderer::new(recorder.clone(), recorder.clone()));
//!
//! let a = graph.add_node(NodeData::new("a")).unwrap();
//! let b = graph.add_node(NodeData::new("b")).unwrap();
//! graph.add_link(LinkData::new(a, b)).unwrap();
//!
//! graph.node_mut(a).unwrap().set_x(40.0);
//!
//! let keys: Vec<_> = recorder.take().into_iter().map(|change| change.key).collect();
//! assert_eq!(keys, ["position", "source"]);
//! ```

pub use netgraph_core::{color, geometry, identifier, style};

pub mod config;

mod element;
mod error;
mod graph;
mod label;
mod link;
mod node;
mod registry;
mod render;

pub use element::{Callback, Element, ElementKind};
pub use error::GraphError;
pub use graph::{Graph, GraphData};
pub use label::{Label, LabelOverlay, SvgLabelOverlay};
pub use link::{Link, LinkData, LinkMut};
pub use node::{Node, NodeData, NodeMut};
pub use registry::Registry;
pub use render::{
    AttributeChange, EntityRef, LinkId, LogRenderManager, RecordingRenderManager, RenderManager,
    Renderer,
};
