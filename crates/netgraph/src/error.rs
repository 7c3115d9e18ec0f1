//! Error types for graph operations.
//!
//! Every failure of the entity layer is reported through [`GraphError`].
//! A failing single operation leaves the graph unchanged. A bulk load with
//! [`Graph::set_data`](crate::Graph::set_data) stops at the first failure and
//! keeps the entities it added before it.

use thiserror::Error;

use netgraph_core::{identifier::NodeId, style::StyleError};

use crate::render::{EntityRef, LinkId};

/// The main error type for graph operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("invalid node id `{0}`: ids must be non-empty and contain no whitespace")]
    InvalidId(String),

    #[error("duplicate node id `{0}`")]
    DuplicateId(NodeId),

    #[error("node already has id `{0}`; node ids are immutable")]
    ImmutableId(NodeId),

    #[error("`{accessor}` takes {expected} arguments, got {found}")]
    Arity {
        accessor: String,
        expected: &'static str,
        found: usize,
    },

    #[error("link endpoint `{0}` is not a registered node")]
    DanglingReference(NodeId),

    #[error("node `{0}` not found")]
    NodeNotFound(NodeId),

    #[error("{0} not found")]
    LinkNotFound(LinkId),

    #[error("{entity} has no accessor `{accessor}`")]
    UnknownAccessor { entity: EntityRef, accessor: String },

    #[error("`{0}` is read-only")]
    ReadOnly(String),

    #[error("Style error: {0}")]
    Style(#[from] StyleError),
}

impl GraphError {
    pub(crate) fn arity(accessor: &str, expected: &'static str, found: usize) -> Self {
        Self::Arity {
            accessor: accessor.to_string(),
            expected,
            found,
        }
    }
}
