//! Graph input files.
//!
//! An input file holds `[[nodes]]` and `[[links]]` tables in the same shape
//! as [`NodeData`] and [`LinkData`], followed by optional `[[updates]]`:
//!
//! ```toml
//! [[nodes]]
//! id = "a"
//! text = "Alpha"
//!
//! [[nodes]]
//! id = "b"
//! x = 40
//!
//! [[links]]
//! source = "a"
//! target = "b"
//!
//! [[updates]]
//! node = "a"
//! accessor = "position"
//! args = [10, 20]
//!
//! [[updates]]
//! link = 0
//! accessor = "strokeWidth"
//! args = [3]
//! ```
//!
//! `link` addresses links by their position in `[[links]]`.

use std::fmt;

use log::debug;
use serde::Deserialize;

use netgraph::{
    Graph, GraphData, LabelOverlay, LinkData, NodeData,
    identifier::NodeId,
    style::{Value, ValuePatch},
};

use crate::error::CliError;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputDocument {
    pub nodes: Vec<NodeData>,
    pub links: Vec<LinkData>,
    pub updates: Vec<Update>,
}

impl InputDocument {
    /// Split into the graph content and the updates to run on it.
    pub fn into_parts(self) -> (GraphData, Vec<Update>) {
        (
            GraphData {
                nodes: self.nodes,
                links: self.links,
            },
            self.updates,
        )
    }
}

/// Entity addressed by an update.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Node(NodeId),
    /// Index into the input's `[[links]]`.
    Link(usize),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => write!(f, "node `{id}`"),
            Self::Link(index) => write!(f, "link {index}"),
        }
    }
}

/// One accessor call.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    #[serde(flatten)]
    pub target: Target,
    pub accessor: String,
    #[serde(default)]
    pub args: Vec<ValuePatch>,
}

impl Update {
    /// Run the accessor through the graph's dynamic accessor path.
    ///
    /// `index` is the position of this update in the input, used in errors.
    pub fn apply<L: LabelOverlay>(
        &self,
        index: usize,
        graph: &mut Graph<L>,
    ) -> Result<Value, CliError> {
        let result = match self.target {
            Target::Node(id) => graph
                .node_mut(id)
                .and_then(|mut node| node.call(&self.accessor, &self.args)),
            Target::Link(position) => {
                let id = graph
                    .links()
                    .nth(position)
                    .map(|link| link.id())
                    .ok_or(CliError::UnknownLink { index, position })?;
                graph
                    .link_mut(id)
                    .and_then(|mut link| link.call(&self.accessor, &self.args))
            }
        };

        let value = result.map_err(|source| CliError::Update {
            index,
            target: self.target.to_string(),
            accessor: self.accessor.clone(),
            source,
        })?;
        debug!(target = self.target.to_string(), accessor = self.accessor.as_str(), value:?; "Update applied");
        Ok(value)
    }
}
