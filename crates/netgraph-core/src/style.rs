//! Style records and the style-override merge.
//!
//! Each entity kind (node, link) has a small set of shape variants, and every
//! shape has one statically declared style struct. A default style tree holds
//! one complete entry per shape plus the default shape tag; an individual
//! entity resolves its style by picking the tree entry for its effective
//! shape and merging its own partial style on top.
//!
//! # Overview
//!
//! - [`StyleRecord`]: the contract shared by [`NodeStyle`] and [`LinkStyle`]
//! - [`StyleValue`]: the per-key merge schema (scalar keys replace, composite
//!   keys merge channel by channel)
//! - [`Value`] / [`ValuePatch`]: by-name views of style values used by the
//!   dynamic accessor path
//!
//! # Example
//!
//! ```
//! use netgraph_core::color::PartialColor;
//! use netgraph_core::style::{NodeShape, NodeStylePatch, NodeStyleTree, NodeStyle, StyleRecord};
//!
//! let tree = NodeStyleTree::default();
//! let patch = NodeStylePatch {
//!     shape: Some(NodeShape::Rect),
//!     fill: Some(PartialColor::alpha(0.2)),
//!     ..NodeStylePatch::default()
//! };
//!
//! let style = NodeStyle::resolve(&tree, Some(&patch));
//! assert_eq!(style.shape(), NodeShape::Rect);
//! assert_eq!(style.fill().alpha(), 0.2);
//! ```

use std::fmt;

use thiserror::Error;

#[macro_use]
mod macros;

mod link;
mod node;
mod value;

pub use link::{CurveStyle, LineStyle, LinkShape, LinkStyle, LinkStylePatch, LinkStyleTree};
pub use node::{
    CircleStyle, NodeShape, NodeStyle, NodeStylePatch, NodeStyleTree, RectStyle, TriangleStyle,
};
pub use value::{StyleValue, Value, ValuePatch};

/// Errors raised while reading or writing a style key by name.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("shape `{shape}` has no style key `{key}`")]
    UnknownKey { shape: &'static str, key: String },

    #[error("style key `{key}` expects a {expected} value, got {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    InvalidColor(String),
}

/// A resolved style record for one entity kind.
///
/// Implemented by [`NodeStyle`] and [`LinkStyle`]; the element layer is
/// generic over it.
pub trait StyleRecord: Clone + fmt::Debug {
    /// Shape tag of this kind.
    type Shape: Copy + fmt::Debug + fmt::Display + PartialEq;

    /// Caller-supplied partial style.
    type Patch: fmt::Debug;

    /// Default style tree with one entry per shape.
    type Tree: fmt::Debug;

    /// Resolve an individual style against the default tree.
    ///
    /// The effective shape is the patch's shape if it sets one, otherwise the
    /// tree's default shape. Without a patch the result is exactly the tree's
    /// entry for its default shape.
    fn resolve(tree: &Self::Tree, individual: Option<&Self::Patch>) -> Self;

    /// The resolved shape.
    fn shape(&self) -> Self::Shape;

    /// Name of the resolved shape, as used in configuration.
    fn shape_name(&self) -> &'static str;

    /// Style keys declared by the resolved shape.
    fn keys(&self) -> &'static [&'static str];

    /// Read a style key by name.
    fn get(&self, key: &str) -> Option<Value>;

    /// Merge a value into a style key by name, returning the stored result.
    fn apply(&mut self, key: &str, value: ValuePatch) -> Result<Value, StyleError>;
}
