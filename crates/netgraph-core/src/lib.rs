//! netgraph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the netgraph entity
//! model. It includes:
//!
//! - **Identifiers**: String-interned node identifiers ([`identifier::NodeId`])
//! - **Colors**: Normalized RGBA colors with CSS parsing ([`color::Color`])
//! - **Geometry**: Points and their partial patches ([`geometry`] module)
//! - **Style**: Per-shape style records, default style trees and the
//!   style-override merge ([`style`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod style;
