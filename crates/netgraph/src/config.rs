//! Configuration types for netgraph.
//!
//! All types implement [`serde::Deserialize`] and fall back to defaults for
//! every missing field, so a configuration file only needs to name what it
//! changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Canvas size and background plus the per-kind sections.
//! - [`NodeConfig`] - Default node style tree and label settings.
//! - [`LinkConfig`] - Default link style tree.
//! - [`LabelConfig`] - Font settings of the label overlay.
//!
//! # Example
//!
//! ```
//! # use netgraph::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     width = 1024
//!
//!     [node.style.circle]
//!     radius = 8
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.width(), 1024.0);
//! assert_eq!(config.height(), 600.0);
//! assert_eq!(config.node().style().circle.radius(), 8.0);
//! ```

use serde::Deserialize;

use netgraph_core::{
    color::Color,
    geometry::Point,
    style::{LinkStyleTree, NodeStyleTree},
};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    width: f32,
    height: f32,
    background_color: Color,
    node: NodeConfig,
    link: LinkConfig,
    label: LabelConfig,
}

impl AppConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Canvas color for the render managers that paint nodes and links.
    ///
    /// The label overlay never paints it: it stays transparent so the canvas
    /// underneath shows through.
    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn node(&self) -> &NodeConfig {
        &self.node
    }

    pub fn link(&self) -> &LinkConfig {
        &self.link
    }

    pub fn label(&self) -> &LabelConfig {
        &self.label
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_node(mut self, node: NodeConfig) -> Self {
        self.node = node;
        self
    }

    pub fn with_link(mut self, link: LinkConfig) -> Self {
        self.link = link;
        self
    }

    pub fn with_label(mut self, label: LabelConfig) -> Self {
        self.label = label;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            background_color: Color::rgba(1.0, 1.0, 1.0, 1.0),
            node: NodeConfig::default(),
            link: LinkConfig::default(),
            label: LabelConfig::default(),
        }
    }
}

/// Node defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeConfig {
    style: NodeStyleTree,
    show_label: bool,
    text_offset: Point,
}

impl NodeConfig {
    /// Default style tree applied to nodes without an individual style.
    pub fn style(&self) -> &NodeStyleTree {
        &self.style
    }

    /// Whether nodes show their label unless their data says otherwise.
    pub fn show_label(&self) -> bool {
        self.show_label
    }

    /// Label offset relative to the node position.
    pub fn text_offset(&self) -> Point {
        self.text_offset
    }

    pub fn with_style(mut self, style: NodeStyleTree) -> Self {
        self.style = style;
        self
    }

    pub fn with_show_label(mut self, show_label: bool) -> Self {
        self.show_label = show_label;
        self
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            style: NodeStyleTree::default(),
            show_label: false,
            text_offset: Point::new(8.0, 0.0),
        }
    }
}

/// Link defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    style: LinkStyleTree,
}

impl LinkConfig {
    pub fn style(&self) -> &LinkStyleTree {
        &self.style
    }

    pub fn with_style(mut self, style: LinkStyleTree) -> Self {
        self.style = style;
        self
    }
}

/// Font settings of the label overlay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    font_family: String,
    font_size: f32,
    color: Color,
}

impl LabelConfig {
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 12.0,
            color: Color::default(),
        }
    }
}
