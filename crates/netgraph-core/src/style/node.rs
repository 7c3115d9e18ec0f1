//! Node shapes and their style records.

use std::{fmt, str::FromStr};

use log::debug;
use serde::Deserialize;

use crate::{
    color::{Color, PartialColor},
    geometry::{PartialPoint, Point},
    style::{StyleError, StyleRecord, Value, ValuePatch},
};

/// Visual variant of a node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    #[default]
    Circle,
    Rect,
    Triangle,
}

impl NodeShape {
    pub fn name(self) -> &'static str {
        match self {
            Self::Circle => CircleStyle::SHAPE,
            Self::Rect => RectStyle::SHAPE,
            Self::Triangle => TriangleStyle::SHAPE,
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circle" => Ok(Self::Circle),
            "rect" => Ok(Self::Rect),
            "triangle" => Ok(Self::Triangle),
            _ => Err(format!(
                "invalid node shape `{s}`, valid values: circle, rect, triangle"
            )),
        }
    }
}

/// Partial node style supplied with node data.
///
/// Keys that the effective shape does not declare are ignored during
/// resolution.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct NodeStylePatch {
    pub shape: Option<NodeShape>,
    pub radius: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub rotate: Option<f32>,
    pub vertex_alpha: Option<PartialPoint>,
    pub vertex_beta: Option<PartialPoint>,
    pub vertex_gamma: Option<PartialPoint>,
    pub fill: Option<PartialColor>,
    pub stroke_color: Option<PartialColor>,
    pub stroke_width: Option<f32>,
}

impl NodeStylePatch {
    /// Names of the style keys this patch sets.
    pub fn present_keys(&self) -> Vec<&'static str> {
        [
            ("radius", self.radius.is_some()),
            ("width", self.width.is_some()),
            ("height", self.height.is_some()),
            ("rotate", self.rotate.is_some()),
            ("vertexAlpha", self.vertex_alpha.is_some()),
            ("vertexBeta", self.vertex_beta.is_some()),
            ("vertexGamma", self.vertex_gamma.is_some()),
            ("fill", self.fill.is_some()),
            ("strokeColor", self.stroke_color.is_some()),
            ("strokeWidth", self.stroke_width.is_some()),
        ]
        .into_iter()
        .filter_map(|(key, present)| present.then_some(key))
        .collect()
    }
}

const NODE_FILL: Color = Color::rgba(0.3, 0.5, 0.5, 0.5);
const NODE_STROKE: Color = Color::rgba(0.6, 0.6, 0.6, 0.5);
const NODE_STROKE_WIDTH: f32 = 1.0;

shape_style! {
    /// Style of a circular node.
    pub struct CircleStyle("circle") patched by NodeStylePatch {
        radius, set_radius: f32 => "radius",
        fill, set_fill: Color => "fill",
        stroke_color, set_stroke_color: Color => "strokeColor",
        stroke_width, set_stroke_width: f32 => "strokeWidth",
    }
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            radius: 5.0,
            fill: NODE_FILL,
            stroke_color: NODE_STROKE,
            stroke_width: NODE_STROKE_WIDTH,
        }
    }
}

shape_style! {
    /// Style of a rectangular node, centered on the node position.
    pub struct RectStyle("rect") patched by NodeStylePatch {
        width, set_width: f32 => "width",
        height, set_height: f32 => "height",
        /// Rotation in radians.
        rotate, set_rotate: f32 => "rotate",
        fill, set_fill: Color => "fill",
        stroke_color, set_stroke_color: Color => "strokeColor",
        stroke_width, set_stroke_width: f32 => "strokeWidth",
    }
}

impl Default for RectStyle {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 10.0,
            rotate: 0.0,
            fill: NODE_FILL,
            stroke_color: NODE_STROKE,
            stroke_width: NODE_STROKE_WIDTH,
        }
    }
}

shape_style! {
    /// Style of a triangular node. Vertices are relative to the node position.
    pub struct TriangleStyle("triangle") patched by NodeStylePatch {
        vertex_alpha, set_vertex_alpha: Point => "vertexAlpha",
        vertex_beta, set_vertex_beta: Point => "vertexBeta",
        vertex_gamma, set_vertex_gamma: Point => "vertexGamma",
        fill, set_fill: Color => "fill",
        stroke_color, set_stroke_color: Color => "strokeColor",
        stroke_width, set_stroke_width: f32 => "strokeWidth",
    }
}

impl Default for TriangleStyle {
    fn default() -> Self {
        Self {
            vertex_alpha: Point::new(0.0, -5.0),
            vertex_beta: Point::new(-5.0, 5.0),
            vertex_gamma: Point::new(5.0, 5.0),
            fill: NODE_FILL,
            stroke_color: NODE_STROKE,
            stroke_width: NODE_STROKE_WIDTH,
        }
    }
}

/// Default node style tree: the default shape plus one complete entry per
/// shape, so every shape always resolves.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeStyleTree {
    pub shape: NodeShape,
    pub circle: CircleStyle,
    pub rect: RectStyle,
    pub triangle: TriangleStyle,
}

impl NodeStyleTree {
    /// The tree's entry for `shape`.
    pub fn entry(&self, shape: NodeShape) -> NodeStyle {
        match shape {
            NodeShape::Circle => NodeStyle::Circle(self.circle),
            NodeShape::Rect => NodeStyle::Rect(self.rect),
            NodeShape::Triangle => NodeStyle::Triangle(self.triangle),
        }
    }
}

/// Resolved style of a node, tagged by shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeStyle {
    Circle(CircleStyle),
    Rect(RectStyle),
    Triangle(TriangleStyle),
}

macro_rules! each_node_shape {
    ($style:expr, $inner:ident => $body:expr) => {
        match $style {
            NodeStyle::Circle($inner) => $body,
            NodeStyle::Rect($inner) => $body,
            NodeStyle::Triangle($inner) => $body,
        }
    };
}

impl NodeStyle {
    pub fn fill(&self) -> Color {
        each_node_shape!(self, style => style.fill())
    }

    pub fn stroke_color(&self) -> Color {
        each_node_shape!(self, style => style.stroke_color())
    }

    pub fn stroke_width(&self) -> f32 {
        each_node_shape!(self, style => style.stroke_width())
    }

    /// Radius of a circular node, `None` for other shapes.
    pub fn radius(&self) -> Option<f32> {
        match self {
            Self::Circle(style) => Some(style.radius()),
            _ => None,
        }
    }

    pub fn set_fill(&mut self, patch: impl Into<PartialColor>) -> Color {
        let patch = patch.into();
        each_node_shape!(self, style => style.set_fill(patch))
    }

    pub fn set_stroke_color(&mut self, patch: impl Into<PartialColor>) -> Color {
        let patch = patch.into();
        each_node_shape!(self, style => style.set_stroke_color(patch))
    }

    pub fn set_stroke_width(&mut self, width: f32) -> f32 {
        each_node_shape!(self, style => style.set_stroke_width(width))
    }

    /// Set the radius of a circular node.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownKey`] if the node is not a circle.
    pub fn set_radius(&mut self, radius: f32) -> Result<f32, StyleError> {
        match self {
            Self::Circle(style) => Ok(style.set_radius(radius)),
            other => Err(StyleError::UnknownKey {
                shape: other.shape().name(),
                key: "radius".to_string(),
            }),
        }
    }

    fn apply_patch(&mut self, patch: &NodeStylePatch) {
        each_node_shape!(self, style => style.apply_patch(patch))
    }
}

impl StyleRecord for NodeStyle {
    type Shape = NodeShape;
    type Patch = NodeStylePatch;
    type Tree = NodeStyleTree;

    fn resolve(tree: &NodeStyleTree, individual: Option<&NodeStylePatch>) -> Self {
        let Some(patch) = individual else {
            return tree.entry(tree.shape);
        };

        let shape = patch.shape.unwrap_or(tree.shape);
        let mut style = tree.entry(shape);
        for key in patch.present_keys() {
            if !style.keys().contains(&key) {
                debug!(shape = shape.name(), key; "Ignoring style key not declared by shape");
            }
        }
        style.apply_patch(patch);
        style
    }

    fn shape(&self) -> NodeShape {
        match self {
            Self::Circle(_) => NodeShape::Circle,
            Self::Rect(_) => NodeShape::Rect,
            Self::Triangle(_) => NodeShape::Triangle,
        }
    }

    fn shape_name(&self) -> &'static str {
        self.shape().name()
    }

    fn keys(&self) -> &'static [&'static str] {
        match self {
            Self::Circle(_) => CircleStyle::KEYS,
            Self::Rect(_) => RectStyle::KEYS,
            Self::Triangle(_) => TriangleStyle::KEYS,
        }
    }

    fn get(&self, key: &str) -> Option<Value> {
        each_node_shape!(self, style => style.get(key))
    }

    fn apply(&mut self, key: &str, value: ValuePatch) -> Result<Value, StyleError> {
        each_node_shape!(self, style => style.apply(key, value))
    }
}
