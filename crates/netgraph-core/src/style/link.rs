//! Link shapes and their style records.

use std::{fmt, str::FromStr};

use log::debug;
use serde::Deserialize;

use crate::{
    color::{Color, PartialColor},
    style::{StyleError, StyleRecord, Value, ValuePatch},
};

/// Visual variant of a link.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkShape {
    #[default]
    Line,
    Curve,
}

impl LinkShape {
    pub fn name(self) -> &'static str {
        match self {
            Self::Line => LineStyle::SHAPE,
            Self::Curve => CurveStyle::SHAPE,
        }
    }
}

impl fmt::Display for LinkShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LinkShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(Self::Line),
            "curve" => Ok(Self::Curve),
            _ => Err(format!("invalid link shape `{s}`, valid values: line, curve")),
        }
    }
}

/// Partial link style supplied with link data.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LinkStylePatch {
    pub shape: Option<LinkShape>,
    pub curveness: Option<f32>,
    pub stroke_color: Option<PartialColor>,
    pub stroke_width: Option<f32>,
}

impl LinkStylePatch {
    /// Names of the style keys this patch sets.
    pub fn present_keys(&self) -> Vec<&'static str> {
        [
            ("curveness", self.curveness.is_some()),
            ("strokeColor", self.stroke_color.is_some()),
            ("strokeWidth", self.stroke_width.is_some()),
        ]
        .into_iter()
        .filter_map(|(key, present)| present.then_some(key))
        .collect()
    }
}

const LINK_STROKE: Color = Color::rgba(0.5, 0.5, 0.5, 0.5);
const LINK_STROKE_WIDTH: f32 = 2.0;

shape_style! {
    /// Style of a straight link.
    pub struct LineStyle("line") patched by LinkStylePatch {
        stroke_color, set_stroke_color: Color => "strokeColor",
        stroke_width, set_stroke_width: f32 => "strokeWidth",
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            stroke_color: LINK_STROKE,
            stroke_width: LINK_STROKE_WIDTH,
        }
    }
}

shape_style! {
    /// Style of a curved link.
    pub struct CurveStyle("curve") patched by LinkStylePatch {
        /// Bend of the curve relative to the link length; 0 is straight.
        curveness, set_curveness: f32 => "curveness",
        stroke_color, set_stroke_color: Color => "strokeColor",
        stroke_width, set_stroke_width: f32 => "strokeWidth",
    }
}

impl Default for CurveStyle {
    fn default() -> Self {
        Self {
            curveness: 0.2,
            stroke_color: LINK_STROKE,
            stroke_width: LINK_STROKE_WIDTH,
        }
    }
}

/// Default link style tree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkStyleTree {
    pub shape: LinkShape,
    pub line: LineStyle,
    pub curve: CurveStyle,
}

impl LinkStyleTree {
    /// The tree's entry for `shape`.
    pub fn entry(&self, shape: LinkShape) -> LinkStyle {
        match shape {
            LinkShape::Line => LinkStyle::Line(self.line),
            LinkShape::Curve => LinkStyle::Curve(self.curve),
        }
    }
}

/// Resolved style of a link, tagged by shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkStyle {
    Line(LineStyle),
    Curve(CurveStyle),
}

impl LinkStyle {
    pub fn stroke_color(&self) -> Color {
        match self {
            Self::Line(style) => style.stroke_color(),
            Self::Curve(style) => style.stroke_color(),
        }
    }

    pub fn stroke_width(&self) -> f32 {
        match self {
            Self::Line(style) => style.stroke_width(),
            Self::Curve(style) => style.stroke_width(),
        }
    }

    /// Curveness of a curved link, `None` for straight ones.
    pub fn curveness(&self) -> Option<f32> {
        match self {
            Self::Curve(style) => Some(style.curveness()),
            Self::Line(_) => None,
        }
    }

    pub fn set_stroke_color(&mut self, patch: impl Into<PartialColor>) -> Color {
        let patch = patch.into();
        match self {
            Self::Line(style) => style.set_stroke_color(patch),
            Self::Curve(style) => style.set_stroke_color(patch),
        }
    }

    pub fn set_stroke_width(&mut self, width: f32) -> f32 {
        match self {
            Self::Line(style) => style.set_stroke_width(width),
            Self::Curve(style) => style.set_stroke_width(width),
        }
    }

    /// Set the curveness of a curved link.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownKey`] for straight links.
    pub fn set_curveness(&mut self, curveness: f32) -> Result<f32, StyleError> {
        match self {
            Self::Curve(style) => Ok(style.set_curveness(curveness)),
            Self::Line(_) => Err(StyleError::UnknownKey {
                shape: LineStyle::SHAPE,
                key: "curveness".to_string(),
            }),
        }
    }
}

impl StyleRecord for LinkStyle {
    type Shape = LinkShape;
    type Patch = LinkStylePatch;
    type Tree = LinkStyleTree;

    fn resolve(tree: &LinkStyleTree, individual: Option<&LinkStylePatch>) -> Self {
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
        match &mut style {
            Self::Line(inner) => inner.apply_patch(patch),
            Self::Curve(inner) => inner.apply_patch(patch),
        }
        style
    }

    fn shape(&self) -> LinkShape {
        match self {
            Self::Line(_) => LinkShape::Line,
            Self::Curve(_) => LinkShape::Curve,
        }
    }

    fn shape_name(&self) -> &'static str {
        self.shape().name()
    }

    fn keys(&self) -> &'static [&'static str] {
        match self {
            Self::Line(_) => LineStyle::KEYS,
            Self::Curve(_) => CurveStyle::KEYS,
        }
    }

    fn get(&self, key: &str) -> Option<Value> {
        match self {
            Self::Line(style) => style.get(key),
            Self::Curve(style) => style.get(key),
        }
    }

    fn apply(&mut self, key: &str, value: ValuePatch) -> Result<Value, StyleError> {
        match self {
            Self::Line(style) => style.apply(key, value),
            Self::Curve(style) => style.apply(key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_default_link_style() {
        let style = LinkStyle::resolve(&LinkStyleTree::default(), None);
        assert_eq!(style.shape(), LinkShape::Line);
        assert_eq!(style.stroke_color(), Color::rgba(0.5, 0.5, 0.5, 0.5));
        assert_approx_eq!(f32, style.stroke_width(), 2.0);
        assert_eq!(style.curveness(), None);
    }

    #[test]
    fn test_resolve_curve_with_overrides() {
        let patch = LinkStylePatch {
            shape: Some(LinkShape::Curve),
            curveness: Some(0.6),
            stroke_color: Some(PartialColor {
                r: Some(1.0),
                ..PartialColor::default()
            }),
            ..LinkStylePatch::default()
        };
        let style = LinkStyle::resolve(&LinkStyleTree::default(), Some(&patch));

        assert_eq!(style.shape(), LinkShape::Curve);
        assert_eq!(style.curveness(), Some(0.6));
        assert_eq!(style.stroke_color(), Color::rgba(1.0, 0.5, 0.5, 0.5));
    }

    #[test]
    fn test_curveness_ignored_for_lines() {
        let patch = LinkStylePatch {
            curveness: Some(0.6),
            ..LinkStylePatch::default()
        };
        let mut style = LinkStyle::resolve(&LinkStyleTree::default(), Some(&patch));
        assert_eq!(style, LinkStyle::Line(LineStyle::default()));
        assert!(style.set_curveness(0.1).is_err());
    }

    #[test]
    fn test_apply_by_name() {
        let mut style = LinkStyle::Curve(CurveStyle::default());
        assert_eq!(
            style.apply("curveness", ValuePatch::Number(0.8)),
            Ok(Value::Number(0.8))
        );
        assert_eq!(style.keys(), &["curveness", "strokeColor", "strokeWidth"]);
    }

    #[test]
    fn test_patch_deserializes_from_toml() {
        let patch: LinkStylePatch =
            toml::from_str("shape = \"curve\"\nstrokeColor = { a = 1.0 }").unwrap();
        assert_eq!(patch.shape, Some(LinkShape::Curve));
        assert_eq!(patch.stroke_color, Some(PartialColor::alpha(1.0)));
        assert_eq!(patch.present_keys(), vec!["strokeColor"]);
    }
}
