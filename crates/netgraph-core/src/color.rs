//! Color handling for netgraph entities
//!
//! This module provides the [`Color`] type, four normalized `f32` channels as
//! consumed by the renderer, and [`PartialColor`], the composite patch used
//! when only some channels of a stored color are updated.
//!
//! Both types deserialize either from a CSS color string (parsed with the
//! `color` crate) or from a `{ r, g, b, a }` table.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};
use serde::Deserialize;

/// An RGBA color with channels conventionally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#ff0000"`,
    /// `"rgb(255 0 0 / 50%)"` or `"red"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use netgraph_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// assert_eq!(red.r(), 1.0);
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        let parsed = DynamicColor::from_str(color_str)
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))?;
        let [r, g, b, a] = parsed.to_alpha_color::<Srgb>().components;
        Ok(Self { r, g, b, a })
    }

    /// Create a color from its four channels.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn r(&self) -> f32 {
        self.r
    }

    pub fn g(&self) -> f32 {
        self.g
    }

    pub fn b(&self) -> f32 {
        self.b
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.a
    }

    /// Creates a new color with the specified alpha value.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Merge a partial color onto this one.
    ///
    /// Channels present in `patch` replace the stored ones; absent channels
    /// are preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use netgraph_core::color::{Color, PartialColor};
    ///
    /// let mut fill = Color::rgba(0.3, 0.5, 0.5, 0.5);
    /// fill.apply(PartialColor::alpha(0.9));
    /// assert_eq!(fill, Color::rgba(0.3, 0.5, 0.5, 0.9));
    /// ```
    pub fn apply(&mut self, patch: PartialColor) {
        if let Some(r) = patch.r {
            self.r = r;
        }
        if let Some(g) = patch.g {
            self.g = g;
        }
        if let Some(b) = patch.b {
            self.b = b;
        }
        if let Some(a) = patch.a {
            self.a = a;
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 1.0)
    }
}

/// Formats the color as CSS `rgba(...)`, the form accepted by SVG paint
/// attributes.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to_byte = |channel: f32| (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "rgba({}, {}, {}, {})",
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A color patch where every channel is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(try_from = "PartialColorRepr")]
pub struct PartialColor {
    pub r: Option<f32>,
    pub g: Option<f32>,
    pub b: Option<f32>,
    pub a: Option<f32>,
}

impl PartialColor {
    /// A patch that only touches the alpha channel.
    pub fn alpha(a: f32) -> Self {
        Self {
            a: Some(a),
            ..Self::default()
        }
    }

    /// Returns true if no channel is set.
    pub fn is_empty(&self) -> bool {
        self.r.is_none() && self.g.is_none() && self.b.is_none() && self.a.is_none()
    }
}

impl From<Color> for PartialColor {
    fn from(color: Color) -> Self {
        Self {
            r: Some(color.r),
            g: Some(color.g),
            b: Some(color.b),
            a: Some(color.a),
        }
    }
}

fn opaque() -> f32 {
    1.0
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Css(String),
    Channels {
        r: f32,
        g: f32,
        b: f32,
        #[serde(default = "opaque")]
        a: f32,
    },
}

impl TryFrom<ColorRepr> for Color {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Css(css) => Self::new(&css),
            ColorRepr::Channels { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PartialChannels {
    r: Option<f32>,
    g: Option<f32>,
    b: Option<f32>,
    a: Option<f32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PartialColorRepr {
    Css(String),
    Channels(PartialChannels),
}

impl TryFrom<PartialColorRepr> for PartialColor {
    type Error = String;

    fn try_from(repr: PartialColorRepr) -> Result<Self, Self::Error> {
        match repr {
            PartialColorRepr::Css(css) => Color::new(&css).map(Self::from),
            PartialColorRepr::Channels(PartialChannels { r, g, b, a }) => {
                Ok(Self { r, g, b, a })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        color: Color,
        #[serde(default)]
        patch: Option<PartialColor>,
    }

    #[test]
    fn test_color_new() {
        let red = Color::new("#ff0000").unwrap();
        assert_approx_eq!(f32, red.r(), 1.0);
        assert_approx_eq!(f32, red.g(), 0.0);
        assert_approx_eq!(f32, red.b(), 0.0);
        assert_approx_eq!(f32, red.alpha(), 1.0);

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
        assert!(invalid.unwrap_err().contains("invalid color"));
    }

    #[test]
    fn test_color_default_is_opaque_black() {
        assert_eq!(Color::default(), Color::rgba(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("red").unwrap().with_alpha(0.25);
        assert_approx_eq!(f32, color.alpha(), 0.25);
        assert_approx_eq!(f32, color.r(), 1.0);
    }

    #[test]
    fn test_apply_partial_preserves_unset_channels() {
        let mut fill = Color::rgba(0.3, 0.5, 0.5, 0.5);
        fill.apply(PartialColor::alpha(0.9));
        assert_eq!(fill, Color::rgba(0.3, 0.5, 0.5, 0.9));

        fill.apply(PartialColor {
            r: Some(1.0),
            b: Some(0.0),
            ..PartialColor::default()
        });
        assert_eq!(fill, Color::rgba(1.0, 0.5, 0.0, 0.9));
    }

    #[test]
    fn test_apply_empty_partial_is_noop() {
        let mut color = Color::rgba(0.1, 0.2, 0.3, 0.4);
        assert!(PartialColor::default().is_empty());
        color.apply(PartialColor::default());
        assert_eq!(color, Color::rgba(0.1, 0.2, 0.3, 0.4));
    }

    #[test]
    fn test_display_css() {
        assert_eq!(Color::rgba(1.0, 0.0, 0.0, 0.5).to_string(), "rgba(255, 0, 0, 0.5)");
        assert_eq!(Color::default().to_string(), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn test_deserialize_from_table_and_css() {
        let holder: Holder = toml::from_str("color = { r = 0.3, g = 0.5, b = 0.5 }").unwrap();
        assert_eq!(holder.color, Color::rgba(0.3, 0.5, 0.5, 1.0));

        let holder: Holder = toml::from_str(r##"color = "#0000ff""##).unwrap();
        assert_approx_eq!(f32, holder.color.b(), 1.0);
    }

    #[test]
    fn test_deserialize_partial() {
        let holder: Holder =
            toml::from_str("color = \"white\"\npatch = { a = 0.2 }").unwrap();
        assert_eq!(holder.patch, Some(PartialColor::alpha(0.2)));

        let bad: Result<Holder, _> = toml::from_str("color = \"white\"\npatch = { x = 1.0 }");
        assert!(bad.is_err());
    }
}
