//! Style value schema.
//!
//! [`StyleValue`] declares, per Rust type, whether a style key is scalar
//! (the patch replaces the value) or composite (the patch merges into it).

use serde::Deserialize;

use crate::{
    color::{Color, PartialColor},
    geometry::{PartialPoint, Point},
    style::StyleError,
};

/// A fully resolved attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f32),
    Bool(bool),
    Text(String),
    Color(Color),
    Point(Point),
}

impl Value {
    /// Returns the number if this is a numeric value.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the color if this is a color value.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(color) => Some(*color),
            _ => None,
        }
    }

    /// Returns the point if this is a point value.
    pub fn as_point(&self) -> Option<Point> {
        match self {
            Self::Point(point) => Some(*point),
            _ => None,
        }
    }
}

/// A value passed to an accessor, possibly partial for composite keys.
///
/// Deserializes untagged: numbers, booleans, strings, `{ x, y }` tables and
/// `{ r, g, b, a }` tables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ValuePatch {
    Number(f32),
    Bool(bool),
    Text(String),
    Point(PartialPoint),
    Color(PartialColor),
}

impl ValuePatch {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
            Self::Text(_) => "text",
            Self::Point(_) => "point",
            Self::Color(_) => "color",
        }
    }

    /// Convert into a style patch for the key's declared type.
    pub fn coerce<T: StyleValue>(self, key: &str) -> Result<T::Patch, StyleError> {
        T::coerce(key, self)
    }
}

impl From<f32> for ValuePatch {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for ValuePatch {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ValuePatch {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<PartialColor> for ValuePatch {
    fn from(value: PartialColor) -> Self {
        Self::Color(value)
    }
}

impl From<Color> for ValuePatch {
    fn from(value: Color) -> Self {
        Self::Color(value.into())
    }
}

impl From<PartialPoint> for ValuePatch {
    fn from(value: PartialPoint) -> Self {
        Self::Point(value)
    }
}

/// Merge schema of a style key's type.
pub trait StyleValue: Copy {
    /// What a setter accepts: `Self` for scalars, a partial type for composites.
    type Patch: Clone;

    /// Name used in type-mismatch errors.
    const KIND: &'static str;

    /// Store a patch: replace for scalars, per-component merge for composites.
    fn merge(&mut self, patch: Self::Patch);

    /// Convert a dynamically typed value into this type's patch.
    fn coerce(key: &str, value: ValuePatch) -> Result<Self::Patch, StyleError>;

    fn to_value(self) -> Value;
}

fn mismatch(key: &str, expected: &'static str, found: &ValuePatch) -> StyleError {
    StyleError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}

impl StyleValue for f32 {
    type Patch = f32;
    const KIND: &'static str = "number";

    fn merge(&mut self, patch: f32) {
        *self = patch;
    }

    fn coerce(key: &str, value: ValuePatch) -> Result<f32, StyleError> {
        match value {
            ValuePatch::Number(n) => Ok(n),
            other => Err(mismatch(key, Self::KIND, &other)),
        }
    }

    fn to_value(self) -> Value {
        Value::Number(self)
    }
}

impl StyleValue for bool {
    type Patch = bool;
    const KIND: &'static str = "bool";

    fn merge(&mut self, patch: bool) {
        *self = patch;
    }

    fn coerce(key: &str, value: ValuePatch) -> Result<bool, StyleError> {
        match value {
            ValuePatch::Bool(flag) => Ok(flag),
            other => Err(mismatch(key, Self::KIND, &other)),
        }
    }

    fn to_value(self) -> Value {
        Value::Bool(self)
    }
}

impl StyleValue for Color {
    type Patch = PartialColor;
    const KIND: &'static str = "color";

    fn merge(&mut self, patch: PartialColor) {
        self.apply(patch);
    }

    fn coerce(key: &str, value: ValuePatch) -> Result<PartialColor, StyleError> {
        match value {
            ValuePatch::Color(patch) => Ok(patch),
            // `{}` parses as an empty point patch; for a color it changes no channel.
            ValuePatch::Point(point) if point.is_empty() => Ok(PartialColor::default()),
            ValuePatch::Text(css) => Color::new(&css)
                .map(PartialColor::from)
                .map_err(StyleError::InvalidColor),
            other => Err(mismatch(key, Self::KIND, &other)),
        }
    }

    fn to_value(self) -> Value {
        Value::Color(self)
    }
}

impl StyleValue for Point {
    type Patch = PartialPoint;
    const KIND: &'static str = "point";

    fn merge(&mut self, patch: PartialPoint) {
        self.apply(patch);
    }

    fn coerce(key: &str, value: ValuePatch) -> Result<PartialPoint, StyleError> {
        match value {
            ValuePatch::Point(patch) => Ok(patch),
            other => Err(mismatch(key, Self::KIND, &other)),
        }
    }

    fn to_value(self) -> Value {
        Value::Point(self)
    }
}
