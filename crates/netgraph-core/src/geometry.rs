//! Geometric primitives for entity positions and offsets.
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`PartialPoint`] - A point patch where each axis is optional
//!
//! netgraph uses the screen coordinate system: origin at the top-left, X
//! increasing rightward and Y increasing downward.

use serde::Deserialize;

/// A 2D point representing a position in canvas coordinate space.
///
/// # Examples
///
/// ```
/// # use netgraph_core::geometry::Point;
/// let position = Point::new(100.0, 50.0);
/// let offset = Point::new(10.0, -5.0);
///
/// let moved = position.add_point(offset);
/// assert_eq!(moved.x(), 110.0);
/// assert_eq!(moved.y(), 45.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Merge a partial point onto this one, axis by axis.
    pub fn apply(&mut self, patch: PartialPoint) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
    }
}

/// A point patch where each axis is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialPoint {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

impl PartialPoint {
    /// Returns true if neither axis is set.
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

impl From<Point> for PartialPoint {
    fn from(point: Point) -> Self {
        Self {
            x: Some(point.x),
            y: Some(point.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_builders() {
        let point = Point::default().with_x(3.0).with_y(-4.0);
        assert_approx_eq!(f32, point.x(), 3.0);
        assert_approx_eq!(f32, point.y(), -4.0);
    }

    #[test]
    fn test_add_point() {
        let sum = Point::new(300.0, 200.0).add_point(Point::new(8.0, 0.0));
        assert_eq!(sum, Point::new(308.0, 200.0));
    }

    #[test]
    fn test_apply_partial() {
        let mut point = Point::new(1.0, 2.0);
        point.apply(PartialPoint {
            y: Some(7.0),
            ..PartialPoint::default()
        });
        assert_eq!(point, Point::new(1.0, 7.0));

        point.apply(PartialPoint::default());
        assert_eq!(point, Point::new(1.0, 7.0));
        assert!(PartialPoint::default().is_empty());
    }

    #[test]
    fn test_full_patch_from_point() {
        let mut point = Point::default();
        point.apply(Point::new(5.0, 6.0).into());
        assert_eq!(point, Point::new(5.0, 6.0));
    }
}
