//! Axis-aligned bounding boxes.

use super::scalar::{Group, Scalar, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bounding box of a rendered element, in page pixels.
///
/// `origin` holds the smaller coordinate on each axis. Rectangles with
/// `origin == corner` are legal and have zero extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    /// Top-left point
    pub origin: Vector,
    /// Bottom-right point
    pub corner: Vector,
}

impl Rectangle {
    /// Create a rectangle from its two corner points
    #[must_use]
    pub const fn new(origin: Vector, corner: Vector) -> Self {
        Self { origin, corner }
    }

    /// Create a rectangle from an integer location and size, the way a
    /// browser driver reports element geometry.
    ///
    /// The corner is summed in f64, so boxes near `i32::MAX` do not wrap.
    #[must_use]
    pub fn from_location_and_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        let origin = Vector::from_pixels(x, y);
        Self::new(
            origin,
            Vector::new(origin.x + Scalar::from(width), origin.y + Scalar::from(height)),
        )
    }

    /// Create a rectangle from integer corner coordinates
    #[must_use]
    pub fn from_corners(origin_x: i32, origin_y: i32, corner_x: i32, corner_y: i32) -> Self {
        Self::new(
            Vector::from_pixels(origin_x, origin_y),
            Vector::from_pixels(corner_x, corner_y),
        )
    }

    /// Left edge
    #[must_use]
    pub const fn left(&self) -> Scalar {
        self.origin.x
    }

    /// Right edge
    #[must_use]
    pub const fn right(&self) -> Scalar {
        self.corner.x
    }

    /// Top edge
    #[must_use]
    pub const fn top(&self) -> Scalar {
        self.origin.y
    }

    /// Bottom edge
    #[must_use]
    pub const fn bottom(&self) -> Scalar {
        self.corner.y
    }

    /// Horizontal extent
    #[must_use]
    pub fn width(&self) -> Scalar {
        self.corner.x - self.origin.x
    }

    /// Vertical extent
    #[must_use]
    pub fn height(&self) -> Scalar {
        self.corner.y - self.origin.y
    }

    /// Whether the rectangle encloses no area
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width() <= Scalar::IDENTITY || self.height() <= Scalar::IDENTITY
    }

    /// Whether the two rectangles share a region of positive area.
    ///
    /// Rectangles that only touch along an edge do not intersect, and a
    /// degenerate rectangle intersects nothing, not even itself.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        overlaps(self.left(), self.right(), other.left(), other.right())
            && overlaps(self.top(), self.bottom(), other.top(), other.bottom())
    }

    /// The shared region, if the rectangles intersect
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        Some(Self::new(
            Vector::new(
                max(self.left(), other.left()),
                max(self.top(), other.top()),
            ),
            Vector::new(
                min(self.right(), other.right()),
                min(self.bottom(), other.bottom()),
            ),
        ))
    }

    /// Whether `other` lies entirely within this rectangle
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}@{}-{}@{}]",
            self.left(),
            self.top(),
            self.right(),
            self.bottom()
        )
    }
}

/// Strict interval overlap: the shared span must have positive length.
fn overlaps(begin_a: Scalar, end_a: Scalar, begin_b: Scalar, end_b: Scalar) -> bool {
    max(begin_a, begin_b) < min(end_a, end_b)
}

fn max(a: Scalar, b: Scalar) -> Scalar {
    if a >= b {
        a
    } else {
        b
    }
}

fn min(a: Scalar, b: Scalar) -> Scalar {
    if a <= b {
        a
    } else {
        b
    }
}
