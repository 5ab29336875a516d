//! Cardinal directions and the axes they run along.

use super::extend::{ExtendGiving, Margin, Offset};
use super::rectangle::Rectangle;
use super::scalar::{Scalar, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Horizontal or vertical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// x axis
    Horizontal,
    /// y axis
    Vertical,
}

impl Axis {
    /// The page dimension percentages along this axis refer to
    #[must_use]
    pub const fn page_dimension_name(self) -> &'static str {
        match self {
            Self::Horizontal => "page width",
            Self::Vertical => "page height",
        }
    }
}

/// One of the four cardinal directions.
///
/// Right and Bottom run with the page coordinates; Left and Top run
/// against them and see every coordinate negated. In that direction
/// space `begin` is always the trailing edge of a rectangle and `end` the
/// leading one, so one subtraction serves all four sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards smaller x
    Left,
    /// Towards larger x
    Right,
    /// Towards smaller y
    Top,
    /// Towards larger y
    Bottom,
}

impl Direction {
    /// All directions, in the top/right/bottom/left order CSS uses
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The axis this direction runs along
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }

    /// Whether the direction runs with increasing page coordinates
    #[must_use]
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::Right | Self::Bottom)
    }

    /// The direction pointing the other way
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Lowercase name used in messages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    /// Edge on this direction's side, in page coordinates
    #[must_use]
    pub fn near_edge(self, rectangle: &Rectangle) -> Scalar {
        match self {
            Self::Left => rectangle.left(),
            Self::Right => rectangle.right(),
            Self::Top => rectangle.top(),
            Self::Bottom => rectangle.bottom(),
        }
    }

    /// Edge on the opposite side, in page coordinates
    #[must_use]
    pub fn far_edge(self, rectangle: &Rectangle) -> Scalar {
        self.opposite().near_edge(rectangle)
    }

    /// Signed gap from `root` to a `neighbour` expected on this side.
    ///
    /// Positive is clear space, zero is touching, negative means the two
    /// overlap along this axis.
    #[must_use]
    pub fn gap(self, root: &Rectangle, neighbour: &Rectangle) -> Scalar {
        Margin(self).extend(&self.gap_span(root, neighbour))
    }

    /// Distance from `element`'s edge on this side to the same edge of `page`
    #[must_use]
    pub fn page_offset(self, element: &Rectangle, page: &Rectangle) -> Scalar {
        Offset(self).extend(&self.offset_span(element, page))
    }

    /// Synthetic rectangle covering the space between `root` and a
    /// neighbour on this side: from the root's leading edge to the
    /// neighbour's trailing edge. Inverted when the two overlap.
    #[must_use]
    pub fn gap_span(self, root: &Rectangle, neighbour: &Rectangle) -> Rectangle {
        self.span(self.end(root), self.begin(neighbour), root)
    }

    /// Synthetic rectangle covering the space between `element`'s leading
    /// edge and the leading edge of the enclosing `page`.
    #[must_use]
    pub fn offset_span(self, element: &Rectangle, page: &Rectangle) -> Rectangle {
        self.span(self.end(element), self.end(page), element)
    }

    /// Build a rectangle whose extent along this axis runs from `begin` to
    /// `end` (direction space); the other axis is copied from `template`.
    fn span(self, begin: Scalar, end: Scalar, template: &Rectangle) -> Rectangle {
        let (low, high) = if self.is_positive() {
            (begin, end)
        } else {
            (-end, -begin)
        };
        match self.axis() {
            Axis::Horizontal => Rectangle::new(
                Vector::new(low, template.top()),
                Vector::new(high, template.bottom()),
            ),
            Axis::Vertical => Rectangle::new(
                Vector::new(template.left(), low),
                Vector::new(template.right(), high),
            ),
        }
    }

    /// Project a page coordinate into direction space
    fn oriented(self, coordinate: Scalar) -> Scalar {
        if self.is_positive() {
            coordinate
        } else {
            -coordinate
        }
    }
}

impl ExtendGiving<Scalar> for Direction {
    fn extend_name(&self) -> String {
        match self.axis() {
            Axis::Horizontal => "width".to_string(),
            Axis::Vertical => "height".to_string(),
        }
    }

    fn begin(&self, rectangle: &Rectangle) -> Scalar {
        self.oriented(self.far_edge(rectangle))
    }

    fn end(&self, rectangle: &Rectangle) -> Scalar {
        self.oriented(self.near_edge(rectangle))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
