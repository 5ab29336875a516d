//! The extend computation shared by every size, margin and offset check.

use super::direction::Direction;
use super::rectangle::Rectangle;
use super::scalar::{Group, Scalar, Vector};

/// Measures a rectangle as the difference between two of its boundaries.
///
/// Implementors only say where a rectangle begins and ends; the
/// subtraction is common to all of them.
pub trait ExtendGiving<V: Group> {
    /// What the extent is called in messages ("width", "left margin", ...)
    fn extend_name(&self) -> String;

    /// Trailing boundary
    fn begin(&self, rectangle: &Rectangle) -> V;

    /// Leading boundary
    fn end(&self, rectangle: &Rectangle) -> V;

    /// `end - begin`
    fn extend(&self, rectangle: &Rectangle) -> V {
        self.end(rectangle) - self.begin(rectangle)
    }
}

/// Gap between an element and its neighbour on one side.
///
/// Measured over [`Direction::gap_span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margin(pub Direction);

impl ExtendGiving<Scalar> for Margin {
    fn extend_name(&self) -> String {
        format!("{} margin", self.0.name())
    }

    fn begin(&self, rectangle: &Rectangle) -> Scalar {
        self.0.begin(rectangle)
    }

    fn end(&self, rectangle: &Rectangle) -> Scalar {
        self.0.end(rectangle)
    }
}

/// Distance from an element to the page edge on one side.
///
/// Measured over [`Direction::offset_span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset(pub Direction);

impl ExtendGiving<Scalar> for Offset {
    fn extend_name(&self) -> String {
        format!("{} offset", self.0.name())
    }

    fn begin(&self, rectangle: &Rectangle) -> Scalar {
        self.0.begin(rectangle)
    }

    fn end(&self, rectangle: &Rectangle) -> Scalar {
        self.0.end(rectangle)
    }
}

/// Width and height at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Area;

impl ExtendGiving<Vector> for Area {
    fn extend_name(&self) -> String {
        "size".to_string()
    }

    fn begin(&self, rectangle: &Rectangle) -> Vector {
        rectangle.origin
    }

    fn end(&self, rectangle: &Rectangle) -> Vector {
        rectangle.corner
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn rectangle() -> impl Strategy<Value = Rectangle> {
        (-1000i32..1000, -1000i32..1000, 0i32..800, 0i32..800)
            .prop_map(|(x, y, w, h)| Rectangle::from_location_and_size(x, y, w, h))
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Left),
            Just(Direction::Right),
            Just(Direction::Top),
            Just(Direction::Bottom),
        ]
    }

    proptest! {
        /// extend is exactly end - begin for every strategy
        #[test]
        fn prop_extend_is_end_minus_begin(r in rectangle(), d in direction()) {
            prop_assert_eq!(d.extend(&r), d.end(&r) - d.begin(&r));
            prop_assert_eq!(Margin(d).extend(&r), Margin(d).end(&r) - Margin(d).begin(&r));
            prop_assert_eq!(Offset(d).extend(&r), Offset(d).end(&r) - Offset(d).begin(&r));
            prop_assert_eq!(Area.extend(&r), Area.end(&r) - Area.begin(&r));
        }

        /// Well-formed rectangles never have a negative extent
        #[test]
        fn prop_extend_is_non_negative(r in rectangle(), d in direction()) {
            prop_assert!(!d.extend(&r).is_negative());
        }

        /// Opposite directions agree on the size of a rectangle
        #[test]
        fn prop_opposites_agree(r in rectangle(), d in direction()) {
            prop_assert_eq!(d.extend(&r), d.opposite().extend(&r));
        }

        /// The gap runs from the root's near edge to the neighbour's far edge
        #[test]
        fn prop_gap_matches_edge_difference(a in rectangle(), b in rectangle(), d in direction()) {
            let root_edge = d.near_edge(&a);
            let neighbour_edge = d.far_edge(&b);
            let expected = if d.is_positive() {
                neighbour_edge - root_edge
            } else {
                root_edge - neighbour_edge
            };
            prop_assert_eq!(d.gap(&a, &b), expected);
        }
    }
}
