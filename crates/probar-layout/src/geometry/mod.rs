//! Geometry: scalars, rectangles, directions and the extend strategies.

mod direction;
mod extend;
mod rectangle;
mod scalar;

pub use direction::{Axis, Direction};
pub use extend::{Area, ExtendGiving, Margin, Offset};
pub use rectangle::Rectangle;
pub use scalar::{Group, Scalar, Vector};
