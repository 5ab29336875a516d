//! Scalar and vector measurements.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// A measurement that forms a group under addition.
///
/// `a - a` is always [`Group::IDENTITY`], which is what lets every
/// extent be computed as `end - begin` in one step.
pub trait Group: Copy + PartialEq + Add<Output = Self> + Sub<Output = Self> + Neg<Output = Self> {
    /// The neutral element
    const IDENTITY: Self;
}

/// Signed pixel value
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scalar(f64);

impl Scalar {
    /// Create a scalar
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Raw value
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Whether the value is below zero
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < 0.0
    }

    /// `self * numerator / denominator`, computed in that order
    #[must_use]
    pub fn scaled(self, numerator: Self, denominator: f64) -> Self {
        Self(self.0 * numerator.0 / denominator)
    }
}

impl Group for Scalar {
    const IDENTITY: Self = Self(0.0);
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Add for Scalar {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Scalar {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Scalar {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Whole pixels print without decimals, fractions with at most two.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{}", self.0 as i64)
        } else {
            let text = format!("{:.2}", self.0);
            write!(f, "{}", text.trim_end_matches('0').trim_end_matches('.'))
        }
    }
}

/// Two-axis measurement
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    /// Horizontal component
    pub x: Scalar,
    /// Vertical component
    pub y: Scalar,
}

impl Vector {
    /// Create a vector
    #[must_use]
    pub const fn new(x: Scalar, y: Scalar) -> Self {
        Self { x, y }
    }

    /// Create a vector from integer pixels
    #[must_use]
    pub fn from_pixels(x: i32, y: i32) -> Self {
        Self::new(Scalar::from(x), Scalar::from(y))
    }
}

impl Group for Vector {
    const IDENTITY: Self = Self {
        x: Scalar::IDENTITY,
        y: Scalar::IDENTITY,
    };
}

impl Add for Vector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}px", self.x, self.y)
    }
}
