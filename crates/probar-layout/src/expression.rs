//! Threshold expressions and the page context they resolve against.
//!
//! A threshold is written once ("8% of the page", "20px") and only turned
//! into pixels when a constraint is evaluated, because a percentage means
//! a different number of pixels on each axis.

use crate::geometry::{Axis, Direction, Group, Rectangle, Scalar, Vector};
use crate::result::{LayoutError, LayoutResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How bare numeric arguments are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Raw pixels
    #[default]
    Px,
    /// Percent of the page dimension along the argument's axis
    Percent,
}

impl FromStr for Units {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "px" | "pixels" => Ok(Self::Px),
            "%" | "percent" => Ok(Self::Percent),
            other => Err(LayoutError::InvalidThreshold {
                value: other.to_string(),
            }),
        }
    }
}

/// What a percentage is a percentage of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentReference {
    /// The page (width for horizontal checks, height for vertical ones)
    Page,
    /// The element's parent; not supported
    Parent,
}

impl fmt::Display for PercentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page => f.write_str("page"),
            Self::Parent => f.write_str("parent"),
        }
    }
}

/// Page metrics as reported by the browser
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMetrics {
    /// Document width in CSS pixels
    pub page_width: i32,
    /// Document height in CSS pixels.
    ///
    /// Informational only: vertical percentages and offsets are measured
    /// against `viewport_height * device_pixel_ratio`.
    pub page_height: i32,
    /// Height of the visible viewport
    pub viewport_height: i32,
    /// Device pixel ratio (2.0 on retina displays)
    pub device_pixel_ratio: f64,
}

impl PageMetrics {
    /// Metrics for a page with a 1:1 pixel ratio
    #[must_use]
    pub const fn new(page_width: i32, page_height: i32, viewport_height: i32) -> Self {
        Self {
            page_width,
            page_height,
            viewport_height,
            device_pixel_ratio: 1.0,
        }
    }

    /// Set the device pixel ratio
    #[must_use]
    pub const fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self::new(1920, 1080, 1080)
    }
}

/// Page-level values every percentage resolves against.
///
/// Built once per validator and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Context {
    page_width: Scalar,
    page_height: Scalar,
    device_pixel_ratio: f64,
    units: Units,
}

impl Context {
    /// Build a context from page metrics.
    ///
    /// The vertical page dimension is the viewport height scaled by the
    /// device pixel ratio, so that it lives in the same space as the
    /// element boxes the driver reports on high-density displays.
    pub fn from_metrics(metrics: &PageMetrics, units: Units) -> LayoutResult<Self> {
        if metrics.page_width < 0 || metrics.viewport_height < 0 {
            return Err(LayoutError::invalid_metrics(format!(
                "negative page size {}x{}",
                metrics.page_width, metrics.viewport_height
            )));
        }
        if !metrics.device_pixel_ratio.is_finite() || metrics.device_pixel_ratio <= 0.0 {
            return Err(LayoutError::invalid_metrics(format!(
                "device pixel ratio must be positive, got {}",
                metrics.device_pixel_ratio
            )));
        }
        Ok(Self {
            page_width: Scalar::from(metrics.page_width),
            page_height: Scalar::new(
                (f64::from(metrics.viewport_height) * metrics.device_pixel_ratio).round(),
            ),
            device_pixel_ratio: metrics.device_pixel_ratio,
            units,
        })
    }

    /// Page width in pixels
    #[must_use]
    pub const fn page_width(&self) -> Scalar {
        self.page_width
    }

    /// Page height in pixels, already scaled by the device pixel ratio
    #[must_use]
    pub const fn page_height(&self) -> Scalar {
        self.page_height
    }

    /// Device pixel ratio the height was scaled by
    #[must_use]
    pub const fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// How bare numbers are interpreted
    #[must_use]
    pub const fn units(&self) -> Units {
        self.units
    }

    /// Same context, different units
    #[must_use]
    pub const fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Page dimension along an axis
    #[must_use]
    pub const fn page_dimension(&self, axis: Axis) -> Scalar {
        match axis {
            Axis::Horizontal => self.page_width,
            Axis::Vertical => self.page_height,
        }
    }

    /// The page as a rectangle anchored at the origin
    #[must_use]
    pub fn page_rectangle(&self) -> Rectangle {
        Rectangle::new(
            Vector::IDENTITY,
            Vector::new(self.page_width, self.page_height),
        )
    }
}

/// A deferred threshold value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    /// A fixed number of pixels
    Pixels(Scalar),
    /// A percentage of the page dimension along the checked axis
    PagePercentage(Scalar),
    /// Pixels or page percentage, depending on the context's [`Units`]
    PercentOrPixels(Scalar),
}

impl Expression {
    /// A fixed pixel value
    #[must_use]
    pub fn pixels(value: impl Into<Scalar>) -> Self {
        Self::Pixels(value.into())
    }

    /// A bare number read in whatever units the validator is using
    #[must_use]
    pub fn percent_or_pixels(value: impl Into<Scalar>) -> Self {
        Self::PercentOrPixels(value.into())
    }

    /// A percentage of `reference`.
    ///
    /// Only [`PercentReference::Page`] is supported; anything else is
    /// rejected here rather than when the expression is evaluated.
    pub fn percent(
        percentage: impl Into<Scalar>,
        reference: PercentReference,
    ) -> LayoutResult<Self> {
        match reference {
            PercentReference::Page => Ok(Self::PagePercentage(percentage.into())),
            PercentReference::Parent => Err(LayoutError::UnsupportedPercentReference {
                reference: reference.to_string(),
            }),
        }
    }

    /// Resolve to pixels for a check along `direction`
    #[must_use]
    pub fn evaluate_in(&self, context: &Context, direction: Direction) -> Scalar {
        match self.resolved(context) {
            Self::PagePercentage(percentage) => {
                percentage.scaled(context.page_dimension(direction.axis()), 100.0)
            }
            Self::Pixels(value) | Self::PercentOrPixels(value) => value,
        }
    }

    /// Human-readable form: `80px`, `10% of page width`
    #[must_use]
    pub fn description(&self, context: &Context, direction: Direction) -> String {
        match self.resolved(context) {
            Self::PagePercentage(percentage) => format!(
                "{percentage}% of {}",
                direction.axis().page_dimension_name()
            ),
            Self::Pixels(value) | Self::PercentOrPixels(value) => format!("{value}px"),
        }
    }

    /// Short form used when the same threshold is listed against several
    /// elements; the page dimension is left out after the first mention.
    #[must_use]
    pub fn repeated_description(&self, context: &Context, direction: Direction) -> String {
        match self.resolved(context) {
            Self::PagePercentage(percentage) => format!("{percentage}%"),
            _ => self.description(context, direction),
        }
    }

    /// Settle `PercentOrPixels` against the context's units
    fn resolved(&self, context: &Context) -> Self {
        match (*self, context.units()) {
            (Self::PercentOrPixels(value), Units::Percent) => Self::PagePercentage(value),
            (Self::PercentOrPixels(value), Units::Px) => Self::Pixels(value),
            (other, _) => other,
        }
    }
}

impl From<i32> for Expression {
    fn from(value: i32) -> Self {
        Self::percent_or_pixels(value)
    }
}

/// Parses `"20px"`, `"8%"` or a bare number (read in the context's units).
impl FromStr for Expression {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || LayoutError::InvalidThreshold {
            value: s.to_string(),
        };
        let number = |digits: &str| digits.trim().parse::<f64>().map_err(|_| invalid());

        if let Some(digits) = text.strip_suffix('%') {
            Self::percent(number(digits)?, PercentReference::Page)
        } else if let Some(digits) = text.strip_suffix("px") {
            Ok(Self::pixels(number(digits)?))
        } else {
            Ok(Self::percent_or_pixels(number(text)?))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn context() -> Context {
        Context::from_metrics(&PageMetrics::new(1366, 4000, 768), Units::Px)
            .expect("valid metrics")
    }

    mod context {
        use super::*;

        #[test]
        fn test_height_is_viewport_scaled_by_ratio() {
            let metrics = PageMetrics::new(1280, 5000, 800).with_device_pixel_ratio(2.0);
            let ctx = Context::from_metrics(&metrics, Units::Px).unwrap();
            assert_eq!(ctx.page_width(), Scalar::from(1280));
            assert_eq!(ctx.page_height(), Scalar::from(1600));
            assert_eq!(ctx.device_pixel_ratio(), 2.0);
        }

        #[test]
        fn test_page_rectangle() {
            let ctx = context();
            assert_eq!(
                ctx.page_rectangle(),
                Rectangle::from_corners(0, 0, 1366, 768)
            );
        }

        #[test]
        fn test_rejects_non_positive_ratio() {
            let metrics = PageMetrics::new(1280, 800, 800).with_device_pixel_ratio(0.0);
            assert!(matches!(
                Context::from_metrics(&metrics, Units::Px),
                Err(LayoutError::InvalidMetrics { .. })
            ));
        }

        #[test]
        fn test_rejects_negative_size() {
            let metrics = PageMetrics::new(-1, 800, 800);
            assert!(Context::from_metrics(&metrics, Units::Px).is_err());
        }
    }

    mod evaluation {
        use super::*;

        #[test]
        fn test_pixels_ignore_context() {
            let e = Expression::pixels(80);
            assert_eq!(e.evaluate_in(&context(), Direction::Left), Scalar::from(80));
            assert_eq!(e.evaluate_in(&context(), Direction::Top), Scalar::from(80));
        }

        #[test]
        fn test_page_percentage_uses_axis_dimension() {
            let e = Expression::percent(10, PercentReference::Page).unwrap();
            assert_eq!(e.evaluate_in(&context(), Direction::Right), Scalar::new(136.6));
            assert_eq!(e.evaluate_in(&context(), Direction::Bottom), Scalar::new(76.8));
        }

        #[test]
        fn test_unsupported_reference_fails_at_construction() {
            let err = Expression::percent(10, PercentReference::Parent).unwrap_err();
            assert!(err.to_string().contains("parent"));
        }

        #[test]
        fn test_percent_or_pixels_follows_units() {
            let e = Expression::from(50);
            let px = context();
            let percent = context().with_units(Units::Percent);
            assert_eq!(e.evaluate_in(&px, Direction::Left), Scalar::from(50));
            assert_eq!(e.evaluate_in(&percent, Direction::Left), Scalar::from(683));
            assert_eq!(e.evaluate_in(&percent, Direction::Top), Scalar::from(384));
        }
    }

    mod descriptions {
        use super::*;

        #[test]
        fn test_pixel_description() {
            assert_eq!(
                Expression::pixels(80).description(&context(), Direction::Left),
                "80px"
            );
        }

        #[test]
        fn test_percentage_description_names_dimension() {
            let e = Expression::percent(10, PercentReference::Page).unwrap();
            assert_eq!(e.description(&context(), Direction::Left), "10% of page width");
            assert_eq!(e.description(&context(), Direction::Top), "10% of page height");
        }

        #[test]
        fn test_repeated_description() {
            let e = Expression::percent(10, PercentReference::Page).unwrap();
            assert_eq!(e.repeated_description(&context(), Direction::Left), "10%");
            assert_eq!(
                Expression::pixels(5).repeated_description(&context(), Direction::Left),
                "5px"
            );
        }

        #[test]
        fn test_percent_or_pixels_description() {
            let e = Expression::from(8);
            assert_eq!(e.description(&context(), Direction::Left), "8px");
            let percent = context().with_units(Units::Percent);
            assert_eq!(e.description(&percent, Direction::Left), "8% of page width");
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn test_parse_forms() {
            assert_eq!(
                "8%".parse::<Expression>().unwrap(),
                Expression::PagePercentage(Scalar::from(8))
            );
            assert_eq!(
                "12px".parse::<Expression>().unwrap(),
                Expression::Pixels(Scalar::from(12))
            );
            assert_eq!(
                " 3 ".parse::<Expression>().unwrap(),
                Expression::PercentOrPixels(Scalar::from(3))
            );
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert!(matches!(
                "wide".parse::<Expression>(),
                Err(LayoutError::InvalidThreshold { .. })
            ));
        }

        #[test]
        fn test_units_from_str() {
            assert_eq!("PX".parse::<Units>().unwrap(), Units::Px);
            assert_eq!("percent".parse::<Units>().unwrap(), Units::Percent);
            assert!("em".parse::<Units>().is_err());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Left),
            Just(Direction::Right),
            Just(Direction::Top),
            Just(Direction::Bottom),
        ]
    }

    proptest! {
        /// A page percentage is p * dimension / 100 on the checked axis
        #[test]
        fn prop_percentage_round_trip(
            p in 0i32..=200,
            width in 0i32..4000,
            height in 0i32..4000,
            ratio in prop_oneof![Just(1.0f64), Just(1.5), Just(2.0), Just(3.0)],
            d in direction(),
        ) {
            let metrics = PageMetrics::new(width, height, height).with_device_pixel_ratio(ratio);
            let ctx = Context::from_metrics(&metrics, Units::Px).unwrap();
            let e = Expression::percent(p, PercentReference::Page).unwrap();
            let expected = f64::from(p) * ctx.page_dimension(d.axis()).value() / 100.0;
            prop_assert_eq!(e.evaluate_in(&ctx, d), Scalar::new(expected));
        }

        /// Evaluating twice against the same context gives the same value
        #[test]
        fn prop_evaluation_is_idempotent(value in -500i32..500, percent in any::<bool>(), d in direction()) {
            let ctx = Context::from_metrics(&PageMetrics::default(), Units::Px).unwrap();
            let e = if percent {
                Expression::percent(value, PercentReference::Page).unwrap()
            } else {
                Expression::pixels(value)
            };
            prop_assert_eq!(e.evaluate_in(&ctx, d), e.evaluate_in(&ctx, d));
            prop_assert_eq!(e.description(&ctx, d), e.description(&ctx, d));
        }
    }
}
