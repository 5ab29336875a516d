//! Fluent layout validator
//!
//! ```ignore
//! let mut validator = UiValidator::new(&page, &page.handle("#content"), ValidatorConfig::default())?;
//! validator
//!     .with_left_element_margin(&page.handle("#menu"), 10, 20)?
//!     .not_overlap_with(&page.handle("#footer"))?
//!     .min_width(600)?;
//! assert!(validator.validate(), "{}", validator.report());
//! ```

use crate::constraint::{Bound, Constraint, ElementBox, MarginRange};
use crate::expression::{Context, Expression, Units};
use crate::geometry::{Axis, Direction};
use crate::page::{ElementHandle, GeometrySource};
use crate::report::ValidationReport;
use crate::result::LayoutResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Validator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// How bare numeric thresholds are read until changed
    pub units: Units,
}

impl ValidatorConfig {
    /// Create a new config with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial units
    #[must_use]
    pub const fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }
}

/// Checks one root element against other elements and the page.
///
/// Every check reads fresh geometry from the source, evaluates, and appends
/// to the report. Failed expectations never stop the chain; only
/// configuration errors do.
#[derive(Debug)]
pub struct UiValidator<'a, S: GeometrySource + ?Sized> {
    source: &'a S,
    handle: ElementHandle,
    root: ElementBox,
    context: Context,
    report: ValidationReport,
}

impl<'a, S: GeometrySource + ?Sized> UiValidator<'a, S> {
    /// Start validating `root`.
    ///
    /// Page metrics are read once here; the root's box is read now and
    /// again before every check.
    pub fn new(source: &'a S, root: &ElementHandle, config: ValidatorConfig) -> LayoutResult<Self> {
        let context = Context::from_metrics(&source.page_metrics()?, config.units)?;
        let root_box = ElementBox::new(root.name.clone(), source.rectangle(root)?);
        debug!(root = %root.name, rectangle = %root_box.rectangle, "validator created");
        Ok(Self {
            source,
            handle: root.clone(),
            root: root_box,
            context,
            report: ValidationReport::new(root.name.clone()),
        })
    }

    /// Page context thresholds are resolved against
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// The root element as last read
    #[must_use]
    pub const fn root(&self) -> &ElementBox {
        &self.root
    }

    // Neighbours

    /// `element` lies entirely to the left of the root
    pub fn with_left_element(&mut self, element: &ElementHandle) -> LayoutResult<&mut Self> {
        self.neighbour(Direction::Left, element, None)
    }

    /// `element` lies to the left with a gap between `min` and `max`
    pub fn with_left_element_margin(
        &mut self,
        element: &ElementHandle,
        min: impl Into<Expression>,
        max: impl Into<Expression>,
    ) -> LayoutResult<&mut Self> {
        self.neighbour(Direction::Left, element, Some(MarginRange::new(min, max)))
    }

    /// `element` lies entirely to the right of the root
    pub fn with_right_element(&mut self, element: &ElementHandle) -> LayoutResult<&mut Self> {
        self.neighbour(Direction::Right, element, None)
    }

    /// `element` lies to the right with a gap between `min` and `max`
    pub fn with_right_element_margin(
        &mut self,
        element: &ElementHandle,
        min: impl Into<Expression>,
        max: impl Into<Expression>,
    ) -> LayoutResult<&mut Self> {
        self.neighbour(Direction::Right, element, Some(MarginRange::new(min, max)))
    }

    /// `element` lies entirely above the root
    pub fn with_top_element(&mut self, element: &ElementHandle) -> LayoutResult<&mut Self> {
        self.neighbour(Direction::Top, element, None)
    }

    /// `element` lies above with a gap between `min` and `max`
    pub fn with_top_element_margin(
        &mut self,
        element: &ElementHandle,
        min: impl Into<Expression>,
        max: impl Into<Expression>,
    ) -> LayoutResult<&mut Self> {
        self.neighbour(Direction::Top, element, Some(MarginRange::new(min, max)))
    }

    /// `element` lies entirely below the root
    pub fn with_bottom_element(&mut self, element: &ElementHandle) -> LayoutResult<&mut Self> {
        self.neighbour(Direction::Bottom, element, None)
    }

    /// `element` lies below with a gap between `min` and `max`
    pub fn with_bottom_element_margin(
        &mut self,
        element: &ElementHandle,
        min: impl Into<Expression>,
        max: impl Into<Expression>,
    ) -> LayoutResult<&mut Self> {
        self.neighbour(Direction::Bottom, element, Some(MarginRange::new(min, max)))
    }

    /// Neighbour check for any side
    pub fn neighbour(
        &mut self,
        direction: Direction,
        element: &ElementHandle,
        margin: Option<MarginRange>,
    ) -> LayoutResult<&mut Self> {
        let neighbour = self.element(element)?;
        self.apply(&Constraint::Neighbour {
            direction,
            neighbour,
            margin,
        })
    }

    // Overlap

    /// `element` overlaps the root
    pub fn overlap_with(&mut self, element: &ElementHandle) -> LayoutResult<&mut Self> {
        self.overlap(element, true)
    }

    /// `element` does not overlap the root; touching is fine
    pub fn not_overlap_with(&mut self, element: &ElementHandle) -> LayoutResult<&mut Self> {
        self.overlap(element, false)
    }

    /// None of `elements` overlap the root
    pub fn not_overlap_with_all(&mut self, elements: &[ElementHandle]) -> LayoutResult<&mut Self> {
        for element in elements {
            self.overlap(element, false)?;
        }
        Ok(self)
    }

    fn overlap(&mut self, element: &ElementHandle, expected: bool) -> LayoutResult<&mut Self> {
        let other = self.element(element)?;
        self.apply(&Constraint::Overlap { other, expected })
    }

    // Alignment

    /// Same distance from the left page edge
    pub fn same_offset_left_as(&mut self, element: &ElementHandle) -> LayoutResult<&mut Self> {
        self.same_offset_as(Direction::Left, element)
    }

    /// Same distance from the left page edge, for every element
    pub fn same_offset_left_as_all(
        &mut self,
        elements: &[ElementHandle],
    ) -> LayoutResult<&mut Self> {
        self.same_offset_as_all(Direction::Left, elements)
    }

    /// Same distance from the right page edge
    pub fn same_offset_right_as(&mut self, element: &ElementHandle) -> LayoutResult<&mut Self> {
        self.same_offset_as(Direction::Right, element)
    }

    /// Same distance from the right page edge, for every element
    pub fn same_offset_right_as_all(
        &mut self,
        elements: &[ElementHandle],
    ) -> LayoutResult<&mut Self> {
        self.same_offset_as_all(Direction::Right, elements)
    }

    /// Same distance from the top page edge
    pub fn same_offset_top_as(&mut self, element: &ElementHandle) -> LayoutResult<&mut Self> {
        self.same_offset_as(Direction::Top, element)
    }

    /// Same distance from the top page edge, for every element
    pub fn same_offset_top_as_all(&mut self, elements: &[ElementHandle]) -> LayoutResult<&mut Self> {
        self.same_offset_as_all(Direction::Top, elements)
    }

    /// Same distance from the bottom page edge
    pub fn same_offset_bottom_as(&mut self, element: &ElementHandle) -> LayoutResult<&mut Self> {
        self.same_offset_as(Direction::Bottom, element)
    }

    /// Same distance from the bottom page edge, for every element
    pub fn same_offset_bottom_as_all(
        &mut self,
        elements: &[ElementHandle],
    ) -> LayoutResult<&mut Self> {
        self.same_offset_as_all(Direction::Bottom, elements)
    }

    /// Same distance from the page edge on `direction`'s side
    pub fn same_offset_as(
        &mut self,
        direction: Direction,
        element: &ElementHandle,
    ) -> LayoutResult<&mut Self> {
        let other = self.element(element)?;
        self.apply(&Constraint::SameOffset { direction, other })
    }

    /// [`Self::same_offset_as`] for every element
    pub fn same_offset_as_all(
        &mut self,
        direction: Direction,
        elements: &[ElementHandle],
    ) -> LayoutResult<&mut Self> {
        for element in elements {
            self.same_offset_as(direction, element)?;
        }
        Ok(self)
    }

    // Sizes

    /// Exactly as wide as `element`
    pub fn same_width_as(&mut self, element: &ElementHandle) -> LayoutResult<&mut Self> {
        let other = self.element(element)?;
        self.apply(&Constraint::SameWidth { other })
    }

    /// Exactly as wide as each of `elements`
    pub fn same_width_as_all(&mut self, elements: &[ElementHandle]) -> LayoutResult<&mut Self> {
        for element in elements {
            self.same_width_as(element)?;
        }
        Ok(self)
    }

    /// Exactly as tall as `element`
    pub fn same_height_as(&mut self, element: &ElementHandle) -> LayoutResult<&mut Self> {
        let other = self.element(element)?;
        self.apply(&Constraint::SameHeight { other })
    }

    /// Exactly as tall as each of `elements`
    pub fn same_height_as_all(&mut self, elements: &[ElementHandle]) -> LayoutResult<&mut Self> {
        for element in elements {
            self.same_height_as(element)?;
        }
        Ok(self)
    }

    /// Same width and height as `element`
    pub fn same_size_as(&mut self, element: &ElementHandle) -> LayoutResult<&mut Self> {
        let other = self.element(element)?;
        self.apply(&Constraint::SameSize { other })
    }

    /// Same width and height as each of `elements`
    pub fn same_size_as_all(&mut self, elements: &[ElementHandle]) -> LayoutResult<&mut Self> {
        for element in elements {
            self.same_size_as(element)?;
        }
        Ok(self)
    }

    /// Width of at least `threshold`
    pub fn min_width(&mut self, threshold: impl Into<Expression>) -> LayoutResult<&mut Self> {
        self.size_bound(Axis::Horizontal, Bound::Min, threshold.into())
    }

    /// Width of at most `threshold`
    pub fn max_width(&mut self, threshold: impl Into<Expression>) -> LayoutResult<&mut Self> {
        self.size_bound(Axis::Horizontal, Bound::Max, threshold.into())
    }

    /// Width in `[min, max]`; two checks
    pub fn width_between(
        &mut self,
        min: impl Into<Expression>,
        max: impl Into<Expression>,
    ) -> LayoutResult<&mut Self> {
        self.min_width(min)?.max_width(max)
    }

    /// Height of at least `threshold`
    pub fn min_height(&mut self, threshold: impl Into<Expression>) -> LayoutResult<&mut Self> {
        self.size_bound(Axis::Vertical, Bound::Min, threshold.into())
    }

    /// Height of at most `threshold`
    pub fn max_height(&mut self, threshold: impl Into<Expression>) -> LayoutResult<&mut Self> {
        self.size_bound(Axis::Vertical, Bound::Max, threshold.into())
    }

    /// Height in `[min, max]`; two checks
    pub fn height_between(
        &mut self,
        min: impl Into<Expression>,
        max: impl Into<Expression>,
    ) -> LayoutResult<&mut Self> {
        self.min_height(min)?.max_height(max)
    }

    fn size_bound(
        &mut self,
        axis: Axis,
        bound: Bound,
        threshold: Expression,
    ) -> LayoutResult<&mut Self> {
        self.apply(&Constraint::SizeBound {
            axis,
            bound,
            threshold,
        })
    }

    // Page offsets

    /// Minimum distance from each page edge; `None` sides are skipped
    pub fn min_offset(
        &mut self,
        top: Option<i32>,
        right: Option<i32>,
        bottom: Option<i32>,
        left: Option<i32>,
    ) -> LayoutResult<&mut Self> {
        self.offset_bounds(Bound::Min, [top, right, bottom, left])
    }

    /// Maximum distance from each page edge; `None` sides are skipped
    pub fn max_offset(
        &mut self,
        top: Option<i32>,
        right: Option<i32>,
        bottom: Option<i32>,
        left: Option<i32>,
    ) -> LayoutResult<&mut Self> {
        self.offset_bounds(Bound::Max, [top, right, bottom, left])
    }

    /// One page offset bound on one side
    pub fn offset_bound(
        &mut self,
        direction: Direction,
        bound: Bound,
        threshold: impl Into<Expression>,
    ) -> LayoutResult<&mut Self> {
        self.apply(&Constraint::OffsetBound {
            direction,
            bound,
            threshold: threshold.into(),
        })
    }

    /// Sides in [`Direction::ALL`] order
    fn offset_bounds(&mut self, bound: Bound, sides: [Option<i32>; 4]) -> LayoutResult<&mut Self> {
        for (direction, threshold) in Direction::ALL.into_iter().zip(sides) {
            if let Some(threshold) = threshold {
                self.offset_bound(direction, bound, threshold)?;
            }
        }
        Ok(self)
    }

    /// Left and right page offsets are equal
    pub fn equal_left_right_offset(&mut self) -> LayoutResult<&mut Self> {
        self.apply(&Constraint::EqualOffsets {
            axis: Axis::Horizontal,
        })
    }

    /// Top and bottom page offsets are equal
    pub fn equal_top_bottom_offset(&mut self) -> LayoutResult<&mut Self> {
        self.apply(&Constraint::EqualOffsets {
            axis: Axis::Vertical,
        })
    }

    // CSS

    /// Computed `property` contains every one of `values`
    pub fn with_css_value(&mut self, property: &str, values: &[&str]) -> LayoutResult<&mut Self> {
        self.css(property, values, true)
    }

    /// Computed `property` contains none of `values`
    pub fn without_css_value(
        &mut self,
        property: &str,
        values: &[&str],
    ) -> LayoutResult<&mut Self> {
        self.css(property, values, false)
    }

    fn css(&mut self, property: &str, values: &[&str], present: bool) -> LayoutResult<&mut Self> {
        let actual = self.source.css_value(&self.handle, property)?;
        self.apply(&Constraint::CssValue {
            property: property.to_string(),
            actual,
            values: values.iter().map(ToString::to_string).collect(),
            present,
        })
    }

    // Units and results

    /// Read subsequent bare numbers as `units`
    pub fn change_metrics_units_to(&mut self, units: Units) -> &mut Self {
        debug!(root = %self.root.name, ?units, "units changed");
        self.context = self.context.with_units(units);
        self
    }

    /// Evaluate an arbitrary constraint against the root
    pub fn apply(&mut self, constraint: &Constraint) -> LayoutResult<&mut Self> {
        self.root.rectangle = self.source.rectangle(&self.handle)?;
        constraint.evaluate(&self.root, &self.context, &mut self.report)?;
        Ok(self)
    }

    /// True when no check so far has failed
    #[must_use]
    pub fn validate(&self) -> bool {
        let summary = self.report.summary();
        info!(
            root = %self.root.name,
            checks = summary.checks,
            failed = summary.failed,
            "layout validation finished"
        );
        self.report.passed()
    }

    /// Violations so far
    #[must_use]
    pub const fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Consume the validator and keep its report
    #[must_use]
    pub fn into_report(self) -> ValidationReport {
        self.report
    }

    fn element(&self, handle: &ElementHandle) -> LayoutResult<ElementBox> {
        Ok(ElementBox::new(
            handle.name.clone(),
            self.source.rectangle(handle)?,
        ))
    }
}
