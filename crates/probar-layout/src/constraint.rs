//! Constraint evaluation
//!
//! A [`Constraint`] describes one relationship between a root element and
//! (usually) one other element. Evaluating it never fails on a broken
//! layout: it appends to the [`ValidationReport`] and returns `Ok`. Only
//! configuration problems, such as a malformed hex colour, come back as
//! errors.

use crate::css;
use crate::expression::{Context, Expression, Units};
use crate::geometry::{Area, Axis, Direction, ExtendGiving, Margin, Offset, Rectangle, Scalar};
use crate::report::{ConstraintKind, ValidationReport};
use crate::result::LayoutResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// An element's name and box at the moment it was read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementBox {
    /// Name used in messages
    pub name: String,
    /// Bounding box
    pub rectangle: Rectangle,
}

impl ElementBox {
    /// Create a named box
    #[must_use]
    pub fn new(name: impl Into<String>, rectangle: Rectangle) -> Self {
        Self {
            name: name.into(),
            rectangle,
        }
    }
}

/// Lower or upper limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    /// Value must be at least the threshold
    Min,
    /// Value must be at most the threshold
    Max,
}

impl Bound {
    const fn name(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    fn admits(self, actual: Scalar, threshold: Scalar) -> bool {
        match self {
            Self::Min => actual >= threshold,
            Self::Max => actual <= threshold,
        }
    }
}

/// Inclusive margin range for neighbour checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginRange {
    /// Smallest acceptable gap
    pub min: Expression,
    /// Largest acceptable gap
    pub max: Expression,
}

impl MarginRange {
    /// Create a range
    #[must_use]
    pub fn new(min: impl Into<Expression>, max: impl Into<Expression>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }
}

/// One relationship to check against a root element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Constraint {
    /// `neighbour` lies on `direction`'s side of the root, with a gap
    /// inside `margin` when one is given
    Neighbour {
        /// Side the neighbour is expected on
        direction: Direction,
        /// The neighbour
        neighbour: ElementBox,
        /// Accepted gap; any non-negative gap when absent
        margin: Option<MarginRange>,
    },
    /// Root and `other` overlap (`expected`) or do not
    Overlap {
        /// The other element
        other: ElementBox,
        /// Whether they should overlap
        expected: bool,
    },
    /// Root and `other` sit at the same distance from one page edge
    SameOffset {
        /// Page edge
        direction: Direction,
        /// The other element
        other: ElementBox,
    },
    /// Same width
    SameWidth {
        /// The other element
        other: ElementBox,
    },
    /// Same height
    SameHeight {
        /// The other element
        other: ElementBox,
    },
    /// Same width and height
    SameSize {
        /// The other element
        other: ElementBox,
    },
    /// Width (horizontal) or height (vertical) against a threshold
    SizeBound {
        /// Which extent
        axis: Axis,
        /// Lower or upper limit
        bound: Bound,
        /// Limit
        threshold: Expression,
    },
    /// Distance from one page edge against a threshold
    OffsetBound {
        /// Page edge
        direction: Direction,
        /// Lower or upper limit
        bound: Bound,
        /// Limit
        threshold: Expression,
    },
    /// Opposing page offsets on an axis are equal (centred element)
    EqualOffsets {
        /// Left/right or top/bottom
        axis: Axis,
    },
    /// Computed CSS value contains (`present`) or lacks every listed value
    CssValue {
        /// Property name
        property: String,
        /// Computed value, empty when the element lacks the property
        actual: String,
        /// Values to look for
        values: Vec<String>,
        /// Whether the values should be found
        present: bool,
    },
}

impl Constraint {
    /// Report category of this constraint
    #[must_use]
    pub const fn kind(&self) -> ConstraintKind {
        match self {
            Self::Neighbour { .. } => ConstraintKind::Neighbour,
            Self::Overlap { expected: true, .. } => ConstraintKind::Overlap,
            Self::Overlap { expected: false, .. } => ConstraintKind::NotOverlap,
            Self::SameOffset { .. } => ConstraintKind::SameOffset,
            Self::SameWidth { .. } => ConstraintKind::SameWidth,
            Self::SameHeight { .. } => ConstraintKind::SameHeight,
            Self::SameSize { .. } => ConstraintKind::SameSize,
            Self::SizeBound {
                bound: Bound::Min, ..
            } => ConstraintKind::MinSize,
            Self::SizeBound {
                bound: Bound::Max, ..
            } => ConstraintKind::MaxSize,
            Self::OffsetBound {
                bound: Bound::Min, ..
            } => ConstraintKind::MinOffset,
            Self::OffsetBound {
                bound: Bound::Max, ..
            } => ConstraintKind::MaxOffset,
            Self::EqualOffsets { .. } => ConstraintKind::EqualOffsets,
            Self::CssValue { present: true, .. } => ConstraintKind::CssValue,
            Self::CssValue { present: false, .. } => ConstraintKind::NotCssValue,
        }
    }

    /// Check the constraint for `root` and record any violation
    pub fn evaluate(
        &self,
        root: &ElementBox,
        context: &Context,
        report: &mut ValidationReport,
    ) -> LayoutResult<()> {
        let before = report.violation_count();
        match self {
            Self::Neighbour {
                direction,
                neighbour,
                margin,
            } => check_neighbour(root, *direction, neighbour, margin.as_ref(), context, report),
            Self::Overlap { other, expected } => check_overlap(root, other, *expected, report),
            Self::SameOffset { direction, other } => {
                check_same_offset(root, *direction, other, context, report);
            }
            Self::SameWidth { other } => {
                check_same_extent(root, other, Direction::Right, report, ConstraintKind::SameWidth);
            }
            Self::SameHeight { other } => {
                check_same_extent(
                    root,
                    other,
                    Direction::Bottom,
                    report,
                    ConstraintKind::SameHeight,
                );
            }
            Self::SameSize { other } => check_same_size(root, other, report),
            Self::SizeBound {
                axis,
                bound,
                threshold,
            } => check_size_bound(root, *axis, *bound, threshold, context, report, self.kind()),
            Self::OffsetBound {
                direction,
                bound,
                threshold,
            } => check_offset_bound(
                root,
                *direction,
                *bound,
                threshold,
                context,
                report,
                self.kind(),
            ),
            Self::EqualOffsets { axis } => check_equal_offsets(root, *axis, context, report),
            Self::CssValue {
                property,
                actual,
                values,
                present,
            } => check_css(root, property, actual, values, *present, report)?,
        }
        debug!(
            kind = ?self.kind(),
            root = %root.name,
            violations = report.violation_count() - before,
            "evaluated layout constraint"
        );
        Ok(())
    }
}

fn check_neighbour(
    root: &ElementBox,
    direction: Direction,
    neighbour: &ElementBox,
    margin: Option<&MarginRange>,
    context: &Context,
    report: &mut ValidationReport,
) {
    report.record_check();
    let strategy = Margin(direction);
    let gap = strategy.extend(&direction.gap_span(&root.rectangle, &neighbour.rectangle));

    if gap.is_negative() {
        report.record_violation(
            ConstraintKind::Neighbour,
            format!(
                "Element '{}' is not strictly {} '{}': {} is {}px",
                neighbour.name,
                side_phrase(direction),
                root.name,
                strategy.extend_name(),
                gap
            ),
            &[&neighbour.name],
        );
        return;
    }

    let Some(range) = margin else {
        return;
    };
    let min = range.min.evaluate_in(context, direction);
    let max = range.max.evaluate_in(context, direction);
    if gap < min || gap > max {
        report.record_violation(
            ConstraintKind::Neighbour,
            format!(
                "{} between '{}' and '{}' should be between {}. Actual {} is {}px",
                capitalized(&strategy.extend_name()),
                root.name,
                neighbour.name,
                range_text(range, context, direction),
                strategy.extend_name(),
                gap
            ),
            &[&neighbour.name],
        );
    }
}

fn check_overlap(
    root: &ElementBox,
    other: &ElementBox,
    expected: bool,
    report: &mut ValidationReport,
) {
    report.record_check();
    let shared = root.rectangle.intersection(&other.rectangle);
    match (shared, expected) {
        (Some(area), false) => report.record_violation(
            ConstraintKind::NotOverlap,
            format!(
                "Element '{}' overlaps with element '{}' but should not (shared area {})",
                other.name, root.name, area
            ),
            &[&other.name],
        ),
        (None, true) => report.record_violation(
            ConstraintKind::Overlap,
            format!(
                "Element '{}' does not overlap with element '{}' but should",
                other.name, root.name
            ),
            &[&other.name],
        ),
        _ => {}
    }
}

fn check_same_offset(
    root: &ElementBox,
    direction: Direction,
    other: &ElementBox,
    context: &Context,
    report: &mut ValidationReport,
) {
    report.record_check();
    let page = context.page_rectangle();
    let expected = direction.page_offset(&root.rectangle, &page);
    let actual = direction.page_offset(&other.rectangle, &page);
    if expected != actual {
        report.record_violation(
            ConstraintKind::SameOffset,
            format!(
                "Element '{}' has not the same {} as element '{}'. Expected {}px, actual {}px",
                other.name,
                Offset(direction).extend_name(),
                root.name,
                expected,
                actual
            ),
            &[&other.name],
        );
    }
}

fn check_same_extent(
    root: &ElementBox,
    other: &ElementBox,
    direction: Direction,
    report: &mut ValidationReport,
    kind: ConstraintKind,
) {
    report.record_check();
    let expected = direction.extend(&root.rectangle);
    let actual = direction.extend(&other.rectangle);
    if expected != actual {
        report.record_violation(
            kind,
            format!(
                "Element '{}' has not the same {} as element '{}'. Expected {}px, actual {}px",
                other.name,
                direction.extend_name(),
                root.name,
                expected,
                actual
            ),
            &[&other.name],
        );
    }
}

fn check_same_size(root: &ElementBox, other: &ElementBox, report: &mut ValidationReport) {
    report.record_check();
    let expected = Area.extend(&root.rectangle);
    let actual = Area.extend(&other.rectangle);
    if expected != actual {
        report.record_violation(
            ConstraintKind::SameSize,
            format!(
                "Element '{}' has not the same {} as element '{}'. Expected {}, actual {}",
                other.name,
                Area.extend_name(),
                root.name,
                expected,
                actual
            ),
            &[&other.name],
        );
    }
}

fn check_size_bound(
    root: &ElementBox,
    axis: Axis,
    bound: Bound,
    threshold: &Expression,
    context: &Context,
    report: &mut ValidationReport,
    kind: ConstraintKind,
) {
    report.record_check();
    let direction = match axis {
        Axis::Horizontal => Direction::Right,
        Axis::Vertical => Direction::Bottom,
    };
    let actual = direction.extend(&root.rectangle);
    let limit = threshold.evaluate_in(context, direction);
    if !bound.admits(actual, limit) {
        report.record_violation(
            kind,
            format!(
                "Expected {} {} of element '{}' is {}. Actual {} is {}px",
                bound.name(),
                direction.extend_name(),
                root.name,
                threshold_text(threshold, context, direction),
                direction.extend_name(),
                actual
            ),
            &[],
        );
    }
}

fn check_offset_bound(
    root: &ElementBox,
    direction: Direction,
    bound: Bound,
    threshold: &Expression,
    context: &Context,
    report: &mut ValidationReport,
    kind: ConstraintKind,
) {
    report.record_check();
    let strategy = Offset(direction);
    let actual = strategy.extend(&direction.offset_span(&root.rectangle, &context.page_rectangle()));
    let limit = threshold.evaluate_in(context, direction);
    if !bound.admits(actual, limit) {
        report.record_violation(
            kind,
            format!(
                "Expected {} {} of element '{}' is {}. Actual {} is {}px",
                bound.name(),
                strategy.extend_name(),
                root.name,
                threshold_text(threshold, context, direction),
                strategy.extend_name(),
                actual
            ),
            &[],
        );
    }
}

fn check_equal_offsets(
    root: &ElementBox,
    axis: Axis,
    context: &Context,
    report: &mut ValidationReport,
) {
    report.record_check();
    let (first, second) = match axis {
        Axis::Horizontal => (Direction::Left, Direction::Right),
        Axis::Vertical => (Direction::Top, Direction::Bottom),
    };
    let page = context.page_rectangle();
    let first_offset = first.page_offset(&root.rectangle, &page);
    let second_offset = second.page_offset(&root.rectangle, &page);
    if first_offset != second_offset {
        report.record_violation(
            ConstraintKind::EqualOffsets,
            format!(
                "Element '{}' has not equal {} and {} offsets. {} is {}px, {} is {}px",
                root.name,
                first,
                second,
                capitalized(&Offset(first).extend_name()),
                first_offset,
                capitalized(&Offset(second).extend_name()),
                second_offset
            ),
            &[],
        );
    }
}

fn check_css(
    root: &ElementBox,
    property: &str,
    actual: &str,
    values: &[String],
    present: bool,
    report: &mut ValidationReport,
) -> LayoutResult<()> {
    let kind = if present {
        ConstraintKind::CssValue
    } else {
        ConstraintKind::NotCssValue
    };

    let expected_values = values
        .iter()
        .map(|value| css::expected_text(value))
        .collect::<LayoutResult<Vec<_>>>()?;

    if actual.is_empty() {
        report.record_check();
        warn!(root = %root.name, property, "css property missing");
        let message = if present {
            format!(
                "Element '{}' does not have css property '{}'",
                root.name, property
            )
        } else {
            format!(
                "Element '{}' does not have css property '{}' to check for excluded values",
                root.name, property
            )
        };
        report.record_violation(kind, message, &[]);
        return Ok(());
    }

    for expected in expected_values {
        report.record_check();
        let found = css::text_is_found(&expected, actual);
        if present && !found {
            report.record_violation(
                kind,
                format!(
                    "Expected value of '{}' is '{}'. Actual value is '{}'",
                    property, expected, actual
                ),
                &[],
            );
        } else if !present && found {
            report.record_violation(
                kind,
                format!(
                    "CSS property '{}' should not contain value '{}'. Actual value is '{}'",
                    property, expected, actual
                ),
                &[],
            );
        }
    }
    Ok(())
}

/// `to the left of`, `above`, ...
const fn side_phrase(direction: Direction) -> &'static str {
    match direction {
        Direction::Left => "to the left of",
        Direction::Right => "to the right of",
        Direction::Top => "above",
        Direction::Bottom => "below",
    }
}

/// Threshold description with the resolved pixels for relative values
fn threshold_text(threshold: &Expression, context: &Context, direction: Direction) -> String {
    let description = threshold.description(context, direction);
    if is_relative(threshold, context) {
        format!(
            "{} ({}px)",
            description,
            threshold.evaluate_in(context, direction)
        )
    } else {
        description
    }
}

/// "10px and 20px", or "8% and 12% of page width (109.28px to 163.92px)"
fn range_text(range: &MarginRange, context: &Context, direction: Direction) -> String {
    let min_relative = is_relative(&range.min, context);
    let max_relative = is_relative(&range.max, context);
    if min_relative && max_relative {
        format!(
            "{} and {} ({}px to {}px)",
            range.min.repeated_description(context, direction),
            range.max.description(context, direction),
            range.min.evaluate_in(context, direction),
            range.max.evaluate_in(context, direction)
        )
    } else {
        format!(
            "{} and {}",
            threshold_text(&range.min, context, direction),
            threshold_text(&range.max, context, direction)
        )
    }
}

fn is_relative(expression: &Expression, context: &Context) -> bool {
    match expression {
        Expression::PagePercentage(_) => true,
        Expression::PercentOrPixels(_) => context.units() == Units::Percent,
        Expression::Pixels(_) => false,
    }
}

fn capitalized(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
