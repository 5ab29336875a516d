//! Scenario runner

use crate::error::CliResult;
use crate::scenario::{Check, Scenario, Sides, Validation};
use probar_layout::{
    Bound, ElementHandle, MarginRange, StaticPage, UiValidator, ValidationReport,
    ValidatorConfig,
};
use tracing::{debug, info};

/// Runs every validation of a scenario against its recorded page
#[derive(Debug)]
pub struct ScenarioRunner<'a> {
    scenario: &'a Scenario,
    page: StaticPage,
}

impl<'a> ScenarioRunner<'a> {
    /// Create a runner
    #[must_use]
    pub fn new(scenario: &'a Scenario) -> Self {
        Self {
            scenario,
            page: scenario.page(),
        }
    }

    /// The page the checks run against
    #[must_use]
    pub const fn page(&self) -> &StaticPage {
        &self.page
    }

    /// One report per validation, in scenario order
    pub fn run(&self) -> CliResult<Vec<ValidationReport>> {
        let reports = self
            .scenario
            .validations
            .iter()
            .map(|validation| self.run_validation(validation))
            .collect::<CliResult<Vec<_>>>()?;
        info!(
            scenario = %self.scenario.name,
            validations = reports.len(),
            failed = reports.iter().filter(|r| !r.passed()).count(),
            "scenario finished"
        );
        Ok(reports)
    }

    /// Run one validation
    pub fn run_validation(&self, validation: &Validation) -> CliResult<ValidationReport> {
        let root = root_handle(validation);
        let config = ValidatorConfig::new().with_units(validation.units);
        let mut validator = UiValidator::new(&self.page, &root, config)?;
        for check in &validation.checks {
            self.apply(&mut validator, check)?;
        }
        if !validator.validate() {
            debug!(
                root = %validation.root,
                violations = validator.report().violation_count(),
                "validation has violations"
            );
        }
        Ok(validator.into_report())
    }

    fn apply(
        &self,
        validator: &mut UiValidator<'_, StaticPage>,
        check: &Check,
    ) -> CliResult<()> {
        match check {
            Check::Neighbour {
                direction,
                element,
                margin,
            } => {
                let margin = match margin {
                    Some(range) => Some(MarginRange {
                        min: range.min.to_expression()?,
                        max: range.max.to_expression()?,
                    }),
                    None => None,
                };
                validator.neighbour(*direction, &self.page.handle(element), margin)?;
            }
            Check::Overlap { elements } => {
                for element in self.handles(elements) {
                    validator.overlap_with(&element)?;
                }
            }
            Check::NotOverlap { elements } => {
                validator.not_overlap_with_all(&self.handles(elements))?;
            }
            Check::SameOffset {
                direction,
                elements,
            } => {
                validator.same_offset_as_all(*direction, &self.handles(elements))?;
            }
            Check::SameWidth { elements } => {
                validator.same_width_as_all(&self.handles(elements))?;
            }
            Check::SameHeight { elements } => {
                validator.same_height_as_all(&self.handles(elements))?;
            }
            Check::SameSize { elements } => {
                validator.same_size_as_all(&self.handles(elements))?;
            }
            Check::MinWidth { value } => {
                validator.min_width(value.to_expression()?)?;
            }
            Check::MaxWidth { value } => {
                validator.max_width(value.to_expression()?)?;
            }
            Check::WidthBetween { min, max } => {
                validator.width_between(min.to_expression()?, max.to_expression()?)?;
            }
            Check::MinHeight { value } => {
                validator.min_height(value.to_expression()?)?;
            }
            Check::MaxHeight { value } => {
                validator.max_height(value.to_expression()?)?;
            }
            Check::HeightBetween { min, max } => {
                validator.height_between(min.to_expression()?, max.to_expression()?)?;
            }
            Check::MinOffset(sides) => apply_offsets(validator, Bound::Min, sides)?,
            Check::MaxOffset(sides) => apply_offsets(validator, Bound::Max, sides)?,
            Check::EqualLeftRightOffset => {
                validator.equal_left_right_offset()?;
            }
            Check::EqualTopBottomOffset => {
                validator.equal_top_bottom_offset()?;
            }
            Check::CssValue { property, values } => {
                validator.with_css_value(property, &as_strs(values))?;
            }
            Check::NotCssValue { property, values } => {
                validator.without_css_value(property, &as_strs(values))?;
            }
            Check::Units { units } => {
                validator.change_metrics_units_to(*units);
            }
        }
        Ok(())
    }

    fn handles(&self, selectors: &[String]) -> Vec<ElementHandle> {
        selectors.iter().map(|s| self.page.handle(s)).collect()
    }
}

fn root_handle(validation: &Validation) -> ElementHandle {
    let handle = ElementHandle::new(validation.root.clone());
    match &validation.name {
        Some(name) => handle.named(name.clone()),
        None => handle,
    }
}

fn apply_offsets(
    validator: &mut UiValidator<'_, StaticPage>,
    bound: Bound,
    sides: &Sides,
) -> CliResult<()> {
    for (direction, threshold) in sides.iter() {
        validator.offset_bound(direction, bound, threshold.to_expression()?)?;
    }
    Ok(())
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}
