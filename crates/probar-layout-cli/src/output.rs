//! Output formatting

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::scenario::Scenario;
use console::{style, Term};
use probar_layout::{Context, ReportSummary, StaticPage, Units, ValidationReport};
use serde::{Deserialize, Serialize};

/// Machine-readable result of a `check` run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutput {
    /// Scenario name
    pub scenario: String,
    /// True when every validation passed
    pub passed: bool,
    /// Totals over all validations
    pub summary: ReportSummary,
    /// One report per validation
    pub reports: Vec<ValidationReport>,
}

impl CheckOutput {
    /// Collect reports of a scenario run
    #[must_use]
    pub fn new(scenario: &Scenario, reports: Vec<ValidationReport>) -> Self {
        let summary = reports.iter().map(ValidationReport::summary).fold(
            ReportSummary {
                checks: 0,
                passed: 0,
                failed: 0,
            },
            |total, s| ReportSummary {
                checks: total.checks + s.checks,
                passed: total.passed + s.passed,
                failed: total.failed + s.failed,
            },
        );
        Self {
            scenario: scenario.name.clone(),
            passed: summary.failed == 0,
            summary,
            reports,
        }
    }
}

/// Writes results to stdout
#[derive(Debug)]
pub struct Printer {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Printer {
    /// Create a printer for the given config
    #[must_use]
    pub fn new(config: &CliConfig) -> Self {
        Self {
            term: Term::stdout(),
            use_color: config.color.should_color(),
            quiet: config.verbosity.is_quiet(),
        }
    }

    /// Human-readable reports, failures always shown
    pub fn reports(&self, output: &CheckOutput) -> CliResult<()> {
        for report in &output.reports {
            if report.passed() {
                if !self.quiet {
                    self.line(&format!(
                        "{} {}: {} check(s) passed",
                        self.pass_mark(),
                        report.root(),
                        report.check_count()
                    ))?;
                }
                continue;
            }
            self.line(&format!(
                "{} {}: {} of {} check(s) failed",
                self.fail_mark(),
                report.root(),
                report.violation_count(),
                report.check_count()
            ))?;
            for (i, message) in report.messages().iter().enumerate() {
                self.line(&format!("    {}. {message}", i + 1))?;
            }
        }
        if !self.quiet {
            let summary = output.summary;
            let totals = format!(
                "{} checks, {} passed, {} failed",
                summary.checks, summary.passed, summary.failed
            );
            let totals = match (self.use_color, output.passed) {
                (false, _) => totals,
                (true, true) => style(totals).green().bold().to_string(),
                (true, false) => style(totals).red().bold().to_string(),
            };
            self.line("")?;
            self.line(&totals)?;
        }
        Ok(())
    }

    /// Pretty JSON
    pub fn json(&self, output: &CheckOutput) -> CliResult<()> {
        self.line(&serde_json::to_string_pretty(output)?)
    }

    /// Page context and element boxes of a scenario
    pub fn explain(&self, scenario: &Scenario, page: &StaticPage) -> CliResult<()> {
        let context = Context::from_metrics(&page.metrics, Units::Px)?;
        let title = if scenario.name.is_empty() {
            "scenario".to_string()
        } else {
            scenario.name.clone()
        };
        self.line(&self.heading(&title))?;
        self.line(&format!("  page width  {}px", context.page_width()))?;
        self.line(&format!(
            "  page height {}px (viewport {}px x ratio {})",
            context.page_height(),
            page.metrics.viewport_height,
            context.device_pixel_ratio()
        ))?;
        self.line(&format!(
            "  document    {}x{}px",
            page.metrics.page_width, page.metrics.page_height
        ))?;

        self.line(&self.heading("elements"))?;
        for (selector, element) in &scenario.elements {
            let rectangle = element.rectangle();
            self.line(&format!(
                "  {selector:<24} {rectangle} {}x{}px",
                element.width, element.height
            ))?;
        }

        self.line(&self.heading("validations"))?;
        for validation in &scenario.validations {
            let name = validation.name.as_deref().unwrap_or(&validation.root);
            self.line(&format!(
                "  {name:<24} {} check(s), units {}",
                validation.checks.len(),
                units_name(validation.units)
            ))?;
        }
        Ok(())
    }

    fn heading(&self, text: &str) -> String {
        if self.use_color {
            style(text).cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn pass_mark(&self) -> String {
        if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "PASS".to_string()
        }
    }

    fn fail_mark(&self) -> String {
        if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        }
    }

    fn line(&self, text: &str) -> CliResult<()> {
        self.term.write_line(text)?;
        Ok(())
    }
}

const fn units_name(units: Units) -> &'static str {
    match units {
        Units::Px => "px",
        Units::Percent => "percent",
    }
}
