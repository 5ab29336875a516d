//! Violation report
//!
//! Collects every failed layout expectation of one validator without
//! stopping at the first one.

use crate::result::LayoutResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of relationship a violation was recorded for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstraintKind {
    /// Neighbour on a given side, optionally within a margin range
    Neighbour,
    /// Elements must overlap
    Overlap,
    /// Elements must not overlap
    NotOverlap,
    /// Same distance from a page edge
    SameOffset,
    /// Same width
    SameWidth,
    /// Same height
    SameHeight,
    /// Same width and height
    SameSize,
    /// Lower bound on width or height
    MinSize,
    /// Upper bound on width or height
    MaxSize,
    /// Lower bound on a page offset
    MinOffset,
    /// Upper bound on a page offset
    MaxOffset,
    /// Left/right or top/bottom page offsets must match
    EqualOffsets,
    /// CSS property must contain a value
    CssValue,
    /// CSS property must not contain a value
    NotCssValue,
}

/// One failed expectation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Position in the report
    pub index: usize,
    /// Constraint that failed
    pub kind: ConstraintKind,
    /// Expected vs. observed, in words
    pub message: String,
    /// Names of the other elements involved
    pub elements: Vec<String>,
}

impl Violation {
    /// Create a violation
    #[must_use]
    pub fn new(kind: ConstraintKind, message: impl Into<String>, index: usize) -> Self {
        Self {
            index,
            kind,
            message: message.into(),
            elements: Vec::new(),
        }
    }

    /// Name an element involved in the violation
    #[must_use]
    pub fn with_element(mut self, name: impl Into<String>) -> Self {
        self.elements.push(name.into());
        self
    }
}

/// Ordered, append-only list of violations for one root element
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    root: String,
    violations: Vec<Violation>,
    check_count: usize,
}

impl ValidationReport {
    /// Create an empty report for the named root element
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Name of the element the checks were made on
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Count one evaluated check, whether it passed or not
    pub fn record_check(&mut self) {
        self.check_count += 1;
    }

    /// Append a violation
    pub fn record_violation(
        &mut self,
        kind: ConstraintKind,
        message: impl Into<String>,
        elements: &[&str],
    ) {
        let violation = elements.iter().fold(
            Violation::new(kind, message, self.violations.len()),
            |violation, name| violation.with_element(*name),
        );
        self.violations.push(violation);
    }

    /// All violations, in the order they were recorded
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Just the messages
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }

    /// Number of violations
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Number of checks evaluated
    #[must_use]
    pub const fn check_count(&self) -> usize {
        self.check_count
    }

    /// True when nothing was violated
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Counts of checks and violations
    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            checks: self.check_count,
            passed: self.check_count.saturating_sub(self.violations.len()),
            failed: self.violations.len(),
        }
    }

    /// Turn the report into a `Result`
    ///
    /// # Errors
    ///
    /// Returns every violation message if any check failed
    pub fn verify(&self) -> Result<(), LayoutViolations> {
        if self.passed() {
            Ok(())
        } else {
            Err(LayoutViolations::new(self))
        }
    }

    /// Serialize the report as pretty JSON
    pub fn to_json(&self) -> LayoutResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return writeln!(
                f,
                "'{}': all {} check(s) passed",
                self.root, self.check_count
            );
        }
        writeln!(
            f,
            "'{}': {} of {} check(s) failed:",
            self.root,
            self.violations.len(),
            self.check_count
        )?;
        for (i, violation) in self.violations.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, violation.message)?;
        }
        Ok(())
    }
}

/// Summary of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Checks evaluated
    pub checks: usize,
    /// Checks that passed
    pub passed: usize,
    /// Checks that failed
    pub failed: usize,
}

/// Error returned by [`ValidationReport::verify`]
#[derive(Debug, Clone)]
pub struct LayoutViolations {
    /// Root element name
    pub root: String,
    /// All failure messages
    pub messages: Vec<String>,
}

impl LayoutViolations {
    /// Collect the messages of a failed report
    #[must_use]
    pub fn new(report: &ValidationReport) -> Self {
        Self {
            root: report.root.clone(),
            messages: report
                .violations
                .iter()
                .map(|v| v.message.clone())
                .collect(),
        }
    }
}

impl fmt::Display for LayoutViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} layout violation(s) on '{}':",
            self.messages.len(),
            self.root
        )?;
        for (i, message) in self.messages.iter().enumerate() {
            writeln!(f, "  {}. {message}", i + 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for LayoutViolations {}
