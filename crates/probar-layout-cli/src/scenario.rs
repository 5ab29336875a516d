//! Scenario file schema.
//!
//! A scenario is recorded page geometry plus the layout checks to run
//! against it:
//!
//! ```yaml
//! name: landing
//! page: { page_width: 1280, page_height: 4000, viewport_height: 720 }
//! elements:
//!   "#hero": { x: 140, y: 120, width: 1000, height: 400 }
//!   "#nav": { x: 140, y: 20, width: 1000, height: 80 }
//! validations:
//!   - root: "#hero"
//!     checks:
//!       - type: neighbour
//!         direction: top
//!         element: "#nav"
//!         margin: { min: 20, max: "3%" }
//!       - type: min_width
//!         value: 900
//! ```

use crate::error::{CliError, CliResult};
use probar_layout::{Direction, Expression, PageMetrics, StaticElement, StaticPage, Units};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Root scenario document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name
    #[serde(default)]
    pub name: String,
    /// Page metrics at recording time
    pub page: PageSpec,
    /// Element boxes keyed by selector
    pub elements: BTreeMap<String, StaticElement>,
    /// Validations, each with its own root element
    pub validations: Vec<Validation>,
}

/// Page metrics as written in a scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    /// Document width
    pub page_width: i32,
    /// Document height
    pub page_height: i32,
    /// Viewport height
    pub viewport_height: i32,
    /// Device pixel ratio
    #[serde(default = "default_pixel_ratio")]
    pub device_pixel_ratio: f64,
}

const fn default_pixel_ratio() -> f64 {
    1.0
}

impl From<PageSpec> for PageMetrics {
    fn from(spec: PageSpec) -> Self {
        Self::new(spec.page_width, spec.page_height, spec.viewport_height)
            .with_device_pixel_ratio(spec.device_pixel_ratio)
    }
}

/// Checks against one root element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Validation {
    /// Selector of the root element
    pub root: String,
    /// Name used in messages instead of the selector
    #[serde(default)]
    pub name: Option<String>,
    /// Initial units for bare numbers
    #[serde(default)]
    pub units: Units,
    /// Checks, run in order
    pub checks: Vec<Check>,
}

/// Threshold written as a number or as `"8%"` / `"12px"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Threshold {
    /// Read in the validation's current units
    Number(f64),
    /// Explicit pixels or page percentage
    Text(String),
}

impl Threshold {
    /// The expression this threshold stands for
    pub fn to_expression(&self) -> CliResult<Expression> {
        match self {
            Self::Number(value) => Ok(Expression::percent_or_pixels(*value)),
            Self::Text(text) => Ok(text.parse::<Expression>()?),
        }
    }
}

/// Inclusive threshold range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Lower bound
    pub min: Threshold,
    /// Upper bound
    pub max: Threshold,
}

/// Per-side page offset thresholds; missing sides are not checked
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sides {
    /// Top offset
    #[serde(default)]
    pub top: Option<Threshold>,
    /// Right offset
    #[serde(default)]
    pub right: Option<Threshold>,
    /// Bottom offset
    #[serde(default)]
    pub bottom: Option<Threshold>,
    /// Left offset
    #[serde(default)]
    pub left: Option<Threshold>,
}

impl Sides {
    /// Thresholds paired with their side, in top/right/bottom/left order
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &Threshold)> {
        Direction::ALL
            .into_iter()
            .zip([&self.top, &self.right, &self.bottom, &self.left])
            .filter_map(|(direction, threshold)| threshold.as_ref().map(|t| (direction, t)))
    }
}

/// One check in a validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    /// Element on one side of the root, optionally within a margin range
    Neighbour {
        /// Side
        direction: Direction,
        /// Neighbour selector
        element: String,
        /// Accepted gap
        #[serde(default)]
        margin: Option<Range>,
    },
    /// Every element overlaps the root
    Overlap {
        /// Selectors
        elements: Vec<String>,
    },
    /// No element overlaps the root
    NotOverlap {
        /// Selectors
        elements: Vec<String>,
    },
    /// Same distance from one page edge
    SameOffset {
        /// Page edge
        direction: Direction,
        /// Selectors
        elements: Vec<String>,
    },
    /// Same width
    SameWidth {
        /// Selectors
        elements: Vec<String>,
    },
    /// Same height
    SameHeight {
        /// Selectors
        elements: Vec<String>,
    },
    /// Same width and height
    SameSize {
        /// Selectors
        elements: Vec<String>,
    },
    /// Minimum width
    MinWidth {
        /// Threshold
        value: Threshold,
    },
    /// Maximum width
    MaxWidth {
        /// Threshold
        value: Threshold,
    },
    /// Width range
    WidthBetween {
        /// Lower bound
        min: Threshold,
        /// Upper bound
        max: Threshold,
    },
    /// Minimum height
    MinHeight {
        /// Threshold
        value: Threshold,
    },
    /// Maximum height
    MaxHeight {
        /// Threshold
        value: Threshold,
    },
    /// Height range
    HeightBetween {
        /// Lower bound
        min: Threshold,
        /// Upper bound
        max: Threshold,
    },
    /// Minimum page offsets
    MinOffset(Sides),
    /// Maximum page offsets
    MaxOffset(Sides),
    /// Horizontally centred on the page
    EqualLeftRightOffset,
    /// Vertically centred on the page
    EqualTopBottomOffset,
    /// CSS property contains every value
    CssValue {
        /// Property name
        property: String,
        /// Expected values
        values: Vec<String>,
    },
    /// CSS property contains none of the values
    NotCssValue {
        /// Property name
        property: String,
        /// Excluded values
        values: Vec<String>,
    },
    /// Switch how later bare numbers are read
    Units {
        /// New units
        units: Units,
    },
}

impl Check {
    /// Selectors of the other elements this check reads
    #[must_use]
    pub fn elements(&self) -> Vec<&str> {
        match self {
            Self::Neighbour { element, .. } => vec![element.as_str()],
            Self::Overlap { elements }
            | Self::NotOverlap { elements }
            | Self::SameOffset { elements, .. }
            | Self::SameWidth { elements }
            | Self::SameHeight { elements }
            | Self::SameSize { elements } => elements.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

impl Scenario {
    /// Load a scenario, choosing the parser by file extension
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&text),
            Some("json") => Self::from_json(&text),
            _ => Err(CliError::config(format!(
                "cannot tell the format of '{}': expected .yaml, .yml or .json",
                path.display()
            ))),
        }
    }

    /// Parse and validate YAML
    pub fn from_yaml(yaml: &str) -> CliResult<Self> {
        let scenario: Self = serde_yaml_ng::from_str(yaml)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Parse and validate JSON
    pub fn from_json(json: &str) -> CliResult<Self> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// The recorded page as a geometry source
    #[must_use]
    pub fn page(&self) -> StaticPage {
        self.elements.iter().fold(
            StaticPage::new(self.page.into()),
            |page, (selector, element)| page.with_element(selector.clone(), element.clone()),
        )
    }

    /// Total number of checks over all validations
    #[must_use]
    pub fn check_count(&self) -> usize {
        self.validations.iter().map(|v| v.checks.len()).sum()
    }

    /// Every referenced selector must be recorded
    fn validate(&self) -> CliResult<()> {
        if self.validations.is_empty() {
            return Err(CliError::scenario("no validations"));
        }
        for validation in &self.validations {
            let referenced = std::iter::once(validation.root.as_str())
                .chain(validation.checks.iter().flat_map(Check::elements));
            for selector in referenced {
                if !self.elements.contains_key(selector) {
                    return Err(CliError::scenario(format!(
                        "validation of '{}' refers to unknown element '{selector}'",
                        validation.root
                    )));
                }
            }
        }
        Ok(())
    }
}
