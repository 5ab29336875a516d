//! Probar Layout: Responsive Layout Assertions
//!
//! Checks the rendered geometry of a page against layout expectations:
//! neighbours and the margins between them, overlap, alignment to page
//! edges, size bounds and computed CSS values. Thresholds are pixels or
//! percentages of the page, resolved lazily per axis.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐    ┌──────────────┐    ┌──────────────────┐
//! │ GeometrySource │───►│ UiValidator  │───►│ ValidationReport │
//! │ (driver/static)│    │ (fluent API) │    │ (violations)     │
//! └────────────────┘    └──────┬───────┘    └──────────────────┘
//!                              │ Constraint::evaluate
//!                       ┌──────▼───────┐
//!                       │ ExtendGiving │  Rectangle + Direction
//!                       │ Expression   │  Context (page, DPR, units)
//!                       └──────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use probar_layout::{PageMetrics, StaticElement, StaticPage, UiValidator, ValidatorConfig};
//!
//! let page = StaticPage::new(PageMetrics::new(1200, 2000, 900))
//!     .with_element("#content", StaticElement::new(300, 100, 600, 400))
//!     .with_element("#menu", StaticElement::new(0, 100, 280, 400));
//!
//! let mut validator =
//!     UiValidator::new(&page, &page.handle("#content"), ValidatorConfig::default())?;
//! validator
//!     .with_left_element_margin(&page.handle("#menu"), 10, 30)?
//!     .min_width(500)?;
//! assert!(validator.validate());
//! # Ok::<(), probar_layout::LayoutError>(())
//! ```

#![warn(missing_docs)]

mod constraint;
mod css;
mod expression;
pub mod geometry;
mod page;
mod report;
mod result;
mod validator;

pub use constraint::{Bound, Constraint, ElementBox, MarginRange};
pub use css::{expected_text, hex_to_rgba, text_is_found};
pub use expression::{Context, Expression, PageMetrics, PercentReference, Units};
pub use geometry::{
    Area, Axis, Direction, ExtendGiving, Group, Margin, Offset, Rectangle, Scalar, Vector,
};
pub use page::{ElementHandle, GeometrySource, StaticElement, StaticPage};
pub use report::{ConstraintKind, LayoutViolations, ReportSummary, ValidationReport, Violation};
pub use result::{LayoutError, LayoutResult};
pub use validator::{UiValidator, ValidatorConfig};
