//! Result and error types for layout validation.
//!
//! Only misuse of the API ends up here. Failed layout expectations are
//! recorded in the [`ValidationReport`](crate::ValidationReport) instead.

use thiserror::Error;

/// Result type for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Configuration errors that abort a validation chain
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Percentages can only be taken of the page
    #[error("Unsupported percentage reference: {reference}")]
    UnsupportedPercentReference {
        /// Name of the rejected reference
        reference: String,
    },

    /// A `#`-prefixed CSS value that is not a hex colour
    #[error("Invalid hex color '{value}': {message}")]
    InvalidColor {
        /// The offending value
        value: String,
        /// Error message
        message: String,
    },

    /// The geometry source has no element for a handle
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector of the missing element
        selector: String,
    },

    /// Page metrics that cannot back a context
    #[error("Invalid page metrics: {message}")]
    InvalidMetrics {
        /// Error message
        message: String,
    },

    /// Threshold text that is neither pixels nor a percentage
    #[error("Invalid threshold '{value}'")]
    InvalidThreshold {
        /// The offending text
        value: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LayoutError {
    /// Create an invalid color error
    #[must_use]
    pub fn invalid_color(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidColor {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create an element not found error
    #[must_use]
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
        }
    }

    /// Create an invalid metrics error
    #[must_use]
    pub fn invalid_metrics(message: impl Into<String>) -> Self {
        Self::InvalidMetrics {
            message: message.into(),
        }
    }
}
