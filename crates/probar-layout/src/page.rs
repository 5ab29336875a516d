//! Geometry sources
//!
//! The validator never talks to a browser directly. It asks a
//! [`GeometrySource`] for element boxes, computed CSS values and page
//! metrics, so a CDP-backed driver and the in-memory [`StaticPage`] are
//! interchangeable.

use crate::expression::PageMetrics;
use crate::geometry::Rectangle;
use crate::result::{LayoutError, LayoutResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Handle to an element on the page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Selector or id the source resolves
    pub selector: String,
    /// Human-readable name used in messages
    pub name: String,
}

impl ElementHandle {
    /// Create a handle whose name is its selector
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        let selector = selector.into();
        Self {
            name: selector.clone(),
            selector,
        }
    }

    /// Give the handle a readable name
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Live page geometry.
///
/// Every call reflects the current state of the page; implementations
/// must not cache.
pub trait GeometrySource {
    /// Bounding box of an element
    fn rectangle(&self, element: &ElementHandle) -> LayoutResult<Rectangle>;

    /// Computed value of a CSS property; empty when the element does not
    /// have the property
    fn css_value(&self, element: &ElementHandle, property: &str) -> LayoutResult<String>;

    /// Page size, viewport height and device pixel ratio
    fn page_metrics(&self) -> LayoutResult<PageMetrics>;
}

/// Element geometry captured ahead of time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticElement {
    /// X position
    pub x: i32,
    /// Y position
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
    /// Computed CSS values by property name
    #[serde(default)]
    pub css: HashMap<String, String>,
}

impl StaticElement {
    /// Create an element from location and size
    #[must_use]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            css: HashMap::new(),
        }
    }

    /// Add a computed CSS value
    #[must_use]
    pub fn with_css(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.css.insert(property.into(), value.into());
        self
    }

    /// The element's bounding box
    #[must_use]
    pub fn rectangle(&self) -> Rectangle {
        Rectangle::from_location_and_size(self.x, self.y, self.width, self.height)
    }
}

/// In-memory page for tests and recorded scenarios
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticPage {
    /// Page metrics
    pub metrics: PageMetrics,
    /// Elements by selector
    pub elements: HashMap<String, StaticElement>,
}

impl StaticPage {
    /// Create an empty page
    #[must_use]
    pub fn new(metrics: PageMetrics) -> Self {
        Self {
            metrics,
            elements: HashMap::new(),
        }
    }

    /// Add an element
    #[must_use]
    pub fn with_element(mut self, selector: impl Into<String>, element: StaticElement) -> Self {
        self.elements.insert(selector.into(), element);
        self
    }

    /// Handle for an element on this page
    #[must_use]
    pub fn handle(&self, selector: &str) -> ElementHandle {
        ElementHandle::new(selector)
    }

    fn element(&self, handle: &ElementHandle) -> LayoutResult<&StaticElement> {
        self.elements
            .get(&handle.selector)
            .ok_or_else(|| LayoutError::element_not_found(&handle.selector))
    }
}

impl GeometrySource for StaticPage {
    fn rectangle(&self, element: &ElementHandle) -> LayoutResult<Rectangle> {
        Ok(self.element(element)?.rectangle())
    }

    fn css_value(&self, element: &ElementHandle, property: &str) -> LayoutResult<String> {
        Ok(self
            .element(element)?
            .css
            .get(property)
            .cloned()
            .unwrap_or_default())
    }

    fn page_metrics(&self) -> LayoutResult<PageMetrics> {
        Ok(self.metrics)
    }
}
