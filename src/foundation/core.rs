use std::collections::BTreeMap;

use crate::foundation::error::{VitrineError, VitrineResult};

pub use kurbo::{Point, Rect, Vec2};

/// Visible area of the page, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    /// Build a viewport, rejecting non-finite or non-positive dimensions.
    pub fn new(width: f64, height: f64) -> VitrineResult<Self> {
        let vp = Self { width, height };
        vp.validate()?;
        Ok(vp)
    }

    /// Check both dimensions are finite and > 0.
    pub fn validate(self) -> VitrineResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(VitrineError::validation("Viewport width must be > 0"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(VitrineError::validation("Viewport height must be > 0"));
        }
        Ok(())
    }
}

/// Stable name of an animatable element (a heading, a grid item, a strip).
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TargetId(pub String);

impl TargetId {
    /// Build a target id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Document geometry as measured by the host: every tracked element's box in document
/// coordinates (y grows downward from the top of the page).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageLayout {
    /// Current viewport.
    pub viewport: Viewport,
    /// Total scrollable document height.
    pub document_height: f64,
    /// Element boxes keyed by target id.
    #[serde(default)]
    pub elements: BTreeMap<TargetId, Rect>,
}

impl PageLayout {
    /// Empty layout for the given viewport and document height.
    pub fn new(viewport: Viewport, document_height: f64) -> Self {
        Self {
            viewport,
            document_height,
            elements: BTreeMap::new(),
        }
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport.height).max(0.0)
    }

    /// Record (or replace) an element's document-space box.
    pub fn set_element(&mut self, id: TargetId, bounds: Rect) {
        self.elements.insert(id, bounds);
    }

    /// Look up an element's document-space box.
    pub fn bounds(&self, id: &TargetId) -> Option<Rect> {
        self.elements.get(id).copied()
    }

    /// Element box translated into viewport coordinates for a scroll offset.
    pub fn viewport_bounds(&self, id: &TargetId, scroll_offset: f64) -> Option<Rect> {
        self.bounds(id)
            .map(|r| r - Vec2::new(0.0, scroll_offset))
    }

    pub fn validate(&self) -> VitrineResult<()> {
        self.viewport.validate()?;
        if !self.document_height.is_finite() || self.document_height < 0.0 {
            return Err(VitrineError::validation(
                "PageLayout document_height must be finite and >= 0",
            ));
        }
        for (id, r) in &self.elements {
            if ![r.x0, r.y0, r.x1, r.y1].iter().all(|v| v.is_finite()) {
                return Err(VitrineError::validation(format!(
                    "element '{id}' has non-finite bounds"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
