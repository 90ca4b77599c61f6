use std::collections::BTreeMap;

use crate::foundation::core::TargetId;

/// Visual property a timeline can drive.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Horizontal translation in pixels.
    TranslateX,
    /// Vertical translation in pixels.
    TranslateY,
    /// Vertical translation as a percentage of the element's own height.
    TranslateYPercent,
    /// In-plane rotation in degrees.
    Rotate,
    /// Rotation around the horizontal axis in degrees.
    RotateX,
    /// Rotation around the vertical axis in degrees.
    RotateY,
    /// Uniform scale factor.
    Scale,
    /// Gaussian blur radius in pixels.
    Blur,
}

impl Property {
    /// Resting value of the property on an untouched element.
    pub fn identity(self) -> f64 {
        match self {
            Self::Opacity | Self::Scale => 1.0,
            _ => 0.0,
        }
    }
}

/// Capability through which animation output reaches the host UI.
///
/// The motion core never touches elements; it reports `(target, property, value)` triples and
/// the host applies them to whatever it renders.
pub trait PropertySink {
    fn write(&mut self, target: &TargetId, property: Property, value: f64);
}

impl<F> PropertySink for F
where
    F: FnMut(&TargetId, Property, f64),
{
    fn write(&mut self, target: &TargetId, property: Property, value: f64) {
        self(target, property, value)
    }
}

/// In-memory sink keeping the latest value per `(target, property)` and a write counter.
#[derive(Clone, Debug, Default)]
pub struct StyleBuffer {
    values: BTreeMap<(TargetId, Property), f64>,
    writes: u64,
}

impl StyleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, target: &TargetId, property: Property) -> Option<f64> {
        self.values.get(&(target.clone(), property)).copied()
    }

    /// Latest value, or the property's identity if it was never written.
    pub fn get_or_identity(&self, target: &TargetId, property: Property) -> f64 {
        self.get(target, property).unwrap_or_else(|| property.identity())
    }

    /// Total number of writes received.
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    pub fn values(&self) -> &BTreeMap<(TargetId, Property), f64> {
        &self.values
    }
}

impl PropertySink for StyleBuffer {
    fn write(&mut self, target: &TargetId, property: Property, value: f64) {
        self.writes += 1;
        self.values.insert((target.clone(), property), value);
    }
}
