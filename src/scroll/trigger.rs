use std::collections::BTreeMap;

use crate::{
    foundation::core::{PageLayout, TargetId},
    foundation::error::{VitrineError, VitrineResult},
};

/// What a zone does after its first entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPolicy {
    /// Fire `Entered` once, then retire the zone.
    #[default]
    PlayOnce,
    /// Stay registered and fire on every crossing in both directions.
    PlayReverseOnLeave,
}

/// Viewport-relative region in which an element counts as "in view".
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerZone {
    pub element: TargetId,
    /// Fraction of the viewport height the element's top edge must reach (0 = top).
    pub start_threshold: f64,
    /// Optional fraction of the viewport height the element's bottom edge must stay below.
    #[serde(default)]
    pub end_threshold: Option<f64>,
    #[serde(default)]
    pub policy: TriggerPolicy,
}

fn check_fraction(name: &str, v: f64) -> VitrineResult<()> {
    if !(0.0..=1.0).contains(&v) {
        return Err(VitrineError::validation(format!(
            "TriggerZone {name} must be in [0, 1], got {v}"
        )));
    }
    Ok(())
}

impl TriggerZone {
    pub fn new(
        element: TargetId,
        start_threshold: f64,
        policy: TriggerPolicy,
    ) -> VitrineResult<Self> {
        let zone = Self {
            element,
            start_threshold,
            end_threshold: None,
            policy,
        };
        zone.validate()?;
        Ok(zone)
    }

    pub fn with_end(mut self, end_threshold: f64) -> VitrineResult<Self> {
        self.end_threshold = Some(end_threshold);
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> VitrineResult<()> {
        check_fraction("start_threshold", self.start_threshold)?;
        if let Some(end) = self.end_threshold {
            check_fraction("end_threshold", end)?;
        }
        Ok(())
    }

    pub fn once_only(&self) -> bool {
        self.policy == TriggerPolicy::PlayOnce
    }

    /// Whether the element is inside the zone at `scroll_offset`. Unknown elements are outside.
    pub fn contains(&self, scroll_offset: f64, layout: &PageLayout) -> bool {
        let Some(r) = layout.viewport_bounds(&self.element, scroll_offset) else {
            return false;
        };
        let vh = layout.viewport.height;
        let started = r.y0 <= self.start_threshold * vh;
        match self.end_threshold {
            Some(end) => started && r.y1 >= end * vh,
            None => started,
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ZoneId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Entered,
    Left,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TriggerEvent {
    pub zone: ZoneId,
    pub edge: Edge,
}

#[derive(Clone, Debug)]
struct Registration {
    zone: TriggerZone,
    inside: bool,
}

/// Edge-triggered membership tracking for registered zones.
///
/// Recomputed from the smoothed scroll offset every frame, so zones keep firing while the
/// scroll is still easing after input stops.
#[derive(Clone, Debug, Default)]
pub struct IntersectionTracker {
    next_id: u64,
    zones: BTreeMap<ZoneId, Registration>,
}

impl IntersectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, zone: TriggerZone) -> VitrineResult<ZoneId> {
        zone.validate()?;
        let id = ZoneId(self.next_id);
        self.next_id += 1;
        self.zones.insert(
            id,
            Registration {
                zone,
                inside: false,
            },
        );
        Ok(id)
    }

    /// Returns whether the zone was still registered.
    pub fn unregister(&mut self, id: ZoneId) -> bool {
        self.zones.remove(&id).is_some()
    }

    pub fn is_registered(&self, id: ZoneId) -> bool {
        self.zones.contains_key(&id)
    }

    pub fn is_inside(&self, id: ZoneId) -> Option<bool> {
        self.zones.get(&id).map(|r| r.inside)
    }

    pub fn zone(&self, id: ZoneId) -> Option<&TriggerZone> {
        self.zones.get(&id).map(|r| &r.zone)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Recompute membership and return the edges crossed since the previous update, in zone
    /// registration order.
    pub fn update(&mut self, scroll_offset: f64, layout: &PageLayout) -> Vec<TriggerEvent> {
        let mut events = Vec::new();
        let mut retired = Vec::new();

        for (id, reg) in &mut self.zones {
            let now = reg.zone.contains(scroll_offset, layout);
            if now == reg.inside {
                continue;
            }
            reg.inside = now;
            let edge = if now { Edge::Entered } else { Edge::Left };
            events.push(TriggerEvent { zone: *id, edge });
            if now && reg.zone.once_only() {
                retired.push(*id);
            }
        }

        for id in retired {
            self.zones.remove(&id);
        }
        events
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/trigger.rs"]
mod tests;
