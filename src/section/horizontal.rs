use crate::{
    animation::property::{Property, PropertySink},
    foundation::core::{TargetId, Viewport},
    foundation::error::{VitrineError, VitrineResult},
};

/// Narrowest viewport (exclusive) on which the track pins.
pub const DEFAULT_MIN_VIEWPORT_WIDTH: f64 = 768.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinPhase {
    Before,
    Pinned,
    Released,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackFrame {
    pub pinned: bool,
    /// Horizontal offset of the strip, `0` down to `-bound`.
    pub translation_x: f64,
    /// Vertical scroll distance absorbed by the pin so far.
    pub consumed: f64,
}

/// Section that pins to the viewport and turns vertical scroll into horizontal strip motion.
///
/// While pinned, every unit of vertical scroll moves the strip one unit left, up to
/// `strip_width - viewport.width + margin`. Reaching that bound releases the pin.
#[derive(Clone, Debug)]
pub struct HorizontalTrack {
    strip: TargetId,
    pin_start: f64,
    strip_width: f64,
    margin: f64,
    min_viewport_width: f64,

    enabled: bool,
    // Viewport is at or below `min_viewport_width`; only gates a track that has not pinned yet.
    narrow: bool,
    bound: f64,
    // Release point; exceeds `bound` only after a resize shrank it mid-gallery.
    limit: f64,
    phase: PinPhase,
    consumed: f64,
    release_offset: f64,
    last_offset: Option<f64>,
}

impl HorizontalTrack {
    /// `pin_start` is the document offset at which the section's top meets the viewport top.
    pub fn new(
        strip: TargetId,
        pin_start: f64,
        strip_width: f64,
        margin: f64,
        viewport: Viewport,
    ) -> VitrineResult<Self> {
        Self::with_min_viewport_width(
            strip,
            pin_start,
            strip_width,
            margin,
            DEFAULT_MIN_VIEWPORT_WIDTH,
            viewport,
        )
    }

    pub fn with_min_viewport_width(
        strip: TargetId,
        pin_start: f64,
        strip_width: f64,
        margin: f64,
        min_viewport_width: f64,
        viewport: Viewport,
    ) -> VitrineResult<Self> {
        for (name, v) in [
            ("pin_start", pin_start),
            ("strip_width", strip_width),
            ("margin", margin),
            ("min_viewport_width", min_viewport_width),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(VitrineError::validation(format!(
                    "HorizontalTrack {name} must be finite and >= 0"
                )));
            }
        }
        viewport.validate()?;
        let mut track = Self {
            strip,
            pin_start,
            strip_width,
            margin,
            min_viewport_width,
            enabled: false,
            narrow: false,
            bound: 0.0,
            limit: 0.0,
            phase: PinPhase::Before,
            consumed: 0.0,
            release_offset: 0.0,
            last_offset: None,
        };
        track.recompute(viewport);
        Ok(track)
    }

    pub fn strip(&self) -> &TargetId {
        &self.strip
    }

    pub fn pin_start(&self) -> f64 {
        self.pin_start
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn phase(&self) -> PinPhase {
        self.phase
    }

    pub fn translation_x(&self) -> f64 {
        0.0 - self.consumed.clamp(0.0, self.limit)
    }

    pub fn frame(&self) -> TrackFrame {
        TrackFrame {
            pinned: self.phase == PinPhase::Pinned,
            translation_x: self.translation_x(),
            consumed: self.consumed,
        }
    }

    /// Re-derive the bound for a new viewport without moving the strip.
    ///
    /// A narrow viewport disables a track that has not pinned yet. An engaged track keeps
    /// running at its current translation until it scrolls back above `pin_start`.
    pub fn recompute(&mut self, viewport: Viewport) {
        let was_enabled = self.enabled;
        self.narrow = viewport.width <= self.min_viewport_width;
        self.enabled = !self.narrow || (was_enabled && self.phase != PinPhase::Before);
        self.bound = (self.strip_width - viewport.width + self.margin).max(0.0);

        if !self.enabled {
            if was_enabled {
                tracing::debug!(strip = %self.strip, width = viewport.width, "track disabled");
            }
            self.limit = self.bound;
            return;
        }
        if !was_enabled {
            self.phase = PinPhase::Before;
            self.consumed = 0.0;
            self.limit = self.bound;
            self.last_offset = None;
            return;
        }

        match self.phase {
            PinPhase::Before => self.limit = self.bound,
            PinPhase::Pinned if self.consumed >= self.bound => {
                self.phase = PinPhase::Released;
                self.limit = self.consumed;
                self.release_offset = self.last_offset.unwrap_or(self.pin_start + self.consumed);
            }
            PinPhase::Pinned => self.limit = self.bound,
            // Stays released at the current translation; the new bound applies once the strip
            // is pulled back below it.
            PinPhase::Released => self.limit = self.consumed,
        }
    }

    /// Feed the current (smoothed) scroll offset.
    pub fn update(&mut self, scroll_offset: f64) -> TrackFrame {
        let delta = self.last_offset.map_or(0.0, |last| scroll_offset - last);
        self.last_offset = Some(scroll_offset);
        if !self.enabled {
            return self.frame();
        }

        match self.phase {
            PinPhase::Before => {
                if scroll_offset >= self.pin_start {
                    self.phase = PinPhase::Pinned;
                    self.consumed = scroll_offset - self.pin_start;
                }
            }
            PinPhase::Pinned => self.consumed += delta,
            PinPhase::Released => {
                if scroll_offset < self.release_offset {
                    self.phase = PinPhase::Pinned;
                    self.consumed = self.limit - (self.release_offset - scroll_offset);
                }
            }
        }

        if self.phase == PinPhase::Pinned {
            if self.consumed < self.bound {
                self.limit = self.bound;
            }
            if self.consumed < 0.0 {
                self.phase = PinPhase::Before;
                self.consumed = 0.0;
                if self.narrow {
                    self.enabled = false;
                    tracing::debug!(strip = %self.strip, "track disabled");
                }
            } else if self.consumed >= self.limit {
                self.release_offset = scroll_offset - (self.consumed - self.limit);
                self.consumed = self.limit;
                self.phase = PinPhase::Released;
                tracing::debug!(strip = %self.strip, bound = self.limit, "pin released");
            }
        }
        self.frame()
    }

    /// Write the strip's horizontal offset.
    pub fn apply(&self, sink: &mut dyn PropertySink) {
        sink.write(&self.strip, Property::TranslateX, self.translation_x());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/horizontal.rs"]
mod tests;
