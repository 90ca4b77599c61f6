use crate::{
    foundation::error::{VitrineError, VitrineResult},
    foundation::math::{damp, rate_for_fraction},
};

/// Offsets closer than this to the target snap onto it.
const SNAP_EPSILON: f64 = 0.01;

/// The document whose scrolling the driver takes over.
pub trait ScrollHost {
    /// Scroll offset as reported by the platform.
    fn native_offset(&self) -> f64;
    /// Write the offset the user should see.
    fn set_visual_offset(&mut self, offset: f64);
    /// Enable or disable the platform's own scroll handling.
    fn set_native_scrolling(&mut self, enabled: bool);
}

/// Host with no real document behind it, used by the CLI and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessScroll {
    pub offset: f64,
    pub native_enabled: bool,
    pub writes: u64,
}

impl HeadlessScroll {
    pub fn new(offset: f64) -> Self {
        Self {
            offset,
            native_enabled: true,
            writes: 0,
        }
    }
}

impl Default for HeadlessScroll {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ScrollHost for HeadlessScroll {
    fn native_offset(&self) -> f64 {
        self.offset
    }

    fn set_visual_offset(&mut self, offset: f64) {
        self.offset = offset;
        self.writes += 1;
    }

    fn set_native_scrolling(&mut self, enabled: bool) {
        self.native_enabled = enabled;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SmoothScrollConfig {
    /// Seconds after which `absorbed_fraction` of a scroll input has been applied.
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default = "default_absorbed_fraction")]
    pub absorbed_fraction: f64,
    #[serde(default = "default_wheel_multiplier")]
    pub wheel_multiplier: f64,
}

fn default_duration() -> f64 {
    1.2
}

fn default_absorbed_fraction() -> f64 {
    0.9
}

fn default_wheel_multiplier() -> f64 {
    1.0
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            absorbed_fraction: default_absorbed_fraction(),
            wheel_multiplier: default_wheel_multiplier(),
        }
    }
}

impl SmoothScrollConfig {
    pub fn validate(&self) -> VitrineResult<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(VitrineError::validation("smooth scroll duration must be > 0"));
        }
        if !(self.absorbed_fraction > 0.0 && self.absorbed_fraction < 1.0) {
            return Err(VitrineError::validation(
                "smooth scroll absorbed_fraction must be in (0, 1)",
            ));
        }
        if !self.wheel_multiplier.is_finite() || self.wheel_multiplier <= 0.0 {
            return Err(VitrineError::validation(
                "smooth scroll wheel_multiplier must be > 0",
            ));
        }
        Ok(())
    }

    /// Exponential smoothing rate in 1/s.
    pub fn rate(&self) -> f64 {
        rate_for_fraction(self.absorbed_fraction, self.duration)
    }
}

/// Per-frame scroll signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollState {
    /// Offset the input asked for (the smoothing target).
    pub raw_offset: f64,
    /// Offset shown this frame.
    pub smoothed_offset: f64,
    /// Units per second of the smoothed offset.
    pub velocity: f64,
    /// `smoothed_offset / max_scroll`, 0 at the top and 1 at the bottom.
    pub progress01: f64,
}

/// Replaces native scrolling with an exponentially eased offset.
///
/// The smoothed offset approaches the target monotonically and never passes it: every frame
/// covers a fraction in `[0, 1)` of the remaining distance.
#[derive(Debug)]
pub struct SmoothScrollDriver<H: ScrollHost> {
    host: H,
    config: SmoothScrollConfig,
    rate: f64,
    target: f64,
    smoothed: f64,
    velocity: f64,
    max_scroll: f64,
}

impl<H: ScrollHost> SmoothScrollDriver<H> {
    /// Take over scrolling on `host`, starting from its current native offset.
    pub fn init(mut host: H, config: SmoothScrollConfig, max_scroll: f64) -> Self {
        let max_scroll = max_scroll.max(0.0);
        host.set_native_scrolling(false);
        let start = host.native_offset().clamp(0.0, max_scroll);
        tracing::debug!(start, max_scroll, "smooth scroll driver active");
        Self {
            host,
            rate: config.rate(),
            config,
            target: start,
            smoothed: start,
            velocity: 0.0,
            max_scroll,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &SmoothScrollConfig {
        &self.config
    }

    pub fn max_scroll(&self) -> f64 {
        self.max_scroll
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Apply a wheel/touch delta to the target.
    pub fn wheel(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        self.target =
            (self.target + delta * self.config.wheel_multiplier).clamp(0.0, self.max_scroll);
    }

    /// Glide to an absolute offset.
    pub fn scroll_to(&mut self, offset: f64) {
        if !offset.is_finite() {
            return;
        }
        self.target = offset.clamp(0.0, self.max_scroll);
    }

    /// Move to an absolute offset without easing.
    pub fn jump_to(&mut self, offset: f64) {
        self.scroll_to(offset);
        self.smoothed = self.target;
        self.velocity = 0.0;
        self.host.set_visual_offset(self.smoothed);
    }

    /// Adopt an offset the platform changed on its own (scrollbar drag, find-in-page).
    pub fn sync_native(&mut self) {
        let native = self.host.native_offset();
        if (native - self.smoothed).abs() > SNAP_EPSILON {
            self.scroll_to(native);
        }
    }

    /// Update the scroll range after a layout change.
    pub fn set_max_scroll(&mut self, max_scroll: f64) {
        self.max_scroll = max_scroll.max(0.0);
        self.target = self.target.clamp(0.0, self.max_scroll);
        self.smoothed = self.smoothed.clamp(0.0, self.max_scroll);
    }

    /// Advance the smoothing by `dt` seconds and write the visual offset.
    pub fn frame(&mut self, dt: f64) -> ScrollState {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let prev = self.smoothed;
        self.smoothed = damp(self.smoothed, self.target, self.rate, dt);
        if (self.target - self.smoothed).abs() < SNAP_EPSILON {
            self.smoothed = self.target;
        }
        self.velocity = if dt > 0.0 {
            (self.smoothed - prev) / dt
        } else {
            0.0
        };
        self.host.set_visual_offset(self.smoothed);
        self.state()
    }

    pub fn state(&self) -> ScrollState {
        ScrollState {
            raw_offset: self.target,
            smoothed_offset: self.smoothed,
            velocity: self.velocity,
            progress01: if self.max_scroll > 0.0 {
                (self.smoothed / self.max_scroll).clamp(0.0, 1.0)
            } else {
                0.0
            },
        }
    }

    pub fn is_settled(&self) -> bool {
        self.smoothed == self.target
    }

    /// Hand scrolling back to the platform, landing exactly on the target offset.
    pub fn teardown(mut self) -> H {
        self.host.set_visual_offset(self.target);
        self.host.set_native_scrolling(true);
        tracing::debug!(offset = self.target, "smooth scroll driver released");
        self.host
    }
}

/// One driver per page: created on first use, released on navigate-away.
///
/// Owned by the page runtime and lent to whoever needs it, so teardown order stays explicit.
#[derive(Debug)]
pub struct ScrollDriverSlot<H: ScrollHost> {
    host: Option<H>,
    driver: Option<SmoothScrollDriver<H>>,
    config: SmoothScrollConfig,
    max_scroll: f64,
}

impl<H: ScrollHost> ScrollDriverSlot<H> {
    pub fn new(host: H, config: SmoothScrollConfig, max_scroll: f64) -> Self {
        Self {
            host: Some(host),
            driver: None,
            config,
            max_scroll,
        }
    }

    pub fn is_active(&self) -> bool {
        self.driver.is_some()
    }

    /// The active driver, if one was initialised.
    pub fn get(&self) -> Option<&SmoothScrollDriver<H>> {
        self.driver.as_ref()
    }

    /// The driver, initialising it on first call.
    pub fn get_or_init(&mut self) -> Option<&mut SmoothScrollDriver<H>> {
        if self.driver.is_none()
            && let Some(host) = self.host.take()
        {
            self.driver = Some(SmoothScrollDriver::init(
                host,
                self.config,
                self.max_scroll,
            ));
        }
        self.driver.as_mut()
    }

    pub fn set_max_scroll(&mut self, max_scroll: f64) {
        self.max_scroll = max_scroll.max(0.0);
        if let Some(driver) = self.driver.as_mut() {
            driver.set_max_scroll(self.max_scroll);
        }
    }

    /// Restore native scrolling. The slot can be initialised again afterwards.
    pub fn teardown(&mut self) {
        if let Some(driver) = self.driver.take() {
            self.host = Some(driver.teardown());
        }
    }

    /// The host, whether or not the driver is active.
    pub fn host(&self) -> Option<&H> {
        match &self.driver {
            Some(driver) => Some(driver.host()),
            None => self.host.as_ref(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/driver.rs"]
mod tests;
