use crate::foundation::math::Rng64;

pub const PRELOADER_TICK_SECS: f64 = 0.1;
/// Largest progress step per tick (exclusive).
pub const MAX_STEP: f64 = 15.0;
pub const HIDE_DELAY_SECS: f64 = 0.5;
pub const HERO_REVEAL_SECS: f64 = 1.8;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PreloaderFrame {
    /// Whole percent shown on screen, `0..=100`.
    pub percent: u32,
    pub visible: bool,
    pub hero_revealed: bool,
}

/// Fake loading screen: progress creeps up in random steps, then the overlay fades out.
#[derive(Clone, Debug)]
pub struct Preloader {
    progress: f64,
    since_tick: f64,
    // Counts down once progress hits 100.
    hide_in: Option<f64>,
    visible: bool,
    elapsed: f64,
    rng: Rng64,
}

impl Preloader {
    pub fn new(seed: u64) -> Self {
        Self {
            progress: 0.0,
            since_tick: 0.0,
            hide_in: None,
            visible: true,
            elapsed: 0.0,
            rng: Rng64::new(seed),
        }
    }

    pub fn frame(&self) -> PreloaderFrame {
        PreloaderFrame {
            percent: self.progress.min(100.0).round() as u32,
            visible: self.visible,
            hero_revealed: self.elapsed >= HERO_REVEAL_SECS,
        }
    }

    pub fn advance(&mut self, dt: f64) -> PreloaderFrame {
        let dt = dt.max(0.0);
        self.elapsed += dt;
        if !self.visible {
            return self.frame();
        }

        if let Some(remaining) = self.hide_in.as_mut() {
            *remaining -= dt;
            if *remaining <= 1e-9 {
                self.visible = false;
                tracing::debug!(elapsed = self.elapsed, "preloader hidden");
            }
            return self.frame();
        }

        self.since_tick += dt;
        while self.hide_in.is_none() && self.since_tick >= PRELOADER_TICK_SECS {
            self.since_tick -= PRELOADER_TICK_SECS;
            if self.progress >= 100.0 {
                self.progress = 100.0;
                // Time already past this tick counts toward the hide delay.
                self.hide_in = Some(HIDE_DELAY_SECS - self.since_tick);
            } else {
                self.progress += self.rng.next_f64_01() * MAX_STEP;
            }
        }
        self.frame()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/preloader.rs"]
mod tests;
