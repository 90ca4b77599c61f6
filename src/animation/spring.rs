/// Largest integration step; longer frames are split into sub-steps.
const SUBSTEP_SECS: f64 = 1.0 / 240.0;
/// Frames longer than this (tab switches, debugger pauses) are clamped.
const MAX_FRAME_SECS: f64 = 0.1;
const REST_EPSILON: f64 = 0.01;

/// Damped spring follower with unit mass.
///
/// Integrated with semi-implicit Euler at a fixed sub-step, so results depend on the total
/// elapsed time and not on how the host slices frames (up to sub-step rounding).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Spring {
    pub stiffness: f64,
    pub damping: f64,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    pub fn new(stiffness: f64, damping: f64, initial: f64) -> Self {
        Self {
            stiffness: stiffness.max(0.0),
            damping: damping.max(0.0),
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Jump to `value` and stop.
    pub fn snap(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_EPSILON && self.velocity.abs() < REST_EPSILON
    }

    pub fn step(&mut self, dt: f64) -> f64 {
        let mut remaining = dt.clamp(0.0, MAX_FRAME_SECS);
        while remaining > 0.0 {
            let h = remaining.min(SUBSTEP_SECS);
            let force = -self.stiffness * (self.value - self.target) - self.damping * self.velocity;
            self.velocity += force * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
        self.value
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
