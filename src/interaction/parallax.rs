use crate::foundation::core::{Point, Vec2, Viewport};

pub const CAMERA_SMOOTH_TIME: f64 = 0.25;
pub const CAMERA_DISTANCE: f64 = 5.0;
const SETTLE_EPSILON: f64 = 0.001;

/// Critically damped follower parameterised by smooth time (seconds to roughly reach target).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SmoothDamp {
    pub value: f64,
    pub velocity: f64,
}

impl SmoothDamp {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
        }
    }

    /// Move toward `target`. Never overshoots it.
    pub fn step(&mut self, target: f64, smooth_time: f64, dt: f64) -> f64 {
        if !(dt.is_finite() && dt > 0.0 && target.is_finite()) {
            return self.value;
        }
        if (self.value - target).abs() <= SETTLE_EPSILON {
            self.value = target;
            self.velocity = 0.0;
            return self.value;
        }
        let omega = 2.0 / smooth_time.max(1e-4);
        let x = omega * dt;
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
        let change = self.value - target;
        let temp = (self.velocity + omega * change) * dt;
        self.velocity = (self.velocity - omega * temp) * decay;
        let mut out = target + (change + temp) * decay;
        if (target - self.value > 0.0) == (out > target) {
            out = target;
            self.velocity = 0.0;
        }
        self.value = out;
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraPose {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
}

/// Pointer position in normalized device coordinates: x right and y up, both in `[-1, 1]`.
pub fn pointer_ndc(pointer: Point, viewport: Viewport) -> Vec2 {
    Vec2::new(
        (pointer.x / viewport.width * 2.0 - 1.0).clamp(-1.0, 1.0),
        (1.0 - pointer.y / viewport.height * 2.0).clamp(-1.0, 1.0),
    )
}

/// Camera that drifts with the pointer. The 3D scene itself is rendered elsewhere.
#[derive(Clone, Debug)]
pub struct CameraRig {
    position: [SmoothDamp; 3],
    rotation: [SmoothDamp; 3],
    smooth_time: f64,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraRig {
    pub fn new() -> Self {
        Self {
            position: [
                SmoothDamp::new(0.0),
                SmoothDamp::new(0.0),
                SmoothDamp::new(CAMERA_DISTANCE),
            ],
            rotation: [SmoothDamp::default(); 3],
            smooth_time: CAMERA_SMOOTH_TIME,
        }
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position.map(|d| d.value),
            rotation: self.rotation.map(|d| d.value),
        }
    }

    pub fn update(&mut self, pointer: Vec2, dt: f64) -> CameraPose {
        let position = [pointer.x * 0.2, pointer.y * 0.2, CAMERA_DISTANCE];
        let rotation = [pointer.y * 0.1, -pointer.x * 0.1, 0.0];
        for (d, target) in self.position.iter_mut().zip(position) {
            d.step(target, self.smooth_time, dt);
        }
        for (d, target) in self.rotation.iter_mut().zip(rotation) {
            d.step(target, self.smooth_time, dt);
        }
        self.pose()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/parallax.rs"]
mod tests;
