use crate::{
    animation::property::{Property, PropertySink},
    foundation::core::{Point, Rect, TargetId},
};

pub const DEFAULT_TILT_DEGREES: f64 = 15.0;
pub const HOVER_SCALE: f64 = 1.02;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TiltPose {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub scale: f64,
    /// Glare highlight position in percent of the card size.
    pub glare: Option<(f64, f64)>,
}

impl TiltPose {
    pub const REST: Self = Self {
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
        glare: None,
    };
}

/// Card that tilts toward the pointer in 3D.
#[derive(Clone, Debug)]
pub struct TiltCard {
    pub target: TargetId,
    pub bounds: Rect,
    pub strength: f64,
    pub glare: bool,
}

impl TiltCard {
    pub fn new(target: TargetId, bounds: Rect) -> Self {
        Self {
            target,
            bounds,
            strength: DEFAULT_TILT_DEGREES,
            glare: true,
        }
    }

    /// Pose for a pointer at `pointer` (viewport coordinates).
    pub fn pose_at(&self, pointer: Point) -> TiltPose {
        let (w, h) = (self.bounds.width(), self.bounds.height());
        if w <= 0.0 || h <= 0.0 {
            return TiltPose::REST;
        }
        let x = pointer.x - self.bounds.x0;
        let y = pointer.y - self.bounds.y0;
        let (cx, cy) = (w / 2.0, h / 2.0);
        TiltPose {
            rotate_x: ((y - cy) / cy) * -self.strength,
            rotate_y: ((x - cx) / cx) * self.strength,
            scale: HOVER_SCALE,
            glare: self.glare.then(|| (x / w * 100.0, y / h * 100.0)),
        }
    }

    pub fn apply(&self, pose: &TiltPose, sink: &mut dyn PropertySink) {
        sink.write(&self.target, Property::RotateX, pose.rotate_x);
        sink.write(&self.target, Property::RotateY, pose.rotate_y);
        sink.write(&self.target, Property::Scale, pose.scale);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/tilt.rs"]
mod tests;
