use crate::{
    animation::ease::Ease,
    animation::property::{Property, PropertySink},
    animation::timeline::{Direction, Step, Timeline},
    foundation::core::{Point, Rect, TargetId, Vec2},
};

pub const DEFAULT_STRENGTH: f64 = 0.3;
const FOLLOW_SECS: f64 = 0.3;
const RELEASE_SECS: f64 = 0.5;

/// Button that leans toward the pointer and springs back when it leaves.
#[derive(Clone, Debug)]
pub struct MagneticButton {
    target: TargetId,
    bounds: Rect,
    strength: f64,
    offset: Vec2,
    tween: Option<Timeline>,
}

impl MagneticButton {
    pub fn new(target: TargetId, bounds: Rect) -> Self {
        Self {
            target,
            bounds,
            strength: DEFAULT_STRENGTH,
            offset: Vec2::ZERO,
            tween: None,
        }
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn tween_to(&mut self, to: Vec2, duration: f64, ease: Ease) {
        if !(to.x.is_finite() && to.y.is_finite()) {
            return;
        }
        // Each new tween starts from the value on screen, replacing the previous one.
        self.tween = Timeline::single(
            self.target.clone(),
            vec![
                Step::new(Property::TranslateX, self.offset.x, to.x, duration).with_ease(ease),
                Step::new(Property::TranslateY, self.offset.y, to.y, duration).with_ease(ease),
            ],
        )
        .ok();
        if let Some(tl) = self.tween.as_mut() {
            tl.play(Direction::Forward);
        }
    }

    /// Pointer moved over the button (viewport coordinates).
    pub fn pointer_move(&mut self, pointer: Point) {
        let pull = (pointer - self.bounds.center()) * self.strength;
        self.tween_to(pull, FOLLOW_SECS, Ease::OutCubic);
    }

    pub fn pointer_leave(&mut self) {
        self.tween_to(
            Vec2::ZERO,
            RELEASE_SECS,
            Ease::OutElastic {
                amplitude: 1.0,
                period: 0.3,
            },
        );
    }

    /// Returns whether a tween is still running.
    pub fn tick(&mut self, dt: f64, sink: &mut dyn PropertySink) -> bool {
        let Some(tl) = self.tween.as_mut() else {
            return false;
        };
        let running = tl.tick(dt, sink);
        self.offset = Vec2::new(
            tl.value_at(0, Property::TranslateX).unwrap_or(self.offset.x),
            tl.value_at(0, Property::TranslateY).unwrap_or(self.offset.y),
        );
        if !running {
            self.tween = None;
        }
        running
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/magnetic.rs"]
mod tests;
