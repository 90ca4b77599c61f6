use crate::{
    animation::property::{Property, PropertySink},
    animation::spring::Spring,
    foundation::core::{Point, TargetId, Vec2},
};

const OFFSCREEN: f64 = -100.0;
// Centers the 16px dot on the pointer.
const DOT_OFFSET: f64 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CursorFrame {
    pub dot: Point,
    pub ring: Point,
    pub dot_scale: f64,
    pub ring_scale: f64,
    pub ring_opacity: f64,
}

/// Pointer replacement: a snappy dot and a lagging ring.
#[derive(Clone, Debug)]
pub struct CustomCursor {
    dot_target: TargetId,
    ring_target: TargetId,
    dot: [Spring; 2],
    ring: [Spring; 2],
    hovering: bool,
}

impl CustomCursor {
    pub fn new(dot_target: TargetId, ring_target: TargetId) -> Self {
        Self {
            dot_target,
            ring_target,
            dot: [Spring::new(700.0, 25.0, OFFSCREEN); 2],
            ring: [Spring::new(200.0, 35.0, OFFSCREEN); 2],
            hovering: false,
        }
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        if !(pointer.x.is_finite() && pointer.y.is_finite()) {
            return;
        }
        let p = pointer - Vec2::new(DOT_OFFSET, DOT_OFFSET);
        for (axis, v) in [p.x, p.y].into_iter().enumerate() {
            self.dot[axis].set_target(v);
            self.ring[axis].set_target(v);
        }
    }

    /// Whether the pointer is over a link or button.
    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn frame(&self) -> CursorFrame {
        CursorFrame {
            dot: Point::new(self.dot[0].value(), self.dot[1].value()),
            ring: Point::new(self.ring[0].value(), self.ring[1].value()),
            dot_scale: if self.hovering { 2.5 } else { 1.0 },
            ring_scale: if self.hovering { 1.5 } else { 1.0 },
            ring_opacity: if self.hovering { 0.8 } else { 0.4 },
        }
    }

    pub fn tick(&mut self, dt: f64, sink: &mut dyn PropertySink) -> CursorFrame {
        for s in self.dot.iter_mut().chain(self.ring.iter_mut()) {
            s.step(dt);
        }
        let f = self.frame();
        sink.write(&self.dot_target, Property::TranslateX, f.dot.x);
        sink.write(&self.dot_target, Property::TranslateY, f.dot.y);
        sink.write(&self.dot_target, Property::Scale, f.dot_scale);
        sink.write(&self.ring_target, Property::TranslateX, f.ring.x);
        sink.write(&self.ring_target, Property::TranslateY, f.ring.y);
        sink.write(&self.ring_target, Property::Scale, f.ring_scale);
        sink.write(&self.ring_target, Property::Opacity, f.ring_opacity);
        f
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/cursor.rs"]
mod tests;
