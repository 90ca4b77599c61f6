use crate::{
    animation::ease::Ease,
    animation::property::{Property, PropertySink},
    foundation::core::TargetId,
    foundation::error::{VitrineError, VitrineResult},
    foundation::math::lerp,
};

const TIME_EPSILON: f64 = 1e-9;

/// One property tween inside a timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    pub property: Property,
    pub from: f64,
    pub to: f64,
    /// Seconds.
    pub duration: f64,
    /// Seconds from timeline start (before per-target stagger).
    #[serde(default)]
    pub delay_offset: f64,
    #[serde(default)]
    pub ease: Ease,
}

impl Step {
    pub fn new(property: Property, from: f64, to: f64, duration: f64) -> Self {
        Self {
            property,
            from,
            to,
            duration,
            delay_offset: 0.0,
            ease: Ease::default(),
        }
    }

    pub fn with_delay(mut self, delay_offset: f64) -> Self {
        self.delay_offset = delay_offset;
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn validate(&self) -> VitrineResult<()> {
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(VitrineError::animation("Step from/to must be finite"));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(VitrineError::animation("Step duration must be >= 0"));
        }
        if !self.delay_offset.is_finite() || self.delay_offset < 0.0 {
            return Err(VitrineError::animation("Step delay_offset must be >= 0"));
        }
        Ok(())
    }

    /// Linear progress in `[0, 1]` at `local` seconds after this step starts.
    pub fn progress_at(&self, local: f64) -> f64 {
        // Stagger offsets accumulate rounding error; treat the last nanosecond as done.
        if local >= self.duration - TIME_EPSILON {
            return if local >= 0.0 { 1.0 } else { 0.0 };
        }
        (local / self.duration).clamp(0.0, 1.0)
    }

    pub fn value_at_progress(&self, progress: f64) -> f64 {
        lerp(self.from, self.to, self.ease.apply(progress))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineState {
    Idle,
    Playing,
    Completed,
    Interrupted,
}

/// Time-based interpolation of one or more properties across one or more targets.
///
/// Every written value is a pure function of the playhead, so reversing mid-flight keeps the
/// playhead where it is and the next write continues from the value already on screen.
#[derive(Clone, Debug)]
pub struct Timeline {
    targets: Vec<TargetId>,
    steps: Vec<Step>,
    stagger_interval: f64,
    // Step indices per property, sorted by start time.
    tracks: Vec<(Property, Vec<usize>)>,
    total: f64,
    playhead_time: f64,
    direction: Direction,
    state: TimelineState,
    redraw: bool,
}

impl Timeline {
    pub fn new(
        targets: Vec<TargetId>,
        steps: Vec<Step>,
        stagger_interval: f64,
    ) -> VitrineResult<Self> {
        if targets.is_empty() {
            return Err(VitrineError::animation("Timeline needs at least one target"));
        }
        if steps.is_empty() {
            return Err(VitrineError::animation("Timeline needs at least one step"));
        }
        if !stagger_interval.is_finite() || stagger_interval < 0.0 {
            return Err(VitrineError::animation("Timeline stagger_interval must be >= 0"));
        }
        for step in &steps {
            step.validate()?;
        }

        let mut tracks: Vec<(Property, Vec<usize>)> = Vec::new();
        for (idx, step) in steps.iter().enumerate() {
            match tracks.iter_mut().find(|(p, _)| *p == step.property) {
                Some((_, list)) => list.push(idx),
                None => tracks.push((step.property, vec![idx])),
            }
        }
        for (_, list) in &mut tracks {
            list.sort_by(|a, b| steps[*a].delay_offset.total_cmp(&steps[*b].delay_offset));
        }

        let last_offset = (targets.len() - 1) as f64 * stagger_interval;
        let total = steps
            .iter()
            .map(|s| s.delay_offset + s.duration + last_offset)
            .fold(0.0, f64::max);

        Ok(Self {
            targets,
            steps,
            stagger_interval,
            tracks,
            total,
            playhead_time: 0.0,
            direction: Direction::Forward,
            state: TimelineState::Idle,
            redraw: false,
        })
    }

    /// Single-target convenience constructor.
    pub fn single(target: TargetId, steps: Vec<Step>) -> VitrineResult<Self> {
        Self::new(vec![target], steps, 0.0)
    }

    pub fn targets(&self) -> &[TargetId] {
        &self.targets
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn stagger_interval(&self) -> f64 {
        self.stagger_interval
    }

    pub fn total_duration(&self) -> f64 {
        self.total
    }

    pub fn playhead_time(&self) -> f64 {
        self.playhead_time
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == TimelineState::Playing
    }

    /// Playhead position as a fraction of the total duration.
    pub fn progress(&self) -> f64 {
        if self.total <= 0.0 {
            return if self.playhead_time > 0.0 || self.state == TimelineState::Completed {
                1.0
            } else {
                0.0
            };
        }
        (self.playhead_time / self.total).clamp(0.0, 1.0)
    }

    fn at_end(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.playhead_time >= self.total,
            Direction::Reverse => self.playhead_time <= 0.0,
        }
    }

    /// Start or steer playback.
    ///
    /// Same direction while playing: no-op. Opposite direction while playing: turns around at
    /// the current playhead. After `interrupt()`: resumes from the frozen playhead.
    pub fn play(&mut self, direction: Direction) {
        if self.state == TimelineState::Playing && self.direction == direction {
            return;
        }
        self.direction = direction;

        if self.at_end(direction) {
            if self.state == TimelineState::Idle && direction == Direction::Reverse {
                return;
            }
            if self.total <= 0.0 && direction == Direction::Forward {
                self.playhead_time = self.total;
            }
            self.state = TimelineState::Completed;
            self.redraw = true;
            return;
        }
        self.state = TimelineState::Playing;
    }

    /// Halt immediately, keeping the values already written.
    pub fn interrupt(&mut self) {
        self.state = TimelineState::Interrupted;
        self.redraw = false;
    }

    /// Rewind to the start without writing anything.
    pub fn reset(&mut self) {
        self.playhead_time = 0.0;
        self.direction = Direction::Forward;
        self.state = TimelineState::Idle;
        self.redraw = false;
    }

    /// Move the playhead without changing state; the new pose is written on the next tick.
    pub fn seek(&mut self, time: f64) {
        self.playhead_time = time.clamp(0.0, self.total);
        self.redraw = true;
    }

    /// Ask for the current pose to be written on the next tick even if not playing.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Rewind and write the starting pose right away, so elements are hidden before their first
    /// trigger.
    pub fn apply_initial(&mut self, sink: &mut dyn PropertySink) {
        self.reset();
        self.write_pose(sink);
    }

    /// Start time of `step` for the target at `target_index`.
    pub fn step_start(&self, target_index: usize, step: &Step) -> f64 {
        step.delay_offset + target_index as f64 * self.stagger_interval
    }

    /// Current value of `property` on the target at `target_index`, if the timeline drives it.
    pub fn value_at(&self, target_index: usize, property: Property) -> Option<f64> {
        let (_, list) = self.tracks.iter().find(|(p, _)| *p == property)?;
        let t = self.playhead_time - target_index as f64 * self.stagger_interval;
        let idx = list.partition_point(|&i| self.steps[i].delay_offset <= t);
        if idx == 0 {
            return Some(self.steps[list[0]].from);
        }
        let step = &self.steps[list[idx - 1]];
        Some(step.value_at_progress(step.progress_at(t - step.delay_offset)))
    }

    fn write_pose(&self, sink: &mut dyn PropertySink) {
        for (target_index, target) in self.targets.iter().enumerate() {
            for (property, _) in &self.tracks {
                if let Some(v) = self.value_at(target_index, *property) {
                    sink.write(target, *property, v);
                }
            }
        }
    }

    /// Advance by `dt` seconds and write the resulting pose. Returns whether still playing.
    pub fn tick(&mut self, dt: f64, sink: &mut dyn PropertySink) -> bool {
        if self.state != TimelineState::Playing {
            if self.redraw {
                self.redraw = false;
                self.write_pose(sink);
            }
            return false;
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.playhead_time = match self.direction {
            Direction::Forward => (self.playhead_time + dt).min(self.total),
            Direction::Reverse => (self.playhead_time - dt).max(0.0),
        };
        self.redraw = false;
        self.write_pose(sink);

        if self.at_end(self.direction) {
            self.state = TimelineState::Completed;
            return false;
        }
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
