use std::collections::BTreeSet;

use crate::{
    animation::property::PropertySink,
    animation::timeline::{Direction, Timeline},
    foundation::error::{VitrineError, VitrineResult},
    scroll::trigger::{Edge, IntersectionTracker, TriggerPolicy, TriggerZone, ZoneId},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionState {
    Unmounted,
    Idle,
    PlayingForward,
    PlayingReverse,
    Completed,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SubscriptionId(pub u64);

/// Registry of per-frame callbacks. Only live subscriptions are ticked by the page.
#[derive(Clone, Debug, Default)]
pub struct FrameLoop {
    next_id: u64,
    live: BTreeSet<SubscriptionId>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.live.insert(id);
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.live.remove(&id)
    }

    pub fn is_live(&self, id: SubscriptionId) -> bool {
        self.live.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

/// One page section: a trigger zone wired to the timelines it starts and reverses.
#[derive(Clone, Debug)]
pub struct SectionController {
    name: String,
    zone: TriggerZone,
    timelines: Vec<Timeline>,
    state: SectionState,
    zone_id: Option<ZoneId>,
    subscription: Option<SubscriptionId>,
}

impl SectionController {
    pub fn new(
        name: impl Into<String>,
        zone: TriggerZone,
        timelines: Vec<Timeline>,
    ) -> VitrineResult<Self> {
        let name = name.into();
        zone.validate()?;
        if timelines.is_empty() {
            return Err(VitrineError::validation(format!(
                "section '{name}' needs at least one timeline"
            )));
        }
        Ok(Self {
            name,
            zone,
            timelines,
            state: SectionState::Unmounted,
            zone_id: None,
            subscription: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn zone(&self) -> &TriggerZone {
        &self.zone
    }

    pub fn policy(&self) -> TriggerPolicy {
        self.zone.policy
    }

    pub fn timelines(&self) -> &[Timeline] {
        &self.timelines
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    pub fn zone_id(&self) -> Option<ZoneId> {
        self.zone_id
    }

    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    pub fn is_mounted(&self) -> bool {
        self.state != SectionState::Unmounted
    }

    /// Register the trigger zone and a frame subscription. The "from" pose is written on the
    /// first tick so elements start hidden.
    pub fn mount(
        &mut self,
        tracker: &mut IntersectionTracker,
        frame_loop: &mut FrameLoop,
    ) -> VitrineResult<()> {
        if self.is_mounted() {
            return Ok(());
        }
        self.zone_id = Some(tracker.register(self.zone.clone())?);
        self.subscription = Some(frame_loop.subscribe());
        for tl in &mut self.timelines {
            tl.reset();
            tl.request_redraw();
        }
        self.state = SectionState::Idle;
        tracing::debug!(section = %self.name, "section mounted");
        Ok(())
    }

    /// Release the trigger zone and frame subscription before returning and freeze every
    /// timeline, so nothing writes to this section's elements afterwards.
    pub fn unmount(&mut self, tracker: &mut IntersectionTracker, frame_loop: &mut FrameLoop) {
        if let Some(id) = self.zone_id.take() {
            tracker.unregister(id);
        }
        if let Some(sub) = self.subscription.take() {
            frame_loop.unsubscribe(sub);
        }
        for tl in &mut self.timelines {
            tl.interrupt();
        }
        if self.state != SectionState::Unmounted {
            tracing::debug!(section = %self.name, "section unmounted");
        }
        self.state = SectionState::Unmounted;
    }

    /// React to a trigger edge for this section's zone.
    pub fn handle(&mut self, edge: Edge) {
        if !self.is_mounted() {
            return;
        }
        let direction = match edge {
            Edge::Entered => Direction::Forward,
            Edge::Left if self.zone.policy == TriggerPolicy::PlayReverseOnLeave => {
                Direction::Reverse
            }
            Edge::Left => return,
        };
        for tl in &mut self.timelines {
            tl.play(direction);
        }
        let previous = self.state;
        self.state = self.settled_state(direction);
        tracing::debug!(
            section = %self.name,
            ?edge,
            from = ?previous,
            to = ?self.state,
            "section edge"
        );
    }

    fn settled_state(&self, direction: Direction) -> SectionState {
        let playing = self.timelines.iter().any(Timeline::is_playing);
        match (direction, playing) {
            (Direction::Forward, true) => SectionState::PlayingForward,
            (Direction::Forward, false) => SectionState::Completed,
            (Direction::Reverse, true) => SectionState::PlayingReverse,
            (Direction::Reverse, false) => SectionState::Idle,
        }
    }

    /// Advance every timeline. Returns whether any is still playing.
    pub fn tick(&mut self, dt: f64, sink: &mut dyn PropertySink) -> bool {
        if !self.is_mounted() || self.subscription.is_none() {
            return false;
        }
        let mut playing = false;
        for tl in &mut self.timelines {
            playing |= tl.tick(dt, sink);
        }
        match self.state {
            SectionState::PlayingForward if !playing => self.state = SectionState::Completed,
            SectionState::PlayingReverse if !playing => self.state = SectionState::Idle,
            _ => {}
        }
        playing
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/controller.rs"]
mod tests;
