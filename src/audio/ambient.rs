use std::collections::BTreeSet;

use crate::foundation::error::{VitrineError, VitrineResult};

/// Delay before the first autoplay attempt, leaving room for the preloader.
pub const AUTOPLAY_DELAY_SECS: f64 = 3.5;
pub const DEFAULT_VOLUME: f32 = 0.2;

/// Looping background track.
pub trait MusicBackend {
    fn play(&mut self) -> VitrineResult<()>;
    fn pause(&mut self);
    fn set_volume(&mut self, volume: f32);
}

/// In-memory backend. `allow_play = false` models a platform that blocks playback.
#[derive(Clone, Debug)]
pub struct HeadlessMusic {
    pub allow_play: bool,
    pub playing: bool,
    pub volume: f32,
    pub play_attempts: u32,
}

impl HeadlessMusic {
    pub fn new(allow_play: bool) -> Self {
        Self {
            allow_play,
            playing: false,
            volume: 1.0,
            play_attempts: 0,
        }
    }
}

impl MusicBackend for HeadlessMusic {
    fn play(&mut self) -> VitrineResult<()> {
        self.play_attempts += 1;
        if !self.allow_play {
            return Err(VitrineError::autoplay_denied(
                "playback requires a user gesture",
            ));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbientState {
    Idle,
    AwaitingAutoplay,
    AwaitingInteraction,
    Playing,
    Paused,
}

/// User gestures that may unlock playback.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    Click,
    KeyDown,
    Scroll,
    PointerMove,
    Touch,
}

#[derive(Clone, Debug)]
pub struct AmbientMusic<B: MusicBackend> {
    backend: B,
    state: AmbientState,
    volume: f32,
    since_mount: f64,
    interacted: bool,
    // Each gesture kind gets one chance to start playback.
    spent: BTreeSet<Interaction>,
}

impl<B: MusicBackend> AmbientMusic<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: AmbientState::Idle,
            volume: DEFAULT_VOLUME,
            since_mount: 0.0,
            interacted: false,
            spent: BTreeSet::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn state(&self) -> AmbientState {
        self.state
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_playing(&self) -> bool {
        self.state == AmbientState::Playing
    }

    pub fn mount(&mut self) {
        if self.state != AmbientState::Idle {
            return;
        }
        self.backend.set_volume(self.volume);
        self.since_mount = 0.0;
        self.interacted = false;
        self.spent.clear();
        self.state = AmbientState::AwaitingAutoplay;
    }

    fn start(&mut self) -> bool {
        match self.backend.play() {
            Ok(()) => {
                self.state = AmbientState::Playing;
                self.interacted = true;
                true
            }
            Err(VitrineError::AutoplayDenied(msg)) => {
                tracing::debug!(%msg, "ambient playback deferred until interaction");
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "ambient playback failed");
                false
            }
        }
    }

    /// Advance the autoplay timer.
    pub fn advance(&mut self, dt: f64) {
        if self.state != AmbientState::AwaitingAutoplay {
            return;
        }
        self.since_mount += dt.max(0.0);
        if self.since_mount >= AUTOPLAY_DELAY_SECS && !self.start() {
            self.state = AmbientState::AwaitingInteraction;
        }
    }

    /// Report a user gesture. Returns whether it started playback.
    pub fn interact(&mut self, kind: Interaction) -> bool {
        let waiting = matches!(
            self.state,
            AmbientState::AwaitingAutoplay | AmbientState::AwaitingInteraction
        );
        if !waiting || self.interacted || !self.spent.insert(kind) {
            return false;
        }
        self.start()
    }

    /// Play/pause button.
    pub fn toggle(&mut self) {
        match self.state {
            AmbientState::Idle => {}
            AmbientState::Playing => {
                self.backend.pause();
                self.state = AmbientState::Paused;
            }
            _ => {
                if !self.start() && self.state == AmbientState::AwaitingAutoplay {
                    self.state = AmbientState::AwaitingInteraction;
                }
            }
        }
        self.interacted = true;
    }

    pub fn set_volume(&mut self, volume: f32) {
        if !volume.is_finite() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
        self.backend.set_volume(self.volume);
    }

    pub fn unmount(&mut self) {
        if self.state == AmbientState::Idle {
            return;
        }
        self.backend.pause();
        self.state = AmbientState::Idle;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/ambient.rs"]
mod tests;
