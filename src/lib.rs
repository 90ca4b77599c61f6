//! Vitrine is the motion core of a scroll-driven single-page portfolio.
//!
//! Everything the page shows is derived from one smoothed scroll offset:
//!
//! - A [`SmoothScrollDriver`] eases wheel input into a visual offset
//! - An [`IntersectionTracker`] turns that offset into enter/leave edges per [`TriggerZone`]
//! - [`SectionController`]s play their [`Timeline`]s forward or in reverse on those edges
//! - A [`HorizontalTrack`] pins the gallery and converts vertical scroll into horizontal motion
//!
//! [`Page`] wires these together from a [`PageConfig`]. Hosts receive output through a
//! [`PropertySink`] and never hand elements to the core.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod audio;
pub(crate) mod contact;
pub(crate) mod interaction;
pub(crate) mod page;
pub(crate) mod scroll;
pub(crate) mod section;
pub(crate) mod shell;

pub use crate::foundation::core::{PageLayout, Point, Rect, TargetId, Vec2, Viewport};
pub use crate::foundation::error::{VitrineError, VitrineResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::property::{Property, PropertySink, StyleBuffer};
pub use crate::animation::spring::Spring;
pub use crate::animation::timeline::{Direction, Step, Timeline, TimelineState};

pub use crate::scroll::driver::{
    HeadlessScroll, ScrollDriverSlot, ScrollHost, ScrollState, SmoothScrollConfig,
    SmoothScrollDriver,
};
pub use crate::scroll::trigger::{
    Edge, IntersectionTracker, TriggerEvent, TriggerPolicy, TriggerZone, ZoneId,
};

pub use crate::section::controller::{FrameLoop, SectionController, SectionState, SubscriptionId};
pub use crate::section::horizontal::{
    DEFAULT_MIN_VIEWPORT_WIDTH, HorizontalTrack, PinPhase, TrackFrame,
};

pub use crate::audio::ambient::{
    AUTOPLAY_DELAY_SECS, AmbientMusic, AmbientState, DEFAULT_VOLUME, HeadlessMusic, Interaction,
    MusicBackend,
};
pub use crate::audio::cue::{
    AudioCue, CUE_SAMPLE_RATE, GainEnvelope, SoundPreset, Waveform, mix_cues, synthesize,
};
pub use crate::audio::effects::{AudioSynth, NoAudio, OfflineSynth, SoundEffects};

pub use crate::contact::form::{ContactForm, FormField, FormStatus, STATUS_HOLD_SECS};
pub use crate::contact::relay::{
    ContactTransport, RELAY_ENDPOINT, RecordingTransport, RelayConfig, RelayPayload,
    TemplateParams,
};
pub use crate::contact::request::ContactRequest;

pub use crate::interaction::cursor::{CursorFrame, CustomCursor};
pub use crate::interaction::glitch::{GLITCH_TICK_SECS, GlitchText};
pub use crate::interaction::magnetic::{DEFAULT_STRENGTH, MagneticButton};
pub use crate::interaction::parallax::{
    CAMERA_DISTANCE, CAMERA_SMOOTH_TIME, CameraPose, CameraRig, SmoothDamp, pointer_ndc,
};
pub use crate::interaction::tilt::{DEFAULT_TILT_DEGREES, HOVER_SCALE, TiltCard, TiltPose};

pub use crate::shell::nav::{ACTIVE_LINE, Anchor, NAV_VISIBLE_AFTER, NavState, Navbar};
pub use crate::shell::preloader::{
    HERO_REVEAL_SECS, HIDE_DELAY_SECS, MAX_STEP, PRELOADER_TICK_SECS, Preloader, PreloaderFrame,
};
pub use crate::shell::theme::{MemoryStore, Palette, THEME_KEY, Theme, ThemeController, ThemeStore};

pub use crate::page::config::{
    HERO_TITLE_CHARS, PageConfig, SKILL_GROUPS, SectionConfig, TimelineConfig, TrackConfig,
};
pub use crate::page::runtime::{FrameReport, Page, SectionEvent, SectionStatus};
