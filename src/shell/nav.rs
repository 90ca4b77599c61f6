use crate::{
    animation::spring::Spring,
    audio::effects::{AudioSynth, SoundEffects},
    foundation::core::{PageLayout, TargetId},
    foundation::error::{VitrineError, VitrineResult},
    scroll::driver::{ScrollHost, ScrollState, SmoothScrollDriver},
};

/// Scroll offset past which the navbar slides in.
pub const NAV_VISIBLE_AFTER: f64 = 100.0;
/// Viewport line (from the top) that decides the active section.
pub const ACTIVE_LINE: f64 = 200.0;

/// Named scroll targets, in page order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Hero,
    About,
    Projects,
    Skills,
    Contact,
}

impl Anchor {
    pub const ALL: [Anchor; 5] = [
        Anchor::Hero,
        Anchor::About,
        Anchor::Projects,
        Anchor::Skills,
        Anchor::Contact,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hero => "Home",
            Self::About => "About",
            Self::Projects => "Projects",
            Self::Skills => "Skills",
            Self::Contact => "Contact",
        }
    }

    pub fn target(self) -> TargetId {
        TargetId::new(self.id())
    }

    pub fn parse(s: &str) -> VitrineResult<Self> {
        let s = s.trim().trim_start_matches('#');
        Self::ALL
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| VitrineError::validation(format!("unknown anchor '{s}'")))
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NavState {
    pub visible: bool,
    pub active: Anchor,
    /// Horizontal scale of the reading-progress bar.
    pub progress_scale: f64,
}

#[derive(Clone, Debug)]
pub struct Navbar {
    visible: bool,
    active: Anchor,
    progress: Spring,
}

impl Default for Navbar {
    fn default() -> Self {
        Self::new()
    }
}

impl Navbar {
    pub fn new() -> Self {
        Self {
            visible: false,
            active: Anchor::Hero,
            progress: Spring::new(100.0, 30.0, 0.0),
        }
    }

    pub fn state(&self) -> NavState {
        NavState {
            visible: self.visible,
            active: self.active,
            progress_scale: self.progress.value(),
        }
    }

    pub fn update(&mut self, scroll: &ScrollState, layout: &PageLayout, dt: f64) -> NavState {
        let offset = scroll.smoothed_offset;
        self.visible = offset > NAV_VISIBLE_AFTER;
        if let Some(anchor) = Anchor::ALL.into_iter().find(|a| {
            layout
                .viewport_bounds(&a.target(), offset)
                .is_some_and(|r| r.y0 <= ACTIVE_LINE && r.y1 >= ACTIVE_LINE)
        }) {
            self.active = anchor;
        }
        self.progress.set_target(scroll.progress01);
        self.progress.step(dt);
        self.state()
    }

    /// Navigate to `anchor`: click sound, then glide the driver to the section top.
    pub fn scroll_to<H: ScrollHost, S: AudioSynth>(
        &mut self,
        anchor: Anchor,
        layout: &PageLayout,
        driver: &mut SmoothScrollDriver<H>,
        sfx: &mut SoundEffects<S>,
    ) -> VitrineResult<()> {
        sfx.click();
        let bounds = layout.bounds(&anchor.target()).ok_or_else(|| {
            VitrineError::validation(format!("anchor '{anchor}' is not in the layout"))
        })?;
        driver.scroll_to(bounds.y0);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/nav.rs"]
mod tests;
