use crate::{
    animation::property::PropertySink,
    audio::effects::{AudioSynth, NoAudio, SoundEffects},
    foundation::core::{PageLayout, Viewport},
    foundation::error::{VitrineError, VitrineResult},
    page::config::PageConfig,
    scroll::driver::{ScrollDriverSlot, ScrollHost, ScrollState},
    scroll::trigger::{Edge, IntersectionTracker},
    section::controller::{FrameLoop, SectionController, SectionState},
    section::horizontal::{HorizontalTrack, TrackFrame},
    shell::nav::{Anchor, NavState, Navbar},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionEvent {
    pub section: String,
    pub edge: Edge,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionStatus {
    pub name: String,
    pub state: SectionState,
}

/// Everything that changed during one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameReport {
    pub scroll: ScrollState,
    pub events: Vec<SectionEvent>,
    pub sections: Vec<SectionStatus>,
    pub tracks: Vec<TrackFrame>,
    pub nav: NavState,
}

/// The scroll-driven page: one smooth-scroll driver feeding trigger zones, section timelines,
/// pinned tracks and the navbar, in that order, once per frame.
pub struct Page<H: ScrollHost> {
    layout: PageLayout,
    tracker: IntersectionTracker,
    frame_loop: FrameLoop,
    scroll: ScrollDriverSlot<H>,
    sections: Vec<SectionController>,
    tracks: Vec<HorizontalTrack>,
    navbar: Navbar,
    sfx: SoundEffects<Box<dyn AudioSynth>>,
    mounted: bool,
    last_scroll: ScrollState,
}

impl<H: ScrollHost> Page<H> {
    pub fn new(config: &PageConfig, host: H) -> VitrineResult<Self> {
        config.validate()?;
        let layout = config.layout.clone();

        let mut sections = Vec::with_capacity(config.sections.len());
        for sc in &config.sections {
            if layout.bounds(&sc.trigger.element).is_none() {
                tracing::warn!(
                    section = %sc.name,
                    element = %sc.trigger.element,
                    "trigger element missing from layout; section will never fire"
                );
            }
            let timelines = sc
                .timelines
                .iter()
                .map(|tc| tc.build())
                .collect::<VitrineResult<Vec<_>>>()?;
            sections.push(SectionController::new(
                sc.name.clone(),
                sc.trigger.clone(),
                timelines,
            )?);
        }

        let mut tracks = Vec::with_capacity(config.tracks.len());
        for tc in &config.tracks {
            let pin_start = layout
                .bounds(&tc.section)
                .map(|r| r.y0)
                .ok_or_else(|| {
                    VitrineError::validation(format!(
                        "track section '{}' is not in the layout",
                        tc.section
                    ))
                })?;
            tracks.push(HorizontalTrack::with_min_viewport_width(
                tc.strip.clone(),
                pin_start,
                tc.strip_width,
                tc.margin,
                tc.min_viewport_width,
                layout.viewport,
            )?);
        }

        Ok(Self {
            scroll: ScrollDriverSlot::new(host, config.scroll, layout.max_scroll()),
            layout,
            tracker: IntersectionTracker::new(),
            frame_loop: FrameLoop::new(),
            sections,
            tracks,
            navbar: Navbar::new(),
            sfx: SoundEffects::new(Box::new(NoAudio)),
            mounted: false,
            last_scroll: ScrollState::default(),
        })
    }

    /// Route UI sounds through `synth` instead of the silent default.
    pub fn with_audio(mut self, synth: Box<dyn AudioSynth>) -> Self {
        self.sfx = SoundEffects::new(synth);
        self
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn host(&self) -> Option<&H> {
        self.scroll.host()
    }

    pub fn sections(&self) -> &[SectionController] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&SectionController> {
        self.sections.iter().find(|s| s.name() == name)
    }

    pub fn tracks(&self) -> &[HorizontalTrack] {
        &self.tracks
    }

    pub fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    pub fn sfx_mut(&mut self) -> &mut SoundEffects<Box<dyn AudioSynth>> {
        &mut self.sfx
    }

    /// Take over scrolling and register every section.
    #[tracing::instrument(skip_all)]
    pub fn mount(&mut self) -> VitrineResult<()> {
        if self.mounted {
            return Ok(());
        }
        for section in &mut self.sections {
            section.mount(&mut self.tracker, &mut self.frame_loop)?;
        }
        if let Some(driver) = self.scroll.get_or_init() {
            self.last_scroll = driver.state();
        }
        self.mounted = true;
        tracing::info!(
            sections = self.sections.len(),
            tracks = self.tracks.len(),
            "page mounted"
        );
        Ok(())
    }

    /// Apply a wheel or touch delta.
    pub fn wheel(&mut self, delta: f64) {
        if !self.mounted {
            return;
        }
        if let Some(driver) = self.scroll.get_or_init() {
            driver.wheel(delta);
        }
    }

    /// Glide to a named section.
    pub fn scroll_to(&mut self, anchor: Anchor) -> VitrineResult<()> {
        if !self.mounted {
            return Err(VitrineError::validation("page is not mounted"));
        }
        let driver = self
            .scroll
            .get_or_init()
            .ok_or_else(|| VitrineError::validation("scroll driver is unavailable"))?;
        self.navbar
            .scroll_to(anchor, &self.layout, driver, &mut self.sfx)
    }

    /// Advance one frame by `dt` seconds and write every animated value to `sink`.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn frame(&mut self, dt: f64, sink: &mut dyn PropertySink) -> FrameReport {
        if self.mounted
            && let Some(driver) = self.scroll.get_or_init()
        {
            driver.sync_native();
            self.last_scroll = driver.frame(dt);
        }
        let offset = self.last_scroll.smoothed_offset;

        let mut events = Vec::new();
        if self.mounted {
            for ev in self.tracker.update(offset, &self.layout) {
                let Some(section) = self
                    .sections
                    .iter_mut()
                    .find(|s| s.zone_id() == Some(ev.zone))
                else {
                    continue;
                };
                section.handle(ev.edge);
                events.push(SectionEvent {
                    section: section.name().to_string(),
                    edge: ev.edge,
                });
            }

            for section in &mut self.sections {
                if section
                    .subscription()
                    .is_some_and(|sub| self.frame_loop.is_live(sub))
                {
                    section.tick(dt, sink);
                }
            }
        }

        let mut tracks = Vec::with_capacity(self.tracks.len());
        for track in &mut self.tracks {
            if self.mounted {
                track.update(offset);
                track.apply(sink);
            }
            tracks.push(track.frame());
        }

        let nav = if self.mounted {
            self.navbar.update(&self.last_scroll, &self.layout, dt)
        } else {
            self.navbar.state()
        };

        FrameReport {
            scroll: self.last_scroll,
            events,
            sections: self
                .sections
                .iter()
                .map(|s| SectionStatus {
                    name: s.name().to_string(),
                    state: s.state(),
                })
                .collect(),
            tracks,
            nav,
        }
    }

    /// Unmount one section. Its elements receive no further writes.
    pub fn unmount_section(&mut self, name: &str) -> bool {
        let Some(section) = self.sections.iter_mut().find(|s| s.name() == name) else {
            return false;
        };
        let was_mounted = section.is_mounted();
        section.unmount(&mut self.tracker, &mut self.frame_loop);
        was_mounted
    }

    /// New viewport size: re-derive track bounds and the scroll range.
    pub fn resize(&mut self, viewport: Viewport) -> VitrineResult<()> {
        viewport.validate()?;
        self.layout.viewport = viewport;
        self.relayout();
        tracing::debug!(width = viewport.width, height = viewport.height, "page resized");
        Ok(())
    }

    /// Replace the measured layout, e.g. after fonts or images changed element sizes.
    pub fn set_layout(&mut self, layout: PageLayout) -> VitrineResult<()> {
        layout.validate()?;
        self.layout = layout;
        self.relayout();
        Ok(())
    }

    fn relayout(&mut self) {
        for track in &mut self.tracks {
            track.recompute(self.layout.viewport);
        }
        self.scroll.set_max_scroll(self.layout.max_scroll());
    }

    /// Unmount every section and hand scrolling back to the host.
    pub fn teardown(&mut self) {
        for section in &mut self.sections {
            section.unmount(&mut self.tracker, &mut self.frame_loop);
        }
        self.scroll.teardown();
        if self.mounted {
            tracing::info!("page torn down");
        }
        self.mounted = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/runtime.rs"]
mod tests;
