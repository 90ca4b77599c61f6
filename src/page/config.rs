use std::collections::BTreeSet;

use crate::{
    animation::ease::Ease,
    animation::property::Property,
    animation::timeline::{Step, Timeline},
    foundation::core::{PageLayout, Rect, TargetId, Viewport},
    foundation::error::{VitrineError, VitrineResult},
    scroll::driver::SmoothScrollConfig,
    scroll::trigger::{TriggerPolicy, TriggerZone},
    section::horizontal::DEFAULT_MIN_VIEWPORT_WIDTH,
    shell::nav::Anchor,
};

/// Characters in the hero headline, each animated on its own.
pub const HERO_TITLE_CHARS: usize = 15;
/// Category cards in the skills grid.
pub const SKILL_GROUPS: usize = 4;
const GALLERY_STRIP_WIDTH: f64 = 2400.0;
const GALLERY_MARGIN: f64 = 200.0;

/// One timeline of a section, as written in the page config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineConfig {
    pub targets: Vec<TargetId>,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub stagger: f64,
}

impl TimelineConfig {
    pub fn build(&self) -> VitrineResult<Timeline> {
        Timeline::new(self.targets.clone(), self.steps.clone(), self.stagger)
    }
}

/// A trigger zone and the timelines it drives.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionConfig {
    pub name: String,
    pub trigger: TriggerZone,
    pub timelines: Vec<TimelineConfig>,
}

/// Pinned horizontal gallery.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackConfig {
    /// Element whose top pins against the viewport top.
    pub section: TargetId,
    /// Element translated horizontally.
    pub strip: TargetId,
    pub strip_width: f64,
    #[serde(default = "default_margin")]
    pub margin: f64,
    #[serde(default = "default_min_viewport_width")]
    pub min_viewport_width: f64,
}

fn default_margin() -> f64 {
    GALLERY_MARGIN
}

fn default_min_viewport_width() -> f64 {
    DEFAULT_MIN_VIEWPORT_WIDTH
}

/// Everything the page runtime needs, loadable from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageConfig {
    pub layout: PageLayout,
    #[serde(default)]
    pub scroll: SmoothScrollConfig,
    pub sections: Vec<SectionConfig>,
    #[serde(default)]
    pub tracks: Vec<TrackConfig>,
}

impl PageConfig {
    pub fn from_json(json: &str) -> VitrineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> VitrineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> VitrineResult<()> {
        self.layout.validate()?;
        self.scroll.validate()?;

        // Each (target, property) pair has exactly one writer: a track strip or one timeline.
        let mut owned: BTreeSet<(&TargetId, Property)> = BTreeSet::new();
        for track in &self.tracks {
            if !owned.insert((&track.strip, Property::TranslateX)) {
                return Err(VitrineError::validation(format!(
                    "track strip '{}' is driven by more than one track",
                    track.strip
                )));
            }
        }

        let mut names = BTreeSet::new();
        for section in &self.sections {
            if section.name.trim().is_empty() {
                return Err(VitrineError::validation("section name must be non-empty"));
            }
            if !names.insert(section.name.as_str()) {
                return Err(VitrineError::validation(format!(
                    "duplicate section name '{}'",
                    section.name
                )));
            }
            section.trigger.validate()?;
            if section.timelines.is_empty() {
                return Err(VitrineError::validation(format!(
                    "section '{}' has no timelines",
                    section.name
                )));
            }
            for tl in &section.timelines {
                tl.build().map_err(|e| {
                    VitrineError::validation(format!("section '{}': {e}", section.name))
                })?;
                let claimed: BTreeSet<(&TargetId, Property)> = tl
                    .targets
                    .iter()
                    .flat_map(|t| tl.steps.iter().map(move |s| (t, s.property)))
                    .collect();
                for (target, property) in claimed {
                    if !owned.insert((target, property)) {
                        return Err(VitrineError::validation(format!(
                            "section '{}': {property:?} of '{target}' is already driven elsewhere",
                            section.name
                        )));
                    }
                }
            }
        }

        for track in &self.tracks {
            if self.layout.bounds(&track.section).is_none() {
                return Err(VitrineError::validation(format!(
                    "track section '{}' is not in the layout",
                    track.section
                )));
            }
            for (name, v) in [
                ("strip_width", track.strip_width),
                ("margin", track.margin),
                ("min_viewport_width", track.min_viewport_width),
            ] {
                if !v.is_finite() || v < 0.0 {
                    return Err(VitrineError::validation(format!(
                        "track {name} must be finite and >= 0"
                    )));
                }
            }
        }
        Ok(())
    }

    /// The built-in portfolio page: hero, about, projects (with a pinned gallery), skills and
    /// contact, stacked top to bottom.
    pub fn portfolio(viewport: Viewport) -> Self {
        let vh = viewport.height;
        let vw = viewport.width;
        let gallery_bound = if vw > DEFAULT_MIN_VIEWPORT_WIDTH {
            (GALLERY_STRIP_WIDTH - vw + GALLERY_MARGIN).max(0.0)
        } else {
            0.0
        };

        let hero_top = 0.0;
        let about_top = hero_top + vh;
        let projects_top = about_top + vh;
        // The pin adds its scroll distance below the gallery.
        let skills_top = projects_top + vh + gallery_bound;
        let contact_top = skills_top + vh;
        let document_height = contact_top + vh;

        let mut layout = PageLayout::new(viewport, document_height);
        let band = |top: f64, height: f64| Rect::new(0.0, top, vw, top + height);
        let mut put = |id: &str, r: Rect| layout.set_element(TargetId::from(id), r);

        put(Anchor::Hero.id(), band(hero_top, vh));
        put(Anchor::About.id(), band(about_top, vh));
        put(Anchor::Projects.id(), band(projects_top, vh + gallery_bound));
        put(Anchor::Skills.id(), band(skills_top, vh));
        put(Anchor::Contact.id(), band(contact_top, vh));

        put("about-text", band(about_top + 80.0, vh * 0.6));
        put("projects-heading", band(projects_top + 80.0, 90.0));
        put(
            "projects-strip",
            Rect::new(0.0, projects_top + 220.0, GALLERY_STRIP_WIDTH, projects_top + 720.0),
        );
        put("skills-heading", band(skills_top + 80.0, 80.0));
        put("skills-grid", band(skills_top + 240.0, vh * 0.5));
        put("contact-heading", band(contact_top + 80.0, 160.0));
        put("contact-content", band(contact_top + 300.0, vh * 0.5));

        let char_targets: Vec<TargetId> = (0..HERO_TITLE_CHARS)
            .map(|i| TargetId::new(format!("hero-char-{i}")))
            .collect();
        let skill_targets: Vec<TargetId> = (0..SKILL_GROUPS)
            .map(|i| TargetId::new(format!("skills-group-{i}")))
            .collect();

        let back = Ease::OutBack { overshoot: 1.7 };
        let sections = vec![
            SectionConfig {
                name: "hero".into(),
                trigger: zone(Anchor::Hero.id(), 1.0, TriggerPolicy::PlayOnce),
                timelines: vec![
                    TimelineConfig {
                        targets: char_targets,
                        steps: vec![
                            fade_in(0.6).with_delay(1.5).with_ease(back),
                            Step::new(Property::TranslateY, 80.0, 0.0, 0.6)
                                .with_delay(1.5)
                                .with_ease(back),
                            Step::new(Property::RotateX, -90.0, 0.0, 0.6)
                                .with_delay(1.5)
                                .with_ease(back),
                        ],
                        stagger: 0.02,
                    },
                    single(
                        "hero-subtext",
                        vec![
                            fade_in(0.8).with_delay(2.5),
                            Step::new(Property::TranslateY, 30.0, 0.0, 0.8).with_delay(2.5),
                            Step::new(Property::Blur, 10.0, 0.0, 0.8).with_delay(2.5),
                        ],
                    ),
                    single(
                        "hero-cta",
                        vec![
                            fade_in(0.6).with_delay(2.8),
                            Step::new(Property::Scale, 0.8, 1.0, 0.6).with_delay(2.8),
                            Step::new(Property::TranslateY, 20.0, 0.0, 0.6).with_delay(2.8),
                        ],
                    ),
                    single("hero-glitch", vec![fade_in(0.5).with_delay(3.2)]),
                ],
            },
            SectionConfig {
                name: "about".into(),
                trigger: zone("about-text", 0.8, TriggerPolicy::PlayReverseOnLeave),
                timelines: vec![single(
                    "about-text",
                    vec![
                        fade_in(1.0).with_ease(Ease::OutQuart),
                        Step::new(Property::TranslateY, 50.0, 0.0, 1.0).with_ease(Ease::OutQuart),
                    ],
                )],
            },
            SectionConfig {
                name: "projects-heading".into(),
                trigger: zone("projects-heading", 0.8, TriggerPolicy::PlayOnce),
                timelines: vec![single(
                    "projects-heading",
                    vec![
                        fade_in(1.0),
                        Step::new(Property::TranslateX, -50.0, 0.0, 1.0),
                    ],
                )],
            },
            SectionConfig {
                name: "skills-heading".into(),
                trigger: zone("skills-heading", 0.8, TriggerPolicy::PlayOnce),
                timelines: vec![single(
                    "skills-heading",
                    vec![
                        fade_in(1.0),
                        Step::new(Property::TranslateY, 30.0, 0.0, 1.0),
                    ],
                )],
            },
            SectionConfig {
                name: "skills-grid".into(),
                trigger: zone("skills-grid", 0.75, TriggerPolicy::PlayOnce),
                timelines: vec![TimelineConfig {
                    targets: skill_targets,
                    steps: vec![
                        fade_in(0.8).with_ease(back),
                        Step::new(Property::Scale, 0.9, 1.0, 0.8).with_ease(back),
                    ],
                    stagger: 0.1,
                }],
            },
            SectionConfig {
                name: "contact-heading".into(),
                trigger: zone("contact-heading", 0.8, TriggerPolicy::PlayOnce),
                timelines: vec![single(
                    "contact-heading",
                    vec![
                        fade_in(1.0),
                        Step::new(Property::TranslateY, 50.0, 0.0, 1.0),
                    ],
                )],
            },
            SectionConfig {
                name: "contact-content".into(),
                trigger: zone("contact-content", 0.75, TriggerPolicy::PlayOnce),
                timelines: vec![TimelineConfig {
                    targets: vec![
                        TargetId::from("contact-info"),
                        TargetId::from("contact-form"),
                    ],
                    steps: vec![
                        fade_in(0.8),
                        Step::new(Property::TranslateY, 30.0, 0.0, 0.8),
                    ],
                    stagger: 0.1,
                }],
            },
        ];

        Self {
            layout,
            scroll: SmoothScrollConfig::default(),
            sections,
            tracks: vec![TrackConfig {
                section: Anchor::Projects.target(),
                strip: TargetId::from("projects-strip"),
                strip_width: GALLERY_STRIP_WIDTH,
                margin: GALLERY_MARGIN,
                min_viewport_width: DEFAULT_MIN_VIEWPORT_WIDTH,
            }],
        }
    }
}

fn zone(element: &str, start_threshold: f64, policy: TriggerPolicy) -> TriggerZone {
    TriggerZone {
        element: TargetId::from(element),
        start_threshold,
        end_threshold: None,
        policy,
    }
}

fn fade_in(duration: f64) -> Step {
    Step::new(Property::Opacity, 0.0, 1.0, duration)
}

fn single(target: &str, steps: Vec<Step>) -> TimelineConfig {
    TimelineConfig {
        targets: vec![TargetId::from(target)],
        steps,
        stagger: 0.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/config.rs"]
mod tests;
