use std::collections::BTreeMap;

/// Storage key of the persisted theme.
pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Root class and CSS custom properties for the theme.
    pub fn palette(self) -> Palette {
        let (class, vars) = match self {
            Self::Dark => (
                "dark-mode",
                [
                    ("--bg-primary", "#000000"),
                    ("--bg-secondary", "#0a0a0a"),
                    ("--text-primary", "#ffffff"),
                    ("--text-secondary", "#9ca3af"),
                    ("--card-bg", "rgba(255, 255, 255, 0.05)"),
                    ("--card-border", "rgba(255, 255, 255, 0.1)"),
                ],
            ),
            Self::Light => (
                "light-mode",
                [
                    ("--bg-primary", "#f8fafc"),
                    ("--bg-secondary", "#e2e8f0"),
                    ("--text-primary", "#0f172a"),
                    ("--text-secondary", "#475569"),
                    ("--card-bg", "rgba(255, 255, 255, 0.8)"),
                    ("--card-border", "rgba(0, 0, 0, 0.1)"),
                ],
            ),
        };
        Palette {
            root_class: class,
            vars: vars.to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Palette {
    pub root_class: &'static str,
    pub vars: Vec<(&'static str, &'static str)>,
}

impl Palette {
    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.vars.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

/// Key/value persistence for the theme flag.
pub trait ThemeStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl ThemeStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

#[derive(Clone, Debug)]
pub struct ThemeController<S: ThemeStore> {
    store: S,
    theme: Theme,
}

impl<S: ThemeStore> ThemeController<S> {
    /// Restore the saved theme; unknown or missing values fall back to dark.
    pub fn new(mut store: S) -> Self {
        let theme = store
            .load(THEME_KEY)
            .and_then(|v| Theme::parse(&v))
            .unwrap_or_default();
        store.save(THEME_KEY, theme.as_str());
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.store.save(THEME_KEY, self.theme.as_str());
        tracing::debug!(theme = self.theme.as_str(), "theme switched");
        self.theme
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/theme.rs"]
mod tests;
