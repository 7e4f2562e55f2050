use std::fmt;

use kuchiki::NodeRef;

use crate::dom;
use crate::settings::SettingsStore;

pub const THEME_KEY: &str = "theme";
pub const TOGGLE_ID: &str = "light_dark_checkbox";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Anything other than `"dark"` falls back to the light theme.
    pub fn from_stored(value: &str) -> Self {
        if value == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn from_checked(checked: bool) -> Self {
        if checked { Theme::Dark } else { Theme::Light }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDelta {
    pub remove: [&'static str; 2],
    pub add: [&'static str; 2],
}

pub fn compute_theme_classes(theme: Theme) -> ClassDelta {
    match theme {
        Theme::Dark => ClassDelta {
            remove: ["text-dark", "bg-light"],
            add: ["text-light", "bg-dark"],
        },
        Theme::Light => ClassDelta {
            remove: ["text-light", "bg-dark"],
            add: ["text-dark", "bg-light"],
        },
    }
}

/// Keeps the persisted theme preference and the page's `<body>` classes and
/// toggle checkbox in agreement.
pub struct ThemeController<S> {
    store: S,
}

impl<S: SettingsStore> ThemeController<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn current(&self) -> Theme {
        self.store
            .get(THEME_KEY)
            .filter(|v| !v.is_empty())
            .map(|v| Theme::from_stored(&v))
            .unwrap_or_default()
    }

    pub fn apply_theme(&mut self, document: &NodeRef, theme: Theme) -> anyhow::Result<()> {
        self.store.set(THEME_KEY, theme.as_str())?;

        let Some(body) = dom::body(document) else {
            tracing::debug!(%theme, "no <body>; theme persisted only");
            return Ok(());
        };
        let delta = compute_theme_classes(theme);
        dom::remove_classes(&body, &delta.remove);
        dom::add_classes(&body, &delta.add);
        Ok(())
    }

    pub fn on_load(&mut self, document: &NodeRef) -> anyhow::Result<Theme> {
        let theme = self.current();
        self.apply_theme(document, theme)?;

        match dom::element_by_id(document, TOGGLE_ID) {
            Some(toggle) => dom::set_checked(&toggle, self.current() == Theme::Dark),
            None => tracing::debug!("no #{TOGGLE_ID} on page; skipping toggle state"),
        }
        Ok(theme)
    }

    pub fn on_change(&mut self, document: &NodeRef, checked: bool) -> anyhow::Result<Theme> {
        if let Some(toggle) = dom::element_by_id(document, TOGGLE_ID) {
            dom::set_checked(&toggle, checked);
        }
        let theme = Theme::from_checked(checked);
        self.apply_theme(document, theme)?;
        Ok(theme)
    }
}
