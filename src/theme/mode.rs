//! Light/dark theme state.
//!
//! Same decision as the bootstrap script: a persisted `"dark"` wins, a
//! missing or empty preference falls back to the system setting, anything
//! else is light.

use super::DARK_CLASS;
use std::{collections::HashMap, fmt};

/// Storage key shared with the bootstrap script.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value preference storage (browser `localStorage` on the client).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore(HashMap<String, String>);

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    theme: Theme,
}

impl ThemeState {
    pub fn load(store: &dyn PreferenceStore, prefers_dark: bool) -> Self {
        let theme = match store.get(THEME_KEY).as_deref() {
            Some("dark") => Theme::Dark,
            None | Some("") if prefers_dark => Theme::Dark,
            _ => Theme::Light,
        };
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and return the new one.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn persist(&self, store: &mut dyn PreferenceStore) {
        store.set(THEME_KEY, self.theme.as_str());
    }

    /// Class to put on the root element, if any.
    pub fn root_class(&self) -> Option<&'static str> {
        (self.theme == Theme::Dark).then_some(DARK_CLASS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(value: &str) -> MemoryStore {
        let mut store = MemoryStore::default();
        store.set(THEME_KEY, value);
        store
    }

    #[test]
    fn test_load_follows_system_without_preference() {
        let store = MemoryStore::default();
        assert_eq!(ThemeState::load(&store, true).theme(), Theme::Dark);
        assert_eq!(ThemeState::load(&store, false).theme(), Theme::Light);
        assert_eq!(ThemeState::load(&store_with(""), true).theme(), Theme::Dark);
    }

    #[test]
    fn test_load_saved_preference_wins() {
        assert_eq!(ThemeState::load(&store_with("dark"), false).theme(), Theme::Dark);
        assert_eq!(ThemeState::load(&store_with("light"), true).theme(), Theme::Light);
        // unknown values are light, like the bootstrap script
        assert_eq!(ThemeState::load(&store_with("sepia"), true).theme(), Theme::Light);
    }

    #[test]
    fn test_toggle_and_persist() {
        let mut store = MemoryStore::default();
        let mut state = ThemeState::load(&store, false);
        assert_eq!(state.root_class(), None);

        assert_eq!(state.toggle(), Theme::Dark);
        assert_eq!(state.root_class(), Some("theme-dark"));
        state.persist(&mut store);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));

        // a reload honours the persisted choice over the system setting
        assert_eq!(ThemeState::load(&store, false), state);
        assert_eq!(state.toggle(), Theme::Light);
    }
}
