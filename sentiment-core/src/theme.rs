use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::bus::ThemeBus;
use crate::error::ThemeParseError;
use crate::storage::KeyValueStore;

/// Light/dark page mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Wire name, also used for the `data-theme` attribute and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Choose between a light-mode and a dark-mode value.
    pub fn pick<T>(self, light: T, dark: T) -> T {
        match self {
            Theme::Light => light,
            Theme::Dark => dark,
        }
    }

    /// `<meta name="theme-color">` content for mobile browser chrome.
    pub fn meta_color(self) -> &'static str {
        self.pick("#6366f1", "#1e293b")
    }

    /// Icon on the toggle shows the mode a click switches to.
    pub fn icon_class(self) -> &'static str {
        self.pick("fas fa-moon", "fas fa-sun")
    }

    pub fn toggle_label(self) -> &'static str {
        self.pick("Switch to dark mode", "Switch to light mode")
    }

    pub fn element_class(self) -> &'static str {
        self.pick("light-theme", "dark-theme")
    }
}

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeParseError(other.to_string())),
        }
    }
}

/// Owns the active theme. A stored preference wins over the system one;
/// system changes are followed only until the user picks a theme.
pub struct ThemeController<S> {
    current: Theme,
    store: S,
    storage_key: String,
    follow_system: bool,
    bus: ThemeBus,
}

impl<S: KeyValueStore> ThemeController<S> {
    pub fn new(
        store: S,
        storage_key: impl Into<String>,
        system_prefers_dark: bool,
        bus: ThemeBus,
    ) -> Self {
        let storage_key = storage_key.into();
        let stored = read_stored_theme(&store, &storage_key);
        let current = stored.unwrap_or_else(|| Theme::from_system(system_prefers_dark));
        debug!(
            "initial theme {} ({})",
            current.as_str(),
            if stored.is_some() { "stored" } else { "system" }
        );
        Self {
            current,
            store,
            storage_key,
            follow_system: stored.is_none(),
            bus,
        }
    }

    pub fn theme(&self) -> Theme {
        self.current
    }

    pub fn follows_system(&self) -> bool {
        self.follow_system
    }

    pub fn bus(&self) -> &ThemeBus {
        &self.bus
    }

    /// Re-broadcast the current theme, e.g. once all subscribers are wired at startup.
    pub fn announce(&self) {
        self.bus.publish(&self.current);
    }

    /// Explicit user choice: persisted, and system following stops for good.
    pub fn set_theme(&mut self, theme: Theme) {
        self.follow_system = false;
        self.current = theme;
        if let Err(err) = self.store.set_item(&self.storage_key, theme.as_str()) {
            warn!("unable to store theme preference: {err}");
        }
        self.bus.publish(&theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.current.toggled();
        self.set_theme(next);
        next
    }

    /// Returns true if the change was applied.
    pub fn system_preference_changed(&mut self, prefers_dark: bool) -> bool {
        if !self.follow_system {
            return false;
        }
        let theme = Theme::from_system(prefers_dark);
        self.current = theme;
        self.bus.publish(&theme);
        true
    }
}

fn read_stored_theme<S: KeyValueStore>(store: &S, key: &str) -> Option<Theme> {
    match store.get_item(key) {
        Ok(Some(raw)) => {
            match raw.parse() {
                Ok(theme) => Some(theme),
                Err(err) => {
                    warn!("ignoring stored preference: {err}");
                    None
                }
            }
        }
        Ok(None) => None,
        Err(err) => {
            warn!("unable to read theme preference: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn controller(store: Rc<MemoryStore>, prefers_dark: bool) -> ThemeController<Rc<MemoryStore>> {
        ThemeController::new(store, "theme", prefers_dark, ThemeBus::new())
    }

    #[test]
    fn falls_back_to_system_preference() {
        let store = Rc::new(MemoryStore::new());
        assert_eq!(controller(store.clone(), true).theme(), Theme::Dark);
        assert_eq!(controller(store.clone(), false).theme(), Theme::Light);
        // resolving the initial theme does not persist anything
        assert!(store.is_empty());
    }

    #[test]
    fn stored_preference_wins_over_system() {
        let store = Rc::new(MemoryStore::new());
        store.set_item("theme", "light").unwrap();
        let ctl = controller(store, true);
        assert_eq!(ctl.theme(), Theme::Light);
        assert!(!ctl.follows_system());
    }

    #[test]
    fn garbage_in_storage_is_ignored() {
        let store = Rc::new(MemoryStore::new());
        store.set_item("theme", "sepia").unwrap();
        let ctl = controller(store, true);
        assert_eq!(ctl.theme(), Theme::Dark);
        assert!(ctl.follows_system());
    }

    #[test]
    fn toggling_twice_restores_theme() {
        let store = Rc::new(MemoryStore::new());
        let mut ctl = controller(store.clone(), false);
        let start = ctl.theme();
        assert_eq!(ctl.toggle_theme(), Theme::Dark);
        assert_eq!(store.get_item("theme").unwrap().as_deref(), Some("dark"));
        ctl.toggle_theme();
        assert_eq!(ctl.theme(), start);
        assert_eq!(store.get_item("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn system_changes_follow_until_explicit_choice() {
        let store = Rc::new(MemoryStore::new());
        let mut ctl = controller(store, false);
        assert!(ctl.system_preference_changed(true));
        assert_eq!(ctl.theme(), Theme::Dark);

        ctl.set_theme(Theme::Light);
        assert!(!ctl.system_preference_changed(true));
        assert_eq!(ctl.theme(), Theme::Light);
        assert!(!ctl.follows_system());
    }

    #[test]
    fn set_theme_publishes_new_value() {
        let bus = ThemeBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            bus.subscribe(move |t| seen.borrow_mut().push(*t));
        }
        let mut ctl = ThemeController::new(MemoryStore::new(), "theme", false, bus);
        ctl.announce();
        ctl.set_theme(Theme::Dark);
        ctl.system_preference_changed(false);
        assert_eq!(*seen.borrow(), vec![Theme::Light, Theme::Dark]);
    }

    #[test]
    fn unavailable_storage_still_switches_in_memory() {
        let mut ctl = ThemeController::new(MemoryStore::unavailable(), "theme", true, ThemeBus::new());
        assert_eq!(ctl.theme(), Theme::Dark);
        ctl.set_theme(Theme::Light);
        assert_eq!(ctl.theme(), Theme::Light);
    }

    #[test]
    fn helpers_pick_by_theme() {
        assert_eq!(Theme::Dark.pick(1, 2), 2);
        assert_eq!(Theme::Light.meta_color(), "#6366f1");
        assert_eq!(Theme::Dark.icon_class(), "fas fa-sun");
        assert_eq!(" dark ".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("sepia".parse::<Theme>(), Err(ThemeParseError("sepia".into())));
        assert!(Theme::Dark.is_dark() && !Theme::Light.is_dark());
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }
}
