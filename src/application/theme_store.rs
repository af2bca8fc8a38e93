use crate::domain::ports::{KeyValueStore, StyleTarget};
use crate::domain::theme::{ThemeMode, ThemeSupport};
use crate::infrastructure::storage::keys;
use crate::interfaces::design_system::ThemePalette;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Current theme mode, persisted between sessions and mirrored onto the
/// document root.
///
/// Storage problems never surface: a missing or broken store just means the
/// default (dark) theme and a warning in the log.
pub struct ThemeStore {
    mode: Mutex<ThemeMode>,
    support: ThemeSupport,
    storage: Arc<dyn KeyValueStore>,
    target: Arc<dyn StyleTarget>,
}

impl ThemeStore {
    pub fn new(
        support: ThemeSupport,
        storage: Arc<dyn KeyValueStore>,
        target: Arc<dyn StyleTarget>,
    ) -> Self {
        Self {
            mode: Mutex::new(ThemeMode::Dark),
            support,
            storage,
            target,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        *self.mode.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn support(&self) -> ThemeSupport {
        self.support
    }

    pub fn is_dark(&self) -> bool {
        self.mode() == ThemeMode::Dark
    }

    /// Loads the persisted mode (dark when absent, unreadable or not
    /// supported) and applies it.
    pub fn init_theme(&self) -> ThemeMode {
        let mode = self.load_persisted().unwrap_or_default();
        let mode = if self.support.allows(mode) {
            mode
        } else {
            debug!("Theme {} not supported here, using dark", mode);
            ThemeMode::Dark
        };

        self.set_mode(mode);
        self.apply_theme();
        info!("Theme initialized: {}", mode);
        mode
    }

    /// Flips between dark and light, persists the choice and reapplies.
    /// Does nothing when only dark is supported.
    pub fn toggle_theme(&self) -> ThemeMode {
        let next = self.mode().toggled();
        if !self.support.allows(next) {
            debug!("Theme toggle ignored: dark-only deployment");
            return self.mode();
        }

        self.set_mode(next);
        if let Err(e) = self.storage.set(keys::THEME, &next.to_string()) {
            warn!("Failed to persist theme {}: {}", next, e);
        }
        self.apply_theme();
        info!("Theme switched to {}", next);
        next
    }

    /// Writes the current palette and mode class flags onto the target.
    pub fn apply_theme(&self) {
        let mode = self.mode();
        let palette = ThemePalette::for_mode(mode);

        for (name, value) in palette.css_variables() {
            self.target.set_property(name, value);
        }
        self.target.set_class(ThemeMode::Dark.class_name(), mode == ThemeMode::Dark);
        self.target.set_class(ThemeMode::Light.class_name(), mode == ThemeMode::Light);
    }

    fn set_mode(&self, mode: ThemeMode) {
        *self.mode.lock().unwrap_or_else(|e| e.into_inner()) = mode;
    }

    fn load_persisted(&self) -> Option<ThemeMode> {
        match self.storage.get(keys::THEME) {
            Ok(Some(raw)) => match ThemeMode::from_str(&raw) {
                Ok(mode) => Some(mode),
                Err(e) => {
                    warn!("Ignoring persisted theme: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Theme storage unavailable, using default: {}", e);
                None
            }
        }
    }
}
