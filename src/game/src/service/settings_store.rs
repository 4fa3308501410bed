use common::model::settings::{Settings, SettingsPatch, Theme};
use tracing::{debug, warn};

use crate::storage::KeyValueStore;

pub const THEME_KEY: &str = "theme";
pub const SETTINGS_KEY: &str = "gameSettings";

/// Settings and theme, backed by a key-value store. Every mutation is
/// written through before it is returned.
pub struct SettingsStore {
    storage: Box<dyn KeyValueStore + Send>,
    settings: Settings,
    theme: Theme,
}

impl SettingsStore {
    pub fn new(storage: Box<dyn KeyValueStore + Send>) -> Self {
        SettingsStore {
            storage,
            settings: Settings::default(),
            theme: Theme::default(),
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read {:?}: {}", key, e);
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            warn!("Failed to persist {:?}: {}", key, e);
        }
    }

    /// Persisted values over defaults. Anything unreadable is discarded.
    pub fn load(&mut self) -> Settings {
        // One mistyped field rejects the whole object, well-typed siblings
        // included. Missing keys are fine.
        let patch = match self.read(SETTINGS_KEY) {
            None => SettingsPatch::default(),
            Some(text) => serde_json::from_str::<SettingsPatch>(&text).unwrap_or_else(|e| {
                debug!("Discarding malformed settings {:?}: {}", text, e);
                SettingsPatch::default()
            }),
        };
        self.settings = Settings::default().merge(patch);
        self.settings
    }

    pub fn update(&mut self, patch: SettingsPatch) -> Settings {
        self.settings = self.settings.merge(patch);
        match serde_json::to_string(&self.settings) {
            Ok(text) => self.write(SETTINGS_KEY, &text),
            Err(e) => warn!("Failed to serialize settings: {}", e),
        }
        self.settings
    }

    pub fn load_theme(&mut self) -> Theme {
        self.theme = self
            .read(THEME_KEY)
            .map(|value| Theme::parse(&value))
            .unwrap_or_default();
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.write(THEME_KEY, self.theme.as_str());
        self.theme
    }
}
