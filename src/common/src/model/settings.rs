use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub animations: bool,
    pub sounds: bool,
    pub volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            animations: true,
            sounds: true,
            volume: 0.5,
        }
    }
}

impl Settings {
    /// Overlay the fields present in `patch`. Volume is clamped into [0, 1].
    pub fn merge(self, patch: SettingsPatch) -> Self {
        Settings {
            animations: patch.animations.unwrap_or(self.animations),
            sounds: patch.sounds.unwrap_or(self.sounds),
            volume: clamp_volume(patch.volume.unwrap_or(self.volume)),
        }
    }

    pub fn volume_percent(&self) -> u8 {
        (self.volume * 100.0).round() as u8
    }
}

// Partial settings, also the shape persisted values are parsed into so
// missing keys fall back to defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animations: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sounds: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
}

impl SettingsPatch {
    pub fn animations(enabled: bool) -> Self {
        SettingsPatch {
            animations: Some(enabled),
            ..Default::default()
        }
    }

    pub fn sounds(enabled: bool) -> Self {
        SettingsPatch {
            sounds: Some(enabled),
            ..Default::default()
        }
    }

    pub fn volume(volume: f32) -> Self {
        SettingsPatch {
            volume: Some(volume),
            ..Default::default()
        }
    }
}

pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Unknown values read as the default theme.
    pub fn parse(value: &str) -> Theme {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }
}
