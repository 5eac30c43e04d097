use crate::app_dirs::AppDirs;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Countdown lengths the settings view cycles through, in seconds.
pub const DURATION_CHOICES: [u32; 4] = [15, 30, 60, 120];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn cycled(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl FontSize {
    pub fn cycled(self) -> Self {
        match self {
            FontSize::Small => FontSize::Medium,
            FontSize::Medium => FontSize::Large,
            FontSize::Large => FontSize::Small,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CaretStyle {
    Line,
    Block,
    Underline,
}

impl CaretStyle {
    pub fn cycled(self) -> Self {
        match self {
            CaretStyle::Line => CaretStyle::Block,
            CaretStyle::Block => CaretStyle::Underline,
            CaretStyle::Underline => CaretStyle::Line,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrackingMode {
    /// Aggregate and persist results on this device.
    Local,
    /// Keep nothing.
    None,
}

impl TrackingMode {
    pub fn cycled(self) -> Self {
        match self {
            TrackingMode::Local => TrackingMode::None,
            TrackingMode::None => TrackingMode::Local,
        }
    }
}

/// User preferences, persisted with the record keys the export format uses.
/// Missing fields fall back to their defaults on load, so partial or stale
/// records merge instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub test_duration: u32,
    pub difficulty_level: Difficulty,
    pub font_size: FontSize,
    pub show_keyboard: bool,
    pub sound_effects: bool,
    pub theme: Theme,
    pub caret_style: CaretStyle,
    pub smooth_caret: bool,
    pub timer_warning: bool,
    pub stop_on_error: bool,
    pub quick_restart: bool,
    pub auto_start_next: bool,
    pub stats_tracking: TrackingMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            test_duration: 60,
            difficulty_level: Difficulty::Medium,
            font_size: FontSize::Medium,
            show_keyboard: true,
            sound_effects: false,
            theme: Theme::Dark,
            caret_style: CaretStyle::Line,
            smooth_caret: true,
            timer_warning: true,
            stop_on_error: false,
            quick_restart: true,
            auto_start_next: false,
            stats_tracking: TrackingMode::Local,
        }
    }
}

impl Settings {
    pub fn next_duration(current: u32) -> u32 {
        let pos = DURATION_CHOICES.iter().position(|d| *d == current);
        match pos {
            Some(i) => DURATION_CHOICES[(i + 1) % DURATION_CHOICES.len()],
            None => DURATION_CHOICES[0],
        }
    }
}

pub trait SettingsStore {
    fn load(&self) -> Settings;
    fn save(&self, settings: &Settings) -> std::io::Result<()>;
    fn clear(&self) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::settings_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Settings {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(settings) = serde_json::from_slice::<Settings>(&bytes) {
                return settings;
            }
        }
        Settings::default()
    }

    fn save(&self, settings: &Settings) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(settings).unwrap_or_default();
        fs::write(&self.path, data)
    }

    fn clear(&self) -> std::io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = FileSettingsStore::with_path(&path);
        let settings = Settings::default();
        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn save_and_load_custom_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = FileSettingsStore::with_path(&path);
        let settings = Settings {
            test_duration: 120,
            difficulty_level: Difficulty::Hard,
            font_size: FontSize::Large,
            show_keyboard: false,
            sound_effects: true,
            theme: Theme::Light,
            caret_style: CaretStyle::Block,
            smooth_caret: false,
            timer_warning: false,
            stop_on_error: true,
            quick_restart: false,
            auto_start_next: true,
            stats_tracking: TrackingMode::None,
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn missing_record_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let store = FileSettingsStore::with_path(dir.path().join("nope.json"));
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn partial_record_merges_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"testDuration":30,"stopOnError":true}"#).unwrap();
        let loaded = FileSettingsStore::with_path(&path).load();
        assert_eq!(loaded.test_duration, 30);
        assert!(loaded.stop_on_error);
        assert_eq!(loaded.difficulty_level, Difficulty::Medium);
        assert_eq!(loaded.stats_tracking, TrackingMode::Local);
    }

    #[test]
    fn corrupt_record_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(FileSettingsStore::with_path(&path).load(), Settings::default());
    }

    #[test]
    fn record_uses_camel_case_keys() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"testDuration\""));
        assert!(json.contains("\"stopOnError\""));
        assert!(json.contains("\"statsTracking\""));
        assert!(json.contains("\"difficultyLevel\""));
    }

    #[test]
    fn clear_removes_the_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = FileSettingsStore::with_path(&path);
        store.save(&Settings::default()).unwrap();
        store.clear().unwrap();
        assert!(!path.exists());
        // Clearing an absent record is fine
        store.clear().unwrap();
    }

    #[test]
    fn duration_cycles_through_choices() {
        assert_eq!(Settings::next_duration(15), 30);
        assert_eq!(Settings::next_duration(120), 15);
        // Out-of-list values (e.g. from a hand-edited record) snap to the first choice
        assert_eq!(Settings::next_duration(42), 15);
    }

    #[test]
    fn enums_cycle_through_all_variants() {
        assert_eq!(Difficulty::Easy.cycled(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.cycled(), Difficulty::Easy);
        assert_eq!(CaretStyle::Underline.cycled(), CaretStyle::Line);
        assert_eq!(TrackingMode::Local.cycled(), TrackingMode::None);
        assert_eq!(FontSize::Large.cycled(), FontSize::Small);
    }
}
