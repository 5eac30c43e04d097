use crate::app_dirs::AppDirs;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Parse a persisted token; anything unrecognized falls back to dark.
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                text: Color::White,
                dim: Color::DarkGray,
                correct: Color::Green,
                incorrect: Color::Red,
                accent: Color::Cyan,
                warning: Color::Yellow,
            },
            Theme::Light => Palette {
                text: Color::Black,
                dim: Color::Gray,
                correct: Color::Green,
                incorrect: Color::Red,
                accent: Color::Blue,
                warning: Color::Magenta,
            },
        }
    }
}

/// Terminal colors a theme resolves to; consumed by the render layer only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub dim: Color,
    pub correct: Color,
    pub incorrect: Color,
    pub accent: Color,
    pub warning: Color,
}

/// The theme record is a bare token rather than JSON, mirroring the single
/// string value it always was.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::theme_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Theme {
        match fs::read_to_string(&self.path) {
            Ok(token) => Theme::from_token(&token),
            Err(_) => Theme::Dark,
        }
    }

    pub fn save(&self, theme: Theme) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, theme.to_string())
    }

    pub fn clear(&self) -> std::io::Result<()> {
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
    fn toggling_flips_between_dark_and_light() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn token_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileThemeStore::with_path(dir.path().join("theme"));
        store.save(Theme::Light).unwrap();
        assert_eq!(store.load(), Theme::Light);
        store.save(Theme::Dark).unwrap();
        assert_eq!(store.load(), Theme::Dark);
    }

    #[test]
    fn missing_or_garbage_token_defaults_to_dark() {
        let dir = tempdir().unwrap();
        let store = FileThemeStore::with_path(dir.path().join("theme"));
        assert_eq!(store.load(), Theme::Dark);
        std::fs::write(dir.path().join("theme"), "solarized?\n").unwrap();
        assert_eq!(store.load(), Theme::Dark);
    }

    #[test]
    fn token_is_a_bare_string() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("theme");
        FileThemeStore::with_path(&path).save(Theme::Light).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "light");
    }

    #[test]
    fn palettes_differ_per_theme() {
        assert_ne!(Theme::Dark.palette().text, Theme::Light.palette().text);
        assert_eq!(Theme::Dark.palette().correct, Color::Green);
    }
}
