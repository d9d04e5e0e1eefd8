use std::path::{Path, PathBuf};

use log::LevelFilter;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::card::CardTheme;
use crate::error::{CardError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_highlight_color")]
    pub highlight_color: [u8; 3],
    #[serde(default = "default_neutral_color")]
    pub neutral_color: [u8; 3],
    #[serde(default = "default_show_category")]
    pub show_category: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_highlight_color() -> [u8; 3] {
    [129, 203, 54]
}

fn default_neutral_color() -> [u8; 3] {
    [255, 255, 255]
}

fn default_show_category() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            highlight_color: default_highlight_color(),
            neutral_color: default_neutral_color(),
            show_category: default_show_category(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    pub fn theme(&self) -> CardTheme {
        let [r, g, b] = self.highlight_color;
        let [nr, ng, nb] = self.neutral_color;
        CardTheme {
            highlight: Color::Rgb(r, g, b),
            neutral: Color::Rgb(nr, ng, nb),
        }
    }
}

/// Level forced on the logger, if any. `EXPENSE_CARD_LOG` wins, then
/// `RUST_LOG` (returns `None` so the logger reads it), then the settings value.
/// Unrecognized names fall back to `warn`.
pub fn log_filter(
    expense_card_log: Option<&str>,
    rust_log_set: bool,
    settings_level: &str,
) -> Option<LevelFilter> {
    let level = match expense_card_log {
        Some(level) => level,
        None if rust_log_set => return None,
        None => settings_level,
    };
    Some(level.trim().parse().unwrap_or(LevelFilter::Warn))
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("expense-card")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Missing file gives defaults; a malformed one is reported and ignored.
pub fn load_settings_from(path: &Path) -> Settings {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return Settings::default(),
    };
    match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("ignoring {}: {e}", path.display());
            Settings::default()
        }
    }
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| CardError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            highlight_color: [10, 20, 30],
            neutral_color: [240, 240, 240],
            show_category: false,
            log_level: "debug".to_string(),
        };
        save_settings_to(&settings, &path).unwrap();
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn test_load_returns_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings_from(&dir.path().join("nope.json"));
        assert_eq!(s, Settings::default());
        assert!(s.show_category);
        assert_eq!(s.log_level, "warn");
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"show_category": false}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert!(!s.show_category);
        assert_eq!(s.highlight_color, [129, 203, 54]);
        assert_eq!(s.neutral_color, [255, 255, 255]);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path), Settings::default());
    }

    #[test]
    fn test_save_creates_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("nested").join("settings.json");
        save_settings_to(&Settings::default(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_log_filter_precedence() {
        assert_eq!(log_filter(Some("debug"), true, "error"), Some(LevelFilter::Debug));
        assert_eq!(log_filter(None, true, "error"), None);
        assert_eq!(log_filter(None, false, "Info"), Some(LevelFilter::Info));
        assert_eq!(log_filter(None, false, "off"), Some(LevelFilter::Off));
        assert_eq!(log_filter(Some("chatty"), false, "info"), Some(LevelFilter::Warn));
    }

    #[test]
    fn test_default_theme_matches_card_colors() {
        assert_eq!(Settings::default().theme(), CardTheme::default());
    }
}
