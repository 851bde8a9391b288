//! Configuration file support.
//!
//! Everything the gallery needs to know up front (which seasons exist, where
//! their images live, how long transitions take) comes from a typed
//! `GalleryConfig` rather than being inferred from what is on screen.
//! Every field has a default, so a partial file is always accepted.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Directory name used under the platform config, data and cache dirs.
pub const APP_DIR_NAME: &str = "ultrabots-gallery";

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// One season entry: a year of photos in its own folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonConfig {
    /// Year string, also used as the navigation label ("2025")
    pub id: String,
    /// Title shown above the grid ("2025 Season")
    pub name: String,
    /// Folder holding the season's images, relative to `gallery_root`
    pub image_path: String,
}

impl SeasonConfig {
    fn new(year: &str) -> Self {
        Self {
            id: year.to_string(),
            name: format!("{} Season", year),
            image_path: year.to_string(),
        }
    }
}

/// Transition and notification durations, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Fade between seasons before the new grid is shown
    pub season_fade_ms: u64,
    /// Fade between modal images once the next image is preloaded
    pub image_fade_ms: u64,
    /// How long a toast notification stays on screen
    pub toast_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            season_fade_ms: 300,
            image_fade_ms: 200,
            toast_ms: 3000,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Root folder that holds one subfolder per season
    pub gallery_root: PathBuf,

    /// Seasons, newest first
    pub seasons: Vec<SeasonConfig>,

    /// Static JSON file with the events timeline
    pub events_feed: PathBuf,

    /// Reminder database location (None = platform data dir)
    pub reminders_db: Option<PathBuf>,

    /// Transition timings
    pub timing: TimingConfig,

    /// Minimum horizontal travel, in logical pixels, for a swipe to count
    pub swipe_threshold: f32,

    /// Log verbosity level
    pub log_level: LogLevel,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            gallery_root: PathBuf::from("images"),
            seasons: vec![
                SeasonConfig::new("2025"),
                SeasonConfig::new("2024"),
                SeasonConfig::new("2023"),
            ],
            events_feed: PathBuf::from("data/events.json"),
            reminders_db: None,
            timing: TimingConfig::default(),
            swipe_threshold: 50.0,
            log_level: LogLevel::default(),
        }
    }
}

impl GalleryConfig {
    /// Default location of the config file:
    /// - Linux: ~/.config/ultrabots-gallery/config.json
    /// - macOS: ~/Library/Application Support/ultrabots-gallery/config.json
    /// - Windows: %APPDATA%\ultrabots-gallery\config.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.json"))
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load the config from the default location.
    ///
    /// A missing file is not an error. An unreadable or invalid file is
    /// reported through the second tuple element and defaults are used.
    pub fn load_or_default() -> (Self, Option<String>) {
        let Some(path) = Self::default_path() else {
            return (Self::default(), None);
        };
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load(&path) {
            Ok(config) => (config, None),
            Err(e) => (
                Self::default(),
                Some(format!("Ignoring config at {}: {}", path.display(), e)),
            ),
        }
    }

    /// Absolute or root-relative folder of a season's images.
    pub fn season_dir(&self, season: &SeasonConfig) -> PathBuf {
        self.gallery_root.join(&season.image_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site_layout() {
        let config = GalleryConfig::default();
        let ids: Vec<&str> = config.seasons.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["2025", "2024", "2023"]);
        assert_eq!(config.seasons[0].name, "2025 Season");
        assert_eq!(config.timing.season_fade_ms, 300);
        assert_eq!(config.timing.image_fade_ms, 200);
        assert_eq!(config.swipe_threshold, 50.0);
        assert_eq!(
            config.season_dir(&config.seasons[1]),
            PathBuf::from("images").join("2024")
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let json = r#"{
            "gallery_root": "/srv/photos",
            "timing": { "season_fade_ms": 0 },
            "log_level": "debug"
        }"#;
        let config = GalleryConfig::from_json(json).unwrap();

        assert_eq!(config.gallery_root, PathBuf::from("/srv/photos"));
        assert_eq!(config.timing.season_fade_ms, 0);
        assert_eq!(config.timing.image_fade_ms, 200);
        assert_eq!(config.seasons.len(), 3);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_custom_seasons() {
        let json = r#"{ "seasons": [ { "id": "2026", "name": "Into the Deep", "image_path": "ftc/2026" } ] }"#;
        let config = GalleryConfig::from_json(json).unwrap();

        assert_eq!(config.seasons.len(), 1);
        assert_eq!(config.seasons[0].name, "Into the Deep");
        assert_eq!(
            config.season_dir(&config.seasons[0]),
            PathBuf::from("images").join("ftc/2026")
        );
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(GalleryConfig::from_json("{ not json").is_err());
        assert!(GalleryConfig::load(Path::new("/nonexistent/config.json")).is_err());
    }
}
