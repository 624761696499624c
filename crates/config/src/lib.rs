//! Configuration loading, validation, and management for Lunchline.
//!
//! Loads configuration from `~/.lunchline/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use lunchline_core::menu::{Category, StationTable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.lunchline/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name the skill introduces itself with
    #[serde(default = "default_skill_name")]
    pub skill_name: String,

    /// School whose lunch menu is served
    #[serde(default = "default_school_name")]
    pub school_name: String,

    /// Food service company publishing the feed
    #[serde(default = "default_provider_name")]
    pub provider_name: String,

    /// Where the menu feed comes from
    #[serde(default)]
    pub feed: FeedConfig,

    /// Station-slot numbers for each category
    #[serde(default)]
    pub stations: StationConfig,
}

fn default_skill_name() -> String {
    "Stone Ridge Lunch".into()
}
fn default_school_name() -> String {
    "Stone Ridge".into()
}
fn default_provider_name() -> String {
    "Sage Dining".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Provider endpoint returning the menu document
    #[serde(default = "default_feed_url")]
    pub url: String,

    /// HTTP timeout for one fetch
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Read the feed from a local JSON file instead of HTTP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_feed_url() -> String {
    "http://www.sagedining.com/intranet/apps/mb/pubasynchhandler.php?unitId=S0073&mbMenuCardinality=1".into()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            timeout_secs: default_timeout_secs(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    #[serde(default = "default_entrees_slot")]
    pub entrees: usize,

    #[serde(default = "default_soups_slot")]
    pub soups: usize,

    #[serde(default = "default_salads_slot")]
    pub salads: usize,

    #[serde(default = "default_deli_slot")]
    pub deli: usize,

    #[serde(default = "default_dessert_slot")]
    pub dessert: usize,
}

fn default_entrees_slot() -> usize {
    3
}
fn default_soups_slot() -> usize {
    0
}
fn default_salads_slot() -> usize {
    4
}
fn default_deli_slot() -> usize {
    2
}
fn default_dessert_slot() -> usize {
    8
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            entrees: default_entrees_slot(),
            soups: default_soups_slot(),
            salads: default_salads_slot(),
            deli: default_deli_slot(),
            dessert: default_dessert_slot(),
        }
    }
}

impl StationConfig {
    /// The explicit slot-to-category table handed to the feed parser.
    pub fn table(&self) -> StationTable {
        StationTable::new([
            (self.entrees, Category::Entrees),
            (self.soups, Category::Soups),
            (self.salads, Category::Salads),
            (self.deli, Category::Deli),
            (self.dessert, Category::Dessert),
        ])
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.lunchline/config.toml).
    ///
    /// Environment variable overrides:
    /// - `LUNCHLINE_FEED_URL`
    /// - `LUNCHLINE_FEED_FILE`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        Self::load_with(&config_path, |key| std::env::var(key).ok())
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with(path, |_| None)
    }

    /// Load from `path`, apply overrides from `lookup`, then validate once.
    pub fn load_with(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::read_file(path)?;
        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(config)
    }

    /// Apply overrides from an environment-like lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("LUNCHLINE_FEED_URL") {
            self.feed.url = url;
        }
        if let Some(file) = lookup("LUNCHLINE_FEED_FILE") {
            self.feed.file = Some(PathBuf::from(file));
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".lunchline")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed.file.is_none() && self.feed.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "feed.url must be set when feed.file is not".into(),
            ));
        }

        if self.feed.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "feed.timeout_secs must be > 0".into(),
            ));
        }

        let mut seen = HashSet::new();
        for (slot, category) in self.stations.table().iter() {
            if !seen.insert(slot) {
                return Err(ConfigError::ValidationError(format!(
                    "station slot {slot} is assigned to more than one category (including {category})"
                )));
            }
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            skill_name: default_skill_name(),
            school_name: default_school_name(),
            provider_name: default_provider_name(),
            feed: FeedConfig::default(),
            stations: StationConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.skill_name, "Stone Ridge Lunch");
        assert_eq!(config.feed.timeout_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_stations_match_provider_layout() {
        let table = AppConfig::default().stations.table();
        assert_eq!(table, StationTable::default());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.skill_name, config.skill_name);
        assert_eq!(parsed.feed.url, config.feed.url);
        assert_eq!(parsed.stations.dessert, 8);
    }

    #[test]
    fn duplicate_station_slot_rejected() {
        let mut config = AppConfig::default();
        config.stations.salads = config.stations.entrees;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("station slot 3"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.feed.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_url_allowed_with_file() {
        let mut config = AppConfig::default();
        config.feed.url = String::new();
        assert!(config.validate().is_err());
        config.feed.file = Some(PathBuf::from("menu.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.school_name, "Stone Ridge");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "skill_name = \"Oak Hill Lunch\"\n[stations]\nsalads = 5\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.skill_name, "Oak Hill Lunch");
        assert_eq!(config.stations.salads, 5);
        assert_eq!(config.stations.entrees, 3);
        assert_eq!(config.provider_name, "Sage Dining");
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "skill_name = [").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LUNCHLINE_FEED_URL", "http://localhost:8080/menu"),
            ("LUNCHLINE_FEED_FILE", "/tmp/menu.json"),
        ]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.feed.url, "http://localhost:8080/menu");
        assert_eq!(config.feed.file, Some(PathBuf::from("/tmp/menu.json")));
    }

    #[test]
    fn file_override_rescues_empty_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[feed]\nurl = \"\"\n").unwrap();

        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ValidationError(_))
        ));

        let env: HashMap<&str, &str> = HashMap::from([("LUNCHLINE_FEED_FILE", "/tmp/menu.json")]);
        let config = AppConfig::load_with(&path, |key| env.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.feed.file, Some(PathBuf::from("/tmp/menu.json")));
        assert!(config.feed.url.is_empty());
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("Stone Ridge Lunch"));
        assert!(toml_str.contains("[stations]"));
    }
}
