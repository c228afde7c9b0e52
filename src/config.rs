use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::models::{Category, DEFAULT_REMINDER_MINUTES};
use crate::scanner::DEFAULT_SCAN_INTERVAL;
use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,
    #[serde(default = "default_reminder_minutes")]
    pub default_reminder_minutes: u32,
    #[serde(default = "default_export_path")]
    pub export_path: String,
    #[serde(default = "default_status_message_secs")]
    pub status_message_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_path")]
    pub log_path: String,
    #[serde(default)]
    pub colors: CategoryColors,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

/// Display colours per task category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryColors {
    #[serde(default = "default_work_color")]
    pub work: String,
    #[serde(default = "default_study_color")]
    pub study: String,
    #[serde(default = "default_personal_color")]
    pub personal: String,
    #[serde(default = "default_accent_color")]
    pub accent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    #[serde(default = "default_highlight_fg")]
    pub highlight_fg: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_new")]
    pub new: String,
    #[serde(default = "default_complete")]
    pub complete: String,
    #[serde(default = "default_export")]
    pub export: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_list_up")]
    pub list_up: String,
    #[serde(default = "default_list_down")]
    pub list_down: String,
    #[serde(default = "default_details")]
    pub details: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan_interval_secs: default_scan_interval_secs(),
            default_reminder_minutes: default_reminder_minutes(),
            export_path: default_export_path(),
            status_message_secs: default_status_message_secs(),
            log_level: default_log_level(),
            log_path: default_log_path(),
            colors: CategoryColors::default(),
            theme: Theme::default(),
            key_bindings: KeyBindings::default(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for CategoryColors {
    fn default() -> Self {
        Self {
            work: default_work_color(),
            study: default_study_color(),
            personal: default_personal_color(),
            accent: default_accent_color(),
        }
    }
}

impl CategoryColors {
    pub fn for_category(&self, category: Category) -> &str {
        match category {
            Category::Work => &self.work,
            Category::Study => &self.study,
            Category::Personal => &self.personal,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            highlight_bg: default_highlight_bg(),
            highlight_fg: default_highlight_fg(),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            new: default_new(),
            complete: default_complete(),
            export: default_export(),
            help: default_help(),
            list_up: default_list_up(),
            list_down: default_list_down(),
            details: default_details(),
        }
    }
}

// Default value functions
fn default_scan_interval_secs() -> u64 {
    DEFAULT_SCAN_INTERVAL.as_secs()
}

fn default_reminder_minutes() -> u32 {
    DEFAULT_REMINDER_MINUTES
}

fn default_export_path() -> String {
    "~/dayplan-tasks.csv".to_string()
}

fn default_status_message_secs() -> u64 {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_path() -> String {
    Config::default_log_path_for_profile(utils::Profile::Prod)
}

fn default_work_color() -> String {
    "#ff6b6b".to_string()
}

fn default_study_color() -> String {
    "#4ecdc4".to_string()
}

fn default_personal_color() -> String {
    "#95e1d3".to_string()
}

fn default_accent_color() -> String {
    "#6c5ce7".to_string()
}

fn default_fg() -> String {
    "white".to_string()
}

fn default_bg() -> String {
    "black".to_string()
}

fn default_highlight_bg() -> String {
    "blue".to_string()
}

fn default_highlight_fg() -> String {
    "white".to_string()
}

fn default_quit() -> String {
    "q".to_string()
}

fn default_new() -> String {
    "n".to_string()
}

fn default_complete() -> String {
    "Space".to_string()
}

fn default_export() -> String {
    "x".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_list_up() -> String {
    "k".to_string()
}

fn default_list_down() -> String {
    "j".to_string()
}

fn default_details() -> String {
    "Enter".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl Config {
    /// Load configuration from file, or create default if missing
    /// Uses the provided profile to determine config and log paths
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;

        let config = if config_path.exists() {
            Self::read_from(&config_path)?
        } else {
            let mut config = Config::default();
            config.log_path = Self::default_log_path_for_profile(profile);
            config.save_to(&config_path)?;
            config
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file.
    /// A missing file yields the defaults and is not created.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            Self::read_from(path)?
        } else {
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&mut self, path: &Path) -> Result<(), ConfigError> {
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = self.to_toml()?;
        fs::write(path, toml_string)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "scan_interval_secs must be at least 1".to_string(),
            ));
        }
        for (name, binding) in [
            ("quit", &self.key_bindings.quit),
            ("new", &self.key_bindings.new),
            ("complete", &self.key_bindings.complete),
            ("export", &self.key_bindings.export),
            ("help", &self.key_bindings.help),
            ("list_up", &self.key_bindings.list_up),
            ("list_down", &self.key_bindings.list_down),
            ("details", &self.key_bindings.details),
        ] {
            utils::parse_key_binding(binding)
                .map_err(|e| ConfigError::Invalid(format!("key_bindings.{}: {}", name, e)))?;
        }
        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile)
            .ok_or_else(|| ConfigError::ConfigDirError("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("config.toml"))
    }

    fn default_log_path_for_profile(profile: utils::Profile) -> String {
        if let Some(data_dir) = utils::get_data_dir(profile) {
            data_dir.join("dayplan.log").to_string_lossy().to_string()
        } else {
            match profile {
                utils::Profile::Dev => "~/.local/share/dayplan-dev/dayplan.log".to_string(),
                utils::Profile::Prod => "~/.local/share/dayplan/dayplan.log".to_string(),
            }
        }
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }

    pub fn status_message_timeout(&self) -> Duration {
        Duration::from_secs(self.status_message_secs)
    }

    /// Export target with `~` expanded
    pub fn get_export_path(&self) -> PathBuf {
        utils::expand_path(&self.export_path)
    }

    /// Log file path with `~` expanded
    pub fn get_log_path(&self) -> PathBuf {
        utils::expand_path(&self.log_path)
    }
}
