use crate::config::serialize_config;
use crate::document::Selector;
use crate::overlay::{classes, CloseButtonLocation, ScrollLockPolicy};
use crate::paths;
use log::{debug, trace, warn};
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine default config directory")]
    NoConfigDir,
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Failed to write config file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// The path the config file was loaded from
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Settings every overlay starts from unless it overrides them
    pub defaults: OverlayDefaults,
    /// What closing an overlay does to the no-scroll marker (ref_counted or unconditional)
    pub scroll_lock: ScrollLockPolicy,
    /// Class added to the page body while an overlay is open
    pub no_scroll_class: String,
    /// Duration of the fade recorded on a closing overlay in milliseconds, 0 to disable
    pub close_fade_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OverlayDefaults {
    /// Selector for elements that open an overlay
    #[schemars(with = "String")]
    pub open_trigger: Selector,
    /// Selector for elements that close an overlay
    #[schemars(with = "String")]
    pub close_trigger: Selector,
    /// Whether overlays get a header region outside the scrolling body
    pub fixed_header: bool,
    /// Height hint recorded on the header region (e.g. 80px)
    pub header_height: Option<String>,
    /// Where the generated close button goes (header or body)
    pub close_button_location: CloseButtonLocation,
    /// Whether to skip generating a close button
    pub close_button_omit: bool,
}

impl Default for OverlayDefaults {
    fn default() -> Self {
        Self {
            open_trigger: Selector::class(classes::OPEN),
            close_trigger: Selector::class(classes::CLOSE),
            fixed_header: false,
            header_height: None,
            close_button_location: CloseButtonLocation::Header,
            close_button_omit: false,
        }
    }
}

static CURRENT_CONFIG: Lazy<Arc<RwLock<Config>>> =
    Lazy::new(|| Arc::new(RwLock::new(Config::default())));

impl Config {
    /// Load the config at `config_path`, or the default location. A missing file is created
    /// with default values first. With `save`, the file is rewritten so every field is present.
    pub fn load(config_path: Option<&Path>, save: bool) -> Result<Self, ConfigError> {
        let path = paths::resolve_config_path(config_path).ok_or(ConfigError::NoConfigDir)?;

        if !path.exists() {
            Self::create_default_config_file(&path)?;
            trace!("Created default config file at: {}", path.display());
        }

        let config = Self::read_file(&path)?;

        if save {
            if let Err(e) = config.save_to_file(&path) {
                warn!("Failed to update config file with missing fields: {e}");
            }
        }

        Ok(config)
    }

    /// Load the config without touching the disk. A missing file yields the defaults.
    pub fn load_existing(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = paths::resolve_config_path(config_path).ok_or(ConfigError::NoConfigDir)?;

        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        Self::read_file(&path)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Config =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    fn create_default_config_file(path: &Path) -> Result<(), ConfigError> {
        Config::default().save_to_file(path)
    }

    pub fn set_config(config: Config) {
        if let Ok(mut global_config) = CURRENT_CONFIG.write() {
            *global_config = config;
        }
    }

    pub fn current() -> RwLockReadGuard<'static, Config> {
        CURRENT_CONFIG
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn reset() {
        if let Ok(mut config) = CURRENT_CONFIG.write() {
            *config = Config::default();
        }
    }

    /// Save the config to a file, with each field's documentation as a comment
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        serialize_config(self, path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            defaults: OverlayDefaults::default(),
            scroll_lock: ScrollLockPolicy::RefCounted,
            no_scroll_class: classes::NO_SCROLL.to_owned(),
            close_fade_ms: 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARTIAL_CONFIG: &str = "\
scroll_lock: unconditional
defaults:
  fixed_header: true
  open_trigger: \"#go\"
";

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = Config::load(Some(&path), false).unwrap();

        assert!(path.exists());
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.close_fade_ms, 400);
        assert_eq!(config.defaults, OverlayDefaults::default());
    }

    #[test]
    fn test_load_existing_leaves_disk_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = Config::load_existing(Some(&path)).unwrap();

        assert!(!path.exists());
        assert!(!dir.path().join("nested").exists());
        assert_eq!(config.config_path, None);
        assert_eq!(config.close_fade_ms, 400);
    }

    #[test]
    fn test_load_existing_reads_without_rewriting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "close_fade_ms: 0\n").unwrap();

        let config = Config::load_existing(Some(&path)).unwrap();

        assert_eq!(config.close_fade_ms, 0);
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "close_fade_ms: 0\n");
    }

    #[test]
    fn test_load_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, PARTIAL_CONFIG).unwrap();

        let config = Config::load(Some(&path), true).unwrap();

        assert_eq!(config.scroll_lock, ScrollLockPolicy::Unconditional);
        assert!(config.defaults.fixed_header);
        assert_eq!(config.defaults.open_trigger, Selector::id("go"));
        assert_eq!(
            config.defaults.close_trigger,
            Selector::class(classes::CLOSE)
        );
        assert_eq!(config.no_scroll_class, classes::NO_SCROLL);

        let saved = fs::read_to_string(&path).unwrap();
        assert!(saved.contains("close_fade_ms: 400"));
        assert!(saved.contains("no_scroll_class"));
    }

    #[test]
    fn test_load_rejects_bad_selector() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "defaults:\n  open_trigger: \"div > a\"\n").unwrap();

        assert!(matches!(
            Config::load(Some(&path), false),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_saved_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut config = Config::default();
        config.close_fade_ms = 0;
        config.defaults.header_height = Some("64px".to_owned());

        config.save_to_file(&path).unwrap();
        let loaded = Config::load(Some(&path), false).unwrap();

        assert_eq!(loaded.close_fade_ms, 0);
        assert_eq!(loaded.defaults.header_height.as_deref(), Some("64px"));
    }
}
