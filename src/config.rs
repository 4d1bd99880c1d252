// config.rs - Settings supplied when the view is constructed.
//
// Read from `<config dir>/steamshelf/config.json`, e.g.
//      on Windows: C:\Users\<user>\AppData\Roaming\steamshelf\config.json
//      on macOS:   ~/Library/Application Support/steamshelf/config.json
//      on Linux:   ~/.config/steamshelf/config.json
// Every field except `fetchUrl` has a default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::filters::MAX_CHECKBOXES;

pub const FETCH_URL_ENV: &str = "STEAMSHELF_FETCH_URL";
pub const DEFAULT_IMAGE_PATH_PREFIX: &str = "https://steamcdn-a.akamaihd.net/steam/apps/";
pub const DEFAULT_IMAGE_SUFFIX: &str = "/header.jpg";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursFilterRange {
    #[serde(default = "default_checkboxes")]
    pub checkboxes: usize,
    #[serde(default = "default_true")]
    pub filter_unplayed: bool,
}

impl Default for HoursFilterRange {
    fn default() -> Self {
        HoursFilterRange {
            checkboxes: default_checkboxes(),
            filter_unplayed: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    #[serde(default)]
    pub fetch_url: String,
    #[serde(default = "default_games_per_page")]
    pub games_per_page: usize,
    #[serde(default)]
    pub hours_filter_range: HoursFilterRange,
    #[serde(default = "default_image_path_prefix")]
    pub image_path_prefix: String,
    #[serde(default = "default_image_suffix")]
    pub image_suffix: String,
}

fn default_checkboxes() -> usize {
    3
}

fn default_true() -> bool {
    true
}

fn default_games_per_page() -> usize {
    3
}

fn default_image_path_prefix() -> String {
    DEFAULT_IMAGE_PATH_PREFIX.to_string()
}

fn default_image_suffix() -> String {
    DEFAULT_IMAGE_SUFFIX.to_string()
}

impl ViewConfig {
    /// Defaults everywhere, pointed at `fetch_url`.
    pub fn new(fetch_url: impl Into<String>) -> Self {
        ViewConfig {
            fetch_url: fetch_url.into(),
            games_per_page: default_games_per_page(),
            hours_filter_range: HoursFilterRange::default(),
            image_path_prefix: default_image_path_prefix(),
            image_suffix: default_image_suffix(),
        }
    }

    /// Parse `path`, apply the env override and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: ViewConfig = serde_json::from_str(&content)?;
        config.apply_env_override(std::env::var(FETCH_URL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load from the OS config dir. A missing file is fine as long as the
    /// fetch URL comes from the environment.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        if path.exists() {
            return Self::load(&path);
        }
        let url = std::env::var(FETCH_URL_ENV).map_err(|_| ConfigError::MissingFetchUrl)?;
        let config = ViewConfig::new(url);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_override(&mut self, fetch_url: Option<String>) {
        if let Some(url) = fetch_url.filter(|u| !u.trim().is_empty()) {
            self.fetch_url = url;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch_url.trim().is_empty() {
            return Err(ConfigError::MissingFetchUrl);
        }
        if self.games_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gamesPerPage",
                reason: "must be at least 1".into(),
            });
        }
        let checkboxes = self.hours_filter_range.checkboxes;
        if !(1..=MAX_CHECKBOXES).contains(&checkboxes) {
            return Err(ConfigError::InvalidValue {
                field: "hoursFilterRange.checkboxes",
                reason: format!("must be between 1 and {MAX_CHECKBOXES}, got {checkboxes}"),
            });
        }
        Ok(())
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("steamshelf").join("config.json"))
}
