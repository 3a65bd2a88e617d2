/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use soundmint_playback::{PlaybackConfig, RepeatMode};
use std::path::{Path, PathBuf};

/// Default configuration file, read from the working directory if present
pub const DEFAULT_CONFIG_FILE: &str = "soundmint.toml";

/// Environment variable prefix (`SOUNDMINT_CATALOG__LISTINGS_URL`, ...)
pub const ENV_PREFIX: &str = "SOUNDMINT";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SoundmintConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// Listing index URL (HTTP catalog)
    #[serde(default)]
    pub listings_url: Option<String>,

    /// JSON file of track records (static catalog)
    #[serde(default)]
    pub static_path: Option<PathBuf>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_volume")]
    pub volume: u8,

    #[serde(default)]
    pub repeat: RepeatMode,

    #[serde(default)]
    pub shuffle: bool,

    #[serde(default)]
    pub shuffle_seed: Option<u64>,

    /// Virtual clock tick in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Virtual clock multiplier (2.0 plays twice as fast)
    #[serde(default = "default_speed")]
    pub speed: f64,
}

impl SoundmintConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `soundmint.toml` is read when
    /// present. Environment variables override file values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(
            path,
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
    }

    /// Load with a caller-supplied environment source
    pub fn load_with_env(path: Option<&Path>, environment: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(environment);

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        match (&self.catalog.listings_url, &self.catalog.static_path) {
            (Some(_), Some(_)) => {
                return Err(CliError::Config(
                    "set only one of catalog.listings_url and catalog.static_path".to_string(),
                ));
            }
            (None, None) => {
                return Err(CliError::Config(
                    "a catalog is required (set SOUNDMINT_CATALOG__LISTINGS_URL or SOUNDMINT_CATALOG__STATIC_PATH)"
                        .to_string(),
                ));
            }
            _ => {}
        }

        if self.catalog.timeout_secs == 0 {
            return Err(CliError::Config(
                "catalog.timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.playback.volume > 100 {
            return Err(CliError::Config(format!(
                "playback.volume must be between 0 and 100, got {}",
                self.playback.volume
            )));
        }

        if self.playback.tick_ms == 0 {
            return Err(CliError::Config(
                "playback.tick_ms must be at least 1".to_string(),
            ));
        }

        if !self.playback.speed.is_finite() || self.playback.speed <= 0.0 {
            return Err(CliError::Config(format!(
                "playback.speed must be a positive number, got {}",
                self.playback.speed
            )));
        }

        Ok(())
    }
}

impl PlaybackSettings {
    /// Controller configuration for these settings
    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            volume: self.volume,
            repeat: self.repeat,
            shuffle: self.shuffle,
            shuffle_seed: self.shuffle_seed,
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            listings_url: None,
            static_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            repeat: RepeatMode::Off,
            shuffle: false,
            shuffle_seed: None,
            tick_ms: default_tick_ms(),
            speed: default_speed(),
        }
    }
}

// Default values
fn default_timeout_secs() -> u64 {
    30
}

fn default_volume() -> u8 {
    50
}

fn default_tick_ms() -> u64 {
    250
}

fn default_speed() -> f64 {
    1.0
}
