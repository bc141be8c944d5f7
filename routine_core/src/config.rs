//! Configuration file support for Pacer.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/pacer/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub timing: TimingConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Workout timing parameters
///
/// These feed the timeline builder: fixed rest lengths, the fallback
/// per-rep duration, and the nominal rep count assigned to max-effort sets.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_set_rest_seconds")]
    pub set_rest_seconds: u32,

    #[serde(default = "default_exercise_rest_seconds")]
    pub exercise_rest_seconds: u32,

    #[serde(default = "default_rep_seconds")]
    pub default_rep_seconds: u32,

    #[serde(default = "default_max_rep_estimate")]
    pub max_rep_estimate: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            set_rest_seconds: default_set_rest_seconds(),
            exercise_rest_seconds: default_exercise_rest_seconds(),
            default_rep_seconds: default_rep_seconds(),
            max_rep_estimate: default_max_rep_estimate(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("pacer")
}

fn default_set_rest_seconds() -> u32 {
    45
}

fn default_exercise_rest_seconds() -> u32 {
    20
}

fn default_rep_seconds() -> u32 {
    2
}

fn default_max_rep_estimate() -> u32 {
    10
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("pacer").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        // Zero rest lengths are allowed (back-to-back sets); zero rep times
        // would break rep counting.
        if self.timing.default_rep_seconds == 0 {
            return Err(Error::Config("default_rep_seconds must be positive".into()));
        }
        if self.timing.max_rep_estimate == 0 {
            return Err(Error::Config("max_rep_estimate must be positive".into()));
        }
        Ok(())
    }
}
