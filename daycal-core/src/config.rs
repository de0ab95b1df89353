//! Global daycal configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CALENDAR_DIR;
use crate::error::{DayCalError, DayCalResult};

fn default_calendar_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_DIR)
}

fn is_default_calendar_dir(p: &PathBuf) -> bool {
    *p == default_calendar_dir()
}

/// Global configuration at ~/.config/daycal/config.toml
///
/// Every key can be overridden from the environment with a `DAYCAL_` prefix,
/// e.g. `DAYCAL_CALENDAR_DIR`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DaycalConfig {
    /// Folder holding one record per day
    #[serde(default = "default_calendar_dir", skip_serializing_if = "is_default_calendar_dir")]
    pub calendar_dir: PathBuf,
}

impl Default for DaycalConfig {
    fn default() -> Self {
        DaycalConfig {
            calendar_dir: default_calendar_dir(),
        }
    }
}

impl DaycalConfig {
    pub fn config_path() -> DayCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DayCalError::Config("Could not determine config directory".into()))?
            .join("daycal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented-out default first if none exists.
    pub fn load() -> DayCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> DayCalResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("DAYCAL"))
            .build()
            .map_err(|e| DayCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DayCalError::Config(e.to_string()))
    }

    /// The record folder with `~` expanded.
    pub fn calendar_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.calendar_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn save_to(&self, path: &Path) -> DayCalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DayCalError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| DayCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DayCalResult<()> {
        let contents = format!(
            "\
# daycal configuration

# Where the day records live (one YYYY-MM-DD.msgcal file per day):
# calendar_dir = \"{}\"
",
            DEFAULT_CALENDAR_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DayCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DayCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
