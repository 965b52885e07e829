use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    errors::{OnboardError, Result},
    utils::paths::{app_data_dir, config_file_in, ensure_dir, tmp_path},
};

const DEFAULT_SUBMIT_DELAY_MS: u64 = 1500;
const DEFAULT_SUCCESS_CLEAR_MS: u64 = 2000;
/// Upper bound for either delay; anything longer is almost certainly a typo.
const MAX_DELAY_MS: u64 = 60_000;

/// User-tunable settings for the wizard and its shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Simulated credentials round-trip.
    #[serde(default = "Config::default_submit_delay_ms")]
    pub submit_delay_ms: u64,
    /// How long the success message stays before the form clears.
    #[serde(default = "Config::default_success_clear_ms")]
    pub success_clear_delay_ms: u64,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            submit_delay_ms: Self::default_submit_delay_ms(),
            success_clear_delay_ms: Self::default_success_clear_ms(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            storage_path: None,
        }
    }
}

impl Config {
    fn default_submit_delay_ms() -> u64 {
        DEFAULT_SUBMIT_DELAY_MS
    }

    fn default_success_clear_ms() -> u64 {
        DEFAULT_SUCCESS_CLEAR_MS
    }

    fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn success_clear_delay(&self) -> Duration {
        Duration::from_millis(self.success_clear_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("submit_delay_ms", self.submit_delay_ms),
            ("success_clear_delay_ms", self.success_clear_delay_ms),
        ] {
            if value > MAX_DELAY_MS {
                return Err(OnboardError::Config(format!(
                    "{name} must be at most {MAX_DELAY_MS} (got {value})"
                )));
            }
        }
        Ok(())
    }
}

/// Loads and saves [`Config`] as JSON in the application data directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        let path = config_file_in(&base);
        Ok(Self { base, path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        let config = if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data)
                .map_err(|err| OnboardError::Config(format!("{}: {err}", self.path.display())))?
        } else {
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
