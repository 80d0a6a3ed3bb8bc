// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::{CorruptRecordPolicy, LocalStorage};
use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_data_file() -> String {
    "lania.txt".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Task file. Relative paths live in the data directory.
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default)]
    pub on_corrupt_record: CorruptRecordPolicy,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            on_corrupt_record: CorruptRecordPolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Reads `config.toml`. `Ok(None)` when the file does not exist yet.
    pub fn load(ctx: &dyn AppContext) -> Result<Option<Self>> {
        let path = ctx.get_config_file_path()?;
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;

        Ok(Some(config))
    }

    /// Loads the config, falling back to defaults. A missing file is created
    /// with the defaults; a broken one is left alone. The second value is a
    /// problem worth telling the user about.
    pub fn load_or_init(ctx: &dyn AppContext) -> (Self, Option<String>) {
        match Self::load(ctx) {
            Ok(Some(config)) => (config, None),
            Ok(None) => {
                let config = Self::default();
                let warning = config
                    .save(ctx)
                    .err()
                    .map(|e| format!("Could not write default config: {:#}", e));
                (config, warning)
            }
            Err(e) => (Self::default(), Some(format!("Using default config: {:#}", e))),
        }
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        LocalStorage::with_lock(&path, || LocalStorage::atomic_write(&path, &toml_str))
            .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
        Ok(())
    }

    pub fn data_file_path(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        ctx.get_task_file_path(Path::new(&self.data_file))
    }

    /// Unknown level names fall back to `Info`.
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
