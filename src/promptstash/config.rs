use crate::error::{Result, StashError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_STORAGE_KEY: &str = "promptstash_db";

/// Configuration for promptstash, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StashConfig {
    /// Key under which the prompt document is persisted
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default)]
    pub editor: EditorSettings,

    #[serde(default)]
    pub latency: LatencySettings,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StashConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            editor: EditorSettings::default(),
            latency: LatencySettings::default(),
        }
    }
}

/// Initial editor configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EditorSettings {
    pub max_length: usize,
    pub read_only: bool,
    pub auto_save_interval_ms: u64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            max_length: 2000,
            read_only: false,
            auto_save_interval_ms: 3000,
        }
    }
}

/// Simulated round-trip delay per service operation, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LatencySettings {
    pub list_ms: u64,
    pub get_ms: u64,
    pub save_ms: u64,
    pub delete_ms: u64,
}

impl Default for LatencySettings {
    fn default() -> Self {
        Self {
            list_ms: 500,
            get_ms: 300,
            save_ms: 700,
            delete_ms: 400,
        }
    }
}

impl LatencySettings {
    /// Same delay for every operation.
    pub fn uniform(ms: u64) -> Self {
        Self {
            list_ms: ms,
            get_ms: ms,
            save_ms: ms,
            delete_ms: ms,
        }
    }

    pub fn list(&self) -> Duration {
        Duration::from_millis(self.list_ms)
    }

    pub fn get(&self) -> Duration {
        Duration::from_millis(self.get_ms)
    }

    pub fn save(&self) -> Duration {
        Duration::from_millis(self.save_ms)
    }

    pub fn delete(&self) -> Duration {
        Duration::from_millis(self.delete_ms)
    }
}

impl StashConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StashError::Io)?;
        let config: StashConfig =
            serde_json::from_str(&content).map_err(StashError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StashError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StashError::Serialization)?;
        fs::write(config_path, content).map_err(StashError::Io)?;
        Ok(())
    }

    /// Apply a `key value` pair from the command line.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || StashError::Api(format!("Invalid value for {}: {}", key, value));
        match key {
            "max-length" => self.editor.max_length = value.parse().map_err(|_| invalid())?,
            "auto-save-interval" => {
                self.editor.auto_save_interval_ms = value.parse().map_err(|_| invalid())?
            }
            "read-only" => self.editor.read_only = value.parse().map_err(|_| invalid())?,
            "latency" => self.latency = LatencySettings::uniform(value.parse().map_err(|_| invalid())?),
            "storage-key" => {
                if value.is_empty() {
                    return Err(invalid());
                }
                self.storage_key = value.to_string();
            }
            other => return Err(StashError::Api(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    /// Render a single key for display.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "max-length" => Ok(self.editor.max_length.to_string()),
            "auto-save-interval" => Ok(self.editor.auto_save_interval_ms.to_string()),
            "read-only" => Ok(self.editor.read_only.to_string()),
            "latency" => Ok(format!(
                "list={} get={} save={} delete={}",
                self.latency.list_ms,
                self.latency.get_ms,
                self.latency.save_ms,
                self.latency.delete_ms
            )),
            "storage-key" => Ok(self.storage_key.clone()),
            other => Err(StashError::Api(format!("Unknown config key: {}", other))),
        }
    }

    pub const KEYS: [&'static str; 5] = [
        "max-length",
        "auto-save-interval",
        "read-only",
        "latency",
        "storage-key",
    ];
}
