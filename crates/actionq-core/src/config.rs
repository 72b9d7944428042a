use crate::error::{ActionqError, Result};
use crate::paths;
use crate::retention::{RetentionPolicy, DEFAULT_MAX_AGE_DAYS};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// StoreConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// One JSON or YAML file per collection.
    #[default]
    File,
    /// Both collections in a single redb database.
    Redb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_queue_file")]
    pub queue_file: String,
    #[serde(default = "default_history_file")]
    pub history_file: String,
    #[serde(default = "default_db_file")]
    pub db_file: String,
}

fn default_queue_file() -> String {
    paths::DEFAULT_QUEUE_FILE.to_string()
}

fn default_history_file() -> String {
    paths::DEFAULT_HISTORY_FILE.to_string()
}

fn default_db_file() -> String {
    paths::DEFAULT_DB_FILE.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            queue_file: default_queue_file(),
            history_file: default_history_file(),
            db_file: default_db_file(),
        }
    }
}

// ---------------------------------------------------------------------------
// RetentionConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,
}

fn default_max_age_days() -> u32 {
    DEFAULT_MAX_AGE_DAYS
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            max_age_days: default_max_age_days(),
        }
    }
}

impl RetentionConfig {
    pub fn policy(&self) -> RetentionPolicy {
        RetentionPolicy::days(self.max_age_days)
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            store: StoreConfig::default(),
            retention: RetentionConfig::default(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(ActionqError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        crate::io::atomic_write(&path, self.to_yaml()?.as_bytes())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.retention.max_age_days == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "retention.max_age_days is 0: every sweep drops all resolved \
                          records and pending notices"
                    .to_string(),
            });
        }

        if self.store.backend == StoreBackend::File {
            if self.store.queue_file == self.store.history_file {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!(
                        "store.queue_file and store.history_file are both '{}'",
                        self.store.queue_file
                    ),
                });
            }
            for (key, name) in [
                ("queue_file", &self.store.queue_file),
                ("history_file", &self.store.history_file),
            ] {
                if name.trim().is_empty() {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Error,
                        message: format!("store.{key} is empty"),
                    });
                }
            }
        } else if self.store.db_file.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "store.db_file is empty".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
