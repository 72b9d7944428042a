use super::ActionStore;
use crate::error::{ActionqError, Result};
use crate::io;
use crate::record::ActionRecord;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// `.json` files are JSON; everything else is YAML.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }
}

/// One collection per file, rewritten atomically on every save.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    format: FileFormat,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = FileFormat::for_path(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_json(&self, content: &str) -> Result<Vec<ActionRecord>> {
        match serde_json::from_str(content) {
            Ok(records) => Ok(records),
            Err(e) => match salvage_json(content) {
                Some(records) => {
                    warn!(
                        path = %self.path.display(),
                        recovered = records.len(),
                        error = %e,
                        "recovered records from corrupt store file"
                    );
                    Ok(records)
                }
                None => Err(ActionqError::Corrupt {
                    path: self.path.clone(),
                    reason: e.to_string(),
                }),
            },
        }
    }
}

/// A JSON array cut off mid-write can usually be closed after the last
/// complete object.
fn salvage_json(content: &str) -> Option<Vec<ActionRecord>> {
    let raw = content.trim();
    if !raw.starts_with('[') {
        return None;
    }
    let last = raw.rfind('}')?;
    let candidate = format!("{}]", &raw[..=last]);
    serde_json::from_str(&candidate).ok()
}

impl ActionStore for FileStore {
    fn load(&self) -> Result<Vec<ActionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        match self.format {
            FileFormat::Json => self.parse_json(&content),
            FileFormat::Yaml => {
                serde_yaml::from_str(&content).map_err(|e| ActionqError::Corrupt {
                    path: self.path.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }

    fn save(&self, records: &[ActionRecord]) -> Result<()> {
        let content = match self.format {
            FileFormat::Json => serde_json::to_string_pretty(records)?,
            FileFormat::Yaml => serde_yaml::to_string(records)?,
        };
        io::atomic_write(&self.path, content.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActionKind, ActionStatus};
    use tempfile::TempDir;

    fn sample(title: &str) -> ActionRecord {
        ActionRecord::new(
            ActionKind::SubmitPr,
            title,
            Some(serde_json::json!({"repo": "org/repo", "stars": 12})),
        )
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("queue.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn blank_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("queue.yaml");
        std::fs::write(&path, "\n  \n").unwrap();
        assert!(FileStore::new(path).load().unwrap().is_empty());
    }

    #[test]
    fn json_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("queue.json"));
        let records = vec![sample("a"), sample("b")];
        store.save(&records).unwrap();
        assert_eq!(store.load().unwrap(), records);
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.trim_start().starts_with('['));
        assert!(raw.contains("\"type\": \"submit_pr\""));
    }

    #[test]
    fn yaml_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("history.yaml"));
        let mut rec = sample("a");
        rec.status = ActionStatus::Executed;
        rec.result = Some("pr#42 opened".to_string());
        store.save(std::slice::from_ref(&rec)).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].result.as_deref(), Some("pr#42 opened"));
        assert_eq!(loaded[0].details["stars"], 12);
    }

    #[test]
    fn save_overwrites_whole_collection() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("queue.json"));
        store.save(&[sample("a"), sample("b"), sample("c")]).unwrap();
        store.save(&[sample("d")]).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "d");
    }

    #[test]
    fn truncated_json_is_salvaged() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("queue.json"));
        store.save(&[sample("a"), sample("b")]).unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        // Chop off the closing bracket and newline.
        let cut = raw.trim_end().trim_end_matches(']');
        std::fs::write(store.path(), cut).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn unrecoverable_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("queue.json");
        std::fs::write(&path, "{not a list").unwrap();
        let err = FileStore::new(path).load().unwrap_err();
        assert!(matches!(err, ActionqError::Corrupt { .. }));
    }
}
