//! Opening a project's queue from its `.actionq/` directory.

use crate::config::{Config, StoreBackend};
use crate::error::Result;
use crate::manager::QueueManager;
use crate::store::{ActionStore, FileStore, RedbStore};
use crate::{io, paths};
use std::path::Path;

pub type DynStore = Box<dyn ActionStore + Send + Sync>;

/// Manager over whichever backend the project config selects.
pub type ProjectQueue = QueueManager<DynStore>;

/// Create `.actionq/` and a default config. Existing config is left alone.
/// Returns true if a config file was written.
pub fn init(root: &Path) -> Result<bool> {
    io::ensure_dir(&paths::actionq_dir(root))?;
    let data = Config::default().to_yaml()?;
    io::write_if_missing(&paths::config_path(root), data.as_bytes())
}

/// Load the project config and open its stores.
pub fn open(root: &Path) -> Result<(Config, ProjectQueue)> {
    let config = Config::load(root)?;
    let manager = open_with(root, &config)?;
    Ok((config, manager))
}

pub fn open_with(root: &Path, config: &Config) -> Result<ProjectQueue> {
    let (queue, history): (DynStore, DynStore) = match config.store.backend {
        StoreBackend::File => (
            Box::new(FileStore::new(paths::store_path(root, &config.store.queue_file))),
            Box::new(FileStore::new(paths::store_path(root, &config.store.history_file))),
        ),
        StoreBackend::Redb => {
            let (q, h) = RedbStore::open_pair(&paths::store_path(root, &config.store.db_file))?;
            (Box::new(q), Box::new(h))
        }
    };
    Ok(QueueManager::new(queue, history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActionqError;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        assert!(init(dir.path()).unwrap());
        assert!(!init(dir.path()).unwrap());
        assert!(paths::config_path(dir.path()).exists());
    }

    #[test]
    fn open_requires_init() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            open(dir.path()),
            Err(ActionqError::NotInitialized)
        ));
    }

    #[test]
    fn file_backend_writes_under_actionq_dir() {
        let dir = TempDir::new().unwrap();
        init(dir.path()).unwrap();
        let (_, q) = open(dir.path()).unwrap();
        q.submit("submit_pr", "x", json!({})).unwrap();
        assert!(dir.path().join(".actionq/queue.json").exists());
    }

    #[test]
    fn redb_backend_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.store.backend = StoreBackend::Redb;
        cfg.save(dir.path()).unwrap();

        let id = {
            let (_, q) = open(dir.path()).unwrap();
            let a = q.submit("check_endpoint", "api.x.com", json!({})).unwrap();
            q.mark_executed(&a.id, None).unwrap().unwrap();
            a.id
        };
        assert!(dir.path().join(".actionq/actionq.redb").exists());

        let (_, q) = open(dir.path()).unwrap();
        assert!(q.list_all().unwrap().is_empty());
        assert_eq!(q.history().unwrap()[0].id, id);
    }
}
