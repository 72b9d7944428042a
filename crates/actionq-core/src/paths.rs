use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const ACTIONQ_DIR: &str = ".actionq";
pub const CONFIG_FILE: &str = ".actionq/config.yaml";

pub const DEFAULT_QUEUE_FILE: &str = "queue.json";
pub const DEFAULT_HISTORY_FILE: &str = "history.json";
pub const DEFAULT_DB_FILE: &str = "actionq.redb";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn actionq_dir(root: &Path) -> PathBuf {
    root.join(ACTIONQ_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve a store file name relative to the `.actionq/` directory.
/// Absolute names are returned unchanged.
pub fn store_path(root: &Path, name: &str) -> PathBuf {
    let p = Path::new(name);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        actionq_dir(root).join(p)
    }
}
