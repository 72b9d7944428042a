//! Embedded-database store backed by redb.
//!
//! # Table design
//!
//! Each collection is its own table in a shared database file:
//! ```text
//! key:   position in the collection (u64)
//! value: JSON-encoded ActionRecord
//! ```
//!
//! `save` drops and refills the table inside one write transaction, so a
//! concurrent reader sees either the old or the new collection, and a crash
//! mid-save leaves the previous collection intact.

use std::{fmt::Display, path::Path, sync::Arc};

use redb::{Database, ReadableTable, TableDefinition};

use super::ActionStore;
use crate::error::{ActionqError, Result};
use crate::record::ActionRecord;

pub const QUEUE_TABLE: &str = "queue";
pub const HISTORY_TABLE: &str = "history";

fn db_err(e: impl Display) -> ActionqError {
    ActionqError::Store(e.to_string())
}

/// One collection inside a redb database.
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
    table: &'static str,
}

impl RedbStore {
    /// Open or create the database at `path` and return the queue and history
    /// stores sharing it.
    pub fn open_pair(path: &Path) -> Result<(RedbStore, RedbStore)> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Arc::new(Database::create(path).map_err(db_err)?);
        let queue = RedbStore::new(db.clone(), QUEUE_TABLE)?;
        let history = RedbStore::new(db, HISTORY_TABLE)?;
        Ok((queue, history))
    }

    /// Wrap a table of an already-open database, creating it if needed.
    pub fn new(db: Arc<Database>, table: &'static str) -> Result<Self> {
        let store = Self { db, table };
        let wt = store.db.begin_write().map_err(db_err)?;
        wt.open_table(store.definition()).map_err(db_err)?;
        wt.commit().map_err(db_err)?;
        Ok(store)
    }

    fn definition(&self) -> TableDefinition<'static, u64, &'static [u8]> {
        TableDefinition::new(self.table)
    }
}

impl ActionStore for RedbStore {
    fn load(&self) -> Result<Vec<ActionRecord>> {
        let rt = self.db.begin_read().map_err(db_err)?;
        let table = rt.open_table(self.definition()).map_err(db_err)?;

        let mut records = Vec::new();
        for entry in table.iter().map_err(db_err)? {
            let (_, v) = entry.map_err(db_err)?;
            records.push(serde_json::from_slice(v.value())?);
        }
        Ok(records)
    }

    fn save(&self, records: &[ActionRecord]) -> Result<()> {
        let encoded = records
            .iter()
            .map(serde_json::to_vec)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let wt = self.db.begin_write().map_err(db_err)?;
        wt.delete_table(self.definition()).map_err(db_err)?;
        {
            let mut table = wt.open_table(self.definition()).map_err(db_err)?;
            for (pos, value) in encoded.iter().enumerate() {
                table
                    .insert(pos as u64, value.as_slice())
                    .map_err(db_err)?;
            }
        }
        wt.commit().map_err(db_err)?;
        Ok(())
    }

    fn append(&self, record: ActionRecord) -> Result<()> {
        let value = serde_json::to_vec(&record)?;
        let wt = self.db.begin_write().map_err(db_err)?;
        {
            let mut table = wt.open_table(self.definition()).map_err(db_err)?;
            let next = match table.last().map_err(db_err)? {
                Some((k, _)) => k.value() + 1,
                None => 0,
            };
            table.insert(next, value.as_slice()).map_err(db_err)?;
        }
        wt.commit().map_err(db_err)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
