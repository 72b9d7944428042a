//! Whole-collection persistence for action records.
//!
//! A store holds one ordered collection (the live queue or the history).
//! `save` replaces the entire collection; there is no record-level update.

pub mod db;
pub mod file;
pub mod memory;

pub use db::RedbStore;
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::record::ActionRecord;

pub trait ActionStore {
    /// Load the whole collection. A store that was never written is empty.
    fn load(&self) -> Result<Vec<ActionRecord>>;

    /// Replace the whole collection.
    fn save(&self, records: &[ActionRecord]) -> Result<()>;

    /// Load-all, push, save-all.
    fn append(&self, record: ActionRecord) -> Result<()> {
        let mut records = self.load()?;
        records.push(record);
        self.save(&records)
    }
}

impl<T: ActionStore + ?Sized> ActionStore for Box<T> {
    fn load(&self) -> Result<Vec<ActionRecord>> {
        (**self).load()
    }

    fn save(&self, records: &[ActionRecord]) -> Result<()> {
        (**self).save(records)
    }

    fn append(&self, record: ActionRecord) -> Result<()> {
        (**self).append(record)
    }
}
