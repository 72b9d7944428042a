use super::ActionStore;
use crate::error::Result;
use crate::record::ActionRecord;
use std::sync::Mutex;

/// Volatile store, for tests and for embedding the manager in-process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<ActionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ActionRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl ActionStore for MemoryStore {
    fn load(&self) -> Result<Vec<ActionRecord>> {
        let guard = self.records.lock().unwrap_or_else(|p| p.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, records: &[ActionRecord]) -> Result<()> {
        let mut guard = self.records.lock().unwrap_or_else(|p| p.into_inner());
        *guard = records.to_vec();
        Ok(())
    }
}
