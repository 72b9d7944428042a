//! Queue manager: submission, deduplication, and lifecycle transitions over
//! a live queue store and an append-only history store.
//!
//! Every mutating call is a full load → modify → save cycle. Calls on one
//! manager are serialized by an internal write lock; separate processes
//! sharing a file-backed store must still be coordinated externally.

use crate::error::Result;
use crate::record::{self, ActionRecord, DedupKey, DEFAULT_RESULT};
use crate::retention::{self, RetentionPolicy, SweepReport};
use crate::store::ActionStore;
use crate::types::{ActionKind, ActionStatus, AutonomyLevel};
use chrono::Utc;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Outcome of [`QueueManager::enqueue`]: the record covering the dedup key
/// and whether this call inserted it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submitted {
    #[serde(flatten)]
    pub record: ActionRecord,
    pub inserted: bool,
}

pub struct QueueManager<Q, H = Q> {
    queue: Q,
    history: H,
    write_lock: Mutex<()>,
}

impl<Q: ActionStore, H: ActionStore> QueueManager<Q, H> {
    pub fn new(queue: Q, history: H) -> Self {
        Self {
            queue,
            history,
            write_lock: Mutex::new(()),
        }
    }

    pub fn queue_store(&self) -> &Q {
        &self.queue
    }

    pub fn history_store(&self) -> &H {
        &self.history
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // -----------------------------------------------------------------------
    // Submission
    // -----------------------------------------------------------------------

    /// Queue a proposed action, or return the record that already covers its
    /// dedup key.
    pub fn submit(
        &self,
        kind: impl Into<ActionKind>,
        title: impl Into<String>,
        details: serde_json::Value,
    ) -> Result<ActionRecord> {
        self.enqueue(kind, title, details).map(|s| s.record)
    }

    /// Like [`submit`](Self::submit), but also reports whether a new record
    /// was written.
    ///
    /// A key is covered by any queued record that is pending, approved, or
    /// executed, and by any history record regardless of outcome. Nothing is
    /// written when the key is covered.
    pub fn enqueue(
        &self,
        kind: impl Into<ActionKind>,
        title: impl Into<String>,
        details: serde_json::Value,
    ) -> Result<Submitted> {
        let kind = kind.into();
        let title = title.into();
        let key = DedupKey::new(&kind, &title);

        let _guard = self.lock();
        let mut queue = self.queue.load()?;
        if let Some(existing) = queue
            .iter()
            .find(|a| a.status.is_active() && a.dedup_key() == key)
        {
            debug!(key = %key, id = %existing.id, "duplicate action skipped (in queue)");
            return Ok(Submitted {
                record: existing.clone(),
                inserted: false,
            });
        }

        let history = self.history.load()?;
        if let Some(existing) = history.iter().find(|a| a.dedup_key() == key) {
            debug!(key = %key, id = %existing.id, "duplicate action skipped (in history)");
            return Ok(Submitted {
                record: existing.clone(),
                inserted: false,
            });
        }

        let mut action = ActionRecord::new(kind, title, Some(details));
        let taken: HashSet<&str> = queue
            .iter()
            .chain(history.iter())
            .map(|a| a.id.as_str())
            .collect();
        while taken.contains(action.id.as_str()) {
            action.id = record::new_id();
        }

        queue.push(action.clone());
        self.queue.save(&queue)?;
        info!(id = %action.id, level = %action.level, title = %action.title, "action queued");
        Ok(Submitted {
            record: action,
            inserted: true,
        })
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// `pending → approved`. `None` if the id is unknown or not pending.
    pub fn approve(&self, id: &str) -> Result<Option<ActionRecord>> {
        let approved = self.transition_pending(id, |a| {
            a.status = ActionStatus::Approved;
            a.approved_at = Some(Utc::now());
        })?;
        if let Some(a) = &approved {
            info!(id = %a.id, title = %a.title, "action approved");
        }
        Ok(approved)
    }

    /// `pending → rejected`. The record stays in the queue until swept or
    /// dismissed. `None` if the id is unknown or not pending.
    pub fn reject(&self, id: &str) -> Result<Option<ActionRecord>> {
        let rejected = self.transition_pending(id, |a| {
            a.status = ActionStatus::Rejected;
            a.rejected_at = Some(Utc::now());
        })?;
        if let Some(a) = &rejected {
            info!(id = %a.id, title = %a.title, "action rejected");
        }
        Ok(rejected)
    }

    fn transition_pending(
        &self,
        id: &str,
        apply: impl FnOnce(&mut ActionRecord),
    ) -> Result<Option<ActionRecord>> {
        let _guard = self.lock();
        let mut queue = self.queue.load()?;
        let Some(action) = queue
            .iter_mut()
            .find(|a| a.id == id && a.status == ActionStatus::Pending)
        else {
            return Ok(None);
        };
        apply(action);
        let updated = action.clone();
        self.queue.save(&queue)?;
        Ok(Some(updated))
    }

    /// Finalize an action: stamp it executed, move it from the queue to the
    /// history.
    ///
    /// Approved records are the normal case; pending records are accepted too
    /// so `auto` actions can skip approval. Rejected records are not
    /// executable and return `None`, as does an unknown id.
    ///
    /// History is written first. If the process dies before the queue is
    /// rewritten, calling this again finishes the move without appending a
    /// second history entry.
    pub fn mark_executed(&self, id: &str, result: Option<&str>) -> Result<Option<ActionRecord>> {
        let _guard = self.lock();
        let mut queue = self.queue.load()?;
        let Some(pos) = queue.iter().position(|a| {
            a.id == id && matches!(a.status, ActionStatus::Pending | ActionStatus::Approved)
        }) else {
            return Ok(None);
        };

        let mut action = queue.remove(pos);
        action.status = ActionStatus::Executed;
        action.executed_at = Some(Utc::now());
        action.result = Some(result.unwrap_or(DEFAULT_RESULT).to_string());

        let mut history = self.history.load()?;
        match history.iter().find(|a| a.id == action.id) {
            Some(prior) => action = prior.clone(),
            None => {
                history.push(action.clone());
                self.history.save(&history)?;
            }
        }
        self.queue.save(&queue)?;

        info!(
            id = %action.id,
            title = %action.title,
            result = action.result.as_deref().unwrap_or(DEFAULT_RESULT),
            "action executed"
        );
        Ok(Some(action))
    }

    /// Drop a record from the queue without writing history. Returns the
    /// removed record with its status set to `dismissed`.
    pub fn dismiss(&self, id: &str) -> Result<Option<ActionRecord>> {
        let _guard = self.lock();
        let mut queue = self.queue.load()?;
        let Some(pos) = queue.iter().position(|a| a.id == id) else {
            return Ok(None);
        };
        let mut action = queue.remove(pos);
        self.queue.save(&queue)?;
        action.status = ActionStatus::Dismissed;
        info!(id = %action.id, title = %action.title, "action dismissed");
        Ok(Some(action))
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Pending records that need an operator decision. Notify-level records
    /// are not approval work and are excluded.
    pub fn list_pending_approvals(&self) -> Result<Vec<ActionRecord>> {
        self.filter_queue(|a| {
            a.status == ActionStatus::Pending && a.level == AutonomyLevel::Approval
        })
    }

    /// Approved records: the executor's work queue.
    pub fn list_approved(&self) -> Result<Vec<ActionRecord>> {
        self.filter_queue(|a| a.status == ActionStatus::Approved)
    }

    /// Pending auto-level records, runnable without approval.
    pub fn list_pending_auto(&self) -> Result<Vec<ActionRecord>> {
        self.filter_queue(|a| a.status == ActionStatus::Pending && a.level == AutonomyLevel::Auto)
    }

    /// Pending notify-level records awaiting acknowledgment.
    pub fn list_notifications(&self) -> Result<Vec<ActionRecord>> {
        self.filter_queue(|a| {
            a.status == ActionStatus::Pending && a.level == AutonomyLevel::Notify
        })
    }

    pub fn list_all(&self) -> Result<Vec<ActionRecord>> {
        self.queue.load()
    }

    pub fn history(&self) -> Result<Vec<ActionRecord>> {
        self.history.load()
    }

    /// Look up a record in the queue, then in the history.
    pub fn get(&self, id: &str) -> Result<Option<ActionRecord>> {
        if let Some(a) = self.queue.load()?.into_iter().find(|a| a.id == id) {
            return Ok(Some(a));
        }
        Ok(self.history.load()?.into_iter().find(|a| a.id == id))
    }

    fn filter_queue(&self, pred: impl Fn(&ActionRecord) -> bool) -> Result<Vec<ActionRecord>> {
        Ok(self.queue.load()?.into_iter().filter(|a| pred(a)).collect())
    }

    // -----------------------------------------------------------------------
    // Retention
    // -----------------------------------------------------------------------

    /// Apply the retention policy to the queue. The store is only rewritten
    /// when something was removed.
    pub fn sweep(&self, policy: &RetentionPolicy) -> Result<SweepReport> {
        let _guard = self.lock();
        let queue = self.queue.load()?;
        let before = queue.len();
        let (kept, report) = retention::apply(queue, policy, Utc::now());
        if report.total() > 0 {
            self.queue.save(&kept)?;
            info!(before, after = kept.len(), "queue sweep");
        }
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
