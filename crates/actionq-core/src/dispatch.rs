//! Executor interface: drain the runnable parts of the queue through an
//! `Executor` and finalize each record with its outcome.
//!
//! A failed execution is still finalized (with an `error: …` result) and
//! moves to history; it is never retried automatically.

use crate::error::Result;
use crate::manager::QueueManager;
use crate::record::ActionRecord;
use crate::store::ActionStore;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Performs the real-world side effect of an action.
pub trait Executor {
    /// Returns a short result message, or an error message on failure.
    fn execute(&self, action: &ActionRecord) -> std::result::Result<String, String>;
}

/// Accepts any action without doing anything. Useful for notify-level kinds
/// and for dry runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcknowledgeExecutor;

impl Executor for AcknowledgeExecutor {
    fn execute(&self, _action: &ActionRecord) -> std::result::Result<String, String> {
        Ok("acknowledged".to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchStats {
    pub executed: usize,
    pub failed: usize,
}

/// Execute every approved record.
pub fn run_approved<Q, H, E>(manager: &QueueManager<Q, H>, executor: &E) -> Result<DispatchStats>
where
    Q: ActionStore,
    H: ActionStore,
    E: Executor + ?Sized,
{
    let approved = manager.list_approved()?;
    run_each(manager, executor, approved)
}

/// Execute every pending auto-level record, skipping approval.
pub fn run_auto<Q, H, E>(manager: &QueueManager<Q, H>, executor: &E) -> Result<DispatchStats>
where
    Q: ActionStore,
    H: ActionStore,
    E: Executor + ?Sized,
{
    let auto = manager.list_pending_auto()?;
    run_each(manager, executor, auto)
}

fn run_each<Q, H, E>(
    manager: &QueueManager<Q, H>,
    executor: &E,
    actions: Vec<ActionRecord>,
) -> Result<DispatchStats>
where
    Q: ActionStore,
    H: ActionStore,
    E: Executor + ?Sized,
{
    let mut stats = DispatchStats::default();
    for action in actions {
        let outcome = executor.execute(&action);
        let result = match &outcome {
            Ok(msg) => msg.clone(),
            Err(e) => format!("error: {e}"),
        };
        // Another caller may have finalized or dismissed it meanwhile.
        if manager.mark_executed(&action.id, Some(result.as_str()))?.is_none() {
            continue;
        }
        match outcome {
            Ok(_) => {
                stats.executed += 1;
                info!(id = %action.id, title = %action.title, result = %result, "executed");
            }
            Err(_) => {
                stats.failed += 1;
                error!(id = %action.id, title = %action.title, result = %result, "execution failed");
            }
        }
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::ActionStatus;
    use serde_json::json;

    struct FailOn(&'static str);

    impl Executor for FailOn {
        fn execute(&self, action: &ActionRecord) -> std::result::Result<String, String> {
            if action.title == self.0 {
                Err("github returned 422".to_string())
            } else {
                Ok(format!("done: {}", action.title))
            }
        }
    }

    fn manager() -> QueueManager<MemoryStore> {
        QueueManager::new(MemoryStore::new(), MemoryStore::new())
    }

    #[test]
    fn run_approved_finalizes_successes_and_failures() {
        let m = manager();
        for title in ["good", "bad", "unapproved"] {
            m.submit("submit_pr", title, json!({})).unwrap();
        }
        for a in m.list_pending_approvals().unwrap() {
            if a.title != "unapproved" {
                m.approve(&a.id).unwrap();
            }
        }

        let stats = run_approved(&m, &FailOn("bad")).unwrap();
        assert_eq!(stats, DispatchStats { executed: 1, failed: 1 });

        let history = m.history().unwrap();
        assert_eq!(history.len(), 2);
        let bad = history.iter().find(|a| a.title == "bad").unwrap();
        assert_eq!(bad.status, ActionStatus::Executed);
        assert_eq!(bad.result.as_deref(), Some("error: github returned 422"));

        let left = m.list_all().unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].title, "unapproved");
    }

    #[test]
    fn run_auto_skips_other_levels() {
        let m = manager();
        m.submit("check_endpoint", "api.x.com", json!({})).unwrap();
        m.submit("endpoint_down", "api.y.com", json!({})).unwrap();
        m.submit("submit_pr", "pr", json!({})).unwrap();

        let stats = run_auto(&m, &AcknowledgeExecutor).unwrap();
        assert_eq!(stats.executed, 1);
        let history = m.history().unwrap();
        assert_eq!(history[0].title, "api.x.com");
        assert_eq!(history[0].result.as_deref(), Some("acknowledged"));
        assert_eq!(m.list_all().unwrap().len(), 2);
    }

    #[test]
    fn empty_queue_is_a_noop() {
        let m = manager();
        assert_eq!(
            run_approved(&m, &AcknowledgeExecutor).unwrap(),
            DispatchStats::default()
        );
    }
}
