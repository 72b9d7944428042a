//! Retention sweep over the live queue.
//!
//! One contract, applied in queue order:
//!
//! 1. Records sharing a dedup key collapse onto one survivor: the first
//!    active record of the group, or the first record when none is active.
//! 2. Resolved records (anything not `pending`) older than `max_age` are dropped.
//! 3. Pending `notify` records older than `max_age` are dropped.
//!
//! Pending `auto` and `approval` records are outstanding work and are never
//! swept. Neither they nor approved records are ever dropped as duplicates.

use crate::record::ActionRecord;
use crate::types::{ActionStatus, AutonomyLevel};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_MAX_AGE_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub max_age: Duration,
}

impl RetentionPolicy {
    pub fn days(days: u32) -> Self {
        Self {
            max_age: Duration::days(i64::from(days)),
        }
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::days(DEFAULT_MAX_AGE_DAYS)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    pub duplicates: usize,
    pub stale_resolved: usize,
    pub expired_notices: usize,
}

impl SweepReport {
    pub fn total(&self) -> usize {
        self.duplicates + self.stale_resolved + self.expired_notices
    }
}

/// Filter `records` under `policy` as of `now`. Returns the surviving records
/// in their original order.
pub fn apply(
    records: Vec<ActionRecord>,
    policy: &RetentionPolicy,
    now: DateTime<Utc>,
) -> (Vec<ActionRecord>, SweepReport) {
    let cutoff = now - policy.max_age;
    let mut report = SweepReport::default();
    let mut survivor = HashMap::new();
    for (idx, rec) in records.iter().enumerate() {
        survivor
            .entry(rec.dedup_key())
            .and_modify(|winner: &mut (usize, bool)| {
                if !winner.1 && rec.status.is_active() {
                    *winner = (idx, true);
                }
            })
            .or_insert((idx, rec.status.is_active()));
    }

    let mut kept = Vec::with_capacity(records.len());
    for (idx, rec) in records.into_iter().enumerate() {
        let is_survivor = survivor.get(&rec.dedup_key()).map(|w| w.0) == Some(idx);
        if !is_survivor && !is_outstanding(&rec) {
            report.duplicates += 1;
            continue;
        }
        let stale = rec.created < cutoff;
        match rec.status {
            ActionStatus::Pending if stale && rec.level == AutonomyLevel::Notify => {
                report.expired_notices += 1;
            }
            ActionStatus::Pending => kept.push(rec),
            _ if stale => report.stale_resolved += 1,
            _ => kept.push(rec),
        }
    }

    (kept, report)
}

fn is_outstanding(rec: &ActionRecord) -> bool {
    match rec.status {
        ActionStatus::Pending => rec.level != AutonomyLevel::Notify,
        ActionStatus::Approved => true,
        _ => false,
    }
}
