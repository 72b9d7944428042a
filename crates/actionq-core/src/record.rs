//! The action record, the only entity the queue manages.

use crate::policy;
use crate::types::{ActionKind, ActionStatus, AutonomyLevel};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

/// Result recorded when an executor reports completion without a message.
pub const DEFAULT_RESULT: &str = "success";

// ---------------------------------------------------------------------------
// ActionRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Fixed at submission from the autonomy policy; never recomputed.
    pub level: AutonomyLevel,
    pub title: String,
    #[serde(default = "empty_details")]
    pub details: serde_json::Value,
    pub status: ActionStatus,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

fn empty_details() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

impl ActionRecord {
    /// Build a fresh `Pending` record. The level comes from the policy table.
    pub fn new(
        kind: ActionKind,
        title: impl Into<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        let level = policy::resolve(&kind);
        Self {
            id: new_id(),
            kind,
            level,
            title: title.into(),
            details: match details {
                Some(serde_json::Value::Null) | None => empty_details(),
                Some(v) => v,
            },
            status: ActionStatus::Pending,
            created: Utc::now(),
            approved_at: None,
            rejected_at: None,
            executed_at: None,
            result: None,
        }
    }

    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(&self.kind, &self.title)
    }
}

/// Short opaque id: the first 8 hex digits of a v4 UUID.
pub fn new_id() -> String {
    let mut s = Uuid::new_v4().simple().to_string();
    s.truncate(8);
    s
}

// ---------------------------------------------------------------------------
// DedupKey
// ---------------------------------------------------------------------------

/// `(type, normalized title)`. Counters like `(12)` or `(3*)` are stripped
/// from titles before comparing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    kind: String,
    title: String,
}

static COUNTER_RE: OnceLock<Regex> = OnceLock::new();

fn counter_re() -> &'static Regex {
    COUNTER_RE.get_or_init(|| Regex::new(r"\s*\(\d+\*?\)\s*").unwrap())
}

pub fn normalize_title(title: &str) -> String {
    counter_re().replace_all(title, "").trim().to_string()
}

impl DedupKey {
    pub fn new(kind: &ActionKind, title: &str) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            title: normalize_title(title),
        }
    }
}

impl std::fmt::Display for DedupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.kind, self.title)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
