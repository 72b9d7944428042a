use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// AutonomyLevel
// ---------------------------------------------------------------------------

/// Who has to sign off before an action runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutonomyLevel {
    /// No human gate; executors may run it straight from `pending`.
    Auto,
    /// Requires an explicit operator approval before execution.
    Approval,
    /// Informational; the operator acknowledges it with `dismiss`.
    Notify,
}

impl AutonomyLevel {
    pub fn all() -> &'static [AutonomyLevel] {
        &[
            AutonomyLevel::Auto,
            AutonomyLevel::Approval,
            AutonomyLevel::Notify,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AutonomyLevel::Auto => "auto",
            AutonomyLevel::Approval => "approval",
            AutonomyLevel::Notify => "notify",
        }
    }
}

impl fmt::Display for AutonomyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActionStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of an action record.
///
/// Transitions: `Pending → Approved | Rejected`, `Approved → Executed`,
/// `Pending(auto) → Executed`, `Pending(notify) → Dismissed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Pending,
    Approved,
    Rejected,
    Executed,
    Dismissed,
}

impl ActionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionStatus::Pending => "pending",
            ActionStatus::Approved => "approved",
            ActionStatus::Rejected => "rejected",
            ActionStatus::Executed => "executed",
            ActionStatus::Dismissed => "dismissed",
        }
    }

    /// Statuses that block a resubmission of the same dedup key while the
    /// record is still in the queue. Rejected records do not.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            ActionStatus::Pending | ActionStatus::Approved | ActionStatus::Executed
        )
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActionKind
// ---------------------------------------------------------------------------

/// Every action type a producer is known to emit.
///
/// Tokens outside this list parse as `Unknown` and keep their raw spelling,
/// so records round-trip through the stores without loss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    UpdateAgentMd,
    AddSearchTerm,
    CheckEndpoint,
    SubmitPr,
    RegisterRegistry,
    AddAwesomeList,
    AddSpiderSource,
    NewCompetitor,
    EndpointDown,
    PrStatusUpdate,
    SpyNewCompetitor,
    SpyImplementFeature,
    SpyImproveVisibility,
    SpyCompetitorActive,
    SpyDailySummary,
    SpyFeatureDone,
    SpyFeatureReminder,
    SpyA2aOutreach,
    Unknown(String),
}

impl ActionKind {
    /// All known kinds, in policy-table order. `Unknown` is not listed.
    pub fn known() -> &'static [ActionKind] {
        &[
            ActionKind::UpdateAgentMd,
            ActionKind::AddSearchTerm,
            ActionKind::CheckEndpoint,
            ActionKind::SubmitPr,
            ActionKind::RegisterRegistry,
            ActionKind::AddAwesomeList,
            ActionKind::AddSpiderSource,
            ActionKind::NewCompetitor,
            ActionKind::EndpointDown,
            ActionKind::PrStatusUpdate,
            ActionKind::SpyNewCompetitor,
            ActionKind::SpyImplementFeature,
            ActionKind::SpyImproveVisibility,
            ActionKind::SpyCompetitorActive,
            ActionKind::SpyDailySummary,
            ActionKind::SpyFeatureDone,
            ActionKind::SpyFeatureReminder,
            ActionKind::SpyA2aOutreach,
        ]
    }

    pub fn parse(s: &str) -> ActionKind {
        Self::known()
            .iter()
            .find(|k| k.as_str() == s)
            .cloned()
            .unwrap_or_else(|| ActionKind::Unknown(s.to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ActionKind::Unknown(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::UpdateAgentMd => "update_agent_md",
            ActionKind::AddSearchTerm => "add_search_term",
            ActionKind::CheckEndpoint => "check_endpoint",
            ActionKind::SubmitPr => "submit_pr",
            ActionKind::RegisterRegistry => "register_registry",
            ActionKind::AddAwesomeList => "add_awesome_list",
            ActionKind::AddSpiderSource => "add_spider_source",
            ActionKind::NewCompetitor => "new_competitor",
            ActionKind::EndpointDown => "endpoint_down",
            ActionKind::PrStatusUpdate => "pr_status_update",
            ActionKind::SpyNewCompetitor => "spy_new_competitor",
            ActionKind::SpyImplementFeature => "spy_implement_feature",
            ActionKind::SpyImproveVisibility => "spy_improve_visibility",
            ActionKind::SpyCompetitorActive => "spy_competitor_active",
            ActionKind::SpyDailySummary => "spy_daily_summary",
            ActionKind::SpyFeatureDone => "spy_feature_done",
            ActionKind::SpyFeatureReminder => "spy_feature_reminder",
            ActionKind::SpyA2aOutreach => "spy_a2a_outreach",
            ActionKind::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ActionKind {
    fn from(s: &str) -> Self {
        ActionKind::parse(s)
    }
}

impl From<String> for ActionKind {
    fn from(s: String) -> Self {
        match ActionKind::parse(&s) {
            ActionKind::Unknown(_) => ActionKind::Unknown(s),
            known => known,
        }
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_kinds_complete() {
        assert_eq!(ActionKind::known().len(), 18);
        assert!(ActionKind::known().iter().all(ActionKind::is_known));
    }

    #[test]
    fn parse_known_and_unknown() {
        assert_eq!(ActionKind::parse("submit_pr"), ActionKind::SubmitPr);
        assert_eq!(ActionKind::parse("spy_a2a_outreach"), ActionKind::SpyA2aOutreach);
        assert_eq!(
            ActionKind::parse("launch_rocket"),
            ActionKind::Unknown("launch_rocket".to_string())
        );
        assert_eq!(ActionKind::parse("launch_rocket").as_str(), "launch_rocket");
    }

    #[test]
    fn kind_serializes_as_plain_token() {
        let json = serde_json::to_string(&ActionKind::EndpointDown).unwrap();
        assert_eq!(json, "\"endpoint_down\"");
        let unknown: ActionKind = serde_json::from_str("\"weird_thing\"").unwrap();
        assert_eq!(unknown, ActionKind::Unknown("weird_thing".to_string()));
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"weird_thing\"");
    }

    #[test]
    fn active_statuses() {
        assert!(ActionStatus::Pending.is_active());
        assert!(ActionStatus::Approved.is_active());
        assert!(ActionStatus::Executed.is_active());
        assert!(!ActionStatus::Rejected.is_active());
        assert!(!ActionStatus::Dismissed.is_active());
    }

    #[test]
    fn status_display_matches_serde() {
        for status in [
            ActionStatus::Pending,
            ActionStatus::Approved,
            ActionStatus::Rejected,
            ActionStatus::Executed,
            ActionStatus::Dismissed,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }
}
