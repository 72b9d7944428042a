//! Autonomy policy: the single reviewable table mapping action kinds to the
//! level of human involvement they require.
//!
//! The mapping is an exhaustive `match`, so adding an `ActionKind` variant
//! does not compile until its level is stated here. Anything unrecognized
//! falls through to `Notify`, never to `Auto`.

use crate::types::{ActionKind, AutonomyLevel};

/// Resolve the autonomy level for an action kind.
pub fn resolve(kind: &ActionKind) -> AutonomyLevel {
    use ActionKind::*;
    match kind {
        UpdateAgentMd | AddSearchTerm | CheckEndpoint => AutonomyLevel::Auto,

        SubmitPr | RegisterRegistry | AddAwesomeList | AddSpiderSource
        | SpyImplementFeature => AutonomyLevel::Approval,

        NewCompetitor
        | EndpointDown
        | PrStatusUpdate
        | SpyNewCompetitor
        | SpyImproveVisibility
        | SpyCompetitorActive
        | SpyDailySummary
        | SpyFeatureDone
        | SpyFeatureReminder
        | SpyA2aOutreach => AutonomyLevel::Notify,

        Unknown(_) => AutonomyLevel::Notify,
    }
}

/// Resolve from a raw type token.
pub fn resolve_str(token: &str) -> AutonomyLevel {
    resolve(&ActionKind::parse(token))
}

/// The full policy as `(type, level)` rows, in declaration order.
pub fn table() -> Vec<(&'static ActionKind, AutonomyLevel)> {
    ActionKind::known()
        .iter()
        .map(|kind| (kind, resolve(kind)))
        .collect()
}
