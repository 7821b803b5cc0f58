//! Traced permission decisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of one permission evaluation, with the path taken to reach it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// The permission that was checked.
    pub permission: String,

    /// The result of the evaluation.
    pub result: DecisionResult,

    /// One entry per clause that was attempted, in order.
    pub trace: Vec<ClauseTrace>,

    /// When the evaluation was performed.
    pub evaluated_at: DateTime<Utc>,
}

impl Decision {
    pub(crate) fn new(
        permission: impl Into<String>,
        result: DecisionResult,
        trace: Vec<ClauseTrace>,
    ) -> Self {
        Self {
            permission: permission.into(),
            result,
            trace,
            evaluated_at: Utc::now(),
        }
    }

    /// Whether the permission was granted.
    pub fn is_granted(&self) -> bool {
        matches!(self.result, DecisionResult::Granted { .. })
    }
}

/// The result of a permission evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DecisionResult {
    /// The clause at this index held.
    Granted {
        /// Index of the first clause that held
        clause: usize,
    },

    /// Every clause failed.
    Denied,

    /// The permission is not in the map.
    UnknownPermission,
}

impl fmt::Display for DecisionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Granted { clause } => write!(f, "granted by clause {}", clause),
            Self::Denied => write!(f, "denied"),
            Self::UnknownPermission => write!(f, "denied (unknown permission)"),
        }
    }
}

/// What happened inside a single clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseTrace {
    /// Index of the clause within the permission.
    pub clause: usize,

    /// Names of the predicates that ran, in order.
    pub evaluated: Vec<String>,

    /// The predicate that returned `false`, if any.
    pub failed_at: Option<String>,
}

impl ClauseTrace {
    /// Whether every predicate in the clause held.
    pub fn held(&self) -> bool {
        self.failed_at.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_granted() {
        let decision = Decision::new(
            "group:read",
            DecisionResult::Granted { clause: 1 },
            Vec::new(),
        );
        assert!(decision.is_granted());
        assert_eq!(decision.result.to_string(), "granted by clause 1");
    }

    #[test]
    fn test_unknown_permission_is_not_granted() {
        let decision = Decision::new("nope", DecisionResult::UnknownPermission, Vec::new());
        assert!(!decision.is_granted());
    }

    #[test]
    fn test_result_serialization() {
        let json = serde_json::to_value(DecisionResult::Granted { clause: 0 }).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "granted", "clause": 0 }));

        let json = serde_json::to_value(DecisionResult::Denied).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "denied" }));
    }
}
