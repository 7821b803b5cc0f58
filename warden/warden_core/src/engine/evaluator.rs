//! Permission evaluation.
//!
//! A permission holds when any of its clauses holds. A clause holds when every
//! predicate in its resolved sequence returns `true`; evaluation stops at the
//! first `false`. Because the sequence lists parents first, a predicate only
//! ever runs once everything it requires has already held.
//!
//! Unknown permissions are denied. A predicate that fails with an error aborts
//! the check and the error is returned to the caller as-is.

use tracing::{debug, trace};

use crate::engine::resolver::ResolvedPermissionMap;
use crate::error::EvaluationError;
use crate::id::PredicateId;
use crate::model::{ClauseTrace, Decision, DecisionResult, ResolvedClause};

/// Check whether `permission` is granted.
///
/// # Arguments
///
/// * `map` - The resolved permission map.
/// * `permission` - The permission name.
/// * `identity` - Who is acting.
/// * `context` - What they are acting on.
///
/// # Returns
///
/// * `Ok(true)` - Some clause held.
/// * `Ok(false)` - No clause held, or the permission is unknown.
/// * `Err(EvaluationError)` - A predicate failed.
pub fn check<I, C>(
    map: &ResolvedPermissionMap<I, C>,
    permission: &str,
    identity: &I,
    context: &C,
) -> Result<bool, EvaluationError> {
    map.check(permission, identity, context)
}

/// Check `permission` and record how the answer was reached.
pub fn evaluate<I, C>(
    map: &ResolvedPermissionMap<I, C>,
    permission: &str,
    identity: &I,
    context: &C,
) -> Result<Decision, EvaluationError> {
    map.evaluate(permission, identity, context)
}

impl<I, C> ResolvedPermissionMap<I, C> {
    /// See [`check`].
    pub fn check(
        &self,
        permission: &str,
        identity: &I,
        context: &C,
    ) -> Result<bool, EvaluationError> {
        let Some(clauses) = self.clauses(permission) else {
            debug!(permission, "Unknown permission, denying");
            return Ok(false);
        };

        for clause in clauses {
            if self.run_clause(permission, clause, identity, context, |_, _| {})? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// See [`evaluate`].
    pub fn evaluate(
        &self,
        permission: &str,
        identity: &I,
        context: &C,
    ) -> Result<Decision, EvaluationError> {
        let Some(clauses) = self.clauses(permission) else {
            debug!(permission, "Unknown permission, denying");
            return Ok(Decision::new(
                permission,
                DecisionResult::UnknownPermission,
                Vec::new(),
            ));
        };

        let mut traces = Vec::with_capacity(clauses.len());

        for (index, clause) in clauses.iter().enumerate() {
            let mut clause_trace = ClauseTrace {
                clause: index,
                evaluated: Vec::with_capacity(clause.len()),
                failed_at: None,
            };

            let held = self.run_clause(permission, clause, identity, context, |id, result| {
                let name = self.registry().name_of(id).to_string();
                if !result {
                    clause_trace.failed_at = Some(name.clone());
                }
                clause_trace.evaluated.push(name);
            })?;

            traces.push(clause_trace);

            if held {
                return Ok(Decision::new(
                    permission,
                    DecisionResult::Granted { clause: index },
                    traces,
                ));
            }
        }

        Ok(Decision::new(permission, DecisionResult::Denied, traces))
    }

    /// Run one resolved clause with short-circuit AND, reporting each result.
    fn run_clause(
        &self,
        permission: &str,
        clause: &ResolvedClause,
        identity: &I,
        context: &C,
        mut observe: impl FnMut(PredicateId, bool),
    ) -> Result<bool, EvaluationError> {
        let registry = self.registry();

        for id in clause.predicates() {
            let result = registry
                .test_unchecked(*id, identity, context)
                .map_err(|source| EvaluationError::PredicateFailed {
                    permission: permission.to_string(),
                    predicate: registry.name_of(*id).to_string(),
                    source,
                })?;

            trace!(
                permission,
                predicate = registry.name_of(*id),
                result,
                "Predicate evaluated"
            );
            observe(*id, result);

            if !result {
                return Ok(false);
            }
        }

        Ok(true)
    }
}
