//! Core data model.
//!
//! This module defines the predicate contract, clauses, permission maps and
//! decisions.

pub mod decision;
pub mod permission;
pub mod predicate;

pub use decision::{ClauseTrace, Decision, DecisionResult};
pub use permission::{Clause, PermissionMap, ResolvedClause};
pub use predicate::{Predicate, PredicateError, PredicateResult};
