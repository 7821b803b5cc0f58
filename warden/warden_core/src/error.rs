//! Error types for Warden.
//!
//! Errors are grouped by the phase that produces them. Registry and
//! configuration errors happen while the permission map is being assembled,
//! resolution errors while it is being expanded, and evaluation errors while a
//! permission is being checked. The root [`Error`] wraps all of them so that an
//! application can bubble everything up through a single type during startup.
//!
//! A denied permission is never an error. Checking a permission that does not
//! exist is a denial as well.

use crate::id::PredicateId;
use crate::model::PredicateError;
use thiserror::Error;

/// Root error type for Warden.
#[derive(Debug, Error)]
pub enum Error {
    /// Predicate registration errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Permission map resolution errors
    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// Permission check errors
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while registering predicates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A predicate with the same name is already registered
    #[error("Predicate already registered: {0}")]
    DuplicateName(String),

    /// The handle does not belong to this registry
    #[error("Unknown predicate: {0}")]
    UnknownPredicate(PredicateId),

    /// Parents can only be declared once per predicate
    #[error("Parents already declared for predicate '{0}'")]
    ParentsAlreadyDeclared(String),
}

/// Errors raised while expanding clauses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// A predicate requires itself, directly or transitively
    #[error("Cyclic dependency: {}", .cycle.join(" -> "))]
    CyclicDependency {
        /// The predicates on the cycle, starting and ending with the same name
        cycle: Vec<String>,
    },

    /// A clause references a handle the registry does not know
    #[error("Unknown predicate: {0}")]
    UnknownPredicate(PredicateId),
}

/// Errors raised while checking a permission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// A predicate body failed instead of answering
    #[error("Predicate '{predicate}' failed while checking '{permission}': {source}")]
    PredicateFailed {
        /// The permission being checked
        permission: String,

        /// The predicate that failed
        predicate: String,

        /// What went wrong
        #[source]
        source: PredicateError,
    },
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// A clause names a predicate that is not registered
    #[error("Permission '{permission}' references unknown predicate '{predicate}'")]
    UnknownPredicate {
        /// The permission whose clause is invalid
        permission: String,

        /// The name that could not be found
        predicate: String,
    },

    /// A value is syntactically valid but not acceptable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type used throughout Warden.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_path() {
        let err = ResolutionError::CyclicDependency {
            cycle: vec!["x".to_string(), "y".to_string(), "x".to_string()],
        };
        assert_eq!(err.to_string(), "Cyclic dependency: x -> y -> x");
    }

    #[test]
    fn test_errors_convert_to_root() {
        let err: Error = RegistryError::DuplicateName("group_found".to_string()).into();
        assert!(matches!(err, Error::Registry(RegistryError::DuplicateName(_))));

        let err: Error = ConfigError::Invalid("bad".to_string()).into();
        assert_eq!(err.to_string(), "Configuration error: Invalid configuration: bad");
    }

    #[test]
    fn test_predicate_failure_keeps_source() {
        use std::error::Error as _;

        let err = EvaluationError::PredicateFailed {
            permission: "group:read".to_string(),
            predicate: "group_has_user_as_member".to_string(),
            source: PredicateError::MissingAttribute("identity.user".to_string()),
        };

        assert!(err.source().is_some());
        assert!(err.to_string().contains("group_has_user_as_member"));
        assert!(err.to_string().contains("group:read"));
    }
}
