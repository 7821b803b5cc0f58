//! The predicate contract.
//!
//! A predicate is a pure test over an identity and a context. It reads both,
//! mutates neither, performs no I/O and answers `true` or `false`. An `Err` is
//! reserved for inputs the predicate cannot make sense of; it is propagated to
//! the caller of a permission check rather than being read as a denial.

use thiserror::Error;

/// Why a predicate could not answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredicateError {
    /// An attribute the predicate relies on is absent.
    ///
    /// Predicates that rely on a parent having established an attribute (for
    /// example an authenticated user) return this when they are run without
    /// that parent, instead of panicking.
    #[error("missing attribute: {0}")]
    MissingAttribute(String),

    /// The identity or context is internally inconsistent.
    #[error("malformed input: {0}")]
    Malformed(String),
}

impl PredicateError {
    /// Shorthand for [`PredicateError::MissingAttribute`].
    pub fn missing(attribute: impl Into<String>) -> Self {
        Self::MissingAttribute(attribute.into())
    }
}

/// Outcome of a single predicate test.
pub type PredicateResult = Result<bool, PredicateError>;

/// A boolean test over an identity `I` and a context `C`.
///
/// Any `Fn(&I, &C) -> PredicateResult` that is `Send + Sync` is a predicate,
/// so plain functions can be registered directly:
///
/// ```
/// use warden_core::model::{Predicate, PredicateResult};
///
/// fn is_positive(identity: &i32, _context: &()) -> PredicateResult {
///     Ok(*identity > 0)
/// }
///
/// assert_eq!(is_positive.test(&3, &()), Ok(true));
/// ```
pub trait Predicate<I, C>: Send + Sync {
    /// Run the test.
    fn test(&self, identity: &I, context: &C) -> PredicateResult;
}

impl<I, C, F> Predicate<I, C> for F
where
    F: Fn(&I, &C) -> PredicateResult + Send + Sync,
{
    fn test(&self, identity: &I, context: &C) -> PredicateResult {
        self(identity, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Threshold(u32);

    impl Predicate<u32, ()> for Threshold {
        fn test(&self, identity: &u32, _context: &()) -> PredicateResult {
            Ok(*identity >= self.0)
        }
    }

    #[test]
    fn test_closure_is_predicate() {
        let even = |identity: &u32, _: &()| -> PredicateResult { Ok(identity % 2 == 0) };
        assert_eq!(even.test(&4, &()), Ok(true));
        assert_eq!(even.test(&5, &()), Ok(false));
    }

    #[test]
    fn test_struct_is_predicate() {
        let predicate: Box<dyn Predicate<u32, ()>> = Box::new(Threshold(10));
        assert_eq!(predicate.test(&10, &()), Ok(true));
        assert_eq!(predicate.test(&9, &()), Ok(false));
    }

    #[test]
    fn test_missing_shorthand() {
        assert_eq!(
            PredicateError::missing("identity.user"),
            PredicateError::MissingAttribute("identity.user".to_string())
        );
        assert_eq!(
            PredicateError::missing("context.group").to_string(),
            "missing attribute: context.group"
        );
    }
}
