//! Error raised by [`ValidationResultExt::or_throw`](crate::ValidationResultExt::or_throw).

use crate::constraint::Metadata;
use crate::error::ConstraintViolationSet;

/// A failed validation turned into an error value.
///
/// Carries the full violation set of the run so callers that propagate it
/// with `?` can still report every failure.
///
/// # Example
///
/// ```rust
/// use pathwise::{Validator, ValidationResultExt};
///
/// let validator = Validator::new(|name: pathwise::Validatable<&String>| {
///     name.constrain(|n| !n.is_empty()).otherwise(|| "Must not be empty");
/// });
///
/// let error = validator.validate(String::new()).or_throw().unwrap_err();
/// assert_eq!(error.violations().len(), 1);
/// assert_eq!(error.to_string(), "validation failed with 1 violation(s)");
/// ```
#[derive(Debug, Clone, thiserror::Error)]
#[error("validation failed with {} violation(s)", .violations.len())]
pub struct ValidationError<M = Metadata> {
    violations: ConstraintViolationSet<M>,
}

impl<M> ValidationError<M> {
    /// Wraps a violation set.
    pub fn new(violations: ConstraintViolationSet<M>) -> Self {
        Self { violations }
    }

    /// The violations of the failed run.
    pub fn violations(&self) -> &ConstraintViolationSet<M> {
        &self.violations
    }

    /// Takes the violations out of the error.
    pub fn into_violations(self) -> ConstraintViolationSet<M> {
        self.violations
    }
}

impl<M> From<ConstraintViolationSet<M>> for ValidationError<M> {
    fn from(violations: ConstraintViolationSet<M>) -> Self {
        Self::new(violations)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};
