//! Outcome of a validation run.

use std::hash::Hash;

use stillwater::Validation;

use crate::constraint::Metadata;
use crate::error::{ConstraintViolationSet, ValidationError};

/// Either the validated value or every violation found while validating it.
///
/// This is stillwater's `Validation`, so results of independent runs can be
/// combined with `and`, and the two outcomes can be matched directly:
///
/// ```rust
/// use pathwise::{Validatable, ValidationResult, Validator};
/// use stillwater::Validation;
///
/// let positive = Validator::new(|n: Validatable<&i32>| {
///     n.is_positive();
/// });
///
/// let result: ValidationResult<i32> = positive.validate(-3);
/// match result {
///     Validation::Success(_) => unreachable!(),
///     Validation::Failure(violations) => {
///         assert_eq!(violations.first().message(), "Must be positive");
///     }
/// }
/// ```
pub type ValidationResult<T, M = Metadata> = Validation<T, ConstraintViolationSet<M>>;

/// Conversions from a [`ValidationResult`] into a plain `Result`.
pub trait ValidationResultExt<T, M> {
    /// Returns the value, or a [`ValidationError`] carrying every violation.
    fn or_throw(self) -> Result<T, ValidationError<M>>;

    /// Like [`or_throw`](Self::or_throw), converting each violation's
    /// metadata with `upgrade` first.
    fn or_throw_with<N, F>(self, upgrade: F) -> Result<T, ValidationError<N>>
    where
        N: Hash + Eq,
        F: FnMut(M) -> N;
}

impl<T, M> ValidationResultExt<T, M> for ValidationResult<T, M>
where
    M: Hash + Eq,
{
    fn or_throw(self) -> Result<T, ValidationError<M>> {
        self.into_result().map_err(ValidationError::new)
    }

    fn or_throw_with<N, F>(self, upgrade: F) -> Result<T, ValidationError<N>>
    where
        N: Hash + Eq,
        F: FnMut(M) -> N,
    {
        self.into_result()
            .map_err(|violations| ValidationError::new(violations.map_metadata(upgrade)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstraintViolation;
    use crate::path::Path;

    fn failure(message: &str) -> ValidationResult<u8> {
        Validation::Failure(ConstraintViolationSet::single(ConstraintViolation::new(
            message,
            Path::parse("field"),
        )))
    }

    #[test]
    fn test_or_throw_success() {
        let result: ValidationResult<u8> = Validation::Success(4);
        assert_eq!(result.or_throw().unwrap(), 4);
    }

    #[test]
    fn test_or_throw_failure_keeps_violations() {
        let error = failure("broken").or_throw().unwrap_err();
        assert_eq!(error.violations().first().message(), "broken");
    }

    #[test]
    fn test_or_throw_with_upgrades_metadata() {
        let error = failure("broken")
            .or_throw_with(|metadata| metadata.len())
            .unwrap_err();
        assert_eq!(*error.violations().first().metadata(), 0);
    }

    #[test]
    fn test_results_accumulate() {
        let combined = failure("a").and(failure("b"));
        let violations = combined.into_result().unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}
