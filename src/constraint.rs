//! The outcome of evaluating one predicate.
//!
//! A [`Constraint`] is returned by [`Validatable::constrain`](crate::Validatable::constrain)
//! whether or not its predicate held. Unsatisfied constraints are registered
//! with the run as soon as they are created; the registry keeps a handle to
//! the same constraint, so messages, paths and metadata attached afterwards
//! are still reflected in the final violations.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::ConstraintViolation;
use crate::path::{Path, PathBuilder};

/// Default metadata type: an ordered string-to-string map.
pub type Metadata = BTreeMap<String, String>;

#[derive(Debug)]
struct ConstraintState<M> {
    satisfied: bool,
    origin: Path,
    parent: Option<Path>,
    message: String,
    path: Path,
    metadata: M,
}

/// The live result of a predicate.
///
/// Decorators consume and return the constraint so they chain:
///
/// ```rust
/// use pathwise::{Validatable, Validator};
///
/// #[derive(Debug)]
/// struct Signup {
///     password: String,
///     confirm: String,
/// }
///
/// let validator = Validator::new(|signup: Validatable<&Signup>| {
///     signup
///         .constrain(|s| s.password == s.confirm)
///         .otherwise(|| "Passwords must match")
///         .with_path(|path| path.absolute(["confirm"]));
/// });
///
/// let result = validator.validate(Signup {
///     password: "x".into(),
///     confirm: "y".into(),
/// });
/// let violations = result.into_result().unwrap_err();
/// assert_eq!(violations.first().path().to_string(), "confirm");
/// assert_eq!(violations.first().message(), "Passwords must match");
/// ```
#[derive(Debug)]
pub struct Constraint<M = Metadata> {
    state: Arc<Mutex<ConstraintState<M>>>,
}

impl<M> Clone for Constraint<M> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<M> Constraint<M> {
    pub(crate) fn new(satisfied: bool, origin: Path, parent: Option<Path>, metadata: M) -> Self {
        let path = origin.clone();
        Self {
            state: Arc::new(Mutex::new(ConstraintState {
                satisfied,
                origin,
                parent,
                message: String::new(),
                path,
                metadata,
            })),
        }
    }

    /// Whether the predicate held.
    ///
    /// Once fail-fast has stopped a run, the rest of the validation body
    /// still executes but its predicates are skipped, and every constraint
    /// created from then on reports `true` here. Do not read it as a pass
    /// when deciding whether to do further work under fail-fast.
    pub fn is_satisfied(&self) -> bool {
        self.state.lock().satisfied
    }

    /// The message set through [`otherwise`](Self::otherwise).
    ///
    /// Empty when none was set; the run's default message is used then.
    pub fn message(&self) -> String {
        self.state.lock().message.clone()
    }

    /// The path the constraint reports, relative to the run's root path.
    pub fn path(&self) -> Path {
        self.state.lock().path.clone()
    }

    /// The metadata attached to the constraint.
    pub fn metadata(&self) -> M
    where
        M: Clone,
    {
        self.state.lock().metadata.clone()
    }

    /// Sets the message, if the constraint is unsatisfied.
    ///
    /// The closure is only called for unsatisfied constraints.
    pub fn otherwise<S: Into<String>>(self, message: impl FnOnce() -> S) -> Self {
        if !self.is_satisfied() {
            let message = message().into();
            self.state.lock().message = message;
        }
        self
    }

    /// Overrides the path, if the constraint is unsatisfied.
    ///
    /// The closure receives a [`PathBuilder`] for the wrapper the constraint
    /// was evaluated against and is only called for unsatisfied constraints.
    pub fn with_path(self, path: impl FnOnce(&PathBuilder) -> Path) -> Self {
        let builder = {
            let state = self.state.lock();
            (!state.satisfied)
                .then(|| PathBuilder::new(state.origin.clone(), state.parent.clone()))
        };
        if let Some(builder) = builder {
            let path = path(&builder);
            self.state.lock().path = path;
        }
        self
    }

    /// Replaces the metadata, whether or not the constraint is satisfied.
    pub fn with_metadata(self, metadata: impl FnOnce() -> M) -> Self {
        let metadata = metadata();
        self.state.lock().metadata = metadata;
        self
    }

    pub(crate) fn same_as(&self, other: &Constraint<M>) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Finalizes an unsatisfied constraint into a violation.
    ///
    /// The message falls back to `default_message` and the path is placed
    /// under `root_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::Satisfied`] for a satisfied constraint.
    pub fn try_to_violation(
        &self,
        default_message: &str,
        root_path: &Path,
    ) -> Result<ConstraintViolation<M>, ConstraintError>
    where
        M: Clone,
    {
        let state = self.state.lock();
        if state.satisfied {
            return Err(ConstraintError::Satisfied {
                path: state.path.clone(),
            });
        }

        let message = if state.message.is_empty() {
            default_message.to_string()
        } else {
            state.message.clone()
        };

        Ok(ConstraintViolation::with_metadata(
            message,
            root_path.concat(&state.path),
            state.metadata.clone(),
        ))
    }

    /// Finalizes an unsatisfied constraint into a violation.
    ///
    /// # Panics
    ///
    /// Panics if the constraint is satisfied. Only unsatisfied constraints
    /// describe a failure, so this indicates a bug in the caller.
    pub fn to_violation(&self, default_message: &str, root_path: &Path) -> ConstraintViolation<M>
    where
        M: Clone,
    {
        match self.try_to_violation(default_message, root_path) {
            Ok(violation) => violation,
            Err(error) => panic!("{}", error),
        }
    }
}

/// Errors raised when misusing a [`Constraint`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintError {
    /// A satisfied constraint was asked to become a violation.
    #[error("satisfied constraint at '{path}' cannot be converted into a violation")]
    Satisfied {
        /// Path of the offending constraint.
        path: Path,
    },
}
