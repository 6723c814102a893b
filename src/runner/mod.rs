//! Validation runners.
//!
//! A runner owns a validation body and executes it once per input value.
//! Every execution is an independent run: a fresh registry bound to the
//! runner's [`Configuration`], a root wrapper around the borrowed input, the
//! body, and a single reduction of the registry into the result.
//!
//! Runners differ along two axes. Contextual runners pass a context value to
//! the body next to the wrapper, and suspendable runners (see
//! [`SuspendableValidator`]) accept bodies that await.
//!
//! # Example
//!
//! ```rust
//! use pathwise::{Configuration, Validatable, Validator};
//!
//! #[derive(Debug)]
//! struct Signup {
//!     password: String,
//!     confirm: String,
//! }
//!
//! let validator = Validator::builder()
//!     .configuration(Configuration::builder().root_path("signup").build())
//!     .build(|form: Validatable<&Signup>| {
//!         form.constrain(|f| f.password == f.confirm)
//!             .otherwise(|| "Passwords must match");
//!     });
//!
//! let form = Signup {
//!     password: "x".into(),
//!     confirm: "y".into(),
//! };
//! let violations = validator.validate(form).into_result().unwrap_err();
//! assert_eq!(violations.first().path().to_string(), "signup");
//! assert_eq!(violations.first().message(), "Passwords must match");
//! ```

mod compose;
mod suspend;

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use rayon::prelude::*;
use stillwater::Validation;

use crate::config::Configuration;
use crate::constraint::Metadata;
use crate::error::ConstraintViolationSet;
use crate::registry::{ConstraintRegistry, SharedRegistry};
use crate::result::ValidationResult;
use crate::validatable::Validatable;

pub use suspend::{SuspendableContextualValidator, SuspendableValidator};

type Body<T, M> = dyn for<'v> Fn(Validatable<&'v T, M>) + Send + Sync;
type ContextualBody<C, T, M> = dyn for<'v> Fn(&C, Validatable<&'v T, M>) + Send + Sync;

/// Configuration and default metadata shared by all runs of a runner.
pub(crate) struct Settings<M> {
    configuration: Arc<Configuration>,
    metadata: Arc<M>,
}

impl<M> Settings<M> {
    fn new(configuration: Configuration, metadata: M) -> Self {
        Self {
            configuration: Arc::new(configuration),
            metadata: Arc::new(metadata),
        }
    }

    /// Starts a run: a fresh registry and the root wrapper around `value`.
    pub(crate) fn start<'v, T>(&self, value: &'v T) -> (SharedRegistry<M>, Validatable<&'v T, M>) {
        let registry = ConstraintRegistry::shared(Arc::clone(&self.configuration));
        tracing::debug!(
            root = %self.configuration.root_path(),
            fail_fast = self.configuration.fail_fast(),
            "validation run started"
        );
        let root = Validatable::root(value, Arc::clone(&registry), Arc::clone(&self.metadata));
        (registry, root)
    }

    /// Ends a run by reducing its registry exactly once.
    pub(crate) fn finish(&self, registry: SharedRegistry<M>) -> Option<ConstraintViolationSet<M>>
    where
        M: Clone + Hash + Eq,
    {
        let registry = match Arc::try_unwrap(registry) {
            Ok(registry) => registry.into_inner(),
            Err(shared) => take(&shared, &self.configuration),
        };
        let violations = registry.reduce();
        tracing::debug!(
            violations = violations.as_ref().map_or(0, ConstraintViolationSet::len),
            "validation run finished"
        );
        violations
    }
}

fn take<M>(shared: &Mutex<ConstraintRegistry<M>>, configuration: &Arc<Configuration>) -> ConstraintRegistry<M> {
    std::mem::replace(
        &mut *shared.lock(),
        ConstraintRegistry::new(Arc::clone(configuration)),
    )
}

impl<M> Clone for Settings<M> {
    fn clone(&self) -> Self {
        Self {
            configuration: Arc::clone(&self.configuration),
            metadata: Arc::clone(&self.metadata),
        }
    }
}

pub(crate) fn conclude<T, M>(value: T, violations: Option<ConstraintViolationSet<M>>) -> ValidationResult<T, M> {
    match violations {
        None => Validation::Success(value),
        Some(violations) => Validation::Failure(violations),
    }
}

/// Builds any of the runners with a custom configuration or default metadata.
#[derive(Debug, Clone)]
pub struct ValidatorBuilder<M = Metadata> {
    configuration: Configuration,
    metadata: M,
}

impl ValidatorBuilder<Metadata> {
    /// Starts from the default configuration and empty metadata.
    pub fn new() -> Self {
        Self {
            configuration: Configuration::default(),
            metadata: Metadata::new(),
        }
    }
}

impl Default for ValidatorBuilder<Metadata> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> ValidatorBuilder<M> {
    /// Sets the configuration of every run.
    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Sets the metadata given to every constraint, possibly of another type.
    pub fn default_metadata<N>(self, metadata: N) -> ValidatorBuilder<N> {
        ValidatorBuilder {
            configuration: self.configuration,
            metadata,
        }
    }

    fn settings(self) -> Settings<M> {
        Settings::new(self.configuration, self.metadata)
    }

    /// Builds a [`Validator`] around `body`.
    pub fn build<T, F>(self, body: F) -> Validator<T, M>
    where
        F: for<'v> Fn(Validatable<&'v T, M>) + Send + Sync + 'static,
    {
        Validator::assemble(self.settings(), body)
    }

    /// Builds a [`ContextualValidator`] around `body`.
    pub fn build_contextual<C, T, F>(self, body: F) -> ContextualValidator<C, T, M>
    where
        F: for<'v> Fn(&C, Validatable<&'v T, M>) + Send + Sync + 'static,
    {
        ContextualValidator {
            body: Arc::new(body),
            settings: self.settings(),
        }
    }
}

/// Runs a synchronous validation body against values of type `T`.
///
/// Validators are cheap to clone and can be shared between threads; each
/// call to [`validate`](Self::validate) is an independent run.
pub struct Validator<T, M = Metadata> {
    body: Arc<Body<T, M>>,
    settings: Settings<M>,
}

impl Validator<(), Metadata> {
    /// Starts a [`ValidatorBuilder`].
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }
}

impl<T> Validator<T, Metadata> {
    /// Creates a validator with the default configuration and no metadata.
    pub fn new<F>(body: F) -> Self
    where
        F: for<'v> Fn(Validatable<&'v T>) + Send + Sync + 'static,
    {
        ValidatorBuilder::new().build(body)
    }
}

impl<T, M> Validator<T, M> {
    fn assemble<F>(settings: Settings<M>, body: F) -> Self
    where
        F: for<'v> Fn(Validatable<&'v T, M>) + Send + Sync + 'static,
    {
        Self {
            body: Arc::new(body),
            settings,
        }
    }

    /// The configuration applied to every run.
    pub fn configuration(&self) -> &Configuration {
        &self.settings.configuration
    }

    /// Validates `value`, handing it back on success.
    pub fn validate(&self, value: T) -> ValidationResult<T, M>
    where
        M: Clone + Hash + Eq,
    {
        let violations = self.collect(&value);
        conclude(value, violations)
    }

    /// Validates every value in parallel, one run per value.
    ///
    /// Results are returned in the order of `values`.
    pub fn validate_all(&self, values: Vec<T>) -> Vec<ValidationResult<T, M>>
    where
        T: Send,
        M: Clone + Hash + Eq + Send + Sync,
    {
        values
            .into_par_iter()
            .map(|value| self.validate(value))
            .collect()
    }

    /// Runs the body against a borrowed value and returns its failures.
    pub(crate) fn collect(&self, value: &T) -> Option<ConstraintViolationSet<M>>
    where
        M: Clone + Hash + Eq,
    {
        let (registry, root) = self.settings.start(value);
        (self.body)(root);
        self.settings.finish(registry)
    }
}

impl<T, M> Clone for Validator<T, M> {
    fn clone(&self) -> Self {
        Self {
            body: Arc::clone(&self.body),
            settings: self.settings.clone(),
        }
    }
}

impl<T, M> fmt::Debug for Validator<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("configuration", &self.settings.configuration)
            .finish_non_exhaustive()
    }
}

/// Runs a synchronous body that also receives a context value of type `C`.
///
/// # Example
///
/// ```rust
/// use std::collections::HashSet;
/// use pathwise::{ContextualValidator, Validatable};
///
/// let validator = ContextualValidator::new(|taken: &HashSet<String>, name: Validatable<&String>| {
///     name.constrain(|n| !taken.contains(n)).otherwise(|| "Already taken");
/// });
///
/// let taken: HashSet<String> = ["root".to_string()].into();
/// assert!(validator.validate(&taken, "root".to_string()).is_failure());
///
/// let bound = validator.bind(taken);
/// assert!(bound.validate("ada".to_string()).is_success());
/// ```
pub struct ContextualValidator<C, T, M = Metadata> {
    body: Arc<ContextualBody<C, T, M>>,
    settings: Settings<M>,
}

impl<C, T> ContextualValidator<C, T, Metadata> {
    /// Creates a contextual validator with the default configuration.
    pub fn new<F>(body: F) -> Self
    where
        F: for<'v> Fn(&C, Validatable<&'v T>) + Send + Sync + 'static,
    {
        ValidatorBuilder::new().build_contextual(body)
    }
}

impl<C, T, M> ContextualValidator<C, T, M> {
    /// The configuration applied to every run.
    pub fn configuration(&self) -> &Configuration {
        &self.settings.configuration
    }

    /// Validates `value` with `context`, handing the value back on success.
    pub fn validate(&self, context: &C, value: T) -> ValidationResult<T, M>
    where
        M: Clone + Hash + Eq,
    {
        let violations = self.collect(context, &value);
        conclude(value, violations)
    }

    /// Fixes the context, producing a plain [`Validator`].
    pub fn bind(&self, context: C) -> Validator<T, M>
    where
        C: Send + Sync + 'static,
        T: 'static,
        M: 'static,
    {
        let body = Arc::clone(&self.body);
        Validator::assemble(self.settings.clone(), move |root| body(&context, root))
    }

    pub(crate) fn collect(&self, context: &C, value: &T) -> Option<ConstraintViolationSet<M>>
    where
        M: Clone + Hash + Eq,
    {
        let (registry, root) = self.settings.start(value);
        (self.body)(context, root);
        self.settings.finish(registry)
    }
}

impl<C, T, M> Clone for ContextualValidator<C, T, M> {
    fn clone(&self) -> Self {
        Self {
            body: Arc::clone(&self.body),
            settings: self.settings.clone(),
        }
    }
}

impl<C, T, M> fmt::Debug for ContextualValidator<C, T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextualValidator")
            .field("configuration", &self.settings.configuration)
            .finish_non_exhaustive()
    }
}

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Validator<String>>();
    assert_send_sync::<ContextualValidator<u8, String>>();
};
