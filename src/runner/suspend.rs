//! Runners whose bodies may await.
//!
//! Bodies return a [`BoxFuture`] borrowing the root wrapper, which is what
//! `async move { .. }.boxed()` produces. The registry of a run travels with
//! the wrappers inside that future, so a run stays isolated even when the
//! executor moves it between threads.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use super::{conclude, Settings, ValidatorBuilder};
use crate::config::Configuration;
use crate::constraint::Metadata;
use crate::error::ConstraintViolationSet;
use crate::result::ValidationResult;
use crate::validatable::Validatable;

type SuspendableBody<T, M> =
    dyn for<'v> Fn(Validatable<&'v T, M>) -> BoxFuture<'v, ()> + Send + Sync;
type SuspendableContextualBody<C, T, M> =
    dyn for<'v> Fn(&'v C, Validatable<&'v T, M>) -> BoxFuture<'v, ()> + Send + Sync;

impl<M> ValidatorBuilder<M> {
    /// Builds a [`SuspendableValidator`] around `body`.
    pub fn build_suspendable<T, F>(self, body: F) -> SuspendableValidator<T, M>
    where
        F: for<'v> Fn(Validatable<&'v T, M>) -> BoxFuture<'v, ()> + Send + Sync + 'static,
    {
        SuspendableValidator::assemble(self.settings(), body)
    }

    /// Builds a [`SuspendableContextualValidator`] around `body`.
    pub fn build_suspendable_contextual<C, T, F>(
        self,
        body: F,
    ) -> SuspendableContextualValidator<C, T, M>
    where
        F: for<'v> Fn(&'v C, Validatable<&'v T, M>) -> BoxFuture<'v, ()> + Send + Sync + 'static,
    {
        SuspendableContextualValidator {
            body: Arc::new(body),
            settings: self.settings(),
        }
    }
}

/// Runs a validation body that may await, such as a uniqueness lookup.
///
/// # Example
///
/// ```rust
/// use futures::FutureExt;
/// use pathwise::{SuspendableValidator, Validatable};
///
/// async fn is_available(name: &str) -> bool {
///     name != "admin"
/// }
///
/// let validator = SuspendableValidator::new(|name: Validatable<&String>| {
///     async move {
///         name.constrain_async(|n| is_available(n))
///             .await
///             .otherwise(|| "Already taken");
///     }
///     .boxed()
/// });
///
/// let result = futures::executor::block_on(validator.validate("admin".to_string()));
/// assert!(result.is_failure());
/// ```
pub struct SuspendableValidator<T, M = Metadata> {
    body: Arc<SuspendableBody<T, M>>,
    settings: Settings<M>,
}

impl<T> SuspendableValidator<T, Metadata> {
    /// Creates a suspendable validator with the default configuration.
    pub fn new<F>(body: F) -> Self
    where
        F: for<'v> Fn(Validatable<&'v T>) -> BoxFuture<'v, ()> + Send + Sync + 'static,
    {
        ValidatorBuilder::new().build_suspendable(body)
    }
}

impl<T, M> SuspendableValidator<T, M> {
    fn assemble<F>(settings: Settings<M>, body: F) -> Self
    where
        F: for<'v> Fn(Validatable<&'v T, M>) -> BoxFuture<'v, ()> + Send + Sync + 'static,
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
    pub async fn validate(&self, value: T) -> ValidationResult<T, M>
    where
        M: Clone + Hash + Eq,
    {
        let violations = self.collect(&value).await;
        conclude(value, violations)
    }

    pub(crate) async fn collect(&self, value: &T) -> Option<ConstraintViolationSet<M>>
    where
        M: Clone + Hash + Eq,
    {
        let (registry, root) = self.settings.start(value);
        (self.body)(root).await;
        self.settings.finish(registry)
    }
}

impl<T, M> Clone for SuspendableValidator<T, M> {
    fn clone(&self) -> Self {
        Self {
            body: Arc::clone(&self.body),
            settings: self.settings.clone(),
        }
    }
}

impl<T, M> fmt::Debug for SuspendableValidator<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuspendableValidator")
            .field("configuration", &self.settings.configuration)
            .finish_non_exhaustive()
    }
}

/// A [`SuspendableValidator`] whose body also receives a context value.
pub struct SuspendableContextualValidator<C, T, M = Metadata> {
    body: Arc<SuspendableContextualBody<C, T, M>>,
    settings: Settings<M>,
}

impl<C, T> SuspendableContextualValidator<C, T, Metadata> {
    /// Creates a suspendable contextual validator with the default configuration.
    pub fn new<F>(body: F) -> Self
    where
        F: for<'v> Fn(&'v C, Validatable<&'v T>) -> BoxFuture<'v, ()> + Send + Sync + 'static,
    {
        ValidatorBuilder::new().build_suspendable_contextual(body)
    }
}

impl<C, T, M> SuspendableContextualValidator<C, T, M> {
    /// The configuration applied to every run.
    pub fn configuration(&self) -> &Configuration {
        &self.settings.configuration
    }

    /// Validates `value` with `context`, handing the value back on success.
    pub async fn validate(&self, context: &C, value: T) -> ValidationResult<T, M>
    where
        M: Clone + Hash + Eq,
    {
        let violations = self.collect(context, &value).await;
        conclude(value, violations)
    }

    /// Fixes the context, producing a plain [`SuspendableValidator`].
    pub fn bind(&self, context: C) -> SuspendableValidator<T, M>
    where
        C: Send + Sync + 'static,
        T: Sync + 'static,
        M: Send + Sync + 'static,
    {
        let body = Arc::clone(&self.body);
        let context = Arc::new(context);
        SuspendableValidator::assemble(self.settings.clone(), move |root| {
            let body = Arc::clone(&body);
            let context = Arc::clone(&context);
            async move { body(context.as_ref(), root).await }.boxed()
        })
    }

    pub(crate) async fn collect(&self, context: &C, value: &T) -> Option<ConstraintViolationSet<M>>
    where
        M: Clone + Hash + Eq,
    {
        let (registry, root) = self.settings.start(value);
        (self.body)(context, root).await;
        self.settings.finish(registry)
    }
}

impl<C, T, M> Clone for SuspendableContextualValidator<C, T, M> {
    fn clone(&self) -> Self {
        Self {
            body: Arc::clone(&self.body),
            settings: self.settings.clone(),
        }
    }
}

impl<C, T, M> fmt::Debug for SuspendableContextualValidator<C, T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuspendableContextualValidator")
            .field("configuration", &self.settings.configuration)
            .finish_non_exhaustive()
    }
}
