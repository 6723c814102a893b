//! Delegating part of a run to another runner.
//!
//! A nested runner validates the value behind a wrapper in a run of its own.
//! Its violations are then moved under the wrapper's path and recorded in
//! the current run as finalized violations, so they are neither evaluated
//! again nor placed under the current run's root path.

use std::hash::Hash;

use super::suspend::SuspendableValidator;
use super::{ContextualValidator, Validator};
use crate::error::ConstraintViolationSet;
use crate::validatable::Validatable;

impl<'v, U, M> Validatable<&'v U, M>
where
    M: Clone + Hash + Eq,
{
    /// Validates the wrapped value with `validator` as part of this run.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pathwise::{Validatable, Validator};
    ///
    /// #[derive(Debug)]
    /// struct Address {
    ///     city: String,
    /// }
    ///
    /// #[derive(Debug)]
    /// struct Customer {
    ///     billing: Address,
    /// }
    ///
    /// let address = Validator::new(|a: Validatable<&Address>| {
    ///     a.field("city", |a| &a.city).is_not_empty();
    /// });
    /// let customer = Validator::new(move |c: Validatable<&Customer>| {
    ///     c.field("billing", |c| &c.billing).validate_with(&address);
    /// });
    ///
    /// let violations = customer
    ///     .validate(Customer { billing: Address { city: String::new() } })
    ///     .into_result()
    ///     .unwrap_err();
    /// assert_eq!(violations.first().path().to_string(), "billing.city");
    /// ```
    pub fn validate_with(&self, validator: &Validator<U, M>) {
        if self.halted() {
            return;
        }
        self.adopt(validator.collect(*self.value()));
    }

    /// Validates the wrapped value with `validator` and `context`.
    pub fn validate_with_context<C>(&self, validator: &ContextualValidator<C, U, M>, context: &C) {
        if self.halted() {
            return;
        }
        self.adopt(validator.collect(context, *self.value()));
    }

    /// Validates the wrapped value with a suspendable `validator`.
    pub async fn validate_with_async(&self, validator: &SuspendableValidator<U, M>) {
        if self.halted() {
            return;
        }
        let nested = validator.collect(*self.value()).await;
        self.adopt(nested);
    }
}

impl<'v, U, M> Validatable<Option<&'v U>, M>
where
    M: Clone + Hash + Eq,
{
    /// Validates the wrapped value, if present, with `validator`.
    pub fn validate_with(&self, validator: &Validator<U, M>) {
        if let Some(value) = *self.value() {
            self.with_value(value).validate_with(validator);
        }
    }

    /// Validates the wrapped value, if present, with `validator` and `context`.
    pub fn validate_with_context<C>(&self, validator: &ContextualValidator<C, U, M>, context: &C) {
        if let Some(value) = *self.value() {
            self.with_value(value).validate_with_context(validator, context);
        }
    }

    /// Validates the wrapped value, if present, with a suspendable `validator`.
    pub async fn validate_with_async(&self, validator: &SuspendableValidator<U, M>) {
        if let Some(value) = *self.value() {
            self.with_value(value).validate_with_async(validator).await;
        }
    }
}

impl<T, M> Validatable<T, M>
where
    M: Clone + Hash + Eq,
{
    fn adopt(&self, nested: Option<ConstraintViolationSet<M>>) {
        let Some(violations) = nested else {
            return;
        };
        let mut registry = self.registry().lock();
        for violation in &violations {
            registry.register_violation(violation.prefixed(self.path()));
        }
    }
}
