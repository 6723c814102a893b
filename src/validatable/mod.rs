//! Navigable, path-tracked wrappers around validated values.
//!
//! A [`Validatable`] couples a value with the path leading to it and with the
//! registry of the run it belongs to. Navigating into a field, an element or
//! a derived value creates a new child wrapper whose path extends the
//! parent's, so constraints attached anywhere in the tree report where they
//! failed without the validation code tracking paths by hand.
//!
//! # Example
//!
//! ```rust
//! use pathwise::{Validatable, Validator};
//!
//! #[derive(Debug)]
//! struct Address {
//!     city: String,
//! }
//!
//! #[derive(Debug)]
//! struct User {
//!     address: Option<Address>,
//! }
//!
//! let validator = Validator::new(|user: Validatable<&User>| {
//!     let city = user
//!         .field("address", |u| u.address.as_ref())
//!         .field_some("city", |a| &a.city);
//!
//!     city.constrain_if_some(|c| !c.is_empty())
//!         .otherwise(|| "Must not be empty");
//! });
//!
//! let missing = User { address: None };
//! assert!(validator.validate(missing).is_success());
//!
//! let blank = User {
//!     address: Some(Address { city: String::new() }),
//! };
//! let violations = validator.validate(blank).into_result().unwrap_err();
//! assert_eq!(violations.first().path().to_string(), "address.city");
//! ```

mod collection;
mod compound;

use std::fmt;
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::constraint::{Constraint, Metadata};
use crate::path::Path;
use crate::registry::SharedRegistry;

pub use collection::{Elements, ElementsIter};
pub use compound::Compound;

/// A value together with its path and the run validating it.
///
/// Wrappers are immutable and cheap to create: every navigation step returns
/// a new child instead of changing the receiver. Equality and hashing only
/// look at the wrapped value, so two fields can be compared directly even
/// though they live at different paths.
pub struct Validatable<T, M = Metadata> {
    value: T,
    path: Path,
    parent: Option<Path>,
    registry: SharedRegistry<M>,
    metadata: Arc<M>,
}

impl<T, M> Validatable<T, M> {
    pub(crate) fn root(value: T, registry: SharedRegistry<M>, metadata: Arc<M>) -> Self {
        Self {
            value,
            path: Path::root(),
            parent: None,
            registry,
            metadata,
        }
    }

    /// Borrows the wrapped value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns a copy of the wrapped value.
    pub fn unwrap(&self) -> T
    where
        T: Clone,
    {
        self.value.clone()
    }

    /// Takes the wrapped value out of the wrapper.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// The path accumulated from the root of the run.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path of the wrapper this one was derived from.
    pub fn parent_path(&self) -> Option<&Path> {
        self.parent.as_ref()
    }

    /// The metadata given to every constraint of the run.
    pub fn default_metadata(&self) -> &M {
        &self.metadata
    }

    /// Creates a child wrapper one `segment` below this one.
    ///
    /// An empty segment keeps the current path.
    pub fn child<U>(&self, segment: impl Into<String>, value: U) -> Validatable<U, M> {
        Validatable {
            value,
            path: self.path.push(segment),
            parent: Some(self.path.clone()),
            registry: Arc::clone(&self.registry),
            metadata: Arc::clone(&self.metadata),
        }
    }

    /// Wraps another value at the same path and with the same parent.
    pub fn with_value<U>(&self, value: U) -> Validatable<U, M> {
        Validatable {
            value,
            path: self.path.clone(),
            parent: self.parent.clone(),
            registry: Arc::clone(&self.registry),
            metadata: Arc::clone(&self.metadata),
        }
    }

    /// Navigates to a property of the wrapped value.
    ///
    /// `accessor` receives the value and returns the property, which is
    /// wrapped at `self.path() + segment`. This is the shape accessor
    /// generators produce for every field of a model.
    pub fn field<U>(&self, segment: impl Into<String>, accessor: impl FnOnce(T) -> U) -> Validatable<U, M>
    where
        T: Clone,
    {
        self.child(segment, accessor(self.value.clone()))
    }

    /// Transforms the wrapped value without adding a path segment.
    pub fn map<U>(&self, transform: impl FnOnce(T) -> U) -> Validatable<U, M>
    where
        T: Clone,
    {
        self.child("", transform(self.value.clone()))
    }

    /// Runs `block` with this wrapper as receiver.
    ///
    /// Only groups constraints visually; nothing else happens around the call.
    pub fn invoke<R>(&self, block: impl FnOnce(&Self) -> R) -> R {
        block(self)
    }

    /// Groups this wrapper with another one, see [`Compound`].
    pub fn and(&self, other: &Validatable<T, M>) -> Compound<T, M>
    where
        T: Clone,
    {
        Compound::from_iter([self.clone(), other.clone()])
    }

    /// Evaluates `predicate` against the wrapped value.
    ///
    /// An unsatisfied result is registered with the run immediately. The
    /// constraint is returned either way so it can be decorated or inspected.
    /// Once fail-fast has stopped the run the predicate is not evaluated and
    /// a satisfied, unregistered constraint is returned. The surrounding body
    /// keeps executing: navigation and other code after the failure still run.
    pub fn constrain(&self, predicate: impl FnOnce(T) -> bool) -> Constraint<M>
    where
        T: Clone,
        M: Clone,
    {
        if self.halted() {
            return self.vacuous();
        }
        let satisfied = predicate(self.value.clone());
        self.register(satisfied)
    }

    /// Awaits `predicate` against the wrapped value.
    ///
    /// Behaves like [`constrain`](Self::constrain): the fail-fast check runs
    /// before the predicate is awaited and registration happens right after,
    /// so registration order follows the order of the calls.
    pub async fn constrain_async<F, Fut>(&self, predicate: F) -> Constraint<M>
    where
        T: Clone,
        M: Clone,
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = bool>,
    {
        if self.halted() {
            return self.vacuous();
        }
        let satisfied = predicate(self.value.clone()).await;
        self.register(satisfied)
    }

    pub(crate) fn halted(&self) -> bool {
        let check = self.registry.lock().check_fail_fast();
        check.is_err()
    }

    pub(crate) fn registry(&self) -> &SharedRegistry<M> {
        &self.registry
    }

    fn register(&self, satisfied: bool) -> Constraint<M>
    where
        M: Clone,
    {
        let constraint = Constraint::new(
            satisfied,
            self.path.clone(),
            self.parent.clone(),
            M::clone(&self.metadata),
        );
        self.registry.lock().register_constraint(constraint.clone());
        constraint
    }

    fn vacuous(&self) -> Constraint<M>
    where
        M: Clone,
    {
        Constraint::new(
            true,
            self.path.clone(),
            self.parent.clone(),
            M::clone(&self.metadata),
        )
    }
}

impl<X, M> Validatable<Option<X>, M> {
    /// Returns true if the wrapped value is `None`.
    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    /// Navigates to a property of a value that may be absent.
    ///
    /// When the wrapped value is `None` the accessor is not called and the
    /// child wraps `None`; its path is extended all the same.
    pub fn field_some<U>(
        &self,
        segment: impl Into<String>,
        accessor: impl FnOnce(X) -> U,
    ) -> Validatable<Option<U>, M>
    where
        X: Clone,
    {
        self.child(segment, self.value.clone().map(accessor))
    }

    /// Navigates to an optional property of a value that may be absent.
    pub fn field_flatten<U>(
        &self,
        segment: impl Into<String>,
        accessor: impl FnOnce(X) -> Option<U>,
    ) -> Validatable<Option<U>, M>
    where
        X: Clone,
    {
        self.child(segment, self.value.clone().and_then(accessor))
    }

    /// Transforms a present value without adding a path segment.
    pub fn map_some<U>(&self, transform: impl FnOnce(X) -> U) -> Validatable<Option<U>, M>
    where
        X: Clone,
    {
        self.child("", self.value.clone().map(transform))
    }

    /// Evaluates `predicate` when a value is present.
    ///
    /// A `None` value satisfies the constraint without calling `predicate`.
    pub fn constrain_if_some(&self, predicate: impl FnOnce(X) -> bool) -> Constraint<M>
    where
        X: Clone,
        M: Clone,
    {
        match self.value.clone() {
            Some(value) => self.constrain(|_| predicate(value)),
            None => self.vacuous(),
        }
    }

    /// Awaits `predicate` when a value is present.
    pub async fn constrain_if_some_async<F, Fut>(&self, predicate: F) -> Constraint<M>
    where
        X: Clone,
        M: Clone,
        F: FnOnce(X) -> Fut,
        Fut: Future<Output = bool>,
    {
        match self.value.clone() {
            Some(value) => self.constrain_async(|_| predicate(value)).await,
            None => self.vacuous(),
        }
    }
}

impl<T: Clone, M> Clone for Validatable<T, M> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            path: self.path.clone(),
            parent: self.parent.clone(),
            registry: Arc::clone(&self.registry),
            metadata: Arc::clone(&self.metadata),
        }
    }
}

impl<T: fmt::Debug, M> fmt::Debug for Validatable<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validatable")
            .field("value", &self.value)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl<T, U, M, N> PartialEq<Validatable<U, N>> for Validatable<T, M>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Validatable<U, N>) -> bool {
        self.value == other.value
    }
}

impl<T: Eq, M> Eq for Validatable<T, M> {}

impl<T: Hash, M> Hash for Validatable<T, M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}
