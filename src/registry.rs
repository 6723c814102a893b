//! Per-run storage of unsatisfied constraints.
//!
//! This module provides [`ConstraintRegistry`], the mutable store every
//! wrapper of one run shares. It only ever holds failures, enforces the
//! fail-fast policy between registrations and is reduced exactly once, when
//! the run ends, into a [`ConstraintViolationSet`].

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Configuration;
use crate::constraint::{Constraint, Metadata};
use crate::error::{ConstraintViolation, ConstraintViolationSet};

/// Handle to the registry of the active run, shared by all of its wrappers.
pub(crate) type SharedRegistry<M> = Arc<Mutex<ConstraintRegistry<M>>>;

/// An entry of the registry.
#[derive(Debug, Clone)]
pub enum Descriptor<M = Metadata> {
    /// An unsatisfied constraint that can still be decorated.
    Constraint(Constraint<M>),
    /// A violation finalized elsewhere, such as by a nested validator.
    Violation(ConstraintViolation<M>),
}

/// Signal raised once fail-fast has tripped. It never leaves the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FailFast;

/// The failures recorded during one validation run.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use pathwise::{Configuration, ConstraintRegistry, ConstraintViolation, Path};
///
/// let mut registry = ConstraintRegistry::new(Arc::new(Configuration::default()));
/// registry.register_violation(ConstraintViolation::new("taken", Path::parse("email")));
/// registry.register_violation(ConstraintViolation::new("taken", Path::parse("email")));
///
/// let violations = registry.reduce().unwrap();
/// assert_eq!(violations.len(), 1);
/// ```
#[derive(Debug)]
pub struct ConstraintRegistry<M = Metadata> {
    entries: Vec<Descriptor<M>>,
    configuration: Arc<Configuration>,
    aborted: bool,
}

impl<M> ConstraintRegistry<M> {
    /// Creates an empty registry for a run using `configuration`.
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self {
            entries: Vec::new(),
            configuration,
            aborted: false,
        }
    }

    pub(crate) fn shared(configuration: Arc<Configuration>) -> SharedRegistry<M> {
        Arc::new(Mutex::new(Self::new(configuration)))
    }

    /// The configuration of the run.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing failed so far.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true once fail-fast has stopped the run.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Recorded entries in insertion order.
    pub fn entries(&self) -> &[Descriptor<M>] {
        &self.entries
    }

    /// Checks whether the run may evaluate another constraint.
    ///
    /// With fail-fast enabled, any recorded entry stops the run: the registry
    /// latches as aborted and every later check fails.
    pub(crate) fn check_fail_fast(&mut self) -> Result<(), FailFast> {
        if self.aborted {
            return Err(FailFast);
        }
        if self.configuration.fail_fast() && !self.entries.is_empty() {
            self.aborted = true;
            tracing::debug!(
                entries = self.entries.len(),
                "fail-fast tripped, skipping remaining constraints"
            );
            return Err(FailFast);
        }
        Ok(())
    }

    /// Records an unsatisfied constraint.
    ///
    /// Satisfied constraints are ignored, and registering the same
    /// constraint twice keeps a single entry.
    pub fn register_constraint(&mut self, constraint: Constraint<M>) {
        if constraint.is_satisfied() {
            return;
        }
        let known = self.entries.iter().any(|entry| match entry {
            Descriptor::Constraint(existing) => existing.same_as(&constraint),
            Descriptor::Violation(_) => false,
        });
        if known {
            return;
        }
        tracing::trace!(path = %constraint.path(), "registered unsatisfied constraint");
        self.entries.push(Descriptor::Constraint(constraint));
    }

    /// Records a violation that has already been finalized.
    pub fn register_violation(&mut self, violation: ConstraintViolation<M>) {
        tracing::trace!(path = %violation.path(), "registered violation");
        self.entries.push(Descriptor::Violation(violation));
    }

    /// Finalizes the recorded entries.
    ///
    /// Constraints take the configured default message when they have none
    /// and are placed under the configured root path; violations pass through
    /// unchanged. Equal violations collapse. With fail-fast enabled only the
    /// first entry is kept. Returns `None` when nothing failed.
    pub fn reduce(self) -> Option<ConstraintViolationSet<M>>
    where
        M: Clone + Hash + Eq,
    {
        let configuration = self.configuration;
        let limit = if configuration.fail_fast() {
            1
        } else {
            self.entries.len()
        };

        ConstraintViolationSet::from_violations(self.entries.into_iter().take(limit).map(
            |entry| match entry {
                Descriptor::Constraint(constraint) => constraint.to_violation(
                    configuration.default_violation_message(),
                    configuration.root_path(),
                ),
                Descriptor::Violation(violation) => violation,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;

    fn failed(path: &str) -> Constraint {
        Constraint::new(false, Path::parse(path), None, Metadata::new())
    }

    fn registry(configuration: Configuration) -> ConstraintRegistry {
        ConstraintRegistry::new(Arc::new(configuration))
    }

    #[test]
    fn test_satisfied_constraints_are_discarded() {
        let mut registry = registry(Configuration::default());
        registry.register_constraint(Constraint::new(true, Path::root(), None, Metadata::new()));
        assert!(registry.is_empty());
        assert!(registry.reduce().is_none());
    }

    #[test]
    fn test_same_constraint_registered_once() {
        let mut registry = registry(Configuration::default());
        let constraint = failed("a");
        registry.register_constraint(constraint.clone());
        registry.register_constraint(constraint);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reduce_applies_default_message_and_root_path() {
        let configuration = Configuration::builder()
            .default_violation_message("nope")
            .root_path("body")
            .build();
        let mut registry = registry(configuration);
        registry.register_constraint(failed("title"));
        registry.register_violation(ConstraintViolation::new("nested", Path::parse("x.y")));

        let violations = registry.reduce().unwrap().into_vec();
        assert_eq!(violations[0].message(), "nope");
        assert_eq!(violations[0].path().to_string(), "body.title");
        assert_eq!(violations[1].path().to_string(), "x.y");
    }

    #[test]
    fn test_reduce_sees_late_decorations() {
        let mut registry = registry(Configuration::default());
        let constraint = failed("a");
        registry.register_constraint(constraint.clone());
        let _ = constraint.otherwise(|| "decorated after registration");

        let violations = registry.reduce().unwrap();
        assert_eq!(violations.first().message(), "decorated after registration");
    }

    #[test]
    fn test_fail_fast_check_latches() {
        let mut registry = registry(Configuration::builder().fail_fast(true).build());
        assert_eq!(registry.check_fail_fast(), Ok(()));

        registry.register_constraint(failed("a"));
        assert_eq!(registry.check_fail_fast(), Err(FailFast));
        assert!(registry.is_aborted());
        assert_eq!(registry.check_fail_fast(), Err(FailFast));
    }

    #[test]
    fn test_fail_fast_check_ignored_without_policy() {
        let mut registry = registry(Configuration::default());
        registry.register_constraint(failed("a"));
        assert_eq!(registry.check_fail_fast(), Ok(()));
        assert!(!registry.is_aborted());
    }

    #[test]
    fn test_fail_fast_reduces_to_first_entry() {
        let mut registry = registry(Configuration::builder().fail_fast(true).build());
        registry.register_violation(ConstraintViolation::new("first", Path::parse("a")));
        registry.register_violation(ConstraintViolation::new("second", Path::parse("b")));

        let violations = registry.reduce().unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.first().message(), "first");
    }
}
