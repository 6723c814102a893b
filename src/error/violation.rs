//! Constraint violation types.
//!
//! This module provides [`ConstraintViolation`] for a single confirmed failure
//! and [`ConstraintViolationSet`] for the deduplicated failures of one run.

use std::fmt::{self, Display};
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use stillwater::prelude::*;

use crate::constraint::Metadata;
use crate::path::Path;

/// A confirmed constraint failure.
///
/// Violations are produced when a run is reduced and never change afterwards.
/// Two violations are equal when their message, path and metadata are all
/// equal, which is what lets a [`ConstraintViolationSet`] discard duplicates.
///
/// # Example
///
/// ```rust
/// use pathwise::{ConstraintViolation, Path};
///
/// let violation = ConstraintViolation::new(
///     "Must not be empty",
///     Path::from_segments(["title"]),
/// );
///
/// assert_eq!(violation.to_string(), "title: Must not be empty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintViolation<M = Metadata> {
    message: String,
    path: Path,
    metadata: M,
}

impl ConstraintViolation<Metadata> {
    /// Creates a violation with empty metadata.
    pub fn new(message: impl Into<String>, path: Path) -> Self {
        Self::with_metadata(message, path, Metadata::new())
    }
}

impl<M> ConstraintViolation<M> {
    /// Creates a violation carrying `metadata`.
    pub fn with_metadata(message: impl Into<String>, path: Path, metadata: M) -> Self {
        Self {
            message: message.into(),
            path,
            metadata,
        }
    }

    /// Human-readable description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the failure occurred.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Informational metadata attached by the constraint.
    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    /// Returns the same violation located under `prefix`.
    pub fn prefixed(&self, prefix: &Path) -> Self
    where
        M: Clone,
    {
        Self {
            message: self.message.clone(),
            path: prefix.concat(&self.path),
            metadata: self.metadata.clone(),
        }
    }

    /// Converts the metadata into another representation.
    pub fn map_metadata<N>(self, f: impl FnOnce(M) -> N) -> ConstraintViolation<N> {
        ConstraintViolation {
            message: self.message,
            path: self.path,
            metadata: f(self.metadata),
        }
    }
}

impl<M> Display for ConstraintViolation<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl<M: fmt::Debug> std::error::Error for ConstraintViolation<M> {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ConstraintViolation>();
    assert_sync::<ConstraintViolation>();
};

/// The non-empty, deduplicated violations of a failed run.
///
/// Insertion order is preserved: iteration yields violations in the order
/// their constraints were reached, and [`by_path`](Self::by_path) keeps that
/// order both across and within groups.
///
/// # Combining Violations
///
/// `ConstraintViolationSet` implements `Semigroup`, so the results of several
/// runs can be accumulated with stillwater's `Validation::and`:
///
/// ```rust
/// use pathwise::{ConstraintViolation, ConstraintViolationSet, Path};
/// use stillwater::prelude::*;
///
/// let title = ConstraintViolationSet::single(
///     ConstraintViolation::new("required", Path::from_segments(["title"])),
/// );
/// let body = ConstraintViolationSet::single(
///     ConstraintViolation::new("too long", Path::from_segments(["body"])),
/// );
///
/// assert_eq!(title.clone().combine(body).len(), 2);
/// assert_eq!(title.clone().combine(title).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ConstraintViolationSet<M = Metadata>(IndexSet<ConstraintViolation<M>>);

impl<M: Hash + Eq> ConstraintViolationSet<M> {
    /// Creates a set containing a single violation.
    pub fn single(violation: ConstraintViolation<M>) -> Self {
        let mut set = IndexSet::new();
        set.insert(violation);
        Self(set)
    }

    /// Collects violations into a set, or returns `None` when there are none.
    pub fn from_violations<I>(violations: I) -> Option<Self>
    where
        I: IntoIterator<Item = ConstraintViolation<M>>,
    {
        let set: IndexSet<_> = violations.into_iter().collect();
        if set.is_empty() {
            None
        } else {
            Some(Self(set))
        }
    }

    /// Returns true if an equal violation is part of the set.
    pub fn contains(&self, violation: &ConstraintViolation<M>) -> bool {
        self.0.contains(violation)
    }

    /// Converts every violation's metadata, merging any that become equal.
    pub fn map_metadata<N: Hash + Eq>(
        self,
        mut f: impl FnMut(M) -> N,
    ) -> ConstraintViolationSet<N> {
        ConstraintViolationSet(
            self.0
                .into_iter()
                .map(|violation| violation.map_metadata(&mut f))
                .collect(),
        )
    }
}

impl<M> ConstraintViolationSet<M> {
    /// Returns the number of violations in this set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns false since this set is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the violations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ConstraintViolation<M>> {
        self.0.iter()
    }

    /// Returns the first violation that was recorded.
    pub fn first(&self) -> &ConstraintViolation<M> {
        &self.0[0]
    }

    /// Returns all violations at the specified path.
    pub fn at_path(&self, path: &Path) -> Vec<&ConstraintViolation<M>> {
        self.0.iter().filter(|v| &v.path == path).collect()
    }

    /// Groups violations by path.
    pub fn by_path(&self) -> IndexMap<Path, Vec<&ConstraintViolation<M>>> {
        let mut groups: IndexMap<Path, Vec<&ConstraintViolation<M>>> = IndexMap::new();
        for violation in &self.0 {
            groups
                .entry(violation.path.clone())
                .or_default()
                .push(violation);
        }
        groups
    }

    /// Converts this set into a `Vec` in insertion order.
    pub fn into_vec(self) -> Vec<ConstraintViolation<M>> {
        self.0.into_iter().collect()
    }
}

impl<M: Hash + Eq> PartialEq for ConstraintViolationSet<M> {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl<M: Hash + Eq> Eq for ConstraintViolationSet<M> {}

impl<M: Hash + Eq> Semigroup for ConstraintViolationSet<M> {
    fn combine(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl<M> Display for ConstraintViolationSet<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} violation(s):", self.len())?;
        for (i, violation) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl<M: fmt::Debug> std::error::Error for ConstraintViolationSet<M> {}

impl<M> IntoIterator for ConstraintViolationSet<M> {
    type Item = ConstraintViolation<M>;
    type IntoIter = indexmap::set::IntoIter<ConstraintViolation<M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, M> IntoIterator for &'a ConstraintViolationSet<M> {
    type Item = &'a ConstraintViolation<M>;
    type IntoIter = indexmap::set::Iter<'a, ConstraintViolation<M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ConstraintViolationSet>();
    assert_sync::<ConstraintViolationSet>();
};
