//! Groups of wrappers validated as one unit.

use super::Validatable;
use crate::constraint::Metadata;

/// A set of wrappers that receive the same constraints.
///
/// Members are deduplicated by path: adding a wrapper whose path is already
/// present is a no-op, and members keep the order in which they were first
/// added.
///
/// # Example
///
/// ```rust
/// use pathwise::{Validatable, Validator};
///
/// #[derive(Debug)]
/// struct Name {
///     first: String,
///     last: String,
/// }
///
/// let validator = Validator::new(|name: Validatable<&Name>| {
///     let first = name.field("first", |n| &n.first);
///     let last = name.field("last", |n| &n.last);
///
///     first.and(&last).invoke(|part| {
///         part.constrain(|p| p.len() >= 3).otherwise(|| "Too short");
///     });
/// });
///
/// let result = validator.validate(Name {
///     first: "Al".into(),
///     last: "Turing".into(),
/// });
/// let violations = result.into_result().unwrap_err();
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations.first().path().to_string(), "first");
/// ```
#[derive(Debug)]
pub struct Compound<T, M = Metadata> {
    members: Vec<Validatable<T, M>>,
}

impl<T, M> Compound<T, M> {
    /// Creates an empty compound.
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Adds a wrapper unless one with the same path is already a member.
    pub fn and(mut self, member: &Validatable<T, M>) -> Self
    where
        T: Clone,
    {
        self.push(member.clone());
        self
    }

    fn push(&mut self, member: Validatable<T, M>) {
        if !self.members.iter().any(|m| m.path() == member.path()) {
            self.members.push(member);
        }
    }

    /// Number of distinct members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the compound has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The distinct members in insertion order.
    pub fn members(&self) -> &[Validatable<T, M>] {
        &self.members
    }

    /// Runs `block` once per distinct member, in insertion order.
    ///
    /// Stops early once fail-fast has ended the run.
    pub fn invoke(&self, mut block: impl FnMut(&Validatable<T, M>)) {
        for member in &self.members {
            if member.halted() {
                break;
            }
            block(member);
        }
    }
}

impl<T, M> Default for Compound<T, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, M> FromIterator<Validatable<T, M>> for Compound<T, M> {
    fn from_iter<I: IntoIterator<Item = Validatable<T, M>>>(iter: I) -> Self {
        let mut compound = Self::new();
        for member in iter {
            compound.push(member);
        }
        compound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::registry::ConstraintRegistry;
    use std::sync::Arc;

    fn root<T>(value: T) -> Validatable<T> {
        Validatable::root(
            value,
            ConstraintRegistry::shared(Arc::new(Configuration::default())),
            Arc::new(Metadata::new()),
        )
    }

    #[test]
    fn test_members_deduplicated_by_path() {
        let pair = ("ab".to_string(), "cde".to_string());
        let wrapper = root(&pair);
        let first = wrapper.field("first", |p| &p.0);
        let again = wrapper.field("first", |p| &p.1);
        let second = wrapper.field("second", |p| &p.1);

        let compound = first.and(&again).and(&second).and(&first);
        assert_eq!(compound.len(), 2);

        let mut visited = Vec::new();
        compound.invoke(|member| visited.push(member.path().to_string()));
        assert_eq!(visited, vec!["first", "second"]);
    }

    #[test]
    fn test_invoke_stops_after_fail_fast() {
        let values = vec![1, 2, 3];
        let wrapper = Validatable::root(
            &values,
            ConstraintRegistry::shared(Arc::new(Configuration::builder().fail_fast(true).build())),
            Arc::new(Metadata::new()),
        );
        let compound: Compound<_> = wrapper.iter().collect();

        let mut visited = 0;
        compound.invoke(|member| {
            visited += 1;
            member.constrain(|_| false);
        });
        assert_eq!(visited, 1);
        assert_eq!(wrapper.registry().lock().len(), 1);
    }

    #[test]
    fn test_from_iterator() {
        let values = vec![1, 2, 3];
        let wrapper = root(&values);
        let compound: Compound<_> = wrapper.iter().collect();
        assert_eq!(compound.len(), 3);
        assert!(!compound.is_empty());
    }
}
