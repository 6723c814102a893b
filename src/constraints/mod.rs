//! Ready-made constraints built on [`Validatable::constrain`].
//!
//! Every helper here is a thin wrapper that evaluates a predicate and sets an
//! English default message through `otherwise`. Helpers exist for plain
//! wrappers and for wrappers of `Option`, where `None` satisfies the
//! constraint without evaluating it.
//!
//! # Example
//!
//! ```rust
//! use pathwise::{Validatable, Validator};
//!
//! #[derive(Debug)]
//! struct Post {
//!     title: String,
//!     tags: Vec<String>,
//! }
//!
//! let validator = Validator::new(|post: Validatable<&Post>| {
//!     post.field("title", |p| &p.title).is_not_empty();
//!     post.field("tags", |p| &p.tags).each(|tag| {
//!         tag.has_length_between(1..=10);
//!     });
//! });
//!
//! let post = Post {
//!     title: String::new(),
//!     tags: vec!["rust".into(), "a-very-long-tag".into()],
//! };
//! let violations = validator.validate(post).into_result().unwrap_err();
//!
//! assert_eq!(violations.len(), 2);
//! assert_eq!(violations.first().message(), "Must not be empty");
//! assert_eq!(violations.iter().nth(1).unwrap().path().to_string(), "tags.1");
//! ```

mod numeric;
mod text;

use std::fmt::Debug;
use std::ops::RangeInclusive;

use crate::constraint::Constraint;
use crate::validatable::Validatable;

pub use numeric::Number;
pub use text::Text;

/// Values with a length: text counts characters, collections count elements.
pub trait Measured {
    /// The length of the value.
    fn measure(&self) -> usize;
}

impl Measured for str {
    fn measure(&self) -> usize {
        self.chars().count()
    }
}

impl Measured for String {
    fn measure(&self) -> usize {
        self.as_str().measure()
    }
}

impl<E> Measured for [E] {
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<E> Measured for Vec<E> {
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<E, const N: usize> Measured for [E; N] {
    fn measure(&self) -> usize {
        N
    }
}

impl<T: Measured + ?Sized> Measured for &T {
    fn measure(&self) -> usize {
        (**self).measure()
    }
}

impl<T, M> Validatable<T, M>
where
    T: Measured + Clone,
    M: Clone,
{
    /// The value must have a length of zero.
    pub fn is_empty(&self) -> Constraint<M> {
        self.constrain(|v| v.measure() == 0)
            .otherwise(|| "Must be empty")
    }

    /// The value must not have a length of zero.
    pub fn is_not_empty(&self) -> Constraint<M> {
        self.constrain(|v| v.measure() != 0)
            .otherwise(|| "Must not be empty")
    }

    /// The value must have a length of at least `min`.
    pub fn min_length(&self, min: usize) -> Constraint<M> {
        self.constrain(|v| v.measure() >= min)
            .otherwise(|| format!("Must have a length of at least {}", min))
    }

    /// The value must have a length of at most `max`.
    pub fn max_length(&self, max: usize) -> Constraint<M> {
        self.constrain(|v| v.measure() <= max)
            .otherwise(|| format!("Must have a length of at most {}", max))
    }

    /// The value must have a length inside `range`.
    pub fn has_length_between(&self, range: RangeInclusive<usize>) -> Constraint<M> {
        let message = length_between_message(&range);
        self.constrain(|v| range.contains(&v.measure()))
            .otherwise(|| message)
    }
}

impl<X, M> Validatable<Option<X>, M>
where
    X: Measured + Clone,
    M: Clone,
{
    /// The value, if present, must have a length of zero.
    pub fn is_empty(&self) -> Constraint<M> {
        self.constrain_if_some(|v| v.measure() == 0)
            .otherwise(|| "Must be empty")
    }

    /// The value, if present, must not have a length of zero.
    pub fn is_not_empty(&self) -> Constraint<M> {
        self.constrain_if_some(|v| v.measure() != 0)
            .otherwise(|| "Must not be empty")
    }

    /// The value, if present, must have a length of at least `min`.
    pub fn min_length(&self, min: usize) -> Constraint<M> {
        self.constrain_if_some(|v| v.measure() >= min)
            .otherwise(|| format!("Must have a length of at least {}", min))
    }

    /// The value, if present, must have a length of at most `max`.
    pub fn max_length(&self, max: usize) -> Constraint<M> {
        self.constrain_if_some(|v| v.measure() <= max)
            .otherwise(|| format!("Must have a length of at most {}", max))
    }

    /// The value, if present, must have a length inside `range`.
    pub fn has_length_between(&self, range: RangeInclusive<usize>) -> Constraint<M> {
        let message = length_between_message(&range);
        self.constrain_if_some(|v| range.contains(&v.measure()))
            .otherwise(|| message)
    }
}

fn length_between_message(range: &RangeInclusive<usize>) -> String {
    format!(
        "Must have a length between {} and {}",
        range.start(),
        range.end()
    )
}

impl<T, M> Validatable<T, M>
where
    T: Clone,
    M: Clone,
{
    /// The value must equal `expected`.
    pub fn is_equal_to<U>(&self, expected: U) -> Constraint<M>
    where
        T: PartialEq<U>,
        U: Debug,
    {
        let message = format!("Must be equal to {:?}", expected);
        self.constrain(|v| v == expected).otherwise(|| message)
    }

    /// The value must differ from `unexpected`.
    pub fn is_not_equal_to<U>(&self, unexpected: U) -> Constraint<M>
    where
        T: PartialEq<U>,
        U: Debug,
    {
        let message = format!("Must be different from {:?}", unexpected);
        self.constrain(|v| v != unexpected).otherwise(|| message)
    }
}

impl<X, M> Validatable<Option<X>, M>
where
    X: Clone,
    M: Clone,
{
    /// The value must be present.
    pub fn is_some(&self) -> Constraint<M> {
        self.constrain(|v| v.is_some()).otherwise(|| "Must be present")
    }

    /// The value must be absent.
    pub fn is_none(&self) -> Constraint<M> {
        self.constrain(|v| v.is_none()).otherwise(|| "Must be absent")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::Configuration;
    use crate::constraint::Metadata;
    use crate::registry::ConstraintRegistry;
    use crate::validatable::Validatable;

    fn root<T>(value: T) -> Validatable<T> {
        Validatable::root(
            value,
            ConstraintRegistry::shared(Arc::new(Configuration::default())),
            Arc::new(Metadata::new()),
        )
    }

    #[test]
    fn test_lengths_count_characters() {
        let text = "héllo".to_string();
        let wrapper = root(&text);
        assert!(wrapper.min_length(5).is_satisfied());
        assert!(!wrapper.min_length(6).is_satisfied());
        assert!(wrapper.max_length(5).is_satisfied());
        assert!(wrapper.has_length_between(1..=5).is_satisfied());
    }

    #[test]
    fn test_length_messages() {
        let text = "ab".to_string();
        let wrapper = root(&text);
        assert_eq!(wrapper.min_length(3).message(), "Must have a length of at least 3");
        assert_eq!(
            wrapper.has_length_between(3..=4).message(),
            "Must have a length between 3 and 4"
        );
    }

    #[test]
    fn test_optional_helpers_are_vacuous() {
        let absent: Option<&String> = None;
        let wrapper = root(absent);
        assert!(wrapper.is_not_empty().is_satisfied());
        assert!(wrapper.min_length(100).is_satisfied());
        assert!(!wrapper.is_some().is_satisfied());
        assert!(wrapper.is_none().is_satisfied());
    }

    #[test]
    fn test_collections_are_measured() {
        let items = vec![1, 2, 3];
        let wrapper = root(&items);
        assert!(wrapper.is_not_empty().is_satisfied());
        assert!(!wrapper.max_length(2).is_satisfied());
    }

    #[test]
    fn test_equality_helpers() {
        let wrapper = root(42);
        assert!(wrapper.is_equal_to(42).is_satisfied());
        let different = wrapper.is_not_equal_to(42);
        assert!(!different.is_satisfied());
        assert_eq!(different.message(), "Must be different from 42");
    }
}
