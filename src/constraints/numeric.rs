//! Constraints for numeric values.

use std::fmt::Display;
use std::ops::RangeInclusive;

use crate::constraint::Constraint;
use crate::validatable::Validatable;

/// Numeric values, owned or borrowed.
pub trait Number {
    /// The comparable number behind the value.
    type Value: PartialOrd + Display + Copy;

    /// Zero for this number type.
    const ZERO: Self::Value;

    /// Reads the number.
    fn number(&self) -> Self::Value;
}

macro_rules! impl_number {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl Number for $ty {
                type Value = $ty;
                const ZERO: $ty = $zero;

                fn number(&self) -> $ty {
                    *self
                }
            }
        )*
    };
}

impl_number!(
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
    f32 => 0.0, f64 => 0.0,
);

impl<N: Number + ?Sized> Number for &N {
    type Value = N::Value;
    const ZERO: N::Value = N::ZERO;

    fn number(&self) -> N::Value {
        (**self).number()
    }
}

impl<T, M> Validatable<T, M>
where
    T: Number + Clone,
    M: Clone,
{
    /// The value must be strictly greater than zero.
    pub fn is_positive(&self) -> Constraint<M> {
        self.constrain(|v| v.number() > T::ZERO)
            .otherwise(|| "Must be positive")
    }

    /// The value must be strictly lower than zero.
    pub fn is_negative(&self) -> Constraint<M> {
        self.constrain(|v| v.number() < T::ZERO)
            .otherwise(|| "Must be negative")
    }

    /// The value must be strictly greater than `bound`.
    pub fn is_greater_than(&self, bound: T::Value) -> Constraint<M> {
        self.constrain(|v| v.number() > bound)
            .otherwise(|| format!("Must be greater than {}", bound))
    }

    /// The value must be greater than or equal to `bound`.
    pub fn is_greater_than_or_equal_to(&self, bound: T::Value) -> Constraint<M> {
        self.constrain(|v| v.number() >= bound)
            .otherwise(|| format!("Must be greater than or equal to {}", bound))
    }

    /// The value must be strictly lower than `bound`.
    pub fn is_lower_than(&self, bound: T::Value) -> Constraint<M> {
        self.constrain(|v| v.number() < bound)
            .otherwise(|| format!("Must be lower than {}", bound))
    }

    /// The value must be lower than or equal to `bound`.
    pub fn is_lower_than_or_equal_to(&self, bound: T::Value) -> Constraint<M> {
        self.constrain(|v| v.number() <= bound)
            .otherwise(|| format!("Must be lower than or equal to {}", bound))
    }

    /// The value must be inside `range`, both ends included.
    pub fn is_between(&self, range: RangeInclusive<T::Value>) -> Constraint<M> {
        let (start, end) = (*range.start(), *range.end());
        self.constrain(|v| range.contains(&v.number()))
            .otherwise(|| format!("Must be between {} and {}", start, end))
    }
}

impl<X, M> Validatable<Option<X>, M>
where
    X: Number + Clone,
    M: Clone,
{
    /// The value, if present, must be strictly greater than zero.
    pub fn is_positive(&self) -> Constraint<M> {
        self.constrain_if_some(|v| v.number() > X::ZERO)
            .otherwise(|| "Must be positive")
    }

    /// The value, if present, must be strictly lower than zero.
    pub fn is_negative(&self) -> Constraint<M> {
        self.constrain_if_some(|v| v.number() < X::ZERO)
            .otherwise(|| "Must be negative")
    }

    /// The value, if present, must be strictly greater than `bound`.
    pub fn is_greater_than(&self, bound: X::Value) -> Constraint<M> {
        self.constrain_if_some(|v| v.number() > bound)
            .otherwise(|| format!("Must be greater than {}", bound))
    }

    /// The value, if present, must be greater than or equal to `bound`.
    pub fn is_greater_than_or_equal_to(&self, bound: X::Value) -> Constraint<M> {
        self.constrain_if_some(|v| v.number() >= bound)
            .otherwise(|| format!("Must be greater than or equal to {}", bound))
    }

    /// The value, if present, must be strictly lower than `bound`.
    pub fn is_lower_than(&self, bound: X::Value) -> Constraint<M> {
        self.constrain_if_some(|v| v.number() < bound)
            .otherwise(|| format!("Must be lower than {}", bound))
    }

    /// The value, if present, must be lower than or equal to `bound`.
    pub fn is_lower_than_or_equal_to(&self, bound: X::Value) -> Constraint<M> {
        self.constrain_if_some(|v| v.number() <= bound)
            .otherwise(|| format!("Must be lower than or equal to {}", bound))
    }

    /// The value, if present, must be inside `range`, both ends included.
    pub fn is_between(&self, range: RangeInclusive<X::Value>) -> Constraint<M> {
        let (start, end) = (*range.start(), *range.end());
        self.constrain_if_some(|v| range.contains(&v.number()))
            .otherwise(|| format!("Must be between {} and {}", start, end))
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
    fn test_sign() {
        assert!(root(3).is_positive().is_satisfied());
        assert!(!root(0).is_positive().is_satisfied());
        assert!(root(-2.5).is_negative().is_satisfied());
    }

    #[test]
    fn test_bounds_on_borrowed_numbers() {
        let age = 17u32;
        let wrapper = root(&age);
        let adult = wrapper.is_greater_than_or_equal_to(18);
        assert!(!adult.is_satisfied());
        assert_eq!(adult.message(), "Must be greater than or equal to 18");
        assert!(wrapper.is_between(0..=120).is_satisfied());
    }

    #[test]
    fn test_optional_numbers() {
        let absent: Option<i64> = None;
        assert!(root(absent).is_positive().is_satisfied());
        assert!(!root(Some(-1i64)).is_positive().is_satisfied());
        assert!(root(Some(5i64)).is_lower_than(10).is_satisfied());
    }
}
