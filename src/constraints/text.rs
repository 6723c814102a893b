//! Constraints for textual values.

use regex::Regex;

use crate::constraint::Constraint;
use crate::validatable::Validatable;

/// Values that can be read as text.
pub trait Text {
    /// The value as a string slice.
    fn text(&self) -> &str;
}

impl Text for str {
    fn text(&self) -> &str {
        self
    }
}

impl Text for String {
    fn text(&self) -> &str {
        self
    }
}

impl<T: Text + ?Sized> Text for &T {
    fn text(&self) -> &str {
        (**self).text()
    }
}

impl<T, M> Validatable<T, M>
where
    T: Text + Clone,
    M: Clone,
{
    /// The value must contain at least one non-whitespace character.
    pub fn is_not_blank(&self) -> Constraint<M> {
        self.constrain(|v| !v.text().trim().is_empty())
            .otherwise(|| "Must not be blank")
    }

    /// The value must match `pattern`.
    pub fn matches(&self, pattern: &Regex) -> Constraint<M> {
        self.constrain(|v| pattern.is_match(v.text()))
            .otherwise(|| format!("Must match the pattern {}", pattern.as_str()))
    }

    /// The value must start with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> Constraint<M> {
        self.constrain(|v| v.text().starts_with(prefix))
            .otherwise(|| format!("Must start with \"{}\"", prefix))
    }

    /// The value must end with `suffix`.
    pub fn ends_with(&self, suffix: &str) -> Constraint<M> {
        self.constrain(|v| v.text().ends_with(suffix))
            .otherwise(|| format!("Must end with \"{}\"", suffix))
    }
}

impl<X, M> Validatable<Option<X>, M>
where
    X: Text + Clone,
    M: Clone,
{
    /// The value, if present, must contain a non-whitespace character.
    pub fn is_not_blank(&self) -> Constraint<M> {
        self.constrain_if_some(|v| !v.text().trim().is_empty())
            .otherwise(|| "Must not be blank")
    }

    /// The value, if present, must match `pattern`.
    pub fn matches(&self, pattern: &Regex) -> Constraint<M> {
        self.constrain_if_some(|v| pattern.is_match(v.text()))
            .otherwise(|| format!("Must match the pattern {}", pattern.as_str()))
    }

    /// The value, if present, must start with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> Constraint<M> {
        self.constrain_if_some(|v| v.text().starts_with(prefix))
            .otherwise(|| format!("Must start with \"{}\"", prefix))
    }

    /// The value, if present, must end with `suffix`.
    pub fn ends_with(&self, suffix: &str) -> Constraint<M> {
        self.constrain_if_some(|v| v.text().ends_with(suffix))
            .otherwise(|| format!("Must end with \"{}\"", suffix))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use regex::Regex;

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
    fn test_blank_text() {
        assert!(!root("   ").is_not_blank().is_satisfied());
        assert!(root(" a ").is_not_blank().is_satisfied());
    }

    #[test]
    fn test_pattern() {
        let digits = Regex::new(r"^\d+$").unwrap();
        assert!(root("123").matches(&digits).is_satisfied());

        let failed = root("12a").matches(&digits);
        assert!(!failed.is_satisfied());
        assert_eq!(failed.message(), r"Must match the pattern ^\d+$");
    }

    #[test]
    fn test_affixes_on_optional_text() {
        let present = Some("https://example.com".to_string());
        let wrapper = root(present.as_ref());
        assert!(wrapper.starts_with("https://").is_satisfied());
        assert!(!wrapper.ends_with(".org").is_satisfied());

        let absent: Option<&String> = None;
        assert!(root(absent).starts_with("https://").is_satisfied());
    }
}
