//! Run configuration.
//!
//! A [`Configuration`] is read by every validation run and never changes once
//! built, so a single instance can be shared by any number of concurrent runs.

use crate::path::Path;

/// Message used for violations that were not given one through `otherwise`.
pub const DEFAULT_VIOLATION_MESSAGE: &str = "The value is invalid.";

/// Settings applied to every run of a validator.
///
/// # Example
///
/// ```rust
/// use pathwise::{Configuration, Path};
///
/// let base = Configuration::builder()
///     .default_violation_message("invalid")
///     .build();
///
/// let strict = Configuration::builder_from(&base)
///     .fail_fast(true)
///     .root_path(Path::from_segments(["body"]))
///     .build();
///
/// assert_eq!(strict.default_violation_message(), "invalid");
/// assert!(strict.fail_fast());
/// assert!(!base.fail_fast());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    default_violation_message: String,
    root_path: Path,
    fail_fast: bool,
}

impl Configuration {
    /// Starts a builder from the default settings.
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    /// Starts a builder seeded with the settings of `base`.
    pub fn builder_from(base: &Configuration) -> ConfigurationBuilder {
        ConfigurationBuilder {
            configuration: base.clone(),
        }
    }

    /// The message given to violations that have none of their own.
    pub fn default_violation_message(&self) -> &str {
        &self.default_violation_message
    }

    /// The path prepended to every violation path.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Whether a run stops at its first violation.
    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            default_violation_message: DEFAULT_VIOLATION_MESSAGE.to_string(),
            root_path: Path::root(),
            fail_fast: false,
        }
    }
}

/// Builder for [`Configuration`].
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    configuration: Configuration,
}

impl ConfigurationBuilder {
    /// Sets the message used when a constraint has none.
    pub fn default_violation_message(mut self, message: impl Into<String>) -> Self {
        self.configuration.default_violation_message = message.into();
        self
    }

    /// Sets the path prepended to every violation.
    pub fn root_path(mut self, path: impl Into<Path>) -> Self {
        self.configuration.root_path = path.into();
        self
    }

    /// Enables or disables fail-fast.
    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.configuration.fail_fast = enabled;
        self
    }

    /// Finishes the configuration.
    pub fn build(self) -> Configuration {
        self.configuration
    }
}
