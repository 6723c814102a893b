//! # Pathwise
//!
//! A validation library that walks a value through typed, path-tracked
//! wrappers and accumulates every failed constraint, reporting each one at
//! the exact path where it failed.
//!
//! ## Overview
//!
//! Validation code receives a [`Validatable`] around the value under test.
//! Navigating into fields, optional values and collection elements produces
//! child wrappers that remember their path, so constraints attached anywhere
//! report where they failed without any manual bookkeeping. Failures are
//! recorded in a registry owned by the run and reduced, once the run ends,
//! into a deduplicated [`ConstraintViolationSet`].
//!
//! Results are stillwater `Validation` values, so independent runs combine
//! the same way as any other accumulating validation.
//!
//! ## Core Types
//!
//! - [`Validatable`]: a value together with its [`Path`] and its run
//! - [`Constraint`]: the outcome of one predicate, decorated with `otherwise`,
//!   `with_path` and `with_metadata`
//! - [`Validator`]: runs a validation body against input values; see also
//!   [`ContextualValidator`], [`SuspendableValidator`] and
//!   [`SuspendableContextualValidator`]
//! - [`Configuration`]: default message, root path and fail-fast policy
//!
//! ## Example
//!
//! ```rust
//! use pathwise::{Validatable, Validator};
//!
//! #[derive(Debug)]
//! struct Book {
//!     title: String,
//!     pages: u32,
//!     authors: Vec<String>,
//! }
//!
//! let validator = Validator::new(|book: Validatable<&Book>| {
//!     book.field("title", |b| &b.title).is_not_empty();
//!     book.field("pages", |b| b.pages).is_positive();
//!     book.field("authors", |b| &b.authors).each(|author| {
//!         author.is_not_blank();
//!     });
//! });
//!
//! let book = Book {
//!     title: String::new(),
//!     pages: 0,
//!     authors: vec!["Ada".into(), " ".into()],
//! };
//! let violations = validator.validate(book).into_result().unwrap_err();
//!
//! let paths: Vec<_> = violations.iter().map(|v| v.path().to_string()).collect();
//! assert_eq!(paths, ["title", "pages", "authors.1"]);
//! ```

pub mod config;
pub mod constraint;
pub mod constraints;
pub mod error;
pub mod interop;
pub mod path;
pub mod registry;
pub mod result;
pub mod runner;
pub mod validatable;

pub use config::{Configuration, ConfigurationBuilder, DEFAULT_VIOLATION_MESSAGE};
pub use constraint::{Constraint, ConstraintError, Metadata};
pub use constraints::{Measured, Number, Text};
pub use error::{ConstraintViolation, ConstraintViolationSet, ValidationError};
pub use path::{Path, PathBuilder};
pub use registry::{ConstraintRegistry, Descriptor};
pub use result::{ValidationResult, ValidationResultExt};
pub use runner::{
    ContextualValidator, SuspendableContextualValidator, SuspendableValidator, Validator,
    ValidatorBuilder,
};
pub use validatable::{Compound, Elements, ElementsIter, Validatable};
