//! Error types for validation failures.
//!
//! This module provides the finalized violation types produced at the end of
//! a run and the error raised when a failed result is turned into a `Result`.

mod validation_error;
mod violation;

pub use validation_error::ValidationError;
pub use violation::{ConstraintViolation, ConstraintViolationSet};
