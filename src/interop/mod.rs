//! Interoperability with other error formats.
//!
//! This module renders violation sets as documents other systems already
//! understand, such as HTTP problem details.

pub mod problem;

pub use problem::ToProblemDetails;
