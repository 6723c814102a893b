//! Problem details (RFC 9457) rendering.
//!
//! HTTP APIs commonly report invalid input as a problem document. The
//! violations become a `fields` extension member, one entry per violation
//! with its message and dot-joined path.

use serde_json::{json, Value};

use crate::error::{ConstraintViolationSet, ValidationError};

/// Conversion of validation failures into a problem details document.
pub trait ToProblemDetails {
    /// Builds the document with the given HTTP `status` and `title`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pathwise::interop::ToProblemDetails;
    /// use pathwise::{ConstraintViolation, ConstraintViolationSet, Path};
    ///
    /// let violations = ConstraintViolationSet::single(ConstraintViolation::new(
    ///     "Must not be empty",
    ///     Path::parse("user.name"),
    /// ));
    /// let document = violations.to_problem_details(422, "Invalid request");
    ///
    /// assert_eq!(document["status"], 422);
    /// assert_eq!(document["fields"][0]["path"], "user.name");
    /// ```
    fn to_problem_details(&self, status: u16, title: &str) -> Value;
}

impl<M> ToProblemDetails for ConstraintViolationSet<M> {
    fn to_problem_details(&self, status: u16, title: &str) -> Value {
        let fields: Vec<Value> = self
            .iter()
            .map(|violation| {
                json!({
                    "message": violation.message(),
                    "path": violation.path().to_string(),
                })
            })
            .collect();

        json!({
            "status": status,
            "title": title,
            "detail": format!("{} constraint violation(s)", self.len()),
            "fields": fields,
        })
    }
}

impl<M> ToProblemDetails for ValidationError<M> {
    fn to_problem_details(&self, status: u16, title: &str) -> Value {
        self.violations().to_problem_details(status, title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstraintViolation;
    use crate::path::Path;

    fn violations() -> ConstraintViolationSet {
        ConstraintViolationSet::from_violations([
            ConstraintViolation::new("Must not be empty", Path::parse("title")),
            ConstraintViolation::new("Must be positive", Path::from_segments(["lines", "", "0"])),
            ConstraintViolation::new("Passwords must match", Path::root()),
        ])
        .unwrap()
    }

    #[test]
    fn test_document_members() {
        let document = violations().to_problem_details(400, "Bad Request");
        assert_eq!(document["status"], 400);
        assert_eq!(document["title"], "Bad Request");
        assert_eq!(document["detail"], "3 constraint violation(s)");
        assert_eq!(document["fields"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_paths_are_dot_joined() {
        let document = violations().to_problem_details(400, "Bad Request");
        assert_eq!(document["fields"][0]["path"], "title");
        assert_eq!(document["fields"][1]["path"], "lines.0");
        assert_eq!(document["fields"][2]["path"], "");
    }

    #[test]
    fn test_error_renders_its_violations() {
        let error = ValidationError::new(violations());
        assert_eq!(
            error.to_problem_details(422, "Unprocessable"),
            violations().to_problem_details(422, "Unprocessable")
        );
    }
}
