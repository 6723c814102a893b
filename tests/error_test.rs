//! Integration tests for violations and validation errors.

use pathwise::interop::ToProblemDetails;
use pathwise::{
    ConstraintViolation, ConstraintViolationSet, Metadata, Path, Validatable, ValidationError,
    ValidationResultExt, Validator,
};
use stillwater::prelude::*;

fn violation(message: &str, path: &str) -> ConstraintViolation {
    ConstraintViolation::new(message, Path::parse(path))
}

#[test]
fn test_violation_display() {
    assert_eq!(
        violation("Must not be empty", "user.name").to_string(),
        "user.name: Must not be empty"
    );
    assert_eq!(
        violation("Passwords must match", "").to_string(),
        "(root): Passwords must match"
    );
}

#[test]
fn test_set_display_lists_every_violation() {
    let set = ConstraintViolationSet::from_violations([
        violation("required", "title"),
        violation("too short", "body"),
    ])
    .unwrap();
    assert_eq!(
        set.to_string(),
        "Validation failed with 2 violation(s):\n  1. title: required\n  2. body: too short\n"
    );
}

#[test]
fn test_sets_combine_without_duplicates() {
    let left = ConstraintViolationSet::single(violation("required", "title"));
    let right = ConstraintViolationSet::from_violations([
        violation("required", "title"),
        violation("required", "body"),
    ])
    .unwrap();

    let combined = left.combine(right);
    assert_eq!(combined.len(), 2);
    assert!(!combined.is_empty());
    assert!(combined.contains(&violation("required", "body")));
}

#[test]
fn test_empty_iterator_yields_no_set() {
    assert!(ConstraintViolationSet::<Metadata>::from_violations(Vec::new()).is_none());
}

#[test]
fn test_metadata_participates_in_equality() {
    let plain = violation("required", "title");
    let tagged = ConstraintViolation::with_metadata(
        "required",
        Path::parse("title"),
        Metadata::from([("severity".to_string(), "high".to_string())]),
    );
    let set = ConstraintViolationSet::from_violations([plain, tagged]).unwrap();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_or_throw_propagates_with_question_mark() {
    fn register(name: String) -> Result<String, ValidationError> {
        let validator = Validator::new(|name: Validatable<&String>| {
            name.is_not_blank();
        });
        let name = validator.validate(name).or_throw()?;
        Ok(name)
    }

    assert_eq!(register("ada".into()).unwrap(), "ada");
    let error = register("  ".into()).unwrap_err();
    assert_eq!(error.violations().first().message(), "Must not be blank");
    assert_eq!(error.into_violations().len(), 1);
}

#[test]
fn test_or_throw_with_converts_metadata() {
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    enum Severity {
        Low,
        High,
    }

    let validator = Validator::new(|n: Validatable<&i32>| {
        n.is_positive()
            .with_metadata(|| Metadata::from([("severity".to_string(), "high".to_string())]));
    });

    let error = validator
        .validate(-1)
        .or_throw_with(|metadata| match metadata.get("severity").map(String::as_str) {
            Some("high") => Severity::High,
            _ => Severity::Low,
        })
        .unwrap_err();
    assert_eq!(error.violations().first().metadata(), &Severity::High);
}

#[test]
fn test_error_as_problem_details() {
    let validator = Validator::new(|s: Validatable<&String>| {
        s.min_length(3);
    });
    let error = validator.validate("ab".to_string()).or_throw().unwrap_err();

    let document = error.to_problem_details(422, "Invalid input");
    assert_eq!(document["title"], "Invalid input");
    assert_eq!(document["fields"][0]["message"], "Must have a length of at least 3");
    assert_eq!(document["fields"][0]["path"], "");
}
