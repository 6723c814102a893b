//! Integration tests for paths and path building.

use pathwise::{Path, PathBuilder};

#[test]
fn test_parse_and_display_round_trip() {
    let path = Path::parse("order.lines.0.sku");
    assert_eq!(path.len(), 4);
    assert_eq!(path.to_string(), "order.lines.0.sku");
}

#[test]
fn test_empty_segments_are_dropped() {
    assert_eq!(Path::parse("a..b."), Path::from_segments(["a", "b"]));
    assert_eq!(Path::root().push(""), Path::root());
    assert_eq!(Path::from_segments(["", "x", ""]).to_string(), "x");
}

#[test]
fn test_concat_keeps_order() {
    let prefix = Path::parse("request.body");
    let path = prefix.concat(&Path::parse("title"));
    assert_eq!(path.to_string(), "request.body.title");
    assert!(path.starts_with(&prefix));
    assert_eq!(path.parent(), Some(prefix));
    assert_eq!(path.last(), Some("title"));
}

#[test]
fn test_builder_variants() {
    let builder = PathBuilder::new(Path::parse("user.email"), Some(Path::parse("user")));
    assert_eq!(builder.absolute(["contact"]).to_string(), "contact");
    assert_eq!(builder.relative(["confirm"]).to_string(), "user.confirm");
    assert_eq!(builder.appended(["domain"]).to_string(), "user.email.domain");
}

#[test]
fn test_builder_at_root_uses_root_as_parent() {
    let builder = PathBuilder::new(Path::root(), None);
    assert_eq!(builder.relative(["a", "b"]).to_string(), "a.b");
}

#[test]
fn test_collect_from_iterator() {
    let path: Path = ["a", "b", "c"].into_iter().collect();
    assert_eq!(path.segments().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(Path::from("a.b.c"), path);
}
