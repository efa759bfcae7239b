//! Integration tests for FieldPath and path lookup.

use formcheck::{path, FieldPath, PathError, PathSegment};
use serde_json::json;

#[test]
fn test_path_construction_and_display() {
    // Root path
    assert_eq!(FieldPath::root().to_string(), "");

    assert_eq!(FieldPath::root().push_field("name").to_string(), "name");
    assert_eq!(FieldPath::root().push_index(0).to_string(), "[0]");

    let path = FieldPath::root()
        .push_field("contacts")
        .push_index(0)
        .push_field("address")
        .push_field("city");
    assert_eq!(path.to_string(), "contacts[0].address.city");
}

#[test]
fn test_parse_round_trip() {
    for input in ["", "name", "[0]", "tags[2]", "contacts[0].address.city", "a[1][2].b"] {
        let parsed: FieldPath = input.parse().unwrap();
        assert_eq!(parsed.to_string(), input);
    }
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        FieldPath::parse("tags[0"),
        Err(PathError::UnclosedBracket { .. })
    ));
    assert!(matches!(
        FieldPath::parse("tags[x]"),
        Err(PathError::InvalidIndex { .. })
    ));
    assert!(matches!(
        FieldPath::parse("a..b"),
        Err(PathError::EmptySegment { .. })
    ));
}

#[test]
fn test_segments_preserved() {
    let path = FieldPath::parse("data[42].value").unwrap();
    let segments: Vec<_> = path.segments().cloned().collect();
    assert_eq!(
        segments,
        vec![
            PathSegment::Field("data".to_string()),
            PathSegment::Index(42),
            PathSegment::Field("value".to_string()),
        ]
    );
    assert_eq!(path.parent().unwrap().to_string(), "data[42]");
}

#[test]
fn test_get_through_nested_values() {
    let tree = json!({
        "contacts": [
            {"name": "Ann", "phones": ["555-1234"]},
            {"name": "Bob"}
        ]
    });

    let first_phone = FieldPath::parse("contacts[0].phones[0]").unwrap();
    assert_eq!(path::get(&tree, &first_phone), Some(&json!("555-1234")));

    let missing = FieldPath::parse("contacts[1].phones[0]").unwrap();
    assert_eq!(path::get(&tree, &missing), None);

    let out_of_range = FieldPath::parse("contacts[5].name").unwrap();
    assert_eq!(path::get(&tree, &out_of_range), None);

    assert_eq!(path::get(&tree, &FieldPath::root()), Some(&tree));
}

#[test]
fn test_set_creates_intermediates() {
    let mut tree = json!({});
    path::set(&mut tree, &FieldPath::parse("contacts[1].name").unwrap(), json!("Bob"));
    assert_eq!(tree, json!({"contacts": [null, {"name": "Bob"}]}));

    path::set(&mut tree, &FieldPath::parse("contacts._error").unwrap(), json!("too few"));
    assert_eq!(
        tree,
        json!({"contacts": {"0": null, "1": {"name": "Bob"}, "_error": "too few"}})
    );
}
