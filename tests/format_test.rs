//! Tests for the form-facing error tree.

use formcheck::{
    array_of, collection_of, format_errors, validate, FormValidator, FormatOptions, RuleError,
    RuleRegistry, RuleValue, Schema, Validator,
};
use serde_json::{json, Value};

fn profile_schema() -> formcheck::ObjectSchema {
    Schema::object()
        .field("first_name", Schema::rules().required().min_length(4).string())
        .field("nickname", Schema::rules().min_length(3).string())
        .field("tags", array_of(Schema::rules().min_length(4)).min_length(1))
        .field(
            "contacts",
            collection_of(
                Schema::object()
                    .field("first_name", Schema::rules().required())
                    .field("second_name", Schema::rules().min_length(4)),
            )
            .required(),
        )
}

#[test]
fn test_formatted_tree_shape() {
    let values = json!({
        "first_name": "Iv",
        "nickname": null,
        "tags": [],
        "contacts": [{"first_name": "Ann", "second_name": "Li"}, {}]
    });
    let schema = profile_schema();
    let errors = validate(&values, &schema).unwrap();
    let tree = format_errors(&errors, &schema, &values, &FormatOptions::default());

    assert_eq!(
        tree,
        json!({
            "first_name": {
                "error": {"minLength": 4},
                "schema": {"required": true, "minLength": 4, "string": true}
            },
            "tags": {
                "_error": {
                    "error": {"minLength": 1},
                    "schema": {"minLength": 1},
                    "isArray": true
                }
            },
            "contacts": [
                {
                    "second_name": {
                        "error": {"minLength": 4},
                        "schema": {"minLength": 4}
                    }
                },
                {
                    "first_name": {
                        "error": {"required": true},
                        "schema": {"required": true}
                    }
                }
            ]
        })
    );
}

#[test]
fn test_engine_keeps_what_formatter_drops() {
    let values = json!({"first_name": "Ivan", "tags": ["news"], "contacts": [{}]});
    let schema = profile_schema();
    let errors = validate(&values, &schema).unwrap();

    // Raw map: blank optional fields still report their structural rules
    assert!(errors.contains("nickname"));
    assert!(errors.contains("contacts[0].second_name"));

    let tree = format_errors(&errors, &schema, &values, &FormatOptions::default());
    assert!(tree.get("nickname").is_none());
    assert!(tree["contacts"][0].get("second_name").is_none());
    assert_eq!(tree["contacts"][0]["first_name"]["error"]["required"], json!(true));

    let options = FormatOptions::new().include_blank_optional(true);
    let strict = format_errors(&errors, &schema, &values, &options);
    assert_eq!(strict["nickname"]["error"], json!({"minLength": 3, "string": true}));
}

#[test]
fn test_missing_required_collection() {
    let values = json!({"first_name": "Ivan", "tags": ["news"]});
    let schema = profile_schema();
    let errors = validate(&values, &schema).unwrap();
    let tree = format_errors(&errors, &schema, &values, &FormatOptions::default());

    assert_eq!(tree["contacts"]["_error"]["error"], json!({"required": true}));
    assert_eq!(tree["contacts"]["_error"]["isArray"], json!(true));
}

#[test]
fn test_root_repeated_schema() {
    let schema = array_of(Schema::rules().required()).min_length(2);
    let values = json!([""]);
    let errors = validate(&values, &schema).unwrap();
    let tree = format_errors(&errors, &schema, &values, &FormatOptions::default());

    assert_eq!(tree["_error"]["error"]["minLength"], json!(2));
    assert_eq!(tree["0"]["error"]["required"], json!(true));
}

#[test]
fn test_form_validator_with_custom_rules() {
    let registry = RuleRegistry::new();
    registry
        .register(
            "notReserved",
            |value: Option<&Value>, _: &RuleValue| -> Result<bool, RuleError> {
                Ok(value.and_then(Value::as_str) != Some("admin"))
            },
        )
        .unwrap();

    let form = FormValidator::new(
        Schema::object().field("username", Schema::rules().required().rule("notReserved", true)),
        FormatOptions::default(),
    )
    .with_validator(Validator::new().with_registry(registry));

    assert_eq!(form.validate(&json!({"username": "ann"}), &Value::Null).unwrap(), json!({}));
    let tree = form.validate(&json!({"username": "admin"}), &Value::Null).unwrap();
    assert_eq!(tree["username"]["error"], json!({"notReserved": true}));
}
