use formcheck::{
    validate, validate_with_context, DynamicRule, RuleConfig, RuleError, RuleValue, Schema,
    ValidateError, ValidationContext,
};
use serde_json::{json, Value};

fn vehicle_schema() -> formcheck::ObjectSchema {
    Schema::object()
        .field("type", Schema::rules().required())
        .field(
            "plate",
            Schema::rules().required_when(|_: &Value, _: Option<&Value>, values: &Value| {
                values["type"] == "car"
            }),
        )
}

#[test]
fn test_conditional_required_enabled() {
    let errors = validate(&json!({"type": "car"}), &vehicle_schema()).unwrap();
    let plate = errors.get("plate").unwrap();
    assert_eq!(plate.error.get("required"), Some(&RuleValue::Bool(true)));
    // The declared config stays dynamic
    assert!(matches!(plate.schema.get("required"), Some(RuleConfig::Dynamic(_))));
    assert_eq!(plate.to_json()["schema"], json!({"required": null}));
}

#[test]
fn test_conditional_required_disabled() {
    let errors = validate(&json!({"type": "bike"}), &vehicle_schema()).unwrap();
    assert!(errors.is_empty());
}

#[test]
fn test_dynamic_config_value_is_reported() {
    let schema = Schema::object()
        .field("min_order", Schema::rules().number())
        .field(
            "quantity",
            Schema::rules().number().dynamic("min", |_: &Value, _: Option<&Value>, values: &Value| {
                values["min_order"].as_f64()
            }),
        );

    let errors = validate(&json!({"min_order": 10, "quantity": 4}), &schema).unwrap();
    assert_eq!(
        errors.get("quantity").unwrap().error.get("min"),
        Some(&RuleValue::Number(10.0))
    );

    // No minimum configured: the rule is disabled
    let errors = validate(&json!({"min_order": "none", "quantity": 4}), &schema).unwrap();
    assert!(!errors.contains("quantity"));
}

#[test]
fn test_dynamic_config_receives_value_under_test() {
    let schema = Schema::object().field(
        "code",
        Schema::rules().dynamic("pattern", |_: &Value, value: Option<&Value>, _: &Value| {
            match value.and_then(Value::as_str) {
                Some(s) if s.starts_with("EU") => Some(r"^EU\d{6}$"),
                _ => None,
            }
        }),
    );

    assert!(validate(&json!({"code": "EU123456"}), &schema).unwrap().is_empty());
    assert!(validate(&json!({"code": "US1"}), &schema).unwrap().is_empty());
    assert!(validate(&json!({"code": "EU12"}), &schema).unwrap().contains("code"));
}

#[test]
fn test_props_drive_conditional_rules() {
    let schema = Schema::object().field(
        "company",
        Schema::rules().required_when(|props: &Value, _: Option<&Value>, _: &Value| {
            props["account"] == "business"
        }),
    );

    let personal = ValidationContext::new().with_props(json!({"account": "personal"}));
    assert!(validate_with_context(&json!({}), &schema, &personal).unwrap().is_empty());

    let business = ValidationContext::new().with_props(json!({"account": "business"}));
    let errors = validate_with_context(&json!({}), &schema, &business).unwrap();
    assert!(errors.get("company").unwrap().failed("required"));
}

#[test]
fn test_rules_inside_collection_elements() {
    let schema = Schema::object().field(
        "contacts",
        formcheck::collection_of(
            Schema::object()
                .field("kind", Schema::rules().required())
                .field("email", Schema::rules().email()),
        ),
    );
    let values = json!({"contacts": [{"kind": "email", "email": "nope"}]});
    let errors = validate(&values, &schema).unwrap();
    assert!(errors.contains("contacts[0].email"));
}

#[test]
fn test_failing_dynamic_config_aborts_validation() {
    let schema = Schema::object().field(
        "limit",
        Schema::rules().rule(
            "max",
            DynamicRule::try_new(|_: &Value, _: Option<&Value>, values: &Value| {
                values["cap"]
                    .as_f64()
                    .map(RuleValue::Number)
                    .ok_or_else(|| RuleError::new("cap is not a number"))
            }),
        ),
    );

    let err = validate(&json!({"limit": 5}), &schema).unwrap_err();
    match err {
        ValidateError::Rule { rule, path, source } => {
            assert_eq!(rule, "max");
            assert_eq!(path.to_string(), "limit");
            assert_eq!(source.message, "cap is not a number");
        }
        other => panic!("unexpected error: {other}"),
    }
}
