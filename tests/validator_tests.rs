//! Façade configuration: custom rules, keys, delimiters, locales, catalogs,
//! and the misconfiguration error path.

mod common;

use common::{class, violations_for};
use sieve::{
    build_default_registry, Catalog, Fault, Field, Kind, Record, RuleError, RuleFn, RuleResult,
    SieveError, Validator, Value, ViolationKind,
};

fn always_fails(_kind: Kind, _value: &Value, _title: &str, _params: &[&str]) -> RuleResult {
    Err(RuleError::Constraint(Fault::new("required")))
}

fn odd(kind: Kind, value: &Value, _title: &str, _params: &[&str]) -> RuleResult {
    match value {
        Value::Int(i) if i % 2 != 0 => Ok(()),
        Value::Int(_) => Err(RuleError::Constraint(Fault::new("odd"))),
        _ => Err(RuleError::Unsupported(kind)),
    }
}

fn even(kind: Kind, value: &Value, _title: &str, _params: &[&str]) -> RuleResult {
    match value {
        Value::Int(i) if i % 2 == 0 => Ok(()),
        Value::Int(_) => Err(RuleError::Constraint(Fault::new("even"))),
        _ => Err(RuleError::Unsupported(kind)),
    }
}

// --- extensibility ---

#[test]
fn test_custom_rule_replaces_builtin() {
    let record = Value::Record(
        Record::new("T").field(Field::new("name", "present").tag("required")),
    );
    assert!(Validator::new().validate(&record).unwrap().is_empty());

    let violations = Validator::new()
        .register_rule("required", always_fails)
        .validate(&record)
        .unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message, "name cannot be empty");
}

#[test]
fn test_register_rules_batch() {
    let validator =
        Validator::new().register_rules([("odd", odd as RuleFn), ("even", even as RuleFn)]);

    let record = Value::Record(
        Record::new("T")
            .field(Field::new("a", 3_i64).tag("odd"))
            .field(Field::new("b", 3_i64).tag("even")),
    );
    let violations = validator.validate(&record).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule, "even");
    // Keys outside the catalog fall back instead of erroring.
    assert_eq!(violations[0].message, "missing translation: even");
}

#[test]
fn test_registry_inspection() {
    let validator = Validator::new();
    assert!(validator.rules().has("required"));
    assert!(validator.rules().has("datetime"));
    assert!(!validator.rules().has("nosuch"));

    let mut registry = build_default_registry();
    assert!(!registry.is_empty());
    registry.remove("phone");
    assert!(!registry.has("phone"));
    assert!(registry.names().contains(&"unique".to_string()));
}

#[test]
fn test_unknown_rule_is_reported_and_evaluation_continues() {
    let record = Value::Record(
        Record::new("T").field(Field::new("name", "xyz").tag("nosuch;len=1,2")),
    );
    let violations = Validator::new().validate(&record).unwrap();
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].kind, ViolationKind::RuleNotFound);
    assert_eq!(violations[0].rule, "nosuch");
    assert_eq!(
        violations[0].message,
        "validation rule `nosuch` does not exist"
    );
    assert_eq!(violations[1].rule, "len");
}

// --- configuration ---

#[test]
fn test_custom_tag_and_title_keys() {
    let field = Field::new("name", "")
        .attr("rules", "required")
        .attr("label", "Nome");
    let record = Value::Record(Record::new("T").field(field));

    // The default keys see no declaration at all.
    assert!(Validator::new().validate(&record).unwrap().is_empty());

    let violations = Validator::new()
        .tag_key("rules")
        .title_key("label")
        .validate(&record)
        .unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message, "Nome cannot be empty");
}

#[test]
fn test_custom_clause_delimiter() {
    let record = Value::Record(
        Record::new("T").field(Field::new("name", "ssssss").tag("required#len=1,5")),
    );
    let violations = Validator::new()
        .clause_delimiter('#')
        .validate(&record)
        .unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule, "len");
}

// --- locales ---

#[test]
fn test_zh_locale_messages() {
    let record = Value::Record(
        Record::new("T")
            .field(Field::new("name", "").tag("required").title("姓名"))
            .field(Field::new("nick", "中文中文中文").tag("len=1,5").title("姓名")),
    );
    let violations = Validator::new().locale("zh").validate(&record).unwrap();
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].message, "姓名不能为空");
    assert_eq!(violations[1].message, "姓名长度必须在1和5之间");
}

#[test]
fn test_unknown_locale_falls_back_to_key() {
    let record = Value::Record(Record::new("T").field(Field::new("name", "").tag("required")));
    let violations = Validator::new().locale("fr").validate(&record).unwrap();
    assert_eq!(violations[0].message, "missing translation: required");
}

#[test]
fn test_custom_catalog_overrides_wording() {
    let mut catalog = Catalog::builtin();
    catalog.insert("en", "required", "{name} is mandatory");

    let record = Value::Record(Record::new("T").field(Field::new("nick", "").tag("required")));
    let violations = Validator::new().catalog(catalog).validate(&record).unwrap();
    assert_eq!(violations[0].message, "nick is mandatory");
}

// --- misconfiguration ---

#[test]
fn test_unsupported_kind_is_an_error_not_a_violation() {
    let record = Value::Record(
        Record::new("Wrap").field(Field::new("class", class("x", 1)).tag("lt=3")),
    );

    let err = Validator::new().validate(&record).unwrap_err();
    match err {
        SieveError::UnsupportedKind {
            rule, kind, path, ..
        } => {
            assert_eq!(rule, "lt");
            assert_eq!(kind, Kind::Record);
            assert_eq!(path.to_string(), "class");
        }
    }

    assert!(Validator::new().validate_fail_fast(&record).is_err());
}

// --- wire format ---

#[test]
fn test_violation_serde_round_trip() {
    let violations = violations_for(Field::new("name", "").tag("required"));
    let encoded = serde_json::to_string(&violations[0]).unwrap();
    let decoded: sieve::Violation = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, violations[0]);
}
