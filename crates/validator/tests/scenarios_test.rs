//! End-to-end contact form scenarios.

use formgate_validator::prelude::*;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

fn contact_form(record: Record) -> Validator {
    Validator::new(record)
        .pre_filter("*", "trim")
        .and_then(|v| v.rule("name", "required"))
        .and_then(|v| v.rules("email", ["required", "email"]))
        .and_then(|v| v.callback("honeypot", "honeypot"))
        .unwrap()
}

fn record(pairs: &[(&str, &str)]) -> Record {
    pairs.iter().map(|&(k, v)| (k, v)).collect()
}

#[fixture]
fn table() -> MessageTable {
    MessageTable::new()
        .with("name", "required", "Please enter your name")
        .with("email", "required", "Please enter your email")
        .with("email", "email", "Please enter a valid email")
        .with("honeypot", "invalid", "Spam detected")
}

#[test]
fn bot_submission_with_bad_email() {
    let mut validator = contact_form(record(&[
        ("name", ""),
        ("email", "bad"),
        ("honeypot", "filled"),
    ]));

    assert!(!validator.validate());
    let errors: Vec<_> = validator.errors().iter().collect();
    assert_eq!(
        errors,
        vec![("name", "required"), ("email", "email"), ("honeypot", "invalid")]
    );
}

#[test]
fn blank_email_reports_required_not_format() {
    let mut validator = contact_form(record(&[
        ("name", ""),
        ("email", ""),
        ("honeypot", "filled"),
    ]));

    assert!(!validator.validate());
    let errors: Vec<_> = validator.errors().iter().collect();
    assert_eq!(
        errors,
        vec![("name", "required"), ("email", "required"), ("honeypot", "invalid")]
    );
}

#[test]
fn valid_submission_passes() {
    let mut validator = contact_form(record(&[
        ("name", "Ann"),
        ("email", "ann@x.com"),
        ("honeypot", ""),
    ]));

    assert!(validator.validate());
    assert!(validator.errors().is_empty());

    let outcome = validator.outcome();
    assert!(outcome.success);
    assert_eq!(outcome.record.value("name"), &Value::from("Ann"));
}

#[test]
fn whitespace_only_name_is_required_after_trim() {
    let mut validator = contact_form(record(&[
        ("name", "   "),
        ("email", "ann@x.com"),
        ("honeypot", ""),
    ]));

    assert!(!validator.validate());
    assert_eq!(validator.errors().get("name"), Some("required"));
}

#[rstest]
fn errors_render_through_message_table(table: MessageTable) {
    let mut validator = contact_form(record(&[
        ("name", ""),
        ("email", "bad"),
        ("honeypot", ""),
    ]));
    validator.validate();

    let messages = validator.messages(&table).unwrap();
    let rendered: Vec<_> = messages.iter().map(|(f, m)| (f.as_str(), m.as_str())).collect();
    assert_eq!(
        rendered,
        vec![
            ("name", "Please enter your name"),
            ("email", "Please enter a valid email"),
        ]
    );
}

#[rstest]
fn incomplete_message_table_is_caller_error(table: MessageTable) {
    let mut validator = contact_form(record(&[("name", "Ann"), ("email", "ann@x.com")]));
    validator.add_error("phone", "phone");

    validator.validate();
    let err = validator.messages(&table).unwrap_err();
    assert_eq!(
        err,
        MessageError::MissingMessage {
            field: "phone".into(),
            code: "phone".into(),
        }
    );
}

#[test]
fn trim_prefilter_is_idempotent() {
    let base = contact_form(Record::new());

    let mut first = base.copy(record(&[("name", "  hi  "), ("email", "hi@x.com")]));
    first.validate();
    assert_eq!(first.record().value("name"), &Value::from("hi"));

    let mut second = base.copy(first.record().clone());
    second.validate();
    assert_eq!(second.record().value("name"), &Value::from("hi"));
}

#[test]
fn repeated_validation_on_copies_is_deterministic() {
    let base = contact_form(Record::new());
    let input = record(&[("name", ""), ("email", "nope"), ("honeypot", "x")]);

    let mut a = base.copy(input.clone());
    let mut b = base.copy(input);
    assert_eq!(a.validate(), b.validate());
    assert_eq!(a.errors(), b.errors());
}

#[test]
fn decimal_separator_comes_from_config() {
    let config = ValidatorConfig::from_json_str(r#"{ "decimal_separator": "," }"#).unwrap();
    let mut validator = Validator::with_config(record(&[("price", "12,50")]), config)
        .rule("price", "numeric")
        .unwrap();
    assert!(validator.validate());

    let mut dotted = validator.copy(record(&[("price", "12.50")]));
    assert!(!dotted.validate());
    assert_eq!(dotted.errors().get("price"), Some("numeric"));
}

#[test]
fn matches_compares_with_sibling() {
    let form = Validator::new(Record::new())
        .rule("email", "required")
        .and_then(|v| v.rules("confirm", ["required", "matches[email]"]))
        .unwrap();

    let mut same = form.copy(record(&[("email", "x@example.com"), ("confirm", "x@example.com")]));
    assert!(same.validate());

    let mut different = form.copy(record(&[("email", "x@example.com"), ("confirm", "y@example.com")]));
    assert!(!different.validate());
    assert_eq!(different.errors().get("confirm"), Some("matches"));
}

#[test]
fn email_domain_uses_resolver() {
    let form = Validator::new(Record::new())
        .rules("email", ["email", "email_domain"])
        .unwrap()
        .resolver(|domain: &str| domain == "example.com");

    let mut known = form.copy(record(&[("email", "ann@example.com")]));
    assert!(known.validate());

    let mut unknown = form.copy(record(&[("email", "ann@nowhere.org")]));
    assert!(!unknown.validate());
    assert_eq!(unknown.errors().get("email"), Some("email_domain"));
}

#[test]
fn array_fields_filter_and_validate_element_wise() {
    let mut input = Record::new();
    input.insert("tags", vec![" Rust ", " Forms"]);

    let mut validator = Validator::new(input)
        .pre_filter("tags", "trim")
        .and_then(|v| v.post_filter("tags", "lowercase"))
        .and_then(|v| v.rules("tags", ["is_array"]))
        .unwrap();

    assert!(validator.validate());
    assert_eq!(validator.record().value("tags"), &Value::from(vec!["rust", "forms"]));
}

#[test]
fn outcome_serializes_in_field_order() {
    let mut validator = contact_form(record(&[
        ("name", ""),
        ("email", "ann@x.com"),
        ("honeypot", ""),
    ]));
    validator.validate();

    let json = serde_json::to_string(&validator.outcome()).unwrap();
    assert_eq!(
        json,
        r#"{"success":false,"errors":{"name":"required"},"record":{"name":"","email":"ann@x.com","honeypot":""}}"#
    );
}
