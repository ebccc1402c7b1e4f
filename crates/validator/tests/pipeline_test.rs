//! Stage ordering, short-circuiting and isolation of the validation pipeline.

use formgate_validator::prelude::*;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

fn record(pairs: &[(&str, &str)]) -> Record {
    pairs.iter().map(|&(k, v)| (k, v)).collect()
}

// ============================================================================
// ORDERING
// ============================================================================

#[test]
fn stages_run_in_fixed_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let push = |tag: &'static str| {
        let log = Arc::clone(&log);
        move || log.lock().unwrap().push(tag)
    };

    let (pre, rule, callback, post) = (push("pre"), push("rule"), push("callback"), push("post"));
    let mut validator = Validator::new(record(&[("a", "x")]))
        .post_filter_fn("a", "post", move |v| {
            post();
            v.clone()
        })
        .callback_fn("a", "cb", move |_, _| callback())
        .rule_fn("a", "rule", move |_, _| {
            rule();
            true
        })
        .pre_filter_fn("a", "pre", move |v| {
            pre();
            v.clone()
        });

    assert!(validator.validate());
    assert_eq!(*log.lock().unwrap(), vec!["pre", "rule", "callback", "post"]);
}

#[test]
fn rules_run_in_insertion_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut validator = Validator::new(record(&[("a", "x")]));
    for name in ["first", "second", "third"] {
        let seen = Arc::clone(&seen);
        validator = validator.rule_fn("a", name, move |_, _| {
            seen.lock().unwrap().push(name);
            true
        });
    }

    validator.validate();
    assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn field_names_exclude_wildcard() {
    let validator = Validator::new(Record::new())
        .pre_filter("*", "trim")
        .unwrap()
        .rules("name", ["required"])
        .unwrap()
        .callback("website", "honeypot")
        .unwrap()
        .rule("name", "length[1,10]")
        .unwrap();

    assert_eq!(validator.field_names(), vec!["name", "website"]);
}

// ============================================================================
// SHORT-CIRCUIT
// ============================================================================

#[test]
fn first_failure_wins_and_later_rules_never_run() {
    let ran = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&ran);
    let mut validator = Validator::new(record(&[("code", "ab")]))
        .rule("code", "length[3]")
        .unwrap()
        .rule_fn("code", "side_effect", move |_, _| {
            *flag.lock().unwrap() = true;
            true
        });

    assert!(!validator.validate());
    assert_eq!(validator.errors().get("code"), Some("length"));
    assert!(!*ran.lock().unwrap());
}

#[test]
fn callbacks_skip_failed_fields() {
    let mut validator = Validator::new(record(&[("website", "")]))
        .rule("website", "required")
        .unwrap()
        .callback_fn("website", "always", |ctx, field| ctx.add_error(field, "callback"));

    validator.validate();
    assert_eq!(validator.errors().get("website"), Some("required"));
}

#[test]
fn callbacks_can_flag_other_fields() {
    let mut validator = Validator::new(record(&[("password", "a"), ("confirm", "b")]))
        .callback_fn("confirm", "same_as_password", |ctx, field| {
            if ctx.value(field) != ctx.value("password") {
                ctx.add_error("password", "mismatch");
            }
        });

    assert!(!validator.validate());
    assert_eq!(validator.errors().get("password"), Some("mismatch"));
}

// ============================================================================
// WILDCARD
// ============================================================================

#[test]
fn wildcard_failure_does_not_block_siblings() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let mut validator = Validator::new(record(&[("a", "abc"), ("b", "ab1"), ("c", "xyzw")]))
        .rule("*", "alpha")
        .unwrap()
        .rule_fn("*", "seen", move |value, _| {
            log.lock().unwrap().push(value.to_text().into_owned());
            true
        })
        .rule("*", "length[3]")
        .unwrap();

    assert!(!validator.validate());
    let errors: Vec<_> = validator.errors().iter().collect();
    assert_eq!(errors, vec![("b", "alpha"), ("c", "length")]);
    assert_eq!(*seen.lock().unwrap(), vec!["abc", "xyzw"]);
}

#[test]
fn wildcard_covers_every_record_field() {
    let mut validator = Validator::new(record(&[("a", ""), ("b", "")]))
        .rule("*", "required")
        .unwrap();

    assert!(!validator.validate());
    assert_eq!(validator.errors().len(), 2);
}

#[test]
fn wildcard_and_named_rules_combine() {
    let mut validator = Validator::new(record(&[("name", "Ann"), ("email", "bad")]))
        .rule("*", "required")
        .unwrap()
        .rule("email", "email")
        .unwrap();

    assert!(!validator.validate());
    let errors: Vec<_> = validator.errors().iter().collect();
    assert_eq!(errors, vec![("email", "email")]);
}

// ============================================================================
// PRE-POPULATION & SUBMISSION
// ============================================================================

#[test]
fn missing_fields_are_prepopulated_by_shape() {
    let mut validator = Validator::new(record(&[("other", "x")]))
        .rule("tags", "is_array")
        .unwrap()
        .declare("files", FieldShape::Sequence)
        .rule("name", "alpha")
        .unwrap();

    assert!(validator.validate());
    assert_eq!(validator.record().value("tags"), &Value::List(vec![]));
    assert_eq!(validator.record().value("files"), &Value::List(vec![]));
    assert_eq!(validator.record().get("name"), Some(&Value::Null));
}

#[test]
fn not_submitted_reports_failure_without_errors() {
    let mut validator = Validator::new(Record::new())
        .rule("name", "required")
        .unwrap();

    assert!(!validator.submitted());
    assert!(!validator.validate());
    assert!(validator.errors().is_empty());
}

#[test]
fn post_filters_run_even_after_failure() {
    let mut validator = Validator::new(record(&[("name", "  ann1 ")]))
        .rule("name", "alpha")
        .unwrap()
        .post_filter("name", "trim")
        .unwrap();

    assert!(!validator.validate());
    assert_eq!(validator.record().value("name"), &Value::from("ann1"));
}

// ============================================================================
// COPY ISOLATION
// ============================================================================

#[test]
fn copy_shares_rules_but_not_state() {
    let mut first = Validator::new(record(&[("name", "")]))
        .rule("name", "required")
        .unwrap();
    first.validate();
    first.set_message("name", "missing");

    let mut second = first.copy(record(&[("name", "Ann")]));
    assert!(second.errors().is_empty());
    assert_eq!(second.message("name"), None);
    assert!(second.validate());

    assert_eq!(first.errors().get("name"), Some("required"));
}

#[test]
fn registration_after_copy_is_not_shared() {
    let base = Validator::new(Record::new()).rule("name", "required").unwrap();
    let copy = base.copy(record(&[("name", "Ann")]));
    let extended = base.rule("name", "digit").unwrap();

    let mut copy_run = copy;
    assert!(copy_run.validate());

    let mut extended_run = extended.copy(record(&[("name", "Ann")]));
    assert!(!extended_run.validate());
    assert_eq!(extended_run.errors().get("name"), Some("digit"));
}

// ============================================================================
// REGISTRATION ERRORS
// ============================================================================

#[test]
fn unknown_names_fail_at_registration() {
    let err = Validator::new(Record::new()).rule("a", "no_such_rule").unwrap_err();
    assert_eq!(err, RegistrationError::UnknownRule { name: "no_such_rule".into() });
    assert_eq!(err.code(), "REG_UNKNOWN_RULE");

    assert!(matches!(
        Validator::new(Record::new()).pre_filter("a", "nope"),
        Err(RegistrationError::UnknownFilter { .. })
    ));
    assert!(matches!(
        Validator::new(Record::new()).callback("a", "nope"),
        Err(RegistrationError::UnknownCallback { .. })
    ));
}

#[test]
fn malformed_specs_and_bad_arguments_fail() {
    assert!(matches!(
        Validator::new(Record::new()).rule("a", "length[4,10"),
        Err(RegistrationError::MalformedRuleSpec { .. })
    ));
    assert!(matches!(
        Validator::new(Record::new()).rule("a", "length[four]"),
        Err(RegistrationError::InvalidArguments { .. })
    ));
    assert!(matches!(
        Validator::new(Record::new()).rule("a", "ip[maybe]"),
        Err(RegistrationError::InvalidArguments { .. })
    ));
}

#[test]
fn custom_registry_resolves_extra_names() {
    let mut registry = Registry::builtin();
    registry
        .register_rule(
            RuleDef::new("starts_with", |value, args, _| {
                value.to_text().starts_with(args[0].as_str())
            })
            .with_args(ArgSpec::between(1, 1, ArgKind::Text)),
        )
        .register_filter("strip_dashes", |value: &Value| {
            Value::from(value.to_text().replace('-', ""))
        });

    let mut validator = Validator::with_registry(
        record(&[("sku", "AB-12-34")]),
        registry,
        ValidatorConfig::default(),
    )
    .pre_filter("sku", "strip_dashes")
    .unwrap()
    .rule("sku", "starts_with[AB]")
    .unwrap();

    assert!(validator.validate());
    assert_eq!(validator.record().value("sku"), &Value::from("AB1234"));
}
