//! Property-based tests for formgate-validator.

use formgate_validator::prelude::*;
use formgate_validator::rules;
use proptest::prelude::*;

fn contact_form() -> Validator {
    Validator::new(Record::new())
        .pre_filter("*", "trim")
        .and_then(|v| v.rule("name", "required"))
        .and_then(|v| v.rules("email", ["required", "email"]))
        .and_then(|v| v.rules("phone", ["phone"]))
        .and_then(|v| v.callback("honeypot", "honeypot"))
        .unwrap()
}

// ============================================================================
// DETERMINISM: copies of one configuration agree
// ============================================================================

proptest! {
    #[test]
    fn copies_validate_identically(
        name in ".{0,12}",
        email in "[a-z@.]{0,16}",
        phone in "[0-9 ()-]{0,16}",
        honeypot in "[a-z]{0,3}",
    ) {
        let base = contact_form();
        let input: Record = [
            ("name", name),
            ("email", email),
            ("phone", phone),
            ("honeypot", honeypot),
        ]
        .into_iter()
        .collect();

        let mut a = base.copy(input.clone());
        let mut b = base.copy(input);
        prop_assert_eq!(a.validate(), b.validate());
        prop_assert_eq!(a.errors(), b.errors());
        prop_assert_eq!(a.record(), b.record());
    }

    #[test]
    fn validating_twice_changes_nothing(name in ".{0,12}", email in "[a-z@.]{0,16}") {
        let input: Record = [("name", name), ("email", email)].into_iter().collect();
        let mut validator = contact_form().copy(input);

        let first = validator.validate();
        let errors = validator.errors().clone();
        let record = validator.record().clone();

        prop_assert_eq!(validator.validate(), first);
        prop_assert_eq!(validator.errors(), &errors);
        prop_assert_eq!(validator.record(), &record);
    }
}

// ============================================================================
// RULE LAWS
// ============================================================================

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::from),
        ".{0,8}".prop_map(Value::from),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![scalar(), prop::collection::vec(scalar(), 0..3).prop_map(Value::List)]
}

proptest! {
    #[test]
    fn required_fails_exactly_on_blank(v in value()) {
        prop_assert_eq!(rules::required(&v), !v.is_blank());
    }

    #[test]
    fn phone_counts_only_digits(noise in "[ ()+.-]{0,6}", digits in "[0-9]{0,14}") {
        let mixed: String = digits
            .chars()
            .zip(noise.chars().cycle())
            .flat_map(|(d, n)| [d, n])
            .collect();
        let input = if noise.is_empty() { digits.clone() } else { mixed };
        let expected = [7, 10, 11].contains(&digits.len());
        prop_assert_eq!(rules::phone(&input, &[7, 10, 11]), expected);
    }

    #[test]
    fn trim_filter_is_idempotent(s in ".{0,20}") {
        let once = formgate_validator::filters::trim(&Value::from(s));
        let twice = formgate_validator::filters::trim(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn length_range_matches_char_count(s in ".{0,15}", min in 0usize..8, extra in 0usize..8) {
        let bounds = rules::LengthBounds::Range { min, max: min + extra };
        let n = s.chars().count();
        prop_assert_eq!(rules::length(&Value::from(s), bounds), n >= min && n <= min + extra);
    }
}
