//! Presence and cross-field rules.

use crate::foundation::{Record, Value};

/// Fails for blank values: `Null`, `false`, `""` and the empty list.
///
/// ```rust
/// use formgate_validator::foundation::Value;
/// use formgate_validator::rules::required;
///
/// assert!(!required(&Value::from("")));
/// assert!(required(&Value::from("0")));
/// assert!(required(&Value::from(0)));
/// ```
#[must_use]
pub fn required(value: &Value) -> bool {
    !value.is_blank()
}

/// Passes if `value` is strictly equal to every named field in `record`.
///
/// A missing field compares as `Null`. Type matters: `"1"` does not match `1`.
#[must_use]
pub fn matches<S: AsRef<str>>(value: &Value, record: &Record, fields: &[S]) -> bool {
    fields
        .iter()
        .all(|field| record.value(field.as_ref()) == value)
}

/// Passes if every named field is present and not blank.
#[must_use]
pub fn depends_on<S: AsRef<str>>(record: &Record, fields: &[S]) -> bool {
    fields
        .iter()
        .all(|field| record.get(field.as_ref()).is_some_and(|v| !v.is_blank()))
}

/// Passes if the value is a list.
#[must_use]
pub fn is_array(value: &Value) -> bool {
    value.is_list()
}
