//! Built-in filters.
//!
//! A filter maps one scalar to another. Strings are transformed; every other
//! scalar passes through unchanged. The pipeline applies filters to list
//! elements one by one, so these functions never see a list.

use crate::foundation::Value;

fn map_str(value: &Value, f: impl FnOnce(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(s)),
        other => other.clone(),
    }
}

/// Strips leading and trailing whitespace.
#[must_use]
pub fn trim(value: &Value) -> Value {
    map_str(value, |s| s.trim().to_owned())
}

/// Strips leading whitespace.
#[must_use]
pub fn ltrim(value: &Value) -> Value {
    map_str(value, |s| s.trim_start().to_owned())
}

/// Strips trailing whitespace.
#[must_use]
pub fn rtrim(value: &Value) -> Value {
    map_str(value, |s| s.trim_end().to_owned())
}

/// Lowercases the whole string.
#[must_use]
pub fn lowercase(value: &Value) -> Value {
    map_str(value, str::to_lowercase)
}

/// Uppercases the whole string.
#[must_use]
pub fn uppercase(value: &Value) -> Value {
    map_str(value, str::to_uppercase)
}

/// Uppercases the first character.
#[must_use]
pub fn ucfirst(value: &Value) -> Value {
    map_str(value, |s| {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    })
}

/// Trims and folds every run of whitespace into a single space.
#[must_use]
pub fn collapse_whitespace(value: &Value) -> Value {
    map_str(value, |s| s.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// The built-in filter table.
pub fn builtin() -> [(&'static str, fn(&Value) -> Value); 7] {
    [
        ("trim", trim),
        ("ltrim", ltrim),
        ("rtrim", rtrim),
        ("lowercase", lowercase),
        ("uppercase", uppercase),
        ("ucfirst", ucfirst),
        ("collapse_whitespace", collapse_whitespace),
    ]
}
