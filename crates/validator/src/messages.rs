//! Error codes and their human-readable messages.
//!
//! A validation run produces an [`ErrorMap`]: one code per failed field. Codes
//! are turned into text by joining them against a caller-owned
//! [`MessageTable`]; the engine never owns or mutates message text.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::foundation::MessageError;

// ============================================================================
// ERROR MAP
// ============================================================================

/// Ordered `field -> error code` map.
///
/// The pipeline only records the first failure of a field; [`insert`] itself
/// overwrites, which is what [`add_error`](crate::Validator::add_error) relies on.
///
/// [`insert`]: ErrorMap::insert
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap {
    errors: IndexMap<String, String>,
}

impl ErrorMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the code for `field`, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, code: impl Into<String>) {
        self.errors.insert(field.into(), code.into());
    }

    /// The code recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Whether `field` has an error.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Iterates `(field, code)` in the order errors were first recorded.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(f, c)| (f.as_str(), c.as_str()))
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Joins every error against `table`.
    ///
    /// The caller must supply a message for every field and code pair that can
    /// occur; the first gap is reported as [`MessageError::MissingMessage`].
    pub fn render(&self, table: &MessageTable) -> Result<IndexMap<String, String>, MessageError> {
        self.errors
            .iter()
            .map(|(field, code)| {
                table
                    .get(field, code)
                    .map(|message| (field.clone(), message.to_owned()))
                    .ok_or_else(|| MessageError::MissingMessage {
                        field: field.clone(),
                        code: code.clone(),
                    })
            })
            .collect()
    }
}

impl<F, C> FromIterator<(F, C)> for ErrorMap
where
    F: Into<String>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, C)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (field, code) in iter {
            map.insert(field, code);
        }
        map
    }
}

// ============================================================================
// MESSAGE TABLE
// ============================================================================

/// Caller-supplied `field -> code -> message` lookup.
///
/// ```rust
/// use formgate_validator::messages::MessageTable;
///
/// let table = MessageTable::new()
///     .with("email", "required", "Email is required")
///     .with("email", "email", "Email is invalid");
/// assert_eq!(table.get("email", "email"), Some("Email is invalid"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTable {
    fields: HashMap<String, HashMap<String, String>>,
}

impl MessageTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message and returns the table.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(
        mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.insert(field, code, message);
        self
    }

    /// Adds or replaces a message.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.fields
            .entry(field.into())
            .or_default()
            .insert(code.into(), message.into());
    }

    /// Looks up the message for `code` on `field`.
    #[must_use]
    pub fn get(&self, field: &str, code: &str) -> Option<&str> {
        self.fields.get(field)?.get(code).map(String::as_str)
    }
}

// ============================================================================
// TESTS
// ============================================================================
