//! Validator configuration.
//!
//! Everything that would otherwise be ambient state (locale decimal point,
//! which rules run on empty values, default phone lengths) is spelled out here.
//! The struct deserializes with defaults for every missing key, so it can be
//! loaded from any serde format:
//!
//! ```rust
//! use formgate_validator::config::ValidatorConfig;
//!
//! let config = ValidatorConfig::from_json_str(r#"{ "decimal_separator": "," }"#).unwrap();
//! assert_eq!(config.decimal_separator, ',');
//! assert_eq!(config.phone_lengths, vec![7, 10, 11]);
//! ```

use serde::{Deserialize, Serialize};

/// Rules that always run, even when the field value is blank.
pub const DEFAULT_EMPTY_RULES: &[&str] = &["required", "matches"];

/// Digit counts accepted by `phone` when no lengths are given.
pub const DEFAULT_PHONE_LENGTHS: &[usize] = &[7, 10, 11];

/// Tunable behaviour of a validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Decimal separator accepted by the `numeric` rule.
    pub decimal_separator: char,

    /// Extra rule names that run on blank values, on top of
    /// [`DEFAULT_EMPTY_RULES`].
    pub empty_rules: Vec<String>,

    /// Digit counts accepted by `phone` when the rule has no arguments.
    pub phone_lengths: Vec<usize>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            empty_rules: Vec::new(),
            phone_lengths: DEFAULT_PHONE_LENGTHS.to_vec(),
        }
    }
}

impl ValidatorConfig {
    /// Parses a configuration from JSON, filling in defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the decimal separator.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Adds a rule that runs on blank values.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_empty_rule(mut self, rule: impl Into<String>) -> Self {
        self.empty_rules.push(rule.into());
        self
    }

    /// Replaces the default phone lengths.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_phone_lengths(mut self, lengths: impl IntoIterator<Item = usize>) -> Self {
        self.phone_lengths = lengths.into_iter().collect();
        self
    }

    /// Whether `rule` runs even when the value is blank.
    #[must_use]
    pub fn is_empty_exempt(&self, rule: &str) -> bool {
        DEFAULT_EMPTY_RULES.contains(&rule) || self.empty_rules.iter().any(|r| r == rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ValidatorConfig::default();
        assert_eq!(config.decimal_separator, '.');
        assert!(config.is_empty_exempt("required"));
        assert!(config.is_empty_exempt("matches"));
        assert!(!config.is_empty_exempt("email"));
    }

    #[test]
    fn extra_empty_rules_keep_defaults() {
        let config = ValidatorConfig::from_json_str(r#"{ "empty_rules": ["depends_on"] }"#).unwrap();
        assert!(config.is_empty_exempt("depends_on"));
        assert!(config.is_empty_exempt("required"));
    }

    #[test]
    fn builder_methods() {
        let config = ValidatorConfig::default()
            .with_decimal_separator(',')
            .with_empty_rule("chars")
            .with_phone_lengths([10]);
        assert_eq!(config.decimal_separator, ',');
        assert!(config.is_empty_exempt("chars"));
        assert_eq!(config.phone_lengths, vec![10]);
    }
}
