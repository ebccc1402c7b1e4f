//! Name → callable tables for rules, filters and callbacks.
//!
//! Every reference a validator is configured with is resolved here, at
//! registration time. An unknown name or ill-fitting rule arguments fail right
//! away with a [`RegistrationError`] instead of surfacing on the first
//! submission.
//!
//! ```rust
//! use formgate_validator::registry::{Registry, RuleDef};
//!
//! let mut registry = Registry::builtin();
//! registry.register_rule(RuleDef::new("even_length", |value, _, _| {
//!     value.to_text().len() % 2 == 0
//! }));
//! assert!(registry.rule("even_length").is_ok());
//! assert!(registry.rule("odd_length").is_err());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::foundation::{
    CallbackContext, CallbackFn, FilterFn, RegistrationError, RegistrationResult, RuleContext,
    RuleFn, Value,
};

static BUILTIN: LazyLock<Arc<Registry>> = LazyLock::new(|| {
    let mut registry = Registry::empty();
    for def in crate::rules::builtin() {
        registry.register_rule(def);
    }
    for (name, filter) in crate::filters::builtin() {
        registry.register_filter(name, filter);
    }
    for (name, callback) in crate::callbacks::builtin() {
        registry.register_callback(name, callback);
    }
    Arc::new(registry)
});

// ============================================================================
// FIELD SHAPE
// ============================================================================

/// Expected shape of a field's value, used to pre-populate missing fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldShape {
    /// A single value; missing fields become `Null`.
    #[default]
    Scalar,
    /// A list of values; missing fields become an empty list.
    Sequence,
}

impl FieldShape {
    /// The placeholder for a missing field of this shape.
    #[must_use]
    pub fn placeholder(self) -> Value {
        match self {
            Self::Scalar => Value::Null,
            Self::Sequence => Value::List(Vec::new()),
        }
    }
}

// ============================================================================
// ARGUMENT SPEC
// ============================================================================

/// What each bracketed argument of a rule must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Any string (field names, character sets).
    Text,
    /// A non-negative integer.
    Unsigned,
    /// A boolean flag: `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`.
    Flag,
}

/// Accepted argument count and kind for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    min: usize,
    max: Option<usize>,
    kind: ArgKind,
}

impl ArgSpec {
    /// The rule takes no arguments.
    pub const NONE: Self = Self {
        min: 0,
        max: Some(0),
        kind: ArgKind::Text,
    };

    /// Between `min` and `max` arguments (inclusive) of `kind`.
    #[must_use]
    pub const fn between(min: usize, max: usize, kind: ArgKind) -> Self {
        Self {
            min,
            max: Some(max),
            kind,
        }
    }

    /// At least `min` arguments of `kind`.
    #[must_use]
    pub const fn at_least(min: usize, kind: ArgKind) -> Self {
        Self {
            min,
            max: None,
            kind,
        }
    }

    /// Checks `args` against this spec on behalf of `rule`.
    pub fn check(&self, rule: &str, args: &[String]) -> RegistrationResult<()> {
        let count = args.len();
        let within = count >= self.min && self.max.is_none_or(|max| count <= max);
        if !within {
            let expected = match self.max {
                Some(0) => "no arguments".to_owned(),
                Some(max) if max == self.min => format!("exactly {max} argument(s)"),
                Some(max) => format!("{} to {max} arguments", self.min),
                None => format!("at least {} argument(s)", self.min),
            };
            return Err(RegistrationError::invalid_args(
                rule,
                format!("expected {expected}, got {count}"),
            ));
        }

        for arg in args {
            let ok = match self.kind {
                ArgKind::Text => true,
                ArgKind::Unsigned => arg.trim().parse::<usize>().is_ok(),
                ArgKind::Flag => parse_flag(arg).is_some(),
            };
            if !ok {
                return Err(RegistrationError::invalid_args(
                    rule,
                    format!("`{arg}` is not a valid {:?} argument", self.kind),
                ));
            }
        }
        Ok(())
    }
}

/// Parses a flag argument.
#[must_use]
pub fn parse_flag(arg: &str) -> Option<bool> {
    match arg.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ============================================================================
// RULE DEFINITION
// ============================================================================

/// A named rule together with its argument contract.
#[derive(Clone)]
pub struct RuleDef {
    name: String,
    check: RuleFn,
    args: ArgSpec,
    shape: Option<FieldShape>,
}

impl RuleDef {
    /// Creates a rule that takes no arguments.
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value, &[String], &RuleContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
            args: ArgSpec::NONE,
            shape: None,
        }
    }

    /// Sets the argument contract.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_args(mut self, args: ArgSpec) -> Self {
        self.args = args;
        self
    }

    /// Declares the shape of any field this rule is registered on.
    #[must_use = "builder methods must be chained or built"]
    pub fn declaring(mut self, shape: FieldShape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Rule name (the error code it produces).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The predicate.
    pub fn check(&self) -> &RuleFn {
        &self.check
    }

    /// The argument contract.
    pub fn args(&self) -> ArgSpec {
        self.args
    }

    /// The field shape this rule declares, if any.
    pub fn shape(&self) -> Option<FieldShape> {
        self.shape
    }
}

impl fmt::Debug for RuleDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDef")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Lookup tables for rules, filters and callbacks.
#[derive(Clone, Default)]
pub struct Registry {
    rules: HashMap<String, RuleDef>,
    filters: HashMap<String, FilterFn>,
    callbacks: HashMap<String, CallbackFn>,
}

impl Registry {
    /// A registry with nothing in it.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding the built-in rules, filters and callbacks.
    #[must_use]
    pub fn builtin() -> Self {
        Registry::clone(&BUILTIN)
    }

    /// The shared built-in registry.
    pub(crate) fn shared_builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Adds or replaces a rule.
    pub fn register_rule(&mut self, def: RuleDef) -> &mut Self {
        tracing::trace!(rule = %def.name, "registering rule");
        self.rules.insert(def.name.clone(), def);
        self
    }

    /// Adds or replaces a filter.
    pub fn register_filter<F>(&mut self, name: impl Into<String>, filter: F) -> &mut Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.filters.insert(name.into(), Arc::new(filter));
        self
    }

    /// Adds or replaces a callback.
    pub fn register_callback<F>(&mut self, name: impl Into<String>, callback: F) -> &mut Self
    where
        F: Fn(&mut CallbackContext<'_>, &str) + Send + Sync + 'static,
    {
        self.callbacks.insert(name.into(), Arc::new(callback));
        self
    }

    /// Resolves a rule by name.
    pub fn rule(&self, name: &str) -> RegistrationResult<&RuleDef> {
        self.rules
            .get(name)
            .ok_or_else(|| RegistrationError::UnknownRule {
                name: name.to_owned(),
            })
    }

    /// Resolves a filter by name.
    pub fn filter(&self, name: &str) -> RegistrationResult<FilterFn> {
        self.filters
            .get(name)
            .cloned()
            .ok_or_else(|| RegistrationError::UnknownFilter {
                name: name.to_owned(),
            })
    }

    /// Resolves a callback by name.
    pub fn callback(&self, name: &str) -> RegistrationResult<CallbackFn> {
        self.callbacks
            .get(name)
            .cloned()
            .ok_or_else(|| RegistrationError::UnknownCallback {
                name: name.to_owned(),
            })
    }

    /// All rule names, sorted.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut filters: Vec<_> = self.filters.keys().collect();
        filters.sort_unstable();
        let mut callbacks: Vec<_> = self.callbacks.keys().collect();
        callbacks.sort_unstable();

        f.debug_struct("Registry")
            .field("rules", &self.rule_names())
            .field("filters", &filters)
            .field("callbacks", &callbacks)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn builtin_contains_library() {
        let registry = Registry::builtin();
        for name in [
            "required",
            "matches",
            "length",
            "depends_on",
            "chars",
            "email",
            "email_rfc",
            "email_domain",
            "url",
            "ip",
            "phone",
            "date",
            "alpha",
            "alpha_numeric",
            "alpha_dash",
            "digit",
            "numeric",
            "standard_text",
            "decimal",
            "is_array",
        ] {
            assert!(registry.rule(name).is_ok(), "missing rule {name}");
        }
        assert!(registry.filter("trim").is_ok());
        assert!(registry.callback("honeypot").is_ok());
    }

    #[test]
    fn unknown_names_fail() {
        let registry = Registry::builtin();
        assert_eq!(
            registry.rule("nope").unwrap_err(),
            RegistrationError::UnknownRule {
                name: "nope".into()
            }
        );
        assert!(matches!(
            registry.filter("nope"),
            Err(RegistrationError::UnknownFilter { .. })
        ));
        assert!(matches!(
            registry.callback("nope"),
            Err(RegistrationError::UnknownCallback { .. })
        ));
    }

    #[test]
    fn is_array_declares_sequence() {
        let registry = Registry::builtin();
        assert_eq!(
            registry.rule("is_array").unwrap().shape(),
            Some(FieldShape::Sequence)
        );
        assert_eq!(registry.rule("required").unwrap().shape(), None);
    }

    #[rstest]
    #[case(ArgSpec::NONE, &[], true)]
    #[case(ArgSpec::NONE, &["x"], false)]
    #[case(ArgSpec::between(1, 2, ArgKind::Unsigned), &["4", "10"], true)]
    #[case(ArgSpec::between(1, 2, ArgKind::Unsigned), &["4", "ten"], false)]
    #[case(ArgSpec::between(1, 2, ArgKind::Unsigned), &["1", "2", "3"], false)]
    #[case(ArgSpec::at_least(1, ArgKind::Text), &[], false)]
    #[case(ArgSpec::at_least(1, ArgKind::Text), &["a", "b", "c"], true)]
    #[case(ArgSpec::between(0, 2, ArgKind::Flag), &["TRUE", "off"], true)]
    #[case(ArgSpec::between(0, 2, ArgKind::Flag), &["maybe"], false)]
    fn arg_spec_check(#[case] spec: ArgSpec, #[case] given: &[&str], #[case] ok: bool) {
        assert_eq!(spec.check("rule", &args(given)).is_ok(), ok);
    }

    #[test]
    fn placeholders() {
        assert_eq!(FieldShape::Scalar.placeholder(), Value::Null);
        assert_eq!(FieldShape::Sequence.placeholder(), Value::List(vec![]));
    }
}
