//! Callable shapes for filters, rules and callbacks.
//!
//! Everything the pipeline invokes is stored as an `Arc<dyn Fn ...>` so that a
//! configured pipeline can be cloned cheaply and shared between validator
//! copies. Rules see a read-only [`RuleContext`]; callbacks get a
//! [`CallbackContext`] that can also record errors.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::config::ValidatorConfig;
use crate::foundation::value::{Record, Value};
use crate::messages::ErrorMap;

/// Arguments parsed from a bracketed rule spec such as `length[4,10]`.
///
/// Typically zero to two entries.
pub type RuleArgs = SmallVec<[String; 2]>;

/// A rule predicate: `(value, args, context) -> passed`.
pub type RuleFn = Arc<dyn Fn(&Value, &[String], &RuleContext<'_>) -> bool + Send + Sync>;

/// A scalar value transform. Lists are mapped element-wise by the pipeline.
pub type FilterFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// A callback: `(context, field)`. Signals failure through
/// [`CallbackContext::add_error`].
pub type CallbackFn = Arc<dyn Fn(&mut CallbackContext<'_>, &str) + Send + Sync>;

// ============================================================================
// MX RESOLVER
// ============================================================================

/// Answers whether a mail domain publishes an MX record.
///
/// Used by the `email_domain` rule. When a validator has no resolver the rule
/// passes, since the domain cannot be proven invalid. Implementations may block;
/// callers needing a time bound should enforce it inside the resolver.
pub trait MxResolver: Send + Sync {
    /// Returns `true` if `domain` has at least one MX record.
    fn has_mx_record(&self, domain: &str) -> bool;
}

impl<F> MxResolver for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn has_mx_record(&self, domain: &str) -> bool {
        self(domain)
    }
}

// ============================================================================
// RULE CONTEXT
// ============================================================================

/// Read-only view handed to every rule invocation.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    record: &'a Record,
    config: &'a ValidatorConfig,
    resolver: Option<&'a dyn MxResolver>,
}

impl<'a> RuleContext<'a> {
    /// Creates a context over `record`.
    pub fn new(
        record: &'a Record,
        config: &'a ValidatorConfig,
        resolver: Option<&'a dyn MxResolver>,
    ) -> Self {
        Self {
            record,
            config,
            resolver,
        }
    }

    /// The working record, including values already changed by pre-filters.
    pub fn record(&self) -> &'a Record {
        self.record
    }

    /// The current value of a sibling field (`Null` when missing).
    pub fn value(&self, field: &str) -> &'a Value {
        self.record.value(field)
    }

    /// The validator configuration.
    pub fn config(&self) -> &'a ValidatorConfig {
        self.config
    }

    /// The MX resolver, if one was configured.
    pub fn resolver(&self) -> Option<&'a dyn MxResolver> {
        self.resolver
    }
}

impl std::fmt::Debug for RuleContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleContext")
            .field("record", &self.record)
            .field("config", &self.config)
            .field("resolver", &self.resolver.map(|_| "<resolver>"))
            .finish()
    }
}

// ============================================================================
// CALLBACK CONTEXT
// ============================================================================

/// View handed to callbacks: the whole record plus write access to errors.
#[derive(Debug)]
pub struct CallbackContext<'a> {
    record: &'a Record,
    errors: &'a mut ErrorMap,
}

impl<'a> CallbackContext<'a> {
    pub(crate) fn new(record: &'a Record, errors: &'a mut ErrorMap) -> Self {
        Self { record, errors }
    }

    /// The working record.
    pub fn record(&self) -> &Record {
        self.record
    }

    /// The current value of `field` (`Null` when missing).
    pub fn value(&self, field: &str) -> &Value {
        self.record.value(field)
    }

    /// Records `code` for `field`, replacing any earlier code.
    pub fn add_error(&mut self, field: impl Into<String>, code: impl Into<String>) {
        self.errors.insert(field, code);
    }

    /// Whether `field` already failed.
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains(field)
    }
}

// ============================================================================
// TESTS
// ============================================================================
