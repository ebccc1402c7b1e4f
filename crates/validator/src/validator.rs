//! The [`Validator`]: configure, validate, inspect.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::ValidatorConfig;
use crate::foundation::{
    CallbackContext, CallbackFn, FilterFn, MessageError, MxResolver, Record, RegistrationResult,
    RuleContext, RuleFn, Value,
};
use crate::messages::{ErrorMap, MessageTable};
use crate::pipeline::{FieldTarget, FilterStage, Pipeline};
use crate::registry::{FieldShape, Registry};
use crate::spec::RuleSpec;

/// Result of a validation run, ready to hand to whatever consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// `true` when the record was submitted and every field passed.
    pub success: bool,
    /// First failing rule or callback code per field.
    pub errors: ErrorMap,
    /// The working record after all filters ran.
    pub record: Record,
}

/// Validates one record against a configured set of filters, rules and
/// callbacks.
///
/// Registration methods consume and return the validator, so a configuration
/// reads as one chain. Methods that resolve names return a
/// [`RegistrationResult`] and chain with `?`:
///
/// ```rust
/// use formgate_validator::Validator;
/// use formgate_validator::foundation::Record;
///
/// # fn main() -> Result<(), formgate_validator::foundation::RegistrationError> {
/// let record: Record = [("name", "  Ann "), ("email", "ann@example.com")]
///     .into_iter()
///     .collect();
///
/// let mut validator = Validator::new(record)
///     .pre_filter("*", "trim")?
///     .rules("name", ["required", "length[2,40]"])?
///     .rules("email", ["required", "email"])?;
///
/// assert!(validator.validate());
/// assert_eq!(validator.record().value("name").to_text(), "Ann");
/// # Ok(())
/// # }
/// ```
///
/// The configuration lives behind an `Arc`: [`copy`](Self::copy) and `clone`
/// share it, and registering on a shared configuration clones it first, so a
/// copy never sees rules added to its source afterwards.
#[derive(Debug)]
pub struct Validator {
    pipeline: Arc<Pipeline>,
    record: Record,
    errors: ErrorMap,
    messages: IndexMap<String, String>,
    submitted: bool,
    ran: bool,
}

impl Validator {
    /// Creates a validator over `record` with the built-in registry and
    /// default configuration.
    ///
    /// The record counts as submitted when it has at least one field.
    #[must_use]
    pub fn new(record: Record) -> Self {
        Self::with_pipeline(record, Arc::new(Pipeline::default()))
    }

    /// Creates a validator with a custom configuration.
    #[must_use]
    pub fn with_config(record: Record, config: ValidatorConfig) -> Self {
        let pipeline = Pipeline::new(Registry::shared_builtin(), config);
        Self::with_pipeline(record, Arc::new(pipeline))
    }

    /// Creates a validator that resolves names against `registry`.
    #[must_use]
    pub fn with_registry(record: Record, registry: Registry, config: ValidatorConfig) -> Self {
        Self::with_pipeline(record, Arc::new(Pipeline::new(Arc::new(registry), config)))
    }

    fn with_pipeline(record: Record, pipeline: Arc<Pipeline>) -> Self {
        let submitted = !record.is_empty();
        Self {
            pipeline,
            record,
            errors: ErrorMap::new(),
            messages: IndexMap::new(),
            submitted,
            ran: false,
        }
    }

    /// A new validator over `record` sharing this configuration.
    ///
    /// Errors, messages and the submitted flag start fresh.
    #[must_use]
    pub fn copy(&self, record: Record) -> Self {
        tracing::debug!(fields = record.len(), "validator copied");
        Self::with_pipeline(record, Arc::clone(&self.pipeline))
    }

    fn configure(&mut self) -> &mut Pipeline {
        Arc::make_mut(&mut self.pipeline)
    }

    // ========================================================================
    // CONFIGURATION
    // ========================================================================

    /// Sets the resolver used by the `email_domain` rule.
    pub fn resolver(mut self, resolver: impl MxResolver + 'static) -> Self {
        self.configure().set_resolver(Arc::new(resolver));
        self
    }

    /// Lets the named rules run on blank values too.
    pub fn allow_empty_rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for rule in rules {
            self.configure().allow_empty_rule(rule.into());
        }
        self
    }

    /// Declares the shape of `field`, used to fill it in when missing.
    pub fn declare(mut self, field: impl Into<String>, shape: FieldShape) -> Self {
        self.configure().declare(field.into(), shape);
        self
    }

    /// Adds a registered filter that runs before rules.
    pub fn pre_filter(
        mut self,
        target: impl Into<FieldTarget>,
        filter: &str,
    ) -> RegistrationResult<Self> {
        self.configure()
            .add_filter(FilterStage::Pre, target.into(), filter)?;
        Ok(self)
    }

    /// Adds a registered filter that runs after callbacks.
    pub fn post_filter(
        mut self,
        target: impl Into<FieldTarget>,
        filter: &str,
    ) -> RegistrationResult<Self> {
        self.configure()
            .add_filter(FilterStage::Post, target.into(), filter)?;
        Ok(self)
    }

    /// Adds a closure as a pre-filter.
    pub fn pre_filter_fn<F>(
        mut self,
        target: impl Into<FieldTarget>,
        name: impl Into<String>,
        filter: F,
    ) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        let filter: FilterFn = Arc::new(filter);
        self.configure()
            .add_filter_fn(FilterStage::Pre, target.into(), name.into(), filter);
        self
    }

    /// Adds a closure as a post-filter.
    pub fn post_filter_fn<F>(
        mut self,
        target: impl Into<FieldTarget>,
        name: impl Into<String>,
        filter: F,
    ) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        let filter: FilterFn = Arc::new(filter);
        self.configure()
            .add_filter_fn(FilterStage::Post, target.into(), name.into(), filter);
        self
    }

    /// Adds one rule from its textual spec, e.g. `"length[4,10]"`.
    pub fn rule(self, target: impl Into<FieldTarget>, spec: &str) -> RegistrationResult<Self> {
        self.rules(target, [spec])
    }

    /// Adds rules in order. On error nothing from this call is kept.
    pub fn rules<I>(mut self, target: impl Into<FieldTarget>, specs: I) -> RegistrationResult<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let target = target.into();
        for spec in specs {
            let spec = RuleSpec::parse(spec.as_ref())?;
            self.configure().add_rule(target.clone(), spec)?;
        }
        Ok(self)
    }

    /// Adds a closure as a rule. `name` is the error code it records.
    pub fn rule_fn<F>(mut self, target: impl Into<FieldTarget>, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value, &RuleContext<'_>) -> bool + Send + Sync + 'static,
    {
        let check: RuleFn =
            Arc::new(move |value: &Value, _: &[String], ctx: &RuleContext<'_>| check(value, ctx));
        self.configure()
            .add_rule_fn(target.into(), name.into(), check);
        self
    }

    /// Adds registered callbacks in order.
    pub fn callbacks<I>(mut self, target: impl Into<FieldTarget>, names: I) -> RegistrationResult<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let target = target.into();
        for name in names {
            self.configure().add_callback(target.clone(), name.as_ref())?;
        }
        Ok(self)
    }

    /// Adds one registered callback.
    pub fn callback(self, target: impl Into<FieldTarget>, name: &str) -> RegistrationResult<Self> {
        self.callbacks(target, [name])
    }

    /// Adds a closure as a callback.
    pub fn callback_fn<F>(
        mut self,
        target: impl Into<FieldTarget>,
        name: impl Into<String>,
        call: F,
    ) -> Self
    where
        F: Fn(&mut CallbackContext<'_>, &str) + Send + Sync + 'static,
    {
        let call: CallbackFn = Arc::new(call);
        self.configure()
            .add_callback_fn(target.into(), name.into(), call);
        self
    }

    // ========================================================================
    // VALIDATION
    // ========================================================================

    /// Runs the pipeline. Returns `true` when every field passed.
    ///
    /// A record that was not submitted never passes and gets no errors.
    pub fn validate(&mut self) -> bool {
        self.ran = true;
        self.pipeline
            .run(&mut self.record, &mut self.errors, self.submitted)
    }

    /// Whether the record counts as submitted.
    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// Overrides the submitted flag.
    pub fn set_submitted(&mut self, submitted: bool) -> &mut Self {
        self.submitted = submitted;
        self
    }

    /// Records `code` for `field`, replacing any earlier code.
    pub fn add_error(&mut self, field: impl Into<String>, code: impl Into<String>) -> &mut Self {
        self.errors.insert(field, code);
        self
    }

    /// Raw `field -> code` errors.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Errors rendered through `table`, in error order.
    pub fn messages(&self, table: &MessageTable) -> Result<IndexMap<String, String>, MessageError> {
        self.errors.render(table)
    }

    /// Stores a free-form message for `field`.
    pub fn set_message(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.messages.insert(field.into(), message.into());
        self
    }

    /// The free-form message stored for `field`.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.messages.get(field).map(String::as_str)
    }

    /// All stored messages, one per line.
    pub fn joined_messages(&self) -> String {
        self.messages
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ========================================================================
    // INSPECTION
    // ========================================================================

    /// Named fields the configuration refers to.
    pub fn field_names(&self) -> Vec<&str> {
        self.pipeline.field_names()
    }

    /// The resolved configuration.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// The working record. After [`validate`](Self::validate) it holds the
    /// filtered values.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Consumes the validator, returning the working record.
    pub fn into_record(self) -> Record {
        self.record
    }

    /// Only the configured fields, with missing ones as `Null`.
    ///
    /// When `choices` is non-empty the result is further limited to those
    /// names, in the order given. Names that are not configured are ignored.
    pub fn safe_record<S: AsRef<str>>(&self, choices: &[S]) -> Record {
        let configured = self.field_names();
        let wanted: Vec<&str> = if choices.is_empty() {
            configured.clone()
        } else {
            choices.iter().map(AsRef::as_ref).collect()
        };

        wanted
            .into_iter()
            .filter(|field| configured.contains(field))
            .map(|field| (field, self.record.value(field).clone()))
            .collect()
    }

    /// Snapshot of the current state.
    ///
    /// `success` reflects the error map as it is now, so errors added with
    /// [`add_error`](Self::add_error) after a run turn it off.
    pub fn outcome(&self) -> Outcome {
        Outcome {
            success: self.ran && self.submitted && self.errors.is_empty(),
            errors: self.errors.clone(),
            record: self.record.clone(),
        }
    }
}

impl Clone for Validator {
    /// Shares the configuration and record; errors and messages start empty.
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            record: self.record.clone(),
            errors: ErrorMap::new(),
            messages: IndexMap::new(),
            submitted: self.submitted,
            ran: false,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
