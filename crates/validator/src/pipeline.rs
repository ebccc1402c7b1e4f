//! Resolved configuration and the four-stage executor.
//!
//! A [`Pipeline`] holds everything a validator was configured with, already
//! resolved against its [`Registry`]: pre-filters, rules, callbacks and
//! post-filters, each grouped by [`FieldTarget`] in registration order.
//! [`Pipeline::run`] executes the stages against a record.

use std::fmt;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::config::ValidatorConfig;
use crate::foundation::{
    CallbackContext, CallbackFn, FilterFn, MxResolver, Record, RegistrationResult, RuleArgs,
    RuleContext, RuleFn, Value,
};
use crate::messages::ErrorMap;
use crate::registry::{FieldShape, Registry};
use crate::spec::RuleSpec;

// ============================================================================
// FIELD TARGET
// ============================================================================

/// Where a filter, rule or callback applies.
///
/// The string `"*"` converts to [`FieldTarget::Wildcard`]; anything else names
/// a single field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldTarget {
    /// Every field of the working record.
    Wildcard,
    /// One named field.
    Named(String),
}

impl FieldTarget {
    /// The field name, or `None` for the wildcard.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Wildcard => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl From<&str> for FieldTarget {
    fn from(field: &str) -> Self {
        if field == "*" {
            Self::Wildcard
        } else {
            Self::Named(field.to_owned())
        }
    }
}

impl From<String> for FieldTarget {
    fn from(field: String) -> Self {
        if field == "*" {
            Self::Wildcard
        } else {
            Self::Named(field)
        }
    }
}

impl From<&String> for FieldTarget {
    fn from(field: &String) -> Self {
        Self::from(field.as_str())
    }
}

impl fmt::Display for FieldTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("*"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Which filter stage a filter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterStage {
    /// Before rules; always runs.
    Pre,
    /// After callbacks; runs whether or not validation failed.
    Post,
}

// ============================================================================
// ENTRIES
// ============================================================================

#[derive(Clone)]
struct FilterEntry {
    name: String,
    apply: FilterFn,
}

#[derive(Clone)]
struct RuleEntry {
    name: String,
    args: RuleArgs,
    check: RuleFn,
}

#[derive(Clone)]
struct CallbackEntry {
    name: String,
    call: CallbackFn,
}

type Groups<T> = IndexMap<FieldTarget, Vec<T>>;

fn push<T>(groups: &mut Groups<T>, target: FieldTarget, entry: T) {
    groups.entry(target).or_default().push(entry);
}

// ============================================================================
// PIPELINE
// ============================================================================

/// A fully resolved validation configuration.
///
/// Cloning is cheap apart from the group maps: every callable is an `Arc`.
#[derive(Clone)]
pub struct Pipeline {
    registry: Arc<Registry>,
    config: ValidatorConfig,
    resolver: Option<Arc<dyn MxResolver>>,
    pre_filters: Groups<FilterEntry>,
    rules: Groups<RuleEntry>,
    callbacks: Groups<CallbackEntry>,
    post_filters: Groups<FilterEntry>,
    shapes: IndexMap<String, FieldShape>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Registry::shared_builtin(), ValidatorConfig::default())
    }
}

impl Pipeline {
    /// An empty pipeline resolving names against `registry`.
    #[must_use]
    pub fn new(registry: Arc<Registry>, config: ValidatorConfig) -> Self {
        Self {
            registry,
            config,
            resolver: None,
            pre_filters: IndexMap::new(),
            rules: IndexMap::new(),
            callbacks: IndexMap::new(),
            post_filters: IndexMap::new(),
            shapes: IndexMap::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub(crate) fn set_resolver(&mut self, resolver: Arc<dyn MxResolver>) {
        self.resolver = Some(resolver);
    }

    pub(crate) fn allow_empty_rule(&mut self, rule: String) {
        if !self.config.empty_rules.contains(&rule) {
            self.config.empty_rules.push(rule);
        }
    }

    pub(crate) fn declare(&mut self, field: String, shape: FieldShape) {
        self.shapes.insert(field, shape);
    }

    // ---- registration --------------------------------------------------

    pub(crate) fn add_filter(
        &mut self,
        stage: FilterStage,
        target: FieldTarget,
        name: &str,
    ) -> RegistrationResult<()> {
        let apply = self.registry.filter(name)?;
        self.add_filter_fn(stage, target, name.to_owned(), apply);
        Ok(())
    }

    pub(crate) fn add_filter_fn(
        &mut self,
        stage: FilterStage,
        target: FieldTarget,
        name: String,
        apply: FilterFn,
    ) {
        tracing::debug!(%target, filter = %name, ?stage, "filter registered");
        let groups = match stage {
            FilterStage::Pre => &mut self.pre_filters,
            FilterStage::Post => &mut self.post_filters,
        };
        push(groups, target, FilterEntry { name, apply });
    }

    pub(crate) fn add_rule(&mut self, target: FieldTarget, spec: RuleSpec) -> RegistrationResult<()> {
        let def = self.registry.rule(&spec.name)?;
        def.args().check(&spec.name, &spec.args)?;

        let check = Arc::clone(def.check());
        if let (Some(shape), Some(field)) = (def.shape(), target.name()) {
            self.shapes.insert(field.to_owned(), shape);
        }

        tracing::debug!(%target, rule = %spec, "rule registered");
        push(
            &mut self.rules,
            target,
            RuleEntry {
                name: spec.name,
                args: spec.args,
                check,
            },
        );
        Ok(())
    }

    pub(crate) fn add_rule_fn(&mut self, target: FieldTarget, name: String, check: RuleFn) {
        tracing::debug!(%target, rule = %name, "closure rule registered");
        push(
            &mut self.rules,
            target,
            RuleEntry {
                name,
                args: RuleArgs::new(),
                check,
            },
        );
    }

    pub(crate) fn add_callback(&mut self, target: FieldTarget, name: &str) -> RegistrationResult<()> {
        let call = self.registry.callback(name)?;
        self.add_callback_fn(target, name.to_owned(), call);
        Ok(())
    }

    pub(crate) fn add_callback_fn(&mut self, target: FieldTarget, name: String, call: CallbackFn) {
        tracing::debug!(%target, callback = %name, "callback registered");
        push(&mut self.callbacks, target, CallbackEntry { name, call });
    }

    // ---- inspection ----------------------------------------------------

    /// Named fields with at least one filter, rule or callback, plus declared
    /// fields.
    ///
    /// Insertion order across pre-filters, rules, callbacks, post-filters and
    /// shape declarations, without duplicates. The wildcard is never listed.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: IndexSet<&str> = IndexSet::new();
        names.extend(self.pre_filters.keys().filter_map(FieldTarget::name));
        names.extend(self.rules.keys().filter_map(FieldTarget::name));
        names.extend(self.callbacks.keys().filter_map(FieldTarget::name));
        names.extend(self.post_filters.keys().filter_map(FieldTarget::name));
        names.extend(self.shapes.keys().map(String::as_str));
        names.into_iter().collect()
    }

    /// Declared shape of `field` (scalar unless declared otherwise).
    #[must_use]
    pub fn shape(&self, field: &str) -> FieldShape {
        self.shapes.get(field).copied().unwrap_or_default()
    }

    /// Names of the rules registered for `target`, in order.
    #[must_use]
    pub fn rules_for(&self, target: &FieldTarget) -> Vec<&str> {
        self.rules
            .get(target)
            .map(|entries| entries.iter().map(|e| e.name.as_str()).collect())
            .unwrap_or_default()
    }

    // ---- execution -----------------------------------------------------

    /// Runs every stage against `record`, recording failures in `errors`.
    ///
    /// Returns `true` when the record was submitted and no field failed. When
    /// `submitted` is `false` only pre-population and pre-filters run.
    pub fn run(&self, record: &mut Record, errors: &mut ErrorMap, submitted: bool) -> bool {
        let span = tracing::debug_span!("validate", fields = record.len(), submitted);
        let _enter = span.enter();

        self.prepopulate(record);
        self.apply_filters(&self.pre_filters, record);

        if !submitted {
            tracing::debug!("record not submitted; skipping rules");
            return false;
        }

        self.apply_rules(record, errors);
        self.apply_callbacks(record, errors);
        self.apply_filters(&self.post_filters, record);

        tracing::debug!(failed = errors.len(), "validation finished");
        errors.is_empty()
    }

    fn prepopulate(&self, record: &mut Record) {
        for field in self.field_names() {
            if matches!(record.get(field), None | Some(Value::Null)) {
                record.insert(field, self.shape(field).placeholder());
            }
        }
    }

    fn targets(target: &FieldTarget, record: &Record) -> Vec<String> {
        match target {
            FieldTarget::Wildcard => record.keys().map(str::to_owned).collect(),
            FieldTarget::Named(field) => vec![field.clone()],
        }
    }

    fn apply_filters(&self, groups: &Groups<FilterEntry>, record: &mut Record) {
        for (target, filters) in groups {
            for field in Self::targets(target, record) {
                for filter in filters {
                    let filtered = record.value(&field).map_scalars(|v| (filter.apply)(v));
                    tracing::trace!(field = %field, filter = %filter.name, "filter applied");
                    record.insert(field.clone(), filtered);
                }
            }
        }
    }

    fn apply_rules(&self, record: &Record, errors: &mut ErrorMap) {
        let ctx = RuleContext::new(record, &self.config, self.resolver.as_deref());

        for (target, rules) in &self.rules {
            let fields = Self::targets(target, record);
            for rule in rules {
                for field in &fields {
                    if errors.contains(field) {
                        continue;
                    }
                    let value = record.value(field);
                    if value.is_blank() && !self.config.is_empty_exempt(&rule.name) {
                        tracing::trace!(field = %field, rule = %rule.name, "blank value; rule skipped");
                        continue;
                    }
                    if !(rule.check)(value, rule.args.as_slice(), &ctx) {
                        tracing::debug!(field = %field, rule = %rule.name, "rule failed");
                        errors.insert(field.as_str(), rule.name.as_str());
                    }
                }
            }
        }
    }

    fn apply_callbacks(&self, record: &Record, errors: &mut ErrorMap) {
        for (target, callbacks) in &self.callbacks {
            let fields = Self::targets(target, record);
            for callback in callbacks {
                for field in &fields {
                    if errors.contains(field) {
                        continue;
                    }
                    tracing::trace!(field = %field, callback = %callback.name, "callback invoked");
                    (callback.call)(&mut CallbackContext::new(record, errors), field.as_str());
                }
            }
        }
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn names<T>(groups: &Groups<T>, name: impl Fn(&T) -> &str) -> Vec<String> {
            let name = &name;
            groups
                .iter()
                .flat_map(|(target, entries)| {
                    entries.iter().map(move |e| format!("{target}:{}", name(e)))
                })
                .collect()
        }

        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("pre_filters", &names(&self.pre_filters, |e| e.name.as_str()))
            .field("rules", &names(&self.rules, |e| e.name.as_str()))
            .field("callbacks", &names(&self.callbacks, |e| e.name.as_str()))
            .field("post_filters", &names(&self.post_filters, |e| e.name.as_str()))
            .field("shapes", &self.shapes)
            .field("resolver", &self.resolver.as_ref().map(|_| "<resolver>"))
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
