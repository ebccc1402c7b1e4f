//! Prelude module for convenient imports.
//!
//! Provides a single `use formgate_validator::prelude::*;` import that brings
//! in the validator, its value types and the configuration surface.

// ============================================================================
// FOUNDATION: values, contexts, errors
// ============================================================================

pub use crate::foundation::{
    CallbackContext, MessageError, MxResolver, Record, RegistrationError, RegistrationResult,
    RuleContext, Value,
};

// ============================================================================
// ENGINE
// ============================================================================

pub use crate::config::ValidatorConfig;
pub use crate::messages::{ErrorMap, MessageTable};
pub use crate::pipeline::FieldTarget;
pub use crate::registry::{ArgKind, ArgSpec, FieldShape, Registry, RuleDef};
pub use crate::spec::RuleSpec;
pub use crate::{Outcome, Validator};
