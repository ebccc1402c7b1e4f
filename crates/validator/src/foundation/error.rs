//! Error types for configuring a validator and rendering its messages.
//!
//! Field validation failures are not errors in this sense: they are data,
//! collected into an [`ErrorMap`](crate::messages::ErrorMap). The types here
//! cover the two ways a *caller* can get things wrong:
//!
//! - [`RegistrationError`]: a filter, rule or callback cannot be resolved or
//!   its arguments are malformed. Raised immediately at registration.
//! - [`MessageError`]: a message table lacks an entry for an error that
//!   actually occurred.

// ============================================================================
// REGISTRATION ERROR
// ============================================================================

/// Raised while registering filters, rules or callbacks on a validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// No rule with this name exists in the registry.
    #[error("unknown rule `{name}`")]
    UnknownRule { name: String },

    /// No filter with this name exists in the registry.
    #[error("unknown filter `{name}`")]
    UnknownFilter { name: String },

    /// No callback with this name exists in the registry.
    #[error("unknown callback `{name}`")]
    UnknownCallback { name: String },

    /// The textual rule spec could not be parsed.
    #[error("malformed rule spec `{spec}`: {reason}")]
    MalformedRuleSpec { spec: String, reason: String },

    /// The rule exists but its bracketed arguments do not fit it.
    #[error("invalid arguments for rule `{rule}`: {reason}")]
    InvalidArguments { rule: String, reason: String },
}

impl RegistrationError {
    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::UnknownRule { .. } | Self::UnknownFilter { .. } | Self::UnknownCallback { .. } => {
                "lookup"
            }
            Self::MalformedRuleSpec { .. } => "format",
            Self::InvalidArguments { .. } => "arguments",
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::UnknownRule { .. } => "REG_UNKNOWN_RULE",
            Self::UnknownFilter { .. } => "REG_UNKNOWN_FILTER",
            Self::UnknownCallback { .. } => "REG_UNKNOWN_CALLBACK",
            Self::MalformedRuleSpec { .. } => "REG_MALFORMED_SPEC",
            Self::InvalidArguments { .. } => "REG_INVALID_ARGS",
        }
    }

    /// Registration errors are deterministic; retrying never helps.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }

    pub(crate) fn invalid_args(rule: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            rule: rule.to_owned(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// MESSAGE ERROR
// ============================================================================

/// Raised when joining recorded errors against a caller-supplied message table.
///
/// The caller must supply a complete table for every field and code pair that
/// can occur; this error reports the first gap.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    /// The table has no message for `code` on `field`.
    #[error("no message for error `{code}` on field `{field}`")]
    MissingMessage { field: String, code: String },
}

impl MessageError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::MissingMessage { .. } => "MSG_MISSING",
        }
    }
}

/// Shorthand for registration results.
pub type RegistrationResult<T> = Result<T, RegistrationError>;

// ============================================================================
// TESTS
// ============================================================================
