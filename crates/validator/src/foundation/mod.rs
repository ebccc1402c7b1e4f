//! Core types shared by every part of the engine
//!
//! - **Values**: [`Value`], [`Record`]
//! - **Callables**: [`RuleFn`], [`FilterFn`], [`CallbackFn`] and the contexts
//!   they receive
//! - **Errors**: [`RegistrationError`], [`MessageError`]
//!
//! # Examples
//!
//! ```rust
//! use formgate_validator::foundation::{Record, Value};
//!
//! let record: Record = [("name", "Ann"), ("email", "")].into_iter().collect();
//! assert!(record.value("email").is_blank());
//! assert_eq!(record.value("missing"), &Value::Null);
//! ```

pub mod error;
pub mod traits;
pub mod value;

pub use error::{MessageError, RegistrationError, RegistrationResult};
pub use traits::{
    CallbackContext, CallbackFn, FilterFn, MxResolver, RuleArgs, RuleContext, RuleFn,
};
pub use value::{Record, Value};
