//! # formgate-validator
//!
//! A chain-configured validation engine for flat, submitted form records.
//!
//! ## Quick Start
//!
//! ```rust
//! use formgate_validator::prelude::*;
//!
//! # fn main() -> Result<(), RegistrationError> {
//! let record: Record = [("name", ""), ("email", "bad"), ("website", "")]
//!     .into_iter()
//!     .collect();
//!
//! let mut validator = Validator::new(record)
//!     .pre_filter("*", "trim")?
//!     .rule("name", "required")?
//!     .rules("email", ["required", "email"])?
//!     .callback("website", "honeypot")?;
//!
//! assert!(!validator.validate());
//! assert_eq!(validator.errors().get("name"), Some("required"));
//! assert_eq!(validator.errors().get("email"), Some("email"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! [`Validator::validate`] runs four stages in a fixed order: pre-filters,
//! rules, callbacks and post-filters. Each field keeps only its first failure.
//! Registering on the `"*"` target applies to every field of the record.
//! See [`pipeline`] for the details.
//!
//! ## Built-ins
//!
//! - **Rules**: see [`rules`] (`required`, `length[min,max]`, `email`, `ip`, ...)
//! - **Filters**: see [`filters`] (`trim`, `lowercase`, ...)
//! - **Callbacks**: see [`callbacks`] (`honeypot`)
//!
//! Extra names go into a custom [`Registry`](registry::Registry) passed to
//! [`Validator::with_registry`], or directly onto a field with the `*_fn`
//! registration methods.

pub mod callbacks;
pub mod config;
pub mod filters;
pub mod foundation;
pub mod messages;
pub mod pipeline;
pub mod prelude;
pub mod registry;
pub mod rules;
pub mod spec;
mod validator;

pub use validator::{Outcome, Validator};
