//! Built-in rules
//!
//! Each rule is a plain function over a string (or [`Value`]) so it can be used
//! on its own. [`builtin`] wraps them into [`RuleDef`]s with their argument
//! contracts for the default [`Registry`](crate::registry::Registry).
//!
//! # Categories
//!
//! - **Presence**: `required`, `matches`, `depends_on`, `is_array`
//! - **Length**: `length`
//! - **Format**: `email`, `email_rfc`, `email_domain`, `url`, `ip`, `phone`, `date`
//! - **Character class**: `alpha`, `alpha_numeric`, `alpha_dash`, `digit`,
//!   `numeric`, `standard_text`, `decimal`, `chars`

pub mod content;
pub mod length;
pub mod pattern;
pub mod presence;

pub use content::{IpOptions, date, email, email_domain, email_rfc, ip, phone, url};
pub use length::{LengthBounds, length};
pub use pattern::{
    CharSet, DecimalFormat, alpha, alpha_dash, alpha_numeric, chars, decimal, digit, numeric,
    standard_text,
};
pub use presence::{depends_on, is_array, matches, required};

use crate::foundation::{RuleContext, Value};
use crate::registry::{ArgKind, ArgSpec, FieldShape, RuleDef, parse_flag};

/// Reads the flag at `index`, defaulting to `false`.
fn flag(args: &[String], index: usize) -> bool {
    args.get(index)
        .and_then(|arg| parse_flag(arg))
        .unwrap_or(false)
}

/// Registers a rule that only looks at the value's text.
fn text_rule<F>(name: &str, check: F) -> RuleDef
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    RuleDef::new(name, move |value: &Value, _: &[String], _: &RuleContext<'_>| {
        check(value.to_text().as_ref())
    })
}

/// Registers a character-class rule with an optional Unicode flag.
fn class_rule(name: &str, check: fn(&str, bool) -> bool) -> RuleDef {
    RuleDef::new(name, move |value: &Value, args: &[String], _: &RuleContext<'_>| {
        check(&value.to_text(), flag(args, 0))
    })
    .with_args(ArgSpec::between(0, 1, ArgKind::Flag))
}

/// The built-in rule table.
#[must_use]
pub fn builtin() -> Vec<RuleDef> {
    vec![
        // Presence
        RuleDef::new("required", |value, _, _| required(value)),
        RuleDef::new("matches", |value, args, ctx| {
            matches(value, ctx.record(), args)
        })
        .with_args(ArgSpec::at_least(1, ArgKind::Text)),
        RuleDef::new("depends_on", |_, args, ctx| depends_on(ctx.record(), args))
            .with_args(ArgSpec::at_least(1, ArgKind::Text)),
        RuleDef::new("is_array", |value, _, _| is_array(value)).declaring(FieldShape::Sequence),
        // Length
        RuleDef::new("length", |value, args, _| {
            LengthBounds::from_args(args).is_some_and(|bounds| length(value, bounds))
        })
        .with_args(ArgSpec::between(1, 2, ArgKind::Unsigned)),
        // Format
        text_rule("email", email),
        text_rule("email_rfc", email_rfc),
        RuleDef::new("email_domain", |value, _, ctx| {
            email_domain(&value.to_text(), ctx.resolver())
        }),
        text_rule("url", url),
        RuleDef::new("ip", |value, args, _| {
            let options = IpOptions {
                allow_ipv6: flag(args, 0),
                allow_private: flag(args, 1),
            };
            ip(&value.to_text(), options)
        })
        .with_args(ArgSpec::between(0, 2, ArgKind::Flag)),
        RuleDef::new("phone", |value, args, ctx| {
            let lengths: Vec<usize> = if args.is_empty() {
                ctx.config().phone_lengths.clone()
            } else {
                args.iter().filter_map(|a| a.trim().parse().ok()).collect()
            };
            phone(&value.to_text(), &lengths)
        })
        .with_args(ArgSpec::at_least(0, ArgKind::Unsigned)),
        text_rule("date", date),
        // Character class
        class_rule("alpha", alpha),
        class_rule("alpha_numeric", alpha_numeric),
        class_rule("alpha_dash", alpha_dash),
        class_rule("digit", digit),
        RuleDef::new("numeric", |value, _, ctx| {
            numeric(&value.to_text(), ctx.config().decimal_separator)
        }),
        text_rule("standard_text", standard_text),
        RuleDef::new("decimal", |value, args, _| {
            decimal(&value.to_text(), DecimalFormat::from_args(args))
        })
        .with_args(ArgSpec::between(0, 2, ArgKind::Unsigned)),
        RuleDef::new("chars", |value, args, _| {
            chars(&value.to_text(), &CharSet::from_args(args))
        })
        .with_args(ArgSpec::at_least(1, ArgKind::Text)),
    ]
}
