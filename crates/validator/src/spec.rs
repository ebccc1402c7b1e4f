//! Textual rule specs: `name` or `name[arg, arg, ...]`.
//!
//! Arguments are split on unescaped commas; whitespace directly after a comma
//! is dropped. A backslash makes the next character literal, so `\,` keeps a
//! comma inside one argument and `\]` / `\\` work the same way. No other
//! character is special: regex metacharacters pass through untouched.

use std::fmt;
use std::str::FromStr;

use crate::foundation::{RegistrationError, RuleArgs};

/// A parsed rule reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    /// Rule name, also used as the error code on failure.
    pub name: String,
    /// Bracketed arguments, in order.
    pub args: RuleArgs,
}

impl RuleSpec {
    /// Parses `spec`.
    pub fn parse(spec: &str) -> Result<Self, RegistrationError> {
        let spec = spec.trim();
        let malformed = |reason: &str| RegistrationError::MalformedRuleSpec {
            spec: spec.to_owned(),
            reason: reason.to_owned(),
        };

        let Some(open) = spec.find('[') else {
            if spec.is_empty() {
                return Err(malformed("empty rule name"));
            }
            if spec.contains(']') {
                return Err(malformed("unexpected `]`"));
            }
            return Ok(Self {
                name: spec.to_owned(),
                args: RuleArgs::new(),
            });
        };

        let name = spec[..open].trim_end();
        if name.is_empty() {
            return Err(malformed("empty rule name"));
        }

        let Some(body) = spec[open + 1..].strip_suffix(']') else {
            return Err(malformed("missing closing `]`"));
        };
        if body.is_empty() {
            return Err(malformed("empty argument list"));
        }

        Ok(Self {
            name: name.to_owned(),
            args: split_args(body),
        })
    }
}

impl FromStr for RuleSpec {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.args.is_empty() {
            return Ok(());
        }
        f.write_str("[")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            for c in arg.chars() {
                if matches!(c, ',' | '\\' | ']') {
                    f.write_str("\\")?;
                }
                write!(f, "{c}")?;
            }
        }
        f.write_str("]")
    }
}

/// Splits a bracket body into arguments.
pub fn split_args(body: &str) -> RuleArgs {
    let mut args = RuleArgs::new();
    let mut current = String::new();
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => current.push('\\'),
            },
            ',' => {
                args.push(std::mem::take(&mut current));
                while chars.next_if(|c| c.is_whitespace()).is_some() {}
            }
            other => current.push(other),
        }
    }
    args.push(current);
    args
}
