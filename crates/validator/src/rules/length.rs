//! String length rule.
//!
//! Length is measured in Unicode scalar values, so `"né"` has length 2.

use crate::foundation::Value;

/// Accepted lengths for [`length`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthBounds {
    /// Exactly this many characters.
    Exact(usize),
    /// Between `min` and `max` characters, inclusive.
    Range { min: usize, max: usize },
}

impl LengthBounds {
    /// Builds bounds from `[n]` or `[min, max]` rule arguments.
    ///
    /// Extra arguments beyond the second are ignored.
    #[must_use]
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Option<Self> {
        let parse = |s: &S| s.as_ref().trim().parse::<usize>().ok();
        match args {
            [] => None,
            [exact] => parse(exact).map(Self::Exact),
            [min, max, ..] => Some(Self::Range {
                min: parse(min)?,
                max: parse(max)?,
            }),
        }
    }

    /// Whether `len` satisfies the bounds.
    #[must_use]
    pub fn contains(self, len: usize) -> bool {
        match self {
            Self::Exact(n) => len == n,
            Self::Range { min, max } => (min..=max).contains(&len),
        }
    }
}

/// Passes if `value` is a string whose length fits `bounds`.
///
/// Non-string values always fail.
#[must_use]
pub fn length(value: &Value, bounds: LengthBounds) -> bool {
    value
        .as_str()
        .is_some_and(|s| bounds.contains(s.chars().count()))
}
