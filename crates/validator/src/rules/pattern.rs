//! Character-class rules.
//!
//! The `alpha*` and `digit` rules have two modes: ASCII (the default) and
//! Unicode, where any letter or number category counts.

use std::sync::LazyLock;

static ALPHA_UNICODE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^\pL+$").unwrap());
static ALPHA_NUMERIC_UNICODE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[\pL\pN]+$").unwrap());
static ALPHA_DASH_UNICODE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[-\pL\pN_]+$").unwrap());
static DIGIT_UNICODE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^\pN+$").unwrap());
static STANDARD_TEXT: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[\pL\pN\pZ\p{Pc}\p{Pd}\p{Po}]+$").unwrap());

// ============================================================================
// ALPHA / DIGIT
// ============================================================================

/// Letters only.
#[must_use]
pub fn alpha(input: &str, unicode: bool) -> bool {
    if unicode {
        ALPHA_UNICODE.is_match(input)
    } else {
        !input.is_empty() && input.chars().all(|c| c.is_ascii_alphabetic())
    }
}

/// Letters and numbers only.
#[must_use]
pub fn alpha_numeric(input: &str, unicode: bool) -> bool {
    if unicode {
        ALPHA_NUMERIC_UNICODE.is_match(input)
    } else {
        !input.is_empty() && input.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

/// Letters, numbers, underscores and dashes only.
#[must_use]
pub fn alpha_dash(input: &str, unicode: bool) -> bool {
    if unicode {
        ALPHA_DASH_UNICODE.is_match(input)
    } else {
        !input.is_empty()
            && input
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

/// Digits only: no sign, no separator.
#[must_use]
pub fn digit(input: &str, unicode: bool) -> bool {
    if unicode {
        DIGIT_UNICODE.is_match(input)
    } else {
        !input.is_empty() && input.chars().all(|c| c.is_ascii_digit())
    }
}

// ============================================================================
// NUMERIC / DECIMAL
// ============================================================================

/// Optionally negative number with at most one `separator`.
///
/// ```rust
/// use formgate_validator::rules::numeric;
///
/// assert!(numeric("-12.5", '.'));
/// assert!(numeric("12,5", ','));
/// assert!(!numeric("12.5", ','));
/// assert!(!numeric("1.2.3", '.'));
/// ```
#[must_use]
pub fn numeric(input: &str, separator: char) -> bool {
    let body = input.strip_prefix('-').unwrap_or(input);
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    match body.split_once(separator) {
        None => !body.is_empty() && all_digits(body),
        Some((int, frac)) => !frac.is_empty() && all_digits(int) && all_digits(frac),
    }
}

/// Digit counts enforced by [`decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DecimalFormat {
    /// Exact number of digits before the point.
    pub integer_digits: Option<usize>,
    /// Exact number of digits after the point.
    pub decimal_places: Option<usize>,
}

impl DecimalFormat {
    /// Builds a format from `[]`, `[places]` or `[digits, places]`.
    #[must_use]
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        let parse = |s: &S| s.as_ref().trim().parse::<usize>().ok();
        match args {
            [] => Self::default(),
            [places] => Self {
                integer_digits: None,
                decimal_places: parse(places),
            },
            [digits, places, ..] => Self {
                integer_digits: parse(digits),
                decimal_places: parse(places),
            },
        }
    }
}

/// `digits.digits`, with optional exact counts on either side.
///
/// ```rust
/// use formgate_validator::rules::{decimal, DecimalFormat};
///
/// assert!(decimal("3.14", DecimalFormat::default()));
/// assert!(decimal("1234.50", DecimalFormat::from_args(&["4", "2"])));
/// assert!(!decimal("12.5", DecimalFormat::from_args(&["2"])));
/// ```
#[must_use]
pub fn decimal(input: &str, format: DecimalFormat) -> bool {
    let Some((int, frac)) = input.split_once('.') else {
        return false;
    };
    let digits_ok = |part: &str, count: Option<usize>| {
        part.chars().all(|c| c.is_ascii_digit())
            && match count {
                Some(n) => part.len() == n,
                None => !part.is_empty(),
            }
    };
    digits_ok(int, format.integer_digits) && digits_ok(frac, format.decimal_places)
}

// ============================================================================
// STANDARD TEXT
// ============================================================================

/// Letters, numbers, whitespace, and connector, dash or other punctuation.
#[must_use]
pub fn standard_text(input: &str) -> bool {
    STANDARD_TEXT.is_match(input)
}

// ============================================================================
// CHARS
// ============================================================================

/// A set of allowed characters, built from rule arguments.
///
/// Arguments are concatenated. Inside the result, `x-y` between two characters
/// is an inclusive range; a dash at either end is literal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharSet {
    ranges: Vec<(char, char)>,
}

impl CharSet {
    /// Builds the set from `chars[...]` arguments.
    #[must_use]
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        let joined: Vec<char> = args.iter().flat_map(|a| a.as_ref().chars()).collect();
        let mut ranges = Vec::new();
        let mut i = 0;
        while i < joined.len() {
            let start = joined[i];
            if i + 2 < joined.len() && joined[i + 1] == '-' {
                let end = joined[i + 2];
                ranges.push(if start <= end { (start, end) } else { (end, start) });
                i += 3;
            } else {
                ranges.push((start, start));
                i += 1;
            }
        }
        Self { ranges }
    }

    /// Whether `c` is allowed.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&c))
    }
}

/// Passes if every character of `input` is in `allowed`.
#[must_use]
pub fn chars(input: &str, allowed: &CharSet) -> bool {
    input.chars().all(|c| allowed.contains(c))
}

// ============================================================================
// TESTS
// ============================================================================
