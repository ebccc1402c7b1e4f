//! Format rules: email, URL, IP address, phone number and date.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::foundation::MxResolver;

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"(?i)^[-_a-z0-9'+*$^&%=~!?{}]+(?:\.[-_a-z0-9'+*$^&%=~!?{}]+)*@(?:[a-z0-9](?:[-a-z0-9.]*[a-z0-9])?\.[a-z]{2,6}|\d{1,3}(?:\.\d{1,3}){3})(?::\d+)?$",
    )
    .unwrap()
});

// RFC 822 addr-spec, matched byte-wise so that 0x80-0xff are excluded exactly.
static EMAIL_RFC_REGEX: LazyLock<regex::bytes::Regex> = LazyLock::new(|| {
    let qtext = r"[^\x0d\x22\x5c\x80-\xff]";
    let dtext = r"[^\x0d\x5b-\x5d\x80-\xff]";
    let atom = r"[^\x00-\x20\x22\x28\x29\x2c\x2e\x3a-\x3c\x3e\x40\x5b-\x5d\x7f-\xff]+";
    let pair = r"\x5c[\x00-\x7f]";

    let domain_literal = format!(r"\x5b(?:{dtext}|{pair})*\x5d");
    let quoted_string = format!(r"\x22(?:{qtext}|{pair})*\x22");
    let sub_domain = format!("(?:{atom}|{domain_literal})");
    let word = format!("(?:{atom}|{quoted_string})");
    let domain = format!(r"{sub_domain}(?:\x2e{sub_domain})*");
    let local_part = format!(r"{word}(?:\x2e{word})*");

    regex::bytes::Regex::new(&format!(r"(?-u)^{local_part}\x40{domain}$")).unwrap()
});

// ============================================================================
// EMAIL
// ============================================================================

/// Practical email check: common local-part characters, a dotted domain with
/// a 2-6 letter TLD (or a dotted-quad IP), and an optional port.
#[must_use]
pub fn email(input: &str) -> bool {
    EMAIL_REGEX.is_match(input)
}

/// RFC 822 `addr-spec` check.
///
/// This is more permissive than [`email`] in some respects (quoted local
/// parts, domain literals, single-label domains).
#[must_use]
pub fn email_rfc(input: &str) -> bool {
    EMAIL_RFC_REGEX.is_match(input.as_bytes())
}

/// Checks that the domain part of `input` has an MX record.
///
/// Without a resolver the domain cannot be proven invalid, so this passes.
#[must_use]
pub fn email_domain(input: &str, resolver: Option<&dyn MxResolver>) -> bool {
    let Some(resolver) = resolver else {
        return true;
    };
    let domain = input.split_once('@').map_or(input, |(_, domain)| domain);
    resolver.has_mx_record(domain)
}

// ============================================================================
// URL
// ============================================================================

/// Passes for absolute URLs that carry a non-empty host.
#[must_use]
pub fn url(input: &str) -> bool {
    url::Url::parse(input).is_ok_and(|u| u.host_str().is_some_and(|host| !host.is_empty()))
}

// ============================================================================
// IP ADDRESS
// ============================================================================

/// Which address families and ranges [`ip`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IpOptions {
    /// Accept IPv6 addresses.
    pub allow_ipv6: bool,
    /// Accept private ranges (10/8, 172.16/12, 192.168/16, fc00::/7).
    pub allow_private: bool,
}

/// Syntactic IP check. Reserved ranges are always rejected.
///
/// ```rust
/// use formgate_validator::rules::{ip, IpOptions};
///
/// assert!(ip("8.8.8.8", IpOptions::default()));
/// assert!(!ip("192.168.1.1", IpOptions::default()));
/// assert!(!ip("127.0.0.1", IpOptions { allow_private: true, ..IpOptions::default() }));
/// ```
#[must_use]
pub fn ip(input: &str, options: IpOptions) -> bool {
    match input.parse::<IpAddr>() {
        Ok(IpAddr::V4(addr)) => {
            !is_reserved_v4(addr) && (options.allow_private || !addr.is_private())
        }
        Ok(IpAddr::V6(addr)) => {
            options.allow_ipv6
                && !is_reserved_v6(addr)
                && (options.allow_private || !is_private_v6(addr))
        }
        Err(_) => false,
    }
}

fn is_reserved_v4(addr: Ipv4Addr) -> bool {
    let [first, ..] = addr.octets();
    first == 0 || addr.is_loopback() || addr.is_link_local() || first >= 240
}

fn is_reserved_v6(addr: Ipv6Addr) -> bool {
    addr.is_unspecified()
        || addr.is_loopback()
        || addr.to_ipv4_mapped().is_some()
        || (addr.segments()[0] & 0xffc0) == 0xfe80
}

fn is_private_v6(addr: Ipv6Addr) -> bool {
    (addr.segments()[0] & 0xfe00) == 0xfc00
}

// ============================================================================
// PHONE
// ============================================================================

/// Strips everything but ASCII digits and checks the digit count.
///
/// ```rust
/// use formgate_validator::rules::phone;
///
/// assert!(phone("(555) 123-4567", &[7, 10, 11]));
/// assert!(!phone("555", &[7, 10, 11]));
/// ```
#[must_use]
pub fn phone(input: &str, lengths: &[usize]) -> bool {
    let digits = input.chars().filter(char::is_ascii_digit).count();
    lengths.contains(&digits)
}

// ============================================================================
// DATE
// ============================================================================

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%A, %B %d, %Y",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M %p", "%I:%M%p", "%I:%M:%S %p"];

const DATE_KEYWORDS: &[&str] = &["now", "today", "tomorrow", "yesterday", "midnight", "noon"];

/// Passes if `input` reads as a date, a time, or a date and time.
///
/// Accepts RFC 3339 and RFC 2822 timestamps, common numeric and month-name
/// layouts, clock times, and the keywords `now`, `today`, `tomorrow`,
/// `yesterday`, `midnight` and `noon`.
#[must_use]
pub fn date(input: &str) -> bool {
    let input = input.trim();
    if input.is_empty() {
        return false;
    }

    DATE_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(input))
        || DateTime::parse_from_rfc3339(input).is_ok()
        || DateTime::parse_from_rfc2822(input).is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|f| NaiveDateTime::parse_from_str(input, f).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|f| NaiveDate::parse_from_str(input, f).is_ok())
        || TIME_FORMATS
            .iter()
            .any(|f| NaiveTime::parse_from_str(input, f).is_ok())
}

// ============================================================================
// TESTS
// ============================================================================
