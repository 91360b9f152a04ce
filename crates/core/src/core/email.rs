//! Client-side email shape check.
//!
//! This only rejects input that clearly is not an address (`local@domain.tld`
//! with no whitespace); the backend is the authority on everything else.

use std::sync::OnceLock;

use regex::Regex;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// Whether `input` (after trimming) looks like an email address.
pub fn is_valid_email(input: &str) -> bool {
    email_regex().is_match(input.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        for ok in [
            "ada@example.com",
            "first.last+tag@sub.example.co.uk",
            "  padded@example.org  ",
        ] {
            assert!(is_valid_email(ok), "{ok}");
        }
    }

    #[test]
    fn rejects_non_addresses() {
        for bad in [
            "",
            "not-an-email",
            "missing-at.example.com",
            "no-tld@example",
            "two@@example.com",
            "spa ce@example.com",
            "@example.com",
            "user@.",
        ] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }
}
