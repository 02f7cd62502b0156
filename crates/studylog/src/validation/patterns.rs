//! Field format patterns.
//!
//! Compiled regexes for the contact fields accepted on subject submissions.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// A compiled field format pattern.
#[derive(Debug)]
pub struct FieldPattern {
    /// Name of the pattern for identification.
    pub name: &'static str,

    /// Description of the accepted format.
    pub description: &'static str,

    /// The compiled regex.
    regex: Regex,
}

impl FieldPattern {
    /// Create a new field pattern.
    ///
    /// # Panics
    ///
    /// Panics if the regex pattern is invalid.
    #[must_use]
    pub fn new(name: &'static str, description: &'static str, pattern: &str) -> Self {
        Self {
            name,
            description,
            regex: Regex::new(pattern).expect("Invalid regex pattern"),
        }
    }

    /// Check if the value matches this pattern.
    ///
    /// Rejections are logged at debug level with the expected format; the
    /// value itself is never logged.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        let matched = self.regex.is_match(value);
        if !matched {
            debug!(pattern = self.name, "Rejected value, expected {}", self.description);
        }
        matched
    }
}

/// US-style phone number: `###-###-####`, ASCII digits only.
pub static PHONE: LazyLock<FieldPattern> = LazyLock::new(|| {
    FieldPattern::new(
        "phone",
        "Three digits, three digits and four digits separated by hyphens",
        r"^[0-9]{3}-[0-9]{3}-[0-9]{4}$",
    )
});

/// Email address with one of the accepted top-level domains.
pub static EMAIL: LazyLock<FieldPattern> = LazyLock::new(|| {
    FieldPattern::new(
        "email",
        "local@domain with a .net, .com, .org, .edu or .gov suffix",
        r"^[\w.-]+@[\w.-]+\.(net|com|org|edu|gov)$",
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert_eq!(PHONE.name, "phone");
        assert_eq!(EMAIL.name, "email");
        assert!(!PHONE.description.is_empty());
    }

    #[test]
    fn test_phone_pattern() {
        assert!(PHONE.matches("555-123-4567"));
        assert!(!PHONE.matches("5551234567"));
        assert!(!PHONE.matches("555-12-34567"));
        assert!(!PHONE.matches("555-123-4567 "));
        assert!(!PHONE.matches("x555-123-4567"));
        // Non-ASCII digits are not accepted
        assert!(!PHONE.matches("٥٥٥-١٢٣-٤٥٦٧"));
    }

    #[test]
    fn test_email_pattern() {
        assert!(EMAIL.matches("a.b@example.com"));
        assert!(EMAIL.matches("first-last@dept.univ.edu"));
        assert!(!EMAIL.matches("a@b.xyz"));
        assert!(!EMAIL.matches("no-at-sign.com"));
        assert!(!EMAIL.matches("a@b.com<script>"));
        assert!(!EMAIL.matches(" a@b.com"));
    }
}
