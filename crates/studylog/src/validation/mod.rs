//! Input validation for record submissions.
//!
//! Pure functions shared by the record services:
//!
//! - **Numbers**: form fields are parsed into integers.
//! - **Contact fields**: phone and email are checked against fixed patterns.
//! - **Tags**: comma-separated input becomes a bounded list of trimmed tags.
//! - **Observation text**: bounded length, counted in characters.
//!
//! # Example
//!
//! ```
//! use studylog::validation::{split_tags, validate_email, validate_phone};
//!
//! assert!(validate_phone("555-123-4567"));
//! assert!(validate_email("a.b@example.com"));
//! assert_eq!(split_tags("a, b ,, c").unwrap(), vec!["a", "b", "c"]);
//! ```

mod patterns;

pub use patterns::{FieldPattern, EMAIL, PHONE};

use crate::error::{Error, Result};

/// Maximum number of tags a project may carry.
pub const MAX_TAGS: usize = 100;

/// Maximum observation length, in characters.
pub const MAX_OBSERVATION_CHARS: usize = 1000;

/// Parse a form field as an integer.
///
/// Surrounding whitespace is ignored and a leading sign is accepted.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] naming `field` if the value is not an
/// integer. The message is supplied by the caller so each form can word it
/// for its own fields.
pub fn parse_integer(field: &'static str, raw: &str, message: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| Error::invalid_format(field, message))
}

/// Check a phone number against the `###-###-####` format.
#[must_use]
pub fn validate_phone(phone: &str) -> bool {
    PHONE.matches(phone)
}

/// Check an email address against the accepted format and domain suffixes.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    EMAIL.matches(email)
}

/// Split comma-separated tags, trimming each and dropping empty entries.
///
/// # Errors
///
/// Returns [`Error::TooManyTags`] if more than [`MAX_TAGS`] tags remain.
pub fn split_tags(raw: &str) -> Result<Vec<String>> {
    let tags: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect();

    if tags.len() > MAX_TAGS {
        return Err(Error::TooManyTags {
            count: tags.len(),
            limit: MAX_TAGS,
        });
    }
    Ok(tags)
}

/// Check that observation text is within [`MAX_OBSERVATION_CHARS`].
///
/// # Errors
///
/// Returns [`Error::TooLong`] if the text is longer than the limit.
pub fn check_observation_length(text: &str) -> Result<()> {
    let length = text.chars().count();
    if length > MAX_OBSERVATION_CHARS {
        return Err(Error::TooLong {
            length,
            limit: MAX_OBSERVATION_CHARS,
        });
    }
    Ok(())
}
