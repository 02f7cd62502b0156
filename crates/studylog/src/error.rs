//! Error types for studylog.
//!
//! This module defines all error types used throughout the studylog crate.
//! Validation failures carry the user-facing message shown after a form
//! submission; infrastructure failures carry enough context for the logs.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for studylog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Validation Errors ===
    /// A numeric or pattern-checked field was malformed.
    #[error("{message}")]
    InvalidFormat {
        /// Name of the offending form field.
        field: &'static str,
        /// User-facing description of the problem.
        message: String,
    },

    /// A record with the same key already exists.
    #[error("{message}")]
    DuplicateKey {
        /// The conflicting key value.
        key: i64,
        /// User-facing description of the problem.
        message: String,
    },

    /// A record refers to a project or subject that does not exist.
    #[error("{message}")]
    Reference {
        /// The dangling key value.
        key: i64,
        /// User-facing description of the problem.
        message: String,
    },

    /// More tags were supplied than a project may carry.
    #[error("A maximum of {limit} tags are allowed.")]
    TooManyTags {
        /// Number of tags supplied.
        count: usize,
        /// The maximum allowed.
        limit: usize,
    },

    /// A text field exceeded its length limit.
    #[error("Observation text cannot exceed {limit} characters.")]
    TooLong {
        /// Length of the supplied text in characters.
        length: usize,
        /// The maximum allowed.
        limit: usize,
    },

    /// A lookup found nothing.
    #[error("{message}")]
    NotFound {
        /// User-facing description of what was missing.
        message: String,
    },

    // === Storage Errors ===
    /// A collection file exists but could not be parsed.
    #[error("corrupt data in {path}: {source}")]
    CorruptData {
        /// Path to the collection file.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Presentation Errors ===
    /// A page template failed to render.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for studylog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid format error for the given field.
    #[must_use]
    pub fn invalid_format(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field,
            message: message.into(),
        }
    }

    /// Create a duplicate key error.
    #[must_use]
    pub fn duplicate_key(key: i64, message: impl Into<String>) -> Self {
        Self::DuplicateKey {
            key,
            message: message.into(),
        }
    }

    /// Create a dangling reference error.
    #[must_use]
    pub fn reference(key: i64, message: impl Into<String>) -> Self {
        Self::Reference {
            key,
            message: message.into(),
        }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error was caused by user input rather than the system.
    ///
    /// User errors are reported back as a status message on the page the
    /// user submitted from; everything else is a server failure.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat { .. }
                | Self::DuplicateKey { .. }
                | Self::Reference { .. }
                | Self::TooManyTags { .. }
                | Self::TooLong { .. }
                | Self::NotFound { .. }
        )
    }

    /// Check if this error is a lookup miss.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors_display_their_message() {
        let err = Error::invalid_format("phone", "Invalid phone number format. Use ###-###-####.");
        assert_eq!(
            err.to_string(),
            "Invalid phone number format. Use ###-###-####."
        );

        let err = Error::duplicate_key(7, "Project number must be unique.");
        assert_eq!(err.to_string(), "Project number must be unique.");

        let err = Error::reference(3, "Invalid project number.");
        assert_eq!(err.to_string(), "Invalid project number.");
    }

    #[test]
    fn test_too_many_tags_display() {
        let err = Error::TooManyTags {
            count: 101,
            limit: 100,
        };
        assert_eq!(err.to_string(), "A maximum of 100 tags are allowed.");
    }

    #[test]
    fn test_too_long_display() {
        let err = Error::TooLong {
            length: 1001,
            limit: 1000,
        };
        assert_eq!(
            err.to_string(),
            "Observation text cannot exceed 1000 characters."
        );
    }

    #[test]
    fn test_is_user_error() {
        assert!(Error::not_found("Subject not found.").is_user_error());
        assert!(Error::duplicate_key(1, "dup").is_user_error());
        assert!(!Error::internal("boom").is_user_error());

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert!(!Error::from(io_err).is_user_error());
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::not_found("Subject not found.").is_not_found());
        assert!(!Error::reference(1, "Invalid project number.").is_not_found());
    }

    #[test]
    fn test_corrupt_data_display() {
        let source = serde_json::from_str::<Vec<i64>>("{not json").unwrap_err();
        let err = Error::CorruptData {
            path: PathBuf::from("/data/projects.json"),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/projects.json"));
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "invalid bind address".to_string(),
        };
        assert!(err.to_string().contains("invalid bind address"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }
}
