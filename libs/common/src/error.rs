//! Error types shared by the admin console
//!
//! Every failure a console action can hit falls into one of these variants.
//! Local failures (validation, missing prerequisites) never reach the network;
//! remote failures are normalized into a single user-facing message.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Message shown when a remote failure carries no usable message of its own
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred.";

/// Per-field validation failures, keyed by the wire name of the field
///
/// Only the first violated rule of each field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    /// Create an empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field` unless one is already recorded
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// Message recorded for `field`, if any
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over `(field, message)` pairs in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(())` when nothing was recorded, the errors otherwise
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Custom error type for console operations
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// One or more fields failed their local rules
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Something required before dispatch is absent (token, file, genres)
    #[error("{0}")]
    MissingPrerequisite(String),

    /// The request never produced a response (unreachable host, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote API answered with a non-success status
    #[error("Remote rejected request with status {status}")]
    RemoteRejection {
        status: u16,
        message: Option<String>,
    },

    /// The remote API answered with success but an unexpected body
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Local storage (cookie jar, selected files) could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ConsoleError {
    /// The single message shown to the console user for this failure
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Validation(errors) => errors.to_string(),
            ConsoleError::MissingPrerequisite(message) => message.clone(),
            ConsoleError::RemoteRejection {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ConsoleError::Transport(_)
            | ConsoleError::RemoteRejection { .. }
            | ConsoleError::MalformedResponse(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            ConsoleError::Configuration(message) => message.clone(),
            ConsoleError::Storage(e) => e.to_string(),
        }
    }

    /// Whether this failure was decided locally, without a request being sent
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ConsoleError::Validation(_)
                | ConsoleError::MissingPrerequisite(_)
                | ConsoleError::Configuration(_)
                | ConsoleError::Storage(_)
        )
    }
}

/// Type alias for Result with ConsoleError
pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.add("desc", "Desc must be at least 5 characters.");
        errors.add("desc", "something else");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("desc"), Some("Desc must be at least 5 characters."));
    }

    #[test]
    fn test_field_errors_display_in_field_order() {
        let mut errors = FieldErrors::new();
        errors.add("origin", "bad origin");
        errors.add("artist", "bad artist");

        assert_eq!(errors.to_string(), "artist: bad artist; origin: bad origin");
        assert!(errors.into_result().is_err());
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_remote_message_is_preferred() {
        let err = ConsoleError::RemoteRejection {
            status: 409,
            message: Some("Comic already exists".to_string()),
        };
        assert_eq!(err.user_message(), "Comic already exists");
        assert!(!err.is_local());
    }

    #[test]
    fn test_remote_failures_fall_back_to_generic_message() {
        let rejected = ConsoleError::RemoteRejection {
            status: 500,
            message: None,
        };
        let blank = ConsoleError::RemoteRejection {
            status: 500,
            message: Some("  ".to_string()),
        };
        let transport = ConsoleError::Transport("connection refused".to_string());
        let malformed = ConsoleError::MalformedResponse("missing field `link`".to_string());

        for err in [rejected, blank, transport, malformed] {
            assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        }
    }

    #[test]
    fn test_missing_prerequisite_is_local() {
        let err = ConsoleError::MissingPrerequisite("Please select Genres!".to_string());
        assert!(err.is_local());
        assert_eq!(err.user_message(), "Please select Genres!");
    }
}
