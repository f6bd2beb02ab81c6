use crate::core::timestamp::{MAX_TIMESTAMP_SECS, TimestampError};
use thiserror::Error;

/// Core error types for devkit
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Timestamp could not be converted
    #[error(transparent)]
    Timestamp(#[from] TimestampError),

    /// No XDG data directory could be determined
    #[error("Data directory not available")]
    DataDirUnavailable,

    /// A history entry or other named item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input validation failed
    #[error("Validation error in {field}: {message}")]
    Validation { field: String, message: String },
}

/// Represents a translated error with helpful context
#[derive(Debug, Clone)]
pub struct ErrorTranslation {
    pub user_message: String,
    pub suggestions: Vec<String>,
}

impl ErrorTranslation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            user_message: message.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

impl Error {
    /// Turns the error into a message plus hints for the command line.
    pub fn translate(&self) -> ErrorTranslation {
        match self {
            Error::Timestamp(TimestampError::Empty) => {
                ErrorTranslation::new("No timestamp given")
                    .with_suggestion("Example: devkit timestamp 1700000000000")
            }
            Error::Timestamp(TimestampError::InvalidFormat(input)) => {
                ErrorTranslation::new(format!("'{input}' is not a number"))
                    .with_suggestion("Timestamps are plain numbers of seconds or milliseconds")
                    .with_suggestion("Run `devkit now` to see the current timestamp")
            }
            Error::Timestamp(TimestampError::OutOfRange(input)) => {
                let translation =
                    ErrorTranslation::new(format!("{input} is outside 1970-01-01 to 2100-01-01"));
                match input.parse::<f64>() {
                    Ok(value) if value > MAX_TIMESTAMP_SECS && value / 1000.0 <= MAX_TIMESTAMP_SECS => {
                        translation.with_suggestion("This looks like milliseconds: try --millis")
                    }
                    Ok(value) if value < 0.0 => {
                        translation.with_suggestion("Dates before the Unix epoch are not supported")
                    }
                    _ => translation
                        .with_suggestion("Check whether the value is in seconds or milliseconds"),
                }
            }
            Error::Timestamp(TimestampError::InvalidDateFormat(format)) => {
                ErrorTranslation::new(format!("Date format {format:?} cannot be rendered"))
                    .with_suggestion("Use strftime specifiers, e.g. \"%Y-%m-%d %H:%M:%S\"")
                    .with_suggestion("Reset it with: devkit config --date-format \"%Y-%m-%d %H:%M:%S\"")
            }
            Error::DataDirUnavailable => {
                ErrorTranslation::new("Cannot locate a data directory for config and history")
                    .with_suggestion("Make sure $HOME is set")
            }
            Error::NotFound(what) => ErrorTranslation::new(format!("{what} not found"))
                .with_suggestion("List saved entries with: devkit history list"),
            Error::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                ErrorTranslation::new(format!("Permission denied: {e}"))
                    .with_suggestion("Check ownership of the devkit data directory")
            }
            other => ErrorTranslation::new(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
