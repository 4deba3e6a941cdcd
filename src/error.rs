//! Error types for the Commission Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing and reconciling
//! commission figures.

use thiserror::Error;

/// The main error type for the Commission Engine.
///
/// Compute functions fail loudly on invalid numeric input. Record mapping is
/// lenient on individual fields (they coerce to zero) and only fails on
/// structural problems such as an empty record set.
///
/// # Example
///
/// ```
/// use commission_engine::error::EngineError;
///
/// let error = EngineError::InvalidField {
///     field: "salesExVAT".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid field: salesExVAT");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but describes an unusable policy.
    #[error("Invalid configuration value '{field}': {message}")]
    ConfigInvalid {
        /// The offending configuration key.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A numeric input was negative, non-finite or unparsable.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput {
        /// The input that was rejected.
        field: String,
        /// A description of what made the input invalid.
        message: String,
    },

    /// A field update named a field that cannot be set.
    #[error("Invalid field: {field}")]
    InvalidField {
        /// The unrecognized field name.
        field: String,
    },

    /// No employee entry with the given id exists in the month.
    #[error("Employee entry not found: {employee_id}")]
    NotFound {
        /// The id that was looked up.
        employee_id: String,
    },

    /// No month exists at the given ledger position.
    #[error("Month not found at index {index}")]
    MonthNotFound {
        /// The requested position.
        index: usize,
    },

    /// A record set that must contain at least one record was empty.
    #[error("No records supplied")]
    EmptyRecords,
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
