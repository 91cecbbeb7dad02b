//! # Error Types
//!
//! Structured error types for calc_core. Every failure a calculator can hit
//! is one of three kinds:
//!
//! - **Input validation**: a non-positive or out-of-range input. The
//!   calculation is aborted before any formula runs.
//! - **Degenerate formula**: a denominator that is zero or negative. The
//!   engine refuses to return an infinite or negative pressure.
//! - **I/O and export**: writing reports, loading configuration.
//!
//! A missing schedule entry is *not* an error; it is an absent `Option`.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_m: f64) -> CalcResult<()> {
//!     if length_m < 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "length_m".to_string(),
//!             value: length_m.to_string(),
//!             reason: "Length cannot be negative".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A single input value is invalid (out of range, wrong unit, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// One or more inputs failed validation; reported as a single failure
    #[error("Validation failed for [{}]: {reason}", .fields.join(", "))]
    ValidationFailed { fields: Vec<String>, reason: String },

    /// A formula denominator is zero or negative for the given inputs
    #[error("Degenerate formula: {formula} - {reason}")]
    DegenerateFormula { formula: String, reason: String },

    /// Report generation (PDF, spreadsheet) failed
    #[error("Export failed: {format} - {reason}")]
    ExportFailed { format: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Configuration file could not be parsed or written
    #[error("Configuration error in '{path}': {reason}")]
    ConfigError { path: String, reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ValidationFailed error
    pub fn validation_failed(fields: Vec<String>, reason: impl Into<String>) -> Self {
        CalcError::ValidationFailed {
            fields,
            reason: reason.into(),
        }
    }

    /// Create a DegenerateFormula error
    pub fn degenerate_formula(formula: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DegenerateFormula {
            formula: formula.into(),
            reason: reason.into(),
        }
    }

    /// Create an ExportFailed error
    pub fn export_failed(format: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ExportFailed {
            format: format.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ConfigError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for failures caused by user input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. } | CalcError::ValidationFailed { .. } | CalcError::DegenerateFormula { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::ValidationFailed { .. } => "VALIDATION_FAILED",
            CalcError::DegenerateFormula { .. } => "DEGENERATE_FORMULA",
            CalcError::ExportFailed { .. } => "EXPORT_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError { reason: e.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::validation_failed(
            vec!["pressure".to_string(), "efficiency".to_string()],
            "must be positive",
        );
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"ValidationFailed\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_validation_message_lists_fields() {
        let error = CalcError::validation_failed(
            vec!["pressure".to_string(), "diameter".to_string()],
            "must be positive",
        );
        assert_eq!(
            error.to_string(),
            "Validation failed for [pressure, diameter]: must be positive"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::degenerate_formula("P_max", "D - 2Yt <= 0").error_code(),
            "DEGENERATE_FORMULA"
        );
        assert_eq!(CalcError::export_failed("pdf", "boom").error_code(), "EXPORT_FAILED");
        assert!(CalcError::degenerate_formula("P_max", "x").is_input_error());
        assert!(!CalcError::file_error("write", "a.pdf", "denied").is_input_error());
    }
}
