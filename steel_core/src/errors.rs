//! # Error Types
//!
//! Structured error types for steel_core. Every failure names the
//! sub-computation that raised it and the offending value (grade, category,
//! section type), since those are the only actionable diagnostics a caller
//! gets from a pure capacity evaluation.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::errors::{DesignError, DesignResult};
//!
//! fn check_bolt_diameter(d_f: f64) -> DesignResult<()> {
//!     if d_f <= 0.0 {
//!         return Err(DesignError::invalid_input(
//!             "d_f",
//!             d_f.to_string(),
//!             "Bolt diameter must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_bolt_diameter(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for steel_core operations
pub type DesignResult<T> = Result<T, DesignError>;

/// Structured error type for design evaluations.
///
/// Evaluation errors are fail-fast: an error raised while deriving any
/// sub-result aborts construction of the owning entity. A failure mode that
/// simply does not apply is not an error, see
/// [`Capacity::NotApplicable`](crate::connections::Capacity).
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum DesignError {
    /// A tag (section type, grade, bolt category, ...) is not recognised
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: String, value: String },

    /// A value the calculation cannot proceed without was not supplied
    #[error("Missing required input '{field}' for {context}")]
    MissingRequiredInput { field: String, context: String },

    /// A recognised combination that has no implemented design rule
    #[error("Not implemented: {calculation} - {case}")]
    UnimplementedCase { calculation: String, case: String },

    /// Inputs that are physically undefined for the calculation
    #[error("Degenerate input for {calculation}: {reason}")]
    DegenerateInput { calculation: String, reason: String },

    /// An input value is invalid (wrong type, out of range, malformed)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schedule schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl DesignError {
    /// Create an UnknownVariant error
    pub fn unknown_variant(kind: impl Into<String>, value: impl Into<String>) -> Self {
        DesignError::UnknownVariant {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// Create a MissingRequiredInput error
    pub fn missing_input(field: impl Into<String>, context: impl Into<String>) -> Self {
        DesignError::MissingRequiredInput {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Create an UnimplementedCase error
    pub fn unimplemented(calculation: impl Into<String>, case: impl Into<String>) -> Self {
        DesignError::UnimplementedCase {
            calculation: calculation.into(),
            case: case.into(),
        }
    }

    /// Create a DegenerateInput error
    pub fn degenerate(calculation: impl Into<String>, reason: impl Into<String>) -> Self {
        DesignError::DegenerateInput {
            calculation: calculation.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        DesignError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        DesignError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        DesignError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        DesignError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    ///
    /// Evaluation errors never are: the computation is deterministic.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DesignError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DesignError::UnknownVariant { .. } => "UNKNOWN_VARIANT",
            DesignError::MissingRequiredInput { .. } => "MISSING_REQUIRED_INPUT",
            DesignError::UnimplementedCase { .. } => "UNIMPLEMENTED_CASE",
            DesignError::DegenerateInput { .. } => "DEGENERATE_INPUT",
            DesignError::InvalidInput { .. } => "INVALID_INPUT",
            DesignError::FileError { .. } => "FILE_ERROR",
            DesignError::FileLocked { .. } => "FILE_LOCKED",
            DesignError::SerializationError { .. } => "SERIALIZATION_ERROR",
            DesignError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = DesignError::unknown_variant("steel grade", "GR999");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"UnknownVariant\""));
        let roundtrip: DesignError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_message_names_offending_value() {
        let error = DesignError::unknown_variant("bolt category", "10.9/S");
        assert_eq!(error.to_string(), "Unknown bolt category: '10.9/S'");

        let error = DesignError::missing_input("t", "AS3678 yield stress lookup");
        assert!(error.to_string().contains("AS3678"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(DesignError::missing_input("t", "x").error_code(), "MISSING_REQUIRED_INPUT");
        assert_eq!(DesignError::unimplemented("M_b", "one end").error_code(), "UNIMPLEMENTED_CASE");
        assert_eq!(DesignError::degenerate("M_b", "free").error_code(), "DEGENERATE_INPUT");
        assert!(!DesignError::degenerate("M_b", "free").is_recoverable());
        assert!(DesignError::file_locked("a", "b", "c").is_recoverable());
    }
}
