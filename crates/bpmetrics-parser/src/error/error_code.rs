//! Error codes for the bpmetrics diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Payload decoding errors
//! - `E1xx` - Structural errors in the shape tree
//! - `E2xx` - Batch integrity errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Payload Errors (E0xx)
    // =========================================================================
    /// Malformed payload.
    ///
    /// The diagram payload is not valid JSON, or a field has the wrong type
    /// (for example a numeric `resourceId`).
    E001,

    /// Payload root is not a shape.
    ///
    /// The top-level JSON value must be an object describing the diagram
    /// container.
    E002,

    /// Invalid creation timestamp.
    ///
    /// The record's `datetime` could not be read. The diagram is still
    /// parsed, without a creation timestamp.
    E003,

    // =========================================================================
    // Structural Errors (E1xx)
    // =========================================================================
    /// Missing resource id.
    ///
    /// A shape has no `resourceId`, so it cannot become an element.
    E100,

    /// Duplicate resource id.
    ///
    /// Two shapes of the same diagram share a `resourceId`.
    E101,

    /// Outgoing reference without target.
    ///
    /// An entry of `outgoing` carries no `resourceId`. The entry is skipped.
    E102,

    // =========================================================================
    // Batch Errors (E2xx)
    // =========================================================================
    /// Duplicate model id.
    ///
    /// A batch contains more than one diagram with the same model id. Only
    /// the first one is kept.
    E200,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed payload",
            ErrorCode::E002 => "payload root is not a shape",
            ErrorCode::E003 => "invalid creation timestamp",
            ErrorCode::E100 => "missing resource id",
            ErrorCode::E101 => "duplicate resource id",
            ErrorCode::E102 => "outgoing reference without target",
            ErrorCode::E200 => "duplicate model id",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E200.to_string(), "E200");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E100.description(), "missing resource id");
        assert_eq!(ErrorCode::E200.description(), "duplicate model id");
    }
}
