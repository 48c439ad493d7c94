//! The core diagnostic type for the bpmetrics error system.
//!
//! A [`Diagnostic`] represents a single error or warning with optional
//! error code, labeled shape locations, and help text.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    path::ShapePath,
};

/// A diagnostic message with shape location information.
///
/// Diagnostics carry:
/// - A severity level
/// - An optional error code for documentation and searchability
/// - A primary message describing the issue
/// - Zero or more labeled shape paths
/// - Optional help text with suggestions
///
/// # Example
///
/// ```text
/// error[E100]: shape has no resource id
///   at /childShapes/4/childShapes/0: missing `resourceId`
///   = help: every nested shape must carry a `resourceId`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use bpmetrics_parser::error::{Diagnostic, ErrorCode};
    /// # use bpmetrics_parser::ShapePath;
    ///
    /// let diag = Diagnostic::error("shape has no resource id")
    ///     .with_code(ErrorCode::E100)
    ///     .with_label(ShapePath::root().child(3), "missing `resourceId`")
    ///     .with_help("every nested shape must carry a `resourceId`");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, path: ShapePath, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(path, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, path: ShapePath, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(path, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Create a new diagnostic with the given severity and message.
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(primary) = self.labels.iter().find(|label| label.is_primary()) {
            write!(f, " (at {})", primary.path())?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert!(!diag.severity().is_warning());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_with_secondary_label() {
        let diag = Diagnostic::error("duplicate resource id")
            .with_label(ShapePath::root().child(3), "duplicate definition")
            .with_secondary_label(ShapePath::root().child(0), "first defined here");

        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
    }

    #[test]
    fn test_diagnostic_display_with_code_and_path() {
        let diag = Diagnostic::error("shape has no resource id")
            .with_code(ErrorCode::E100)
            .with_label(ShapePath::root().child(1).child(0), "missing");

        assert_eq!(
            diag.to_string(),
            "error[E100]: shape has no resource id (at /childShapes/1/childShapes/0)"
        );
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::warning("reference skipped");

        assert_eq!(diag.to_string(), "warning: reference skipped");
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::warning("outgoing reference without target")
            .with_code(ErrorCode::E102)
            .with_label(ShapePath::root().child(2), "entry 0")
            .with_help("the reference is ignored");

        assert!(diag.severity().is_warning());
        assert_eq!(diag.code(), Some(ErrorCode::E102));
        assert_eq!(diag.help(), Some("the reference is ignored"));
    }
}
