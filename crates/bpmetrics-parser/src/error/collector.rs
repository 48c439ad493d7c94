//! Collector for accumulating diagnostics while flattening one diagram.
//!
//! The [`DiagnosticCollector`] lets the parser report every problem of a
//! diagram instead of stopping at the first one.

use bpmetrics_core::element::ModelId;
use log::warn;

use crate::error::{Diagnostic, ParseError};

/// A collector for accumulating diagnostics during a processing phase.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    ///
    /// The diagnostic is added to the collection and if it's an error,
    /// the collector is marked as having errors.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection for the given model.
    ///
    /// - If there are errors, returns `Err(ParseError)` with all diagnostics.
    /// - Otherwise logs the warnings and returns `Ok(())`.
    pub fn finish(self, model_id: &ModelId) -> Result<(), ParseError> {
        if self.has_errors {
            return Err(ParseError::new(Some(model_id.clone()), self.diagnostics));
        }

        for diagnostic in &self.diagnostics {
            warn!(model_id = model_id.as_str(); "{diagnostic}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, path::ShapePath};

    fn model() -> ModelId {
        ModelId::new("m1")
    }

    #[test]
    fn test_collector_new_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish(&model()).is_ok());
    }

    #[test]
    fn test_collector_emit_error_finish_err() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::error("test error"));

        assert!(collector.finish(&model()).is_err());
    }

    #[test]
    fn test_collector_emit_warning_finish_ok() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::warning("test warning"));

        assert!(collector.finish(&model()).is_ok());
    }

    #[test]
    fn test_collector_finish_with_errors() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(
            Diagnostic::error("shape has no resource id")
                .with_code(ErrorCode::E100)
                .with_label(ShapePath::root().child(0), "here"),
        );
        collector.emit(Diagnostic::warning("test warning"));

        let err = collector.finish(&model()).unwrap_err();
        assert_eq!(err.model_id(), Some(&model()));
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[0].message(), "shape has no resource id");
    }
}
