//! Error adapter for converting BpmetricsError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Shape Locations
//!
//! Parser diagnostics point at [`ShapePath`](bpmetrics_parser::ShapePath)s
//! rather than byte ranges. The adapter lays out the labelled paths as a
//! small source text, one path per line, so that miette can underline each
//! location with its label message.
//!
//! # Multi-Error Support
//!
//! When a [`ParseError`] contains multiple diagnostics, each diagnostic is
//! rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use bpmetrics::{BpmetricsError, element::ModelId};
use bpmetrics_parser::{
    ParseError,
    error::{Diagnostic, Severity},
};

/// Adapter for a single parser diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    model_id: Option<&'a ModelId>,
    /// Labelled shape paths, one per line.
    locations: String,
    spans: Vec<SourceSpan>,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, model_id: Option<&'a ModelId>) -> Self {
        let mut locations = String::new();
        let mut spans = Vec::with_capacity(diag.labels().len());
        for label in diag.labels() {
            let path = label.path().to_string();
            spans.push(SourceSpan::new(locations.len().into(), path.len()));
            locations.push_str(&path);
            locations.push('\n');
        }

        Self {
            diag,
            model_id,
            locations,
            spans,
        }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .field("model_id", &self.model_id)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.model_id {
            Some(model_id) => write!(f, "model `{model_id}`: {}", self.diag.message()),
            None => write!(f, "{}", self.diag.message()),
        }
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diag.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        if self.locations.is_empty() {
            return None;
        }
        Some(&self.locations as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().zip(&self.spans).map(|(label, span)| {
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, *span)
            } else {
                LabeledSpan::new_with_span(message, *span)
            }
        })))
    }
}

/// Adapter for non-diagnostic [`BpmetricsError`] variants.
pub struct ErrorAdapter<'a>(pub &'a BpmetricsError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            BpmetricsError::Io(_) => "bpmetrics::io",
            BpmetricsError::Parse(_) => return None,
            BpmetricsError::Metric(_) => "bpmetrics::metric",
            BpmetricsError::Config(_) => "bpmetrics::config",
            BpmetricsError::Input(_) => "bpmetrics::input",
            BpmetricsError::Json(_) => "bpmetrics::json",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parser diagnostic with shape locations.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// One [`Reportable`] per diagnostic of a [`ParseError`].
pub fn parse_reportables(err: &ParseError) -> Vec<Reportable<'_>> {
    err.diagnostics()
        .iter()
        .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, err.model_id())))
        .collect()
}

/// Convert a [`BpmetricsError`] into a list of reportable errors.
///
/// For [`BpmetricsError::Parse`], this returns one [`Reportable`] for
/// each diagnostic in the error. For other error variants, this returns a
/// single [`Reportable`].
pub fn to_reportables(err: &BpmetricsError) -> Vec<Reportable<'_>> {
    match err {
        BpmetricsError::Parse(parse_err) => parse_reportables(parse_err),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Render reportables with miette's graphical handler.
pub fn render(reportables: &[Reportable<'_>]) -> Vec<String> {
    let reporter = miette::GraphicalReportHandler::new();
    reportables
        .iter()
        .map(|reportable| {
            let mut writer = String::new();
            // Writing into a String cannot fail; fall back to the plain message.
            if reporter.render_report(&mut writer, reportable).is_err() {
                writer = reportable.to_string();
            }
            writer
        })
        .collect()
}
