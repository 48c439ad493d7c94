//! Error and diagnostic system for the bpmetrics parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Labeled shape paths pointing at the offending shapes
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors per diagram
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, shape
//! locations, and help text. The diagnostics of one failing diagram are
//! wrapped in [`ParseError`], which also names the diagram's model id.
//!
//! # Example
//!
//! ```
//! # use bpmetrics_parser::error::{Diagnostic, ErrorCode};
//! # use bpmetrics_parser::ShapePath;
//!
//! let duplicate = ShapePath::root().child(3);
//! let original = ShapePath::root().child(0).child(1);
//!
//! let diag = Diagnostic::error("resource id `sid-7` is used by more than one shape")
//!     .with_code(ErrorCode::E101)
//!     .with_label(duplicate, "duplicate definition")
//!     .with_secondary_label(original, "first defined here");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
