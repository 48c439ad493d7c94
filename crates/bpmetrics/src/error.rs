//! Error types for bpmetrics operations.
//!
//! This module provides the main error type [`BpmetricsError`] which wraps
//! the error conditions of parsing, measuring and I/O.

use std::io;

use thiserror::Error;

use bpmetrics_parser::ParseError;

use crate::metrics::MetricError;

/// The main error type for bpmetrics operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries structured diagnostics with shape paths that
/// can be used for rich error reporting.
#[derive(Debug, Error)]
pub enum BpmetricsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Metric error: {0}")]
    Metric(#[from] MetricError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
