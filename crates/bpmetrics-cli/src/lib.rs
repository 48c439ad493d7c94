//! CLI logic for the bpmetrics tool.
//!
//! This module reads model records, measures them with the metrics library
//! and writes the combined metrics table.

pub mod error_adapter;

mod args;
mod config;
mod input;

pub use args::Args;

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use log::{info, warn};

use bpmetrics::{Analyzer, BpmetricsError, relation::ElementRelation};

use error_adapter::{parse_reportables, render};
use input::Input;

/// Run the bpmetrics CLI application
///
/// Diagrams that fail to parse in a batch are reported as warnings and
/// left out of the table; a single export that fails to parse aborts the
/// run.
///
/// # Errors
///
/// Returns `BpmetricsError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Undecodable input files
/// - Parse errors of a single export
/// - Unknown metric names in the configuration
pub fn run(args: &Args) -> Result<(), BpmetricsError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing models"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let analyzer = Analyzer::new(app_config);

    let source = fs::read_to_string(&args.input)?;
    let relation = match input::decode(Path::new(&args.input), source)? {
        Input::Export { model_id, text } => analyzer.parse_json(model_id, &text)?,
        Input::Records(records) => {
            let (relation, failures) = analyzer.parse(records).into_parts();
            for failure in &failures {
                for report in render(&parse_reportables(failure)) {
                    warn!("{report}");
                }
            }
            relation
        }
    };

    let report = analyzer.measure(&relation)?;
    for failure in report.failures() {
        warn!("Metric skipped: {failure}");
    }

    let table = serde_json::to_string_pretty(report.table())?;
    fs::write(&args.output, table)?;
    info!(output_file = args.output, diagrams = report.table().row_count(); "Metrics exported successfully");

    if let Some(path) = &args.elements {
        write_elements(path, &relation)?;
        info!(output_file = path, elements = relation.len(); "Element relation exported successfully");
    }

    Ok(())
}

/// Write the element relation as JSON Lines.
fn write_elements(path: &str, relation: &ElementRelation) -> Result<(), BpmetricsError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for element in relation.elements() {
        serde_json::to_writer(&mut writer, element)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
