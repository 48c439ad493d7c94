//! Batch parsing.
//!
//! Records are screened sequentially (namespace filter, duplicate model ids),
//! then parsed in parallel. A failing diagram never affects the others.

use std::collections::HashSet;

use log::{info, warn};
use rayon::prelude::*;

use bpmetrics_core::{element::ModelId, relation::ElementRelation};

use crate::{
    ParseOptions, parse_record,
    error::{Diagnostic, ErrorCode, ParseError},
    record::ModelRecord,
};

/// Result of parsing a batch of records.
#[derive(Debug)]
pub struct BatchOutcome {
    relation: ElementRelation,
    failures: Vec<ParseError>,
    skipped: usize,
}

impl BatchOutcome {
    /// The concatenated relation of every diagram that parsed.
    pub fn relation(&self) -> &ElementRelation {
        &self.relation
    }

    /// One error per rejected record, in input order.
    pub fn failures(&self) -> &[ParseError] {
        &self.failures
    }

    /// Number of records dropped by the namespace filter.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Split into the relation and the failures.
    pub fn into_parts(self) -> (ElementRelation, Vec<ParseError>) {
        (self.relation, self.failures)
    }
}

/// Parse a batch of records into one relation.
///
/// - Records outside [`ParseOptions::namespace`] are skipped.
/// - A record whose model id was already seen is rejected with `E200`; the
///   first occurrence is kept.
/// - Remaining records are parsed in parallel; their relations are
///   concatenated in input order.
pub fn parse_batch(records: Vec<ModelRecord>, options: &ParseOptions) -> BatchOutcome {
    info!(records = records.len(); "Parsing batch");

    let mut seen: HashSet<ModelId> = HashSet::with_capacity(records.len());
    let mut accepted = Vec::with_capacity(records.len());
    // (input position, error) so failures can be reported in input order
    let mut failures: Vec<(usize, ParseError)> = Vec::new();
    let mut skipped = 0;

    for (position, record) in records.into_iter().enumerate() {
        if let Some(namespace) = options.namespace() {
            if record.namespace() != Some(namespace) {
                skipped += 1;
                continue;
            }
        }

        if !seen.insert(record.model_id().clone()) {
            warn!(model_id = record.model_id().as_str(); "Duplicate model id in batch");
            failures.push((position, duplicate_model(record.model_id())));
            continue;
        }

        accepted.push((position, record));
    }

    if skipped > 0 {
        warn!(
            skipped = skipped,
            namespace = options.namespace().unwrap_or_default();
            "Dropped records outside the configured namespace"
        );
    }

    let results: Vec<(usize, Result<ElementRelation, ParseError>)> = accepted
        .into_par_iter()
        .map(|(position, record)| (position, parse_record(record, options)))
        .collect();

    let mut relation = ElementRelation::new(options.columns());
    for (position, result) in results {
        match result {
            Ok(diagram) => {
                if let Err(err) = relation.concat(diagram) {
                    failures.push((position, ParseError::from(Diagnostic::error(err.to_string()))));
                }
            }
            Err(err) => {
                warn!(
                    model_id = err.model_id().map(ModelId::as_str).unwrap_or_default();
                    "Diagram rejected: {err}"
                );
                failures.push((position, err));
            }
        }
    }
    failures.sort_by_key(|(position, _)| *position);

    info!(
        diagrams = relation.diagram_count(),
        elements = relation.len(),
        failures = failures.len(),
        skipped = skipped;
        "Parsed batch"
    );

    BatchOutcome {
        relation,
        failures: failures.into_iter().map(|(_, err)| err).collect(),
        skipped,
    }
}

fn duplicate_model(model_id: &ModelId) -> ParseError {
    ParseError::new(
        Some(model_id.clone()),
        vec![
            Diagnostic::error(format!("model id `{model_id}` appears more than once"))
                .with_code(ErrorCode::E200)
                .with_help("only the first record with this model id is kept"),
        ],
    )
}
