//! bpmetrics - structural and cognitive complexity metrics for BPMN models.
//!
//! Exported diagrams are flattened into an element relation, and a library
//! of independent metric functions measures every diagram of the relation.

pub mod config;
pub mod metrics;

mod error;
mod report;
mod structure;

pub use bpmetrics_core::{category, element, metadata, relation, shape};
pub use bpmetrics_parser::{BatchOutcome, ModelRecord, ParseError, Payload};

pub use error::BpmetricsError;
pub use metrics::{MetricError, MetricsEngine};
pub use report::{MetricsReport, MetricsTable};

use log::{debug, info, trace};

use bpmetrics_core::{element::ModelId, metadata::DiagramInfo, relation::ElementRelation};
use bpmetrics_parser::ParseOptions;

use config::AppConfig;

/// Entry point for parsing exports and measuring them.
///
/// # Examples
///
/// ```rust
/// use bpmetrics::{Analyzer, config::AppConfig};
///
/// let export = r#"{
///     "resourceId": "canvas",
///     "childShapes": [
///         {"resourceId": "s", "stencil": {"id": "StartNoneEvent"}, "outgoing": [{"resourceId": "f"}]},
///         {"resourceId": "f", "stencil": {"id": "SequenceFlow"}, "outgoing": [{"resourceId": "e"}]},
///         {"resourceId": "e", "stencil": {"id": "EndNoneEvent"}}
///     ]
/// }"#;
///
/// let analyzer = Analyzer::new(AppConfig::default());
/// let relation = analyzer.parse_json("m1", export).expect("Failed to parse");
/// let report = analyzer.measure(&relation).expect("Failed to measure");
///
/// let node_count = report.table().get(&"m1".into(), "Node_Count");
/// assert_eq!(node_count, Some(2.0));
/// ```
#[derive(Debug, Default)]
pub struct Analyzer {
    config: AppConfig,
}

impl Analyzer {
    /// Create a new analyzer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the parser options derived from the configuration.
    pub fn parse_options(&self) -> ParseOptions {
        self.config.parser().parse_options()
    }

    /// Parse one diagram from its JSON export text.
    ///
    /// # Errors
    ///
    /// Returns `BpmetricsError::Parse` with the diagnostics of the diagram.
    pub fn parse_json(
        &self,
        model_id: impl Into<ModelId>,
        text: &str,
    ) -> Result<ElementRelation, BpmetricsError> {
        let info = DiagramInfo::new(model_id.into());
        info!(model_id = info.model_id().as_str(); "Parsing diagram");

        let relation = bpmetrics_parser::parse_json(text, info, &self.parse_options())?;

        debug!(elements = relation.len(); "Diagram parsed successfully");
        trace!(relation:?; "Parsed relation");
        Ok(relation)
    }

    /// Parse a batch of records.
    ///
    /// Failing records are reported in the outcome; they never abort the
    /// batch.
    pub fn parse(&self, records: Vec<ModelRecord>) -> BatchOutcome {
        bpmetrics_parser::parse_batch(records, &self.parse_options())
    }

    /// Compute the configured metrics over a relation.
    ///
    /// # Errors
    ///
    /// Returns `BpmetricsError::Metric` if the configuration names an
    /// unknown metric. Metrics that fail on this relation are listed in
    /// [`MetricsReport::failures`] instead.
    pub fn measure(&self, relation: &ElementRelation) -> Result<MetricsReport, BpmetricsError> {
        let engine = self.config.metrics().engine()?;
        let report = engine.compute(relation);

        info!(
            diagrams = report.table().row_count(),
            metrics = report.table().columns().len(),
            failures = report.failures().len();
            "Metrics computed"
        );
        Ok(report)
    }
}
