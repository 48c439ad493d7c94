//! The metrics engine.
//!
//! Every metric is a pure function from an [`ElementRelation`] to one value
//! per diagram. Metrics are listed in a static registry that maps the output
//! column name to the function and to the relation columns it needs. The
//! registry is the only place a metric has to be added.
//!
//! # Sentinels
//!
//! Degenerate inputs never raise:
//! - `CNC` is NaN for diagrams without nodes, `Density` for fewer than two.
//! - Every other ratio is 0 when its denominator is 0.
//! - Maxima and sums over an empty selection are 0.
//! - `creation_date_rank` is NaN for diagrams without a timestamp.
//!
//! A metric whose required column is missing from the relation fails with
//! [`MetricError::MissingColumn`] before looking at any row.

mod cognitive;
mod counts;
mod coupling;
mod halstead;
mod it;
mod organisation;
mod sequentiality;
mod temporal;

use std::fmt;

use indexmap::IndexMap;
use log::{debug, info, warn};
use rayon::prelude::*;
use thiserror::Error;

use bpmetrics_core::{
    element::{Element, ModelId},
    relation::{Column, ElementRelation},
};

use crate::report::{MetricsReport, MetricsTable};

pub use cognitive::cognitive_weight;

/// One value per diagram, in relation order.
pub type PerDiagram = IndexMap<ModelId, f64>;

/// Signature shared by every metric function.
pub type MetricFn = fn(&ElementRelation) -> PerDiagram;

/// Errors raised when selecting or evaluating metrics.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MetricError {
    #[error("metric `{metric}` requires the `{column}` column")]
    MissingColumn { metric: &'static str, column: Column },

    #[error("unknown metric `{0}`")]
    UnknownMetric(String),
}

/// A registered metric.
pub struct Metric {
    name: &'static str,
    requires: &'static [Column],
    compute: MetricFn,
}

impl Metric {
    /// Output column name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Relation columns the metric reads beyond the always-present ones.
    pub fn requires(&self) -> &'static [Column] {
        self.requires
    }

    /// Evaluate the metric over every diagram of the relation.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::MissingColumn`] naming the first required
    /// column the relation lacks.
    pub fn evaluate(&self, relation: &ElementRelation) -> Result<PerDiagram, MetricError> {
        if let Some(&column) = self
            .requires
            .iter()
            .find(|column| !relation.has_column(**column))
        {
            return Err(MetricError::MissingColumn {
                metric: self.name,
                column,
            });
        }
        Ok((self.compute)(relation))
    }
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metric")
            .field("name", &self.name)
            .field("requires", &self.requires)
            .finish()
    }
}

const fn metric(name: &'static str, requires: &'static [Column], compute: MetricFn) -> Metric {
    Metric {
        name,
        requires,
        compute,
    }
}

const OUTGOING: &[Column] = &[Column::Outgoing];
const PARENT: &[Column] = &[Column::Parent];

/// Every metric, in output column order.
pub static REGISTRY: &[Metric] = &[
    metric("CFC", &[], counts::control_flow_complexity),
    metric("NOAJS", &[], counts::activities_joins_splits),
    metric("NOA", &[], counts::activity_count),
    metric("CNC", &[], counts::connectivity),
    metric("Node_Count", &[], counts::node_count),
    metric("Edge_Count", &[], counts::edge_count),
    metric("Density", &[], counts::density),
    metric("ECP", OUTGOING, coupling::exported_coupling),
    metric("ICP", OUTGOING, coupling::imported_coupling),
    metric("FIO", OUTGOING, coupling::fan_in_fan_out),
    metric("IC", OUTGOING, coupling::interface_complexity),
    metric("HPC_D", &[], halstead::difficulty),
    metric("HPC_N", &[], halstead::length),
    metric("HPC_V", &[], halstead::volume),
    metric("Cognitive_Complexity", OUTGOING, cognitive::cognitive_complexity),
    metric("sequentiality_ratio", OUTGOING, sequentiality::sequentiality),
    metric("CP", OUTGOING, coupling::task_coupling),
    metric("process_user", &[], organisation::process_users),
    metric("max_workload", PARENT, organisation::max_workload),
    metric("mean_workload", PARENT, organisation::mean_workload),
    metric("autonomy", &[], organisation::autonomy),
    metric("operational_cost_proportion", &[], organisation::operational_cost),
    metric(
        "cycle_time_efficiency",
        &[Column::Parent, Column::Outgoing],
        organisation::cycle_time_efficiency,
    ),
    metric("creation_date_rank", &[Column::Datetime], temporal::creation_date_rank),
    metric("it_activities", OUTGOING, it::it_activities),
    metric("it_activities_proportion", OUTGOING, it::it_activities_proportion),
];

/// Look up a registered metric by its column name.
///
/// # Errors
///
/// Returns [`MetricError::UnknownMetric`] if no metric has that name.
pub fn lookup(name: &str) -> Result<&'static Metric, MetricError> {
    REGISTRY
        .iter()
        .find(|metric| metric.name == name)
        .ok_or_else(|| MetricError::UnknownMetric(name.to_string()))
}

/// Apply `f` to the rows of every diagram.
///
/// Diagrams without rows are still visited, with an empty slice.
pub(crate) fn per_diagram<F>(relation: &ElementRelation, mut f: F) -> PerDiagram
where
    F: FnMut(&[Element]) -> f64,
{
    relation
        .groups()
        .map(|(info, elements)| (info.model_id().clone(), f(elements)))
        .collect()
}

/// `numerator / denominator`, or 0 when the denominator is 0.
pub(crate) fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// A selection of registered metrics evaluated together.
///
/// Metrics share no state, so they are evaluated in parallel. A failing
/// metric is reported and left out of the table; the others still run.
#[derive(Debug, Clone)]
pub struct MetricsEngine {
    metrics: Vec<&'static Metric>,
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::all()
    }
}

impl MetricsEngine {
    /// An engine evaluating every registered metric.
    pub fn all() -> Self {
        Self {
            metrics: REGISTRY.iter().collect(),
        }
    }

    /// An engine evaluating the named metrics, in registry order.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::UnknownMetric`] for the first unknown name.
    pub fn with_metrics<I, S>(names: I) -> Result<Self, MetricError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected = Vec::new();
        for name in names {
            let metric = lookup(name.as_ref())?;
            if !selected.iter().any(|m: &&Metric| m.name == metric.name) {
                selected.push(metric);
            }
        }
        selected.sort_by_key(|metric| {
            REGISTRY
                .iter()
                .position(|m| m.name == metric.name)
                .unwrap_or(usize::MAX)
        });
        Ok(Self { metrics: selected })
    }

    /// Names of the selected metrics.
    pub fn metric_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.metrics.iter().map(|metric| metric.name)
    }

    /// Evaluate every selected metric.
    pub fn compute(&self, relation: &ElementRelation) -> MetricsReport {
        info!(
            metrics = self.metrics.len(),
            diagrams = relation.diagram_count();
            "Computing metrics"
        );

        let results: Vec<(&'static str, Result<PerDiagram, MetricError>)> = self
            .metrics
            .par_iter()
            .map(|metric| (metric.name, metric.evaluate(relation)))
            .collect();

        let mut table = MetricsTable::new(relation.diagrams().map(|info| info.model_id().clone()));
        let mut failures = Vec::new();
        for (name, result) in results {
            match result {
                Ok(values) => {
                    debug!(metric = name; "Metric computed");
                    table.insert_column(name, values);
                }
                Err(err) => {
                    warn!(metric = name; "Metric failed: {err}");
                    failures.push(err);
                }
            }
        }

        MetricsReport::new(table, failures)
    }
}
