//! Sequentiality ratio.

use bpmetrics_core::relation::ElementRelation;

use super::{PerDiagram, per_diagram, ratio_or_zero};
use crate::structure::DiagramGraph;

/// `sequentiality_ratio`: share of node arcs joining two non-connectors.
///
/// Node arcs are resolved through connecting objects, see
/// [`DiagramGraph::node_arcs`]. The ratio is rounded to two decimals;
/// diagrams without node arcs score 0.
pub(super) fn sequentiality(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        let arcs = DiagramGraph::new(elements).node_arcs();
        let sequential = arcs
            .iter()
            .filter(|(source, target)| !arcs.is_connector(source) && !arcs.is_connector(target))
            .count();
        let ratio = ratio_or_zero(sequential as f64, arcs.len() as f64);
        (ratio * 100.0).round() / 100.0
    })
}
