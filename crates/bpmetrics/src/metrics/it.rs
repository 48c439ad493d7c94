//! IT support of a process.

use bpmetrics_core::{
    category::names::{IT_SYSTEM, SUBPROCESS, TASK},
    element::Element,
    relation::ElementRelation,
};

use super::{PerDiagram, per_diagram, ratio_or_zero};
use crate::structure::DiagramGraph;

/// Arcs touching IT systems, counted from both ends.
fn it_arcs(elements: &[Element]) -> usize {
    let graph = DiagramGraph::new(elements);
    elements
        .iter()
        .filter(|element| element.is(IT_SYSTEM))
        .map(|system| {
            graph.outgoing_count(system.element_id()) + graph.incoming_count(system.element_id())
        })
        .sum()
}

/// `it_activities`: incoming plus outgoing arcs of IT systems.
pub(super) fn it_activities(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| it_arcs(elements) as f64)
}

/// `it_activities_proportion`: IT arcs per task or subprocess.
pub(super) fn it_activities_proportion(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        let work = elements
            .iter()
            .filter(|element| element.category_contains(&[TASK, SUBPROCESS]))
            .count();
        ratio_or_zero(it_arcs(elements) as f64, work as f64)
    })
}
