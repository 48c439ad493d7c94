//! Coupling metrics.
//!
//! `ECP`, `ICP`, `FIO` and `IC` read element-level arc counts. `CP` follows
//! task outgoing sequence flows exactly one hop.

use std::collections::{HashMap, HashSet};

use bpmetrics_core::{
    category::names::{SEQUENCE_FLOW, SUBPROCESS, TASK},
    element::Element,
    relation::ElementRelation,
};

use super::{PerDiagram, per_diagram, ratio_or_zero};
use crate::structure::DiagramGraph;

/// Maximum of `f` over the elements whose category contains a fragment.
fn max_over(elements: &[Element], fragments: &[&str], f: impl Fn(&DiagramGraph, &str) -> f64) -> f64 {
    let graph = DiagramGraph::new(elements);
    elements
        .iter()
        .filter(|element| element.category_contains(fragments))
        .map(|element| f(&graph, element.element_id()))
        .fold(0.0, f64::max)
}

fn interface_weight(graph: &DiagramGraph, element_id: &str) -> f64 {
    let product = graph.outgoing_count(element_id) * graph.incoming_count(element_id);
    (product * product) as f64
}

/// `ECP`: largest outgoing arc count among tasks and subprocesses.
pub(super) fn exported_coupling(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        max_over(elements, &[TASK, SUBPROCESS], |graph, id| {
            graph.outgoing_count(id) as f64
        })
    })
}

/// `ICP`: largest incoming arc count among tasks and subprocesses.
pub(super) fn imported_coupling(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        max_over(elements, &[TASK, SUBPROCESS], |graph, id| {
            graph.incoming_count(id) as f64
        })
    })
}

/// `FIO`: largest `(out * in)^2` among subprocesses.
pub(super) fn fan_in_fan_out(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        max_over(elements, &[SUBPROCESS], interface_weight)
    })
}

/// `IC`: sum of `(out * in)^2` over tasks, rounded to one decimal.
pub(super) fn interface_complexity(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        let graph = DiagramGraph::new(elements);
        let sum: f64 = elements
            .iter()
            .filter(|element| element.category_contains(&[TASK]))
            .map(|element| interface_weight(&graph, element.element_id()))
            .sum();
        (sum * 10.0).round() / 10.0
    })
}

/// `CP`: share of task outgoing sequence flows that lead straight to a task.
///
/// Only the first target of each flow is inspected.
pub(super) fn task_coupling(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        let by_id: HashMap<&str, &Element> = elements
            .iter()
            .map(|element| (element.element_id(), element))
            .collect();
        let tasks: HashSet<&str> = elements
            .iter()
            .filter(|element| element.is(TASK))
            .map(Element::element_id)
            .collect();

        let mut flows = 0usize;
        let mut task_to_task = 0usize;
        for task in elements.iter().filter(|element| element.is(TASK)) {
            let outgoing_flows = task
                .outgoing()
                .unwrap_or_default()
                .iter()
                .filter_map(|id| by_id.get(id.as_str()))
                .filter(|target| target.is(SEQUENCE_FLOW));
            for flow in outgoing_flows {
                flows += 1;
                let first_target = flow.outgoing().and_then(|targets| targets.first());
                if first_target.is_some_and(|target| tasks.contains(target.as_str())) {
                    task_to_task += 1;
                }
            }
        }

        ratio_or_zero(task_to_task as f64, flows as f64)
    })
}
