//! Size and connectivity counts.

use bpmetrics_core::{
    category::{HighLevelCategory, LowLevelCategory},
    element::Element,
    relation::ElementRelation,
};

use super::{PerDiagram, per_diagram};

fn count_low_level(elements: &[Element], groups: &[LowLevelCategory]) -> usize {
    elements
        .iter()
        .filter(|element| groups.contains(&element.low_level_category()))
        .count()
}

fn count_high_level(elements: &[Element], group: HighLevelCategory) -> usize {
    elements
        .iter()
        .filter(|element| element.high_level_category() == group)
        .count()
}

/// Nodes and edges of one diagram.
pub(super) fn nodes_and_edges(elements: &[Element]) -> (f64, f64) {
    (
        count_high_level(elements, HighLevelCategory::Node) as f64,
        count_high_level(elements, HighLevelCategory::Edge) as f64,
    )
}

/// `CFC`: number of gateways.
pub(super) fn control_flow_complexity(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        count_low_level(elements, &[LowLevelCategory::Gateways]) as f64
    })
}

/// `NOAJS`: number of activities, joins and splits.
pub(super) fn activities_joins_splits(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        count_low_level(
            elements,
            &[LowLevelCategory::Activities, LowLevelCategory::Gateways],
        ) as f64
    })
}

/// `NOA`: number of activities.
pub(super) fn activity_count(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        count_low_level(elements, &[LowLevelCategory::Activities]) as f64
    })
}

pub(super) fn node_count(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| nodes_and_edges(elements).0)
}

pub(super) fn edge_count(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| nodes_and_edges(elements).1)
}

/// `CNC`: edges per node, NaN without nodes.
pub(super) fn connectivity(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        let (nodes, edges) = nodes_and_edges(elements);
        if nodes == 0.0 { f64::NAN } else { edges / nodes }
    })
}

/// `Density`: edges over the maximum number of arcs, NaN below two nodes.
pub(super) fn density(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        let (nodes, edges) = nodes_and_edges(elements);
        if nodes <= 1.0 {
            f64::NAN
        } else {
            edges / (nodes * (nodes - 1.0))
        }
    })
}
