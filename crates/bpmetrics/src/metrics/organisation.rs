//! Organisational and efficiency metrics.
//!
//! These use category membership as a stand-in for information the export
//! does not carry: plain tasks count as manual work, lanes labeled "System"
//! as automation.

use std::collections::{HashMap, HashSet};

use bpmetrics_core::{
    category::{
        LowLevelCategory,
        names::{
            ASSOCIATION_UNDIRECTED, COMPLEX_GATEWAY, EVENT_BASED_GATEWAY, EXCLUSIVE_GATEWAY,
            INCLUSIVE_GATEWAY, INTERMEDIATE_MESSAGE_EVENT_CATCHING, INTERMEDIATE_TIMER_EVENT,
            LANE, MESSAGE_FLOW, PARALLEL_GATEWAY, PROCESS_PARTICIPANT, SEQUENCE_FLOW, TASK,
        },
    },
    element::Element,
    relation::ElementRelation,
};

use super::{PerDiagram, per_diagram, ratio_or_zero};

const EXTERNAL_DEPENDENCIES: &[LowLevelCategory] = &[
    LowLevelCategory::DataElements,
    LowLevelCategory::Events,
    LowLevelCategory::Swimlanes,
    LowLevelCategory::Artifacts,
];

const MANUAL: &[&str] = &[TASK];

const NON_VALUE_ADDING: &[&str] = &[
    EXCLUSIVE_GATEWAY,
    EVENT_BASED_GATEWAY,
    PARALLEL_GATEWAY,
    INCLUSIVE_GATEWAY,
    COMPLEX_GATEWAY,
    INTERMEDIATE_MESSAGE_EVENT_CATCHING,
    INTERMEDIATE_TIMER_EVENT,
    SEQUENCE_FLOW,
    ASSOCIATION_UNDIRECTED,
    MESSAGE_FLOW,
];

/// Lane label fragment marking automated work.
const SYSTEM_MARKER: &str = "System";

fn is_one_of(element: &Element, categories: &[&str]) -> bool {
    element
        .category()
        .is_some_and(|category| categories.contains(&category))
}

/// `process_user`: distinct participants and lanes.
pub(super) fn process_users(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        elements
            .iter()
            .filter(|element| is_one_of(element, &[PROCESS_PARTICIPANT, LANE]))
            .map(Element::element_id)
            .collect::<HashSet<_>>()
            .len() as f64
    })
}

/// Tasks per parent container of one diagram.
fn tasks_per_parent(elements: &[Element]) -> Vec<usize> {
    let mut per_parent: HashMap<Option<&str>, usize> = HashMap::new();
    for task in elements.iter().filter(|element| element.is(TASK)) {
        *per_parent.entry(task.parent()).or_insert(0) += 1;
    }
    per_parent.into_values().collect()
}

/// `max_workload`: most tasks under one parent, 0 without tasks.
pub(super) fn max_workload(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        tasks_per_parent(elements).into_iter().max().unwrap_or(0) as f64
    })
}

/// `mean_workload`: average tasks per parent holding tasks, 0 without tasks.
pub(super) fn mean_workload(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        let workloads = tasks_per_parent(elements);
        let total: usize = workloads.iter().sum();
        ratio_or_zero(total as f64, workloads.len() as f64)
    })
}

/// `autonomy`: share of elements depending on something outside the flow.
pub(super) fn autonomy(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        let external = elements
            .iter()
            .filter(|element| EXTERNAL_DEPENDENCIES.contains(&element.low_level_category()))
            .count();
        ratio_or_zero(external as f64, elements.len() as f64)
    })
}

/// `operational_cost_proportion`: share of manual or non-value-adding elements.
pub(super) fn operational_cost(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        let costly = elements
            .iter()
            .filter(|element| is_one_of(element, MANUAL) || is_one_of(element, NON_VALUE_ADDING))
            .count();
        ratio_or_zero(costly as f64, elements.len() as f64)
    })
}

/// `cycle_time_efficiency`: automated plus parallel work per activity.
///
/// Every element sitting directly in a lane whose label contains "System"
/// counts as automated, whatever its category. Parallel work counts the outgoing entries of every parallel
/// gateway that splits into more than one branch.
pub(super) fn cycle_time_efficiency(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        let system_lanes: HashSet<&str> = elements
            .iter()
            .filter(|element| element.is(LANE))
            .filter(|lane| lane.label().is_some_and(|label| label.contains(SYSTEM_MARKER)))
            .map(Element::element_id)
            .collect();

        let activities = elements
            .iter()
            .filter(|element| element.low_level_category() == LowLevelCategory::Activities)
            .count();
        let automated = elements
            .iter()
            .filter(|element| {
                element
                    .parent()
                    .is_some_and(|parent| system_lanes.contains(parent))
            })
            .count();

        let parallel: usize = elements
            .iter()
            .filter(|element| element.is(PARALLEL_GATEWAY))
            .map(|gateway| gateway.outgoing().map_or(0, <[String]>::len))
            .filter(|&branches| branches > 1)
            .sum();

        ratio_or_zero((automated + parallel) as f64, activities as f64)
    })
}

#[cfg(test)]
mod tests {
    use bpmetrics_core::element::ModelId;
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::metrics::tests_support::{relation_of, row};

    fn in_lane(id: &str, category: &str, lane: &str) -> Element {
        row(id, category, &[]).with_parent(Some(lane.to_string()))
    }

    fn lane(id: &str, label: &str) -> Element {
        row(id, "Lane", &[]).with_label(Some(label.to_string()))
    }

    fn office() -> ElementRelation {
        relation_of(vec![
            row("pool", "Pool", &[]),
            lane("l1", "Clerk"),
            lane("l2", "ERP System"),
            in_lane("t1", "Task", "l1"),
            in_lane("t2", "Task", "l1"),
            in_lane("t3", "Task", "l1"),
            in_lane("t4", "Task", "l2"),
            in_lane("sub", "CollapsedSubprocess", "l2"),
            row("g", "ParallelGateway", &["f1", "f2"]),
            row("f1", "SequenceFlow", &[]),
            row("f2", "SequenceFlow", &[]),
            row("d", "DataObject", &[]),
            row("e", "EndNoneEvent", &[]),
        ])
    }

    #[test]
    fn test_process_users() {
        let m = ModelId::new("m1");
        assert_eq!(process_users(&office())[&m], 2.0);
    }

    #[test]
    fn test_workload() {
        let relation = office();
        let m = ModelId::new("m1");

        assert_eq!(max_workload(&relation)[&m], 3.0);
        assert_approx_eq!(f64, mean_workload(&relation)[&m], 2.0);
    }

    #[test]
    fn test_workload_without_tasks() {
        let relation = relation_of(vec![row("e", "EndNoneEvent", &[])]);
        let m = ModelId::new("m1");

        assert_eq!(max_workload(&relation)[&m], 0.0);
        assert_eq!(mean_workload(&relation)[&m], 0.0);
    }

    #[test]
    fn test_autonomy() {
        let m = ModelId::new("m1");
        // pool, two lanes, data object, end event out of 13
        assert_approx_eq!(f64, autonomy(&office())[&m], 5.0 / 13.0);
    }

    #[test]
    fn test_operational_cost() {
        let m = ModelId::new("m1");
        // four tasks, one gateway, two sequence flows
        assert_approx_eq!(f64, operational_cost(&office())[&m], 7.0 / 13.0);
    }

    #[test]
    fn test_cycle_time_efficiency() {
        let m = ModelId::new("m1");
        // t4 and sub are automated, the gateway splits in two, five activities
        assert_approx_eq!(f64, cycle_time_efficiency(&office())[&m], 4.0 / 5.0);
    }

    #[test]
    fn test_cycle_time_counts_every_element_in_system_lane() {
        let relation = relation_of(vec![
            lane("l", "ERP System"),
            in_lane("t", "Task", "l"),
            in_lane("d", "DataObject", "l"),
            in_lane("timer", "IntermediateTimerEvent", "l"),
        ]);

        // three automated elements over one activity
        assert_approx_eq!(f64, cycle_time_efficiency(&relation)[&ModelId::new("m1")], 3.0);
    }

    #[test]
    fn test_cycle_time_without_activities() {
        let relation = relation_of(vec![row("g", "ParallelGateway", &["a", "b"])]);
        assert_eq!(cycle_time_efficiency(&relation)[&ModelId::new("m1")], 0.0);
    }
}
