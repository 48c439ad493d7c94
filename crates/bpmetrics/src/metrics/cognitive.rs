//! Cognitive complexity.
//!
//! Each element contributes a static weight for the comprehension effort its
//! category demands. An exclusive gateway choosing among more than two
//! branches weighs more than a binary one.

use bpmetrics_core::{category::names::EXCLUSIVE_GATEWAY, relation::ElementRelation};

use super::{PerDiagram, per_diagram};
use crate::structure::DiagramGraph;

const COGNITIVE_WEIGHTS: &[(&str, u32)] = &[
    ("Task", 1),
    ("CollapsedSubprocess", 2),
    ("Subprocess", 2),
    ("CollapsedEventSubprocess", 2),
    ("EventSubprocess", 2),
    ("Exclusive_Databased_Gateway", 2),
    ("EventbasedGateway", 2),
    ("ParallelGateway", 4),
    ("InclusiveGateway", 7),
    ("ComplexGateway", 7),
    ("StartNoneEvent", 2),
    ("StartMessageEvent", 2),
    ("StartTimerEvent", 2),
    ("StartEscalationEvent", 2),
    ("StartConditionalEvent", 2),
    ("StartErrorEvent", 2),
    ("StartCompensationEvent", 2),
    ("StartSignalEvent", 2),
    ("StartMultipleEvent", 2),
    ("StartParallelMultipleEvent", 2),
    ("IntermediateMessageEventCatching", 3),
    ("IntermediateTimerEvent", 3),
    ("IntermediateEscalationEvent", 3),
    ("IntermediateConditionalEvent", 3),
    ("IntermediateLinkEventCatching", 3),
    ("IntermediateErrorEvent", 3),
    ("IntermediateCancelEvent", 3),
    ("IntermediateCompensationEventCatching", 3),
    ("IntermediateSignalEventCatching", 3),
    ("IntermediateMultipleEventCatching", 3),
    ("IntermediateParallelMultipleEventCatching", 3),
    ("IntermediateEvent", 3),
    ("IntermediateMessageEventThrowing", 3),
    ("IntermediateEscalationEventThrowing", 3),
    ("IntermediateLinkEventThrowing", 3),
    ("IntermediateCompensationEventThrowing", 3),
    ("IntermediateSignalEventThrowing", 3),
    ("IntermediateMultipleEventThrowing", 3),
    ("EndNoneEvent", 2),
    ("EndMessageEvent", 2),
    ("EndEscalationEvent", 2),
    ("EndErrorEvent", 2),
    ("EndCancelEvent", 2),
    ("EndCompensationEvent", 2),
    ("EndSignalEvent", 2),
    ("EndMultipleEvent", 2),
    ("EndTerminateEvent", 2),
    ("SequenceFlow", 1),
];

/// Weight of an exclusive gateway with more than two outgoing arcs.
const MULTI_WAY_EXCLUSIVE_WEIGHT: u32 = 3;

/// Cognitive weight of one element.
///
/// Unknown and missing categories weigh 0.
///
/// ```
/// use bpmetrics::metrics::cognitive_weight;
///
/// assert_eq!(cognitive_weight(Some("Exclusive_Databased_Gateway"), 2), 2);
/// assert_eq!(cognitive_weight(Some("Exclusive_Databased_Gateway"), 3), 3);
/// assert_eq!(cognitive_weight(Some("TextAnnotation"), 0), 0);
/// ```
pub fn cognitive_weight(category: Option<&str>, outgoing: usize) -> u32 {
    let Some(category) = category else {
        return 0;
    };
    if category == EXCLUSIVE_GATEWAY && outgoing > 2 {
        return MULTI_WAY_EXCLUSIVE_WEIGHT;
    }
    COGNITIVE_WEIGHTS
        .iter()
        .find(|(name, _)| *name == category)
        .map_or(0, |(_, weight)| *weight)
}

/// `Cognitive_Complexity`: sum of element weights.
pub(super) fn cognitive_complexity(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        let graph = DiagramGraph::new(elements);
        elements
            .iter()
            .map(|element| {
                cognitive_weight(
                    element.category(),
                    graph.outgoing_count(element.element_id()),
                )
            })
            .sum::<u32>() as f64
    })
}
