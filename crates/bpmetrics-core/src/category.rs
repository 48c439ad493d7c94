//! Static stencil category tables.
//!
//! Every stencil category of the BPMN 2.0 stencil set belongs to one
//! [`LowLevelCategory`] (Activities, Gateways, Events, ...), and every
//! low-level category to one [`HighLevelCategory`] (node, edge, other).
//! Categories missing from the tables fall into
//! [`LowLevelCategory::Other`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stencil category names used by the metrics.
pub mod names {
    pub const TASK: &str = "Task";
    pub const SUBPROCESS: &str = "Subprocess";
    pub const COLLAPSED_SUBPROCESS: &str = "CollapsedSubprocess";
    pub const EVENT_SUBPROCESS: &str = "EventSubprocess";
    pub const COLLAPSED_EVENT_SUBPROCESS: &str = "CollapsedEventSubprocess";
    pub const CALL_ACTIVITY: &str = "CallActivity";

    pub const EXCLUSIVE_GATEWAY: &str = "Exclusive_Databased_Gateway";
    pub const EVENT_BASED_GATEWAY: &str = "EventbasedGateway";
    pub const PARALLEL_GATEWAY: &str = "ParallelGateway";
    pub const INCLUSIVE_GATEWAY: &str = "InclusiveGateway";
    pub const COMPLEX_GATEWAY: &str = "ComplexGateway";

    pub const START_NONE_EVENT: &str = "StartNoneEvent";
    pub const END_NONE_EVENT: &str = "EndNoneEvent";
    pub const INTERMEDIATE_MESSAGE_EVENT_CATCHING: &str = "IntermediateMessageEventCatching";
    pub const INTERMEDIATE_TIMER_EVENT: &str = "IntermediateTimerEvent";

    pub const SEQUENCE_FLOW: &str = "SequenceFlow";
    pub const MESSAGE_FLOW: &str = "MessageFlow";
    pub const ASSOCIATION_UNDIRECTED: &str = "Association_Undirected";
    pub const ASSOCIATION_UNIDIRECTIONAL: &str = "Association_Unidirectional";
    pub const ASSOCIATION_BIDIRECTIONAL: &str = "Association_Bidirectional";

    pub const DATA_OBJECT: &str = "DataObject";
    pub const DATA_STORE: &str = "DataStore";
    pub const MESSAGE: &str = "Message";
    pub const IT_SYSTEM: &str = "ITSystem";

    pub const POOL: &str = "Pool";
    pub const COLLAPSED_POOL: &str = "CollapsedPool";
    pub const LANE: &str = "Lane";
    pub const VERTICAL_POOL: &str = "VerticalPool";
    pub const COLLAPSED_VERTICAL_POOL: &str = "CollapsedVerticalPool";
    pub const VERTICAL_LANE: &str = "VerticalLane";
    pub const PROCESS_PARTICIPANT: &str = "processparticipant";

    pub const TEXT_ANNOTATION: &str = "TextAnnotation";
    pub const GROUP: &str = "Group";
}

use names::*;

/// Broad grouping of a stencil category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LowLevelCategory {
    Activities,
    Gateways,
    Events,
    ConnectingObjects,
    DataElements,
    Swimlanes,
    Artifacts,
    Other,
}

impl LowLevelCategory {
    /// Returns the display name of the grouping (e.g. "Data Elements").
    pub fn as_str(&self) -> &'static str {
        match self {
            LowLevelCategory::Activities => "Activities",
            LowLevelCategory::Gateways => "Gateways",
            LowLevelCategory::Events => "Events",
            LowLevelCategory::ConnectingObjects => "Connecting Objects",
            LowLevelCategory::DataElements => "Data Elements",
            LowLevelCategory::Swimlanes => "Swimlanes",
            LowLevelCategory::Artifacts => "Artifacts",
            LowLevelCategory::Other => "Other",
        }
    }

    /// Returns the high-level grouping this category belongs to.
    pub fn high_level(&self) -> HighLevelCategory {
        match self {
            LowLevelCategory::Activities | LowLevelCategory::Gateways | LowLevelCategory::Events => {
                HighLevelCategory::Node
            }
            LowLevelCategory::ConnectingObjects => HighLevelCategory::Edge,
            LowLevelCategory::DataElements
            | LowLevelCategory::Swimlanes
            | LowLevelCategory::Artifacts
            | LowLevelCategory::Other => HighLevelCategory::Other,
        }
    }
}

impl fmt::Display for LowLevelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Graph role of a stencil category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighLevelCategory {
    /// Flow objects: activities, gateways, events.
    Node,
    /// Connecting objects: flows and associations.
    Edge,
    /// Swimlanes, data, artifacts and anything unclassified.
    Other,
}

impl HighLevelCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HighLevelCategory::Node => "node",
            HighLevelCategory::Edge => "edge",
            HighLevelCategory::Other => "other",
        }
    }
}

impl fmt::Display for HighLevelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const ACTIVITIES: &[&str] = &[
    TASK,
    SUBPROCESS,
    COLLAPSED_SUBPROCESS,
    EVENT_SUBPROCESS,
    COLLAPSED_EVENT_SUBPROCESS,
    CALL_ACTIVITY,
];

pub const GATEWAYS: &[&str] = &[
    EXCLUSIVE_GATEWAY,
    EVENT_BASED_GATEWAY,
    PARALLEL_GATEWAY,
    INCLUSIVE_GATEWAY,
    COMPLEX_GATEWAY,
];

pub const EVENTS: &[&str] = &[
    "StartNoneEvent",
    "StartMessageEvent",
    "StartTimerEvent",
    "StartEscalationEvent",
    "StartConditionalEvent",
    "StartErrorEvent",
    "StartCompensationEvent",
    "StartSignalEvent",
    "StartMultipleEvent",
    "StartParallelMultipleEvent",
    "IntermediateMessageEventCatching",
    "IntermediateTimerEvent",
    "IntermediateEscalationEvent",
    "IntermediateConditionalEvent",
    "IntermediateLinkEventCatching",
    "IntermediateErrorEvent",
    "IntermediateCancelEvent",
    "IntermediateCompensationEventCatching",
    "IntermediateSignalEventCatching",
    "IntermediateMultipleEventCatching",
    "IntermediateParallelMultipleEventCatching",
    "IntermediateEvent",
    "IntermediateMessageEventThrowing",
    "IntermediateEscalationEventThrowing",
    "IntermediateLinkEventThrowing",
    "IntermediateCompensationEventThrowing",
    "IntermediateSignalEventThrowing",
    "IntermediateMultipleEventThrowing",
    "EndNoneEvent",
    "EndMessageEvent",
    "EndEscalationEvent",
    "EndErrorEvent",
    "EndCancelEvent",
    "EndCompensationEvent",
    "EndSignalEvent",
    "EndMultipleEvent",
    "EndTerminateEvent",
];

pub const CONNECTING_OBJECTS: &[&str] = &[
    SEQUENCE_FLOW,
    MESSAGE_FLOW,
    ASSOCIATION_UNDIRECTED,
    ASSOCIATION_UNIDIRECTIONAL,
    ASSOCIATION_BIDIRECTIONAL,
];

pub const DATA_ELEMENTS: &[&str] = &[DATA_OBJECT, DATA_STORE, MESSAGE, IT_SYSTEM];

pub const SWIMLANES: &[&str] = &[
    POOL,
    COLLAPSED_POOL,
    LANE,
    VERTICAL_POOL,
    COLLAPSED_VERTICAL_POOL,
    VERTICAL_LANE,
    PROCESS_PARTICIPANT,
];

pub const ARTIFACTS: &[&str] = &[TEXT_ANNOTATION, GROUP];

const TABLE: &[(&[&str], LowLevelCategory)] = &[
    (ACTIVITIES, LowLevelCategory::Activities),
    (GATEWAYS, LowLevelCategory::Gateways),
    (EVENTS, LowLevelCategory::Events),
    (CONNECTING_OBJECTS, LowLevelCategory::ConnectingObjects),
    (DATA_ELEMENTS, LowLevelCategory::DataElements),
    (SWIMLANES, LowLevelCategory::Swimlanes),
    (ARTIFACTS, LowLevelCategory::Artifacts),
];

/// Look up the low-level grouping of a stencil category.
///
/// Event stencils not listed in [`EVENTS`] are still recognized by their
/// `Start`/`Intermediate`/`End` prefix and `Event` infix.
pub fn low_level(category: &str) -> LowLevelCategory {
    if let Some((_, low)) = TABLE.iter().find(|(members, _)| members.contains(&category)) {
        return *low;
    }

    let event_prefix = ["Start", "Intermediate", "End"]
        .iter()
        .any(|prefix| category.starts_with(prefix));
    if event_prefix && category.contains("Event") {
        return LowLevelCategory::Events;
    }

    LowLevelCategory::Other
}

/// Look up the high-level grouping of a stencil category.
pub fn high_level(category: &str) -> HighLevelCategory {
    low_level(category).high_level()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_level_lookup() {
        assert_eq!(low_level("Task"), LowLevelCategory::Activities);
        assert_eq!(low_level("ParallelGateway"), LowLevelCategory::Gateways);
        assert_eq!(low_level("EndTerminateEvent"), LowLevelCategory::Events);
        assert_eq!(low_level("SequenceFlow"), LowLevelCategory::ConnectingObjects);
        assert_eq!(low_level("ITSystem"), LowLevelCategory::DataElements);
        assert_eq!(low_level("Lane"), LowLevelCategory::Swimlanes);
        assert_eq!(low_level("TextAnnotation"), LowLevelCategory::Artifacts);
        assert_eq!(low_level("BPMNDiagram"), LowLevelCategory::Other);
    }

    #[test]
    fn test_unlisted_event_recognized_by_name() {
        assert_eq!(low_level("StartCustomEvent"), LowLevelCategory::Events);
        assert_eq!(low_level("EndpointShape"), LowLevelCategory::Other);
    }

    #[test]
    fn test_high_level_lookup() {
        assert_eq!(high_level("Task"), HighLevelCategory::Node);
        assert_eq!(high_level("Exclusive_Databased_Gateway"), HighLevelCategory::Node);
        assert_eq!(high_level("StartNoneEvent"), HighLevelCategory::Node);
        assert_eq!(high_level("MessageFlow"), HighLevelCategory::Edge);
        assert_eq!(high_level("DataObject"), HighLevelCategory::Other);
        assert_eq!(high_level("unknown"), HighLevelCategory::Other);
    }

    #[test]
    fn test_tables_are_disjoint() {
        for (i, (left, _)) in TABLE.iter().enumerate() {
            for (right, _) in &TABLE[i + 1..] {
                for category in *left {
                    assert!(
                        !right.contains(category),
                        "{category} is listed in two groupings"
                    );
                }
            }
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(LowLevelCategory::DataElements.to_string(), "Data Elements");
        assert_eq!(HighLevelCategory::Edge.to_string(), "edge");
    }
}
