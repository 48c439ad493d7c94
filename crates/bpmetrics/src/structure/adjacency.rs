//! Element and node adjacency for a single diagram.
//!
//! [`DiagramGraph`] holds one graph node per element and one arc per resolved
//! `outgoing` entry: an arc runs from A to B when B's element id appears in
//! A's `outgoing` list. Targets that do not belong to the diagram are
//! dropped.
//!
//! Flow objects (activities, events, gateways) are usually connected through
//! connecting objects (sequence flows, message flows), so
//! [`DiagramGraph::node_arcs`] collapses `node -> flow -> node` paths into
//! direct node-to-node arcs.

use std::collections::HashMap;

use log::trace;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};

use bpmetrics_core::{
    category::{HighLevelCategory, LowLevelCategory},
    element::Element,
};

/// Element-level adjacency of one diagram.
#[derive(Debug)]
pub struct DiagramGraph<'a> {
    graph: DiGraph<&'a Element, ()>,
    indices: HashMap<&'a str, NodeIndex>,
}

impl<'a> DiagramGraph<'a> {
    /// Build the graph of one diagram's elements.
    ///
    /// Elements without an `outgoing` column contribute no arcs.
    pub fn new(elements: &'a [Element]) -> Self {
        let mut graph = DiGraph::with_capacity(elements.len(), elements.len());
        let mut indices = HashMap::with_capacity(elements.len());

        for element in elements {
            let index = graph.add_node(element);
            indices.insert(element.element_id(), index);
        }

        for element in elements {
            let source = indices[element.element_id()];
            for target in element.outgoing().unwrap_or_default() {
                match indices.get(target.as_str()) {
                    Some(&target) => {
                        graph.add_edge(source, target, ());
                    }
                    None => trace!(
                        source = element.element_id(),
                        target = target.as_str();
                        "Dropping arc to unknown element"
                    ),
                }
            }
        }

        Self { graph, indices }
    }

    /// Number of arcs leaving the element. Unknown ids have none.
    pub fn outgoing_count(&self, element_id: &str) -> usize {
        self.degree(element_id, Direction::Outgoing)
    }

    /// Number of arcs entering the element. Unknown ids have none.
    pub fn incoming_count(&self, element_id: &str) -> usize {
        self.degree(element_id, Direction::Incoming)
    }

    /// Collapse the graph to arcs between flow nodes.
    ///
    /// A node reaches another node either directly or through exactly one
    /// connecting object.
    pub fn node_arcs(&self) -> NodeArcs<'a> {
        let mut arcs = Vec::new();

        for index in self.graph.node_indices() {
            let source = self.graph[index];
            if !is_node(source) {
                continue;
            }
            for hop in self.graph.neighbors_directed(index, Direction::Outgoing) {
                let via = self.graph[hop];
                match via.high_level_category() {
                    HighLevelCategory::Node => arcs.push((source, via)),
                    HighLevelCategory::Edge => arcs.extend(
                        self.graph
                            .neighbors_directed(hop, Direction::Outgoing)
                            .map(|target| self.graph[target])
                            .filter(|target| is_node(target))
                            .map(|target| (source, target)),
                    ),
                    HighLevelCategory::Other => {}
                }
            }
        }

        NodeArcs::new(arcs)
    }

    fn degree(&self, element_id: &str, direction: Direction) -> usize {
        self.indices.get(element_id).map_or(0, |&index| {
            self.graph.edges_directed(index, direction).count()
        })
    }
}

fn is_node(element: &Element) -> bool {
    element.high_level_category() == HighLevelCategory::Node
}

/// Node-to-node arcs of one diagram with per-node degrees.
#[derive(Debug)]
pub struct NodeArcs<'a> {
    arcs: Vec<(&'a Element, &'a Element)>,
    incoming: HashMap<&'a str, usize>,
    outgoing: HashMap<&'a str, usize>,
}

impl<'a> NodeArcs<'a> {
    fn new(arcs: Vec<(&'a Element, &'a Element)>) -> Self {
        let mut incoming = HashMap::new();
        let mut outgoing = HashMap::new();
        for (source, target) in &arcs {
            *outgoing.entry(source.element_id()).or_insert(0) += 1;
            *incoming.entry(target.element_id()).or_insert(0) += 1;
        }
        Self {
            arcs,
            incoming,
            outgoing,
        }
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a Element, &'a Element)> + '_ {
        self.arcs.iter().copied()
    }

    /// Returns `true` if the node routes control flow.
    ///
    /// A connector is a gateway with at least one incoming and one outgoing
    /// node arc. Every other node is a non-connector.
    pub fn is_connector(&self, element: &Element) -> bool {
        let id = element.element_id();
        element.low_level_category() == LowLevelCategory::Gateways
            && self.incoming.get(id).is_some_and(|&n| n > 0)
            && self.outgoing.get(id).is_some_and(|&n| n > 0)
    }
}
