//! Halstead-style process complexity.
//!
//! Labels play the role of Halstead's symbols. Tasks, events, gateways and
//! sequence flows form the vocabulary; data objects and data stores are the
//! operands. Elements without a label are ignored.

use std::collections::HashSet;

use bpmetrics_core::{
    category::names::{DATA_OBJECT, DATA_STORE, SEQUENCE_FLOW, TASK},
    element::Element,
    relation::ElementRelation,
};

use super::{PerDiagram, per_diagram};

const VOCABULARY: &[&str] = &[TASK, "Event", "Gateway", SEQUENCE_FLOW];
const OPERANDS: &[&str] = &[DATA_OBJECT, DATA_STORE];

/// Unique and total label counts of one element class.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct LabelCounts {
    unique: f64,
    total: f64,
}

impl LabelCounts {
    fn of(elements: &[Element], fragments: &[&str]) -> Self {
        let labels: Vec<&str> = elements
            .iter()
            .filter(|element| element.category_contains(fragments))
            .filter_map(Element::label)
            .collect();
        let unique: HashSet<&str> = labels.iter().copied().collect();
        Self {
            unique: unique.len() as f64,
            total: labels.len() as f64,
        }
    }
}

/// `x * log2(x)`, 0 for `x = 0`.
fn entropy_term(x: f64) -> f64 {
    if x > 0.0 { x * x.log2() } else { 0.0 }
}

fn counts(elements: &[Element]) -> (LabelCounts, LabelCounts) {
    (
        LabelCounts::of(elements, VOCABULARY),
        LabelCounts::of(elements, OPERANDS),
    )
}

/// `HPC_D`: `(u_vocab / 2) * (t_operand / u_operand)`.
pub(super) fn difficulty(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        let (vocabulary, operands) = counts(elements);
        if operands.unique > 0.0 {
            (vocabulary.unique / 2.0) * (operands.total / operands.unique)
        } else {
            0.0
        }
    })
}

/// `HPC_N`: `u_vocab * log2(u_vocab) + u_operand * log2(u_operand)`.
pub(super) fn length(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        let (vocabulary, operands) = counts(elements);
        entropy_term(vocabulary.unique) + entropy_term(operands.unique)
    })
}

/// `HPC_V`: `(t_vocab + t_operand) * log2(u_vocab + u_operand)`.
pub(super) fn volume(relation: &ElementRelation) -> PerDiagram {
    per_diagram(relation, |elements| {
        let (vocabulary, operands) = counts(elements);
        let unique = vocabulary.unique + operands.unique;
        if unique > 0.0 {
            (vocabulary.total + operands.total) * unique.log2()
        } else {
            0.0
        }
    })
}

#[cfg(test)]
mod tests {
    use bpmetrics_core::element::ModelId;
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::metrics::tests_support::{relation_of, row};

    fn labeled(id: &str, category: &str, label: Option<&str>) -> Element {
        row(id, category, &[]).with_label(label.map(str::to_string))
    }

    fn sample() -> ElementRelation {
        relation_of(vec![
            labeled("t1", "Task", Some("Check order")),
            labeled("t2", "Task", Some("Check order")),
            labeled("t3", "Task", Some("Ship")),
            labeled("g", "Exclusive_Databased_Gateway", Some("In stock?")),
            labeled("e", "EndNoneEvent", None),
            labeled("d1", "DataObject", Some("Order")),
            labeled("d2", "DataStore", Some("Order")),
            labeled("lane", "Lane", Some("Sales")),
        ])
    }

    #[test]
    fn test_label_counts() {
        let relation = sample();
        let elements = relation.elements_of(&ModelId::new("m1"));
        let (vocabulary, operands) = counts(elements);

        assert_eq!(vocabulary, LabelCounts { unique: 3.0, total: 4.0 });
        assert_eq!(operands, LabelCounts { unique: 1.0, total: 2.0 });
    }

    #[test]
    fn test_halstead_values() {
        let relation = sample();
        let m = ModelId::new("m1");

        assert_approx_eq!(f64, difficulty(&relation)[&m], 3.0);
        assert_approx_eq!(f64, length(&relation)[&m], 3.0 * 3f64.log2());
        assert_approx_eq!(f64, volume(&relation)[&m], 6.0 * 2.0);
    }

    #[test]
    fn test_halstead_without_labels() {
        let relation = relation_of(vec![labeled("t", "Task", None)]);
        let m = ModelId::new("m1");

        assert_eq!(difficulty(&relation)[&m], 0.0);
        assert_eq!(length(&relation)[&m], 0.0);
        assert_eq!(volume(&relation)[&m], 0.0);
    }
}
