//! The element relation.
//!
//! An [`ElementRelation`] holds the flattened elements of one or more
//! diagrams. It is the contract boundary between parsing and measurement:
//! the parser produces it, the metrics engine only reads it.
//!
//! Elements of one diagram are stored contiguously, so a diagram's rows can
//! be borrowed as a slice without grouping.
//!
//! # Optional Columns
//!
//! `parent` and `outgoing` are only populated when the parser was asked to
//! produce them. [`ElementRelation::has_column`] reports which columns are
//! available so that consumers can reject relations that lack what they need.

use std::{collections::HashSet, fmt, ops::Range};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{element::Element, element::ModelId, metadata::DiagramInfo};

/// Named columns of the relation, including joined metadata columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    ModelId,
    ElementId,
    Category,
    Label,
    GlossaryLinkId,
    Parent,
    Outgoing,
    Name,
    Datetime,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::ModelId => "model_id",
            Column::ElementId => "element_id",
            Column::Category => "category",
            Column::Label => "label",
            Column::GlossaryLinkId => "glossary_link_id",
            Column::Parent => "parent",
            Column::Outgoing => "outgoing",
            Column::Name => "name",
            Column::Datetime => "datetime",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which optional columns a relation carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalColumns {
    pub parent: bool,
    pub outgoing: bool,
}

impl OptionalColumns {
    pub fn new(parent: bool, outgoing: bool) -> Self {
        Self { parent, outgoing }
    }

    /// Both optional columns.
    pub fn all() -> Self {
        Self::new(true, true)
    }
}

/// Errors raised when assembling a relation.
#[derive(Debug, Error, PartialEq)]
pub enum RelationError {
    #[error("model `{0}` is already present in the relation")]
    DuplicateModel(ModelId),

    #[error("element `{element_id}` appears more than once in model `{model_id}`")]
    DuplicateElement {
        model_id: ModelId,
        element_id: String,
    },

    #[error("element `{element_id}` belongs to model `{found}`, expected `{expected}`")]
    ForeignElement {
        expected: ModelId,
        found: ModelId,
        element_id: String,
    },

    #[error("cannot combine relations with different optional columns ({left:?} vs {right:?})")]
    ColumnMismatch {
        left: OptionalColumns,
        right: OptionalColumns,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct DiagramEntry {
    info: DiagramInfo,
    rows: Range<usize>,
}

/// Flat table of diagram elements keyed by `(model_id, element_id)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementRelation {
    columns: OptionalColumns,
    diagrams: IndexMap<ModelId, DiagramEntry>,
    elements: Vec<Element>,
}

impl ElementRelation {
    /// Create an empty relation with the given optional columns.
    pub fn new(columns: OptionalColumns) -> Self {
        Self {
            columns,
            diagrams: IndexMap::new(),
            elements: Vec::new(),
        }
    }

    /// Create the relation of a single diagram.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::ForeignElement`] if an element carries another
    /// model id, and [`RelationError::DuplicateElement`] if an element id
    /// repeats.
    pub fn for_diagram(
        info: DiagramInfo,
        columns: OptionalColumns,
        elements: Vec<Element>,
    ) -> Result<Self, RelationError> {
        let mut seen = HashSet::with_capacity(elements.len());
        for element in &elements {
            if element.model_id() != info.model_id() {
                return Err(RelationError::ForeignElement {
                    expected: info.model_id().clone(),
                    found: element.model_id().clone(),
                    element_id: element.element_id().to_string(),
                });
            }
            if !seen.insert(element.element_id()) {
                return Err(RelationError::DuplicateElement {
                    model_id: info.model_id().clone(),
                    element_id: element.element_id().to_string(),
                });
            }
        }

        let mut diagrams = IndexMap::with_capacity(1);
        diagrams.insert(
            info.model_id().clone(),
            DiagramEntry {
                rows: 0..elements.len(),
                info,
            },
        );

        Ok(Self {
            columns,
            diagrams,
            elements,
        })
    }

    /// Append another relation to this one.
    ///
    /// Nothing is merged: if any model id of `other` is already present the
    /// relation is left unchanged and the first clash is reported.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::DuplicateModel`] on a model id clash and
    /// [`RelationError::ColumnMismatch`] if the optional columns differ.
    pub fn concat(&mut self, other: ElementRelation) -> Result<(), RelationError> {
        if self.diagrams.is_empty() {
            self.columns = other.columns;
        } else if !other.diagrams.is_empty() && other.columns != self.columns {
            return Err(RelationError::ColumnMismatch {
                left: self.columns,
                right: other.columns,
            });
        }

        if let Some(model_id) = other
            .diagrams
            .keys()
            .find(|model_id| self.diagrams.contains_key(*model_id))
        {
            return Err(RelationError::DuplicateModel(model_id.clone()));
        }

        debug!(
            diagrams = other.diagrams.len(),
            rows = other.elements.len();
            "Appending relation"
        );

        let offset = self.elements.len();
        for (model_id, entry) in other.diagrams {
            let rows = entry.rows.start + offset..entry.rows.end + offset;
            self.diagrams.insert(
                model_id,
                DiagramEntry {
                    info: entry.info,
                    rows,
                },
            );
        }
        self.elements.extend(other.elements);
        Ok(())
    }

    /// Returns which optional columns are populated.
    pub fn columns(&self) -> OptionalColumns {
        self.columns
    }

    /// Returns `true` if the relation can provide the given column.
    ///
    /// The `datetime` column is joined from metadata; it is available when
    /// at least one diagram carries a creation timestamp.
    pub fn has_column(&self, column: Column) -> bool {
        match column {
            Column::Parent => self.columns.parent,
            Column::Outgoing => self.columns.outgoing,
            Column::Datetime => self
                .diagrams
                .values()
                .any(|entry| entry.info.metadata().created().is_some()),
            Column::ModelId
            | Column::ElementId
            | Column::Category
            | Column::Label
            | Column::GlossaryLinkId
            | Column::Name => true,
        }
    }

    /// Returns all elements of all diagrams.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Returns the number of element rows.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the relation has no element rows.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of registered diagrams.
    pub fn diagram_count(&self) -> usize {
        self.diagrams.len()
    }

    /// Returns `true` if the relation contains the given model.
    pub fn contains_model(&self, model_id: &ModelId) -> bool {
        self.diagrams.contains_key(model_id)
    }

    /// Returns the info of one diagram.
    pub fn diagram(&self, model_id: &ModelId) -> Option<&DiagramInfo> {
        self.diagrams.get(model_id).map(|entry| &entry.info)
    }

    /// Returns the info of every diagram, in insertion order.
    pub fn diagrams(&self) -> impl Iterator<Item = &DiagramInfo> {
        self.diagrams.values().map(|entry| &entry.info)
    }

    /// Returns the rows of one diagram. Unknown models have no rows.
    pub fn elements_of(&self, model_id: &ModelId) -> &[Element] {
        match self.diagrams.get(model_id) {
            Some(entry) => &self.elements[entry.rows.clone()],
            None => &[],
        }
    }

    /// Returns every diagram together with its rows, in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (&DiagramInfo, &[Element])> {
        self.diagrams
            .values()
            .map(|entry| (&entry.info, &self.elements[entry.rows.clone()]))
    }

    /// Look up one row by its composite key.
    pub fn get(&self, model_id: &ModelId, element_id: &str) -> Option<&Element> {
        self.elements_of(model_id)
            .iter()
            .find(|element| element.element_id() == element_id)
    }
}
