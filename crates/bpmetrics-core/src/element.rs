//! Flat element records.
//!
//! An [`Element`] is the normalized row for one non-root shape of a diagram.
//! Elements are keyed by `(model_id, element_id)`: element ids are unique
//! within a diagram but may repeat across diagrams.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::{self, HighLevelCategory, LowLevelCategory};

/// Identifier of one diagram (process model).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Create a model id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ModelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for ModelId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ModelId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One row of the element relation.
///
/// `parent` and `outgoing` are optional columns: they are `None` for every
/// row when the relation was produced without them, and `Some` for every row
/// otherwise (an element without targets has `Some(vec![])`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    model_id: ModelId,
    element_id: String,
    category: Option<String>,
    label: Option<String>,
    glossary_link_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    outgoing: Option<Vec<String>>,
    name: Option<String>,
}

impl Element {
    /// Create an element with only its key populated.
    pub fn new(model_id: ModelId, element_id: impl Into<String>) -> Self {
        Self {
            model_id,
            element_id: element_id.into(),
            category: None,
            label: None,
            glossary_link_id: None,
            parent: None,
            outgoing: None,
            name: None,
        }
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn with_glossary_link_id(mut self, glossary_link_id: Option<String>) -> Self {
        self.glossary_link_id = glossary_link_id;
        self
    }

    pub fn with_parent(mut self, parent: Option<String>) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_outgoing(mut self, outgoing: Option<Vec<String>>) -> Self {
        self.outgoing = outgoing;
        self
    }

    /// Set the denormalized diagram name.
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn model_id(&self) -> &ModelId {
        &self.model_id
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn glossary_link_id(&self) -> Option<&str> {
        self.glossary_link_id.as_deref()
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Returns the outgoing target ids, or `None` if the column is absent.
    pub fn outgoing(&self) -> Option<&[String]> {
        self.outgoing.as_deref()
    }

    /// Returns the diagram name this element belongs to.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns `true` if the category equals `category` exactly.
    pub fn is(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }

    /// Returns `true` if the category contains any of the given fragments.
    ///
    /// Elements without a category never match.
    pub fn category_contains(&self, fragments: &[&str]) -> bool {
        self.category
            .as_deref()
            .is_some_and(|category| fragments.iter().any(|f| category.contains(*f)))
    }

    /// Returns the low-level grouping of this element's category.
    pub fn low_level_category(&self) -> LowLevelCategory {
        self.category
            .as_deref()
            .map_or(LowLevelCategory::Other, category::low_level)
    }

    /// Returns the high-level grouping of this element's category.
    pub fn high_level_category(&self) -> HighLevelCategory {
        self.low_level_category().high_level()
    }
}
