//! In-memory model of one exported diagram.
//!
//! A diagram export is a tree of [`Shape`]s. The root shape is the diagram
//! container itself; every shape nested below it through `childShapes` is a
//! diagram element (task, gateway, event, flow, lane, data object, ...).
//!
//! The JSON layout follows the modeling service export:
//!
//! ```json
//! {
//!   "resourceId": "canvas",
//!   "childShapes": [
//!     {
//!       "resourceId": "sid-1",
//!       "stencil": { "id": "Task" },
//!       "properties": { "name": "Check order" },
//!       "outgoing": [{ "resourceId": "sid-2" }],
//!       "glossaryLinks": { "name": ["/glossary/abc"] },
//!       "childShapes": []
//!     }
//!   ]
//! }
//! ```
//!
//! Every field is optional at this level. Missing identity is reported by the
//! parser, which knows where in the tree the offending shape sits.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Property key holding the display name of a shape.
pub const NAME_PROPERTY: &str = "name";

/// Deserialize `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The stencil block of a shape, naming its category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stencil {
    #[serde(default)]
    id: Option<String>,
}

impl Stencil {
    /// Create a stencil with the given category id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }

    /// Returns the stencil id, if the block carries one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// A reference from one shape to another, by resource id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRef {
    #[serde(default)]
    resource_id: Option<String>,
}

impl ShapeRef {
    /// Create a reference to the shape with the given resource id.
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: Some(resource_id.into()),
        }
    }

    /// Returns the referenced resource id, if present.
    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }
}

/// One node of a diagram's shape tree.
///
/// Shapes are built either by deserializing an export or programmatically
/// through the `with_*` builder methods:
///
/// ```
/// use bpmetrics_core::shape::Shape;
///
/// let root = Shape::new("canvas")
///     .with_child(Shape::new("t1").with_stencil("Task").with_name("Check order"))
///     .with_child(Shape::new("e1").with_stencil("EndNoneEvent"));
///
/// assert_eq!(root.shape_count(), 3);
/// assert_eq!(root.child_shapes()[0].category(), Some("Task"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resource_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    stencil: Option<Stencil>,

    #[serde(default, deserialize_with = "null_as_default")]
    properties: Map<String, Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    outgoing: Vec<ShapeRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    glossary_links: Option<Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    child_shapes: Vec<Shape>,
}

impl Shape {
    /// Create a shape with the given resource id and nothing else.
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: Some(resource_id.into()),
            ..Self::default()
        }
    }

    /// Parse a shape tree from exported JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the text is not valid JSON or
    /// does not have the shape of an export.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Build a shape tree from an already decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the value does not have the shape
    /// of an export.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Set the stencil category.
    pub fn with_stencil(mut self, category: impl Into<String>) -> Self {
        self.stencil = Some(Stencil::new(category));
        self
    }

    /// Set a stencil block without an id.
    pub fn with_empty_stencil(mut self) -> Self {
        self.stencil = Some(Stencil::default());
        self
    }

    /// Set the display name property.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.with_property(NAME_PROPERTY, Value::String(name.into()))
    }

    /// Set an arbitrary property.
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Append an outgoing reference to the shape with the given id.
    pub fn with_outgoing(mut self, target: impl Into<String>) -> Self {
        self.outgoing.push(ShapeRef::new(target));
        self
    }

    /// Append a glossary link entry under the `name` key.
    ///
    /// A `glossaryLinks` value that is not an object is replaced.
    pub fn with_glossary_link(mut self, link: impl Into<String>) -> Self {
        if !matches!(self.glossary_links, Some(Value::Object(_))) {
            self.glossary_links = Some(Value::Object(Map::new()));
        }
        if let Some(Value::Object(links)) = &mut self.glossary_links {
            let entry = links
                .entry(NAME_PROPERTY)
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(items) = entry {
                items.push(Value::String(link.into()));
            }
        }
        self
    }

    /// Append a nested child shape.
    pub fn with_child(mut self, child: Shape) -> Self {
        self.child_shapes.push(child);
        self
    }

    /// Returns the resource id, if present.
    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }

    /// Returns the stencil block, if present.
    pub fn stencil(&self) -> Option<&Stencil> {
        self.stencil.as_ref()
    }

    /// Returns the stencil category id.
    ///
    /// `None` both when the stencil block is missing and when it has no `id`.
    pub fn category(&self) -> Option<&str> {
        self.stencil.as_ref().and_then(Stencil::id)
    }

    /// Returns all properties.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Returns the raw display name.
    ///
    /// Strings are returned as-is, numbers and booleans in their JSON text
    /// form. `null`, arrays and objects yield `None`.
    pub fn display_name(&self) -> Option<String> {
        match self.properties.get(NAME_PROPERTY)? {
            Value::String(name) => Some(name.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Returns the outgoing references in export order.
    pub fn outgoing(&self) -> &[ShapeRef] {
        &self.outgoing
    }

    /// Returns the raw glossary entry stored under the `name` key.
    ///
    /// `None` when `glossaryLinks` is missing or is not an object.
    pub fn glossary_name(&self) -> Option<&Value> {
        self.glossary_links.as_ref()?.get(NAME_PROPERTY)
    }

    /// Returns the directly nested shapes.
    pub fn child_shapes(&self) -> &[Shape] {
        &self.child_shapes
    }

    /// Move the directly nested shapes out of this shape.
    pub fn take_child_shapes(&mut self) -> Vec<Shape> {
        std::mem::take(&mut self.child_shapes)
    }

    /// Count this shape and every shape nested below it.
    pub fn shape_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(shape) = stack.pop() {
            count += 1;
            stack.extend(shape.child_shapes.iter());
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_shape() {
        let json = r#"{
            "resourceId": "canvas",
            "properties": {"name": "Order handling"},
            "stencil": {"id": "BPMNDiagram"},
            "childShapes": [{
                "resourceId": "sid-1",
                "stencil": {"id": "Task"},
                "properties": {"name": "Check order"},
                "outgoing": [{"resourceId": "sid-2"}],
                "glossaryLinks": {"name": ["/glossary/abc"]},
                "bounds": {"lowerRight": {"x": 1, "y": 2}},
                "childShapes": []
            }]
        }"#;

        let root = Shape::from_json(json).expect("valid export");

        assert_eq!(root.resource_id(), Some("canvas"));
        assert_eq!(root.category(), Some("BPMNDiagram"));
        assert_eq!(root.child_shapes().len(), 1);

        let task = &root.child_shapes()[0];
        assert_eq!(task.category(), Some("Task"));
        assert_eq!(task.display_name().as_deref(), Some("Check order"));
        assert_eq!(task.outgoing()[0].resource_id(), Some("sid-2"));
        assert!(task.glossary_name().is_some());
    }

    #[test]
    fn test_deserialize_sparse_shape() {
        let root = Shape::from_json(r#"{"childShapes": [{"stencil": {}}]}"#).expect("valid");

        assert_eq!(root.resource_id(), None);
        let child = &root.child_shapes()[0];
        assert!(child.stencil().is_some());
        assert_eq!(child.category(), None);
        assert!(child.outgoing().is_empty());
        assert_eq!(child.display_name(), None);
    }

    #[test]
    fn test_null_collections_treated_as_empty() {
        let root = Shape::from_json(
            r#"{"resourceId": "r", "properties": null, "outgoing": null, "childShapes": null}"#,
        )
        .expect("nulls are accepted");

        assert!(root.properties().is_empty());
        assert!(root.outgoing().is_empty());
        assert!(root.child_shapes().is_empty());
    }

    #[test]
    fn test_display_name_variants() {
        let numeric = Shape::new("a").with_property(NAME_PROPERTY, Value::from(42));
        assert_eq!(numeric.display_name().as_deref(), Some("42"));

        let null = Shape::new("b").with_property(NAME_PROPERTY, Value::Null);
        assert_eq!(null.display_name(), None);
    }

    #[test]
    fn test_unexpected_glossary_links_are_kept_raw() {
        for raw in [r#"[]"#, r#""x""#, r#"42"#, r#"null"#] {
            let json = format!(r#"{{"resourceId": "t", "glossaryLinks": {raw}}}"#);
            let shape = Shape::from_json(&json).expect("any glossaryLinks value is accepted");

            assert_eq!(shape.glossary_name(), None);
        }
    }

    #[test]
    fn test_with_glossary_link_accumulates() {
        let shape = Shape::new("a")
            .with_glossary_link("/glossary/one")
            .with_glossary_link("/glossary/two");

        let entry = shape.glossary_name().expect("glossary entry");
        assert_eq!(entry.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_take_child_shapes() {
        let mut root = Shape::new("r")
            .with_child(Shape::new("a"))
            .with_child(Shape::new("b").with_child(Shape::new("c")));

        assert_eq!(root.shape_count(), 4);

        let children = root.take_child_shapes();
        assert_eq!(children.len(), 2);
        assert!(root.child_shapes().is_empty());
        assert_eq!(root.shape_count(), 1);
    }
}
