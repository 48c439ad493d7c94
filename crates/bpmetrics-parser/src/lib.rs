//! # bpmetrics Parser
//!
//! Flattening parser for exported BPMN shape trees. This crate turns the
//! nested JSON export of a diagram into the flat
//! [`ElementRelation`](bpmetrics_core::relation::ElementRelation) consumed by
//! the metrics engine.
//!
//! ## Usage
//!
//! ```
//! # use bpmetrics_parser::{parse_json, ParseOptions, ParseError};
//! # use bpmetrics_core::{element::ModelId, metadata::DiagramInfo};
//!
//! fn main() -> Result<(), ParseError> {
//!     let export = r#"{
//!         "resourceId": "canvas",
//!         "childShapes": [
//!             {"resourceId": "t1", "stencil": {"id": "Task"}, "properties": {"name": "Check order"}}
//!         ]
//!     }"#;
//!
//!     let info = DiagramInfo::new(ModelId::new("m1"));
//!     let relation = parse_json(export, info, &ParseOptions::default())?;
//!     assert_eq!(relation.len(), 1);
//!     Ok(())
//! }
//! ```

mod batch;
pub mod error;
mod flatten;
mod path;
mod record;
mod text;

pub use batch::{BatchOutcome, parse_batch};
pub use error::ParseError;
pub use path::ShapePath;
pub use record::{ModelRecord, Payload};
pub use text::{clean_label, normalize_glossary_link};

use log::debug;

use bpmetrics_core::{
    metadata::DiagramInfo,
    relation::{ElementRelation, OptionalColumns},
    shape::Shape,
};

/// Options controlling which columns the parser produces and which records
/// a batch accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    include_parent: bool,
    include_outgoing: bool,
    namespace: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            include_parent: true,
            include_outgoing: true,
            namespace: None,
        }
    }
}

impl ParseOptions {
    pub fn with_include_parent(mut self, include_parent: bool) -> Self {
        self.include_parent = include_parent;
        self
    }

    pub fn with_include_outgoing(mut self, include_outgoing: bool) -> Self {
        self.include_outgoing = include_outgoing;
        self
    }

    /// Only accept batch records declaring this stencil-set namespace.
    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn include_parent(&self) -> bool {
        self.include_parent
    }

    pub fn include_outgoing(&self) -> bool {
        self.include_outgoing
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The optional columns a relation produced with these options carries.
    pub fn columns(&self) -> OptionalColumns {
        OptionalColumns::new(self.include_parent, self.include_outgoing)
    }
}

/// Flatten an already built shape tree.
///
/// The root shape is the diagram container and produces no element; every
/// shape below it produces exactly one.
///
/// # Errors
///
/// Returns a [`ParseError`] listing every shape without a resource id
/// (`E100`) and every repeated resource id (`E101`).
pub fn parse_diagram(
    root: Shape,
    info: DiagramInfo,
    options: &ParseOptions,
) -> Result<ElementRelation, ParseError> {
    debug!(model_id = info.model_id().as_str(); "Parsing diagram");
    flatten::flatten(root, info, options)
}

/// Decode JSON export text and flatten it.
///
/// # Errors
///
/// In addition to the errors of [`parse_diagram`], fails with `E001` on
/// malformed JSON and `E002` when the root is not an object.
pub fn parse_json(
    text: &str,
    info: DiagramInfo,
    options: &ParseOptions,
) -> Result<ElementRelation, ParseError> {
    let root = Payload::Text(text.to_string())
        .into_shape()
        .map_err(|diagnostic| ParseError::from(diagnostic).with_model_id(info.model_id().clone()))?;
    parse_diagram(root, info, options)
}

/// Parse one record: decode its payload, attach its metadata and flatten.
///
/// # Errors
///
/// Same as [`parse_json`]; the error names the record's model id.
pub fn parse_record(record: ModelRecord, options: &ParseOptions) -> Result<ElementRelation, ParseError> {
    let (info, payload) = record.into_parts();
    let root = payload
        .into_shape()
        .map_err(|diagnostic| ParseError::from(diagnostic).with_model_id(info.model_id().clone()))?;
    parse_diagram(root, info, options)
}
