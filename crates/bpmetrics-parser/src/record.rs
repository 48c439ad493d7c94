//! Input records of a batch.
//!
//! A [`ModelRecord`] is one exported diagram together with the metadata the
//! ingestion layer attached to it. Records deserialize from the export
//! layout:
//!
//! ```json
//! {
//!   "model_id": "a3f2...",
//!   "name": "Order handling",
//!   "type": "BPMN 2.0",
//!   "namespace": "http://b3mn.org/stencilset/bpmn2.0#",
//!   "datetime": "2021-03-04 12:30:00",
//!   "model_json": "{\"resourceId\": \"canvas\", ...}"
//! }
//! ```
//!
//! `model_json` may be the JSON text of the diagram or the diagram object
//! itself.

use log::warn;
use serde::Deserialize;
use serde_json::Value;

use bpmetrics_core::{
    element::ModelId,
    metadata::{DiagramInfo, DiagramMetadata, parse_timestamp},
    shape::Shape,
};

use crate::error::{Diagnostic, ErrorCode};

/// The diagram payload of a record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Payload {
    /// Raw JSON text, decoded on parse.
    Text(String),
    /// A decoded JSON value, not yet checked against the shape layout.
    Json(Value),
    /// An already built shape tree.
    Tree(Shape),
}

impl Payload {
    /// Decode the payload into a shape tree.
    pub(crate) fn into_shape(self) -> Result<Shape, Diagnostic> {
        let value = match self {
            Payload::Tree(shape) => return Ok(shape),
            Payload::Json(value) => value,
            Payload::Text(text) => serde_json::from_str(&text).map_err(|err| {
                Diagnostic::error(format!("payload is not valid JSON: {err}"))
                    .with_code(ErrorCode::E001)
            })?,
        };

        if !value.is_object() {
            return Err(Diagnostic::error("payload root is not a shape object")
                .with_code(ErrorCode::E002)
                .with_help("the payload must be the JSON object of the diagram container"));
        }

        Shape::from_value(value).map_err(|err| {
            Diagnostic::error(format!("payload does not match the shape layout: {err}"))
                .with_code(ErrorCode::E001)
        })
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Payload::Text(text),
            other => Payload::Json(other),
        }
    }
}

impl From<Shape> for Payload {
    fn from(shape: Shape) -> Self {
        Payload::Tree(shape)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

/// One diagram of a batch with its metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelRecord {
    model_id: ModelId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    datetime: Option<String>,
    model_json: Payload,
}

impl ModelRecord {
    pub fn new(model_id: impl Into<ModelId>, payload: impl Into<Payload>) -> Self {
        Self {
            model_id: model_id.into(),
            name: None,
            kind: None,
            namespace: None,
            datetime: None,
            model_json: payload.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the declared diagram type, e.g. `BPMN 2.0`.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the creation timestamp text.
    pub fn with_datetime(mut self, datetime: impl Into<String>) -> Self {
        self.datetime = Some(datetime.into());
        self
    }

    pub fn model_id(&self) -> &ModelId {
        &self.model_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn datetime(&self) -> Option<&str> {
        self.datetime.as_deref()
    }

    pub fn payload(&self) -> &Payload {
        &self.model_json
    }

    /// Split the record into its diagram info and payload.
    ///
    /// An unreadable `datetime` is logged as an `E003` warning and dropped.
    pub(crate) fn into_parts(self) -> (DiagramInfo, Payload) {
        let created = self.datetime.as_deref().and_then(|text| {
            let parsed = parse_timestamp(text);
            if parsed.is_none() {
                let diagnostic = Diagnostic::warning(format!(
                    "cannot read creation timestamp `{text}`"
                ))
                .with_code(ErrorCode::E003);
                warn!(model_id = self.model_id.as_str(); "{diagnostic}");
            }
            parsed
        });

        let metadata = DiagramMetadata::new()
            .with_created(created)
            .with_namespace(self.namespace)
            .with_kind(self.kind);
        let info = DiagramInfo::new(self.model_id)
            .with_name(self.name)
            .with_metadata(metadata);

        (info, self.model_json)
    }
}
