//! Per-diagram metadata.
//!
//! Metadata is owned by the ingestion layer and only read by the core. It is
//! joined with the element relation through the model id.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::element::ModelId;

/// Formats accepted for creation timestamps, tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
];

/// Parse a creation timestamp as written by the export.
///
/// Offsets are normalized to UTC and dropped. A bare date is read as
/// midnight. Returns `None` if no known format matches.
///
/// ```
/// use bpmetrics_core::metadata::parse_timestamp;
///
/// assert!(parse_timestamp("2021-03-04 12:30:00").is_some());
/// assert!(parse_timestamp("2021-03-04T12:30:00+02:00").is_some());
/// assert!(parse_timestamp("2021-03-04").is_some());
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Metadata describing one diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramMetadata {
    created: Option<NaiveDateTime>,
    namespace: Option<String>,
    kind: Option<String>,
}

impl DiagramMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the creation timestamp.
    pub fn with_created(mut self, created: Option<NaiveDateTime>) -> Self {
        self.created = created;
        self
    }

    /// Set the stencil-set namespace.
    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace;
        self
    }

    /// Set the declared diagram type.
    pub fn with_kind(mut self, kind: Option<String>) -> Self {
        self.kind = kind;
        self
    }

    pub fn created(&self) -> Option<NaiveDateTime> {
        self.created
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

/// A diagram's identity, name and metadata.
///
/// Diagrams are registered in the relation even when they contribute no
/// elements, so that every metric reports a value for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramInfo {
    model_id: ModelId,
    name: Option<String>,
    metadata: DiagramMetadata,
}

impl DiagramInfo {
    pub fn new(model_id: ModelId) -> Self {
        Self {
            model_id,
            name: None,
            metadata: DiagramMetadata::default(),
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn with_metadata(mut self, metadata: DiagramMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn model_id(&self) -> &ModelId {
        &self.model_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn metadata(&self) -> &DiagramMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        let plain = parse_timestamp("2022-01-31 08:15:30").expect("plain format");
        assert_eq!(plain.year(), 2022);
        assert_eq!(plain.hour(), 8);

        let fractional = parse_timestamp("2022-01-31 08:15:30.250").expect("fractional");
        assert_eq!(fractional.second(), 30);

        let offset = parse_timestamp("2022-01-31T08:15:30+01:00").expect("rfc3339");
        assert_eq!(offset.hour(), 7);

        let date = parse_timestamp(" 2022-01-31 ").expect("bare date");
        assert_eq!(date.hour(), 0);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("31/31/2022").is_none());
    }

    #[test]
    fn test_diagram_info_builder() {
        let info = DiagramInfo::new(ModelId::new("m1"))
            .with_name(Some("Order".to_string()))
            .with_metadata(
                DiagramMetadata::new()
                    .with_namespace(Some("ns".to_string()))
                    .with_kind(Some("BPMN 2.0".to_string())),
            );

        assert_eq!(info.model_id().as_str(), "m1");
        assert_eq!(info.name(), Some("Order"));
        assert_eq!(info.metadata().namespace(), Some("ns"));
        assert_eq!(info.metadata().kind(), Some("BPMN 2.0"));
        assert!(info.metadata().created().is_none());
    }
}
