//! The combined metrics table.
//!
//! One row per diagram, one column per metric. Rows follow the order of the
//! relation the metrics were computed on; columns follow the registry.
//!
//! The table serializes as a JSON array of flat objects keyed by column
//! name. Non-finite values (the NaN sentinels) are written as `null`:
//!
//! ```json
//! [
//!   {"model_id": "m1", "CFC": 2.0, "CNC": 0.667, "Density": null}
//! ]
//! ```

use indexmap::IndexMap;
use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};

use bpmetrics_core::element::ModelId;

use crate::metrics::{MetricError, PerDiagram};

/// Per-diagram metric values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsTable {
    columns: Vec<&'static str>,
    rows: IndexMap<ModelId, Vec<f64>>,
}

impl MetricsTable {
    /// Create a table with one empty row per model id.
    pub fn new(model_ids: impl IntoIterator<Item = ModelId>) -> Self {
        Self {
            columns: Vec::new(),
            rows: model_ids
                .into_iter()
                .map(|model_id| (model_id, Vec::new()))
                .collect(),
        }
    }

    /// Append a metric column.
    ///
    /// Rows missing from `values` get NaN; values for unknown model ids are
    /// ignored.
    pub fn insert_column(&mut self, name: &'static str, values: PerDiagram) {
        self.columns.push(name);
        for (model_id, row) in &mut self.rows {
            row.push(values.get(model_id).copied().unwrap_or(f64::NAN));
        }
    }

    /// Column names in order.
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// Model ids in row order.
    pub fn model_ids(&self) -> impl Iterator<Item = &ModelId> {
        self.rows.keys()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One cell.
    pub fn get(&self, model_id: &ModelId, metric: &str) -> Option<f64> {
        let column = self.column_index(metric)?;
        self.rows.get(model_id).map(|row| row[column])
    }

    /// One metric for every diagram.
    pub fn column(&self, metric: &str) -> Option<PerDiagram> {
        let column = self.column_index(metric)?;
        Some(
            self.rows
                .iter()
                .map(|(model_id, row)| (model_id.clone(), row[column]))
                .collect(),
        )
    }

    /// Every metric of one diagram, in column order.
    pub fn row(&self, model_id: &ModelId) -> Option<impl Iterator<Item = (&'static str, f64)> + '_> {
        let row = self.rows.get(model_id)?;
        Some(self.columns.iter().copied().zip(row.iter().copied()))
    }

    fn column_index(&self, metric: &str) -> Option<usize> {
        self.columns.iter().position(|name| *name == metric)
    }
}

struct RowView<'a> {
    model_id: &'a ModelId,
    columns: &'a [&'static str],
    values: &'a [f64],
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len() + 1))?;
        map.serialize_entry("model_id", self.model_id)?;
        for (name, value) in self.columns.iter().zip(self.values) {
            map.serialize_entry(name, &value.is_finite().then_some(*value))?;
        }
        map.end()
    }
}

impl Serialize for MetricsTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for (model_id, values) in &self.rows {
            seq.serialize_element(&RowView {
                model_id,
                columns: &self.columns,
                values,
            })?;
        }
        seq.end()
    }
}

/// The outcome of a metrics run.
#[derive(Debug, Clone, Default)]
pub struct MetricsReport {
    table: MetricsTable,
    failures: Vec<MetricError>,
}

impl MetricsReport {
    pub fn new(table: MetricsTable, failures: Vec<MetricError>) -> Self {
        Self { table, failures }
    }

    pub fn table(&self) -> &MetricsTable {
        &self.table
    }

    /// Metrics that could not be computed.
    pub fn failures(&self) -> &[MetricError] {
        &self.failures
    }

    /// Returns `true` when every selected metric was computed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_table(self) -> MetricsTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MetricsTable {
        let mut table = MetricsTable::new([ModelId::new("m1"), ModelId::new("m2")]);
        table.insert_column(
            "CFC",
            [(ModelId::new("m1"), 2.0), (ModelId::new("m2"), 0.0)]
                .into_iter()
                .collect(),
        );
        table.insert_column("CNC", [(ModelId::new("m1"), 0.5)].into_iter().collect());
        table
    }

    #[test]
    fn test_cells() {
        let table = table();

        assert_eq!(table.columns(), &["CFC", "CNC"]);
        assert_eq!(table.get(&ModelId::new("m1"), "CNC"), Some(0.5));
        assert!(table.get(&ModelId::new("m2"), "CNC").unwrap().is_nan());
        assert_eq!(table.get(&ModelId::new("m1"), "IC"), None);
        assert_eq!(table.get(&ModelId::new("m3"), "CFC"), None);
    }

    #[test]
    fn test_row_view() {
        let table = table();
        let row: Vec<(&str, f64)> = table.row(&ModelId::new("m1")).unwrap().collect();

        assert_eq!(row, vec![("CFC", 2.0), ("CNC", 0.5)]);
    }

    #[test]
    fn test_serialize_nan_as_null() {
        let json = serde_json::to_value(table()).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {"model_id": "m1", "CFC": 2.0, "CNC": 0.5},
                {"model_id": "m2", "CFC": 0.0, "CNC": null}
            ])
        );
    }
}
