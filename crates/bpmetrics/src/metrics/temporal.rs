//! Recency of diagrams.

use std::collections::BTreeSet;

use bpmetrics_core::relation::ElementRelation;

use super::PerDiagram;

/// `creation_date_rank`: dense rank by creation timestamp, newest first.
///
/// The most recent diagram ranks 0 and equal timestamps share a rank.
/// Diagrams without a timestamp get NaN.
pub(super) fn creation_date_rank(relation: &ElementRelation) -> PerDiagram {
    let timestamps: BTreeSet<_> = relation
        .diagrams()
        .filter_map(|info| info.metadata().created())
        .collect();

    relation
        .diagrams()
        .map(|info| {
            let rank = info.metadata().created().map_or(f64::NAN, |created| {
                timestamps.range(created..).skip(1).count() as f64
            });
            (info.model_id().clone(), rank)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use bpmetrics_core::{
        element::ModelId,
        metadata::{DiagramInfo, DiagramMetadata, parse_timestamp},
        relation::OptionalColumns,
    };

    use super::*;

    fn dated(model: &str, created: Option<&str>) -> ElementRelation {
        let metadata = DiagramMetadata::new().with_created(created.and_then(parse_timestamp));
        let info = DiagramInfo::new(ModelId::new(model)).with_metadata(metadata);
        ElementRelation::for_diagram(info, OptionalColumns::all(), Vec::new()).unwrap()
    }

    #[test]
    fn test_dense_rank_descending() {
        let mut relation = dated("old", Some("2019-01-01 00:00:00"));
        relation.concat(dated("new", Some("2021-06-01 00:00:00"))).unwrap();
        relation.concat(dated("new2", Some("2021-06-01 00:00:00"))).unwrap();
        relation.concat(dated("mid", Some("2020-03-01 00:00:00"))).unwrap();
        relation.concat(dated("undated", None)).unwrap();

        let ranks = creation_date_rank(&relation);

        assert_eq!(ranks[&ModelId::new("new")], 0.0);
        assert_eq!(ranks[&ModelId::new("new2")], 0.0);
        assert_eq!(ranks[&ModelId::new("mid")], 1.0);
        assert_eq!(ranks[&ModelId::new("old")], 2.0);
        assert!(ranks[&ModelId::new("undated")].is_nan());
    }
}
