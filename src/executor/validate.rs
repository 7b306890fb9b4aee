//! Spec validation against a dataset's columns

use std::collections::HashSet;

use super::error::{Clause, QueryValidationError};
use crate::dataset::ColumnMetadata;
use crate::spec::{Aggregation, Direction, FilterOp, QuerySpec};

/// Check that every column the spec names exists in the dataset and that
/// every metric is well-formed. Clauses are checked in filter, group_by,
/// metric, order_by order and the first problem is reported.
pub fn validate_spec(
    spec: &QuerySpec,
    columns: &[ColumnMetadata],
) -> Result<(), QueryValidationError> {
    let known: HashSet<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    let check = |clause: Clause, column: &str| {
        if known.contains(column) {
            Ok(())
        } else {
            Err(QueryValidationError::UnknownColumn {
                clause,
                column: column.to_string(),
            })
        }
    };

    for filter in &spec.filters {
        check(Clause::Filter, filter.column.as_str())?;
    }

    for column in &spec.group_by {
        check(Clause::GroupBy, column.as_str())?;
    }

    for metric in &spec.metrics {
        match &metric.column {
            Some(column) => check(Clause::Metric, column.as_str())?,
            None if metric.agg != Aggregation::Count => {
                return Err(QueryValidationError::MissingMetricColumn(metric.agg));
            }
            None => {}
        }
    }

    for order in &spec.order_by {
        check(Clause::OrderBy, order.column.as_str())?;
    }

    Ok(())
}

/// Convert a spec in its plain nested form, reporting unsupported
/// aggregators, operators and directions by name rather than as a generic
/// deserialization failure
pub fn parse_spec(value: &serde_json::Value) -> Result<QuerySpec, QueryValidationError> {
    if !value.is_object() {
        return Err(QueryValidationError::Malformed(
            "expected an object".to_string(),
        ));
    }

    check_enum_field::<Aggregation>(value, "metrics", "agg", QueryValidationError::UnsupportedAggregation)?;
    check_enum_field::<FilterOp>(value, "filters", "op", QueryValidationError::UnsupportedOperator)?;
    check_enum_field::<Direction>(value, "order_by", "direction", QueryValidationError::UnsupportedDirection)?;

    QuerySpec::from_value(value.clone())
        .map_err(|e| QueryValidationError::Malformed(e.to_string()))
}

/// Walk `value[list][*][field]` and parse each string present as `T`
fn check_enum_field<T: std::str::FromStr>(
    value: &serde_json::Value,
    list: &str,
    field: &str,
    unsupported: fn(String) -> QueryValidationError,
) -> Result<(), QueryValidationError> {
    let Some(items) = value.get(list).and_then(|v| v.as_array()) else {
        return Ok(());
    };

    for raw in items.iter().filter_map(|item| item.get(field)) {
        match raw {
            serde_json::Value::Null => {}
            serde_json::Value::String(s) => {
                if s.parse::<T>().is_err() {
                    return Err(unsupported(s.clone()));
                }
            }
            other => return Err(unsupported(other.to_string())),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{QueryFilter, QueryMetric, QueryOrder};
    use serde_json::json;

    fn columns() -> Vec<ColumnMetadata> {
        vec![
            ColumnMetadata::number("year"),
            ColumnMetadata::text("ward"),
            ColumnMetadata::number("population"),
        ]
    }

    #[test]
    fn test_valid_spec_passes() {
        let spec = QuerySpec {
            filters: vec![QueryFilter::new("year", FilterOp::Eq, 2023)],
            group_by: vec!["ward".to_string()],
            metrics: vec![QueryMetric::of(Aggregation::Sum, "population"), QueryMetric::count_rows()],
            order_by: vec![QueryOrder::new("population", Direction::Desc)],
            limit: Some(10),
        };
        assert!(validate_spec(&spec, &columns()).is_ok());
    }

    #[test]
    fn test_unknown_column_names_clause() {
        let spec = QuerySpec {
            group_by: vec!["district".to_string()],
            ..Default::default()
        };
        let err = validate_spec(&spec, &columns()).unwrap_err();
        assert_eq!(err.column(), Some("district"));
        assert_eq!(err.to_string(), "Unknown group_by column: district");
    }

    #[test]
    fn test_order_by_must_name_dataset_column() {
        let spec = QuerySpec {
            order_by: vec![QueryOrder::new("population_sum", Direction::Asc)],
            ..Default::default()
        };
        let err = validate_spec(&spec, &columns()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown order_by column: population_sum");
    }

    #[test]
    fn test_non_count_metric_requires_column() {
        let spec = QuerySpec {
            metrics: vec![QueryMetric::new(Aggregation::Avg, None)],
            ..Default::default()
        };
        assert_eq!(
            validate_spec(&spec, &columns()),
            Err(QueryValidationError::MissingMetricColumn(Aggregation::Avg))
        );
    }

    #[test]
    fn test_parse_spec_reports_unsupported_names() {
        let err = parse_spec(&json!({"metrics": [{"agg": "median", "column": "population"}]})).unwrap_err();
        assert_eq!(err, QueryValidationError::UnsupportedAggregation("median".to_string()));
        assert_eq!(err.to_string(), "Unsupported aggregator: median");

        let err = parse_spec(&json!({"filters": [{"column": "year", "op": "like", "value": 1}]})).unwrap_err();
        assert_eq!(err, QueryValidationError::UnsupportedOperator("like".to_string()));

        let err = parse_spec(&json!({"order_by": [{"column": "year", "direction": "up"}]})).unwrap_err();
        assert_eq!(err, QueryValidationError::UnsupportedDirection("up".to_string()));
    }

    #[test]
    fn test_parse_spec_malformed() {
        assert!(matches!(parse_spec(&json!([1, 2])), Err(QueryValidationError::Malformed(_))));
        assert!(matches!(
            parse_spec(&json!({"group_by": "ward"})),
            Err(QueryValidationError::Malformed(_))
        ));
    }
}
