//! Order-by resolution and sorting of result rows

use std::cmp::Ordering;
use tracing::debug;

use crate::dataset::{Row, Value};
use crate::spec::{Direction, QueryOrder};

/// Resolve a requested order column against the result columns.
///
/// An exact name wins. Otherwise the first derived column of the form
/// `{requested}_*` or `*_{requested}` is used, which lets callers order by
/// an aggregate through its base column (`population` → `population_sum`).
/// Returns `None` when nothing matches; callers skip such directives.
pub fn resolve_order_column<'a>(requested: &str, columns: &'a [String]) -> Option<&'a str> {
    if let Some(exact) = columns.iter().find(|c| c.as_str() == requested) {
        return Some(exact.as_str());
    }

    let prefix = format!("{}_", requested);
    let suffix = format!("_{}", requested);
    columns
        .iter()
        .find(|c| c.starts_with(&prefix) || c.ends_with(&suffix))
        .map(String::as_str)
}

/// Sort rows by the resolvable order directives, in directive order.
///
/// The sort is stable and nulls stay last in both directions.
pub fn sort_rows(rows: &mut [Row], order_by: &[QueryOrder], columns: &[String]) {
    let keys: Vec<(&str, Direction)> = order_by
        .iter()
        .filter_map(|order| match resolve_order_column(&order.column, columns) {
            Some(column) => Some((column, order.direction)),
            None => {
                debug!(column = %order.column, "order_by column not in result, skipping");
                None
            }
        })
        .collect();

    if keys.is_empty() {
        return;
    }

    rows.sort_by(|a, b| {
        keys.iter()
            .map(|(column, direction)| compare_cells(a.get(*column), b.get(*column), *direction))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

fn compare_cells(a: Option<&Value>, b: Option<&Value>, direction: Direction) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let ordering = x.total_cmp(y);
            if direction.is_ascending() {
                ordering
            } else {
                ordering.reverse()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn row(ward: &str, total: Value) -> Row {
        [
            ("ward".to_string(), Value::from(ward)),
            ("population_sum".to_string(), total),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_resolve_exact_then_derived() {
        let columns = names(&["ward", "population_sum", "avg_income"]);
        assert_eq!(resolve_order_column("ward", &columns), Some("ward"));
        assert_eq!(resolve_order_column("population", &columns), Some("population_sum"));
        assert_eq!(resolve_order_column("income", &columns), Some("avg_income"));
        assert_eq!(resolve_order_column("year", &columns), None);
    }

    #[test]
    fn test_resolve_prefers_first_derived_column() {
        let columns = names(&["population_sum", "population_max"]);
        assert_eq!(resolve_order_column("population", &columns), Some("population_sum"));
    }

    #[test]
    fn test_sort_desc_with_nulls_last() {
        let columns = names(&["ward", "population_sum"]);
        let mut rows = vec![
            row("A", Value::Int(100)),
            row("N", Value::Null),
            row("B", Value::Int(120)),
        ];
        sort_rows(&mut rows, &[QueryOrder::new("population", Direction::Desc)], &columns);

        let wards: Vec<&str> = rows.iter().map(|r| r["ward"].as_text().unwrap()).collect();
        assert_eq!(wards, vec!["B", "A", "N"]);
    }

    #[test]
    fn test_multi_key_sort_is_stable() {
        let columns = names(&["ward", "population_sum"]);
        let mut rows = vec![
            row("B", Value::Int(1)),
            row("A", Value::Int(2)),
            row("A", Value::Int(1)),
            row("C", Value::Int(2)),
        ];
        let order = [
            QueryOrder::new("population", Direction::Desc),
            QueryOrder::new("missing", Direction::Asc),
        ];
        sort_rows(&mut rows, &order, &columns);

        let wards: Vec<&str> = rows.iter().map(|r| r["ward"].as_text().unwrap()).collect();
        assert_eq!(wards, vec!["A", "C", "B", "A"]);
    }

    #[test]
    fn test_unresolved_order_leaves_rows_untouched() {
        let columns = names(&["ward"]);
        let mut rows = vec![row("B", Value::Int(1)), row("A", Value::Int(2))];
        sort_rows(&mut rows, &[QueryOrder::new("year", Direction::Asc)], &columns);
        assert_eq!(rows[0]["ward"], Value::from("B"));
    }
}
