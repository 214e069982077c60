// Domain unification across heterogeneous series

use serde_json::Value;

use crate::series::ChartData;
use crate::value::{all_numeric, values_equal};

/// Collect the canonical x-domain: every distinct x-value across all series.
///
/// Ordering is ascending when the union is entirely numeric. Otherwise the
/// first-seen order is kept as-is: mixed and non-numeric values have no total
/// order that is guaranteed to be meaningful, so the sort is a no-op rather
/// than an error.
pub fn unify_x_domain(data: &ChartData) -> Vec<Value> {
    let mut domain: Vec<Value> = Vec::new();

    for series in data {
        for record in &series.records {
            if let Some(x) = series.x_of(record) {
                if !domain.iter().any(|seen| values_equal(seen, x)) {
                    domain.push(x.clone());
                }
            }
        }
    }

    if all_numeric(&domain) {
        domain.sort_by(|a, b| {
            let fa = a.as_f64().unwrap_or(0.0);
            let fb = b.as_f64().unwrap_or(0.0);
            fa.partial_cmp(&fb).unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    domain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{DataSeries, SeriesKind};
    use serde_json::{json, Value};

    fn make_series(kind: SeriesKind, label: &str, raw: Value) -> DataSeries {
        let records = raw
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect();
        DataSeries {
            kind,
            label: label.to_string(),
            records,
            x_key: "x".to_string(),
            y_key: "y".to_string(),
            color: None,
        }
    }

    #[test]
    fn test_numeric_domain_sorted() {
        let data = vec![
            make_series(SeriesKind::Line, "A", json!([{"x": 3, "y": 1}, {"x": 1, "y": 2}])),
            make_series(SeriesKind::Bar, "B", json!([{"x": 2, "y": 5}])),
        ];
        let domain = unify_x_domain(&data);
        assert_eq!(domain, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_domain_deduplicates() {
        let data = vec![
            make_series(SeriesKind::Bar, "A", json!([{"x": 1, "y": 5}, {"x": 2, "y": 3}])),
            make_series(SeriesKind::Line, "B", json!([{"x": 2, "y": 7}, {"x": 1, "y": 9}])),
        ];
        let domain = unify_x_domain(&data);
        assert_eq!(domain.len(), 2);
    }

    #[test]
    fn test_int_and_float_share_a_slot() {
        let data = vec![
            make_series(SeriesKind::Bar, "A", json!([{"x": 1, "y": 5}])),
            make_series(SeriesKind::Bar, "B", json!([{"x": 1.0, "y": 7}])),
        ];
        let domain = unify_x_domain(&data);
        assert_eq!(domain.len(), 1);
    }

    #[test]
    fn test_string_domain_keeps_first_seen_order() {
        let data = vec![make_series(
            SeriesKind::Line,
            "A",
            json!([{"x": "b", "y": 1}, {"x": "a", "y": 2}, {"x": "c", "y": 3}]),
        )];
        let domain = unify_x_domain(&data);
        assert_eq!(domain, vec![json!("b"), json!("a"), json!("c")]);
    }

    #[test]
    fn test_mixed_domain_keeps_first_seen_order() {
        // One non-numeric value disables sorting for the whole union.
        let data = vec![
            make_series(SeriesKind::Line, "A", json!([{"x": 9, "y": 1}, {"x": "a", "y": 2}])),
            make_series(SeriesKind::Line, "B", json!([{"x": 2, "y": 3}])),
        ];
        let domain = unify_x_domain(&data);
        assert_eq!(domain, vec![json!(9), json!("a"), json!(2)]);
    }

    #[test]
    fn test_records_missing_x_are_skipped() {
        let data = vec![make_series(
            SeriesKind::Line,
            "A",
            json!([{"y": 1}, {"x": 4, "y": 2}]),
        )];
        let domain = unify_x_domain(&data);
        assert_eq!(domain, vec![json!(4)]);
    }

    #[test]
    fn test_empty_chart_yields_empty_domain() {
        let data = vec![make_series(SeriesKind::Bar, "A", json!([]))];
        assert!(unify_x_domain(&data).is_empty());
    }

    #[test]
    fn test_per_series_x_keys() {
        let mut by_time = make_series(SeriesKind::Line, "A", json!([{"t": 5, "y": 1}]));
        by_time.x_key = "t".to_string();
        let by_x = make_series(SeriesKind::Line, "B", json!([{"x": 3, "y": 2}]));
        let domain = unify_x_domain(&vec![by_time, by_x]);
        assert_eq!(domain, vec![json!(3), json!(5)]);
    }
}
