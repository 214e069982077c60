// Row composition: aligns bar series on the canonical x-domain

use serde_json::{Map, Value};

use crate::series::{normalized_bar_key, ChartData, Record, SeriesKind};
use crate::value::values_equal;

/// Field name holding the canonical x-value in every composed row.
pub const X_FIELD: &str = "x";

/// Build one composed row per canonical x-value, in domain order.
///
/// Only bar series contribute fields; the other kinds render from their own
/// re-projected rows instead. A bar series without a record at an x-value
/// still gets its normalized key, valued zero — grouped bars must occupy
/// every slot or they drift out of alignment.
pub fn compose_rows(data: &ChartData, domain: &[Value]) -> Vec<Record> {
    domain
        .iter()
        .map(|x_value| {
            let mut row = Map::new();
            row.insert(X_FIELD.to_string(), x_value.clone());

            for (index, series) in data.iter().enumerate() {
                if series.kind != SeriesKind::Bar {
                    continue;
                }

                // First record at this x-value wins; equality, not proximity.
                let point = series.records.iter().find(|record| {
                    series
                        .x_of(record)
                        .map_or(false, |x| values_equal(x, x_value))
                });

                let y_value = point
                    .and_then(|record| series.y_of(record).cloned())
                    .unwrap_or_else(|| Value::from(0));

                let key = normalized_bar_key(&series.label, &series.y_key, index);
                row.insert(key, y_value);
            }

            row
        })
        .collect()
}
