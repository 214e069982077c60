// Data model for composite charts

use serde::Deserialize;
use serde_json::{Map, Value};

/// One key-value record; records carry no fixed schema, even within a series.
pub type Record = Map<String, Value>;

/// Mark kind for a data series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum SeriesKind {
    #[serde(rename = "line")]
    #[default]
    Line,
    #[serde(rename = "bar")]
    Bar,
    #[serde(rename = "area")]
    Area,
    #[serde(rename = "scatter")]
    Scatter,
}

/// One named collection of records plus its field selectors and mark kind.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSeries {
    #[serde(default)]
    pub kind: SeriesKind,
    /// Display name; together with the series' ordinal position it forms the
    /// series identity.
    pub label: String,
    #[serde(default, rename = "data")]
    pub records: Vec<Record>,
    /// Field supplying the x-coordinate of each record.
    #[serde(default = "default_x_key", rename = "xKey")]
    pub x_key: String,
    /// Field supplying the y-coordinate of each record.
    #[serde(default = "default_y_key", rename = "yKey")]
    pub y_key: String,
    /// Rendering hint, opaque to the composition core.
    #[serde(default)]
    pub color: Option<String>,
}

fn default_x_key() -> String { "x".to_string() }
fn default_y_key() -> String { "y".to_string() }

impl DataSeries {
    /// X-value of a record under this series' selector, if present.
    pub fn x_of<'a>(&self, record: &'a Record) -> Option<&'a Value> {
        record.get(&self.x_key)
    }

    /// Y-value of a record under this series' selector, if present.
    pub fn y_of<'a>(&self, record: &'a Record) -> Option<&'a Value> {
        record.get(&self.y_key)
    }
}

/// Ordered collection of series. Order is significant: it determines draw
/// order and the index suffix of normalized bar keys.
pub type ChartData = Vec<DataSeries>;

/// Field name a bar series writes into the composed rows.
///
/// The ordinal index keeps keys unique across the whole row even when two bar
/// series share a label and y-key.
pub fn normalized_bar_key(label: &str, y_key: &str, index: usize) -> String {
    format!("{}-{}-{}", label, y_key, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_bar_key_format() {
        assert_eq!(normalized_bar_key("A", "y", 0), "A-y-0");
        assert_eq!(normalized_bar_key("Revenue", "total", 3), "Revenue-total-3");
    }

    #[test]
    fn test_normalized_bar_key_unique_by_index() {
        // Two series sharing label and y-key must still get distinct keys.
        let first = normalized_bar_key("A", "y", 0);
        let second = normalized_bar_key("A", "y", 1);
        assert_ne!(first, second);
    }

    #[test]
    fn test_series_deserialize_defaults() {
        let series: DataSeries = serde_json::from_str(r#"{"label": "A"}"#).unwrap();
        assert_eq!(series.kind, SeriesKind::Line);
        assert_eq!(series.x_key, "x");
        assert_eq!(series.y_key, "y");
        assert!(series.records.is_empty());
        assert!(series.color.is_none());
    }

    #[test]
    fn test_series_deserialize_full() {
        let series: DataSeries = serde_json::from_str(
            r##"{
                "kind": "bar",
                "label": "Sales",
                "data": [{"month": "Jan", "total": 12}],
                "xKey": "month",
                "yKey": "total",
                "color": "#1976d2"
            }"##,
        )
        .unwrap();
        assert_eq!(series.kind, SeriesKind::Bar);
        assert_eq!(series.records.len(), 1);
        assert_eq!(series.x_key, "month");
        assert_eq!(series.y_key, "total");
        assert_eq!(series.color.as_deref(), Some("#1976d2"));
    }

    #[test]
    fn test_series_deserialize_unknown_kind_fails() {
        let result = serde_json::from_str::<DataSeries>(r#"{"label": "A", "kind": "pie"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_field_selectors() {
        let series: DataSeries =
            serde_json::from_str(r#"{"label": "A", "xKey": "t", "yKey": "v"}"#).unwrap();
        let record: Record = serde_json::from_str(r#"{"t": 1, "other": 9}"#).unwrap();
        assert_eq!(series.x_of(&record), Some(&serde_json::json!(1)));
        assert_eq!(series.y_of(&record), None);
    }
}
