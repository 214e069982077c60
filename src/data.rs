// Record loading from caller-supplied JSON and CSV

use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};
use std::io::Read;

use crate::series::Record;

/// Convert a JSON array of objects into a record list.
///
/// An empty array is a valid (empty) series; non-object items are an error.
pub fn records_from_json(value: &Value) -> Result<Vec<Record>> {
    let array = value
        .as_array()
        .ok_or_else(|| anyhow!("Series data must be a JSON array of objects"))?;

    let mut records = Vec::with_capacity(array.len());
    for item in array {
        let record = item
            .as_object()
            .ok_or_else(|| anyhow!("Items in series data must be objects"))?;
        records.push(record.clone());
    }

    Ok(records)
}

/// Read CSV rows into records, sniffing numeric cells.
///
/// CSV is untyped text, so this is the one place numbers are coerced; the
/// composition core itself never reinterprets values.
pub fn records_from_csv<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = csv_reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_idx, row) in csv_reader.records().enumerate() {
        let row = row.with_context(|| format!("Failed to read CSV row {}", row_idx + 1))?;
        let mut record = Map::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            record.insert(header.clone(), sniff_value(cell));
        }
        records.push(record);
    }

    Ok(records)
}

fn sniff_value(cell: &str) -> Value {
    if let Ok(n) = cell.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = cell.parse::<f64>() {
        // Infinities and NaN have no JSON representation; keep those as text.
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    Value::from(cell)
}
