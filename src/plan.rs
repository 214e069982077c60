// Draw planning: per-series mark instructions and the x-axis decision

use serde_json::{Map, Value};

use crate::compose::X_FIELD;
use crate::series::{normalized_bar_key, ChartData, DataSeries, Record, SeriesKind};
use crate::value::all_numeric;

/// X-axis treatment for the whole chart.
#[derive(Debug, Clone, PartialEq)]
pub enum XAxis {
    /// Distinct categories in canonical-domain order. The domain is already
    /// deduplicated; the render layer must not deduplicate again.
    Category,
    /// Continuous axis with explicit bounds over the canonical values.
    Numeric { min: f64, max: f64 },
}

/// One rendering directive for a single drawable series.
///
/// Bar marks read their normalized key from the shared composed rows so every
/// canonical x slot is occupied. The other marks carry their own re-projected
/// rows and connect only the points the series actually has.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawInstruction {
    Bar {
        key: String,
        label: String,
        color: Option<String>,
    },
    Line {
        rows: Vec<Record>,
        y_key: String,
        label: String,
        color: Option<String>,
    },
    Area {
        rows: Vec<Record>,
        y_key: String,
        label: String,
        color: Option<String>,
    },
    Scatter {
        rows: Vec<Record>,
        y_key: String,
        label: String,
        color: Option<String>,
    },
}

/// Complete parametrization of the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan {
    pub instructions: Vec<DrawInstruction>,
    pub x_axis: XAxis,
}

/// Decide, per series, which mark to draw and which field it reads.
///
/// Series with no records are skipped entirely: no mark, no legend entry.
pub fn plan_chart(data: &ChartData, domain: &[Value]) -> ChartPlan {
    let instructions = data
        .iter()
        .enumerate()
        .filter(|(_, series)| !series.records.is_empty())
        .map(|(index, series)| plan_series(series, index))
        .collect();

    ChartPlan {
        instructions,
        x_axis: decide_x_axis(domain),
    }
}

fn plan_series(series: &DataSeries, index: usize) -> DrawInstruction {
    match series.kind {
        SeriesKind::Bar => DrawInstruction::Bar {
            key: normalized_bar_key(&series.label, &series.y_key, index),
            label: series.label.clone(),
            color: series.color.clone(),
        },
        SeriesKind::Area => DrawInstruction::Area {
            rows: reproject(series),
            y_key: series.y_key.clone(),
            label: series.label.clone(),
            color: series.color.clone(),
        },
        SeriesKind::Scatter => DrawInstruction::Scatter {
            rows: reproject(series),
            y_key: series.y_key.clone(),
            label: series.label.clone(),
            color: series.color.clone(),
        },
        SeriesKind::Line => DrawInstruction::Line {
            rows: reproject(series),
            y_key: series.y_key.clone(),
            label: series.label.clone(),
            color: series.color.clone(),
        },
    }
}

/// Rebuild a non-bar series' records as localized `{x, y_key}` rows.
///
/// Fields a record lacks are omitted; the render layer gaps or skips those
/// points instead of failing.
fn reproject(series: &DataSeries) -> Vec<Record> {
    series
        .records
        .iter()
        .map(|record| {
            let mut row = Map::new();
            if let Some(x) = series.x_of(record) {
                row.insert(X_FIELD.to_string(), x.clone());
            }
            if let Some(y) = series.y_of(record) {
                row.insert(series.y_key.clone(), y.clone());
            }
            row
        })
        .collect()
}

fn decide_x_axis(domain: &[Value]) -> XAxis {
    if !all_numeric(domain) {
        return XAxis::Category;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in domain {
        let v = value.as_f64().unwrap_or(0.0);
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }

    // Empty domain: nothing will render, keep the bounds finite.
    if min == f64::INFINITY {
        min = 0.0;
        max = 1.0;
    }

    XAxis::Numeric { min, max }
}
