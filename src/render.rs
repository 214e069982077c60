// Rendering surface: executes a chart plan with plotters

use anyhow::{Context, Result};
use image::ImageEncoder;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde_json::Value;
use std::ops::Range;

use crate::compose::{compose_rows, X_FIELD};
use crate::domain::unify_x_domain;
use crate::plan::{plan_chart, ChartPlan, DrawInstruction, XAxis};
use crate::series::{ChartData, Record};
use crate::value::values_equal;
use crate::{OutputFormat, RenderOptions};

/// Fallback series colors, assigned by draw order when a series carries none.
const CATEGORY10: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

/// Run the whole unify → compose → plan pipeline and encode the result.
pub fn render_chart(data: &ChartData, options: &RenderOptions) -> Result<Vec<u8>> {
    let domain = unify_x_domain(data);
    let rows = compose_rows(data, &domain);
    let plan = plan_chart(data, &domain);

    if plan.instructions.is_empty() {
        anyhow::bail!("Chart has no drawable series");
    }

    match options.format {
        OutputFormat::Png => render_png(&plan, &rows, &domain, options),
        OutputFormat::Svg => render_svg(&plan, &rows, &domain, options),
    }
}

fn render_png(
    plan: &ChartPlan,
    rows: &[Record],
    domain: &[Value],
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    let (width, height) = (options.width, options.height);
    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_plan(&root, plan, rows, domain)?;
    }

    let mut png_bytes = Vec::new();
    {
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(&buffer, width, height, image::ColorType::Rgb8)
            .context("Failed to encode PNG")?;
    }

    Ok(png_bytes)
}

fn render_svg(
    plan: &ChartPlan,
    rows: &[Record],
    domain: &[Value],
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    let mut svg_text = String::new();

    {
        let root = SVGBackend::with_string(&mut svg_text, (options.width, options.height))
            .into_drawing_area();
        draw_plan(&root, plan, rows, domain)?;
    }

    Ok(svg_text.into_bytes())
}

/// Execute the draw instructions against a backend-agnostic drawing area.
fn draw_plan<DB>(
    root: &DrawingArea<DB, Shift>,
    plan: &ChartPlan,
    rows: &[Record],
    domain: &[Value],
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).context("Failed to fill background")?;

    let x_range = x_axis_range(&plan.x_axis, domain);
    let y_range = y_axis_range(plan, rows);

    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)
        .context("Failed to build chart")?;

    match &plan.x_axis {
        XAxis::Category => {
            let labels: Vec<String> = domain.iter().map(value_label).collect();
            chart
                .configure_mesh()
                .x_labels(labels.len())
                .x_label_formatter(&|x| {
                    let idx = *x as usize;
                    if idx < labels.len() {
                        labels[idx].clone()
                    } else {
                        String::new()
                    }
                })
                .draw()
                .context("Failed to draw mesh")?;
        }
        XAxis::Numeric { .. } => {
            chart
                .configure_mesh()
                .draw()
                .context("Failed to draw mesh")?;
        }
    }

    let num_bars = plan
        .instructions
        .iter()
        .filter(|i| matches!(i, DrawInstruction::Bar { .. }))
        .count();
    let bar_slot = bar_slot_width(&plan.x_axis, domain);
    let mut bar_rank = 0usize;

    for (index, instruction) in plan.instructions.iter().enumerate() {
        match instruction {
            DrawInstruction::Bar { key, label, color } => {
                let color = series_color(color, index);
                let width = bar_slot / num_bars.max(1) as f64;
                let offset = (bar_rank as f64 - (num_bars as f64 - 1.0) / 2.0) * width;

                let mut bars = Vec::new();
                for row in rows {
                    let x = row
                        .get(X_FIELD)
                        .and_then(|v| x_position(&plan.x_axis, domain, v));
                    let y = row.get(key).and_then(Value::as_f64);
                    if let (Some(x), Some(y)) = (x, y) {
                        let x_center = x + offset;
                        bars.push(Rectangle::new(
                            [(x_center - width / 2.0, 0.0), (x_center + width / 2.0, y)],
                            color.filled(),
                        ));
                    }
                }

                chart
                    .draw_series(bars)
                    .context("Failed to draw bar series")?
                    .label(label.as_str())
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 4), (x + 12, y + 4)], color.filled())
                    });
                bar_rank += 1;
            }
            DrawInstruction::Line {
                rows: series_rows,
                y_key,
                label,
                color,
            } => {
                let color = series_color(color, index);
                let points = mark_points(series_rows, y_key, &plan.x_axis, domain);
                chart
                    .draw_series(LineSeries::new(points, color.stroke_width(2)))
                    .context("Failed to draw line series")?
                    .label(label.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 12, y)], color.stroke_width(2))
                    });
            }
            DrawInstruction::Area {
                rows: series_rows,
                y_key,
                label,
                color,
            } => {
                let color = series_color(color, index);
                let points = mark_points(series_rows, y_key, &plan.x_axis, domain);
                chart
                    .draw_series(AreaSeries::new(points, 0.0, color.mix(0.3)).border_style(color))
                    .context("Failed to draw area series")?
                    .label(label.as_str())
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 4), (x + 12, y + 4)], color.mix(0.3).filled())
                    });
            }
            DrawInstruction::Scatter {
                rows: series_rows,
                y_key,
                label,
                color,
            } => {
                let color = series_color(color, index);
                let points = mark_points(series_rows, y_key, &plan.x_axis, domain);
                chart
                    .draw_series(
                        points
                            .into_iter()
                            .map(|(x, y)| Circle::new((x, y), 3, color.filled())),
                    )
                    .context("Failed to draw scatter series")?
                    .label(label.as_str())
                    .legend(move |(x, y)| Circle::new((x + 6, y), 3, color.filled()));
            }
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .context("Failed to draw legend")?;

    root.present().context("Failed to present drawing")?;

    Ok(())
}

/// Pixel-space x range for the axis decision.
///
/// Categorical slots are unit-wide with marks centered at idx + 0.5; numeric
/// axes use the plan's explicit bounds.
fn x_axis_range(x_axis: &XAxis, domain: &[Value]) -> Range<f64> {
    match x_axis {
        XAxis::Category => 0.0..(domain.len().max(1) as f64),
        XAxis::Numeric { min, max } => {
            if min == max {
                (min - 1.0)..(max + 1.0)
            } else {
                *min..*max
            }
        }
    }
}

/// Global y range over every plotted value; bar and area charts always
/// include the zero baseline.
fn y_axis_range(plan: &ChartPlan, rows: &[Record]) -> Range<f64> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut has_baseline = false;

    for instruction in &plan.instructions {
        match instruction {
            DrawInstruction::Bar { key, .. } => {
                has_baseline = true;
                for row in rows {
                    if let Some(y) = row.get(key).and_then(Value::as_f64) {
                        if y < min {
                            min = y;
                        }
                        if y > max {
                            max = y;
                        }
                    }
                }
            }
            DrawInstruction::Line {
                rows: series_rows,
                y_key,
                ..
            }
            | DrawInstruction::Area {
                rows: series_rows,
                y_key,
                ..
            }
            | DrawInstruction::Scatter {
                rows: series_rows,
                y_key,
                ..
            } => {
                if matches!(instruction, DrawInstruction::Area { .. }) {
                    has_baseline = true;
                }
                for row in series_rows {
                    if let Some(y) = row.get(y_key).and_then(Value::as_f64) {
                        if y < min {
                            min = y;
                        }
                        if y > max {
                            max = y;
                        }
                    }
                }
            }
        }
    }

    if has_baseline {
        if min > 0.0 {
            min = 0.0;
        }
        if max < 0.0 {
            max = 0.0;
        }
    }

    if min == f64::INFINITY {
        return 0.0..1.0;
    }
    if min == max {
        return (min - 1.0)..(max + 1.0);
    }
    let padding = (max - min) * 0.05;
    (min - padding)..(max + padding)
}

/// Chart-space x coordinate of a canonical or record x-value.
fn x_position(x_axis: &XAxis, domain: &[Value], value: &Value) -> Option<f64> {
    match x_axis {
        XAxis::Category => domain
            .iter()
            .position(|v| values_equal(v, value))
            .map(|i| i as f64 + 0.5),
        XAxis::Numeric { .. } => value.as_f64(),
    }
}

/// Resolve `{x, y}` pairs for a re-projected row list, skipping rows whose
/// coordinates are absent or non-numeric.
fn mark_points(rows: &[Record], y_key: &str, x_axis: &XAxis, domain: &[Value]) -> Vec<(f64, f64)> {
    rows.iter()
        .filter_map(|row| {
            let x = row
                .get(X_FIELD)
                .and_then(|v| x_position(x_axis, domain, v))?;
            let y = row.get(y_key).and_then(Value::as_f64)?;
            Some((x, y))
        })
        .collect()
}

/// Width of one grouped-bar slot in chart coordinates.
fn bar_slot_width(x_axis: &XAxis, domain: &[Value]) -> f64 {
    match x_axis {
        XAxis::Category => 0.8,
        XAxis::Numeric { .. } => {
            // Narrowest gap between adjacent canonical values bounds the slot.
            let mut values: Vec<f64> = domain.iter().filter_map(Value::as_f64).collect();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let mut gap = f64::INFINITY;
            for pair in values.windows(2) {
                let d = pair[1] - pair[0];
                if d > 0.0 && d < gap {
                    gap = d;
                }
            }
            if gap == f64::INFINITY {
                0.8
            } else {
                gap * 0.8
            }
        }
    }
}

fn series_color(color: &Option<String>, index: usize) -> RGBColor {
    match color.as_deref() {
        Some(name) => parse_color(name),
        None => CATEGORY10[index % CATEGORY10.len()],
    }
}

/// Parse a color hint: a few CSS names plus #rrggbb hex.
fn parse_color(name: &str) -> RGBColor {
    match name {
        "red" => RED,
        "green" => GREEN,
        "blue" => BLUE,
        "black" => BLACK,
        "yellow" => YELLOW,
        "cyan" => CYAN,
        "magenta" => MAGENTA,
        "white" => WHITE,
        other => parse_hex(other).unwrap_or(BLUE),
    }
}

fn parse_hex(name: &str) -> Option<RGBColor> {
    let hex = name.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let n = u32::from_str_radix(hex, 16).ok()?;
    Some(RGBColor((n >> 16) as u8, (n >> 8) as u8, n as u8))
}

fn value_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
