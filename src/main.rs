use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};

use chartfuse::data::records_from_csv;
use chartfuse::render::render_chart;
use chartfuse::ChartSpec;

#[derive(Parser, Debug)]
#[command(name = "chartfuse")]
#[command(about = "Render a composite chart from heterogeneous data series", long_about = None)]
struct Args {
    /// Chart spec JSON file ("-" reads from stdin)
    spec: String,

    /// CSV file supplying records for series that declare none
    #[arg(long)]
    csv: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(long)]
    out: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Read the chart spec
    let spec_text = if args.spec == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read spec from stdin")?;
        buf
    } else {
        fs::read_to_string(&args.spec)
            .with_context(|| format!("Failed to read spec file '{}'", args.spec))?
    };

    let mut spec: ChartSpec =
        serde_json::from_str(&spec_text).context("Failed to parse chart spec JSON")?;

    // Optional shared CSV records for series that carry no inline data
    if let Some(csv_path) = &args.csv {
        let file = fs::File::open(csv_path)
            .with_context(|| format!("Failed to open CSV file '{}'", csv_path))?;
        let records = records_from_csv(file)
            .with_context(|| format!("Failed to read CSV records from '{}'", csv_path))?;
        for series in spec.data.iter_mut().filter(|s| s.records.is_empty()) {
            series.records = records.clone();
        }
    }

    for series in spec.data.iter().filter(|s| s.records.is_empty()) {
        eprintln!("Warning: series '{}' has no records and will be skipped", series.label);
    }

    let bytes = render_chart(&spec.data, &spec.options).context("Failed to render chart")?;

    match &args.out {
        Some(path) => {
            fs::write(path, &bytes).with_context(|| format!("Failed to write '{}'", path))?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(&bytes)
                .context("Failed to write output to stdout")?;
            handle.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}
