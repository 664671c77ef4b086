//! CLI entry point for the page-view trends renderer.
//!
//! Loads the daily page-view CSV, drops percentile-band outliers, and
//! renders the line, bar, and box charts in a fixed order.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use pageview_trends::loader::PageViewSeries;
use pageview_trends::{aggregate, charts, output};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "pageview_trends")]
#[command(about = "Renders descriptive charts from a daily page-view CSV", long_about = None)]
struct Cli {
    /// CSV file with `date` and `value` columns
    #[arg(short, long, default_value = "fcc-forum-pageviews.csv")]
    input: PathBuf,

    /// Directory the three PNG charts are written into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Optional path to also export the monthly-average table as CSV
    #[arg(long)]
    export_csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/pageview_trends.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("pageview_trends.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let series = PageViewSeries::load(&cli.input)?;
    let band = series.band();
    info!(
        raw_rows = series.raw_len(),
        cleaned_rows = series.len(),
        dropped = series.dropped(),
        band_low = band.low,
        band_high = band.high,
        "Dataset cleaned"
    );
    if let Some((first, last)) = series.date_range() {
        info!(%first, %last, "Date range");
    }

    std::fs::create_dir_all(&cli.out_dir)?;

    charts::line::render(&series, &cli.out_dir.join("line_plot.png"))?;
    charts::bar::render(&series, &cli.out_dir.join("bar_plot.png"))?;
    charts::boxplot::render(&series, &cli.out_dir.join("box_plot.png"))?;
    info!(out_dir = %cli.out_dir.display(), "Charts rendered");

    if let Some(export) = &cli.export_csv {
        let pivot = aggregate::monthly_means(&series);
        output::write_monthly_csv(export, &pivot)?;
        info!(path = %export.display(), "Monthly averages exported");
    }

    Ok(())
}
