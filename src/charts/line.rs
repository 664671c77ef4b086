//! Line plot of the full cleaned daily series.

use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;
use tracing::debug;

use crate::loader::PageViewSeries;

const SIZE: (u32, u32) = (1500, 500);

/// Renders the cleaned series as a thin continuous red line over a date
/// axis and writes it to `path`.
pub fn render(series: &PageViewSeries, path: &Path) -> Result<()> {
    let (first, last) = series
        .date_range()
        .context("cannot draw a line plot over an empty series")?;
    let y_max = series.rows().iter().map(|r| r.value).fold(0.0, f64::max) * 1.05;

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .caption(
            "Daily freeCodeCamp Forum Page Views 5/2016-12/2019",
            ("sans-serif", 24),
        )
        .build_cartesian_2d(first..last, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Page Views")
        .x_label_formatter(&|d| d.format("%Y-%m").to_string())
        .draw()?;

    chart.draw_series(LineSeries::new(
        series.rows().iter().map(|r| (r.date, r.value)),
        RED.stroke_width(1),
    ))?;

    root.present()
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), points = series.len(), "Line plot written");
    Ok(())
}
