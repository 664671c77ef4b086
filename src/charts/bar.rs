//! Grouped bar plot of average monthly page views, clustered by year.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use plotters::prelude::*;
use tracing::debug;

use crate::aggregate::{self, MONTH_NAMES, MonthlyPivot};
use crate::loader::PageViewSeries;

const SIZE: (u32, u32) = (1200, 700);

/// Each year cluster occupies 0.8 of a unit on the x axis, split twelve ways.
const BAR_WIDTH: f64 = 0.8 / 12.0;

/// Renders one cluster of up to 12 month bars per year, months in calendar
/// order within each cluster, and writes it to `path`.
pub fn render(series: &PageViewSeries, path: &Path) -> Result<()> {
    let pivot = aggregate::monthly_means(series);
    draw(&pivot, path)?;
    debug!(path = %path.display(), years = pivot.years.len(), "Bar plot written");
    Ok(())
}

fn draw(pivot: &MonthlyPivot, path: &Path) -> Result<()> {
    let n_years = pivot.years.len();
    ensure!(n_years > 0, "no data to draw a bar plot from");
    let y_max = pivot.max_mean() * 1.1;

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    // Year `i` is centered on x = i; its cluster spans [i - 0.4, i + 0.4).
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.6..(n_years as f64 - 0.4), 0f64..y_max)?;

    let years = pivot.years.clone();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Years")
        .y_desc("Average Page Views")
        .x_labels(n_years * 2 + 1)
        .x_label_formatter(&move |x| {
            let nearest = x.round();
            if (x - nearest).abs() < 1e-6 && nearest >= 0.0 && (nearest as usize) < years.len() {
                years[nearest as usize].to_string()
            } else {
                String::new()
            }
        })
        .draw()?;

    for (mi, name) in MONTH_NAMES.iter().enumerate() {
        let color = Palette99::pick(mi).mix(1.0);
        chart
            .draw_series(pivot.years.iter().enumerate().filter_map(|(yi, _)| {
                pivot.cells[yi][mi].map(|mean| {
                    let x0 = yi as f64 - 0.4 + mi as f64 * BAR_WIDTH;
                    Rectangle::new([(x0, 0.0), (x0 + BAR_WIDTH, mean)], color.filled())
                })
            }))?
            .label(*name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 4), (x + 10, y + 4)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
