//! Year-wise and month-wise box plots of the cleaned series, side by side
//! in a single image.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::aggregate::{self, CategorySamples};
use crate::loader::PageViewSeries;

const SIZE: (u32, u32) = (1440, 640);

/// Renders the two box-plot panels and writes them to `path`: value
/// distribution per year (ascending) on the left, per month (calendar
/// order) on the right.
pub fn render(series: &PageViewSeries, path: &Path) -> Result<()> {
    let by_year = aggregate::group_by_year(series);
    let by_month = aggregate::group_by_month(series);

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally((SIZE.0 / 2) as i32);

    draw_panel(&left, "Year-wise Box Plot (Trend)", "Year", &by_year)?;
    draw_panel(&right, "Month-wise Box Plot (Seasonality)", "Month", &by_month)?;

    root.present()
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!(
        path = %path.display(),
        years = by_year.len(),
        months = by_month.len(),
        "Box plot written"
    );
    Ok(())
}

/// Draws one panel: a box per category plus the out-of-fence samples as
/// individual dots.
fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    title: &str,
    x_desc: &str,
    groups: &[CategorySamples],
) -> Result<()> {
    ensure!(!groups.is_empty(), "no categories for panel {title:?}");

    let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
    let y_max = groups
        .iter()
        .flat_map(|g| g.values.iter())
        .fold(0f32, |m, &v| m.max(v as f32))
        * 1.05;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .caption(title, ("sans-serif", 22))
        .build_cartesian_2d(labels[..].into_segmented(), 0f32..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc("Page Views")
        .draw()?;

    for (i, group) in groups.iter().enumerate() {
        let quartiles = Quartiles::new(&group.values);
        chart.draw_series(std::iter::once(
            Boxplot::new_vertical(SegmentValue::CenterOf(&labels[i]), &quartiles)
                .width(20)
                .whisker_width(0.5)
                .style(BLUE),
        ))?;

        // The Boxplot element stops at the 1.5 IQR fences; samples beyond
        // them are drawn as individual points.
        let [lower_fence, _, _, _, upper_fence] = quartiles.values();
        chart.draw_series(
            group
                .values
                .iter()
                .map(|&v| v as f32)
                .filter(|v| *v < lower_fence || *v > upper_fence)
                .map(|v| Circle::new((SegmentValue::CenterOf(&labels[i]), v), 2, BLACK.filled())),
        )?;
    }

    Ok(())
}
