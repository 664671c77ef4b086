//! CSV export of the monthly-average table.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::aggregate::MonthlyPivot;

/// Writes the populated pivot cells as `(year, month, average)` CSV rows in
/// (year, calendar month) order, headers included, overwriting any existing
/// file.
pub fn write_monthly_csv(path: &Path, pivot: &MonthlyPivot) -> Result<()> {
    let rows = pivot.rows();
    debug!(path = %path.display(), rows = rows.len(), "Writing monthly averages CSV");

    let mut writer = csv::Writer::from_path(path)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
