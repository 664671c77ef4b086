//! Aggregations derived from the cleaned series for the bar and box charts.
//!
//! Everything here is a pure function of the series; the shared table is
//! never mutated. Month columns and categories always come out in calendar
//! order, years in ascending order, regardless of input row order.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::loader::PageViewSeries;
use crate::stats::mean;

/// Full month names in calendar order, indexed by `month - 1`.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Three-letter month abbreviations in calendar order, indexed by `month - 1`.
pub const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Mean page views per (year, month), pivoted into one row per year and one
/// column per calendar month. Cells for months absent from the data are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPivot {
    /// Distinct years present, ascending.
    pub years: Vec<i32>,
    /// One 12-cell row per entry in `years`, January first.
    pub cells: Vec<[Option<f64>; 12]>,
}

impl MonthlyPivot {
    /// Mean for `year` and 1-based `month`, if that combination has data.
    pub fn get(&self, year: i32, month: u32) -> Option<f64> {
        let row = self.years.iter().position(|&y| y == year)?;
        self.cells[row][month as usize - 1]
    }

    /// Largest mean in the table, for chart axis scaling.
    pub fn max_mean(&self) -> f64 {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .fold(0.0, |m, &v| m.max(v))
    }

    /// Populated cells in (year, calendar month) order.
    pub fn rows(&self) -> Vec<MonthlyAverageRow> {
        let mut out = Vec::new();
        for (yi, &year) in self.years.iter().enumerate() {
            for (mi, cell) in self.cells[yi].iter().enumerate() {
                if let Some(average) = cell {
                    out.push(MonthlyAverageRow {
                        year,
                        month: MONTH_NAMES[mi],
                        average: *average,
                    });
                }
            }
        }
        out
    }
}

/// One populated pivot cell, as exported to CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverageRow {
    pub year: i32,
    pub month: &'static str,
    pub average: f64,
}

/// Computes the mean value per (year, month) over the cleaned series.
pub fn monthly_means(series: &PageViewSeries) -> MonthlyPivot {
    let mut groups: BTreeMap<i32, [Vec<f64>; 12]> = BTreeMap::new();

    for row in series.rows() {
        let cell = &mut groups.entry(row.date.year()).or_default()[row.date.month0() as usize];
        cell.push(row.value);
    }

    let mut years = Vec::with_capacity(groups.len());
    let mut cells = Vec::with_capacity(groups.len());
    for (year, months) in groups {
        years.push(year);
        let mut row = [None; 12];
        for (mi, values) in months.iter().enumerate() {
            if !values.is_empty() {
                row[mi] = Some(mean(values));
            }
        }
        cells.push(row);
    }

    MonthlyPivot { years, cells }
}

/// A labeled sample group feeding one box in a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySamples {
    pub label: String,
    pub values: Vec<f64>,
}

/// Groups the cleaned values by year, ascending.
pub fn group_by_year(series: &PageViewSeries) -> Vec<CategorySamples> {
    let mut groups: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for row in series.rows() {
        groups.entry(row.date.year()).or_default().push(row.value);
    }

    groups
        .into_iter()
        .map(|(year, values)| CategorySamples {
            label: year.to_string(),
            values,
        })
        .collect()
}

/// Groups the cleaned values by abbreviated month name, Jan..Dec. Months
/// absent from the data produce no category.
pub fn group_by_month(series: &PageViewSeries) -> Vec<CategorySamples> {
    let mut groups: [Vec<f64>; 12] = Default::default();
    for row in series.rows() {
        groups[row.date.month0() as usize].push(row.value);
    }

    groups
        .into_iter()
        .enumerate()
        .filter(|(_, values)| !values.is_empty())
        .map(|(mi, values)| CategorySamples {
            label: MONTH_ABBREVS[mi].to_string(),
            values,
        })
        .collect()
}
