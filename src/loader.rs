//! CSV ingestion and outlier cleaning.
//!
//! Loads the raw `date,value` table, computes the [P2.5, P97.5] band over
//! the full raw distribution once, and keeps only the rows inside it. The
//! resulting [`PageViewSeries`] is built a single time at startup and read,
//! never mutated, by every renderer.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::stats::PercentileBand;

/// Quantiles defining the outlier band: the bottom and top 2.5% are dropped.
pub const LOW_QUANTILE: f64 = 0.025;
pub const HIGH_QUANTILE: f64 = 0.975;

/// A single row of the input CSV: one day's page-view count.
#[derive(Debug, Clone, Deserialize)]
pub struct PageViewRecord {
    pub date: NaiveDate,
    pub value: f64,
}

/// Reads every row of the input CSV into memory.
///
/// # Errors
///
/// Returns an error if the file is missing, a row fails to deserialize
/// (missing `date`/`value` column, unparsable date or number), or the file
/// contains no data rows.
pub fn read_raw_csv(path: &Path) -> Result<Vec<PageViewRecord>> {
    let file =
        File::open(path).with_context(|| format!("failed to open input CSV {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: PageViewRecord =
            result.with_context(|| format!("malformed row in {}", path.display()))?;
        rows.push(record);
    }

    if rows.is_empty() {
        bail!("input CSV {} contains no data rows", path.display());
    }

    debug!(rows = rows.len(), path = %path.display(), "Raw CSV loaded");
    Ok(rows)
}

/// The cleaned page-view series: raw rows filtered to the percentile band,
/// input order preserved.
#[derive(Debug, Clone)]
pub struct PageViewSeries {
    rows: Vec<PageViewRecord>,
    band: PercentileBand,
    raw_len: usize,
}

impl PageViewSeries {
    /// Filters `raw` to the inclusive [P2.5, P97.5] band of its values.
    ///
    /// The band is computed exactly once, from the unfiltered distribution;
    /// it is never re-derived from the surviving rows.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is empty (the band is undefined).
    pub fn from_records(raw: Vec<PageViewRecord>) -> Result<Self> {
        let values: Vec<f64> = raw.iter().map(|r| r.value).collect();
        let Some(band) = PercentileBand::from_values(&values, LOW_QUANTILE, HIGH_QUANTILE) else {
            bail!("cannot compute percentile band over an empty dataset");
        };

        let raw_len = raw.len();
        let rows: Vec<PageViewRecord> =
            raw.into_iter().filter(|r| band.contains(r.value)).collect();

        Ok(Self {
            rows,
            band,
            raw_len,
        })
    }

    /// Loads and cleans the series from a CSV file in one step.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_records(read_raw_csv(path)?)
    }

    pub fn rows(&self) -> &[PageViewRecord] {
        &self.rows
    }

    pub fn band(&self) -> PercentileBand {
        self.band
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows in the raw table before cleaning.
    pub fn raw_len(&self) -> usize {
        self.raw_len
    }

    /// Rows dropped by the band filter.
    pub fn dropped(&self) -> usize {
        self.raw_len - self.rows.len()
    }

    /// Earliest and latest date present, or `None` if nothing survived
    /// the filter.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        use itertools::Itertools;

        self.rows
            .iter()
            .map(|r| r.date)
            .minmax()
            .into_option()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(name)
    }

    fn record(date: &str, value: f64) -> PageViewRecord {
        PageViewRecord {
            date: date.parse().unwrap(),
            value,
        }
    }

    #[test]
    fn test_read_raw_csv_missing_file() {
        let result = read_raw_csv(Path::new("/nonexistent/pageviews.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_raw_csv_parses_rows() {
        let path = temp_path("pageview_trends_test_read.csv");
        fs::write(&path, "date,value\n2016-05-09,1201\n2016-05-10,2329\n").unwrap();

        let rows = read_raw_csv(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2016-05-09".parse::<NaiveDate>().unwrap());
        assert_eq!(rows[0].value, 1201.0);
        assert_eq!(rows[1].value, 2329.0);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_raw_csv_bad_date_is_error() {
        let path = temp_path("pageview_trends_test_bad_date.csv");
        fs::write(&path, "date,value\nnot-a-date,1201\n").unwrap();

        assert!(read_raw_csv(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_raw_csv_missing_column_is_error() {
        let path = temp_path("pageview_trends_test_no_value.csv");
        fs::write(&path, "date,count\n2016-05-09,1201\n").unwrap();

        assert!(read_raw_csv(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_raw_csv_empty_is_error() {
        let path = temp_path("pageview_trends_test_empty.csv");
        fs::write(&path, "date,value\n").unwrap();

        assert!(read_raw_csv(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_clean_drops_only_out_of_band_rows() {
        // Values 1..=40 over consecutive days: the band is [1.975, 39.025],
        // so exactly the 1.0 and 40.0 rows are dropped.
        let start = "2019-01-01".parse::<NaiveDate>().unwrap();
        let raw: Vec<PageViewRecord> = (0..40)
            .map(|i| PageViewRecord {
                date: start + chrono::Days::new(i),
                value: (i + 1) as f64,
            })
            .collect();

        let series = PageViewSeries::from_records(raw).unwrap();

        assert_eq!(series.raw_len(), 40);
        assert_eq!(series.len(), 38);
        assert_eq!(series.dropped(), 2);
        for row in series.rows() {
            assert!(series.band().contains(row.value));
            assert!(row.value >= 2.0 && row.value <= 39.0);
        }
    }

    #[test]
    fn test_clean_preserves_input_order() {
        // Equal values keep every row inside the band.
        let raw = vec![
            record("2018-03-01", 10.0),
            record("2018-01-01", 10.0),
            record("2018-02-01", 10.0),
        ];

        let series = PageViewSeries::from_records(raw).unwrap();
        let dates: Vec<NaiveDate> = series.rows().iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![
                "2018-03-01".parse().unwrap(),
                "2018-01-01".parse().unwrap(),
                "2018-02-01".parse().unwrap(),
            ]
        );
    }

    #[test]
    fn test_clean_empty_input_is_error() {
        assert!(PageViewSeries::from_records(Vec::new()).is_err());
    }

    #[test]
    fn test_date_range() {
        let raw = vec![
            record("2018-03-01", 10.0),
            record("2018-01-01", 10.0),
            record("2018-02-01", 10.0),
        ];
        let series = PageViewSeries::from_records(raw).unwrap();
        let (first, last) = series.date_range().unwrap();
        assert_eq!(first, "2018-01-01".parse::<NaiveDate>().unwrap());
        assert_eq!(last, "2018-03-01".parse::<NaiveDate>().unwrap());
    }
}
