//! Local CSV files as a price source.
//!
//! Expected layout: a header row `date,close`, then one row per trading
//! day with an ISO `YYYY-MM-DD` date. Rows may appear in any order;
//! duplicate dates keep the first occurrence.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use vol_core::series::{PricePoint, PriceSeries};
use vol_core::types::Date;

use crate::error::{FeedError, Result};
use crate::source::{DateRange, EodSource};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: Date,
    close: f64,
}

/// Price source backed by a `date,close` CSV file.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    /// Creates a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and sorts every row in the file.
    pub fn read_all(&self) -> Result<Vec<PricePoint>> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut points = Vec::new();
        for row in reader.deserialize() {
            let row: CsvRow = row?;
            points.push(PricePoint::new(row.date, row.close));
        }
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        Ok(points)
    }
}

#[async_trait]
impl EodSource for CsvFileSource {
    fn name(&self) -> &'static str {
        "csv"
    }

    async fn eod_closes(&self, symbol: &str, range: DateRange) -> Result<PriceSeries> {
        tracing::debug!(symbol, path = %self.path.display(), %range, "reading csv closes");
        let points: Vec<PricePoint> = self
            .read_all()?
            .into_iter()
            .filter(|p| range.contains(p.date))
            .collect();
        if points.is_empty() {
            return Err(FeedError::EmptyData {
                symbol: symbol.to_string(),
            });
        }
        Ok(PriceSeries::new(points)?)
    }
}
