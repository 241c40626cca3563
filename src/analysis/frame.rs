//! Sales dataset fed to the market analyzer.

use super::AnalysisError;
use crate::data::SalesRecord;
use ndarray::{Array1, Array2};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column names in positional order; the last one is the target
pub const COLUMNS: [&str; 4] = [
    "market_trends",
    "competitor_activities",
    "industry_developments",
    "sales",
];

/// Optional label column in CSV input
pub const DATE_COLUMN: &str = "date";

/// Number of feature columns
pub const N_FEATURES: usize = COLUMNS.len() - 1;

/// Non-empty table of sales records, optionally labelled by date
#[derive(Debug, Clone, PartialEq)]
pub struct SalesFrame {
    records: Vec<SalesRecord>,
    dates: Option<Vec<String>>,
}

fn parse_cell(row: usize, column: &str, cell: &str) -> Result<f64, AnalysisError> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AnalysisError::NonNumeric {
            row,
            column: column.to_string(),
            value: cell.to_string(),
        })
}

impl SalesFrame {
    /// Frame from typed records; every value must be finite
    pub fn from_records(records: Vec<SalesRecord>) -> Result<Self, AnalysisError> {
        if records.is_empty() {
            return Err(AnalysisError::EmptyFrame);
        }

        for (row, record) in records.iter().enumerate() {
            let [trends, competitors, developments] = record.features();
            let values = [trends, competitors, developments, record.sales];
            if let Some((column, value)) = COLUMNS
                .iter()
                .zip(values)
                .find(|(_, value)| !value.is_finite())
            {
                return Err(AnalysisError::NonNumeric {
                    row,
                    column: column.to_string(),
                    value: value.to_string(),
                });
            }
        }

        Ok(Self {
            records,
            dates: None,
        })
    }

    /// Attach one date label per record
    pub fn with_dates(mut self, dates: Vec<String>) -> Result<Self, AnalysisError> {
        if dates.len() != self.records.len() {
            return Err(AnalysisError::SchemaMismatch {
                expected: self.records.len(),
                found: dates.len(),
            });
        }
        self.dates = Some(dates);
        Ok(self)
    }

    /// Frame from untyped rows in [`COLUMNS`] order.
    ///
    /// Every row must have exactly four cells, each a finite number.
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self, AnalysisError> {
        let mut records = Vec::with_capacity(rows.len());

        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != COLUMNS.len() {
                return Err(AnalysisError::SchemaMismatch {
                    expected: COLUMNS.len(),
                    found: cells.len(),
                });
            }

            let mut values = [0.0; 4];
            for ((value, column), cell) in values.iter_mut().zip(COLUMNS).zip(cells) {
                *value = parse_cell(row, column, cell.as_ref())?;
            }
            records.push(SalesRecord::new(values[0], values[1], values[2], values[3]));
        }

        Self::from_records(records)
    }

    /// Load a CSV file with a header naming the four columns and,
    /// optionally, a `date` column. Column order is free.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, AnalysisError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers = rdr.headers()?.clone();
        let index_of = |name: &str| headers.iter().position(|h| h.trim() == name);

        let mut indices = [0usize; 4];
        for (slot, column) in indices.iter_mut().zip(COLUMNS) {
            *slot = index_of(column).ok_or_else(|| AnalysisError::MissingColumn {
                column: column.to_string(),
            })?;
        }
        let date_index = index_of(DATE_COLUMN);

        let mut records = Vec::new();
        let mut dates = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result?;

            let mut values = [0.0; 4];
            for ((value, &index), column) in values.iter_mut().zip(&indices).zip(COLUMNS) {
                *value = parse_cell(row, column, record.get(index).unwrap_or_default())?;
            }
            records.push(SalesRecord::new(values[0], values[1], values[2], values[3]));

            if let Some(index) = date_index {
                dates.push(record.get(index).unwrap_or_default().trim().to_string());
            }
        }

        tracing::debug!(rows = records.len(), dated = date_index.is_some(), "Loaded sales CSV");

        let frame = Self::from_records(records)?;
        match date_index {
            Some(_) => frame.with_dates(dates),
            None => Ok(frame),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn dates(&self) -> Option<&[String]> {
        self.dates.as_deref()
    }

    /// Row labels for reporting: the dates, or 1-based row numbers
    pub fn labels(&self) -> Vec<String> {
        match &self.dates {
            Some(dates) => dates.clone(),
            None => (1..=self.records.len()).map(|i| i.to_string()).collect(),
        }
    }

    /// Feature matrix (n_rows x 3)
    pub fn features(&self) -> Array2<f64> {
        let mut x = Array2::zeros((self.records.len(), N_FEATURES));
        for (mut row, record) in x.rows_mut().into_iter().zip(&self.records) {
            for (cell, value) in row.iter_mut().zip(record.features()) {
                *cell = value;
            }
        }
        x
    }

    /// Target vector
    pub fn target(&self) -> Array1<f64> {
        self.records.iter().map(|r| r.sales).collect()
    }
}
