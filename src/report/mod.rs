//! # Reporting
//!
//! Renders predicted sales as a text line chart and, optionally, writes
//! the plotted points to CSV.

use crate::data::SalesPoint;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

pub const TITLE: &str = "Sales Trend";
pub const X_LABEL: &str = "Date";
pub const Y_LABEL: &str = "Sales";

const POINT: char = '*';
const SEGMENT: char = '.';

/// Reporting errors
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No data points to report")]
    Empty,

    #[error("Point {index} ({date}) has non-finite sales value {value}")]
    NonFinite {
        index: usize,
        date: String,
        value: f64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Fixed-size text line chart of sales over time
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    width: usize,
    height: usize,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(60, 15)
    }
}

impl ReportGenerator {
    /// Chart with a plot area of `width` columns by `height` rows
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(2),
            height: height.max(2),
        }
    }

    fn validate(points: &[SalesPoint]) -> Result<(), ReportError> {
        if points.is_empty() {
            return Err(ReportError::Empty);
        }
        if let Some((index, point)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !p.sales.is_finite())
        {
            return Err(ReportError::NonFinite {
                index,
                date: point.date.clone(),
                value: point.sales,
            });
        }
        Ok(())
    }

    fn column(&self, index: usize, n: usize) -> usize {
        if n == 1 {
            return self.width / 2;
        }
        ((index as f64) * (self.width - 1) as f64 / (n - 1) as f64).round() as usize
    }

    fn row(&self, value: f64, min: f64, max: f64) -> usize {
        let range = max - min;
        if range.abs() < 1e-10 {
            return self.height / 2;
        }
        let normalized = (max - value) / range;
        ((normalized * (self.height - 1) as f64).round() as usize).min(self.height - 1)
    }

    /// Render the chart to a string
    pub fn render(&self, points: &[SalesPoint]) -> Result<String, ReportError> {
        Self::validate(points)?;

        let n = points.len();
        let max = points.iter().fold(f64::NEG_INFINITY, |a, p| a.max(p.sales));
        let min = points.iter().fold(f64::INFINITY, |a, p| a.min(p.sales));

        let mut grid = vec![vec![' '; self.width]; self.height];

        // Interpolated segments first so that points overwrite them
        for (i, pair) in points.windows(2).enumerate() {
            let (c0, c1) = (self.column(i, n), self.column(i + 1, n));
            for c in (c0 + 1)..c1 {
                let t = (c - c0) as f64 / (c1 - c0) as f64;
                let value = pair[0].sales + t * (pair[1].sales - pair[0].sales);
                grid[self.row(value, min, max)][c] = SEGMENT;
            }
        }
        for (i, point) in points.iter().enumerate() {
            grid[self.row(point.sales, min, max)][self.column(i, n)] = POINT;
        }

        let max_label = format!("{:.2}", max);
        let min_label = format!("{:.2}", min);
        let axis_width = max_label.len().max(min_label.len());

        let mut out = String::new();
        out.push_str(&format!("{}\n{}\n", TITLE, "=".repeat(TITLE.len())));
        out.push_str(&format!("{:>w$}\n", Y_LABEL, w = axis_width));

        for (r, line) in grid.iter().enumerate() {
            let label = if r == 0 {
                max_label.as_str()
            } else if r == self.height - 1 {
                min_label.as_str()
            } else {
                ""
            };
            let line: String = line.iter().collect();
            out.push_str(&format!("{:>w$} |{}\n", label, line.trim_end(), w = axis_width));
        }
        out.push_str(&format!("{:>w$} +{}\n", "", "-".repeat(self.width), w = axis_width));

        let first = &points[0].date;
        let last = &points[n - 1].date;
        let dates = if n == 1 {
            first.clone()
        } else {
            let gap = self.width.saturating_sub(first.len() + last.len()).max(1);
            format!("{}{}{}", first, " ".repeat(gap), last)
        };
        out.push_str(&format!("{:>w$}  {}\n", "", dates, w = axis_width));
        out.push_str(&format!("{:>w$}  {:^cw$}\n", "", X_LABEL, w = axis_width, cw = self.width));

        Ok(out)
    }

    /// Render the chart once into `sink`
    pub fn generate_reports<W: Write>(
        &self,
        points: &[SalesPoint],
        sink: &mut W,
    ) -> Result<(), ReportError> {
        let chart = self.render(points)?;
        sink.write_all(chart.as_bytes())?;
        sink.flush()?;

        tracing::info!(points = points.len(), "Sales report rendered");
        Ok(())
    }

    /// Write the points as `date,sales` CSV
    pub fn write_csv(
        &self,
        points: &[SalesPoint],
        path: impl AsRef<Path>,
    ) -> Result<(), ReportError> {
        Self::validate(points)?;

        let mut writer = csv::Writer::from_path(path.as_ref())?;
        for point in points {
            writer.serialize(point)?;
        }
        writer.flush()?;

        tracing::info!(
            path = %path.as_ref().display(),
            points = points.len(),
            "Report CSV written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<SalesPoint> {
        vec![
            SalesPoint::new("2024-01", 10.0),
            SalesPoint::new("2024-02", 30.0),
            SalesPoint::new("2024-03", 20.0),
        ]
    }

    #[test]
    fn test_render_has_title_and_labels() {
        let chart = ReportGenerator::default().render(&points()).unwrap();

        assert!(chart.starts_with("Sales Trend\n"));
        assert!(chart.contains("Sales\n"));
        assert!(chart.contains("Date"));
        assert!(chart.contains("2024-01"));
        assert!(chart.contains("2024-03"));
        assert!(chart.contains("30.00"));
        assert!(chart.contains("10.00"));
    }

    #[test]
    fn test_one_marker_per_point() {
        let chart = ReportGenerator::default().render(&points()).unwrap();
        assert_eq!(chart.matches(POINT).count(), 3);
    }

    #[test]
    fn test_highest_point_on_top_row() {
        let chart = ReportGenerator::new(21, 5).render(&points()).unwrap();
        let top = chart.lines().nth(3).unwrap();
        assert!(top.starts_with("30.00 |"));
        assert_eq!(top.find(POINT), Some("30.00 |".len() + 10));
    }

    #[test]
    fn test_single_point() {
        let chart = ReportGenerator::default()
            .render(&[SalesPoint::new("1", 5.0)])
            .unwrap();
        assert_eq!(chart.matches(POINT).count(), 1);
    }

    #[test]
    fn test_empty_input_fails() {
        let mut sink = Vec::new();
        assert!(matches!(
            ReportGenerator::default().generate_reports(&[], &mut sink),
            Err(ReportError::Empty)
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_non_finite_fails() {
        let points = vec![SalesPoint::new("1", 1.0), SalesPoint::new("2", f64::NAN)];
        match ReportGenerator::default().render(&points) {
            Err(ReportError::NonFinite { index, date, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(date, "2");
            }
            other => panic!("expected NonFinite, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_writes_to_sink() {
        let mut sink = Vec::new();
        ReportGenerator::default()
            .generate_reports(&points(), &mut sink)
            .unwrap();
        let text = String::from_utf8(sink).unwrap();
        assert!(text.contains("Sales Trend"));
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        ReportGenerator::default().write_csv(&points(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "date,sales\n2024-01,10.0\n2024-02,30.0\n2024-03,20.0\n");
    }
}
