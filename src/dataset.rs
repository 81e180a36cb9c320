//! Loading and column access for delimited tables with mixed column types.
//!
//! Categorical attributes stay as strings until a fitted encoder maps them to
//! indicator columns, so the table keeps every cell in its raw form and hands
//! out typed views on demand.

use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use ndarray::Array1;

use crate::error::{DataLoadError, TransformError};

/// Markers treated as missing, in addition to the empty cell.
const MISSING_MARKERS: &[&str] = &["NA", "N/A", "nan", "NaN", "null"];

/// Whether a raw cell counts as a missing value.
pub fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || MISSING_MARKERS.contains(&cell)
}

/// A table of named columns read from a delimited file with a header row.
///
/// All rows have exactly one cell per header; both the CSV reader and
/// [`Table::new`] reject ragged input before a `Table` is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table from parts, rejecting rows that do not have exactly
    /// one cell per header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, DataLoadError> {
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != headers.len() {
                return Err(DataLoadError::RaggedRow {
                    row,
                    expected: headers.len(),
                    found: cells.len(),
                });
            }
        }
        Ok(Self { headers, rows })
    }

    /// Reads a comma-delimited table with a header row.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DataLoadError::Open {
            path: path.to_owned(),
            source,
        })?;
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
        let headers = reader
            .headers()
            .map_err(|source| DataLoadError::Csv {
                path: path.to_owned(),
                source,
            })?
            .iter()
            .map(str::to_owned)
            .collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| DataLoadError::Csv {
                path: path.to_owned(),
                source,
            })?;
            rows.push(record.iter().map(str::to_owned).collect());
        }
        if rows.is_empty() {
            return Err(DataLoadError::EmptyTable {
                path: path.to_owned(),
            });
        }
        Ok(Self { headers, rows })
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Raw cells of a named column, in row order.
    pub fn raw_column(&self, name: &str) -> Result<Vec<&str>, TransformError> {
        let index = self
            .column_index(name)
            .ok_or_else(|| TransformError::MissingColumn(name.to_owned()))?;
        Ok(self.rows.iter().map(|cells| cells[index].as_str()).collect())
    }

    /// Numeric view of a named column; missing cells become NaN.
    pub fn numeric_column(&self, name: &str) -> Result<Array1<f64>, TransformError> {
        let index = self
            .column_index(name)
            .ok_or_else(|| TransformError::MissingColumn(name.to_owned()))?;
        let mut values = Vec::with_capacity(self.rows.len());
        for (row, cells) in self.rows.iter().enumerate() {
            let cell = cells[index].as_str();
            if is_missing(cell) {
                values.push(f64::NAN);
            } else {
                let value =
                    cell.trim()
                        .parse::<f64>()
                        .map_err(|_| TransformError::NonNumericValue {
                            column: name.to_owned(),
                            value: cell.to_owned(),
                            row,
                        })?;
                values.push(value);
            }
        }
        Ok(Array1::from(values))
    }

    /// Removes the target column, returning the remaining feature table and
    /// the target vector. Missing target cells become NaN, like any other
    /// numeric column.
    pub fn split_target(mut self, target: &str) -> Result<(Table, Array1<f64>), DataLoadError> {
        let index = self
            .column_index(target)
            .ok_or_else(|| DataLoadError::MissingTargetColumn(target.to_owned()))?;
        let mut values = Vec::with_capacity(self.rows.len());
        for (row, cells) in self.rows.iter_mut().enumerate() {
            let cell = cells.remove(index);
            if is_missing(&cell) {
                values.push(f64::NAN);
            } else {
                let value =
                    cell.trim()
                        .parse::<f64>()
                        .map_err(|_| DataLoadError::NonNumericTarget {
                            column: target.to_owned(),
                            value: cell.clone(),
                            row,
                        })?;
                values.push(value);
            }
        }
        self.headers.remove(index);
        Ok((self, Array1::from(values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use std::io::Write;

    fn sample() -> Table {
        Table::new(
            vec!["lunch".to_string(), "reading_score".to_string(), "math_score".to_string()],
            vec![
                vec!["standard".to_string(), "72".to_string(), "66".to_string()],
                vec!["free/reduced".to_string(), "NA".to_string(), "41".to_string()],
                vec!["standard".to_string(), "90".to_string(), "88".to_string()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn numeric_column_maps_missing_to_nan() {
        let table = sample();
        let scores = table.numeric_column("reading_score").unwrap();
        assert_abs_diff_eq!(scores[0], 72.);
        assert!(scores[1].is_nan());
        assert_abs_diff_eq!(scores[2], 90.);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let table = sample();
        let err = table.numeric_column("writing_score").unwrap_err();
        assert!(matches!(err, TransformError::MissingColumn(name) if name == "writing_score"));
    }

    #[test]
    fn non_numeric_cell_is_rejected() {
        let table = Table::new(
            vec!["reading_score".to_string()],
            vec![vec!["seventy".to_string()]],
        )
        .unwrap();
        let err = table.numeric_column("reading_score").unwrap_err();
        assert!(matches!(err, TransformError::NonNumericValue { row: 0, .. }));
    }

    #[test]
    fn split_target_removes_the_column() {
        let (features, target) = sample().split_target("math_score").unwrap();
        assert_eq!(features.headers(), &["lunch".to_string(), "reading_score".to_string()]);
        assert_abs_diff_eq!(target, array![66., 41., 88.]);
        assert!(features.raw_column("math_score").is_err());
    }

    #[test]
    fn split_target_fails_when_target_is_absent() {
        let (features, _) = sample().split_target("math_score").unwrap();
        let err = features.split_target("math_score").unwrap_err();
        assert!(matches!(err, DataLoadError::MissingTargetColumn(name) if name == "math_score"));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Table::new(
            vec!["lunch".to_string(), "reading_score".to_string()],
            vec![vec!["standard".to_string()]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::RaggedRow {
                row: 0,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn from_csv_reads_headers_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "lunch,reading_score,math_score").unwrap();
        writeln!(file, "standard,72,66").unwrap();
        writeln!(file, "free/reduced,,41").unwrap();
        drop(file);

        let table = Table::from_csv(&path).unwrap();
        assert_eq!(table.nrows(), 2);
        assert!(table.numeric_column("reading_score").unwrap()[1].is_nan());
    }

    #[test]
    fn from_csv_rejects_missing_file() {
        let err = Table::from_csv("no/such/table.csv").unwrap_err();
        assert!(matches!(err, DataLoadError::Open { .. }));
    }

    #[test]
    fn from_csv_rejects_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "lunch,reading_score,math_score\n").unwrap();
        let err = Table::from_csv(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::EmptyTable { .. }));
    }
}
