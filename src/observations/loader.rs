//! CSV loading of observed herd counts
//!
//! Expected layout is a header row containing `Year` and `Actual_Total`;
//! any other columns are ignored. A blank `Actual_Total` marks a year that was
//! listed but not counted.

use super::{ObservationSeries, ObservationSource};
use crate::error::{HerdError, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

const YEAR_COLUMN: &str = "Year";
const TOTAL_COLUMN: &str = "Actual_Total";

/// One row of the observations file
#[derive(Debug, Deserialize)]
struct ObservationRow {
    #[serde(rename = "Year")]
    year: u32,
    /// Blank when the year was listed but not counted
    #[serde(rename = "Actual_Total")]
    total: Option<f64>,
}

/// Load observations from a CSV file
pub fn load_observations<P: AsRef<Path>>(path: P) -> Result<ObservationSeries> {
    let path = path.as_ref();
    log::debug!("Loading observations from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_observations_from_reader(file)
}

/// Load observations from any CSV reader (file, uploaded bytes, etc.)
pub fn load_observations_from_reader<R: Read>(reader: R) -> Result<ObservationSeries> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?;
    for name in [YEAR_COLUMN, TOTAL_COLUMN] {
        if !headers.iter().any(|h| h == name) {
            return Err(HerdError::InvalidData(format!(
                "CSV is missing the '{}' column (expected '{}' and '{}')",
                name, YEAR_COLUMN, TOTAL_COLUMN
            )));
        }
    }

    let mut series = ObservationSeries::new();
    for (row, result) in rdr.deserialize::<ObservationRow>().enumerate() {
        // Header is line 1
        let line = row + 2;
        let record = result.map_err(|e| match e.kind() {
            csv::ErrorKind::Deserialize { .. } => HerdError::InvalidData(format!(
                "line {}: expected a non-negative whole Year and a numeric Actual_Total ({})",
                line, e
            )),
            _ => HerdError::Csv(e),
        })?;

        if series.contains_period(record.year) {
            return Err(HerdError::InvalidData(format!(
                "line {}: Year {} listed more than once",
                line, record.year
            )));
        }

        match record.total {
            None => series.insert_missing(record.year),
            Some(total) if !total.is_finite() => {
                return Err(HerdError::InvalidData(format!(
                    "line {}: Actual_Total must be finite",
                    line
                )));
            }
            Some(total) if total < 0.0 => {
                return Err(HerdError::InvalidData(format!(
                    "line {}: Actual_Total {} is negative",
                    line, total
                )));
            }
            Some(total) => series.insert(record.year, total),
        }
    }

    log::debug!(
        "Loaded {} observed years ({} listed)",
        series.observed_count(),
        series.periods().count()
    );
    Ok(series)
}

/// Observation source backed by a CSV file, read on every request
#[derive(Debug, Clone)]
pub struct CsvObservations {
    path: PathBuf,
}

impl CsvObservations {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl ObservationSource for CsvObservations {
    fn observations(&self) -> Result<ObservationSeries> {
        load_observations(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_with_gaps_and_extra_columns() {
        let data = "Year,Notes,Actual_Total\n0,start,30\n1,no count,\n2,,41.5\n";
        let series = load_observations_from_reader(data.as_bytes()).unwrap();

        assert_eq!(series.get(0), Some(30.0));
        assert_eq!(series.get(1), None);
        assert!(series.contains_period(1));
        assert_eq!(series.get(2), Some(41.5));
        assert_eq!(series.observed_count(), 2);
    }

    #[test]
    fn test_zero_is_an_observation() {
        let series = load_observations_from_reader("Year,Actual_Total\n3,0\n".as_bytes()).unwrap();
        assert_eq!(series.get(3), Some(0.0));
    }

    #[test]
    fn test_missing_column() {
        let err = load_observations_from_reader("Year,Total\n0,10\n".as_bytes()).unwrap_err();
        assert!(matches!(err, HerdError::InvalidData(ref msg) if msg.contains("Actual_Total")));

        let err = load_observations_from_reader("Period,Actual_Total\n0,10\n".as_bytes()).unwrap_err();
        assert!(matches!(err, HerdError::InvalidData(ref msg) if msg.contains("missing the 'Year'")));
    }

    #[test]
    fn test_bad_row_reports_line() {
        let data = "Year,Actual_Total\n0,10\n1,12\n2,-3\n";
        let err = load_observations_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, HerdError::InvalidData(ref msg) if msg.starts_with("line 4")));
    }

    #[test]
    fn test_bad_rows() {
        for data in [
            "Year,Actual_Total\n-1,10\n",
            "Year,Actual_Total\n1.5,10\n",
            "Year,Actual_Total\n1,ten\n",
            "Year,Actual_Total\n1,inf\n",
            "Year,Actual_Total\n1,-5\n",
            "Year,Actual_Total\n,10\n",
            "Year,Actual_Total\n1,10\n1,12\n",
        ] {
            let err = load_observations_from_reader(data.as_bytes()).unwrap_err();
            assert!(matches!(err, HerdError::InvalidData(_)), "{}", data);
        }
    }

    #[test]
    fn test_csv_source_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Year,Actual_Total").unwrap();
        writeln!(file, "0,10").unwrap();
        writeln!(file, "2,20").unwrap();

        let source = CsvObservations::new(file.path());
        let series = source.observations().unwrap();
        assert_eq!(series.periods().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_missing_file() {
        let err = load_observations("/nonexistent/actuals.csv").unwrap_err();
        assert!(matches!(err, HerdError::Io(_)));
    }
}
