//! CSV fixing file adapter.

use crate::domain::error::ObjregError;
use crate::ports::fixing_port::FixingSource;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// Loads fixing series from `date,value` CSV files with a header row.
pub struct CsvFixingAdapter;

impl CsvFixingAdapter {
    pub fn new() -> Self {
        CsvFixingAdapter
    }
}

impl Default for CsvFixingAdapter {
    fn default() -> Self {
        CsvFixingAdapter::new()
    }
}

impl FixingSource for CsvFixingAdapter {
    fn load(&self, path: &Path) -> Result<Vec<(NaiveDate, f64)>, ObjregError> {
        let content = fs::read_to_string(path).map_err(|e| ObjregError::FixingData {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut series = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| ObjregError::FixingData {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = record.get(0).ok_or_else(|| ObjregError::FixingData {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                ObjregError::FixingData {
                    reason: format!("invalid date '{}': {}", date_str, e),
                }
            })?;

            let value: f64 = record
                .get(1)
                .ok_or_else(|| ObjregError::FixingData {
                    reason: format!("missing value column for {}", date),
                })?
                .parse()
                .map_err(|e| ObjregError::FixingData {
                    reason: format!("invalid fixing value for {}: {}", date, e),
                })?;

            series.push((date, value));
        }

        series.sort_by_key(|(date, _)| *date);
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn setup_fixing_file(content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("euribor.csv");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn load_returns_rows_sorted_by_date() {
        let (_dir, path) = setup_fixing_file(
            "date,value\n\
            2024-03-04,0.032\n\
            2024-03-01,0.031\n\
            2024-03-05,0.033\n",
        );
        let series = CsvFixingAdapter::new().load(&path).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].0, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!((series[0].1 - 0.031).abs() < f64::EPSILON);
        assert_eq!(series[2].0, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn load_header_only_file_is_empty() {
        let (_dir, path) = setup_fixing_file("date,value\n");
        let series = CsvFixingAdapter::new().load(&path).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn load_missing_file_fails_with_path_in_message() {
        let err = CsvFixingAdapter::new()
            .load(Path::new("/nonexistent/euribor.csv"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/euribor.csv"));
    }

    #[test]
    fn load_rejects_bad_date() {
        let (_dir, path) = setup_fixing_file("date,value\n03/01/2024,0.031\n");
        let err = CsvFixingAdapter::new().load(&path).unwrap_err();
        assert!(err.to_string().contains("invalid date"));
    }

    #[test]
    fn load_rejects_non_numeric_value() {
        let (_dir, path) = setup_fixing_file("date,value\n2024-03-01,three percent\n");
        let err = CsvFixingAdapter::new().load(&path).unwrap_err();
        assert!(err.to_string().contains("invalid fixing value"));
    }

    #[test]
    fn load_rejects_missing_value_column() {
        let (_dir, path) = setup_fixing_file("date\n2024-03-01\n");
        let err = CsvFixingAdapter::new().load(&path).unwrap_err();
        assert!(err.to_string().contains("missing value column"));
    }
}
