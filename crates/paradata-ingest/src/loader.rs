//! Top-level table loading with catch-and-report semantics.
//!
//! `load_table` never propagates an error: missing files, empty content, and
//! parse failures are reported through `tracing` and collapse to `None`, so
//! the caller always holds either a valid frame or an explicit absent marker.

use std::path::Path;

use polars::prelude::DataFrame;
use tracing::{debug, error};

use crate::csv::read_csv_frame;
use crate::excel::{SheetRef, read_excel_frame};

/// Supported source table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Excel,
}

/// Loads a table from disk, converting every failure into `None`.
///
/// `sheet` is only consulted for Excel sources and defaults to the first
/// worksheet.
pub fn load_table(path: &Path, format: TableFormat, sheet: Option<&SheetRef>) -> Option<DataFrame> {
    if !path.exists() {
        error!(path = %path.display(), "file not found, check the file path");
        return None;
    }

    let result = match format {
        TableFormat::Csv => read_csv_frame(path),
        TableFormat::Excel => {
            let first_sheet = SheetRef::default();
            read_excel_frame(path, sheet.unwrap_or(&first_sheet))
        }
    };

    match result {
        Ok(df) => {
            debug!(
                path = %path.display(),
                rows = df.height(),
                columns = df.width(),
                "loaded table"
            );
            Some(df)
        }
        Err(error) => {
            error!(path = %path.display(), %error, "failed to read table");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_table_missing_path_is_absent() {
        let result = load_table(Path::new("/nonexistent/events.csv"), TableFormat::Csv, None);
        assert!(result.is_none());
    }

    #[test]
    fn test_load_table_empty_file_is_absent() {
        let file = NamedTempFile::new().unwrap();
        let result = load_table(file.path(), TableFormat::Csv, None);
        assert!(result.is_none());
    }

    #[test]
    fn test_load_table_reads_csv() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Start,End,Countries\n1,2,3\n4,5,6\n7,8,9\n").unwrap();

        let df = load_table(file.path(), TableFormat::Csv, None).unwrap();
        assert_eq!(df.width(), 3);
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn test_load_table_bad_excel_is_absent() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not a zip archive").unwrap();

        let result = load_table(file.path(), TableFormat::Excel, None);
        assert!(result.is_none());
    }
}
