//! CSV reading into Polars DataFrames.

use std::io::Cursor;
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Reads a CSV file into a DataFrame.
///
/// The first row supplies column names; column dtypes are inferred from the
/// first 100 records.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.width() == 0 {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    }
    Ok(df)
}

/// Reads a CSV file whose bytes may not be valid UTF-8, keeping only the
/// requested columns.
///
/// Undecodable byte sequences are dropped rather than treated as an error,
/// matching the behavior of reference code lists exported with mixed
/// encodings.
pub fn read_csv_frame_lossy(path: &Path, columns: &[&str]) -> Result<DataFrame> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let (decoded, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    let text = if had_errors {
        // decode() substitutes U+FFFD; strip it so bad bytes vanish entirely.
        decoded.replace('\u{FFFD}', "")
    } else {
        decoded.into_owned()
    };

    if text.trim().is_empty() {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    for column in columns {
        if !df.get_column_names().iter().any(|name| name == column) {
            return Err(IngestError::MissingColumn {
                column: (*column).to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(df.select(columns.iter().copied())?)
}
