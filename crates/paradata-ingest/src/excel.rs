//! Excel workbook reading via calamine.
//!
//! Worksheets are flattened into Polars DataFrames: the first row supplies
//! column names and every following row becomes a record. Columns whose
//! non-empty cells are all numeric become `Int64`/`Float64`, everything else
//! becomes `String`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use calamine::{Data, DataType as _, Range, Reader, Xlsx, open_workbook};
use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Selects a worksheet by position or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetRef {
    Index(usize),
    Name(String),
}

impl Default for SheetRef {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl FromStr for SheetRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(s.parse::<usize>()
            .map(Self::Index)
            .unwrap_or_else(|_| Self::Name(s.to_string())))
    }
}

impl fmt::Display for SheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(idx) => write!(f, "#{idx}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Reads one worksheet of an Xlsx workbook into a DataFrame.
pub fn read_excel_frame(path: &Path, sheet: &SheetRef) -> Result<DataFrame> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e: calamine::XlsxError| IngestError::ExcelOpen {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let range = match sheet {
        SheetRef::Index(idx) => workbook
            .worksheet_range_at(*idx)
            .ok_or_else(|| IngestError::SheetNotFound {
                path: path.to_path_buf(),
                sheet: sheet.to_string(),
            })?
            .map_err(|e| IngestError::ExcelOpen {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?,
        SheetRef::Name(name) => {
            workbook
                .worksheet_range(name)
                .map_err(|_| IngestError::SheetNotFound {
                    path: path.to_path_buf(),
                    sheet: sheet.to_string(),
                })?
        }
    };

    if range.is_empty() {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    }
    frame_from_range(&range)
}

/// Converts a worksheet cell range into a DataFrame.
///
/// The first row is the header row; blank header cells get positional
/// fallback names (`column_3` for the third column).
pub fn frame_from_range(range: &Range<Data>) -> Result<DataFrame> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(IngestError::DataFrame {
            message: "worksheet range has no rows".to_string(),
        });
    };

    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let label = cell
                .as_string()
                .map(|s| s.trim().to_string())
                .unwrap_or_default();
            if label.is_empty() {
                format!("column_{}", idx + 1)
            } else {
                label
            }
        })
        .collect();

    let data_rows: Vec<&[Data]> = rows.collect();
    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| build_column(header, idx, &data_rows))
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn build_column(name: &str, idx: usize, rows: &[&[Data]]) -> Column {
    let empty = Data::Empty;
    let cells: Vec<&Data> = rows
        .iter()
        .map(|row| row.get(idx).unwrap_or(&empty))
        .collect();

    let numeric = cells
        .iter()
        .all(|cell| matches!(cell, Data::Empty | Data::Int(_) | Data::Float(_)));
    if numeric {
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|cell| match cell {
                Data::Int(v) => Some(*v as f64),
                Data::Float(v) => Some(*v),
                _ => None,
            })
            .collect();
        let has_values = values.iter().any(Option::is_some);
        let integral = values.iter().flatten().all(|v| v.fract() == 0.0);
        if has_values && integral {
            let ints: Vec<Option<i64>> = values.iter().map(|v| v.map(|f| f as i64)).collect();
            return Series::new(name.into(), ints).into_column();
        }
        return Series::new(name.into(), values).into_column();
    }

    let values: Vec<Option<String>> = cells
        .iter()
        .map(|cell| match cell {
            Data::Empty => None,
            other => Some(other.to_string()),
        })
        .collect();
    Series::new(name.into(), values).into_column()
}
