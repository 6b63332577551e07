//! Tabular data ingestion utilities.
//!
//! This crate loads source data files (CSV and Excel workbooks) into Polars
//! DataFrames with a forgiving top-level contract: `load_table` reports any
//! failure and returns an absent marker instead of propagating errors.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use paradata_ingest::{SheetRef, TableFormat, load_table};
//!
//! let events = load_table(Path::new("data/events.csv"), TableFormat::Csv, None);
//! let standings = load_table(
//!     Path::new("data/games.xlsx"),
//!     TableFormat::Excel,
//!     Some(&SheetRef::Name("medal_standings".to_string())),
//! );
//! ```

mod csv;
mod error;
mod excel;
mod loader;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{read_csv_frame, read_csv_frame_lossy};

// === Excel Reading ===
pub use excel::{SheetRef, frame_from_range, read_excel_frame};

// === Top-Level Loading ===
pub use loader::{TableFormat, load_table};
