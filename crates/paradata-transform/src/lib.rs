//! Table preparation for games event data.
//!
//! Cleans loaded tables in place of hand-edited spreadsheets: column labels
//! are normalized, the `start`/`end` columns become typed dates, the fixed
//! participant/count columns become zero-filled integers, and an optional
//! NPC code lookup table is left-joined on the country name.

mod columns;
mod error;
mod prepare;

// === Error Types ===
pub use error::{PrepareError, Result};

// === Column Normalization ===
pub use columns::{
    has_column, normalize_column_name, normalize_columns, normalize_lookup_columns,
    normalize_lookup_name,
};

// === Preparation Pipeline ===
pub use prepare::{
    DATE_COLUMNS, DATE_FORMAT, JOIN_KEY, LOOKUP_KEY, NUMERIC_COLUMNS, prepare_frame,
};
