//! Human-readable table descriptions.
//!
//! Mirrors the usual first look at a freshly loaded table: shape, head and
//! tail previews, column labels, dtypes, a structural summary, and
//! descriptive statistics. All sections render to plain strings so output
//! can be asserted in tests.

mod describe;
mod values;

pub use describe::{
    describe_frame, print_description, render_column_labels, render_dtypes, render_frame_table,
    render_shape, render_skip_notice, render_statistics, render_structure,
};
pub use values::{any_to_string, format_numeric};
