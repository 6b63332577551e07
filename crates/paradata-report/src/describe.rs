//! Table description rendering.
//!
//! Every section is built as a `String` by a pure render function;
//! `print_description` stitches them together on stdout. An absent table
//! prints exactly one skip line.

use std::collections::HashMap;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use polars::prelude::*;

use crate::values::{any_to_string, format_numeric};

/// Number of rows shown in the head/tail previews.
const PREVIEW_ROWS: usize = 5;

/// Prints the full description of a table, or a single skip line when the
/// table is absent.
pub fn print_description(frame: Option<&DataFrame>, title: &str) {
    match frame {
        Some(df) => {
            println!("=== {title} ===");
            println!("{}", describe_frame(df));
        }
        None => println!("{}", render_skip_notice(title)),
    }
}

/// One-line notice for an absent table.
pub fn render_skip_notice(title: &str) -> String {
    format!("{title}: table is absent; skipping description")
}

/// Renders the complete description: shape, head, tail, column labels,
/// dtypes, structural summary, and descriptive statistics, in that order.
pub fn describe_frame(df: &DataFrame) -> String {
    let mut out = String::new();
    out.push_str(&render_shape(df));
    out.push('\n');
    out.push_str(&format!(
        "\nFirst {PREVIEW_ROWS} rows:\n{}\n",
        render_frame_table(&df.head(Some(PREVIEW_ROWS)))
    ));
    out.push_str(&format!(
        "\nLast {PREVIEW_ROWS} rows:\n{}\n",
        render_frame_table(&df.tail(Some(PREVIEW_ROWS)))
    ));
    out.push_str(&format!("\n{}\n", render_column_labels(df)));
    out.push_str(&format!("\nData types:\n{}\n", render_dtypes(df)));
    out.push_str(&format!("\nSummary:\n{}\n", render_structure(df)));
    out.push_str(&format!(
        "\nDescriptive statistics:\n{}\n",
        render_statistics(df)
    ));
    out
}

/// Row/column count line.
pub fn render_shape(df: &DataFrame) -> String {
    format!("Shape: {} rows x {} columns", df.height(), df.width())
}

/// Column labels on a single line.
pub fn render_column_labels(df: &DataFrame) -> String {
    let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
    format!("Columns ({}): {}", df.width(), names.join(", "))
}

/// Renders every row of `df` as a bordered table.
pub fn render_frame_table(df: &DataFrame) -> String {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(df.get_column_names().iter().map(|n| n.to_string()));
    let columns = df.get_columns();
    for row in 0..df.height() {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| {
                column
                    .as_materialized_series()
                    .get(row)
                    .map(|value| any_to_string(&value))
                    .unwrap_or_default()
            })
            .collect();
        table.add_row(cells);
    }
    table.to_string()
}

/// Per-column dtype listing.
pub fn render_dtypes(df: &DataFrame) -> String {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(["Column", "Dtype"]);
    for column in df.get_columns() {
        table.add_row([column.name().to_string(), column.dtype().to_string()]);
    }
    table.to_string()
}

/// Structural summary: per-column non-null and null counts.
pub fn render_structure(df: &DataFrame) -> String {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(["Column", "Dtype", "Non-Null", "Null"]);
    for column in df.get_columns() {
        let series = column.as_materialized_series();
        let nulls = series.null_count();
        table.add_row([
            series.name().to_string(),
            series.dtype().to_string(),
            (series.len() - nulls).to_string(),
            nulls.to_string(),
        ]);
    }
    table.to_string()
}

/// Descriptive statistics, one row per column.
///
/// Numeric columns get count/mean/std/min/max; every other column gets
/// count/unique/top/freq over its rendered values. Inapplicable cells hold
/// `-`.
pub fn render_statistics(df: &DataFrame) -> String {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header([
        "Column", "Dtype", "Count", "Mean", "Std", "Min", "Max", "Unique", "Top", "Freq",
    ]);
    for column in df.get_columns() {
        let series = column.as_materialized_series();
        let dtype = series.dtype();
        let count = series.len() - series.null_count();
        let mut row = vec![series.name().to_string(), dtype.to_string(), count.to_string()];
        if is_numeric_dtype(dtype) {
            row.push(render_stat(series.mean()));
            row.push(render_stat(series.std(1)));
            row.push(render_extreme(series.min::<f64>()));
            row.push(render_extreme(series.max::<f64>()));
            for _ in 0..3 {
                row.push("-".to_string());
            }
        } else {
            for _ in 0..4 {
                row.push("-".to_string());
            }
            let (unique, top, freq) = frequency_stats(series);
            row.push(unique.to_string());
            row.push(top);
            row.push(freq.to_string());
        }
        table.add_row(row);
    }
    table.to_string()
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

fn render_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_numeric)
}

fn render_extreme(value: PolarsResult<Option<f64>>) -> String {
    match value {
        Ok(Some(v)) => format_numeric(v),
        _ => "-".to_string(),
    }
}

/// Unique-value count, most frequent value, and its frequency, over the
/// rendered non-null values of a column. Ties break toward the smaller
/// value so output stays deterministic.
fn frequency_stats(series: &Series) -> (usize, String, usize) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for idx in 0..series.len() {
        if let Ok(value) = series.get(idx) {
            let rendered = any_to_string(&value);
            if !rendered.is_empty() {
                *counts.entry(rendered).or_insert(0) += 1;
            }
        }
    }
    let unique = counts.len();
    let top = counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)));
    match top {
        Some((value, freq)) => (unique, value.clone(), *freq),
        None => (unique, "-".to_string(), 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df!(
            "type" => ["summer", "winter", "summer"],
            "events" => [Some(16i64), None, Some(22)]
        )
        .unwrap()
    }

    #[test]
    fn test_skip_notice_is_one_line() {
        let notice = render_skip_notice("events");
        assert!(!notice.contains('\n'));
        assert!(notice.contains("skipping"));
    }

    #[test]
    fn test_render_shape() {
        assert_eq!(render_shape(&sample_frame()), "Shape: 3 rows x 2 columns");
    }

    #[test]
    fn test_render_column_labels() {
        assert_eq!(
            render_column_labels(&sample_frame()),
            "Columns (2): type, events"
        );
    }

    #[test]
    fn test_render_structure_counts_nulls() {
        let rendered = render_structure(&sample_frame());
        assert!(rendered.contains("events"));
        assert!(rendered.contains("i64"));
    }

    #[test]
    fn test_statistics_numeric_and_frequency() {
        let rendered = render_statistics(&sample_frame());
        // mean of 16 and 22
        assert!(rendered.contains("19"));
        // top of the type column with freq 2
        assert!(rendered.contains("summer"));
    }

    #[test]
    fn test_frequency_stats_ignores_nulls() {
        let series = Series::new(
            "country".into(),
            [Some("France"), Some("France"), Some("Japan"), None],
        );
        let (unique, top, freq) = frequency_stats(&series);
        assert_eq!(unique, 2);
        assert_eq!(top, "France");
        assert_eq!(freq, 2);
    }

    #[test]
    fn test_describe_frame_section_order() {
        let rendered = describe_frame(&sample_frame());
        let shape = rendered.find("Shape:").unwrap();
        let head = rendered.find("First 5 rows:").unwrap();
        let tail = rendered.find("Last 5 rows:").unwrap();
        let labels = rendered.find("Columns (").unwrap();
        let dtypes = rendered.find("Data types:").unwrap();
        let summary = rendered.find("Summary:").unwrap();
        let stats = rendered.find("Descriptive statistics:").unwrap();
        assert!(shape < head && head < tail && tail < labels);
        assert!(labels < dtypes && dtypes < summary && summary < stats);
    }
}
