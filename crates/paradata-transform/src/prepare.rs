//! Table preparation pipeline.
//!
//! Preparation runs in a fixed order: normalize column labels, parse the
//! date columns, zero-fill and cast the numeric columns, then left-join the
//! optional code lookup table. Row order and row count of the main table are
//! preserved by every step except a lookup join with duplicate keys, which
//! widens the result (see [`prepare_frame`]).

use polars::prelude::*;
use tracing::{debug, warn};

use crate::columns::{has_column, normalize_columns, normalize_lookup_columns};
use crate::error::{PrepareError, Result};

/// Fixed date pattern for the `start`/`end` columns.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Columns parsed as dates when present.
pub const DATE_COLUMNS: [&str; 2] = ["start", "end"];

/// Columns zero-filled and cast to integers when present.
pub const NUMERIC_COLUMNS: [&str; 5] = [
    "countries",
    "events",
    "participants_m",
    "participants_f",
    "participants",
];

/// Main-table key column for the lookup join.
pub const JOIN_KEY: &str = "country";

/// Lookup-table key column after normalization.
pub const LOOKUP_KEY: &str = "name";

/// Cleans a table and optionally left-joins it against a code lookup table.
///
/// Steps, in order:
/// 1. Column labels are trimmed, lowercased, and space-to-underscore
///    substituted.
/// 2. `start`/`end` columns (when present) are parsed as `Date` with the
///    fixed `%d/%m/%Y` pattern; any unparseable value is a hard error.
/// 3. Each present column of [`NUMERIC_COLUMNS`] has nulls replaced with 0
///    and is cast to `Int64`.
/// 4. When `lookup` is supplied, its labels are trimmed and lowercased and
///    the main table is left-joined on `country` = `name`. Every main row
///    survives; unmatched rows carry null lookup columns. Duplicate lookup
///    keys are not rejected but logged, since they widen the row count.
pub fn prepare_frame(df: DataFrame, lookup: Option<&DataFrame>) -> Result<DataFrame> {
    let mut df = normalize_columns(df)?;

    for name in DATE_COLUMNS {
        if has_column(&df, name) {
            df = parse_date_column(df, name)?;
        }
    }

    df = coerce_numeric_columns(df)?;

    if let Some(lookup) = lookup {
        df = join_lookup(df, lookup)?;
    }
    Ok(df)
}

/// Parses a string column into `Date` values using [`DATE_FORMAT`].
///
/// Strict by contract: a single unparseable value fails the whole column.
fn parse_date_column(df: DataFrame, name: &str) -> Result<DataFrame> {
    let options = StrptimeOptions {
        format: Some(DATE_FORMAT.into()),
        strict: true,
        ..Default::default()
    };
    df.lazy()
        .with_column(col(name).str().to_date(options))
        .collect()
        .map_err(|e| PrepareError::DateParse {
            column: name.to_string(),
            message: e.to_string(),
        })
}

/// Zero-fills and casts to `Int64` every present column of
/// [`NUMERIC_COLUMNS`].
fn coerce_numeric_columns(df: DataFrame) -> Result<DataFrame> {
    let coercions: Vec<Expr> = NUMERIC_COLUMNS
        .iter()
        .filter(|name| has_column(&df, name))
        .map(|name| col(*name).fill_null(lit(0)).cast(DataType::Int64))
        .collect();
    if coercions.is_empty() {
        return Ok(df);
    }
    debug!(columns = coercions.len(), "coercing numeric columns");
    Ok(df.lazy().with_columns(coercions).collect()?)
}

/// Left-joins the main table against the normalized lookup table.
fn join_lookup(df: DataFrame, lookup: &DataFrame) -> Result<DataFrame> {
    let lookup = normalize_lookup_columns(lookup.clone())?;

    if !has_column(&df, JOIN_KEY) {
        return Err(PrepareError::MissingJoinKey {
            column: JOIN_KEY.to_string(),
        });
    }
    if !has_column(&lookup, LOOKUP_KEY) {
        return Err(PrepareError::MissingJoinKey {
            column: LOOKUP_KEY.to_string(),
        });
    }

    let key = lookup.column(LOOKUP_KEY)?.as_materialized_series();
    if key.n_unique()? < key.len() {
        warn!(
            column = LOOKUP_KEY,
            "lookup key column contains duplicate values; join may widen the row count"
        );
    }

    let joined = df
        .lazy()
        .join(
            lookup.lazy(),
            [col(JOIN_KEY)],
            [col(LOOKUP_KEY)],
            JoinArgs::new(JoinType::Left).with_coalesce(JoinCoalesce::KeepColumns),
        )
        .collect()?;
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn days_since_epoch(year: i32, month: u32, day: u32) -> i32 {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        i32::try_from((date - epoch).num_days()).unwrap()
    }

    #[test]
    fn test_prepare_normalizes_labels() {
        let df = df!("Start " => ["28/08/2024"], "Participants M" => [Some(3i64)]).unwrap();
        let prepared = prepare_frame(df, None).unwrap();
        let names: Vec<String> = prepared
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(
            names,
            vec!["start".to_string(), "participants_m".to_string()]
        );
    }

    #[test]
    fn test_prepare_parses_dates() {
        let df = df!(
            "Start" => ["29/08/2024", "08/09/2024"],
            "End" => ["08/09/2024", "18/09/2024"]
        )
        .unwrap();
        let prepared = prepare_frame(df, None).unwrap();

        let start = prepared.column("start").unwrap();
        assert_eq!(start.dtype(), &DataType::Date);
        assert_eq!(
            start.get(0).unwrap(),
            AnyValue::Date(days_since_epoch(2024, 8, 29))
        );
    }

    #[test]
    fn test_prepare_bad_date_is_hard_error() {
        let df = df!("Start" => ["29/08/2024", "not a date"]).unwrap();
        let result = prepare_frame(df, None);
        assert!(matches!(
            result,
            Err(PrepareError::DateParse { column, .. }) if column == "start"
        ));
    }

    #[test]
    fn test_prepare_zero_fills_numeric_columns() {
        let df = df!("Participants" => [None::<f64>, Some(5.0)]).unwrap();
        let prepared = prepare_frame(df, None).unwrap();

        let participants = prepared.column("participants").unwrap();
        assert_eq!(participants.dtype(), &DataType::Int64);
        assert_eq!(participants.get(0).unwrap(), AnyValue::Int64(0));
        assert_eq!(participants.get(1).unwrap(), AnyValue::Int64(5));
    }

    #[test]
    fn test_prepare_left_join_preserves_unmatched_rows() {
        let df = df!("Country" => ["France", "Nowhere"]).unwrap();
        let lookup = df!("Code" => ["FRA"], "Name" => ["France"]).unwrap();

        let prepared = prepare_frame(df, Some(&lookup)).unwrap();
        assert_eq!(prepared.height(), 2);

        let code = prepared.column("code").unwrap();
        assert_eq!(code.get(0).unwrap(), AnyValue::String("FRA"));
        assert_eq!(code.get(1).unwrap(), AnyValue::Null);

        // The right key column survives the join for inspection.
        let name = prepared.column("name").unwrap();
        assert_eq!(name.get(1).unwrap(), AnyValue::Null);
    }

    #[test]
    fn test_prepare_duplicate_lookup_keys_widen_rows() {
        let df = df!("Country" => ["France"]).unwrap();
        let lookup = df!("Code" => ["FRA", "FRX"], "Name" => ["France", "France"]).unwrap();

        let prepared = prepare_frame(df, Some(&lookup)).unwrap();
        assert_eq!(prepared.height(), 2);
    }

    #[test]
    fn test_prepare_missing_join_key() {
        let df = df!("Region" => ["Europe"]).unwrap();
        let lookup = df!("Code" => ["FRA"], "Name" => ["France"]).unwrap();

        let result = prepare_frame(df, Some(&lookup));
        assert!(matches!(
            result,
            Err(PrepareError::MissingJoinKey { column }) if column == "country"
        ));
    }
}
