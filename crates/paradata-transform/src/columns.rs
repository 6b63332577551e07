//! Column label normalization.

use polars::prelude::*;

use crate::error::Result;

/// Normalizes a main-table column label: trim surrounding whitespace,
/// lowercase, and replace interior spaces with underscores.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Normalizes a lookup-table column label: trim and lowercase only.
pub fn normalize_lookup_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Rewrites every column label of `df` with [`normalize_column_name`].
pub fn normalize_columns(mut df: DataFrame) -> Result<DataFrame> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| normalize_column_name(name.as_str()))
        .collect();
    df.set_column_names(names)?;
    Ok(df)
}

/// Rewrites every column label of `df` with [`normalize_lookup_name`].
pub fn normalize_lookup_columns(mut df: DataFrame) -> Result<DataFrame> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| normalize_lookup_name(name.as_str()))
        .collect();
    df.set_column_names(names)?;
    Ok(df)
}

/// Returns true if `df` has a column with the exact label `name`.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("Start "), "start");
        assert_eq!(normalize_column_name("  End"), "end");
        assert_eq!(normalize_column_name("Participants M"), "participants_m");
        assert_eq!(normalize_column_name("countries"), "countries");
    }

    #[test]
    fn test_normalize_lookup_name_keeps_spaces() {
        assert_eq!(normalize_lookup_name(" Region Name "), "region name");
    }

    #[test]
    fn test_normalize_columns() {
        let df = df!("Start " => ["a"], "Participants M" => [1i64]).unwrap();
        let df = normalize_columns(df).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(
            names,
            vec!["start".to_string(), "participants_m".to_string()]
        );
    }
}
