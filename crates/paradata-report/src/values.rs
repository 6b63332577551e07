//! Polars AnyValue rendering helpers.

use polars::prelude::AnyValue;

/// Converts a Polars AnyValue to its display string.
/// Returns an empty string for Null and trims trailing zeros off floats.
pub fn any_to_string(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(*v)),
        AnyValue::Float64(v) => format_numeric(*v),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let s = format!("{v:.4}");
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_string_null_is_empty() {
        assert_eq!(any_to_string(&AnyValue::Null), "");
    }

    #[test]
    fn test_format_numeric_trims_zeros() {
        assert_eq!(format_numeric(5.0), "5");
        assert_eq!(format_numeric(2.25), "2.25");
        assert_eq!(format_numeric(1.0 / 3.0), "0.3333");
    }
}
