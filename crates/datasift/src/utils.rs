//! Shared helpers for the analyzer and the cleaner.
//!
//! Both components must agree exactly on what "numeric" and "duplicate"
//! mean, so the coercion and the canonical row key live here.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::error::{DataQualityError, Result};
use crate::types::{Record, Value};

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Leading decimal literal: optional sign, digits with optional fraction (or a
/// bare fraction), optional exponent.
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("Invalid regex: leading number")
});

/// Parse the longest numeric prefix of a string.
///
/// Leading whitespace is skipped and anything after the literal is ignored,
/// so `"42 apples"` parses as `42.0`. Returns `None` when the text does not
/// start with a number or the result is not finite.
///
/// # Example
///
/// ```rust,ignore
/// use datasift::utils::parse_leading_number;
///
/// assert_eq!(parse_leading_number("  3.5e2 units"), Some(350.0));
/// assert_eq!(parse_leading_number("abc"), None);
/// ```
pub fn parse_leading_number(s: &str) -> Option<f64> {
    let literal = LEADING_NUMBER.find(s.trim_start())?.as_str();
    // "5." and "5.e3" are valid prefixes; normalize them for `f64::from_str`.
    let normalized = literal.replacen(".e", "e", 1).replacen(".E", "E", 1);
    let normalized = normalized.strip_suffix('.').unwrap_or(&normalized);
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Check if a value takes part in column statistics.
pub fn is_numeric_value(value: &Value) -> bool {
    value.as_numeric().is_some()
}

// =============================================================================
// Canonical Row Key
// =============================================================================

static ZERO: Value = Value::Number(0.0);

/// Serialize a record into a key that is equal for equal rows.
///
/// Keys are sorted first, so two records holding the same pairs in a
/// different order produce the same key. `-0.0` keys the same as `0.0`.
/// `row` is only used for the error.
///
/// # Errors
///
/// [`DataQualityError::UnserializableValue`] when a number is NaN or
/// infinite, since such a value has no stable serialized form.
pub fn canonical_row_key(record: &Record, row: usize) -> Result<String> {
    let mut sorted: BTreeMap<&str, &Value> = BTreeMap::new();
    for (column, value) in record {
        if let Value::Number(n) = value
            && !n.is_finite()
        {
            return Err(DataQualityError::UnserializableValue {
                row,
                column: column.clone(),
            });
        }
        let value = match value {
            Value::Number(n) if *n == 0.0 => &ZERO,
            other => other,
        };
        sorted.insert(column.as_str(), value);
    }
    Ok(serde_json::to_string(&sorted)?)
}
