//! Lenient numeric parsing for form-style quantity fields.

use regex::Regex;
use std::sync::LazyLock;

static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid float regex")
});

/// Parse the longest leading decimal prefix of `s` ("12.5kg" → 12.5).
/// Returns None when no numeric prefix exists.
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let m = LEADING_FLOAT.find(s.trim_start())?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Like [`parse_leading_float`] but unparseable or empty input counts as 0.
pub fn float_or_zero(s: &str) -> f64 {
    parse_leading_float(s).unwrap_or(0.0)
}
