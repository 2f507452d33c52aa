//! Numeric and currency parsing for cell text.

/// Dash characters OCR output uses for "no value".
const PLACEHOLDER_DASHES: [&str; 3] = ["-", "\u{2014}", "\u{2013}"];

/// Check whether text is a lone dash, em-dash or en-dash.
pub fn is_placeholder_dash(s: &str) -> bool {
    PLACEHOLDER_DASHES.contains(&s)
}

/// Parse a plain number such as a quantity or percentage.
///
/// A comma is read as the decimal separator (`"12,5"` is 12.5). Blank text,
/// lone dashes and anything that is not a finite number give `None`.
pub fn parse_numeric(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() || is_placeholder_dash(s) {
        return None;
    }

    let normalized = s.replace(',', ".");
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a currency amount into integer cents.
///
/// `$`, thousands commas and whitespace are dropped before parsing, so
/// `"$1,234.50"` is 123450. Blank text and lone dashes give `None`.
pub fn parse_currency_to_cents(s: Option<&str>) -> Option<i64> {
    let s = s?;
    if s.trim().is_empty() {
        return None;
    }

    let cleaned: String = s
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() || is_placeholder_dash(&cleaned) {
        return None;
    }

    cleaned.parse::<f64>().ok().and_then(to_cents)
}

/// Convert currency units to cents, rounding half away from zero.
///
/// Returns `None` for non-finite input or values outside the `i64` range.
pub fn to_cents(value: f64) -> Option<i64> {
    let cents = (value * 100.0).round();
    if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(cents as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric(Some("3")), Some(3.0));
        assert_eq!(parse_numeric(Some(" 10.00 ")), Some(10.0));
        assert_eq!(parse_numeric(Some("12,5")), Some(12.5));
        assert_eq!(parse_numeric(Some("-4")), Some(-4.0));
    }

    #[test]
    fn test_parse_numeric_absent() {
        assert_eq!(parse_numeric(None), None);
        assert_eq!(parse_numeric(Some("")), None);
        assert_eq!(parse_numeric(Some("   ")), None);
        assert_eq!(parse_numeric(Some("-")), None);
        assert_eq!(parse_numeric(Some("\u{2014}")), None);
        assert_eq!(parse_numeric(Some("\u{2013}")), None);
        assert_eq!(parse_numeric(Some("abc")), None);
        assert_eq!(parse_numeric(Some("1,234.50")), None);
    }

    #[test]
    fn test_parse_numeric_rejects_non_finite() {
        assert_eq!(parse_numeric(Some("inf")), None);
        assert_eq!(parse_numeric(Some("NaN")), None);
    }

    #[test]
    fn test_parse_currency_to_cents() {
        assert_eq!(parse_currency_to_cents(Some("$1,234.50")), Some(123450));
        assert_eq!(parse_currency_to_cents(Some("30.00")), Some(3000));
        assert_eq!(parse_currency_to_cents(Some("$ 1 120")), Some(112000));
        assert_eq!(parse_currency_to_cents(Some("-5.25")), Some(-525));
    }

    #[test]
    fn test_parse_currency_absent() {
        assert_eq!(parse_currency_to_cents(None), None);
        assert_eq!(parse_currency_to_cents(Some("")), None);
        assert_eq!(parse_currency_to_cents(Some("  ")), None);
        assert_eq!(parse_currency_to_cents(Some("\u{2014}")), None);
        assert_eq!(parse_currency_to_cents(Some(" - ")), None);
        assert_eq!(parse_currency_to_cents(Some("$")), None);
        assert_eq!(parse_currency_to_cents(Some("n/a")), None);
        assert_eq!(parse_currency_to_cents(Some("1e400")), None);
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        // 0.125 * 100 is exactly 12.5
        assert_eq!(to_cents(0.125), Some(13));
        assert_eq!(to_cents(-0.125), Some(-13));
        assert_eq!(parse_currency_to_cents(Some("2.675")), Some(268));
        // 1.005 is stored just below 1.005, so it rounds down
        assert_eq!(parse_currency_to_cents(Some("1.005")), Some(100));
    }
}
