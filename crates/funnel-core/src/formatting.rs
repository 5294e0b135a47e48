/// Round `value` to `decimals` places, ties to even.
///
/// # Examples
///
/// ```
/// use funnel_core::formatting::round_to;
///
/// assert_eq!(round_to(33.333_333, 2), 33.33);
/// assert_eq!(round_to(66.66, 1), 66.7);
/// assert_eq!(round_to(90.625, 2), 90.62);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use funnel_core::formatting::percentage;
///
/// assert!((percentage(50.0, 200.0, 1) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(0.0, 0.0, 2), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    round_to((part / whole) * 100.0, decimal_places)
}

/// Format `value` rounded to at most `max_decimals` places, dropping trailing
/// zeros but always keeping one fractional digit.
///
/// # Examples
///
/// ```
/// use funnel_core::formatting::format_compact;
///
/// assert_eq!(format_compact(20.0, 2), "20.0");
/// assert_eq!(format_compact(33.333, 2), "33.33");
/// assert_eq!(format_compact(12.5, 2), "12.5");
/// assert_eq!(format_compact(-25.0, 2), "-25.0");
/// ```
pub fn format_compact(value: f64, max_decimals: u32) -> String {
    let rounded = round_to(value, max_decimals);
    // Avoid printing "-0.0" for values that round to zero from below.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let fixed = format!("{:.prec$}", rounded, prec = max_decimals.max(1) as usize);
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Format a percentage with a fixed number of decimals and a `%` suffix.
///
/// # Examples
///
/// ```
/// use funnel_core::formatting::format_percent;
///
/// assert_eq!(format_percent(66.666, 1), "66.7%");
/// assert_eq!(format_percent(0.0, 1), "0.0%");
/// ```
pub fn format_percent(value: f64, decimals: u32) -> String {
    format!("{:.prec$}%", value, prec = decimals as usize)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── round_to ─────────────────────────────────────────────────────────────

    #[test]
    fn test_round_to_ties_to_even() {
        assert_eq!(round_to(0.25, 1), 0.2);
        assert_eq!(round_to(-0.25, 1), -0.2);
        assert_eq!(round_to(6.25, 1), 6.2);
        assert_eq!(round_to(90.625, 2), 90.62);
    }

    #[test]
    fn test_round_to_non_tie_rounds_to_nearest() {
        assert_eq!(round_to(90.626, 2), 90.63);
        assert_eq!(round_to(6.26, 1), 6.3);
    }

    #[test]
    fn test_round_to_zero_decimals() {
        assert_eq!(round_to(12.6, 0), 13.0);
    }

    // ── percentage ───────────────────────────────────────────────────────────

    #[test]
    fn test_percentage_basic() {
        let p = percentage(50.0, 200.0, 1);
        assert!((p - 25.0).abs() < 1e-9, "percentage = {p}");
    }

    #[test]
    fn test_percentage_tie_rounds_to_even() {
        assert_eq!(percentage(1.0, 16.0, 1), 6.2);
        assert_eq!(percentage(3.0, 16.0, 1), 18.8);
    }

    #[test]
    fn test_percentage_zero_whole() {
        assert_eq!(percentage(10.0, 0.0, 2), 0.0);
    }

    #[test]
    fn test_percentage_rounding() {
        let p = percentage(1.0, 3.0, 1);
        assert!((p - 33.3).abs() < 1e-9, "percentage = {p}");
    }

    // ── format_compact ───────────────────────────────────────────────────────

    #[test]
    fn test_format_compact_whole_number_keeps_one_decimal() {
        assert_eq!(format_compact(20.0, 2), "20.0");
        assert_eq!(format_compact(100.0, 2), "100.0");
    }

    #[test]
    fn test_format_compact_trims_trailing_zero() {
        assert_eq!(format_compact(12.50, 2), "12.5");
    }

    #[test]
    fn test_format_compact_keeps_two_decimals() {
        assert_eq!(format_compact(66.67, 2), "66.67");
    }

    #[test]
    fn test_format_compact_negative_zero() {
        assert_eq!(format_compact(-0.001, 2), "0.0");
    }

    // ── format_percent ───────────────────────────────────────────────────────

    #[test]
    fn test_format_percent_fixed_decimals() {
        assert_eq!(format_percent(50.0, 1), "50.0%");
        assert_eq!(format_percent(33.333, 1), "33.3%");
    }
}
