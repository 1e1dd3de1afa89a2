//! Thousands-grouped fixed-point number formatting.

/// Formats `value` with `decimals` fraction digits and `,` between
/// thousands groups. Halves round away from zero; a value that rounds to
/// zero never carries a minus sign.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let scale = 10_f64.powi(decimals as i32);
    let scaled = (value.abs() * scale).round();
    let digits = format!("{scaled:.0}");
    let digits = format!("{digits:0>width$}", width = decimals + 1);
    let (integer, fraction) = digits.split_at(digits.len() - decimals);

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if value < 0.0 && scaled != 0.0 {
        out.push('-');
    }
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Label text of a delta or cumulative value: grouped, no decimals.
pub fn format_delta(value: f64) -> String {
    format_grouped(value, 0)
}

/// Decimals needed to tell apart ticks that are `step` apart.
pub fn precision_fixed(step: f64) -> usize {
    let step = step.abs();
    if step == 0.0 || !step.is_finite() {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_delta(1234.0), "1,234");
        assert_eq!(format_delta(1_234_567.0), "1,234,567");
        assert_eq!(format_delta(100.0), "100");
        assert_eq!(format_delta(999.0), "999");
        assert_eq!(format_delta(0.0), "0");
    }

    #[test]
    fn negatives_keep_a_plain_minus() {
        assert_eq!(format_delta(-7.0), "-7");
        assert_eq!(format_delta(-40.0), "-40");
        assert_eq!(format_delta(-1234.0), "-1,234");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_delta(2.5), "3");
        assert_eq!(format_delta(0.5), "1");
        assert_eq!(format_delta(-2.5), "-3");
        assert_eq!(format_delta(1234.4), "1,234");
    }

    #[test]
    fn small_negatives_round_to_unsigned_zero() {
        assert_eq!(format_delta(-0.4), "0");
        assert_eq!(format_delta(-0.0), "0");
    }

    #[test]
    fn fixed_decimals() {
        assert_eq!(format_grouped(0.5, 1), "0.5");
        assert_eq!(format_grouped(-0.05, 2), "-0.05");
        assert_eq!(format_grouped(1500.25, 2), "1,500.25");
        assert_eq!(format_grouped(3.0, 1), "3.0");
    }

    #[test]
    fn precision_from_step() {
        assert_eq!(precision_fixed(20.0), 0);
        assert_eq!(precision_fixed(1.0), 0);
        assert_eq!(precision_fixed(0.5), 1);
        assert_eq!(precision_fixed(0.2), 1);
        assert_eq!(precision_fixed(0.05), 2);
    }
}
