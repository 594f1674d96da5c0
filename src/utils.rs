/// Formats a monetary amount the way the sales reports print it:
/// thousands-grouped, two decimals, `R$` prefix (e.g. `R$ 1,234,567.89`).
pub fn format_currency(value: f64) -> String {
    format!("R$ {}", format_number(value))
}

/// Thousands-grouped number with two decimals and no currency prefix.
pub fn format_number(value: f64) -> String {
    let total_cents = (value.abs() * 100.0).round() as u64;
    let whole = total_cents / 100;
    let cents = total_cents % 100;

    let mut out = String::new();
    if value < 0.0 && total_cents > 0 {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    out.push('.');
    out.push_str(&format!("{:02}", cents));
    out
}

/// Quantities print without decimals when integral, with two otherwise.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        let mut out = String::new();
        if value < 0.0 {
            out.push('-');
        }
        out.push_str(&group_thousands(value.abs() as u64));
        out
    } else {
        format_number(value)
    }
}

fn group_thousands(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut groups = Vec::new();
    while value > 0 {
        groups.push(value % 1000);
        value /= 1000;
    }

    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(group) = groups.pop() {
        out.push_str(&format!(",{:03}", group));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(0.0), "0.00");
        assert_eq!(format_number(7.5), "7.50");
        assert_eq!(format_number(999.99), "999.99");
        assert_eq!(format_number(1000.0), "1,000.00");
        assert_eq!(format_number(1234567.891), "1,234,567.89");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-1234.5), "-1,234.50");
        assert_eq!(format_number(-0.004), "0.00");
    }

    #[test]
    fn test_format_number_rounds_half_away_from_zero() {
        // 0.125 and 0.375 are exactly representable, so the half-cent is real
        assert_eq!(format_number(0.125), "0.13");
        assert_eq!(format_number(0.375), "0.38");
        assert_eq!(format_number(2.994), "2.99");
    }

    #[test]
    fn test_format_currency_prefix() {
        assert_eq!(format_currency(1500.0), "R$ 1,500.00");
        assert_eq!(format_currency(-20.25), "R$ -20.25");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(42.0), "42");
        assert_eq!(format_quantity(12000.0), "12,000");
        assert_eq!(format_quantity(3.25), "3.25");
        assert_eq!(format_quantity(-8.0), "-8");
    }
}
