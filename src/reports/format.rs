//! Display formatting for report tables.

/// Format with thousands separators: `1234567.891` → `1,234,567.89`.
pub fn thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// `1234.5` → `1,234.50 ha`
pub fn hectares(value: f64) -> String {
    format!("{} ha", thousands(value, 2))
}

/// `12.345` → `12.35%`
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// `1.2` → `+1.20%`
pub fn signed_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_groups_integer_part() {
        assert_eq!(thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(thousands(999.0, 0), "999");
        assert_eq!(thousands(1000.0, 0), "1,000");
        assert_eq!(thousands(0.0, 2), "0.00");
        assert_eq!(thousands(-45210.5, 1), "-45,210.5");
        assert_eq!(thousands(-0.001, 2), "0.00");
    }

    #[test]
    fn test_suffixes() {
        assert_eq!(hectares(1_716_295.22), "1,716,295.22 ha");
        assert_eq!(percent(22.2222), "22.22%");
        assert_eq!(signed_percent(3.5), "+3.50%");
        assert_eq!(signed_percent(-0.25), "-0.25%");
    }
}
