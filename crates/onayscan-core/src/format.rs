//! Turkish-locale number formatting for reasoning text and reports.

/// Format a number with Turkish separators: '.' for thousands, ',' for
/// decimals, always two decimal places. `94629.56` becomes `94.629,56`.
pub fn format_number_tr(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let integer = cents / 100;
    let fraction = cents % 100;

    let digits = integer.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped},{fraction:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_tr() {
        assert_eq!(format_number_tr(94629.56), "94.629,56");
        assert_eq!(format_number_tr(7_476_000.0), "7.476.000,00");
        assert_eq!(format_number_tr(0.0), "0,00");
        assert_eq!(format_number_tr(1000.0), "1.000,00");
        assert_eq!(format_number_tr(999.9), "999,90");
        assert_eq!(format_number_tr(150000.0), "150.000,00");
    }
}
