//! Locale-ambiguous numeric string parsing.
//!
//! Source documents mix Turkish grouping (`94.629,56`) with plain decimal
//! notation, so every numeric capture in the codebase goes through this one
//! disambiguation routine.

use onayscan_core::{Error, Result};

/// Parse a numeric string that may use `.` and `,` in either locale role.
///
/// Disambiguation, applied in order:
/// 1. Both separators present: `.` is the thousands separator, `,` the
///    decimal separator.
/// 2. Only `,`: decimal separator.
/// 3. Only `.`: thousands separator if every group after the first has
///    exactly three digits, otherwise decimal separator.
pub fn parse_locale_number(raw: &str) -> Result<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(Error::Parse("empty numeric string".into()));
    }

    let has_dot = s.contains('.');
    let has_comma = s.contains(',');

    let normalized = if has_dot && has_comma {
        s.replace('.', "").replace(',', ".")
    } else if has_comma {
        s.replace(',', ".")
    } else if has_dot {
        let parts: Vec<&str> = s.split('.').collect();
        let grouped = parts.len() > 1
            && parts[1..]
                .iter()
                .all(|p| p.len() == 3 && p.chars().all(|c| c.is_ascii_digit()));
        if grouped {
            s.replace('.', "")
        } else {
            s.to_string()
        }
    } else {
        s.to_string()
    };

    normalized
        .parse::<f64>()
        .map_err(|_| Error::Parse(format!("not a valid number: '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_separators() {
        assert_eq!(parse_locale_number("94.629,56").unwrap(), 94629.56);
        assert_eq!(parse_locale_number("1.234.567,89").unwrap(), 1234567.89);
    }

    #[test]
    fn test_comma_only() {
        assert_eq!(parse_locale_number("62,3").unwrap(), 62.3);
    }

    #[test]
    fn test_dot_grouping() {
        // three-digit groups ⇒ thousands separator
        assert_eq!(parse_locale_number("1.234").unwrap(), 1234.0);
        assert_eq!(parse_locale_number("62.300").unwrap(), 62300.0);
        assert_eq!(parse_locale_number("7.476.000").unwrap(), 7476000.0);
    }

    #[test]
    fn test_dot_decimal() {
        assert_eq!(parse_locale_number("1.2").unwrap(), 1.2);
        assert_eq!(parse_locale_number("0.5000").unwrap(), 0.5);
    }

    #[test]
    fn test_plain_integer() {
        assert_eq!(parse_locale_number("7476000").unwrap(), 7476000.0);
    }

    #[test]
    fn test_invalid() {
        assert!(parse_locale_number("").is_err());
        assert!(parse_locale_number("abc").is_err());
        assert!(parse_locale_number("1,2,3.4.5").is_err());
    }
}
