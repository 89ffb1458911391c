//! Display formatting. Stored amounts are never rounded; only these
//! functions round, and only for presentation.

use chrono::{DateTime, Utc};

/// `$1,234.56`: dollar sign, thousands separators, exactly two decimals.
/// Negative amounts render as `-$1,234.56`.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// `Jan 15, 2024`.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn currency_has_separators_and_two_decimals() {
        assert_eq!(format_currency(1234.56), "$1,234.56");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(21.0), "$21.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1_234_567.8), "$1,234,567.80");
    }

    #[test]
    fn currency_negative_amounts() {
        assert_eq!(format_currency(-1234.5), "-$1,234.50");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn date_is_short_month_day_year() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 13, 0, 0).unwrap();
        assert_eq!(format_date(date), "Jan 5, 2024");
    }
}
