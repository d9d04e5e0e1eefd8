use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{CardError, Result};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
];

/// Round to cents on the shortest decimal form of `val`, halves away from
/// zero: 2.675 -> "2.68". Returns the unsigned digits.
fn cents_text(val: f64) -> String {
    match Decimal::from_str(&val.to_string()) {
        Ok(d) => {
            let rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.2}", rounded.abs())
        }
        // Beyond Decimal's range.
        Err(_) => format!("{:.2}", val.abs()),
    }
}

/// Format a float as a dollar amount with thousands separators: $1,234.56
///
/// Negative zero prints as `$0.00` (no minus sign).
pub fn money(val: f64) -> String {
    if val.is_nan() {
        return "NaN".to_string();
    }
    if val.is_infinite() {
        return if val < 0.0 { "-$\u{221e}" } else { "$\u{221e}" }.to_string();
    }

    let negative = val < 0.0;
    let cents = cents_text(val);
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// `YYYY` or `YYYY-MM`, resolved to the first day of the year/month.
fn parse_partial_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('-');
    let year = parts.next()?;
    let month = parts.next();
    if parts.next().is_some() {
        return None;
    }
    let digits = |p: &str, n: usize| p.len() == n && p.bytes().all(|b| b.is_ascii_digit());
    if !digits(year, 4) || !month.map_or(true, |m| digits(m, 2)) {
        return None;
    }
    let month = month.map_or(Some(1), |m| m.parse().ok())?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

/// Parse a date string into a calendar date.
///
/// Accepts RFC 3339 timestamps (the date is taken as written, the offset is
/// not applied), ISO-like date-times without an offset, `YYYY` and `YYYY-MM`,
/// and a handful of plain date layouts.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let s = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    for f in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, f) {
            return Ok(dt.date());
        }
    }
    for f in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, f) {
            return Ok(d);
        }
    }
    parse_partial_date(s).ok_or_else(|| CardError::InvalidDate(input.to_string()))
}

/// Format a date string as `Mar 5, 2024`. The year is not zero-padded.
pub fn short_date(input: &str) -> Result<String> {
    let date = parse_date(input)?;
    Ok(format!("{} {}, {}", date.format("%b"), date.day(), date.year()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    /// `-`? `$` then 1-3 digits, `,ddd` groups, `.dd`.
    fn is_us_currency(s: &str) -> bool {
        let s = s.strip_prefix('-').unwrap_or(s);
        let Some(s) = s.strip_prefix('$') else {
            return false;
        };
        let Some((int_part, dec_part)) = s.split_once('.') else {
            return false;
        };
        if dec_part.len() != 2 || !dec_part.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        let groups: Vec<&str> = int_part.split(',').collect();
        let first_ok = (1..=3).contains(&groups[0].len());
        first_ok
            && groups
                .iter()
                .enumerate()
                .all(|(i, g)| (i == 0 || g.len() == 3) && g.chars().all(|c| c.is_ascii_digit()))
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "$1,234.56");
        assert_eq!(money(1234.5), "$1,234.50");
        assert_eq!(money(-500.00), "-$500.00");
        assert_eq!(money(-42.0), "-$42.00");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(1000000.99), "$1,000,000.99");
        assert_eq!(money(42.10), "$42.10");
        assert_eq!(money(12.5), "$12.50");
    }

    #[test]
    fn test_money_rounds_half_away_from_zero() {
        assert_eq!(money(0.125), "$0.13");
        assert_eq!(money(1.125), "$1.13");
        assert_eq!(money(2.675), "$2.68");
        assert_eq!(money(10.235), "$10.24");
        assert_eq!(money(0.005), "$0.01");
        assert_eq!(money(-0.125), "-$0.13");
        assert_eq!(money(1234.565), "$1,234.57");
    }

    #[test]
    fn test_money_sub_cent_amounts() {
        assert_eq!(money(0.004), "$0.00");
        assert_eq!(money(-0.004), "-$0.00");
        assert_eq!(money(0.1 + 0.2), "$0.30");
    }

    #[test]
    fn test_money_negative_zero_has_no_sign() {
        assert_eq!(money(-0.0), "$0.00");
    }

    #[test]
    fn test_money_non_finite() {
        assert_eq!(money(f64::NAN), "NaN");
        assert_eq!(money(f64::INFINITY), "$\u{221e}");
        assert_eq!(money(f64::NEG_INFINITY), "-$\u{221e}");
    }

    #[test]
    fn test_short_date_iso() {
        assert_eq!(short_date("2024-03-05").unwrap(), "Mar 5, 2024");
        assert_eq!(short_date("2024-12-25").unwrap(), "Dec 25, 2024");
        assert_eq!(short_date("2024-01-01").unwrap(), "Jan 1, 2024");
    }

    #[test]
    fn test_short_date_timestamps() {
        assert_eq!(short_date("2024-03-05T10:30:00Z").unwrap(), "Mar 5, 2024");
        assert_eq!(short_date("2024-03-05T23:30:00-05:00").unwrap(), "Mar 5, 2024");
        assert_eq!(short_date("2024-03-05T08:15:00.250").unwrap(), "Mar 5, 2024");
        assert_eq!(short_date("2024-03-05 08:15").unwrap(), "Mar 5, 2024");
    }

    #[test]
    fn test_short_date_other_layouts() {
        assert_eq!(short_date("2024/03/05").unwrap(), "Mar 5, 2024");
        assert_eq!(short_date("03/05/2024").unwrap(), "Mar 5, 2024");
        assert_eq!(short_date("March 5, 2024").unwrap(), "Mar 5, 2024");
        assert_eq!(short_date("  2024-03-05 ").unwrap(), "Mar 5, 2024");
        assert_eq!(short_date("Mar 5 2024").unwrap(), "Mar 5, 2024");
        assert_eq!(short_date("March 5 2024").unwrap(), "Mar 5, 2024");
    }

    #[test]
    fn test_short_date_year_and_month_only() {
        assert_eq!(short_date("2024").unwrap(), "Jan 1, 2024");
        assert_eq!(short_date("2024-03").unwrap(), "Mar 1, 2024");
        assert!(short_date("2024-3").is_err());
        assert!(short_date("2024-13").is_err());
        assert!(short_date("24").is_err());
    }

    #[test]
    fn test_short_date_year_not_padded() {
        assert_eq!(short_date("0999-03-05").unwrap(), "Mar 5, 999");
        assert_eq!(short_date("0042").unwrap(), "Jan 1, 42");
    }

    #[test]
    fn test_short_date_invalid() {
        for bad in ["", "yesterday", "2024-13-01", "2024-02-30", "not a date"] {
            match short_date(bad) {
                Err(CardError::InvalidDate(s)) => assert_eq!(s, bad),
                other => panic!("expected InvalidDate for {bad:?}, got {other:?}"),
            }
        }
    }

    #[quickcheck]
    fn prop_money_is_us_currency(cents: i64) -> TestResult {
        if cents.unsigned_abs() > 1_000_000_000_000 {
            return TestResult::discard();
        }
        let s = money(cents as f64 / 100.0);
        if !is_us_currency(&s) {
            return TestResult::failed();
        }
        let abs = cents.unsigned_abs();
        let sign = if cents < 0 { "-" } else { "" };
        let expected = format!("{sign}{}.{:02}", abs / 100, abs % 100);
        let digits: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
        TestResult::from_bool(digits == expected)
    }

    #[quickcheck]
    fn prop_money_half_cent_rounds_away_from_zero(cents: i32) -> TestResult {
        if cents.unsigned_abs() > 100_000_000 {
            return TestResult::discard();
        }
        let mills = i64::from(cents) * 10 + if cents < 0 { -5 } else { 5 };
        let s = money(mills as f64 / 1000.0);
        let abs = (mills.unsigned_abs() + 5) / 10;
        let sign = if mills < 0 { "-" } else { "" };
        let expected = format!("{sign}{}.{:02}", abs / 100, abs % 100);
        let digits: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
        TestResult::from_bool(digits == expected)
    }

    #[quickcheck]
    fn prop_money_sign_matches_amount(cents: i32) -> bool {
        let s = money(cents as f64 / 100.0);
        s.starts_with('-') == (cents < 0)
    }

    #[quickcheck]
    fn prop_short_date_format(days: u32) -> bool {
        let base = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let date = base + chrono::Duration::days((days % 2_900_000) as i64);
        let iso = date.format("%Y-%m-%d").to_string();
        let expected = format!(
            "{} {}, {}",
            MONTHS[date.month0() as usize],
            date.day(),
            date.year()
        );
        short_date(&iso).unwrap() == expected
    }
}
