#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── parse_datetime ────────────────────────────────────────────

#[test]
fn test_parse_datetime_space_separated() {
    let dt = parse_datetime("2025-11-06 14:05:09").unwrap();
    assert_eq!(dt, ymd(2025, 11, 6).and_hms_opt(14, 5, 9).unwrap());
}

#[test]
fn test_parse_datetime_iso_t_and_fraction() {
    let dt = parse_datetime("2025-11-06T14:05:09.250").unwrap();
    assert_eq!(
        dt,
        ymd(2025, 11, 6).and_hms_milli_opt(14, 5, 9, 250).unwrap()
    );
}

#[test]
fn test_parse_datetime_date_only_is_midnight() {
    let dt = parse_datetime("2021-01-01").unwrap();
    assert_eq!(dt, ymd(2021, 1, 1).and_hms_opt(0, 0, 0).unwrap());
}

#[test]
fn test_parse_datetime_invalid() {
    assert!(parse_datetime("yesterday").is_err());
    assert!(parse_datetime("").is_err());
}

// ── parse_date ────────────────────────────────────────────────

#[test]
fn test_parse_date_plain() {
    assert_eq!(parse_date("2000-01-01").unwrap(), ymd(2000, 1, 1));
    assert_eq!(parse_date(" 2000/02/29 ").unwrap(), ymd(2000, 2, 29));
}

#[test]
fn test_parse_date_drops_time_suffix() {
    assert_eq!(parse_date("1990-05-17 00:00:00").unwrap(), ymd(1990, 5, 17));
}

#[test]
fn test_parse_date_invalid() {
    assert!(parse_date("17/05/1990").is_err());
}

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_basic() {
    assert_eq!(parse_amount("150000").unwrap(), dec!(150000));
    assert_eq!(parse_amount("42.50").unwrap(), dec!(42.50));
}

#[test]
fn test_parse_amount_thousands_separator() {
    assert_eq!(parse_amount("1,250,000").unwrap(), dec!(1250000));
}

#[test]
fn test_parse_amount_scientific() {
    assert_eq!(parse_amount("1.5e3").unwrap(), dec!(1500));
}

#[test]
fn test_parse_amount_empty_is_zero() {
    assert_eq!(parse_amount("  ").unwrap(), Decimal::ZERO);
}

#[test]
fn test_parse_amount_invalid() {
    assert!(parse_amount("abc").is_err());
}
