use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a source timestamp. A bare date means midnight.
pub(crate) fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    parse_date(s)
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
        .with_context(|| format!("Could not parse timestamp: {s}"))
}

/// Parse a source date, dropping any time component.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    // Date columns exported from datetime types carry a midnight suffix
    if let Some((date_part, _)) = s.split_once([' ', 'T']) {
        if let Ok(d) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            return Ok(d);
        }
    }
    anyhow::bail!("Could not parse date: {s}")
}

pub(crate) fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned = s.replace(',', "").trim().to_string();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .with_context(|| format!("Failed to parse '{s}' as decimal"))
}

#[cfg(test)]
#[path = "values_tests.rs"]
mod tests;
