use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::collections::{HashMap, HashSet};

use super::CleanedData;
use crate::categorize::CategoryClassifier;
use crate::models::*;

/// Indexed by `Day_Of_Week - 2`, Monday first.
const DAY_NAMES: [&str; 7] = [
    "Thứ Hai",
    "Thứ Ba",
    "Thứ Tư",
    "Thứ Năm",
    "Thứ Sáu",
    "Thứ Bảy",
    "Chủ Nhật",
];

/// All five dimension row sets for one run, before any surrogate keys exist.
#[derive(Debug, Clone, Default)]
pub(crate) struct DimensionSet {
    pub(crate) dates: Vec<DimDate>,
    pub(crate) customers: Vec<DimCustomer>,
    pub(crate) accounts: Vec<DimAccount>,
    pub(crate) merchants: Vec<DimMerchant>,
    pub(crate) locations: Vec<DimLocation>,
}

pub(crate) fn build_dimensions(
    cleaned: &CleanedData,
    classifier: &CategoryClassifier,
    as_of: NaiveDate,
) -> DimensionSet {
    let set = DimensionSet {
        dates: build_dim_dates(&cleaned.transactions),
        customers: build_dim_customers(&cleaned.customers, as_of),
        accounts: build_dim_accounts(&cleaned.accounts),
        merchants: build_dim_merchants(&cleaned.transactions, classifier),
        locations: build_dim_locations(&cleaned.transactions),
    };
    log::info!(
        "Prepared dimensions: {} dates, {} customers, {} accounts, {} merchants, {} locations",
        set.dates.len(),
        set.customers.len(),
        set.accounts.len(),
        set.merchants.len(),
        set.locations.len()
    );
    set
}

// ── Customer / Account ────────────────────────────────────────

/// Ages are taken at `as_of`, so the same customer can change band between runs.
pub(crate) fn build_dim_customers(customers: &[Customer], as_of: NaiveDate) -> Vec<DimCustomer> {
    customers
        .iter()
        .map(|c| DimCustomer {
            customer_id_source: c.customer_id.clone(),
            customer_name: c.full_name(),
            age_group: AgeGroup::from_age(c.age_at(as_of)),
            gender: c.gender.clone(),
            city: c.city.clone(),
            country: c.country.clone(),
            birth_date: c.birth_date,
        })
        .collect()
}

pub(crate) fn build_dim_accounts(accounts: &[Account]) -> Vec<DimAccount> {
    accounts
        .iter()
        .map(|a| DimAccount {
            account_id_source: a.account_id.clone(),
            account_type: a.account_type.clone(),
            open_date: a.open_date,
        })
        .collect()
}

// ── Location ──────────────────────────────────────────────────

pub(crate) fn build_dim_locations(transactions: &[Transaction]) -> Vec<DimLocation> {
    let mut seen = HashSet::new();
    transactions
        .iter()
        .filter(|t| seen.insert(t.country.as_str()))
        .map(|t| DimLocation {
            country: t.country.clone(),
            region: Region::classify(&t.country),
        })
        .collect()
}

// ── Merchant ──────────────────────────────────────────────────

/// One row per resolved counterparty name. When rows for the same name
/// classify differently the first category seen is kept; the conflicts are
/// counted and logged, not resolved.
pub(crate) fn build_dim_merchants(
    transactions: &[Transaction],
    classifier: &CategoryClassifier,
) -> Vec<DimMerchant> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut merchants: Vec<DimMerchant> = Vec::new();
    let mut conflicts: HashSet<&str> = HashSet::new();

    for txn in transactions {
        let name = txn.counterparty();
        let category = classifier.classify(txn);
        match index.get(name) {
            Some(&i) => {
                if merchants[i].category != category {
                    conflicts.insert(name);
                }
            }
            None => {
                index.insert(name, merchants.len());
                merchants.push(DimMerchant {
                    merchant_name_source: name.to_string(),
                    category: category.to_string(),
                });
            }
        }
    }

    let transfers = transactions.iter().filter(|t| t.is_transfer()).count();
    log::debug!(
        "Merchant dimension built from {} card payments and {transfers} transfers",
        transactions.len() - transfers
    );
    if !conflicts.is_empty() {
        log::warn!(
            "{} counterparties classified into more than one category; kept the first category seen",
            conflicts.len()
        );
    }
    merchants
}

// ── Date ──────────────────────────────────────────────────────

/// `YYYYMMDDHH` as an integer.
pub(crate) fn date_key(ts: &NaiveDateTime) -> i64 {
    i64::from(ts.year()) * 1_000_000
        + i64::from(ts.month()) * 10_000
        + i64::from(ts.day()) * 100
        + i64::from(ts.hour())
}

pub(crate) fn dim_date_for(ts: &NaiveDateTime) -> DimDate {
    let day_of_week = ts.weekday().num_days_from_monday() + 2;
    let month = ts.month();
    DimDate {
        date_key: date_key(ts),
        full_date: ts.date(),
        hour_of_day: ts.hour(),
        day_of_week,
        day_name: DAY_NAMES[(day_of_week - 2) as usize].to_string(),
        is_weekend: day_of_week >= 7,
        month,
        month_name: format!("Tháng {month}"),
        quarter: (month - 1) / 3 + 1,
        year: ts.year(),
    }
}

/// One row per distinct (date, hour) among the transactions.
pub(crate) fn build_dim_dates(transactions: &[Transaction]) -> Vec<DimDate> {
    let mut seen = HashSet::new();
    transactions
        .iter()
        .filter(|t| seen.insert(date_key(&t.timestamp)))
        .map(|t| dim_date_for(&t.timestamp))
        .collect()
}

#[cfg(test)]
#[path = "dimensions_tests.rs"]
mod tests;
