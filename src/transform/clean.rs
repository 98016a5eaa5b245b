use chrono::NaiveDateTime;
use std::collections::{HashMap, HashSet};

use crate::models::{Account, Customer, Transaction};

/// Raw rows as extracted from the source relations.
#[derive(Debug, Clone, Default)]
pub(crate) struct SourceSnapshot {
    pub(crate) customers: Vec<Customer>,
    pub(crate) accounts: Vec<Account>,
    pub(crate) transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CleanReport {
    pub(crate) accounts_removed: usize,
    pub(crate) customers_removed: usize,
    pub(crate) transactions_removed: usize,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CleanedData {
    pub(crate) customers: Vec<Customer>,
    pub(crate) accounts: Vec<Account>,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) report: CleanReport,
}

/// Filter the snapshot down to rows with a consistent customer -> account ->
/// transaction chain. Steps run in dependency order and row order is kept.
///
/// 1. accounts need an owner and `OpenDate > BirthDate` (strict);
/// 2. customers need at least one surviving account;
/// 3. transactions need a surviving account and `timestamp >= OpenDate`.
pub(crate) fn clean(source: SourceSnapshot) -> CleanedData {
    let SourceSnapshot {
        customers,
        accounts,
        transactions,
    } = source;

    let mut birth_by_customer: HashMap<&str, NaiveDateTime> = HashMap::new();
    for c in &customers {
        birth_by_customer
            .entry(c.customer_id.as_str())
            .or_insert_with(|| c.birth_date.and_time(chrono::NaiveTime::MIN));
    }

    let accounts_before = accounts.len();
    let clean_accounts: Vec<Account> = accounts
        .into_iter()
        .filter(|a| {
            birth_by_customer
                .get(a.customer_id.as_str())
                .is_some_and(|birth| a.open_date > *birth)
        })
        .collect();
    let accounts_removed = accounts_before - clean_accounts.len();
    log::info!(
        "Removed {accounts_removed} accounts opened before their owner's birth or without an owner; {} remain",
        clean_accounts.len()
    );

    let owners: HashSet<&str> = clean_accounts
        .iter()
        .map(|a| a.customer_id.as_str())
        .collect();
    let customers_before = customers.len();
    let clean_customers: Vec<Customer> = customers
        .iter()
        .filter(|c| owners.contains(c.customer_id.as_str()))
        .cloned()
        .collect();
    let customers_removed = customers_before - clean_customers.len();
    log::info!(
        "Removed {customers_removed} customers without a valid account; {} remain",
        clean_customers.len()
    );

    let open_by_account: HashMap<&str, NaiveDateTime> = clean_accounts
        .iter()
        .map(|a| (a.account_id.as_str(), a.open_date))
        .collect();
    let transactions_before = transactions.len();
    let clean_transactions: Vec<Transaction> = transactions
        .into_iter()
        .filter(|t| {
            open_by_account
                .get(t.account_id.as_str())
                .is_some_and(|opened| t.timestamp >= *opened)
        })
        .collect();
    let transactions_removed = transactions_before - clean_transactions.len();
    log::info!(
        "Removed {transactions_removed} transactions dated before their account opened or on a removed account; {} remain",
        clean_transactions.len()
    );

    CleanedData {
        customers: clean_customers,
        accounts: clean_accounts,
        transactions: clean_transactions,
        report: CleanReport {
            accounts_removed,
            customers_removed,
            transactions_removed,
        },
    }
}

#[cfg(test)]
#[path = "clean_tests.rs"]
mod tests;
