#![allow(clippy::unwrap_used)]

use super::*;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn customer(id: &str, born: (i32, u32, u32)) -> Customer {
    Customer {
        customer_id: id.into(),
        first_name: "Tran".into(),
        last_name: id.into(),
        birth_date: NaiveDate::from_ymd_opt(born.0, born.1, born.2).unwrap(),
        gender: "Nu".into(),
        city: "Da Nang".into(),
        country: "Vietnam".into(),
    }
}

fn account(id: &str, owner: &str, opened: NaiveDateTime) -> Account {
    Account {
        account_id: id.into(),
        customer_id: owner.into(),
        account_type: "Thanh toan".into(),
        open_date: opened,
    }
}

fn txn(id: &str, account_id: &str, at: NaiveDateTime) -> Transaction {
    Transaction {
        transaction_id: id.into(),
        account_id: account_id.into(),
        merchant_name: Some("Circle K".into()),
        amount: dec!(25000),
        timestamp: at,
        country: "Vietnam".into(),
        beneficiary_name: None,
        description: None,
    }
}

// ── Accounts ──────────────────────────────────────────────────

#[test]
fn test_account_opened_on_birth_date_is_rejected() {
    let out = clean(SourceSnapshot {
        customers: vec![customer("C1", (2000, 1, 1))],
        accounts: vec![account("A1", "C1", dt(2000, 1, 1, 0))],
        transactions: vec![],
    });
    assert!(out.accounts.is_empty());
    assert_eq!(out.report.accounts_removed, 1);
}

#[test]
fn test_account_opened_later_same_day_is_kept() {
    // Birth dates compare as midnight, so any later time that day passes
    let out = clean(SourceSnapshot {
        customers: vec![customer("C1", (2000, 1, 1))],
        accounts: vec![account("A1", "C1", dt(2000, 1, 1, 9))],
        transactions: vec![],
    });
    assert_eq!(out.accounts.len(), 1);
}

#[test]
fn test_account_without_owner_is_dropped() {
    let out = clean(SourceSnapshot {
        customers: vec![customer("C1", (1990, 1, 1))],
        accounts: vec![
            account("A1", "C1", dt(2015, 1, 1, 0)),
            account("A2", "C404", dt(2015, 1, 1, 0)),
        ],
        transactions: vec![],
    });
    let ids: Vec<&str> = out.accounts.iter().map(|a| a.account_id.as_str()).collect();
    assert_eq!(ids, vec!["A1"]);
    assert_eq!(out.report.accounts_removed, 1);
}

// ── Customers ─────────────────────────────────────────────────

#[test]
fn test_orphan_customers_removed() {
    let out = clean(SourceSnapshot {
        customers: vec![
            customer("C1", (1990, 1, 1)),
            customer("C2", (1990, 1, 1)),
            customer("C3", (2010, 1, 1)),
        ],
        accounts: vec![
            account("A1", "C1", dt(2015, 1, 1, 0)),
            // opened before C3 was born
            account("A3", "C3", dt(2005, 1, 1, 0)),
        ],
        transactions: vec![],
    });
    let ids: Vec<&str> = out
        .customers
        .iter()
        .map(|c| c.customer_id.as_str())
        .collect();
    assert_eq!(ids, vec!["C1"]);
    assert_eq!(out.report.customers_removed, 2);
}

#[test]
fn test_every_kept_customer_has_kept_account() {
    let out = clean(SourceSnapshot {
        customers: vec![
            customer("C1", (1990, 1, 1)),
            customer("C2", (1985, 6, 1)),
            customer("C3", (2001, 3, 3)),
        ],
        accounts: vec![
            account("A1", "C1", dt(1989, 1, 1, 0)),
            account("A2", "C2", dt(2010, 1, 1, 0)),
            account("A3", "C3", dt(2020, 1, 1, 0)),
            account("A4", "C1", dt(2012, 1, 1, 0)),
        ],
        transactions: vec![],
    });
    for c in &out.customers {
        assert!(out.accounts.iter().any(|a| a.customer_id == c.customer_id));
    }
    for a in &out.accounts {
        let owner = out
            .customers
            .iter()
            .find(|c| c.customer_id == a.customer_id)
            .unwrap();
        assert!(a.open_date > owner.birth_date.and_time(chrono::NaiveTime::MIN));
    }
}

// ── Transactions ──────────────────────────────────────────────

#[test]
fn test_transaction_at_open_instant_is_kept() {
    let opened = dt(2021, 1, 1, 0);
    let out = clean(SourceSnapshot {
        customers: vec![customer("C1", (2000, 1, 1))],
        accounts: vec![account("A1", "C1", opened)],
        transactions: vec![txn("T1", "A1", opened)],
    });
    assert_eq!(out.transactions.len(), 1);
    assert_eq!(out.report.transactions_removed, 0);
}

#[test]
fn test_transaction_on_removed_account_is_dropped() {
    let out = clean(SourceSnapshot {
        customers: vec![customer("C1", (2000, 1, 1))],
        accounts: vec![account("A1", "C1", dt(1999, 1, 1, 0))],
        transactions: vec![txn("T1", "A1", dt(2022, 1, 1, 0))],
    });
    assert!(out.transactions.is_empty());
    assert_eq!(out.report.transactions_removed, 1);
}

#[test]
fn test_end_to_end_cleaning_scenario() {
    let out = clean(SourceSnapshot {
        customers: vec![customer("C1", (2000, 1, 1))],
        accounts: vec![
            account("A_BAD", "C1", dt(1999, 1, 1, 0)),
            account("A_OK", "C1", dt(2021, 1, 1, 0)),
        ],
        transactions: vec![
            txn("T_EARLY", "A_OK", dt(2020, 1, 1, 0)),
            txn("T_OK", "A_OK", dt(2022, 1, 1, 0)),
        ],
    });
    assert_eq!(out.accounts.len(), 1);
    assert_eq!(out.accounts[0].account_id, "A_OK");
    assert_eq!(out.customers.len(), 1);
    assert_eq!(out.transactions.len(), 1);
    assert_eq!(out.transactions[0].transaction_id, "T_OK");
}

#[test]
fn test_account_check_is_against_birth_date_only() {
    // A 2019 account for a customer born in 2000 is consistent, even when
    // another of the customer's accounts is newer
    let out = clean(SourceSnapshot {
        customers: vec![customer("C1", (2000, 1, 1))],
        accounts: vec![
            account("A_2019", "C1", dt(2019, 1, 1, 0)),
            account("A_2021", "C1", dt(2021, 1, 1, 0)),
        ],
        transactions: vec![txn("T1", "A_2019", dt(2020, 1, 1, 0))],
    });
    assert_eq!(out.accounts.len(), 2);
    assert_eq!(out.transactions.len(), 1);
}

#[test]
fn test_clean_empty_snapshot() {
    let out = clean(SourceSnapshot::default());
    assert!(out.customers.is_empty());
    assert_eq!(out.report, CleanReport::default());
}
