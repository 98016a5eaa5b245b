#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::{MerchantCategoryRule, Transaction};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn make_rules() -> Vec<MerchantCategoryRule> {
    vec![
        MerchantCategoryRule::new("Cafe ABC", "Dining"),
        MerchantCategoryRule::new("Circle K", "Groceries"),
    ]
}

fn make_txn(merchant: Option<&str>, desc: Option<&str>) -> Transaction {
    Transaction {
        transaction_id: "T1".into(),
        account_id: "A1".into(),
        merchant_name: merchant.map(String::from),
        amount: dec!(50000),
        timestamp: NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
        country: "Vietnam".into(),
        beneficiary_name: if merchant.is_none() {
            Some("Le Hoa".into())
        } else {
            None
        },
        description: desc.map(String::from),
    }
}

// ── Reference lookup ──────────────────────────────────────────

#[test]
fn test_merchant_rule_wins_over_description() {
    let c = CategoryClassifier::new(&make_rules()).unwrap();
    let txn = make_txn(Some("Cafe ABC"), Some("mua giay"));
    assert_eq!(c.classify(&txn), "Dining");
}

#[test]
fn test_merchant_lookup_is_exact() {
    let c = CategoryClassifier::new(&make_rules()).unwrap();
    // Different case is not a match, so the description decides
    assert_eq!(c.classify_parts(Some("cafe abc"), "mua giay"), SHOPPING);
    assert_eq!(c.classify_parts(Some("Cafe ABC "), ""), OTHER_TRANSFER);
}

#[test]
fn test_unknown_merchant_falls_back_to_description() {
    let c = CategoryClassifier::new(&make_rules()).unwrap();
    let txn = make_txn(Some("Unknown Store"), Some("grab"));
    assert_eq!(c.classify(&txn), TRANSPORT);
}

#[test]
fn test_duplicate_rules_first_wins() {
    let rules = vec![
        MerchantCategoryRule::new("Cafe ABC", "Dining"),
        MerchantCategoryRule::new("Cafe ABC", "Shopping"),
    ];
    let c = CategoryClassifier::new(&rules).unwrap();
    assert_eq!(c.classify_parts(Some("Cafe ABC"), ""), "Dining");
    assert_eq!(c.rule_count(), 1);
}

// ── Keyword heuristics ────────────────────────────────────────

#[test]
fn test_transfer_dining_keyword() {
    let c = CategoryClassifier::new(&make_rules()).unwrap();
    let txn = make_txn(None, Some("an com trua"));
    assert_eq!(c.classify(&txn), DINING);
}

#[test]
fn test_each_keyword_set() {
    let c = CategoryClassifier::new(&[]).unwrap();
    assert_eq!(c.classify_parts(None, "mua giay"), SHOPPING);
    assert_eq!(c.classify_parts(None, "grab"), TRANSPORT);
    assert_eq!(c.classify_parts(None, "dien thoai"), BILLS);
    assert_eq!(c.classify_parts(None, "game"), ENTERTAINMENT);
    assert_eq!(c.classify_parts(None, "rau"), GROCERIES);
}

#[test]
fn test_description_case_insensitive() {
    let c = CategoryClassifier::new(&[]).unwrap();
    assert_eq!(c.classify_parts(None, "AN COM TRUA"), DINING);
    assert_eq!(c.classify_parts(None, "Tra Sua"), DINING);
}

#[test]
fn test_first_keyword_set_wins() {
    let c = CategoryClassifier::new(&[]).unwrap();
    // "nuoc" is in both the dining and bills sets
    assert_eq!(c.classify_parts(None, "tien nuoc"), DINING);
}

#[test]
fn test_substring_false_positives_are_kept() {
    let c = CategoryClassifier::new(&[]).unwrap();
    // "xem" contains "xe", so a cinema transfer lands in transport
    assert_eq!(c.classify_parts(None, "xem phim"), TRANSPORT);
    // "thang" contains "an"
    assert_eq!(c.classify_parts(None, "tien dien thang 10"), DINING);
}

#[test]
fn test_no_keyword_is_other_transfer() {
    let c = CategoryClassifier::new(&[]).unwrap();
    assert_eq!(c.classify_parts(None, "chuyen tien"), OTHER_TRANSFER);
    assert_eq!(c.classify_parts(None, ""), OTHER_TRANSFER);
}

#[test]
fn test_missing_description_is_other_transfer() {
    let c = CategoryClassifier::new(&[]).unwrap();
    let txn = make_txn(None, None);
    assert_eq!(c.classify(&txn), OTHER_TRANSFER);
}

#[test]
fn test_unmapped_card_without_description_is_other_transfer() {
    // A missing description never reads as text, so no keyword can fire
    let c = CategoryClassifier::new(&make_rules()).unwrap();
    let txn = make_txn(Some("Unknown Mart"), None);
    assert_eq!(c.classify(&txn), OTHER_TRANSFER);
    assert_eq!(c.classify_parts(Some("Unknown Mart"), ""), OTHER_TRANSFER);
}

#[test]
fn test_unmapped_card_falls_back_to_description_keywords() {
    let c = CategoryClassifier::new(&make_rules()).unwrap();
    let txn = make_txn(Some("Unknown Mart"), Some("mua rau"));
    assert_eq!(c.classify(&txn), SHOPPING);
}

#[test]
fn test_classification_is_pure() {
    let c = CategoryClassifier::new(&make_rules()).unwrap();
    let txn = make_txn(None, Some("mua ao"));
    let first = c.classify(&txn).to_string();
    for _ in 0..3 {
        assert_eq!(c.classify(&txn), first);
    }
}
