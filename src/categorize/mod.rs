use anyhow::Result;
use regex::Regex;
use std::collections::HashMap;

use crate::models::{MerchantCategoryRule, Transaction};

pub(crate) const DINING: &str = "Dining & Coffee";
pub(crate) const SHOPPING: &str = "Shopping";
pub(crate) const TRANSPORT: &str = "Transport";
pub(crate) const BILLS: &str = "Bills & Utilities";
pub(crate) const ENTERTAINMENT: &str = "Entertainment & Travel";
pub(crate) const GROCERIES: &str = "Groceries";
pub(crate) const OTHER_TRANSFER: &str = "Other transfer";

/// Keyword sets checked in order against the lower-cased transfer description.
/// Matching is plain substring, so "an" also fires inside "ban" or "thanh".
const KEYWORD_SETS: &[(&str, &[&str])] = &[
    (
        DINING,
        &["an", "com", "pho", "bun", "cafe", "nuoc", "tra sua", "nhau"],
    ),
    (
        SHOPPING,
        &["mua", "shop", "quan", "ao", "giay", "tui", "my pham", "son", "vay"],
    ),
    (TRANSPORT, &["xe", "grab", "xang", "ship", "taxi", "di lai"]),
    (
        BILLS,
        &["dien", "mang", "wifi", "nha", "hoc", "nuoc", "phi", "internet"],
    ),
    (
        ENTERTAINMENT,
        &["phim", "du lich", "ve", "spa", "game", "homestay", "karaoke"],
    ),
    (
        GROCERIES,
        &["tap hoa", "rau", "qua", "gao", "sieu thi", "banh", "keo"],
    ),
];

pub(crate) struct CategoryClassifier {
    by_merchant: HashMap<String, String>,
    keyword_rules: Vec<CompiledKeywords>,
}

struct CompiledKeywords {
    regex: Regex,
    category: &'static str,
}

impl CategoryClassifier {
    pub(crate) fn new(rules: &[MerchantCategoryRule]) -> Result<Self> {
        let mut by_merchant = HashMap::with_capacity(rules.len());
        for rule in rules {
            // First row for a merchant wins, later duplicates are ignored.
            by_merchant
                .entry(rule.merchant_name.clone())
                .or_insert_with(|| rule.category.clone());
        }

        let keyword_rules = KEYWORD_SETS
            .iter()
            .map(|&(category, words)| -> Result<CompiledKeywords> {
                let alternation = words
                    .iter()
                    .map(|w| regex::escape(w))
                    .collect::<Vec<_>>()
                    .join("|");
                Ok(CompiledKeywords {
                    regex: Regex::new(&alternation)?,
                    category,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            by_merchant,
            keyword_rules,
        })
    }

    /// Category for a transaction: exact merchant lookup first, then the
    /// description keywords, then `OTHER_TRANSFER`.
    pub(crate) fn classify(&self, txn: &Transaction) -> &str {
        self.classify_parts(txn.merchant_name.as_deref(), txn.description_text())
    }

    pub(crate) fn classify_parts(&self, merchant_name: Option<&str>, description: &str) -> &str {
        if let Some(category) = merchant_name.and_then(|m| self.by_merchant.get(m)) {
            return category;
        }

        let desc_lower = description.to_lowercase();
        self.keyword_rules
            .iter()
            .find(|rule| rule.regex.is_match(&desc_lower))
            .map(|rule| rule.category)
            .unwrap_or(OTHER_TRANSFER)
    }

    pub(crate) fn rule_count(&self) -> usize {
        self.by_merchant.len()
    }
}

#[cfg(test)]
mod tests;
