use super::resolve::{ResolveAudit, SurrogateKeys};
use crate::models::{FactSpending, Transaction};

/// Build one fact row per cleaned transaction whose five foreign keys all
/// resolve. Unresolvable rows are dropped and counted in the audit.
pub(crate) fn assemble_facts(
    transactions: &[Transaction],
    keys: &SurrogateKeys,
) -> (Vec<FactSpending>, ResolveAudit) {
    let mut audit = ResolveAudit {
        rows_in: transactions.len(),
        ..Default::default()
    };
    let mut facts = Vec::with_capacity(transactions.len());

    for txn in transactions {
        match keys.resolve(txn) {
            Ok(k) => facts.push(FactSpending {
                date_key: k.date_key,
                customer_key: k.customer_key,
                account_key: k.account_key,
                merchant_key: k.merchant_key,
                location_key: k.location_key,
                amount_spent: txn.amount,
                transaction_count: 1,
            }),
            Err(dim) => *audit.unresolved.entry(dim).or_insert(0) += 1,
        }
    }
    audit.rows_out = facts.len();

    log::info!(
        "Fact assembly: {} transactions in, {} fact rows out",
        audit.rows_in,
        audit.rows_out
    );
    if audit.dropped() > 0 {
        let detail = audit
            .unresolved
            .iter()
            .map(|(dim, n)| format!("{}={n}", dim.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        log::warn!(
            "{} transactions had no matching dimension row and were left out of Fact_Spending ({detail})",
            audit.dropped()
        );
    }
    (facts, audit)
}

#[cfg(test)]
#[path = "fact_tests.rs"]
mod tests;
