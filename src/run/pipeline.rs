use anyhow::{Context, Result};

use crate::categorize::CategoryClassifier;
use crate::config::EtlConfig;
use crate::db::Database;
use crate::import::load_merchant_rules;
use crate::transform::{
    assemble_facts, build_dimensions, clean, CleanReport, ResolveAudit, SourceSnapshot,
    SurrogateKeys,
};

/// Row counts gathered across one ETL run.
#[derive(Debug, Clone, Default)]
pub(crate) struct RunSummary {
    pub(crate) customers_extracted: usize,
    pub(crate) accounts_extracted: usize,
    pub(crate) transactions_extracted: usize,
    pub(crate) mapping_rules: usize,
    pub(crate) clean: CleanReport,
    pub(crate) dim_dates: usize,
    pub(crate) dim_customers: usize,
    pub(crate) dim_accounts: usize,
    pub(crate) dim_merchants: usize,
    pub(crate) dim_locations: usize,
    pub(crate) audit: ResolveAudit,
    pub(crate) facts_loaded: usize,
}

/// Extract, transform and load one full snapshot.
///
/// Dimensions are persisted first; fact rows are only assembled once the
/// store-assigned surrogate keys have been read back. A failure after the
/// dimension load leaves dimensions without facts; rerunning replaces both.
pub(crate) fn run_etl(db: &mut Database, config: &EtlConfig) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    // Extract
    let rules = load_merchant_rules(&config.mapping_path)?;
    let classifier = CategoryClassifier::new(&rules).context("Failed to build category rules")?;
    summary.mapping_rules = classifier.rule_count();

    let snapshot = SourceSnapshot {
        customers: db.get_customers()?,
        accounts: db.get_accounts()?,
        transactions: db.get_transactions()?,
    };
    summary.customers_extracted = snapshot.customers.len();
    summary.accounts_extracted = snapshot.accounts.len();
    summary.transactions_extracted = snapshot.transactions.len();
    log::info!(
        "Extracted {} customers, {} accounts, {} transactions, {} mapping rules",
        summary.customers_extracted,
        summary.accounts_extracted,
        summary.transactions_extracted,
        summary.mapping_rules
    );
    for c in snapshot.customers.iter().take(5) {
        log::debug!("customer {} {} born {}", c.customer_id, c.full_name(), c.birth_date);
    }

    // Transform
    let cleaned = clean(snapshot);
    summary.clean = cleaned.report;
    let dims = build_dimensions(&cleaned, &classifier, config.as_of.date());

    // Load, phase 1: dimensions
    db.clear_warehouse().context("Failed to clear warehouse tables")?;
    summary.dim_dates = db.insert_dim_dates(&dims.dates)?;
    summary.dim_customers = db.insert_dim_customers(&dims.customers)?;
    summary.dim_accounts = db.insert_dim_accounts(&dims.accounts)?;
    summary.dim_merchants = db.insert_dim_merchants(&dims.merchants)?;
    summary.dim_locations = db.insert_dim_locations(&dims.locations)?;

    // Phase 2: surrogate keys, then facts
    let keys = SurrogateKeys::read(db)?;
    let (facts, audit) = assemble_facts(&cleaned.transactions, &keys);
    summary.audit = audit;
    summary.facts_loaded = db.insert_facts(&facts)?;

    log::info!("ETL finished: {} fact rows loaded", summary.facts_loaded);
    Ok(summary)
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
