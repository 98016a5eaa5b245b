use anyhow::Result;
use rust_decimal::Decimal;

use super::pipeline::RunSummary;
use crate::db::Database;
use crate::transform::Dimension;

const BILLION: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);
const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Compact rendering for chart-style totals.
/// e.g. `1_500_000_000` → `"1.5 B"`, `2_300_000` → `"2.3 M"`, `950_000` → `"950,000"`
pub(crate) fn format_compact(val: Decimal) -> String {
    if val >= BILLION {
        format!("{:.1} B", (val / BILLION).round_dp(1))
    } else if val >= MILLION {
        format!("{:.1} M", (val / MILLION).round_dp(1))
    } else {
        format_whole(val)
    }
}

/// Whole-number amount with thousand separators.
pub(crate) fn format_whole(val: Decimal) -> String {
    let rounded = val.abs().round_dp(0).to_string();
    let with_commas: String = rounded
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val.round_dp(0) < Decimal::ZERO {
        format!("-{with_commas}")
    } else {
        with_commas
    }
}

pub(crate) fn print_run_summary(summary: &RunSummary) {
    println!("ETL run");
    println!("{}", "─".repeat(48));
    println!("Extracted");
    println!("  Customers:          {}", summary.customers_extracted);
    println!("  Accounts:           {}", summary.accounts_extracted);
    println!("  Transactions:       {}", summary.transactions_extracted);
    println!("  Mapping rules:      {}", summary.mapping_rules);
    println!("Cleaned (removed)");
    println!("  Accounts:           {}", summary.clean.accounts_removed);
    println!("  Customers:          {}", summary.clean.customers_removed);
    println!("  Transactions:       {}", summary.clean.transactions_removed);
    println!("Dimensions loaded");
    println!("  Dim_Date:           {}", summary.dim_dates);
    println!("  Dim_Customer:       {}", summary.dim_customers);
    println!("  Dim_Account:        {}", summary.dim_accounts);
    println!("  Dim_Merchant:       {}", summary.dim_merchants);
    println!("  Dim_Location:       {}", summary.dim_locations);
    println!("Facts");
    println!("  Rows in:            {}", summary.audit.rows_in);
    println!("  Rows loaded:        {}", summary.facts_loaded);
    if summary.audit.dropped() > 0 {
        println!("  Dropped:            {}", summary.audit.dropped());
        for &dim in Dimension::all() {
            let n = summary.audit.unresolved_for(dim);
            if n > 0 {
                println!("    no {:<16}{n}", dim.as_str());
            }
        }
    }
}

pub(crate) fn print_reports(db: &Database, top_n: usize) -> Result<()> {
    let facts = db.count_rows("Fact_Spending")?;
    if facts == 0 {
        println!("Fact_Spending is empty. Run `bankdw run` first.");
        return Ok(());
    }

    println!("Monthly spending trend");
    println!("{}", "─".repeat(40));
    for m in db.monthly_spending()? {
        println!("  {:<10} {:>16}", m.label(), format_compact(m.total));
    }

    println!();
    println!("Top {top_n} categories");
    println!("{}", "─".repeat(40));
    for (category, total) in db.top_categories(top_n)? {
        println!("  {category:<24} {:>12}", format_compact(total));
    }

    println!();
    println!("Spending by age group");
    println!("{}", "─".repeat(40));
    for (group, total) in db.spending_by_age_group()? {
        println!("  {group:<22} {:>14}", format_compact(total));
    }
    Ok(())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
