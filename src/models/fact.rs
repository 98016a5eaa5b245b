use rust_decimal::Decimal;

/// One row of `Fact_Spending`, in its fixed column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactSpending {
    pub date_key: i64,
    pub customer_key: i64,
    pub account_key: i64,
    pub merchant_key: i64,
    pub location_key: i64,
    pub amount_spent: Decimal,
    pub transaction_count: i64,
}

/// Aggregate row for the monthly trend report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySpending {
    pub year: i32,
    pub month: u32,
    pub total: Decimal,
}

impl MonthlySpending {
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}
