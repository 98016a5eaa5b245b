use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// A row of `tbl_Transactions`.
///
/// Card purchases carry `merchant_name`; peer-to-peer transfers leave it empty
/// and carry `beneficiary_name` plus a free-text `description` instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub transaction_id: String,
    pub account_id: String,
    pub merchant_name: Option<String>,
    pub amount: Decimal,
    pub timestamp: NaiveDateTime,
    pub country: String,
    pub beneficiary_name: Option<String>,
    pub description: Option<String>,
}

impl Transaction {
    pub fn is_transfer(&self) -> bool {
        self.merchant_name.is_none()
    }

    /// Display name used for the merchant dimension: the merchant when
    /// present, otherwise the transfer beneficiary.
    pub fn counterparty(&self) -> &str {
        self.merchant_name
            .as_deref()
            .or(self.beneficiary_name.as_deref())
            .unwrap_or("")
    }

    /// Description for keyword matching. A missing one is empty, so it
    /// matches no keyword set.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}
