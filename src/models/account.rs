use chrono::NaiveDateTime;

/// A row of `tbl_Accounts`. `account_type` is carried verbatim from the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub account_id: String,
    pub customer_id: String,
    pub account_type: String,
    pub open_date: NaiveDateTime,
}

/// Account -> owner pair as re-read from the source relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountOwner {
    pub account_id: String,
    pub customer_id: String,
}
