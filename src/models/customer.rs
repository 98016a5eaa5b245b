use chrono::NaiveDate;

/// A row of `tbl_Customers`.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub city: String,
    pub country: String,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whole years lived at `as_of`, counted as elapsed days / 365.
    pub fn age_at(&self, as_of: NaiveDate) -> i64 {
        (as_of - self.birth_date).num_days().div_euclid(365)
    }
}
