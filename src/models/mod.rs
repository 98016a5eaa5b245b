mod account;
mod customer;
mod dimension;
mod fact;
mod merchant_rule;
mod transaction;

pub use account::{Account, AccountOwner};
pub use customer::Customer;
pub use dimension::{AgeGroup, DimAccount, DimCustomer, DimDate, DimLocation, DimMerchant, Region};
pub use fact::{FactSpending, MonthlySpending};
pub use merchant_rule::MerchantCategoryRule;
pub use transaction::Transaction;
