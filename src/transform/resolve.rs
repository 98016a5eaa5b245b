use std::collections::{HashMap, HashSet};

use super::dimensions::date_key;
use crate::db::{Database, KeyPair};
use crate::error::EtlResult;
use crate::models::{AccountOwner, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Dimension {
    Date,
    Customer,
    Account,
    Merchant,
    Location,
}

impl Dimension {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "Dim_Date",
            Self::Customer => "Dim_Customer",
            Self::Account => "Dim_Account",
            Self::Merchant => "Dim_Merchant",
            Self::Location => "Dim_Location",
        }
    }

    pub(crate) fn all() -> &'static [Dimension] {
        &[
            Self::Date,
            Self::Customer,
            Self::Account,
            Self::Merchant,
            Self::Location,
        ]
    }
}

/// The five foreign keys of one fact row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedKeys {
    pub(crate) date_key: i64,
    pub(crate) customer_key: i64,
    pub(crate) account_key: i64,
    pub(crate) merchant_key: i64,
    pub(crate) location_key: i64,
}

/// Row counts through the surrogate key joins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ResolveAudit {
    pub(crate) rows_in: usize,
    pub(crate) rows_out: usize,
    pub(crate) unresolved: HashMap<Dimension, usize>,
}

impl ResolveAudit {
    pub(crate) fn dropped(&self) -> usize {
        self.rows_in - self.rows_out
    }

    pub(crate) fn unresolved_for(&self, dim: Dimension) -> usize {
        self.unresolved.get(&dim).copied().unwrap_or(0)
    }
}

/// Business key -> surrogate key lookups, read back from the store after
/// the dimensions were persisted.
#[derive(Debug, Clone, Default)]
pub(crate) struct SurrogateKeys {
    dates: HashSet<i64>,
    customers: HashMap<String, i64>,
    accounts: HashMap<String, i64>,
    merchants: HashMap<String, i64>,
    locations: HashMap<String, i64>,
    owners: HashMap<String, String>,
}

impl SurrogateKeys {
    /// Re-read the keys the store assigned to every dimension row, plus the
    /// source account -> customer mapping.
    pub(crate) fn read(db: &Database) -> EtlResult<Self> {
        let keys = Self::from_pairs(
            db.get_date_keys()?,
            db.get_customer_keys()?,
            db.get_account_keys()?,
            db.get_merchant_keys()?,
            db.get_location_keys()?,
            db.get_account_owners()?,
        );
        log::info!(
            "Read back surrogate keys: {} dates, {} customers, {} accounts, {} merchants, {} locations",
            keys.dates.len(),
            keys.customers.len(),
            keys.accounts.len(),
            keys.merchants.len(),
            keys.locations.len()
        );
        Ok(keys)
    }

    pub(crate) fn from_pairs(
        dates: Vec<i64>,
        customers: Vec<KeyPair>,
        accounts: Vec<KeyPair>,
        merchants: Vec<KeyPair>,
        locations: Vec<KeyPair>,
        owners: Vec<AccountOwner>,
    ) -> Self {
        Self {
            dates: dates.into_iter().collect(),
            customers: index_pairs(Dimension::Customer, customers),
            accounts: index_pairs(Dimension::Account, accounts),
            merchants: index_pairs(Dimension::Merchant, merchants),
            locations: index_pairs(Dimension::Location, locations),
            owners: owners
                .into_iter()
                .map(|o| (o.account_id, o.customer_id))
                .collect(),
        }
    }

    /// Look up every foreign key of a transaction, in the same order the
    /// joins run: account, owner, customer, merchant, location, date. The
    /// first dimension that has no match is returned as the error.
    pub(crate) fn resolve(&self, txn: &Transaction) -> Result<ResolvedKeys, Dimension> {
        let account_key = *self
            .accounts
            .get(&txn.account_id)
            .ok_or(Dimension::Account)?;
        let customer_key = self
            .owners
            .get(&txn.account_id)
            .and_then(|customer_id| self.customers.get(customer_id))
            .copied()
            .ok_or(Dimension::Customer)?;
        let merchant_key = *self
            .merchants
            .get(txn.counterparty())
            .ok_or(Dimension::Merchant)?;
        let location_key = *self
            .locations
            .get(&txn.country)
            .ok_or(Dimension::Location)?;
        let date_key = date_key(&txn.timestamp);
        if !self.dates.contains(&date_key) {
            return Err(Dimension::Date);
        }

        Ok(ResolvedKeys {
            date_key,
            customer_key,
            account_key,
            merchant_key,
            location_key,
        })
    }
}

/// A business key loaded more than once keeps its newest (highest) key.
fn index_pairs(dim: Dimension, pairs: Vec<KeyPair>) -> HashMap<String, i64> {
    let mut map: HashMap<String, i64> = HashMap::with_capacity(pairs.len());
    let mut duplicates = 0usize;
    for (key, business_key) in pairs {
        match map.get_mut(&business_key) {
            Some(existing) => {
                duplicates += 1;
                *existing = (*existing).max(key);
            }
            None => {
                map.insert(business_key, key);
            }
        }
    }
    if duplicates > 0 {
        log::warn!(
            "{} holds {duplicates} duplicate business keys; using the newest surrogate key",
            dim.as_str()
        );
    }
    map
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
