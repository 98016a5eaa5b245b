mod schema;

use rusqlite::types::{Type, ValueRef};
use rusqlite::{params, Connection, Row, Statement};
use rust_decimal::Decimal;
use std::path::Path;

use crate::error::{EtlError, EtlResult};
use crate::import::{parse_amount, parse_date, parse_datetime};
use crate::models::*;

pub(crate) use schema::WAREHOUSE_TABLES;

const DATE_FMT: &str = "%Y-%m-%d";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Surrogate key paired with the business key it was assigned to.
pub(crate) type KeyPair = (i64, String);

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> EtlResult<Self> {
        let conn = Connection::open(path).map_err(|source| EtlError::Connect {
            path: path.to_path_buf(),
            source,
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .map_err(|source| EtlError::Connect {
                path: path.to_path_buf(),
                source,
            })?;
        let db = Self { conn };
        db.ensure_schema()?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> EtlResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let db = Self { conn };
        db.ensure_schema()?;
        Ok(db)
    }

    fn ensure_schema(&self) -> EtlResult<()> {
        self.conn
            .execute_batch(schema::SOURCE_SCHEMA)
            .map_err(EtlError::Schema)?;
        self.conn
            .execute_batch(schema::WAREHOUSE_SCHEMA)
            .map_err(EtlError::Schema)?;
        Ok(())
    }

    pub(crate) fn count_rows(&self, table: &str) -> EtlResult<i64> {
        Ok(self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?)
    }

    // ── Extract ───────────────────────────────────────────────

    pub(crate) fn get_customers(&self) -> EtlResult<Vec<Customer>> {
        self.extract(
            "tbl_Customers",
            "SELECT CustomerID, FirstName, LastName, BirthDate, Gender, City, Country
             FROM tbl_Customers ORDER BY rowid",
            |row| {
                Ok(Customer {
                    customer_id: key_text(row, 0)?,
                    first_name: opt_text(row, 1)?.unwrap_or_default(),
                    last_name: opt_text(row, 2)?.unwrap_or_default(),
                    birth_date: parsed(row, 3, parse_date)?,
                    gender: opt_text(row, 4)?.unwrap_or_default(),
                    city: opt_text(row, 5)?.unwrap_or_default(),
                    country: opt_text(row, 6)?.unwrap_or_default(),
                })
            },
        )
    }

    pub(crate) fn get_accounts(&self) -> EtlResult<Vec<Account>> {
        self.extract(
            "tbl_Accounts",
            "SELECT AccountID, CustomerID, AccountType, OpenDate FROM tbl_Accounts ORDER BY rowid",
            |row| {
                Ok(Account {
                    account_id: key_text(row, 0)?,
                    customer_id: key_text(row, 1)?,
                    account_type: opt_text(row, 2)?.unwrap_or_default(),
                    open_date: parsed(row, 3, parse_datetime)?,
                })
            },
        )
    }

    pub(crate) fn get_transactions(&self) -> EtlResult<Vec<Transaction>> {
        self.extract(
            "tbl_Transactions",
            "SELECT TransactionID, AccountID, MerchantName, Amount, TransactionTimestamp,
                    TransactionCountry, BeneficiaryName, TransactionDescription
             FROM tbl_Transactions ORDER BY rowid",
            |row| {
                Ok(Transaction {
                    transaction_id: key_text(row, 0)?,
                    account_id: key_text(row, 1)?,
                    merchant_name: opt_text(row, 2)?,
                    amount: amount_value(row, 3)?,
                    timestamp: parsed(row, 4, parse_datetime)?,
                    country: opt_text(row, 5)?.unwrap_or_default(),
                    beneficiary_name: opt_text(row, 6)?,
                    description: opt_text(row, 7)?,
                })
            },
        )
    }

    /// Account -> owner mapping straight from the source relation.
    pub(crate) fn get_account_owners(&self) -> EtlResult<Vec<AccountOwner>> {
        self.extract(
            "tbl_Accounts",
            "SELECT AccountID, CustomerID FROM tbl_Accounts",
            |row| {
                Ok(AccountOwner {
                    account_id: key_text(row, 0)?,
                    customer_id: key_text(row, 1)?,
                })
            },
        )
    }

    fn extract<T>(
        &self,
        table: &'static str,
        sql: &str,
        map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
    ) -> EtlResult<Vec<T>> {
        let failed = |e: rusqlite::Error| EtlError::Extract {
            table,
            reason: e.to_string(),
        };
        let mut stmt = self.conn.prepare(sql).map_err(failed)?;
        let rows = stmt.query_map([], map).map_err(failed)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(failed)
    }

    // ── Load ──────────────────────────────────────────────────

    /// Empty every warehouse relation so a run loads a fresh snapshot.
    pub(crate) fn clear_warehouse(&mut self) -> EtlResult<()> {
        let tx = self.conn.transaction()?;
        for table in WAREHOUSE_TABLES {
            tx.execute(&format!("DELETE FROM {table}"), [])?;
        }
        tx.commit()?;
        Ok(())
    }

    pub(crate) fn insert_dim_dates(&mut self, rows: &[DimDate]) -> EtlResult<usize> {
        self.append(
            "Dim_Date",
            "INSERT INTO Dim_Date (Date_Key, Full_Date, Hour_Of_Day, Day_Of_Week, Day_Name,
                                   Is_Weekend, Month, Month_Name, Quarter, Year)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rows,
            |stmt, d| {
                stmt.execute(params![
                    d.date_key,
                    d.full_date.format(DATE_FMT).to_string(),
                    d.hour_of_day,
                    d.day_of_week,
                    d.day_name,
                    d.is_weekend,
                    d.month,
                    d.month_name,
                    d.quarter,
                    d.year,
                ])
            },
        )
    }

    pub(crate) fn insert_dim_customers(&mut self, rows: &[DimCustomer]) -> EtlResult<usize> {
        self.append(
            "Dim_Customer",
            "INSERT INTO Dim_Customer (CustomerID_Source, CustomerName, Age_Group, Gender,
                                       City, Country, BirthDate)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rows,
            |stmt, c| {
                stmt.execute(params![
                    c.customer_id_source,
                    c.customer_name,
                    c.age_group.as_str(),
                    c.gender,
                    c.city,
                    c.country,
                    c.birth_date.format(DATE_FMT).to_string(),
                ])
            },
        )
    }

    pub(crate) fn insert_dim_accounts(&mut self, rows: &[DimAccount]) -> EtlResult<usize> {
        self.append(
            "Dim_Account",
            "INSERT INTO Dim_Account (AccountID_Source, Account_Type, Account_Open_Date)
             VALUES (?1, ?2, ?3)",
            rows,
            |stmt, a| {
                stmt.execute(params![
                    a.account_id_source,
                    a.account_type,
                    a.open_date.format(DATETIME_FMT).to_string(),
                ])
            },
        )
    }

    pub(crate) fn insert_dim_merchants(&mut self, rows: &[DimMerchant]) -> EtlResult<usize> {
        self.append(
            "Dim_Merchant",
            "INSERT INTO Dim_Merchant (MerchantName_Source, Category) VALUES (?1, ?2)",
            rows,
            |stmt, m| stmt.execute(params![m.merchant_name_source, m.category]),
        )
    }

    pub(crate) fn insert_dim_locations(&mut self, rows: &[DimLocation]) -> EtlResult<usize> {
        self.append(
            "Dim_Location",
            "INSERT INTO Dim_Location (Transaction_Country, Transaction_Region) VALUES (?1, ?2)",
            rows,
            |stmt, l| stmt.execute(params![l.country, l.region.as_str()]),
        )
    }

    pub(crate) fn insert_facts(&mut self, rows: &[FactSpending]) -> EtlResult<usize> {
        self.append(
            "Fact_Spending",
            "INSERT INTO Fact_Spending (Date_Key, Customer_Key, Account_Key, Merchant_Key,
                                        Location_Key, Amount_Spent, Transaction_Count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rows,
            |stmt, f| {
                stmt.execute(params![
                    f.date_key,
                    f.customer_key,
                    f.account_key,
                    f.merchant_key,
                    f.location_key,
                    f.amount_spent.to_string(),
                    f.transaction_count,
                ])
            },
        )
    }

    /// Append all rows to `table` in one transaction. Any failure aborts the
    /// whole relation.
    fn append<T>(
        &mut self,
        table: &'static str,
        sql: &str,
        rows: &[T],
        mut bind: impl FnMut(&mut Statement<'_>, &T) -> rusqlite::Result<usize>,
    ) -> EtlResult<usize> {
        log::info!("Loading {} rows into {table}", rows.len());
        let failed = |source| EtlError::Load { table, source };

        let tx = self.conn.transaction().map_err(failed)?;
        {
            let mut stmt = tx.prepare(sql).map_err(failed)?;
            for row in rows {
                bind(&mut stmt, row).map_err(failed)?;
            }
        }
        tx.commit().map_err(failed)?;
        Ok(rows.len())
    }

    // ── Key re-read ───────────────────────────────────────────

    pub(crate) fn get_date_keys(&self) -> EtlResult<Vec<i64>> {
        let mut stmt = self.conn.prepare("SELECT Date_Key FROM Dim_Date")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub(crate) fn get_customer_keys(&self) -> EtlResult<Vec<KeyPair>> {
        self.key_pairs("SELECT Customer_Key, CustomerID_Source FROM Dim_Customer")
    }

    pub(crate) fn get_account_keys(&self) -> EtlResult<Vec<KeyPair>> {
        self.key_pairs("SELECT Account_Key, AccountID_Source FROM Dim_Account")
    }

    pub(crate) fn get_merchant_keys(&self) -> EtlResult<Vec<KeyPair>> {
        self.key_pairs("SELECT Merchant_Key, MerchantName_Source FROM Dim_Merchant")
    }

    pub(crate) fn get_location_keys(&self) -> EtlResult<Vec<KeyPair>> {
        self.key_pairs("SELECT Location_Key, Transaction_Country FROM Dim_Location")
    }

    fn key_pairs(&self, sql: &str) -> EtlResult<Vec<KeyPair>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // ── Reporting ─────────────────────────────────────────────

    /// Total spend per calendar month, oldest first.
    pub(crate) fn monthly_spending(&self) -> EtlResult<Vec<MonthlySpending>> {
        let mut stmt = self.conn.prepare(
            "SELECT d.Year, d.Month, CAST(SUM(f.Amount_Spent) AS TEXT)
             FROM Fact_Spending f
             JOIN Dim_Date d ON f.Date_Key = d.Date_Key
             GROUP BY d.Year, d.Month
             ORDER BY d.Year, d.Month",
        )?;
        let rows = stmt.query_map([], |row| {
            let total: String = row.get(2)?;
            Ok(MonthlySpending {
                year: row.get(0)?,
                month: row.get(1)?,
                total: parse_amount(&total).unwrap_or_default(),
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Categories ranked by total spend, largest first.
    pub(crate) fn top_categories(&self, limit: usize) -> EtlResult<Vec<(String, Decimal)>> {
        self.grouped_totals(
            "SELECT m.Category, CAST(SUM(f.Amount_Spent) AS TEXT)
             FROM Fact_Spending f
             JOIN Dim_Merchant m ON f.Merchant_Key = m.Merchant_Key
             GROUP BY m.Category
             ORDER BY SUM(f.Amount_Spent) DESC, m.Category
             LIMIT ?1",
            limit as i64,
        )
    }

    pub(crate) fn spending_by_age_group(&self) -> EtlResult<Vec<(String, Decimal)>> {
        self.grouped_totals(
            "SELECT c.Age_Group, CAST(SUM(f.Amount_Spent) AS TEXT)
             FROM Fact_Spending f
             JOIN Dim_Customer c ON f.Customer_Key = c.Customer_Key
             GROUP BY c.Age_Group
             ORDER BY SUM(f.Amount_Spent) DESC, c.Age_Group
             LIMIT ?1",
            -1,
        )
    }

    fn grouped_totals(&self, sql: &str, limit: i64) -> EtlResult<Vec<(String, Decimal)>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params![limit], |row| {
            let name: String = row.get(0)?;
            let total: String = row.get(1)?;
            Ok((name, parse_amount(&total).unwrap_or_default()))
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // ── Source fixtures ───────────────────────────────────────

    #[cfg(test)]
    pub(crate) fn insert_source_customer(&self, c: &Customer) -> EtlResult<()> {
        self.conn.execute(
            "INSERT INTO tbl_Customers (CustomerID, FirstName, LastName, BirthDate, Gender, City, Country)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                c.customer_id,
                c.first_name,
                c.last_name,
                c.birth_date.format(DATE_FMT).to_string(),
                c.gender,
                c.city,
                c.country,
            ],
        )?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn insert_source_account(&self, a: &Account) -> EtlResult<()> {
        self.conn.execute(
            "INSERT INTO tbl_Accounts (AccountID, CustomerID, AccountType, OpenDate)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                a.account_id,
                a.customer_id,
                a.account_type,
                a.open_date.format(DATETIME_FMT).to_string(),
            ],
        )?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn insert_source_transaction(&self, t: &Transaction) -> EtlResult<()> {
        self.conn.execute(
            "INSERT INTO tbl_Transactions (TransactionID, AccountID, MerchantName, Amount,
                                           TransactionTimestamp, TransactionCountry,
                                           BeneficiaryName, TransactionDescription)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                t.transaction_id,
                t.account_id,
                t.merchant_name,
                t.amount.to_string(),
                t.timestamp.format(DATETIME_FMT).to_string(),
                t.country,
                t.beneficiary_name,
                t.description,
            ],
        )?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn execute_raw(&self, sql: &str) -> EtlResult<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }
}

// ── Row decoding ──────────────────────────────────────────────

fn conversion_error(idx: usize, ty: Type, e: anyhow::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, ty, e.into())
}

/// Identifier columns may be stored as text or integers upstream.
fn key_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    match row.get_ref(idx)? {
        ValueRef::Integer(i) => Ok(i.to_string()),
        _ => row.get(idx),
    }
}

/// Trimmed like the mapping file, so exact merchant lookups line up. Empty
/// strings are treated the same as NULL.
fn opt_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    let value = match row.get_ref(idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        _ => row.get::<_, Option<String>>(idx)?,
    };
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

fn parsed<T>(
    row: &Row<'_>,
    idx: usize,
    parse: fn(&str) -> anyhow::Result<T>,
) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    parse(&raw).map_err(|e| conversion_error(idx, Type::Text, e))
}

fn amount_value(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    match row.get_ref(idx)? {
        ValueRef::Integer(i) => Ok(Decimal::from(i)),
        ValueRef::Real(f) => Decimal::try_from(f)
            .map_err(|e| conversion_error(idx, Type::Real, anyhow::anyhow!(e))),
        _ => parsed(row, idx, parse_amount),
    }
}
