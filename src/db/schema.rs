/// Operational tables the warehouse is extracted from.
pub(crate) const SOURCE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tbl_Customers (
    CustomerID  TEXT PRIMARY KEY,
    FirstName   TEXT NOT NULL DEFAULT '',
    LastName    TEXT NOT NULL DEFAULT '',
    BirthDate   TEXT NOT NULL,
    Gender      TEXT NOT NULL DEFAULT '',
    City        TEXT NOT NULL DEFAULT '',
    Country     TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS tbl_Accounts (
    AccountID   TEXT PRIMARY KEY,
    CustomerID  TEXT NOT NULL,
    AccountType TEXT NOT NULL DEFAULT '',
    OpenDate    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tbl_Transactions (
    TransactionID          TEXT PRIMARY KEY,
    AccountID              TEXT NOT NULL,
    MerchantName           TEXT,
    Amount                 TEXT NOT NULL,
    TransactionTimestamp   TEXT NOT NULL,
    TransactionCountry     TEXT NOT NULL DEFAULT '',
    BeneficiaryName        TEXT,
    TransactionDescription TEXT
);

CREATE INDEX IF NOT EXISTS idx_accounts_customer ON tbl_Accounts(CustomerID);
CREATE INDEX IF NOT EXISTS idx_transactions_account ON tbl_Transactions(AccountID);
"#;

/// Star schema. Dimension surrogate keys are assigned on insert.
pub(crate) const WAREHOUSE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS Dim_Date (
    Date_Key     INTEGER PRIMARY KEY,
    Full_Date    TEXT NOT NULL,
    Hour_Of_Day  INTEGER NOT NULL,
    Day_Of_Week  INTEGER NOT NULL,
    Day_Name     TEXT NOT NULL,
    Is_Weekend   BOOLEAN NOT NULL,
    Month        INTEGER NOT NULL,
    Month_Name   TEXT NOT NULL,
    Quarter      INTEGER NOT NULL,
    Year         INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS Dim_Customer (
    Customer_Key       INTEGER PRIMARY KEY AUTOINCREMENT,
    CustomerID_Source  TEXT NOT NULL,
    CustomerName       TEXT NOT NULL,
    Age_Group          TEXT NOT NULL,
    Gender             TEXT NOT NULL,
    City               TEXT NOT NULL,
    Country            TEXT NOT NULL,
    BirthDate          TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS Dim_Account (
    Account_Key        INTEGER PRIMARY KEY AUTOINCREMENT,
    AccountID_Source   TEXT NOT NULL,
    Account_Type       TEXT NOT NULL,
    Account_Open_Date  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS Dim_Merchant (
    Merchant_Key         INTEGER PRIMARY KEY AUTOINCREMENT,
    MerchantName_Source  TEXT NOT NULL,
    Category             TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS Dim_Location (
    Location_Key         INTEGER PRIMARY KEY AUTOINCREMENT,
    Transaction_Country  TEXT NOT NULL,
    Transaction_Region   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS Fact_Spending (
    Date_Key           INTEGER NOT NULL REFERENCES Dim_Date(Date_Key),
    Customer_Key       INTEGER NOT NULL REFERENCES Dim_Customer(Customer_Key),
    Account_Key        INTEGER NOT NULL REFERENCES Dim_Account(Account_Key),
    Merchant_Key       INTEGER NOT NULL REFERENCES Dim_Merchant(Merchant_Key),
    Location_Key       INTEGER NOT NULL REFERENCES Dim_Location(Location_Key),
    Amount_Spent       TEXT NOT NULL,
    Transaction_Count  INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_fact_date ON Fact_Spending(Date_Key);
CREATE INDEX IF NOT EXISTS idx_fact_customer ON Fact_Spending(Customer_Key);
CREATE INDEX IF NOT EXISTS idx_fact_merchant ON Fact_Spending(Merchant_Key);
"#;

/// Fact first so foreign keys never dangle while clearing.
pub(crate) const WAREHOUSE_TABLES: &[&str] = &[
    "Fact_Spending",
    "Dim_Date",
    "Dim_Customer",
    "Dim_Account",
    "Dim_Merchant",
    "Dim_Location",
];
