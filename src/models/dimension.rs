use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeGroup {
    Under18,
    Student,
    YoungAdult,
    MiddleAged,
    Senior,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Under18 => "< 18",
            Self::Student => "18-24 (Sinh viên)",
            Self::YoungAdult => "25-34 (Người đi làm)",
            Self::MiddleAged => "35-50 (Trung niên)",
            Self::Senior => "> 50 (Cao tuổi)",
        }
    }

    pub fn from_age(age: i64) -> Self {
        match age {
            i64::MIN..=17 => Self::Under18,
            18..=24 => Self::Student,
            25..=34 => Self::YoungAdult,
            35..=50 => Self::MiddleAged,
            _ => Self::Senior,
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Domestic,
    Foreign,
}

impl Region {
    /// Spellings of the home country seen in the transaction feed.
    const DOMESTIC_NAMES: &'static [&'static str] = &["Việt Nam", "Vietnam", "Viet Nam"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Domestic => "Domestic",
            Self::Foreign => "Foreign",
        }
    }

    /// Exact match against the domestic spellings; anything else is foreign.
    pub fn classify(country: &str) -> Self {
        if Self::DOMESTIC_NAMES.contains(&country) {
            Self::Domestic
        } else {
            Self::Foreign
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimDate {
    /// `YYYYMMDDHH` as an integer, e.g. 2025110614.
    pub date_key: i64,
    pub full_date: NaiveDate,
    pub hour_of_day: u32,
    /// Monday = 2 .. Sunday = 8.
    pub day_of_week: u32,
    pub day_name: String,
    pub is_weekend: bool,
    pub month: u32,
    pub month_name: String,
    pub quarter: u32,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimCustomer {
    pub customer_id_source: String,
    pub customer_name: String,
    pub age_group: AgeGroup,
    pub gender: String,
    pub city: String,
    pub country: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimAccount {
    pub account_id_source: String,
    pub account_type: String,
    pub open_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimMerchant {
    pub merchant_name_source: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimLocation {
    pub country: String,
    pub region: Region,
}
