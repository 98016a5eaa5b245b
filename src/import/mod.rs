mod mapping;
mod values;

pub(crate) use mapping::load_merchant_rules;
pub(crate) use values::{parse_amount, parse_date, parse_datetime};
