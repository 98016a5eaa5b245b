use std::path::Path;

use crate::error::{EtlError, EtlResult};
use crate::models::MerchantCategoryRule;

const MERCHANT_COLUMN: &str = "merchantname";
const CATEGORY_COLUMN: &str = "category";

/// Load the merchant -> category reference file.
///
/// The header row must name `MerchantName` and `Category` columns; any
/// other columns are ignored. Rows without a merchant name are skipped.
pub(crate) fn load_merchant_rules(path: &Path) -> EtlResult<Vec<MerchantCategoryRule>> {
    if !path.exists() {
        return Err(EtlError::MissingReference {
            path: path.to_path_buf(),
        });
    }
    let unusable = |reason: String| EtlError::Reference {
        path: path.to_path_buf(),
        reason,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path)
        .map_err(|e| unusable(e.to_string()))?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| unusable(e.to_string()))?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_lowercase())
        .collect();
    let merchant_col = col_index(&headers, MERCHANT_COLUMN)
        .ok_or_else(|| unusable("missing MerchantName column".into()))?;
    let category_col = col_index(&headers, CATEGORY_COLUMN)
        .ok_or_else(|| unusable("missing Category column".into()))?;

    let mut rules = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| unusable(format!("row {}: {e}", i + 2)))?;
        let merchant = record.get(merchant_col).map(str::trim).unwrap_or_default();
        if merchant.is_empty() {
            continue;
        }
        let category = record.get(category_col).map(str::trim).unwrap_or_default();
        rules.push(MerchantCategoryRule::new(merchant, category));
    }

    log::info!("Loaded {} merchant mapping rules from {}", rules.len(), path.display());
    Ok(rules)
}

fn col_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

#[cfg(test)]
#[path = "mapping_tests.rs"]
mod tests;
