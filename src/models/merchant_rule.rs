/// One line of the merchant -> category reference file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantCategoryRule {
    pub merchant_name: String,
    pub category: String,
}

impl MerchantCategoryRule {
    pub fn new(merchant_name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            merchant_name: merchant_name.into(),
            category: category.into(),
        }
    }
}
