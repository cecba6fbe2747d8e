use std::collections::HashMap;

use crate::error::AppError;

pub const ORDER_ID: &str = "order_id";
pub const PRODUCT_ID: &str = "product_id";
pub const CATEGORY: &str = "product_category_name_english";
pub const CUSTOMER_UNIQUE_ID: &str = "customer_unique_id";
pub const CUSTOMER_STATE: &str = "customer_state";
pub const PURCHASED_AT: &str = "order_purchase_timestamp";
pub const APPROVED_AT: &str = "order_approved_at";
pub const ESTIMATED_DELIVERY: &str = "order_estimated_delivery_date";
pub const PAYMENT_VALUE: &str = "payment_value";

/// Columns the dataset must carry — the load fails if any is absent.
const REQUIRED: &[&str] = &[
    ORDER_ID,
    PRODUCT_ID,
    CATEGORY,
    CUSTOMER_UNIQUE_ID,
    CUSTOMER_STATE,
    PURCHASED_AT,
    APPROVED_AT,
    ESTIMATED_DELIVERY,
    PAYMENT_VALUE,
];

/// Maps column names to their index in a CSV record.
pub struct ColumnMap {
    indices: HashMap<String, usize>,
    headers: Vec<String>,
}

impl ColumnMap {
    /// Header fields are trimmed, and a leading UTF-8 BOM is dropped.
    pub fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut indices = HashMap::new();
        let mut header_list = Vec::new();
        for (i, field) in headers.iter().enumerate() {
            let name = field.trim_start_matches('\u{FEFF}').trim().to_string();
            // Keep the first occurrence of a duplicated header.
            indices.entry(name.clone()).or_insert(i);
            header_list.push(name);
        }
        ColumnMap {
            indices,
            headers: header_list,
        }
    }

    pub fn get<'a>(&self, record: &'a csv::StringRecord, col: &str) -> Option<&'a str> {
        self.indices.get(col).and_then(|&i| record.get(i))
    }

    pub fn has(&self, col: &str) -> bool {
        self.indices.contains_key(col)
    }

    pub fn all_headers(&self) -> &[String] {
        &self.headers
    }
}

/// Returns the header names when every required column is present,
/// `AppError::MissingColumns` otherwise.
pub fn validate_columns(col_map: &ColumnMap) -> Result<Vec<String>, AppError> {
    let missing: Vec<String> = REQUIRED
        .iter()
        .filter(|&&c| !col_map.has(c))
        .map(|c| c.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(AppError::MissingColumns(missing));
    }

    Ok(col_map.all_headers().to_vec())
}
