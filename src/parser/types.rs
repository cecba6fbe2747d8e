use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct OrderLineRaw {
    pub order_id: Option<String>,
    pub product_id: Option<String>,
    pub category: Option<String>,
    pub customer_unique_id: Option<String>,
    pub customer_state: Option<String>,
    pub purchased_at: Option<String>,
    pub approved_at: Option<String>,
    pub estimated_delivery: Option<String>,
    pub payment_value: Option<String>,
}

/// One order line of the dataset, with timestamps already normalised.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub order_id: String,
    pub product_id: Option<String>,
    pub category: Option<String>,
    pub customer_unique_id: String,
    pub customer_state: Option<String>,
    pub purchased_at: NaiveDateTime,
    pub approved_at: Option<NaiveDateTime>,
    pub estimated_delivery: Option<NaiveDateTime>,
    pub payment_value: f64,
}

impl OrderLine {
    pub fn approval_date(&self) -> Option<NaiveDate> {
        self.approved_at.map(|dt| dt.date())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub path: String,
    pub total_records: usize,
    pub approved_records: usize,
    pub skipped_rows: usize,
    pub warnings: Vec<ParseWarning>,
    pub detected_columns: Vec<String>,
    pub approval_range: Option<(NaiveDate, NaiveDate)>,
    pub parse_duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseWarning {
    pub line: usize,
    pub message: String,
}
