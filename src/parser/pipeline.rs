use std::io::Read;
use std::path::Path;
use std::time::Instant;

use crate::error::AppError;
use crate::parser::columns::{self, validate_columns, ColumnMap};
use crate::parser::deserializers::{non_empty, parse_payment, parse_timestamp};
use crate::parser::types::{OrderLine, OrderLineRaw, ParseWarning};

/// Output of `parse_csv` — carries normalized order lines and load metadata.
#[derive(Debug)]
pub struct ParseOutput {
    pub records: Vec<OrderLine>,
    pub warnings: Vec<ParseWarning>,
    pub total_rows_processed: usize,
    pub skipped_rows: usize,
    pub detected_columns: Vec<String>,
    pub parse_duration_ms: u64,
}

/// Parse the order-line CSV at `path`.
/// `progress_cb(rows_processed, records_accepted)` is called every 500 rows.
pub fn parse_csv(
    path: impl AsRef<Path>,
    progress_cb: impl Fn(usize, usize),
) -> Result<ParseOutput, AppError> {
    let file = std::fs::File::open(path.as_ref())?;
    parse_csv_reader(std::io::BufReader::new(file), progress_cb)
}

/// Core parsing logic — accepts any `Read` source, useful for tests.
pub fn parse_csv_reader<R: Read>(
    reader: R,
    progress_cb: impl Fn(usize, usize),
) -> Result<ParseOutput, AppError> {
    let start = Instant::now();

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .double_quote(true)
        .quoting(true)
        .from_reader(reader);

    // Phase 1: validate columns
    let headers = rdr.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(AppError::EmptyFile);
    }
    let col_map = ColumnMap::from_headers(&headers);
    let detected_columns = validate_columns(&col_map)?;

    // Phase 2: parse and normalise records
    let mut records: Vec<OrderLine> = Vec::with_capacity(10_000);
    let mut warnings: Vec<ParseWarning> = Vec::new();
    let mut skipped = 0usize;
    let mut row_idx = 0usize;

    for result in rdr.records() {
        row_idx += 1;
        if row_idx % 500 == 0 {
            progress_cb(row_idx, records.len());
        }

        let outcome = result
            .map_err(|err| err.to_string())
            .and_then(|record| normalize_order_line(&record_to_raw(&col_map, &record)));

        match outcome {
            Ok(line) => records.push(line),
            Err(message) => {
                warnings.push(ParseWarning {
                    line: row_idx + 1, // +1 for the header row
                    message,
                });
                skipped += 1;
            }
        }
    }

    if row_idx == 0 {
        return Err(AppError::EmptyFile);
    }

    Ok(ParseOutput {
        records,
        warnings,
        total_rows_processed: row_idx,
        skipped_rows: skipped,
        detected_columns,
        parse_duration_ms: start.elapsed().as_millis() as u64,
    })
}

fn record_to_raw(col_map: &ColumnMap, record: &csv::StringRecord) -> OrderLineRaw {
    let get = |col: &str| col_map.get(record, col).map(str::to_string);
    OrderLineRaw {
        order_id: get(columns::ORDER_ID),
        product_id: get(columns::PRODUCT_ID),
        category: get(columns::CATEGORY),
        customer_unique_id: get(columns::CUSTOMER_UNIQUE_ID),
        customer_state: get(columns::CUSTOMER_STATE),
        purchased_at: get(columns::PURCHASED_AT),
        approved_at: get(columns::APPROVED_AT),
        estimated_delivery: get(columns::ESTIMATED_DELIVERY),
        payment_value: get(columns::PAYMENT_VALUE),
    }
}

fn normalize_order_line(raw: &OrderLineRaw) -> Result<OrderLine, String> {
    let order_id =
        non_empty(raw.order_id.as_deref()).ok_or_else(|| "Missing order_id".to_string())?;

    let customer_unique_id = non_empty(raw.customer_unique_id.as_deref())
        .ok_or_else(|| "Missing customer_unique_id".to_string())?;

    let purchased_str = raw.purchased_at.as_deref().unwrap_or("");
    let purchased_at = parse_timestamp(purchased_str)
        .ok_or_else(|| format!("Invalid purchase timestamp: {:?}", purchased_str))?;

    // Optional timestamps: empty is fine, garbage is not.
    let approved_at = optional_timestamp(raw.approved_at.as_deref(), "approval")?;
    let estimated_delivery =
        optional_timestamp(raw.estimated_delivery.as_deref(), "estimated delivery")?;

    let payment_str = raw.payment_value.as_deref().unwrap_or("");
    let payment_value = parse_payment(payment_str)
        .ok_or_else(|| format!("Invalid payment value: {:?}", payment_str))?;

    Ok(OrderLine {
        order_id,
        product_id: non_empty(raw.product_id.as_deref()),
        category: non_empty(raw.category.as_deref()),
        customer_unique_id,
        customer_state: non_empty(raw.customer_state.as_deref()),
        purchased_at,
        approved_at,
        estimated_delivery,
        payment_value,
    })
}

fn optional_timestamp(
    value: Option<&str>,
    label: &str,
) -> Result<Option<chrono::NaiveDateTime>, String> {
    match non_empty(value) {
        None => Ok(None),
        Some(s) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| format!("Invalid {} timestamp: {:?}", label, s)),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const HDR: &str = concat!(
        "order_id,product_id,product_category_name_english,customer_unique_id,",
        "customer_state,order_purchase_timestamp,order_approved_at,",
        "order_estimated_delivery_date,payment_value"
    );

    fn parse(csv: &str) -> ParseOutput {
        parse_csv_reader(csv.as_bytes(), |_, _| {}).unwrap()
    }

    fn parse_err(csv: &str) -> AppError {
        parse_csv_reader(csv.as_bytes(), |_, _| {}).unwrap_err()
    }

    #[test]
    fn test_parse_single_line() {
        let csv = format!(
            "{HDR}\no1,p1,bed_bath_table,c1,SP,2017-10-02 10:56:33,2017-10-02 11:07:15,2017-10-18 00:00:00,18.12"
        );
        let out = parse(&csv);
        assert_eq!(out.records.len(), 1);
        let r = &out.records[0];
        assert_eq!(r.order_id, "o1");
        assert_eq!(r.category.as_deref(), Some("bed_bath_table"));
        assert_eq!(r.customer_state.as_deref(), Some("SP"));
        assert_eq!(
            r.approved_at.unwrap().format("%Y-%m-%d %H:%M:%S").to_string(),
            "2017-10-02 11:07:15"
        );
        assert!((r.payment_value - 18.12).abs() < 1e-9);
        assert_eq!(out.detected_columns.len(), 9);
    }

    #[test]
    fn test_leading_index_column_ignored() {
        let csv = format!(
            ",{HDR}\n0,o1,p1,toys,c1,RJ,2018-01-01 08:00:00,2018-01-01 09:00:00,2018-01-10,5"
        );
        let out = parse(&csv);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].order_id, "o1");
    }

    #[test]
    fn test_bom_utf8() {
        let csv = format!(
            "\u{FEFF}{HDR}\no1,p1,toys,c1,RJ,2018-01-01 08:00:00,2018-01-01 09:00:00,2018-01-10,5"
        );
        let out = parse(&csv);
        assert_eq!(out.records.len(), 1, "BOM must be ignored");
    }

    #[test]
    fn test_optional_fields_become_none() {
        let csv = format!("{HDR}\no1,,,c1,,2018-01-01 08:00:00,,,");
        let out = parse(&csv);
        let r = &out.records[0];
        assert!(r.product_id.is_none());
        assert!(r.category.is_none());
        assert!(r.customer_state.is_none());
        assert!(r.approved_at.is_none());
        assert!(r.estimated_delivery.is_none());
        assert_eq!(r.payment_value, 0.0);
    }

    #[test]
    fn test_malformed_lines_skip() {
        let csv = format!(
            "{HDR}\n\
             o1,p1,toys,c1,SP,2018-01-01 08:00:00,2018-01-01 09:00:00,2018-01-10,5\n\
             o2,p2,toys,c2,SP,not-a-date,2018-01-01 09:00:00,2018-01-10,5\n\
             o3,p3,toys,c3,SP,2018-01-02 08:00:00,2018-01-02 09:00:00,2018-01-10,abc\n\
             o4,p4,toys,c4,SP,2018-01-03 08:00:00,yesterday,2018-01-10,1\n\
             ,p5,toys,c5,SP,2018-01-03 08:00:00,2018-01-03 09:00:00,2018-01-10,1\n\
             o6,p6,toys,c6,SP,2018-01-04 08:00:00,2018-01-04 09:00:00,2018-01-10,7"
        );
        let out = parse(&csv);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.skipped_rows, 4);
        assert_eq!(out.warnings.len(), 4);
        assert_eq!(out.warnings[0].line, 3);
        assert!(out.warnings[1].message.contains("payment"));
        assert_eq!(out.total_rows_processed, 6);
    }

    #[test]
    fn test_missing_required_column_error() {
        match parse_err("order_id,payment_value\no1,5") {
            AppError::MissingColumns(cols) => {
                assert!(cols.contains(&"order_approved_at".to_string()));
            }
            e => panic!("Expected MissingColumns, got {:?}", e),
        }
    }

    #[test]
    fn test_header_only_is_empty_file() {
        match parse_err(HDR) {
            AppError::EmptyFile => {}
            e => panic!("Expected EmptyFile, got {:?}", e),
        }
    }

    #[test]
    fn test_empty_file_error() {
        match parse_err("") {
            AppError::EmptyFile | AppError::MissingColumns(_) | AppError::Csv(_) => {}
            e => panic!("Expected EmptyFile or related error, got {:?}", e),
        }
    }

    #[test]
    fn test_progress_callback_every_500_rows() {
        let mut csv = String::from(HDR);
        for i in 0..1200 {
            csv.push_str(&format!(
                "\no{i},p{i},toys,c{i},SP,2018-01-01 08:00:00,2018-01-01 09:00:00,2018-01-10,1"
            ));
        }
        let calls = std::cell::RefCell::new(Vec::new());
        let out = parse_csv_reader(csv.as_bytes(), |rows, accepted| {
            calls.borrow_mut().push((rows, accepted))
        })
        .unwrap();
        assert_eq!(out.records.len(), 1200);
        assert_eq!(*calls.borrow(), vec![(500, 499), (1000, 999)]);
    }
}
