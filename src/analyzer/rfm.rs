use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use super::stats::{mean, round1, round2};
use crate::parser::OrderLine;

/// Recency / frequency / monetary figures of one customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRfm {
    pub customer_id: String,
    /// Whole days between the customer's last approval and the latest approval
    /// of the selection.
    pub recency: i64,
    pub frequency: usize,
    pub monetary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RfmSummary {
    pub customers: usize,
    /// Rounded to 1 decimal.
    pub avg_recency_days: f64,
    /// Rounded to 2 decimals.
    pub avg_frequency: f64,
    pub avg_monetary: f64,
}

#[derive(Default)]
struct CustomerAcc<'a> {
    last_approval: Option<NaiveDate>,
    orders: HashSet<&'a str>,
    monetary: f64,
}

/// Per-customer RFM over the rows, sorted by customer id.
/// Rows without an approval timestamp are ignored.
pub fn rfm(rows: &[&OrderLine]) -> Vec<CustomerRfm> {
    let mut customers: HashMap<&str, CustomerAcc<'_>> = HashMap::new();
    let mut reference_date: Option<NaiveDate> = None;

    for row in rows {
        let Some(day) = row.approval_date() else {
            continue;
        };
        reference_date = reference_date.max(Some(day));

        let acc = customers.entry(row.customer_unique_id.as_str()).or_default();
        acc.last_approval = acc.last_approval.max(Some(day));
        acc.orders.insert(row.order_id.as_str());
        acc.monetary += row.payment_value;
    }

    let Some(reference_date) = reference_date else {
        return Vec::new();
    };

    let mut result: Vec<CustomerRfm> = customers
        .into_iter()
        .map(|(customer_id, acc)| CustomerRfm {
            customer_id: customer_id.to_string(),
            recency: acc
                .last_approval
                .map(|d| (reference_date - d).num_days())
                .unwrap_or(0),
            frequency: acc.orders.len(),
            monetary: acc.monetary,
        })
        .collect();
    result.sort_by(|a, b| a.customer_id.cmp(&b.customer_id));
    result
}

pub fn rfm_summary(customers: &[CustomerRfm]) -> RfmSummary {
    let recency: Vec<f64> = customers.iter().map(|c| c.recency as f64).collect();
    let frequency: Vec<f64> = customers.iter().map(|c| c.frequency as f64).collect();
    let monetary: Vec<f64> = customers.iter().map(|c| c.monetary).collect();

    RfmSummary {
        customers: customers.len(),
        avg_recency_days: round1(mean(&recency)),
        avg_frequency: round2(mean(&frequency)),
        avg_monetary: mean(&monetary),
    }
}
