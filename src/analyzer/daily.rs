use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::parser::OrderLine;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyOrders {
    pub date: NaiveDate,
    pub order_count: usize,
    pub revenue: f64,
}

/// Buckets rows by approval day: distinct orders and payment sum per day.
/// Only days with at least one row appear, in chronological order.
pub fn daily_orders(rows: &[&OrderLine]) -> Vec<DailyOrders> {
    let mut buckets: BTreeMap<NaiveDate, (HashSet<&str>, f64)> = BTreeMap::new();

    for row in rows {
        let Some(day) = row.approval_date() else {
            continue;
        };
        let (orders, revenue) = buckets.entry(day).or_default();
        orders.insert(row.order_id.as_str());
        *revenue += row.payment_value;
    }

    buckets
        .into_iter()
        .map(|(date, (orders, revenue))| DailyOrders {
            date,
            order_count: orders.len(),
            revenue,
        })
        .collect()
}
