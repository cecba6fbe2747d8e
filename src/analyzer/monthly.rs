use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::temporal::YearMonth;
use crate::parser::OrderLine;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyOrders {
    /// "2018-01"
    pub period_key: String,
    /// "January 2018"
    pub period_label: String,
    pub order_count: usize,
    pub revenue: f64,
}

/// Buckets rows by purchase month and keeps the last `months` buckets present,
/// oldest first.
pub fn monthly_trend(rows: &[&OrderLine], months: usize) -> Vec<MonthlyOrders> {
    let mut buckets: BTreeMap<YearMonth, (HashSet<&str>, f64)> = BTreeMap::new();

    for row in rows {
        let (orders, revenue) = buckets
            .entry(YearMonth::of(row.purchased_at.date()))
            .or_default();
        orders.insert(row.order_id.as_str());
        *revenue += row.payment_value;
    }

    let skip = buckets.len().saturating_sub(months);
    buckets
        .into_iter()
        .skip(skip)
        .map(|(ym, (orders, revenue))| MonthlyOrders {
            period_key: ym.key(),
            period_label: ym.label(),
            order_count: orders.len(),
            revenue,
        })
        .collect()
}
