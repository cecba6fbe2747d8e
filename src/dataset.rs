use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AppError;
use crate::parser::OrderLine;

/// The loaded order lines, sorted by approval timestamp. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct OrderDataset {
    records: Vec<OrderLine>,
}

/// Inclusive calendar-day range on the approval timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl OrderDataset {
    pub fn new(mut records: Vec<OrderLine>) -> Self {
        // Records without an approval timestamp go last.
        records.sort_by_key(|r| (r.approved_at.is_none(), r.approved_at));
        OrderDataset { records }
    }

    pub fn records(&self) -> &[OrderLine] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn approved_count(&self) -> usize {
        self.records.iter().filter(|r| r.approved_at.is_some()).count()
    }

    /// First and last approval date, `None` when no record was approved.
    pub fn approval_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(OrderLine::approval_date);
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some((min, max))
    }

    /// Order lines approved on a day inside `range`, in approval order.
    pub fn filter(&self, range: &DateRange) -> Vec<&OrderLine> {
        self.records
            .iter()
            .filter(|r| r.approval_date().is_some_and(|d| range.contains(d)))
            .collect()
    }
}

impl DateRange {
    /// Resolves user-picked dates against the dataset bounds: a missing end
    /// takes the bound, a given one is clamped into it.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<DateRange, AppError> {
        let (min, max) = bounds.ok_or(AppError::EmptyDataset)?;

        let start = start.unwrap_or(min).clamp(min, max);
        let end = end.unwrap_or(max).clamp(min, max);

        if start > end {
            return Err(AppError::InvalidRange(start.to_string(), end.to_string()));
        }

        Ok(DateRange { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::parser::OrderLine;

    pub fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Order line approved (and purchased) at `approved`.
    pub fn line(order: &str, customer: &str, approved: &str, payment: f64) -> OrderLine {
        OrderLine {
            order_id: order.to_string(),
            product_id: Some(format!("p-{order}")),
            category: Some("toys".to_string()),
            customer_unique_id: customer.to_string(),
            customer_state: Some("SP".to_string()),
            purchased_at: dt(approved),
            approved_at: Some(dt(approved)),
            estimated_delivery: None,
            payment_value: payment,
        }
    }
}
