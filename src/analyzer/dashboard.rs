/// Dashboard assembly — filters the dataset and runs every aggregation for one date range.
use std::time::Instant;

use serde::Serialize;

use super::daily::{daily_orders, DailyOrders};
use super::monthly::{monthly_trend, MonthlyOrders};
use super::ranking::{category_performance, customers_by_region, RankedCount};
use super::rfm::{rfm, rfm_summary, RfmSummary};
use crate::config::DashboardConfig;
use crate::dataset::{DateRange, OrderDataset};
use crate::error::AppError;

// ─── Data Structures ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub meta: DashboardMeta,
    pub daily: DailyKpi,
    pub categories: CategoryKpi,
    pub regions: Vec<RankedCount>,
    pub monthly: Vec<MonthlyOrders>,
    pub rfm: RfmSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMeta {
    pub range: DateRange,
    pub data_bounds: DateRange,
    pub filtered_records: usize,
    pub total_records: usize,
    pub build_duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyKpi {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub days: Vec<DailyOrders>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryKpi {
    pub category_count: usize,
    pub best: Vec<RankedCount>,
    pub worst: Vec<RankedCount>,
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Filters `dataset` on `range` and computes every dashboard section.
/// An empty selection is an error: there is nothing to chart.
pub fn build_dashboard(
    dataset: &OrderDataset,
    range: &DateRange,
    config: &DashboardConfig,
) -> Result<DashboardReport, AppError> {
    let start = Instant::now();

    let (min, max) = dataset.approval_bounds().ok_or(AppError::EmptyDataset)?;
    let rows = dataset.filter(range);
    log::debug!("{} of {} records inside {}", rows.len(), dataset.len(), range);

    if rows.is_empty() {
        return Err(AppError::EmptySelection(
            range.start.to_string(),
            range.end.to_string(),
        ));
    }

    let days = daily_orders(&rows);
    let daily = DailyKpi {
        total_orders: days.iter().map(|d| d.order_count).sum(),
        total_revenue: days.iter().map(|d| d.revenue).sum(),
        days,
    };

    let ranking = category_performance(&rows);
    let categories = CategoryKpi {
        category_count: ranking.len(),
        best: ranking.best(config.top_categories),
        worst: ranking.worst(config.top_categories),
    };

    let regions = customers_by_region(&rows).items().to_vec();
    let monthly = monthly_trend(&rows, config.trend_months);
    let rfm = rfm_summary(&rfm(&rows));

    let report = DashboardReport {
        meta: DashboardMeta {
            range: *range,
            data_bounds: DateRange {
                start: min,
                end: max,
            },
            filtered_records: rows.len(),
            total_records: dataset.len(),
            build_duration_ms: start.elapsed().as_millis() as u64,
        },
        daily,
        categories,
        regions,
        monthly,
        rfm,
    };

    log::info!(
        "Dashboard built for {}: {} orders, {} records in {} ms",
        range,
        report.daily.total_orders,
        report.meta.filtered_records,
        report.meta.build_duration_ms
    );

    Ok(report)
}
