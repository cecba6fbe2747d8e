use chrono::NaiveDate;

use crate::analyzer::{build_dashboard, DashboardReport};
use crate::dataset::DateRange;
use crate::error::AppError;
use crate::parser::deserializers::parse_date;
use crate::state::{AppState, DatasetAccess};

/// Returns the complete dashboard payload for the loaded dataset.
///
/// Optional `start` and `end` pick the approval-date range; missing ends
/// default to the first / last approval date and both are clamped to them.
pub fn get_dashboard(
    state: &AppState,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DashboardReport, AppError> {
    state.with_dataset(|dataset| {
        let range = DateRange::resolve(start, end, dataset.approval_bounds())?;
        build_dashboard(dataset, &range, &state.config)
    })
}

/// "2018-01-03" → date; "" or "-" → None (use the data bound).
pub fn parse_date_arg(s: &str) -> Result<Option<NaiveDate>, AppError> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Ok(None);
    }
    parse_date(trimmed)
        .map(Some)
        .ok_or_else(|| AppError::InvalidDate(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::dataset::test_support::{date, line};
    use crate::dataset::OrderDataset;

    fn state() -> AppState {
        let state = AppState::new(DashboardConfig::default());
        state
            .replace_dataset(OrderDataset::new(vec![
                line("a", "c1", "2018-01-01 08:00:00", 10.0),
                line("b", "c2", "2018-01-01 09:00:00", 20.0),
                line("c", "c3", "2018-01-03 10:00:00", 5.0),
            ]))
            .unwrap();
        state
    }

    #[test]
    fn test_default_range_is_full_span() {
        let report = get_dashboard(&state(), None, None).unwrap();
        assert_eq!(report.meta.range.start, date("2018-01-01"));
        assert_eq!(report.meta.range.end, date("2018-01-03"));
        assert_eq!(report.daily.total_orders, 3);
    }

    #[test]
    fn test_reaggregates_per_range() {
        let state = state();
        let full = get_dashboard(&state, None, None).unwrap();
        let first_day = get_dashboard(&state, None, Some(date("2018-01-01"))).unwrap();
        assert!((full.daily.total_revenue - 35.0).abs() < 1e-9);
        assert!((first_day.daily.total_revenue - 30.0).abs() < 1e-9);
        assert_eq!(first_day.daily.days.len(), 1);
    }

    #[test]
    fn test_empty_selection_propagates() {
        let result = get_dashboard(&state(), Some(date("2018-01-02")), Some(date("2018-01-02")));
        assert!(matches!(result, Err(AppError::EmptySelection(_, _))));
    }

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(parse_date_arg("2018-01-03").unwrap(), Some(date("2018-01-03")));
        assert_eq!(parse_date_arg("-").unwrap(), None);
        assert_eq!(parse_date_arg("  ").unwrap(), None);
        assert!(matches!(parse_date_arg("03/01/2018"), Err(AppError::InvalidDate(_))));
    }
}
