pub mod format;
pub mod text;

use crate::analyzer::DashboardReport;
use crate::error::AppError;

pub use format::{format_count, format_currency, format_decimal};
pub use text::render_dashboard;

/// Pretty-printed JSON payload of the dashboard (camelCase keys).
pub fn render_json(report: &DashboardReport) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(report)?)
}
