use std::path::Path;
use std::time::Instant;

use chrono::NaiveDate;
use serde::Serialize;

use crate::commands::dashboard::get_dashboard;
use crate::error::AppError;
use crate::export::dashboard_report::generate_dashboard_report;
use crate::render::render_json;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Xlsx,
    Json,
}

impl ExportFormat {
    /// Guesses the format from the file extension, Excel by default.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Xlsx,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub path: String,
    pub size_bytes: u64,
    pub duration_ms: u64,
}

/// Builds the dashboard for the range and writes it to `path`.
pub fn export_dashboard(
    state: &AppState,
    path: &Path,
    format: ExportFormat,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<ExportResult, AppError> {
    let started = Instant::now();

    let report = get_dashboard(state, start, end)?;
    let bytes = match format {
        ExportFormat::Xlsx => generate_dashboard_report(&report, &state.config)?,
        ExportFormat::Json => render_json(&report)?.into_bytes(),
    };

    std::fs::write(path, &bytes)?;

    let result = ExportResult {
        path: path.display().to_string(),
        size_bytes: bytes.len() as u64,
        duration_ms: started.elapsed().as_millis() as u64,
    };
    log::info!(
        "Dashboard exported to {} ({} bytes, {} ms)",
        result.path,
        result.size_bytes,
        result.duration_ms
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::dataset::test_support::line;
    use crate::dataset::OrderDataset;
    use crate::state::DatasetAccess;

    fn state() -> AppState {
        let state = AppState::new(DashboardConfig::default());
        state
            .replace_dataset(OrderDataset::new(vec![
                line("a", "c1", "2018-01-01 08:00:00", 10.0),
                line("b", "c2", "2018-02-01 09:00:00", 20.0),
            ]))
            .unwrap();
        state
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("out.JSON")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("out.xlsx")), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::from_path(Path::new("report")), ExportFormat::Xlsx);
    }

    #[test]
    fn test_export_xlsx_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.xlsx");
        let result = export_dashboard(&state(), &path, ExportFormat::Xlsx, None, None).unwrap();
        let written = std::fs::read(&path).unwrap();
        assert_eq!(result.size_bytes, written.len() as u64);
        assert_eq!(&written[..2], b"PK");
    }

    #[test]
    fn test_export_json_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        export_dashboard(&state(), &path, ExportFormat::Json, None, None).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["daily"]["totalOrders"], 2);
        assert_eq!(json["monthly"].as_array().unwrap().len(), 2);
    }
}
