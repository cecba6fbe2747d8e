use std::path::Path;

use crate::dataset::OrderDataset;
use crate::error::AppError;
use crate::parser::{parse_csv, ImportSummary};
use crate::state::{AppState, DatasetAccess};

/// Warnings beyond this count are only counted in the log, not listed.
const LOGGED_WARNINGS: usize = 10;

/// Loads the order-line CSV at `path` into the session, replacing any previous dataset.
pub fn import_dataset(state: &AppState, path: &Path) -> Result<ImportSummary, AppError> {
    log::info!("Loading dataset from {}", path.display());

    let output = parse_csv(path, |rows, accepted| {
        log::debug!("{} rows parsed, {} accepted", rows, accepted);
    })?;

    for warning in output.warnings.iter().take(LOGGED_WARNINGS) {
        log::warn!("Line {} skipped: {}", warning.line, warning.message);
    }
    if output.skipped_rows > LOGGED_WARNINGS {
        log::warn!(
            "{} more rows skipped",
            output.skipped_rows - LOGGED_WARNINGS
        );
    }

    let dataset = OrderDataset::new(output.records);
    let summary = ImportSummary {
        path: path.display().to_string(),
        total_records: dataset.len(),
        approved_records: dataset.approved_count(),
        skipped_rows: output.skipped_rows,
        warnings: output.warnings,
        detected_columns: output.detected_columns,
        approval_range: dataset.approval_bounds(),
        parse_duration_ms: output.parse_duration_ms,
    };

    log::info!(
        "{} records loaded ({} approved, {} skipped) in {} ms",
        summary.total_records,
        summary.approved_records,
        summary.skipped_rows,
        summary.parse_duration_ms
    );

    state.replace_dataset(dataset)?;
    Ok(summary)
}
