use crate::error::AppError;
use crate::state::AppState;

/// The effective configuration of the session, as TOML.
pub fn get_config(state: &AppState) -> Result<String, AppError> {
    toml::to_string_pretty(&state.config).map_err(|e| AppError::Custom(e.to_string()))
}
