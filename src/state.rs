use std::sync::Mutex;

use crate::config::DashboardConfig;
use crate::dataset::OrderDataset;
use crate::error::AppError;

/// One dashboard session: its own copy of the loaded data and its configuration.
pub struct AppState {
    pub dataset: Mutex<Option<OrderDataset>>,
    pub config: DashboardConfig,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        AppState {
            dataset: Mutex::new(None),
            config,
        }
    }
}

pub trait DatasetAccess {
    fn with_dataset<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&OrderDataset) -> Result<T, AppError>;

    fn replace_dataset(&self, dataset: OrderDataset) -> Result<(), AppError>;
}

impl DatasetAccess for AppState {
    fn with_dataset<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&OrderDataset) -> Result<T, AppError>,
    {
        let guard = self
            .dataset
            .lock()
            .map_err(|e| AppError::Custom(format!("Mutex poisoned: {}", e)))?;
        let dataset = guard.as_ref().ok_or(AppError::NotLoaded)?;
        f(dataset)
    }

    fn replace_dataset(&self, dataset: OrderDataset) -> Result<(), AppError> {
        let mut guard = self
            .dataset
            .lock()
            .map_err(|e| AppError::Custom(format!("Mutex poisoned: {}", e)))?;
        *guard = Some(dataset);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_before_load_fails() {
        let state = AppState::new(DashboardConfig::default());
        match state.with_dataset(|ds| Ok(ds.len())) {
            Err(AppError::NotLoaded) => {}
            other => panic!("Expected NotLoaded, got {:?}", other),
        }
    }

    #[test]
    fn test_access_after_load() {
        let state = AppState::new(DashboardConfig::default());
        state.replace_dataset(OrderDataset::default()).unwrap();
        assert_eq!(state.with_dataset(|ds| Ok(ds.len())).unwrap(), 0);
    }
}
