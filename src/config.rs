use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Number of categories shown in each of the best / worst lists.
    pub top_categories: usize,
    /// Number of trailing month buckets kept by the monthly trend.
    pub trend_months: usize,
    /// Width in characters of the longest bar in terminal charts.
    pub chart_width: usize,
    pub currency: CurrencyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub symbol: String,
    pub thousands_separator: String,
    pub decimal_separator: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            top_categories: 5,
            trend_months: 6,
            chart_width: 40,
            currency: CurrencyConfig::default(),
        }
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        CurrencyConfig {
            symbol: "R$".into(),
            thousands_separator: ".".into(),
            decimal_separator: ",".into(),
        }
    }
}

/// Load the dashboard configuration from a TOML file.
/// `None` yields the defaults; keys absent from the file keep their default.
pub fn load_config(path: Option<&Path>) -> Result<DashboardConfig, AppError> {
    let Some(path) = path else {
        log::debug!("No configuration file given, using defaults");
        return Ok(DashboardConfig::default());
    };

    log::debug!("Loading configuration from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<DashboardConfig, AppError> {
    let mut config: DashboardConfig = toml::from_str(contents)?;

    // A zero would make every ranked list and trend empty.
    if config.top_categories == 0 {
        config.top_categories = DashboardConfig::default().top_categories;
    }
    if config.trend_months == 0 {
        config.trend_months = DashboardConfig::default().trend_months;
    }
    if config.chart_width == 0 {
        config.chart_width = DashboardConfig::default().chart_width;
    }

    Ok(config)
}
