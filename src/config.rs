//! Runtime configuration resolved from command-line flags.

use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_API_BASE;
use crate::route::{Route, RouteError};

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
const APP_DIR: &str = "pokedex";
const LOG_FILE: &str = "pokedex.log";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid start route: {0}")]
    Route(#[from] RouteError),
    #[error("api base must be an http(s) url, got {0:?}")]
    ApiBase(String),
    #[error("debounce must be at least 1ms")]
    Debounce,
}

/// Raw values as they arrive from the command line. `None` means "use the
/// default".
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub api_base: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub debounce_ms: Option<u64>,
    pub route: Option<String>,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base: String,
    pub data_dir: PathBuf,
    pub debounce: Duration,
    pub start_route: Route,
    pub log_file: PathBuf,
    pub verbose: bool,
}

impl AppConfig {
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let api_base = overrides
            .api_base
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(ConfigError::ApiBase(api_base));
        }

        let debounce_ms = overrides.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS);
        if debounce_ms == 0 {
            return Err(ConfigError::Debounce);
        }

        let start_route = match overrides.route.as_deref() {
            Some(path) => Route::parse(path)?,
            None => Route::default(),
        };

        let data_dir = overrides.data_dir.unwrap_or_else(default_data_dir);
        let log_file = overrides
            .log_file
            .unwrap_or_else(|| data_dir.join(LOG_FILE));

        Ok(Self {
            api_base,
            data_dir,
            debounce: Duration::from_millis(debounce_ms),
            start_route,
            log_file,
            verbose: overrides.verbose,
        })
    }
}

pub fn default_data_dir() -> PathBuf {
    let base = dirs_next::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR)
}
