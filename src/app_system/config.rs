use serde::Deserialize;
use thiserror::Error;
use crate::pricing::{PricingError, PricingTable};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "print-orders";
/// Environment variable naming an additional configuration file.
pub const CONFIG_ENV_VAR: &str = "PRINT_ORDERS_CONFIG";
/// Prefix for configuration environment variables, e.g. `PRINT_ORDERS__CHANNEL_BUFFER=64`.
pub const CONFIG_ENV_PREFIX: &str = "PRINT_ORDERS";

/// Errors that stop the application from starting.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("Invalid pricing configuration: {0}")]
    Pricing(#[from] PricingError),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Capacity of each actor's request channel.
    pub channel_buffer: usize,
    /// Pricing rules used for every order submission.
    pub pricing: PricingTable,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            pricing: PricingTable::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Sources, later overriding earlier:
    /// 1. `print-orders.{yaml,toml,json}` in the working directory (if present)
    /// 2. The file at `path` (if given)
    /// 3. The file named by `PRINT_ORDERS_CONFIG` (if set)
    /// 4. `PRINT_ORDERS__*` environment variables
    ///
    /// A `pricing` section replaces the default table as a whole, so it must
    /// price every product type and turnaround tier.
    pub fn load(path: Option<&str>) -> Result<Self, AppConfigError> {
        use ::config::{Config, Environment, File};

        let mut builder = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::with_name(&path).required(true));
        }

        let config: Self = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.pricing.check_complete()?;
        Ok(config)
    }
}
