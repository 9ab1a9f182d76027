//! Configuration management for the Agrovia tracker
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGROVIA_ prefix

use config::{Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppResult;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Retail configuration
    pub retail: RetailConfig,

    /// Analytics configuration
    pub analytics: AnalyticsConfig,

    /// Demo data configuration
    pub demo: DemoConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetailConfig {
    /// Retailer id stamped on orders and bills
    pub retailer_id: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// Share of consume-soon stock assumed saved by early warnings
    pub waste_prevention_rate: Decimal,

    /// Average batch weight in kg for dashboard estimates
    pub average_batch_kg: Decimal,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DemoConfig {
    /// Seed the registry with demo farmers and batches
    pub seed: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> AppResult<Self> {
        let environment =
            std::env::var("AGROVIA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("retail.retailer_id", "RET-001")?
            .set_default("analytics.waste_prevention_rate", "0.3")?
            .set_default("analytics.average_batch_kg", "25")?
            .set_default("demo.seed", true)?
            .set_default("logging.filter", "agrovia_tracker=debug,agrovia_demo=debug")?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGROVIA_ prefix)
            .add_source(
                Environment::with_prefix("AGROVIA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            retail: RetailConfig::default(),
            analytics: AnalyticsConfig::default(),
            demo: DemoConfig { seed: true },
            logging: LoggingConfig {
                filter: "agrovia_tracker=debug,agrovia_demo=debug".to_string(),
                json: false,
            },
        }
    }
}

impl Default for RetailConfig {
    fn default() -> Self {
        Self {
            retailer_id: "RET-001".to_string(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            waste_prevention_rate: Decimal::new(3, 1),
            average_batch_kg: Decimal::from(25),
        }
    }
}
