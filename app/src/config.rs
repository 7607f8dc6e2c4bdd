//! Configuration management for Beet Guru
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with BEET_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Mock data-provider configuration
    pub api: ApiConfig,

    /// Defaults pre-filled into new assessments
    pub defaults: AssessmentDefaults,

    /// Session storage configuration
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Lower bound of the simulated network delay (ms)
    pub latency_min_ms: u64,

    /// Upper bound of the simulated network delay (ms)
    pub latency_max_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssessmentDefaults {
    /// Row spacing pre-filled on the field-setup step (m)
    pub row_spacing_m: f64,

    /// Measurement length pre-filled on the field-setup step (m)
    pub measurement_length_m: f64,

    /// Estimated growing cost pre-filled on the crop-details step ($/ha)
    pub growing_cost: f64,

    /// Herd size assumed for feeding-capacity figures
    pub herd_size: u32,

    /// Intake per animal assumed for feeding-capacity figures (kg DM/day)
    pub intake_kg_dm_per_day: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// File the session key-value store persists to
    pub path: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("BEET_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api.latency_min_ms", 300)?
            .set_default("api.latency_max_ms", 800)?
            .set_default("defaults.row_spacing_m", 0.5)?
            .set_default("defaults.measurement_length_m", 4.0)?
            .set_default("defaults.growing_cost", 2500.0)?
            .set_default("defaults.herd_size", 50)?
            .set_default("defaults.intake_kg_dm_per_day", 8.0)?
            .set_default("storage.path", ".beet-guru/session.json")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (BEET_ prefix)
            .add_source(
                Environment::with_prefix("BEET")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for AssessmentDefaults {
    fn default() -> Self {
        Self {
            row_spacing_m: 0.5,
            measurement_length_m: 4.0,
            growing_cost: 2500.0,
            herd_size: 50,
            intake_kg_dm_per_day: 8.0,
        }
    }
}
