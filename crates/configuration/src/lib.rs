use crate::error::ConfigError;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Environment, File, FileFormat};
use std::path::Path;
use tracing::debug;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{RiskOverrides, RiskSettings, Settings};

/// Settings file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "quantrisk";

/// Prefix of environment overrides, e.g. `QUANTRISK__RISK__PERIOD=weekly`.
pub const ENV_PREFIX: &str = "QUANTRISK";

/// Loads the settings from a TOML file and `QUANTRISK__*` environment variables.
///
/// An explicit `path` must exist. Without one, `quantrisk.toml` in the working
/// directory is read if present. Environment variables take precedence over
/// the file, and every missing value falls back to `Settings::default()`.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => File::from(path),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };
    let builder = config::Config::builder()
        .add_source(file)
        .add_source(environment(None));
    finish(builder)
}

/// Parses settings from an in-memory TOML document, without environment overrides.
pub fn parse_config(toml: &str) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml));
    finish(builder)
}

fn environment(vars: Option<config::Map<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .source(vars)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.build()?.try_deserialize::<Settings>()?;
    settings.risk.validate()?;

    debug!(
        risk_free_rate = settings.risk.risk_free_rate,
        period = %settings.risk.period,
        formula_set = %settings.risk.formula_set,
        "Settings loaded"
    );
    Ok(settings)
}
