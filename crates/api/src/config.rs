use std::str::FromStr;
use std::time::Duration;

use alsidr_core::tier::Tier;
use alsidr_engine::config::{SimulationConfig, DEFAULT_TICK_PERIOD};

/// A configuration value that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value for {key}: '{value}' ({reason})")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for background tasks on shutdown (default: `5`).
    pub shutdown_timeout_secs: u64,
    /// Dashboard controller and simulation clock settings.
    pub simulation: SimulationConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `HOST`                       | `0.0.0.0`               |
    /// | `PORT`                       | `3000`                  |
    /// | `CORS_ORIGINS`               | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`      | `5`                     |
    /// | `SIM_TICK_SECS`              | `5`                     |
    /// | `SIM_AUTOSTART`              | `true`                  |
    /// | `SIM_SEED`                   | unset (OS entropy)      |
    /// | `SIM_INITIAL_TIER`           | `advanced`              |
    /// | `SIM_INITIAL_CONTAINER_TEMP` | `18.5`                  |
    /// | `SIM_INITIAL_SOIL_MOISTURE`  | `45`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let shutdown_timeout_secs: u64 = parse_or(&lookup, "SHUTDOWN_TIMEOUT_SECS", 5)?;

        let simulation = simulation_from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            simulation,
        })
    }
}

fn simulation_from_lookup(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<SimulationConfig, ConfigError> {
    let defaults = SimulationConfig::default();

    let tick_secs: u64 = parse_or(lookup, "SIM_TICK_SECS", DEFAULT_TICK_PERIOD.as_secs())?;
    if tick_secs == 0 {
        return Err(ConfigError {
            key: "SIM_TICK_SECS",
            value: "0".into(),
            reason: "must be at least 1".into(),
        });
    }

    let autostart: bool = parse_or(lookup, "SIM_AUTOSTART", defaults.autostart)?;
    let seed: Option<u64> = parse_opt(lookup, "SIM_SEED")?;
    let initial_tier: Tier = parse_or(lookup, "SIM_INITIAL_TIER", defaults.initial_tier)?;

    let mut initial_reading = defaults.initial_reading;
    if let Some(temp) = parse_opt(lookup, "SIM_INITIAL_CONTAINER_TEMP")? {
        initial_reading.container_temp = temp;
    }
    if let Some(moisture) = parse_opt(lookup, "SIM_INITIAL_SOIL_MOISTURE")? {
        initial_reading.soil_moisture = moisture;
    }

    Ok(SimulationConfig {
        tick_period: Duration::from_secs(tick_secs),
        autostart,
        seed,
        initial_tier,
        initial_reading,
    })
}

fn parse_opt<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}
