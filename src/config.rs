use anyhow::{anyhow, Error};
use dotenv::dotenv;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::irrigation::StopPolicy;

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub irrigation: IrrigationConfig,
    pub jwt_secret: String,
    pub log_level: String,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct IrrigationConfig {
    /// Milliseconds between progress increments; a full cycle is 100 ticks.
    pub tick_interval_ms: u64,
    pub stop_policy: StopPolicy,
}

/// OTLP export is enabled only when a receiver is configured.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TelemetryConfig {
    pub api_key: Option<String>,
    pub receiver_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub allow_localhost_cors: bool,
    pub host: String,
    pub port: u16,
}

impl Settings {
    pub fn new() -> Result<Self, Error> {
        dotenv().ok();

        Ok(Settings {
            database_url: required("DATABASE_URL")?,
            irrigation: IrrigationConfig {
                tick_interval_ms: optional("IRRIGATION_TICK_MS", 100)?,
                stop_policy: optional("IRRIGATION_STOP_POLICY", StopPolicy::ReturnToIdle)?,
            },
            jwt_secret: required("JWT_SECRET")?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            server: ServerConfig {
                allow_localhost_cors: optional("ALLOW_LOCALHOST_CORS", false)?,
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: optional("SERVER_PORT", 8080)?,
            },
            telemetry: TelemetryConfig {
                api_key: non_empty("TELEMETRY_API_KEY"),
                receiver_url: non_empty("TELEMETRY_RECEIVER_URL"),
            },
        })
    }

    /// Loads settings from a specific env file, used by the test suites.
    pub fn from_env_file(filename: &str) -> Result<Self, Error> {
        dotenv::from_filename(filename).ok();

        Self::new()
    }
}

fn required(key: &str) -> Result<String, Error> {
    env::var(key).map_err(|_| anyhow!("{} environment variable not found", key))
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn optional<T>(key: &str, default: T) -> Result<T, Error>
where
    T: FromStr,
{
    match env::var(key) {
        Ok(value) => value
            .parse::<T>()
            .map_err(|_| anyhow!("failed to parse {}: {}", key, value)),
        Err(_) => Ok(default),
    }
}
