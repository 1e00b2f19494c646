//! Service configuration

use crate::error::RiskResult;
use crate::validation::ActivityStatsPolicy;
use config::builder::{ConfigBuilder, DefaultState};
use config::{ConfigError, Environment};
use serde::{Deserialize, Serialize};
use std::env;

/// Risk service configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Request handling settings
    pub scoring: ScoringConfig,
    /// Logging settings
    pub log: LogConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Actix worker threads
    pub workers: usize,
    /// Maximum accepted JSON body size
    pub json_limit_bytes: usize,
}

/// Request handling knobs. Rule weights and thresholds are fixed and not listed here.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ScoringConfig {
    /// Reject requests that omit the 24h activity statistics instead of defaulting them to 0
    pub require_activity_stats: bool,
}

impl ScoringConfig {
    /// Validation policy for the 24h activity statistics
    pub fn activity_stats_policy(&self) -> ActivityStatsPolicy {
        if self.require_activity_stats {
            ActivityStatsPolicy::Strict
        } else {
            ActivityStatsPolicy::Lenient
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogConfig {
    /// Fallback filter when `RUST_LOG` is unset
    pub level: String,
}

/// Default for `server.json_limit_bytes`
pub const DEFAULT_JSON_LIMIT_BYTES: usize = 16 * 1024;

impl Config {
    /// Load configuration from defaults and environment variables
    pub fn from_env() -> RiskResult<Self> {
        let mut builder =
            Self::defaults()?.add_source(Environment::with_prefix("RISK_SERVICE").separator("__"));

        // Override from environment variables
        if let Ok(port) = env::var("SERVICE_PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            // Server defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.workers", 4)?
            .set_default("server.json_limit_bytes", DEFAULT_JSON_LIMIT_BYTES as i64)?
            // Scoring defaults
            .set_default("scoring.require_activity_stats", false)?
            // Logging defaults
            .set_default("log.level", "risk_service=info,actix_web=info")
    }
}
