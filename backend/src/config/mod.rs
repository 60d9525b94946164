//! Central module for application-wide configuration settings.
//!
//! Sources are layered with the `config` crate: defaults, then an optional
//! TOML file, then `MASTERBIS_*` environment variables. Nested keys use a
//! double underscore, so `MASTERBIS_LATENCY__LOGIN_MS` sets `latency.login_ms`
//! and `MASTERBIS_ADMIN__PASSWORD` sets `admin.password`.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use ::config::builder::DefaultState;
use ::config::{ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

const ENV_PREFIX: &str = "MASTERBIS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(String),

    #[error("invalid configuration: {0}")]
    Parse(String),

    #[error("admin.password must be set (MASTERBIS_ADMIN__PASSWORD)")]
    MissingAdminPassword,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
    /// JSON when stdout is not a terminal.
    #[default]
    Auto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub log_format: LogFormat,
    pub admin: AdminConfig,
    pub demo: DemoConfig,
    pub latency: LatencyConfig,
    pub payment: PaymentConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            log_format: LogFormat::default(),
            admin: AdminConfig::default(),
            demo: DemoConfig::default(),
            latency: LatencyConfig::default(),
            payment: PaymentConfig::default(),
        }
    }
}

/// The administrator account seeded at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub email: String,
    pub name: String,
    /// Required; the server refuses to start without it.
    pub password: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: "admin@masterbis.com".to_string(),
            name: "Admin User".to_string(),
            password: None,
        }
    }
}

/// Credentials for the seeded demo students.
///
/// Without a password the demo accounts exist (they show up in the admin
/// views) but nobody can log in as them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub student_password: Option<String>,
}

/// Artificial delays awaited inside request handlers (milliseconds).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub login_ms: u64,
    pub subscription_request_ms: u64,
}

impl LatencyConfig {
    pub fn login(&self) -> Duration {
        Duration::from_millis(self.login_ms)
    }

    pub fn subscription_request(&self) -> Duration {
        Duration::from_millis(self.subscription_request_ms)
    }
}

/// Manual payment instructions shown to students.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    pub vodafone_cash_number: String,
    pub subscription_price: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            vodafone_cash_number: "01004790502".to_string(),
            subscription_price: "100 جنيه".to_string(),
        }
    }
}

/// `MASTERBIS_*` variables. Values stay strings until deserialization so
/// phone numbers keep their leading zero.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

impl Config {
    /// Loads the file at `path` (if any), applies environment overrides and
    /// checks the result is safe to serve.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        let config = Self::from_builder(builder.add_source(environment()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document on top of the defaults, without environment
    /// overrides or validation.
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Self::from_builder(::config::Config::builder().add_source(File::from_str(raw, FileFormat::Toml)))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config = builder.build().map_err(|e| ConfigError::Load(e.to_string()))?;
        config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.admin.password.as_deref() {
            Some(password) if !password.is_empty() => Ok(()),
            _ => Err(ConfigError::MissingAdminPassword),
        }
    }
}
