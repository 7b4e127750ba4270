//! Application configuration loaded from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

use crate::error::{ApiError, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP listening port. Unset or empty falls back to 8080.
    #[serde(default = "default_port", deserialize_with = "non_empty_or_default_port")]
    pub port: String,

    /// Directory holding the static documentation bundle.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    // === Observability ===
    /// Log filter (trace, debug, info, warn, error or full directives).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Port for the Prometheus exporter. Disabled when unset.
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("./docs")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn non_empty_or_default_port<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|p| !p.is_empty()).unwrap_or_else(default_port))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            docs_dir: default_docs_dir(),
            rust_log: default_log_level(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Build configuration from explicit key/value pairs (upper-case names).
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars.into_iter().map(|(k, v)| (k.into(), v.into()));
        Ok(envy::from_iter(vars)?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        let port = self.port_number()?;

        if self.metrics_port.is_some_and(|m| m != 0 && m == port) {
            return Err(ApiError::InvalidConfig(format!(
                "METRICS_PORT must differ from PORT ({port})"
            )));
        }

        Ok(())
    }

    /// Parse the configured port.
    pub fn port_number(&self) -> Result<u16> {
        self.port
            .parse()
            .map_err(|_| ApiError::InvalidConfig(format!("PORT is not a valid port: {:?}", self.port)))
    }

    /// Address the HTTP listener binds to (all interfaces).
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(SocketAddr::from(([0, 0, 0, 0], self.port_number()?)))
    }
}
