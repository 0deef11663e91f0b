//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_API_TIMEOUT_SECS: u64 = 15;
const DEFAULT_SESSION_PROVIDER: &str = "mock";
const DEFAULT_RUST_LOG: &str = "lustre=info";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the storefront REST API
    pub api_base_url: String,
    /// Per-request timeout for REST calls
    pub api_timeout_secs: u64,

    /// Session backend used by the startup auth check (file, mock)
    pub session_provider: String,
    /// Persisted token location for the file session backend
    pub session_file: Option<PathBuf>,

    /// Runtime configuration
    pub rust_log: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let api_timeout_secs = match env::var("LUSTRE_API_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                Error::Configuration(format!(
                    "LUSTRE_API_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}"
                ))
            })?,
            Err(_) => DEFAULT_API_TIMEOUT_SECS,
        };

        let session_provider = env::var("LUSTRE_SESSION_PROVIDER")
            .unwrap_or_else(|_| DEFAULT_SESSION_PROVIDER.to_string());
        let session_file = env::var("LUSTRE_SESSION_FILE").ok().map(PathBuf::from);

        if session_provider == "file" && session_file.is_none() {
            return Err(Error::Configuration(
                "LUSTRE_SESSION_FILE is required for the file session provider".to_string(),
            ));
        }

        let config = Self {
            api_base_url: env::var("LUSTRE_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            api_timeout_secs,
            session_provider,
            session_file,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.to_string()),
        };

        tracing::debug!(
            api_base_url = %config.api_base_url,
            session_provider = %config.session_provider,
            "Configuration loaded"
        );

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            session_provider: DEFAULT_SESSION_PROVIDER.to_string(),
            session_file: None,
            rust_log: DEFAULT_RUST_LOG.to_string(),
        }
    }
}
