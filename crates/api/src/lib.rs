//! Lustre Seller API Client
//!
//! Thin REST client for the seller resources behind the guarded routes:
//! - Bearer-authenticated list/create/update/delete per resource
//! - Server error messages surfaced for display, with a generic fallback
//! - Base URL and timeout from the shared configuration

pub mod client;
mod error;

use std::time::Duration;

use lustre_common::Config;

pub use client::{ApiClient, ResourceClient};
pub use error::ApiError;

/// Seller REST resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Messages,
    Products,
    Refunds,
}

impl Resource {
    /// Path of the collection relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Messages => "seller/messages",
            Resource::Products => "seller/products",
            Resource::Refunds => "seller/refunds",
        }
    }
}

impl std::str::FromStr for Resource {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "messages" => Ok(Resource::Messages),
            "products" => Ok(Resource::Products),
            "refunds" => Ok(Resource::Refunds),
            other => Err(ApiError::Configuration(format!(
                "Unknown resource: {}. Supported resources: messages, products, refunds",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL, e.g. `http://localhost:8000/api`
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl From<&Config> for ApiConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            timeout: Duration::from_secs(config.api_timeout_secs),
        }
    }
}
