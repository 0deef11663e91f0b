//! Startup session check
//!
//! Provides the `check_auth` collaborator run once before the navigator
//! starts guarding routes:
//! - File-backed restore of a previously persisted token
//! - Mock backend for tests and local development

pub mod file;
pub mod mock;

use lustre_common::Config;

use crate::error::SessionError;

/// Session backend trait for different implementations.
#[async_trait::async_trait]
pub trait SessionBackend: Send + Sync {
    /// Restore the token of a previous session, if any.
    async fn check_auth(&self) -> Result<Option<String>, SessionError>;
}

/// Factory for creating SessionBackend implementations.
pub struct SessionBackendFactory;

impl SessionBackendFactory {
    /// Create a SessionBackend based on configuration.
    pub fn create(config: &Config) -> Result<Box<dyn SessionBackend>, SessionError> {
        match config.session_provider.as_str() {
            "file" => {
                let path = config.session_file.clone().ok_or_else(|| {
                    SessionError::Configuration(
                        "LUSTRE_SESSION_FILE is required for the file session provider"
                            .to_string(),
                    )
                })?;
                tracing::info!(path = %path.display(), "Creating file session backend");
                Ok(Box::new(file::FileSessionBackend::new(path)))
            }
            "mock" => {
                tracing::info!("Creating mock session backend");
                Ok(Box::new(mock::MockSessionBackend::signed_out()))
            }
            provider => Err(SessionError::Configuration(format!(
                "Unknown session provider: {}. Supported providers: file, mock",
                provider
            ))),
        }
    }
}
