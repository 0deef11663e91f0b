//! File-backed session restore
//!
//! Reads the token persisted by the sign-in flow. A missing file means the
//! user never signed in (or signed out) on this device.

use std::io::ErrorKind;
use std::path::PathBuf;

use lustre_auth::extract_bearer_token;

use crate::backend::SessionBackend;
use crate::error::SessionError;

pub struct FileSessionBackend {
    path: PathBuf,
}

impl FileSessionBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl SessionBackend for FileSessionBackend {
    async fn check_auth(&self) -> Result<Option<String>, SessionError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No persisted session");
                return Ok(None);
            }
            Err(e) => {
                return Err(SessionError::Storage(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let stored = contents.trim();
        if stored.is_empty() {
            return Ok(None);
        }

        // Tokens saved straight from an Authorization header keep their scheme
        let token = if stored.starts_with("Bearer ") {
            extract_bearer_token(stored)
                .map_err(|e| SessionError::Storage(format!("persisted token unreadable: {e}")))?
        } else {
            stored
        };

        Ok(Some(token.to_string()))
    }
}
