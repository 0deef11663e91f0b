//! Common error types and handling for Lustre

/// Message shown to the user when a failed action carries no specific reason
pub const FALLBACK_ACTION_MESSAGE: &str = "Something went wrong. Please try again.";

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Lustre client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    /// A remote action (create, update, delete, ...) failed
    #[error("Action failed: {}", .0.as_deref().unwrap_or(FALLBACK_ACTION_MESSAGE))]
    Action(Option<String>),
}

impl Error {
    /// Get the error code used in logs and alerts
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Configuration(_) => "CONFIGURATION_ERROR",
            Error::Authentication(_) => "AUTHENTICATION_ERROR",
            Error::Action(_) => "ACTION_FAILED",
        }
    }

    /// Message suitable for an alert shown to the user.
    ///
    /// Only action and authentication failures carry text meant for users;
    /// everything else collapses to [`FALLBACK_ACTION_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            Error::Action(Some(message)) | Error::Authentication(message)
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            _ => FALLBACK_ACTION_MESSAGE.to_string(),
        }
    }
}
