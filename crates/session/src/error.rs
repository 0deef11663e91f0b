//! Session errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session configuration error: {0}")]
    Configuration(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Session check unavailable: {0}")]
    Unavailable(String),
}
