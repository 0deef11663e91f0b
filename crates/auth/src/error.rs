//! Token decoding errors

use thiserror::Error;

/// Why a bearer token could not be turned into claims or an identity.
///
/// Every variant except `IncompleteClaims` and `InvalidAuthorizationFormat`
/// is a malformed token.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed token: expected 3 segments, found {0}")]
    SegmentCount(usize),

    #[error("Malformed token: payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Malformed token: payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed token: payload is not a JSON object")]
    NotAnObject,

    #[error("Incomplete claims: token carries no subject")]
    IncompleteClaims,

    #[error("Invalid authorization header format")]
    InvalidAuthorizationFormat,
}

impl DecodeError {
    /// Check if the token itself is structurally broken
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            DecodeError::SegmentCount(_)
                | DecodeError::Base64(_)
                | DecodeError::Json(_)
                | DecodeError::NotAnObject
        )
    }
}
