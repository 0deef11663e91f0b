//! Bearer token decoding helpers
//!
//! Reads the payload segment of a JWT. Header and signature are ignored:
//! the API verifies tokens, the client only needs to know who it is.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::claims::Claims;
use crate::error::DecodeError;

/// Decode the payload of a bearer token, reporting why it failed.
pub fn try_decode(token: &str) -> Result<Claims, DecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::SegmentCount(segments.len()));
    }

    let payload = STANDARD.decode(to_standard_base64(segments[1]))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }

    Ok(Claims::deserialize(value)?)
}

/// Decode the payload of a bearer token.
///
/// Never fails loudly: any structural problem is logged and yields `None`.
pub fn decode(token: &str) -> Option<Claims> {
    match try_decode(token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!(error = %e, "Token decode failed");
            None
        }
    }
}

/// Check whether a token has expired at `now`.
///
/// Unreadable tokens and tokens without `exp` count as expired.
pub fn is_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    match decode(token).and_then(|claims| claims.exp) {
        Some(exp) => exp < now.timestamp(),
        None => true,
    }
}

/// Check whether a token has expired against the wall clock
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now())
}

/// Extract the user ID from a token, if it decodes and carries one
pub fn extract_subject(token: &str) -> Option<u64> {
    decode(token).and_then(|claims| claims.sub)
}

/// Extract bearer token from an Authorization header value
pub fn extract_bearer_token(header: &str) -> Result<&str, DecodeError> {
    match header.trim().strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(DecodeError::InvalidAuthorizationFormat),
    }
}

/// Map the URL-safe alphabet back to standard base64 and restore padding
fn to_standard_base64(segment: &str) -> String {
    let mut standard: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while standard.len() % 4 != 0 {
        standard.push('=');
    }
    standard
}
