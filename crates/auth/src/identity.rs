//! Signed-in user identity derived from the stored token

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::claims::{Claims, Role};
use crate::error::DecodeError;
use crate::jwt;

/// `seller_status` value that marks a seller as approved
pub const SELLER_APPROVED_STATUS: &str = "approved";

/// User view model projected from token claims.
///
/// `phone` and `created_at` are never carried by the token and stay unset
/// until a profile is fetched from the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub seller_status: Option<String>,
    pub seller_approved: bool,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identity {
    /// Check if this user should see the seller area
    pub fn is_seller(&self) -> bool {
        self.role.is_seller()
    }
}

impl TryFrom<Claims> for Identity {
    type Error = DecodeError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims.sub.ok_or(DecodeError::IncompleteClaims)?;
        let seller_approved = claims.seller_status.as_deref() == Some(SELLER_APPROVED_STATUS);

        Ok(Self {
            id,
            name: claims.name.unwrap_or_default(),
            email: claims.email.unwrap_or_default(),
            role: claims.role,
            avatar: claims.avatar,
            phone: None,
            seller_status: claims.seller_status,
            seller_approved,
            is_active: claims.is_active,
            created_at: None,
        })
    }
}

/// Derive the current identity from the stored token.
///
/// Absent, empty, malformed and subject-less tokens all yield `None`.
pub fn derive_identity(token: Option<&str>) -> Option<Identity> {
    let token = token.filter(|t| !t.is_empty())?;

    match jwt::try_decode(token).and_then(Identity::try_from) {
        Ok(identity) => Some(identity),
        Err(e) if e.is_malformed() => {
            tracing::debug!(error = %e, "Malformed token; no identity");
            None
        }
        Err(e) => {
            tracing::debug!(error = %e, "Token decoded without a usable identity");
            None
        }
    }
}

/// Memoizes [`derive_identity`] on the last token value seen.
#[derive(Debug, Default)]
pub struct IdentityCache {
    token: Option<String>,
    identity: Option<Identity>,
    primed: bool,
    derivations: u64,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the identity for `token`, deriving it only if the token changed
    pub fn resolve(&mut self, token: Option<&str>) -> Option<&Identity> {
        if !self.primed || self.token.as_deref() != token {
            self.identity = derive_identity(token);
            self.token = token.map(str::to_owned);
            self.primed = true;
            self.derivations += 1;
        }
        self.identity.as_ref()
    }

    /// Identity from the last resolution, without touching the token
    pub fn current(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Number of times the identity was actually derived
    pub fn derivations(&self) -> u64 {
        self.derivations
    }
}
