//! Client-side bearer token handling for the Lustre storefront
//!
//! Decodes JWT payloads without verifying signatures, derives the signed-in
//! user's identity from the decoded claims, and memoizes that derivation per
//! token value. Authorization is enforced by the API; nothing here is a
//! security boundary.

mod claims;
mod error;
mod identity;
pub mod jwt;

pub use claims::{Claims, Role};
pub use error::DecodeError;
pub use identity::{derive_identity, Identity, IdentityCache, SELLER_APPROVED_STATUS};
pub use jwt::{decode, extract_bearer_token, extract_subject, is_expired, is_expired_at, try_decode};
