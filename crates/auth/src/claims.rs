//! JWT claims types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Storefront role carried in the `role` claim
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Buyer,
    Seller,
    Admin,
}

impl Role {
    /// Parse a raw claim value. Missing, empty and unknown roles are buyers.
    pub fn from_claim(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("seller") => Role::Seller,
            Some("admin") => Role::Admin,
            _ => Role::Buyer,
        }
    }

    /// Check if this role may enter seller routes
    pub fn is_seller(&self) -> bool {
        matches!(self, Role::Seller)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Buyer => write!(f, "buyer"),
            Role::Seller => write!(f, "seller"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(raw) => Ok(Role::from_claim(Some(&raw))),
            _ => Ok(Role::Buyer),
        }
    }
}

/// Claims decoded from a bearer token payload.
///
/// Every field is optional on the wire, and a field of the wrong type reads
/// as its default rather than failing the whole payload. `sub` is required for
/// an identity but not for decoding, so callers can tell "unreadable" from
/// "incomplete".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    #[serde(
        default,
        deserialize_with = "deserialize_subject",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub: Option<u64>,
    /// Issued at
    #[serde(
        default,
        deserialize_with = "deserialize_epoch",
        skip_serializing_if = "Option::is_none"
    )]
    pub iat: Option<i64>,
    /// Expires at
    #[serde(
        default,
        deserialize_with = "deserialize_epoch",
        skip_serializing_if = "Option::is_none"
    )]
    pub exp: Option<i64>,
    /// Not before
    #[serde(
        default,
        deserialize_with = "deserialize_epoch",
        skip_serializing_if = "Option::is_none"
    )]
    pub nbf: Option<i64>,
    #[serde(default)]
    pub role: Role,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<String>,
    /// Seller onboarding status (pending, approved, rejected, ...)
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub seller_status: Option<String>,
    #[serde(default = "default_active", deserialize_with = "deserialize_active")]
    pub is_active: bool,
}

impl Default for Claims {
    fn default() -> Self {
        Self {
            sub: None,
            iat: None,
            exp: None,
            nbf: None,
            role: Role::Buyer,
            name: None,
            email: None,
            avatar: None,
            seller_status: None,
            is_active: true,
        }
    }
}

fn default_active() -> bool {
    true
}

fn deserialize_active<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(active) => active,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(text) => !text.trim().eq_ignore_ascii_case("false"),
        _ => true,
    })
}

/// Epoch seconds. Fractional values truncate; non-numbers read as absent.
fn deserialize_epoch<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|secs| secs.is_finite())
                .map(|secs| secs.trunc() as i64)
        }),
        _ => None,
    })
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

// Issuers disagree on whether `sub` is a number or a numeric string. Anything
// that is not a non-negative whole number reads as absent.
fn deserialize_subject<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|id| *id >= 0.0 && id.fract() == 0.0 && *id <= u64::MAX as f64)
                .map(|id| id as u64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}
