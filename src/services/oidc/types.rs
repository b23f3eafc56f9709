use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Claims / attributes as delivered by the identity provider: string keys, opaque values.
pub type ClaimMap = Map<String, Value>;

fn str_claim<'a>(claims: &'a ClaimMap, key: &str) -> Option<&'a str> {
    claims.get(key).and_then(Value::as_str)
}

fn instant_claim(claims: &ClaimMap, key: &str) -> Option<DateTime<Utc>> {
    let secs = claims.get(key).and_then(Value::as_i64)?;
    DateTime::from_timestamp(secs, 0)
}

/// Payload of the OIDC UserInfo endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UserInfo {
    claims: ClaimMap,
}

impl UserInfo {
    pub fn new(claims: ClaimMap) -> Self {
        Self { claims }
    }

    pub fn claims(&self) -> &ClaimMap {
        &self.claims
    }

    pub fn claim_as_str(&self, key: &str) -> Option<&str> {
        str_claim(&self.claims, key)
    }

    pub fn subject(&self) -> Option<&str> {
        self.claim_as_str("sub")
    }

    pub fn email(&self) -> Option<&str> {
        self.claim_as_str("email")
    }

    pub fn name(&self) -> Option<&str> {
        self.claim_as_str("name")
    }

    pub fn preferred_username(&self) -> Option<&str> {
        self.claim_as_str("preferred_username")
    }
}

/// A verified OIDC ID token.
///
/// - `token_value` is the compact JWT; it is not printable via Debug
/// - `issued_at` / `expires_at` mirror `iat` / `exp` when those are numeric
#[derive(Clone, PartialEq)]
pub struct IdToken {
    token_value: String,
    issued_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
    claims: ClaimMap,
}

impl fmt::Debug for IdToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdToken")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .field("claims", &self.claims)
            .finish_non_exhaustive()
    }
}

impl IdToken {
    pub fn new(
        token_value: impl Into<String>,
        issued_at: Option<DateTime<Utc>>,
        expires_at: Option<DateTime<Utc>>,
        claims: ClaimMap,
    ) -> Self {
        Self {
            token_value: token_value.into(),
            issued_at,
            expires_at,
            claims,
        }
    }

    /// Build from decoded claims, taking `iat` / `exp` (unix seconds) from the claims themselves.
    pub fn from_claims(token_value: impl Into<String>, claims: ClaimMap) -> Self {
        let issued_at = instant_claim(&claims, "iat");
        let expires_at = instant_claim(&claims, "exp");
        Self::new(token_value, issued_at, expires_at, claims)
    }

    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn claims(&self) -> &ClaimMap {
        &self.claims
    }

    pub fn claim_as_str(&self, key: &str) -> Option<&str> {
        str_claim(&self.claims, key)
    }

    pub fn subject(&self) -> Option<&str> {
        self.claim_as_str("sub")
    }

    pub fn issuer(&self) -> Option<&str> {
        self.claim_as_str("iss")
    }

    /// A token without `exp` never expires here; lifetime policy belongs to the verifier.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}
