use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use std::{error::Error as StdError, fmt};

use super::types::{ClaimMap, IdToken};

// Errors returned by ID-token verification.
#[derive(Debug)]
pub enum IdTokenError {
    InvalidKey(jsonwebtoken::errors::Error),
    Jwt(jsonwebtoken::errors::Error),
    EmptyClaim(&'static str),
}

impl fmt::Display for IdTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey(e) => write!(f, "invalid id token verification key: {}", e),
            Self::Jwt(e) => write!(f, "id token verification failed: {}", e),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
        }
    }
}

impl StdError for IdTokenError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::InvalidKey(e) | Self::Jwt(e) => Some(e),
            Self::EmptyClaim(_) => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for IdTokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// Verifies compact ID tokens issued by the configured provider and turns them into [`IdToken`].
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct IdTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for IdTokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("IdTokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl IdTokenVerifier {
    /// EdDSA (Ed25519) verifier. `public_key_pem` is the provider's public key in PEM.
    pub fn new(
        public_key_pem: &str,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Result<Self, IdTokenError> {
        let decoding_key = DecodingKey::from_ed_pem(public_key_pem.as_bytes())
            .map_err(IdTokenError::InvalidKey)?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = leeway_seconds;

        Ok(Self::from_parts(decoding_key, validation))
    }

    /// For providers signing with something other than Ed25519.
    pub fn from_parts(decoding_key: DecodingKey, validation: Validation) -> Self {
        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify signature and `exp`/`iss`/`aud`, then require a non-empty `sub`.
    pub fn verify(&self, token: &str) -> Result<IdToken, IdTokenError> {
        let data = jsonwebtoken::decode::<ClaimMap>(token, &self.decoding_key, &self.validation)?;
        let id_token = IdToken::from_claims(token, data.claims);

        if id_token.subject().is_none_or(|sub| sub.trim().is_empty()) {
            return Err(IdTokenError::EmptyClaim("sub"));
        }

        Ok(id_token)
    }
}
