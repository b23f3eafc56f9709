/*
 * Responsibility
 * - Errors the crate hands to callers
 * - Accessors on the principal never fail; errors only come from the edges
 *   (late writes after erase, ID-token verification, configuration)
 */
use thiserror::Error;

use crate::config::ConfigError;
use crate::services::oidc::IdTokenError;

/// Raised when writing an erasable field of a principal whose credentials are already erased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PrincipalError {
    #[error("credentials already erased: cannot set {field}")]
    Erased { field: &'static str },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Principal(#[from] PrincipalError),

    #[error(transparent)]
    IdToken(#[from] IdTokenError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erased_message_names_the_field() {
        let err = PrincipalError::Erased { field: "claims" };
        assert_eq!(err.to_string(), "credentials already erased: cannot set claims");
    }

    #[test]
    fn wraps_config_errors() {
        let err: Error = ConfigError::Missing("OIDC_AUDIENCE").into();
        assert_eq!(err.to_string(), "missing configuration: OIDC_AUDIENCE");
    }
}
