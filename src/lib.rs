/*
 * Responsibility
 * - Adapt a stored user record into the authenticated principal seen by authorization
 *   and the OIDC user seen by the claims layer
 * - Public surface re-exported here; the binary (principal-inspect) only uses this
 */
pub mod config;
pub mod error;
pub mod extractors;
pub mod principal;
pub mod services;

pub use config::{AppEnv, ConfigError, SecurityConfig};
pub use error::{Error, PrincipalError, Result};
pub use extractors::CurrentPrincipal;
pub use principal::{
    AuthenticatedPrincipal, Authority, AuthorizationView, OidcUser, Principal, PrivilegedRoles,
    UserRecord,
};
pub use services::oidc::{ClaimMap, IdToken, IdTokenError, IdTokenVerifier, UserInfo};
