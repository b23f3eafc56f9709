/*!
 * Authenticated principal
 *
 * Responsibility:
 * - Wrap a stored user record and present it both as an authorization principal and as
 *   an OIDC user
 * - Derive role authorities from the record; hold the OIDC material until erase
 *
 * Public API:
 * - Principal
 * - AuthenticatedPrincipal / OidcUser
 * - UserRecord, Authority, PrivilegedRoles
 * - AuthorizationView
 */

mod core;
mod traits;
mod types;
mod view;

pub use self::core::Principal;
pub use traits::{AuthenticatedPrincipal, OidcUser};
pub use types::{
    Authority, DEFAULT_GOOD_ADMIN, DEFAULT_GOOD_USER, PrivilegedRoles, ROLE_PREFIX, UserRecord,
};
pub use view::AuthorizationView;
