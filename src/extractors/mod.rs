/*!
 * Request extractors
 *
 * Responsibility:
 * - Hand the authenticated `Principal` an upstream middleware stored in request
 *   extensions to axum handlers
 */

mod current_principal;

pub use current_principal::CurrentPrincipal;
