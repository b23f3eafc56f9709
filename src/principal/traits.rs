//! The two capability sets a principal is consumed through.
//!
//! - `AuthenticatedPrincipal`: what authorization checks need
//! - `OidcUser`: what the OIDC claims layer reads

use super::types::Authority;
use crate::services::oidc::{ClaimMap, IdToken, UserInfo};

pub trait AuthenticatedPrincipal {
    fn authorities(&self) -> Vec<Authority>;

    fn username(&self) -> &str;

    fn password(&self) -> Option<&str>;

    // Account lifecycle (lockout, expiry) is enforced by whoever maintains the user record.
    fn is_account_non_expired(&self) -> bool {
        true
    }

    fn is_account_non_locked(&self) -> bool {
        true
    }

    fn is_credentials_non_expired(&self) -> bool {
        true
    }

    fn is_enabled(&self) -> bool {
        true
    }

    /// Drop secret material once authentication has completed. Must be idempotent.
    fn erase_credentials(&mut self);
}

pub trait OidcUser {
    fn name(&self) -> Option<&str>;

    fn attributes(&self) -> Option<&ClaimMap>;

    fn claims(&self) -> Option<&ClaimMap>;

    fn user_info(&self) -> Option<&UserInfo>;

    fn id_token(&self) -> Option<&IdToken>;
}
