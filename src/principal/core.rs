use std::sync::Arc;

use uuid::Uuid;

use super::traits::{AuthenticatedPrincipal, OidcUser};
use super::types::{Authority, PrivilegedRoles, UserRecord};
use super::view::AuthorizationView;
use crate::error::PrincipalError;
use crate::services::oidc::{ClaimMap, IdToken, UserInfo};

/// OIDC material discovered by the login flow. Dropped as a whole on erase.
#[derive(Debug, Clone, Default)]
struct OidcDetails {
    attributes: Option<ClaimMap>,
    claims: Option<ClaimMap>,
    user_info: Option<UserInfo>,
    id_token: Option<IdToken>,
}

#[derive(Debug, Clone)]
enum CredentialState {
    Active(OidcDetails),
    Erased,
}

/// Authenticated principal wrapping a stored user record.
///
/// Serves both as the authorization-facing principal ([`AuthenticatedPrincipal`]) and as
/// the OIDC user ([`OidcUser`]). One instance per authenticated request/session.
///
/// - `authorities()` = `ROLE_<role>` per stored role, then `ROLE_<good_user>` if the record
///   is a good user, then `ROLE_<good_admin>` if it is also a good admin (no de-duplication)
/// - `erase_credentials()` is one-way: the password, attributes, claims, user info and ID
///   token are gone for good; the username and display name stay
#[derive(Debug, Clone)]
pub struct Principal<ID = Uuid> {
    user: UserRecord<ID>,
    privileged: Arc<PrivilegedRoles>,
    name: Option<String>,
    state: CredentialState,
}

impl<ID> Principal<ID> {
    pub fn new(user: UserRecord<ID>) -> Self {
        Self::with_privileged_roles(user, Arc::new(PrivilegedRoles::default()))
    }

    pub fn with_privileged_roles(user: UserRecord<ID>, privileged: Arc<PrivilegedRoles>) -> Self {
        Self {
            user,
            privileged,
            name: None,
            state: CredentialState::Active(OidcDetails::default()),
        }
    }

    pub fn current_user(&self) -> &UserRecord<ID> {
        &self.user
    }

    pub fn into_user(self) -> UserRecord<ID> {
        self.user
    }

    pub fn is_erased(&self) -> bool {
        matches!(self.state, CredentialState::Erased)
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities().iter().any(|a| a == authority)
    }

    /// `has_role("ADMIN")` checks for `ROLE_ADMIN`.
    pub fn has_role(&self, role: &str) -> bool {
        self.has_authority(Authority::role(role).as_str())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn set_attributes(&mut self, attributes: ClaimMap) -> Result<(), PrincipalError> {
        self.details_mut("attributes")?.attributes = Some(attributes);
        Ok(())
    }

    pub fn set_claims(&mut self, claims: ClaimMap) -> Result<(), PrincipalError> {
        self.details_mut("claims")?.claims = Some(claims);
        Ok(())
    }

    pub fn set_user_info(&mut self, user_info: UserInfo) -> Result<(), PrincipalError> {
        self.details_mut("user_info")?.user_info = Some(user_info);
        Ok(())
    }

    pub fn set_id_token(&mut self, id_token: IdToken) -> Result<(), PrincipalError> {
        self.details_mut("id_token")?.id_token = Some(id_token);
        Ok(())
    }

    /// Snapshot for callers that need to hand the authorization state elsewhere (logs, JSON).
    pub fn authorization_view(&self) -> AuthorizationView {
        AuthorizationView {
            username: self.user.username.clone(),
            name: self.name.clone(),
            authorities: self.authorities(),
            account_non_expired: self.is_account_non_expired(),
            account_non_locked: self.is_account_non_locked(),
            credentials_non_expired: self.is_credentials_non_expired(),
            enabled: self.is_enabled(),
            erased: self.is_erased(),
        }
    }

    fn details(&self) -> Option<&OidcDetails> {
        match &self.state {
            CredentialState::Active(details) => Some(details),
            CredentialState::Erased => None,
        }
    }

    fn details_mut(&mut self, field: &'static str) -> Result<&mut OidcDetails, PrincipalError> {
        match &mut self.state {
            CredentialState::Active(details) => Ok(details),
            CredentialState::Erased => {
                tracing::warn!(field, "rejected write to erased principal");
                Err(PrincipalError::Erased { field })
            }
        }
    }
}

impl<ID> AuthenticatedPrincipal for Principal<ID> {
    fn authorities(&self) -> Vec<Authority> {
        let roles = &self.user.roles;
        let mut authorities = Vec::with_capacity(roles.len() + 2);
        authorities.extend(roles.iter().map(|role| Authority::role(role)));

        if self.user.good_user {
            authorities.push(Authority::role(&self.privileged.good_user));

            if self.user.good_admin {
                authorities.push(Authority::role(&self.privileged.good_admin));
            }
        }

        authorities
    }

    fn username(&self) -> &str {
        &self.user.username
    }

    fn password(&self) -> Option<&str> {
        self.user.password.as_deref()
    }

    fn erase_credentials(&mut self) {
        self.user.password = None;

        if !self.is_erased() {
            self.state = CredentialState::Erased;
            tracing::debug!(username = %self.user.username, "principal credentials erased");
        }
    }
}

impl<ID> OidcUser for Principal<ID> {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn attributes(&self) -> Option<&ClaimMap> {
        self.details()?.attributes.as_ref()
    }

    fn claims(&self) -> Option<&ClaimMap> {
        self.details()?.claims.as_ref()
    }

    fn user_info(&self) -> Option<&UserInfo> {
        self.details()?.user_info.as_ref()
    }

    fn id_token(&self) -> Option<&IdToken> {
        self.details()?.id_token.as_ref()
    }
}
