/*
 * Responsibility
 * - Types the principal is built from: the stored user record, a granted authority,
 *   and the configured privileged-role suffixes
 * - No behaviour beyond construction and formatting lives here
 */
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix every role-derived authority carries.
pub const ROLE_PREFIX: &str = "ROLE_";

pub const DEFAULT_GOOD_USER: &str = "GOOD_USER";
pub const DEFAULT_GOOD_ADMIN: &str = "GOOD_ADMIN";

/// The stored user as handed over by whatever loads users.
///
/// - `good_user` / `good_admin` are computed upstream (verified, not blocked, etc.)
/// - `password` is never serialized and never shown by `Debug`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord<ID = Uuid> {
    pub id: ID,
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default)]
    pub roles: BTreeSet<String>,
    #[serde(default)]
    pub good_user: bool,
    #[serde(default)]
    pub good_admin: bool,
}

impl<ID> UserRecord<ID> {
    pub fn new(id: ID, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            password: None,
            roles: BTreeSet::new(),
            good_user: false,
            good_admin: false,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_flags(mut self, good_user: bool, good_admin: bool) -> Self {
        self.good_user = good_user;
        self.good_admin = good_admin;
        self
    }
}

impl<ID: fmt::Debug> fmt::Debug for UserRecord<ID> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the credential
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("roles", &self.roles)
            .field("good_user", &self.good_user)
            .field("good_admin", &self.good_admin)
            .finish()
    }
}

/// One granted authority, e.g. `ROLE_EDITOR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    pub fn new(authority: impl Into<String>) -> Self {
        Self(authority.into())
    }

    /// `ROLE_` + `role`
    pub fn role(role: &str) -> Self {
        Self(format!("{ROLE_PREFIX}{role}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Authority {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Authority {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Authority {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Role suffixes granted on top of the stored roles when the user record is flagged
/// as a good user / good admin. Fixed at startup (see `SecurityConfig`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivilegedRoles {
    pub good_user: String,
    pub good_admin: String,
}

impl PrivilegedRoles {
    pub fn new(good_user: impl Into<String>, good_admin: impl Into<String>) -> Self {
        Self {
            good_user: good_user.into(),
            good_admin: good_admin.into(),
        }
    }
}

impl Default for PrivilegedRoles {
    fn default() -> Self {
        Self::new(DEFAULT_GOOD_USER, DEFAULT_GOOD_ADMIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_authority_is_prefixed() {
        assert_eq!(Authority::role("EDITOR"), "ROLE_EDITOR");
        assert_eq!(Authority::role("EDITOR").to_string(), "ROLE_EDITOR");
    }

    #[test]
    fn authority_serializes_as_plain_string() {
        let json = serde_json::to_string(&Authority::role("ADMIN")).unwrap();
        assert_eq!(json, r#""ROLE_ADMIN""#);
    }

    #[test]
    fn user_record_debug_hides_password() {
        let user = UserRecord::new(1_u64, "alice").with_password("s3cret-pass");
        let printed = format!("{user:?}");

        assert!(printed.contains("alice"));
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("s3cret-pass"));
    }

    #[test]
    fn user_record_never_serializes_password() {
        let user = UserRecord::new(7_u64, "bob").with_password("hunter2");
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "bob");
    }

    #[test]
    fn user_record_deserializes_with_defaults() {
        let user: UserRecord<u64> =
            serde_json::from_str(r#"{"id": 3, "username": "carol", "password": "pw"}"#).unwrap();

        assert_eq!(user.password.as_deref(), Some("pw"));
        assert!(user.roles.is_empty());
        assert!(!user.good_user);
        assert!(!user.good_admin);
    }

    #[test]
    fn default_privileged_roles() {
        let roles = PrivilegedRoles::default();
        assert_eq!(roles.good_user, "GOOD_USER");
        assert_eq!(roles.good_admin, "GOOD_ADMIN");
    }
}
