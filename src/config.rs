/*
 * Responsibility
 * - Read security settings from the environment (.env is honoured via dotenvy)
 *   - privileged role suffixes (GOOD_USER / GOOD_ADMIN)
 *   - optional ID-token verification settings
 * - Validate them once at startup (fail early on bad values)
 */
use std::fmt;
use std::sync::Arc;

use crate::principal::{DEFAULT_GOOD_ADMIN, DEFAULT_GOOD_USER, PrivilegedRoles};
use crate::services::oidc::{IdTokenError, IdTokenVerifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OidcSettings {
    pub issuer: String,
    pub audience: String,
    // Provider's Ed25519 public key (PEM)
    pub public_key_pem: String,
    pub leeway_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub app_env: AppEnv,
    pub privileged_roles: Arc<PrivilegedRoles>,
    // None: ID tokens are not verified (OIDC_ISSUER unset)
    pub oidc: Option<OidcSettings>,
}

impl SecurityConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SecurityConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let good_user = role_suffix(&lookup, "GOOD_USER_ROLE", DEFAULT_GOOD_USER)?;
        let good_admin = role_suffix(&lookup, "GOOD_ADMIN_ROLE", DEFAULT_GOOD_ADMIN)?;

        let oidc = match lookup("OIDC_ISSUER").filter(|s| !s.trim().is_empty()) {
            None => None,
            Some(issuer) => {
                let audience = lookup("OIDC_AUDIENCE")
                    .filter(|s| !s.trim().is_empty())
                    .ok_or(ConfigError::Missing("OIDC_AUDIENCE"))?;

                let public_key_pem = lookup("OIDC_PUBLIC_KEY_PEM")
                    .ok_or(ConfigError::Missing("OIDC_PUBLIC_KEY_PEM"))?
                    .replace("\\n", "\n");

                let leeway_seconds = match lookup("ID_TOKEN_LEEWAY_SECONDS") {
                    None => 60,
                    Some(v) => v
                        .parse::<u64>()
                        .map_err(|_| ConfigError::Invalid("ID_TOKEN_LEEWAY_SECONDS"))?,
                };

                Some(OidcSettings {
                    issuer,
                    audience,
                    public_key_pem,
                    leeway_seconds,
                })
            }
        };

        Ok(Self {
            app_env,
            privileged_roles: Arc::new(PrivilegedRoles::new(good_user, good_admin)),
            oidc,
        })
    }

    pub fn id_token_verifier(&self) -> Result<Option<IdTokenVerifier>, IdTokenError> {
        self.oidc
            .as_ref()
            .map(|oidc| {
                IdTokenVerifier::new(
                    &oidc.public_key_pem,
                    &oidc.issuer,
                    &oidc.audience,
                    oidc.leeway_seconds,
                )
            })
            .transpose()
    }
}

fn role_suffix<F>(lookup: &F, key: &'static str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_else(|| default.to_string());
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(ConfigError::Invalid(key));
    }
    Ok(value)
}
