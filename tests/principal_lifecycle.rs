use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::json;

use principal_adapter::{
    AuthenticatedPrincipal, ClaimMap, IdTokenVerifier, OidcUser, Principal, PrincipalError,
    SecurityConfig, UserInfo, UserRecord,
};

const SECRET: &[u8] = b"lifecycle-secret";

fn verifier() -> IdTokenVerifier {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&["https://idp.example"]);
    validation.set_audience(&["web-client"]);
    IdTokenVerifier::from_parts(DecodingKey::from_secret(SECRET), validation)
}

fn id_token_for(sub: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &json!({
            "iss": "https://idp.example",
            "aud": "web-client",
            "sub": sub,
            "name": "Frank Example",
            "iat": now,
            "exp": now + 300
        }),
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap()
}

fn record() -> UserRecord<u64> {
    serde_json::from_value(json!({
        "id": 100,
        "username": "frank@example.com",
        "password": "$argon2id$v=19$not-a-real-hash",
        "roles": ["EDITOR", "REVIEWER"],
        "good_user": true,
        "good_admin": true
    }))
    .unwrap()
}

#[test]
fn login_flow_then_erase() {
    let config = SecurityConfig::from_lookup(|key| match key {
        "GOOD_USER_ROLE" => Some("VERIFIED".to_string()),
        _ => None,
    })
    .unwrap();

    let mut principal = Principal::with_privileged_roles(record(), config.privileged_roles.clone());

    let id_token = verifier().verify(&id_token_for("frank-sub")).unwrap();
    principal.set_name(id_token.claim_as_str("name").unwrap());
    principal.set_claims(id_token.claims().clone()).unwrap();
    principal
        .set_user_info(UserInfo::new(id_token.claims().clone()))
        .unwrap();
    let mut attributes = ClaimMap::new();
    attributes.insert("locale".into(), json!("en"));
    principal.set_attributes(attributes).unwrap();
    principal.set_id_token(id_token).unwrap();

    assert_eq!(
        principal
            .authorities()
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>(),
        ["ROLE_EDITOR", "ROLE_REVIEWER", "ROLE_VERIFIED", "ROLE_GOOD_ADMIN"]
    );
    assert!(principal.password().is_some());
    assert_eq!(
        principal.user_info().and_then(UserInfo::subject),
        Some("frank-sub")
    );
    assert_eq!(
        principal.id_token().and_then(|t| t.subject()),
        Some("frank-sub")
    );

    principal.erase_credentials();

    assert!(principal.password().is_none());
    assert!(principal.attributes().is_none());
    assert!(principal.claims().is_none());
    assert!(principal.user_info().is_none());
    assert!(principal.id_token().is_none());
    assert_eq!(principal.username(), "frank@example.com");
    assert_eq!(principal.current_user().id, 100);

    assert_eq!(
        principal.set_claims(ClaimMap::new()),
        Err(PrincipalError::Erased { field: "claims" })
    );
}

#[test]
fn authorization_view_serializes_without_secrets() {
    let mut principal = Principal::new(record());
    principal.set_name("Frank");
    principal.erase_credentials();

    let view = serde_json::to_value(principal.authorization_view()).unwrap();

    assert_eq!(
        view,
        json!({
            "username": "frank@example.com",
            "name": "Frank",
            "authorities": ["ROLE_EDITOR", "ROLE_REVIEWER", "ROLE_GOOD_USER", "ROLE_GOOD_ADMIN"],
            "account_non_expired": true,
            "account_non_locked": true,
            "credentials_non_expired": true,
            "enabled": true,
            "erased": true
        })
    );
    assert!(!view.to_string().contains("argon2"));
}

#[test]
fn principal_can_be_used_through_trait_objects() {
    fn describe(principal: &dyn AuthenticatedPrincipal) -> String {
        format!("{}:{}", principal.username(), principal.authorities().len())
    }

    fn subject(user: &dyn OidcUser) -> Option<String> {
        user.user_info().and_then(|u| u.subject().map(str::to_string))
    }

    let mut principal = Principal::new(record());
    let mut info = ClaimMap::new();
    info.insert("sub".into(), json!("frank-sub"));
    principal.set_user_info(UserInfo::new(info)).unwrap();

    assert_eq!(describe(&principal), "frank@example.com:4");
    assert_eq!(subject(&principal).as_deref(), Some("frank-sub"));
}
