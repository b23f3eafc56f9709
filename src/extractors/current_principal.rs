use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};
use uuid::Uuid;

use crate::principal::Principal;

/// Handler で Principal を受け取るための extractor
/// Authentication middleware must have inserted the `Principal` into request extensions.
/// Missing principal -> 401 (route not behind authentication, or middleware not applied)
pub struct CurrentPrincipal<ID = Uuid>(pub Principal<ID>);

impl<S, ID> FromRequestParts<S> for CurrentPrincipal<ID>
where
    S: Send + Sync,
    ID: Clone + Send + Sync + 'static,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Principal<ID>>() {
            Some(principal) => Ok(CurrentPrincipal(principal.clone())),
            None => {
                tracing::debug!(path = %parts.uri.path(), "no principal in request extensions");
                Err(StatusCode::UNAUTHORIZED)
            }
        }
    }
}
