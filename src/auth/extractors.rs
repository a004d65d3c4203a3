use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use super::{error::AuthError, jwt::JwtKeys, repo_types::Role};

/// Caller identity taken from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))?
        .trim();
    (!token.is_empty()).then_some(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthError::MissingToken)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "rejected bearer token");
            e
        })?;

        Ok(AuthUser {
            id: claims.sub,
            username: claims.username,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use axum::http::Request;

    fn keys() -> JwtKeys {
        JwtKeys::from_config(&JwtConfig {
            secret: "extractor-secret".into(),
            ttl_minutes: 5,
        })
    }

    async fn extract(header: Option<&str>) -> Result<AuthUser, AuthError> {
        let mut builder = Request::builder().uri("/");
        if let Some(h) = header {
            builder = builder.header(AUTHORIZATION, h);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AuthUser::from_request_parts(&mut parts, &keys()).await
    }

    #[tokio::test]
    async fn valid_bearer_yields_identity() {
        let token = keys().issue(3, "carol", Role::User).unwrap();
        let user = extract(Some(&format!("Bearer {token}"))).await.unwrap();
        assert_eq!(
            user,
            AuthUser {
                id: 3,
                username: "carol".into(),
                role: Role::User
            }
        );
    }

    #[tokio::test]
    async fn missing_header_or_token_is_missing_token() {
        assert!(matches!(extract(None).await, Err(AuthError::MissingToken)));
        assert!(matches!(extract(Some("Bearer ")).await, Err(AuthError::MissingToken)));
        assert!(matches!(extract(Some("Basic abc")).await, Err(AuthError::MissingToken)));
    }

    #[tokio::test]
    async fn bad_token_is_invalid() {
        assert!(matches!(
            extract(Some("Bearer abc.def.ghi")).await,
            Err(AuthError::InvalidToken)
        ));
    }
}
