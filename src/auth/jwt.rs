use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::{
    auth::{claims::Claims, error::AuthError, repo_types::Role},
    config::JwtConfig,
    state::AppState,
};

/// Signing and verification keys plus the token lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            ttl: Duration::from_secs(
                u64::try_from(cfg.ttl_minutes)
                    .unwrap_or(0)
                    .saturating_mul(60),
            ),
        }
    }

    pub fn issue(&self, user_id: i64, username: &str, role: Role) -> Result<String, AuthError> {
        self.issue_at(user_id, username, role, OffsetDateTime::now_utc())
    }

    pub fn issue_at(
        &self,
        user_id: i64,
        username: &str,
        role: Role,
        issued_at: OffsetDateTime,
    ) -> Result<String, AuthError> {
        let exp = TimeDuration::try_from(self.ttl)
            .ok()
            .and_then(|ttl| issued_at.checked_add(ttl))
            .ok_or_else(|| AuthError::Internal("token expiry out of range".into()))?;
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            role,
            iat: issued_at.unix_timestamp(),
            exp: exp.unix_timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(user_id, role = role.as_str(), "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken,
            }
        })?;

        // jsonwebtoken still accepts a token in its final second
        if data.claims.exp <= OffsetDateTime::now_utc().unix_timestamp() {
            return Err(AuthError::ExpiredToken);
        }

        debug!(user_id = data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}
