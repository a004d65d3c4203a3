use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest},
        extractors::AuthUser,
        jwt::JwtKeys,
        services,
    },
    error::{present, ApiError, ApiJson},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(get_me))
}

fn normalize_email(email: String) -> String {
    email.trim().to_lowercase()
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (Some(username), Some(email), Some(password)) = (
        present(payload.username),
        present(payload.email.map(normalize_email)),
        present(payload.password),
    ) else {
        return Err(ApiError::Validation(
            "Username, email and password are required".into(),
        ));
    };

    let user = services::register(state.users.as_ref(), &username, &email, &password).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.issue(user.id, &user.username, user.role)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully",
            token,
            user: user.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (Some(email), Some(password)) = (
        present(payload.email.map(normalize_email)),
        present(payload.password),
    ) else {
        return Err(ApiError::Validation(
            "Email and password are required".into(),
        ));
    };

    let user = services::verify_credentials(state.users.as_ref(), &email, &password).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.issue(user.id, &user.username, user.role)?;

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(AuthResponse {
        message: "Login successful",
        token,
        user: user.into(),
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = state
        .users
        .find_by_id(caller.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(user.into()))
}
