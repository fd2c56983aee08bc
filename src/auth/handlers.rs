use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use crate::{
    auth::{
        dto::{LoginForm, RegisterRequest, TokenResponse},
        services::{authenticate, register_user},
    },
    error::ApiError,
    extract::{ApiForm, ApiJson},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = register_user(
        state.users.as_ref(),
        &payload.email,
        &payload.password,
        state.config.bcrypt_cost,
    )
    .await?;

    let access_token = state.jwt.sign(&user.email)?;
    Ok(Json(TokenResponse::bearer(access_token)))
}

#[instrument(skip(state, form), fields(email = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    ApiForm(form): ApiForm<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = authenticate(state.users.as_ref(), &form.username, &form.password).await?;

    let access_token = state.jwt.sign(&user.email)?;
    Ok(Json(TokenResponse::bearer(access_token)))
}
