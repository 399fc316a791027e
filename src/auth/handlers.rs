use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, instrument};

use crate::auth::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, OkResponse, RegisterRequest,
    RegisterResponse,
};
use crate::auth::jwt::AuthUser;
use crate::auth::repo_types::PublicUser;
use crate::auth::services::AuthService;
use crate::auth::validation::{
    parse_change_password_input, parse_login_input, parse_register_input,
};
use crate::error::ApiError;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/change-password", post(change_password))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let input = parse_register_input(payload)?;
    let user = AuthService::from_ref(&state).register(input).await?;
    Ok((StatusCode::CREATED, Json(RegisterResponse { user })))
}

#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let input = parse_login_input(payload)?;
    let access_token = AuthService::from_ref(&state).login(input).await?;
    Ok(Json(LoginResponse { access_token }))
}

#[instrument(skip(state, user, payload))]
async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let input = parse_change_password_input(payload)?;
    AuthService::from_ref(&state)
        .change_password(user.user_id, input)
        .await?;
    Ok(Json(OkResponse { ok: true }))
}

#[instrument(skip(state, user))]
async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    debug!(user_id = user.user_id, username = %user.username, "loading profile");
    let user = state
        .users
        .get_by_id(user.user_id)
        .await?
        .ok_or(ApiError::NotFound("user not found"))?;
    Ok(Json(PublicUser::from(user)))
}
