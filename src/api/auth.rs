//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::{LoginUser, RegisterUser, UserPublic},
};

use super::ApiJson;

/// Login response with signed token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// Signed JWT
    pub token: String,
    /// Token type for the Authorization header
    pub token_type: String,
    /// Authenticated user
    pub user: UserPublic,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User registered", body = UserPublic),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<RegisterUser>,
) -> AppResult<(StatusCode, Json<UserPublic>)> {
    let user = state.services.auth.register(request).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Authenticate and obtain a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<LoginUser>,
) -> AppResult<Json<LoginResponse>> {
    let (token, user) = state.services.auth.login(&request).await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        user: user.into(),
    }))
}
