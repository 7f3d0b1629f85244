//! API handlers for the Orquesta REST endpoints

pub mod assignments;
pub mod auth;
pub mod health;
pub mod instruments;
pub mod movements;
pub mod openapi;
pub mod programs;
pub mod students;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// JSON body extractor that reports malformed or incomplete bodies as
/// validation errors (400) instead of axum's default rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Extractor for authenticated user from JWT token.
///
/// A missing token is an authentication failure (401); a malformed, invalid
/// or expired token is rejected as forbidden (403), as is an insufficient
/// role further down the handler.
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::Authentication("Token de autenticación no proporcionado".to_string())
            })?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authorization(
                "Formato de encabezado de autorización inválido".to_string(),
            ));
        }

        let token = &auth_header[7..];

        // Validate JWT token using the secret from configuration
        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|_| {
                AppError::Authorization("Token de autenticación inválido o expirado".to_string())
            })?;

        Ok(AuthenticatedUser(claims))
    }
}
