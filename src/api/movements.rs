//! Movement ledger endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::movement::{CreateMovement, MovementDetails, UpdateMovement},
};

use super::{ApiJson, AuthenticatedUser};

/// List all inventory movements
#[utoipa::path(
    get,
    path = "/movimientos",
    tag = "movimientos",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Movement list", body = Vec<MovementDetails>)
    )
)]
pub async fn list_movements(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<MovementDetails>>> {
    let movements = state.services.movements.list().await?;
    Ok(Json(movements))
}

/// Get movement by ID
#[utoipa::path(
    get,
    path = "/movimientos/{id}",
    tag = "movimientos",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Movement ID")),
    responses(
        (status = 200, description = "Movement details", body = MovementDetails),
        (status = 404, description = "Movement not found")
    )
)]
pub async fn get_movement(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MovementDetails>> {
    let movement = state.services.movements.get_by_id(id).await?;
    Ok(Json(movement))
}

/// Record an inventory movement; the instrument transitions to the state
/// the movement type maps to
#[utoipa::path(
    post,
    path = "/movimientos",
    tag = "movimientos",
    security(("bearer_auth" = [])),
    request_body = CreateMovement,
    responses(
        (status = 201, description = "Movement recorded", body = MovementDetails),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Instrument not found")
    )
)]
pub async fn create_movement(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateMovement>,
) -> AppResult<(StatusCode, Json<MovementDetails>)> {
    claims.require_admin()?;
    let movement = state.services.movements.create(&data).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}

/// Edit a movement log entry. The instrument state is not recomputed.
#[utoipa::path(
    put,
    path = "/movimientos/{id}",
    tag = "movimientos",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Movement ID")),
    request_body = UpdateMovement,
    responses(
        (status = 200, description = "Movement updated", body = MovementDetails),
        (status = 404, description = "Movement or instrument not found")
    )
)]
pub async fn update_movement(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    ApiJson(data): ApiJson<UpdateMovement>,
) -> AppResult<Json<MovementDetails>> {
    claims.require_admin()?;
    let movement = state.services.movements.update(id, &data).await?;
    Ok(Json(movement))
}

/// Delete a movement log entry. Does not revert the instrument state.
#[utoipa::path(
    delete,
    path = "/movimientos/{id}",
    tag = "movimientos",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Movement ID")),
    responses(
        (status = 204, description = "Movement deleted"),
        (status = 404, description = "Movement not found")
    )
)]
pub async fn delete_movement(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.movements.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
