//! Instrument directory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::instrument::{CreateInstrument, Instrument, UpdateInstrument},
};

use super::{ApiJson, AuthenticatedUser};

/// List all instruments
#[utoipa::path(
    get,
    path = "/instrumentos",
    tag = "instrumentos",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Instrument list", body = Vec<Instrument>)
    )
)]
pub async fn list_instruments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Instrument>>> {
    let instruments = state.services.instruments.list().await?;
    Ok(Json(instruments))
}

/// Get instrument by ID
#[utoipa::path(
    get,
    path = "/instrumentos/{id}",
    tag = "instrumentos",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Instrument ID")),
    responses(
        (status = 200, description = "Instrument details", body = Instrument),
        (status = 404, description = "Instrument not found")
    )
)]
pub async fn get_instrument(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Instrument>> {
    let instrument = state.services.instruments.get_by_id(id).await?;
    Ok(Json(instrument))
}

/// Register an instrument
#[utoipa::path(
    post,
    path = "/instrumentos",
    tag = "instrumentos",
    security(("bearer_auth" = [])),
    request_body = CreateInstrument,
    responses(
        (status = 201, description = "Instrument created", body = Instrument),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Serial number already registered")
    )
)]
pub async fn create_instrument(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateInstrument>,
) -> AppResult<(StatusCode, Json<Instrument>)> {
    claims.require_admin()?;
    let instrument = state.services.instruments.create(&data).await?;
    Ok((StatusCode::CREATED, Json(instrument)))
}

/// Update an instrument. Setting `estado` here is the administrative
/// override, bypassing the assignment and movement ledgers.
#[utoipa::path(
    put,
    path = "/instrumentos/{id}",
    tag = "instrumentos",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Instrument ID")),
    request_body = UpdateInstrument,
    responses(
        (status = 200, description = "Instrument updated", body = Instrument),
        (status = 404, description = "Instrument not found")
    )
)]
pub async fn update_instrument(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    ApiJson(data): ApiJson<UpdateInstrument>,
) -> AppResult<Json<Instrument>> {
    claims.require_admin()?;
    let instrument = state.services.instruments.update(id, &data).await?;
    Ok(Json(instrument))
}

/// Delete an instrument
#[utoipa::path(
    delete,
    path = "/instrumentos/{id}",
    tag = "instrumentos",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Instrument ID")),
    responses(
        (status = 204, description = "Instrument deleted"),
        (status = 404, description = "Instrument not found"),
        (status = 409, description = "Instrument has ledger history")
    )
)]
pub async fn delete_instrument(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.instruments.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
