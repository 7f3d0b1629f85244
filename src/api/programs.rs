//! Program management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::program::{CreateProgram, Program, UpdateProgram},
};

use super::{ApiJson, AuthenticatedUser};

/// List all programs
#[utoipa::path(
    get,
    path = "/programas",
    tag = "programas",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Program list", body = Vec<Program>)
    )
)]
pub async fn list_programs(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Program>>> {
    let programs = state.services.programs.list().await?;
    Ok(Json(programs))
}

/// Get program by ID
#[utoipa::path(
    get,
    path = "/programas/{id}",
    tag = "programas",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Program ID")),
    responses(
        (status = 200, description = "Program details", body = Program),
        (status = 404, description = "Program not found")
    )
)]
pub async fn get_program(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Program>> {
    let program = state.services.programs.get_by_id(id).await?;
    Ok(Json(program))
}

/// Create a program
#[utoipa::path(
    post,
    path = "/programas",
    tag = "programas",
    security(("bearer_auth" = [])),
    request_body = CreateProgram,
    responses(
        (status = 201, description = "Program created", body = Program),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_program(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateProgram>,
) -> AppResult<(StatusCode, Json<Program>)> {
    claims.require_admin()?;
    let program = state.services.programs.create(&data).await?;
    Ok((StatusCode::CREATED, Json(program)))
}

/// Update a program
#[utoipa::path(
    put,
    path = "/programas/{id}",
    tag = "programas",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Program ID")),
    request_body = UpdateProgram,
    responses(
        (status = 200, description = "Program updated", body = Program),
        (status = 404, description = "Program not found")
    )
)]
pub async fn update_program(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    ApiJson(data): ApiJson<UpdateProgram>,
) -> AppResult<Json<Program>> {
    claims.require_admin()?;
    let program = state.services.programs.update(id, &data).await?;
    Ok(Json(program))
}

/// Delete a program
#[utoipa::path(
    delete,
    path = "/programas/{id}",
    tag = "programas",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Program ID")),
    responses(
        (status = 204, description = "Program deleted"),
        (status = 404, description = "Program not found"),
        (status = 409, description = "Program still has enrolled students")
    )
)]
pub async fn delete_program(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.programs.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
