//! Assignment ledger endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::assignment::{
        AssignmentDetails, CreateAssignment, ReturnAssignment, UpdateAssignment,
    },
};

use super::{ApiJson, AuthenticatedUser};

/// List all assignments
#[utoipa::path(
    get,
    path = "/asignaciones",
    tag = "asignaciones",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Assignment list", body = Vec<AssignmentDetails>)
    )
)]
pub async fn list_assignments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<AssignmentDetails>>> {
    let assignments = state.services.assignments.list().await?;
    Ok(Json(assignments))
}

/// Get assignment by ID
#[utoipa::path(
    get,
    path = "/asignaciones/{id}",
    tag = "asignaciones",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment details", body = AssignmentDetails),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn get_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AssignmentDetails>> {
    let assignment = state.services.assignments.get_by_id(id).await?;
    Ok(Json(assignment))
}

/// Check out an instrument to a student
#[utoipa::path(
    post,
    path = "/asignaciones",
    tag = "asignaciones",
    security(("bearer_auth" = [])),
    request_body = CreateAssignment,
    responses(
        (status = 201, description = "Instrument assigned", body = AssignmentDetails),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Instrument or student not found"),
        (status = 409, description = "Instrument not available")
    )
)]
pub async fn create_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateAssignment>,
) -> AppResult<(StatusCode, Json<AssignmentDetails>)> {
    claims.require_admin()?;
    let assignment = state.services.assignments.checkout(&data).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// Update assignment fields. Does not recompute the instrument state.
#[utoipa::path(
    put,
    path = "/asignaciones/{id}",
    tag = "asignaciones",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Assignment ID")),
    request_body = UpdateAssignment,
    responses(
        (status = 200, description = "Assignment updated", body = AssignmentDetails),
        (status = 404, description = "Assignment, instrument or student not found")
    )
)]
pub async fn update_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    ApiJson(data): ApiJson<UpdateAssignment>,
) -> AppResult<Json<AssignmentDetails>> {
    claims.require_admin()?;
    let assignment = state.services.assignments.update(id, &data).await?;
    Ok(Json(assignment))
}

/// Record the return of a checked-out instrument
#[utoipa::path(
    post,
    path = "/asignaciones/{id}/devolver",
    tag = "asignaciones",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Assignment ID")),
    request_body = ReturnAssignment,
    responses(
        (status = 200, description = "Instrument returned", body = AssignmentDetails),
        (status = 404, description = "Assignment not found"),
        (status = 409, description = "Assignment already returned")
    )
)]
pub async fn return_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    ApiJson(data): ApiJson<ReturnAssignment>,
) -> AppResult<Json<AssignmentDetails>> {
    claims.require_admin()?;
    let assignment = state
        .services
        .assignments
        .return_instrument(id, data.fecha_devolucion)
        .await?;
    Ok(Json(assignment))
}

/// Delete an assignment
#[utoipa::path(
    delete,
    path = "/asignaciones/{id}",
    tag = "asignaciones",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 204, description = "Assignment deleted"),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn delete_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.assignments.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
