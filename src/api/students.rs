//! Student management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::student::{CreateStudent, StudentDetails, UpdateStudent},
};

use super::{ApiJson, AuthenticatedUser};

/// List all students
#[utoipa::path(
    get,
    path = "/alumnos",
    tag = "alumnos",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Student list", body = Vec<StudentDetails>)
    )
)]
pub async fn list_students(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<StudentDetails>>> {
    let students = state.services.students.list().await?;
    Ok(Json(students))
}

/// Get student by ID
#[utoipa::path(
    get,
    path = "/alumnos/{id}",
    tag = "alumnos",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = StudentDetails),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<StudentDetails>> {
    let student = state.services.students.get_by_id(id).await?;
    Ok(Json(student))
}

/// Enroll a student
#[utoipa::path(
    post,
    path = "/alumnos",
    tag = "alumnos",
    security(("bearer_auth" = [])),
    request_body = CreateStudent,
    responses(
        (status = 201, description = "Student created", body = StudentDetails),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Program not found")
    )
)]
pub async fn create_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateStudent>,
) -> AppResult<(StatusCode, Json<StudentDetails>)> {
    claims.require_admin()?;
    let student = state.services.students.create(&data).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Update a student
#[utoipa::path(
    put,
    path = "/alumnos/{id}",
    tag = "alumnos",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    request_body = UpdateStudent,
    responses(
        (status = 200, description = "Student updated", body = StudentDetails),
        (status = 404, description = "Student or program not found")
    )
)]
pub async fn update_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    ApiJson(data): ApiJson<UpdateStudent>,
) -> AppResult<Json<StudentDetails>> {
    claims.require_admin()?;
    let student = state.services.students.update(id, &data).await?;
    Ok(Json(student))
}

/// Delete a student
#[utoipa::path(
    delete,
    path = "/alumnos/{id}",
    tag = "alumnos",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Student still referenced by assignments")
    )
)]
pub async fn delete_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
