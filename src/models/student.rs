//! Student (alumno) model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Student with its program name, for list and detail views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentDetails {
    pub id_alumno: i32,
    pub nombre: String,
    pub fecha_nacimiento: NaiveDate,
    pub genero: Option<String>,
    pub telefono_contacto: Option<String>,
    pub id_representante: Option<String>,
    pub id_programa: i32,
    pub programa_nombre: String,
    pub estado: Option<String>,
}

/// Create student request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudent {
    #[validate(length(min = 1, message = "El nombre del alumno es requerido"))]
    pub nombre: String,
    pub fecha_nacimiento: NaiveDate,
    pub genero: Option<String>,
    pub telefono_contacto: Option<String>,
    pub id_representante: Option<String>,
    pub id_programa: i32,
    pub estado: Option<String>,
}

/// Update student request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudent {
    #[validate(length(min = 1, message = "El nombre del alumno es requerido"))]
    pub nombre: String,
    pub fecha_nacimiento: NaiveDate,
    pub genero: Option<String>,
    pub telefono_contacto: Option<String>,
    pub id_representante: Option<String>,
    pub id_programa: i32,
    pub estado: Option<String>,
}
