//! Program (programa) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Program record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Program {
    pub id_programa: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
}

/// Create program request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProgram {
    #[validate(length(min = 1, message = "El nombre del programa es requerido"))]
    pub nombre: String,
    pub descripcion: Option<String>,
}

/// Update program request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProgram {
    #[validate(length(min = 1, message = "El nombre del programa es requerido"))]
    pub nombre: String,
    pub descripcion: Option<String>,
}
