//! Inventory movement (movimiento_inventario) model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::MovementType;

/// Movement with instrument name and serial, for list and detail views.
/// The ledger is append-mostly; rows are joined with the instrument on
/// every read.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MovementDetails {
    pub id_movimiento: i32,
    pub id_instrumento: i32,
    pub instrumento_nombre: String,
    pub instrumento_numero_serie: String,
    pub tipo_movimiento: MovementType,
    pub fecha_movimiento: NaiveDate,
    pub descripcion: Option<String>,
    pub responsable: String,
}

/// Create movement request. Creation drives the instrument into the state
/// given by the movement type.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMovement {
    pub id_instrumento: i32,
    pub tipo_movimiento: MovementType,
    pub fecha_movimiento: NaiveDate,
    pub descripcion: Option<String>,
    #[validate(length(min = 1, message = "El responsable es requerido"))]
    pub responsable: String,
}

/// Update movement request. Edits the log entry only; the instrument state
/// is deliberately left untouched.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMovement {
    pub id_instrumento: i32,
    pub tipo_movimiento: MovementType,
    pub fecha_movimiento: NaiveDate,
    pub descripcion: Option<String>,
    #[validate(length(min = 1, message = "El responsable es requerido"))]
    pub responsable: String,
}
