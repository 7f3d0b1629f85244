//! Instrument assignment (asignacion_instrumento) model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Assignment row. An open assignment (null `fecha_devolucion`) means the
/// instrument is currently checked out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    pub id_asignacion: i32,
    pub id_instrumento: i32,
    pub id_alumno: i32,
    pub fecha_asignacion: NaiveDate,
    pub fecha_devolucion: Option<NaiveDate>,
}

/// Assignment with instrument and student names, for list and detail views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssignmentDetails {
    pub id_asignacion: i32,
    pub id_instrumento: i32,
    pub instrumento_nombre: String,
    pub instrumento_numero_serie: String,
    pub id_alumno: i32,
    pub alumno_nombre: Option<String>,
    pub fecha_asignacion: NaiveDate,
    pub fecha_devolucion: Option<NaiveDate>,
}

/// Create assignment (checkout) request. A non-null `fecha_devolucion`
/// records an already-closed historical loan.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAssignment {
    pub id_instrumento: i32,
    pub id_alumno: i32,
    pub fecha_asignacion: NaiveDate,
    pub fecha_devolucion: Option<NaiveDate>,
}

/// Update assignment request. Only mutates the ledger row; the instrument
/// state is not recomputed.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAssignment {
    pub id_instrumento: i32,
    pub id_alumno: i32,
    pub fecha_asignacion: NaiveDate,
    pub fecha_devolucion: Option<NaiveDate>,
}

/// Return (devolver) request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReturnAssignment {
    /// Defaults to the current date when omitted
    pub fecha_devolucion: Option<NaiveDate>,
}
