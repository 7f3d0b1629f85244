//! Instrument (instrumento) model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::InstrumentStatus;

/// Instrument record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Instrument {
    pub id_instrumento: i32,
    pub nombre: String,
    pub categoria: String,
    /// Immutable business key
    pub numero_serie: String,
    pub estado: InstrumentStatus,
    pub fecha_adquisicion: Option<NaiveDate>,
    pub foto_url: Option<String>,
    pub ubicacion: Option<String>,
}

/// Create instrument request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInstrument {
    #[validate(length(min = 1, message = "El nombre del instrumento es requerido"))]
    pub nombre: String,
    #[validate(length(min = 1, message = "La categoría es requerida"))]
    pub categoria: String,
    #[validate(length(min = 1, message = "El número de serie es requerido"))]
    pub numero_serie: String,
    /// Defaults to Disponible
    pub estado: Option<InstrumentStatus>,
    pub fecha_adquisicion: Option<NaiveDate>,
    pub foto_url: Option<String>,
    pub ubicacion: Option<String>,
}

/// Update instrument request. `numero_serie` is immutable and cannot be
/// changed here. Setting `estado` is the administrative override path,
/// bypassing the assignment and movement ledgers.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateInstrument {
    #[validate(length(min = 1, message = "El nombre del instrumento es requerido"))]
    pub nombre: String,
    #[validate(length(min = 1, message = "La categoría es requerida"))]
    pub categoria: String,
    pub estado: Option<InstrumentStatus>,
    pub fecha_adquisicion: Option<NaiveDate>,
    pub foto_url: Option<String>,
    pub ubicacion: Option<String>,
}
