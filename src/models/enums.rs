//! Shared domain enums

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// InstrumentStatus
// ---------------------------------------------------------------------------

/// Instrument lifecycle state (`estado` column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum InstrumentStatus {
    Disponible,
    Asignado,
    Mantenimiento,
    #[serde(rename = "De Baja")]
    DeBaja,
}

impl InstrumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentStatus::Disponible => "Disponible",
            InstrumentStatus::Asignado => "Asignado",
            InstrumentStatus::Mantenimiento => "Mantenimiento",
            InstrumentStatus::DeBaja => "De Baja",
        }
    }
}

impl std::fmt::Display for InstrumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InstrumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Disponible" => Ok(InstrumentStatus::Disponible),
            "Asignado" => Ok(InstrumentStatus::Asignado),
            "Mantenimiento" => Ok(InstrumentStatus::Mantenimiento),
            "De Baja" => Ok(InstrumentStatus::DeBaja),
            _ => Err(format!("Invalid instrument status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for InstrumentStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for InstrumentStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for InstrumentStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

// ---------------------------------------------------------------------------
// MovementType
// ---------------------------------------------------------------------------

/// Inventory movement type (`tipo_movimiento` column, closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MovementType {
    Entrada,
    Mantenimiento,
    Baja,
    Reingreso,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Entrada => "Entrada",
            MovementType::Mantenimiento => "Mantenimiento",
            MovementType::Baja => "Baja",
            MovementType::Reingreso => "Reingreso",
        }
    }

    /// Instrument state this movement drives the instrument into.
    /// Assignment states are never produced here, only the assignment
    /// ledger sets `Asignado`.
    pub fn target_status(&self) -> InstrumentStatus {
        match self {
            MovementType::Entrada => InstrumentStatus::Disponible,
            MovementType::Mantenimiento => InstrumentStatus::Mantenimiento,
            MovementType::Baja => InstrumentStatus::DeBaja,
            MovementType::Reingreso => InstrumentStatus::Disponible,
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MovementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Entrada" => Ok(MovementType::Entrada),
            "Mantenimiento" => Ok(MovementType::Mantenimiento),
            "Baja" => Ok(MovementType::Baja),
            "Reingreso" => Ok(MovementType::Reingreso),
            _ => Err(format!("Invalid movement type: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for MovementType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for MovementType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for MovementType {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// User role (`rol` column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Administrador,
    Consulta,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrador => "Administrador",
            Role::Consulta => "Consulta",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Administrador" => Ok(Role::Administrador),
            "Consulta" => Ok(Role::Consulta),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for Role {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Role {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Role {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_types_drive_expected_states() {
        assert_eq!(MovementType::Entrada.target_status(), InstrumentStatus::Disponible);
        assert_eq!(
            MovementType::Mantenimiento.target_status(),
            InstrumentStatus::Mantenimiento
        );
        assert_eq!(MovementType::Baja.target_status(), InstrumentStatus::DeBaja);
        assert_eq!(MovementType::Reingreso.target_status(), InstrumentStatus::Disponible);
    }

    #[test]
    fn status_strings_match_database_values() {
        assert_eq!(InstrumentStatus::DeBaja.as_str(), "De Baja");
        assert_eq!("De Baja".parse::<InstrumentStatus>().unwrap(), InstrumentStatus::DeBaja);
        assert!("Prestado".parse::<InstrumentStatus>().is_err());
    }

    #[test]
    fn movement_type_set_is_closed() {
        assert!("Salida".parse::<MovementType>().is_err());
        assert!(serde_json::from_str::<MovementType>("\"Traslado\"").is_err());
        assert_eq!(
            serde_json::from_str::<MovementType>("\"Reingreso\"").unwrap(),
            MovementType::Reingreso
        );
    }
}
