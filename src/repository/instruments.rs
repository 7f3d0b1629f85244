//! Instruments repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::InstrumentStatus,
        instrument::{CreateInstrument, Instrument, UpdateInstrument},
    },
};

#[derive(Clone)]
pub struct InstrumentsRepository {
    pool: Pool<Postgres>,
}

impl InstrumentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all instruments
    pub async fn list(&self) -> AppResult<Vec<Instrument>> {
        let rows = sqlx::query_as::<_, Instrument>("SELECT * FROM instrumento ORDER BY nombre")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get instrument by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Instrument> {
        sqlx::query_as::<_, Instrument>("SELECT * FROM instrumento WHERE id_instrumento = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Instrumento {} no encontrado", id)))
    }

    /// Check whether a serial number is already registered
    pub async fn serial_exists(&self, numero_serie: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM instrumento WHERE numero_serie = $1)",
        )
        .bind(numero_serie)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create an instrument. New instruments default to `Disponible` unless
    /// an explicit state is given (e.g. intake of an instrument already in
    /// repair).
    pub async fn create(&self, data: &CreateInstrument) -> AppResult<Instrument> {
        let row = sqlx::query_as::<_, Instrument>(
            r#"
            INSERT INTO instrumento
                (nombre, categoria, numero_serie, estado, fecha_adquisicion, foto_url, ubicacion)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.nombre)
        .bind(&data.categoria)
        .bind(&data.numero_serie)
        .bind(data.estado.unwrap_or(InstrumentStatus::Disponible))
        .bind(data.fecha_adquisicion)
        .bind(&data.foto_url)
        .bind(&data.ubicacion)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update an instrument. A request that sets `estado` directly is the
    /// administrative override path: it bypasses the assignment and movement
    /// ledgers, so the change is logged for the audit trail.
    pub async fn update(&self, id: i32, data: &UpdateInstrument) -> AppResult<Instrument> {
        let mut tx = self.pool.begin().await?;

        let current: InstrumentStatus = sqlx::query_scalar(
            "SELECT estado FROM instrumento WHERE id_instrumento = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Instrumento {} no encontrado", id)))?;

        if let Some(nuevo) = data.estado {
            if nuevo != current {
                tracing::warn!(
                    id_instrumento = id,
                    desde = %current,
                    hacia = %nuevo,
                    "estado del instrumento cambiado manualmente, fuera de los libros de asignaciones y movimientos"
                );
            }
        }

        let row = sqlx::query_as::<_, Instrument>(
            r#"
            UPDATE instrumento
            SET nombre = $1, categoria = $2, estado = COALESCE($3, estado),
                fecha_adquisicion = $4, foto_url = $5, ubicacion = $6
            WHERE id_instrumento = $7
            RETURNING *
            "#,
        )
        .bind(&data.nombre)
        .bind(&data.categoria)
        .bind(data.estado)
        .bind(data.fecha_adquisicion)
        .bind(&data.foto_url)
        .bind(&data.ubicacion)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Delete an instrument. Rejected while any assignment or movement still
    /// references it, so ledger history is never orphaned.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM instrumento WHERE id_instrumento = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        if !exists {
            return Err(AppError::NotFound(format!("Instrumento {} no encontrado", id)));
        }

        let referenced: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(SELECT 1 FROM asignacion_instrumento WHERE id_instrumento = $1)
                OR EXISTS(SELECT 1 FROM movimiento_inventario WHERE id_instrumento = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        if referenced {
            return Err(AppError::ResourceInUse(
                "El instrumento tiene asignaciones o movimientos registrados".to_string(),
            ));
        }

        sqlx::query("DELETE FROM instrumento WHERE id_instrumento = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
