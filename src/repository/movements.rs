//! Movements repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::movement::{CreateMovement, MovementDetails, UpdateMovement},
};

const DETAILS_QUERY: &str = r#"
    SELECT mi.id_movimiento, mi.id_instrumento,
           i.nombre AS instrumento_nombre,
           i.numero_serie AS instrumento_numero_serie,
           mi.tipo_movimiento, mi.fecha_movimiento,
           mi.descripcion, mi.responsable
    FROM movimiento_inventario mi
    JOIN instrumento i ON mi.id_instrumento = i.id_instrumento
"#;

#[derive(Clone)]
pub struct MovementsRepository {
    pool: Pool<Postgres>,
}

impl MovementsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all movements with instrument name and serial, newest first
    pub async fn list(&self) -> AppResult<Vec<MovementDetails>> {
        let query = format!(
            "{} ORDER BY mi.fecha_movimiento DESC, mi.id_movimiento DESC",
            DETAILS_QUERY
        );
        let rows = sqlx::query_as::<_, MovementDetails>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get movement by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MovementDetails> {
        let query = format!("{} WHERE mi.id_movimiento = $1", DETAILS_QUERY);
        sqlx::query_as::<_, MovementDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Movimiento {} no encontrado", id)))
    }

    /// Record an inventory movement and drive the instrument into the state
    /// given by the movement type. Both writes commit atomically under a row
    /// lock on the instrument.
    ///
    /// No cross-check against open assignments is made here: a retirement or
    /// maintenance event can be recorded while the instrument is checked
    /// out, and its state takes effect immediately.
    pub async fn create(&self, data: &CreateMovement) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i32> = sqlx::query_scalar(
            "SELECT id_instrumento FROM instrumento WHERE id_instrumento = $1 FOR UPDATE",
        )
        .bind(data.id_instrumento)
        .fetch_optional(&mut *tx)
        .await?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!(
                "Instrumento {} no encontrado",
                data.id_instrumento
            )));
        }

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO movimiento_inventario
                (id_instrumento, tipo_movimiento, fecha_movimiento, descripcion, responsable)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id_movimiento
            "#,
        )
        .bind(data.id_instrumento)
        .bind(data.tipo_movimiento)
        .bind(data.fecha_movimiento)
        .bind(&data.descripcion)
        .bind(&data.responsable)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE instrumento SET estado = $1 WHERE id_instrumento = $2")
            .bind(data.tipo_movimiento.target_status())
            .bind(data.id_instrumento)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(id)
    }

    /// Update a movement. The instrument state is not recomputed: only the
    /// creation of a movement drives state, edits touch the log entry alone.
    pub async fn update(&self, id: i32, data: &UpdateMovement) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE movimiento_inventario
            SET id_instrumento = $1, tipo_movimiento = $2, fecha_movimiento = $3,
                descripcion = $4, responsable = $5
            WHERE id_movimiento = $6
            "#,
        )
        .bind(data.id_instrumento)
        .bind(data.tipo_movimiento)
        .bind(data.fecha_movimiento)
        .bind(&data.descripcion)
        .bind(&data.responsable)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Movimiento {} no encontrado", id)));
        }
        Ok(())
    }

    /// Delete a movement. Does not revert the instrument state.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM movimiento_inventario WHERE id_movimiento = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Movimiento {} no encontrado", id)));
        }
        Ok(())
    }
}
