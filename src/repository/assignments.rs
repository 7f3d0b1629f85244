//! Assignments repository for database operations
//!
//! Checkout, return and delete all read the instrument state and
//! conditionally write it back. Each of those sequences runs inside a single
//! transaction holding a row lock on the instrument (`SELECT ... FOR
//! UPDATE`), so two concurrent checkouts of the same instrument serialize:
//! the second observes `Asignado` and fails with a conflict instead of
//! double-assigning. Every operation that mutates an assignment takes the
//! same instrument lock first, which also serializes returns and deletes.

use chrono::NaiveDate;
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        assignment::{Assignment, AssignmentDetails, CreateAssignment, UpdateAssignment},
        enums::{InstrumentStatus, MovementType},
    },
};

const DETAILS_QUERY: &str = r#"
    SELECT ai.id_asignacion, ai.id_instrumento,
           i.nombre AS instrumento_nombre,
           i.numero_serie AS instrumento_numero_serie,
           ai.id_alumno, a.nombre AS alumno_nombre,
           ai.fecha_asignacion, ai.fecha_devolucion
    FROM asignacion_instrumento ai
    JOIN instrumento i ON ai.id_instrumento = i.id_instrumento
    LEFT JOIN alumno a ON ai.id_alumno = a.id_alumno
"#;

#[derive(Clone)]
pub struct AssignmentsRepository {
    pool: Pool<Postgres>,
}

impl AssignmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all assignments with instrument and student names
    pub async fn list(&self) -> AppResult<Vec<AssignmentDetails>> {
        let query = format!("{} ORDER BY ai.fecha_asignacion DESC, ai.id_asignacion DESC", DETAILS_QUERY);
        let rows = sqlx::query_as::<_, AssignmentDetails>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get assignment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<AssignmentDetails> {
        let query = format!("{} WHERE ai.id_asignacion = $1", DETAILS_QUERY);
        sqlx::query_as::<_, AssignmentDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asignación {} no encontrada", id)))
    }

    /// Check out an instrument to a student.
    ///
    /// The instrument must exist and be `Disponible`; otherwise the request
    /// fails with a not-found or instrument-unavailable error. A request
    /// carrying a `fecha_devolucion` records an already-closed historical
    /// loan and leaves the instrument state untouched.
    pub async fn create(&self, data: &CreateAssignment) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let estado = lock_instrument(&mut tx, data.id_instrumento).await?;
        if estado != InstrumentStatus::Disponible {
            return Err(AppError::InstrumentUnavailable(
                "El instrumento no está disponible para asignación".to_string(),
            ));
        }

        let student_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM alumno WHERE id_alumno = $1)")
                .bind(data.id_alumno)
                .fetch_one(&mut *tx)
                .await?;
        if !student_exists {
            return Err(AppError::NotFound(format!(
                "Alumno {} no encontrado",
                data.id_alumno
            )));
        }

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO asignacion_instrumento
                (id_instrumento, id_alumno, fecha_asignacion, fecha_devolucion)
            VALUES ($1, $2, $3, $4)
            RETURNING id_asignacion
            "#,
        )
        .bind(data.id_instrumento)
        .bind(data.id_alumno)
        .bind(data.fecha_asignacion)
        .bind(data.fecha_devolucion)
        .fetch_one(&mut *tx)
        .await?;

        if data.fecha_devolucion.is_none() {
            sqlx::query("UPDATE instrumento SET estado = $1 WHERE id_instrumento = $2")
                .bind(InstrumentStatus::Asignado)
                .bind(data.id_instrumento)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(id)
    }

    /// Update assignment fields. Deliberately does not recompute the
    /// instrument state, matching the documented ledger behavior.
    pub async fn update(&self, id: i32, data: &UpdateAssignment) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE asignacion_instrumento
            SET id_instrumento = $1, id_alumno = $2,
                fecha_asignacion = $3, fecha_devolucion = $4
            WHERE id_asignacion = $5
            "#,
        )
        .bind(data.id_instrumento)
        .bind(data.id_alumno)
        .bind(data.fecha_asignacion)
        .bind(data.fecha_devolucion)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Asignación {} no encontrada", id)));
        }
        Ok(())
    }

    /// Record the return of a checked-out instrument
    pub async fn return_instrument(&self, id: i32, fecha_devolucion: NaiveDate) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let assignment = fetch_row(&mut tx, id).await?;
        lock_instrument(&mut tx, assignment.id_instrumento).await?;

        // Re-read under the lock: any concurrent return or delete of this
        // assignment also holds the instrument lock.
        let assignment = fetch_row(&mut tx, id).await?;
        if assignment.fecha_devolucion.is_some() {
            return Err(AppError::Conflict("La asignación ya fue devuelta".to_string()));
        }

        sqlx::query("UPDATE asignacion_instrumento SET fecha_devolucion = $1 WHERE id_asignacion = $2")
            .bind(fecha_devolucion)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        recompute_estado(&mut tx, assignment.id_instrumento, assignment.fecha_asignacion).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Delete an assignment. If it was the open assignment for its
    /// instrument, the instrument state is recomputed; deleting a closed
    /// assignment changes nothing.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let assignment = fetch_row(&mut tx, id).await?;
        lock_instrument(&mut tx, assignment.id_instrumento).await?;
        let assignment = fetch_row(&mut tx, id).await?;

        sqlx::query("DELETE FROM asignacion_instrumento WHERE id_asignacion = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if assignment.fecha_devolucion.is_none() {
            recompute_estado(&mut tx, assignment.id_instrumento, assignment.fecha_asignacion)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

/// Fetch the raw assignment row inside the transaction
async fn fetch_row(tx: &mut Transaction<'_, Postgres>, id: i32) -> AppResult<Assignment> {
    sqlx::query_as::<_, Assignment>("SELECT * FROM asignacion_instrumento WHERE id_asignacion = $1")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Asignación {} no encontrada", id)))
}

/// Lock the instrument row for the duration of the transaction and return
/// its current state.
async fn lock_instrument(
    tx: &mut Transaction<'_, Postgres>,
    id_instrumento: i32,
) -> AppResult<InstrumentStatus> {
    sqlx::query_scalar::<_, InstrumentStatus>(
        "SELECT estado FROM instrumento WHERE id_instrumento = $1 FOR UPDATE",
    )
    .bind(id_instrumento)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Instrumento {} no encontrado", id_instrumento)))
}

/// Derive and store the instrument state after an open assignment went away.
///
/// The state is `Asignado` while any open assignment remains. Otherwise a
/// movement event recorded on or after the assignment started (a maintenance
/// or retirement logged while the instrument was out) takes precedence over
/// the plain return, and the instrument lands in that movement's target
/// state; with no such movement it becomes `Disponible`.
async fn recompute_estado(
    tx: &mut Transaction<'_, Postgres>,
    id_instrumento: i32,
    since: NaiveDate,
) -> AppResult<()> {
    let open: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM asignacion_instrumento WHERE id_instrumento = $1 AND fecha_devolucion IS NULL",
    )
    .bind(id_instrumento)
    .fetch_one(&mut **tx)
    .await?;

    let estado = if open > 0 {
        InstrumentStatus::Asignado
    } else {
        let last_movement: Option<MovementType> = sqlx::query_scalar(
            r#"
            SELECT tipo_movimiento FROM movimiento_inventario
            WHERE id_instrumento = $1 AND fecha_movimiento >= $2
            ORDER BY fecha_movimiento DESC, id_movimiento DESC
            LIMIT 1
            "#,
        )
        .bind(id_instrumento)
        .bind(since)
        .fetch_optional(&mut **tx)
        .await?;

        last_movement
            .map(|tipo| tipo.target_status())
            .unwrap_or(InstrumentStatus::Disponible)
    };

    sqlx::query("UPDATE instrumento SET estado = $1 WHERE id_instrumento = $2")
        .bind(estado)
        .bind(id_instrumento)
        .execute(&mut **tx)
        .await?;

    Ok(())
}
