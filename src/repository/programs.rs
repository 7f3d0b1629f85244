//! Programs repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::program::{CreateProgram, Program, UpdateProgram},
};

#[derive(Clone)]
pub struct ProgramsRepository {
    pool: Pool<Postgres>,
}

impl ProgramsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all programs
    pub async fn list(&self) -> AppResult<Vec<Program>> {
        let rows = sqlx::query_as::<_, Program>("SELECT * FROM programa ORDER BY nombre")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get program by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Program> {
        sqlx::query_as::<_, Program>("SELECT * FROM programa WHERE id_programa = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Programa {} no encontrado", id)))
    }

    /// Check whether a program exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM programa WHERE id_programa = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create a program
    pub async fn create(&self, data: &CreateProgram) -> AppResult<Program> {
        let row = sqlx::query_as::<_, Program>(
            "INSERT INTO programa (nombre, descripcion) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.nombre)
        .bind(&data.descripcion)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a program
    pub async fn update(&self, id: i32, data: &UpdateProgram) -> AppResult<Program> {
        sqlx::query_as::<_, Program>(
            "UPDATE programa SET nombre = $1, descripcion = $2 WHERE id_programa = $3 RETURNING *",
        )
        .bind(&data.nombre)
        .bind(&data.descripcion)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Programa {} no encontrado", id)))
    }

    /// Delete a program. Students still enrolled surface as a foreign key
    /// conflict.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM programa WHERE id_programa = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Programa {} no encontrado", id)));
        }
        Ok(())
    }
}
