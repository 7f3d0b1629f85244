//! Students repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::student::{CreateStudent, StudentDetails, UpdateStudent},
};

const DETAILS_QUERY: &str = r#"
    SELECT a.id_alumno, a.nombre, a.fecha_nacimiento, a.genero,
           a.telefono_contacto, a.id_representante, a.id_programa,
           p.nombre AS programa_nombre, a.estado
    FROM alumno a
    JOIN programa p ON a.id_programa = p.id_programa
"#;

#[derive(Clone)]
pub struct StudentsRepository {
    pool: Pool<Postgres>,
}

impl StudentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all students with their program name
    pub async fn list(&self) -> AppResult<Vec<StudentDetails>> {
        let query = format!("{} ORDER BY a.nombre", DETAILS_QUERY);
        let rows = sqlx::query_as::<_, StudentDetails>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get student by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<StudentDetails> {
        let query = format!("{} WHERE a.id_alumno = $1", DETAILS_QUERY);
        sqlx::query_as::<_, StudentDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Alumno {} no encontrado", id)))
    }

    /// Create a student
    pub async fn create(&self, data: &CreateStudent) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO alumno
                (nombre, fecha_nacimiento, genero, telefono_contacto,
                 id_representante, id_programa, estado)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id_alumno
            "#,
        )
        .bind(&data.nombre)
        .bind(data.fecha_nacimiento)
        .bind(&data.genero)
        .bind(&data.telefono_contacto)
        .bind(&data.id_representante)
        .bind(data.id_programa)
        .bind(&data.estado)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Update a student
    pub async fn update(&self, id: i32, data: &UpdateStudent) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE alumno
            SET nombre = $1, fecha_nacimiento = $2, genero = $3,
                telefono_contacto = $4, id_representante = $5,
                id_programa = $6, estado = $7
            WHERE id_alumno = $8
            "#,
        )
        .bind(&data.nombre)
        .bind(data.fecha_nacimiento)
        .bind(&data.genero)
        .bind(&data.telefono_contacto)
        .bind(&data.id_representante)
        .bind(data.id_programa)
        .bind(&data.estado)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Alumno {} no encontrado", id)));
        }
        Ok(())
    }

    /// Delete a student. Existing assignments surface as a foreign key
    /// conflict.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM alumno WHERE id_alumno = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Alumno {} no encontrado", id)));
        }
        Ok(())
    }
}
