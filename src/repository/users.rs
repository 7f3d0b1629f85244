//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{enums::Role, user::User},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by email, if registered
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM usuario WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Check whether an email is already registered
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM usuario WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create a user with an already-hashed password
    pub async fn create(
        &self,
        nombre: &str,
        email: &str,
        password_hash: &str,
        rol: Role,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO usuario (nombre, email, password_hash, rol)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(nombre)
        .bind(email)
        .bind(password_hash)
        .bind(rol)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}
