//! Repository layer for database operations

pub mod assignments;
pub mod instruments;
pub mod movements;
pub mod programs;
pub mod students;
pub mod users;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub programs: programs::ProgramsRepository,
    pub students: students::StudentsRepository,
    pub instruments: instruments::InstrumentsRepository,
    pub assignments: assignments::AssignmentsRepository,
    pub movements: movements::MovementsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            programs: programs::ProgramsRepository::new(pool.clone()),
            students: students::StudentsRepository::new(pool.clone()),
            instruments: instruments::InstrumentsRepository::new(pool.clone()),
            assignments: assignments::AssignmentsRepository::new(pool.clone()),
            movements: movements::MovementsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check database connectivity (readiness probe)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
