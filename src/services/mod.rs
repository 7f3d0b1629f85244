//! Business logic services

pub mod assignments;
pub mod auth;
pub mod instruments;
pub mod movements;
pub mod programs;
pub mod students;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    repository: Repository,
    pub auth: auth::AuthService,
    pub programs: programs::ProgramsService,
    pub students: students::StudentsService,
    pub instruments: instruments::InstrumentsService,
    pub assignments: assignments::AssignmentsService,
    pub movements: movements::MovementsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            programs: programs::ProgramsService::new(repository.clone()),
            students: students::StudentsService::new(repository.clone()),
            instruments: instruments::InstrumentsService::new(repository.clone()),
            assignments: assignments::AssignmentsService::new(repository.clone()),
            movements: movements::MovementsService::new(repository.clone()),
            repository,
        }
    }

    /// Check database connectivity (readiness probe)
    pub async fn ping_database(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
