//! Program management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::program::{CreateProgram, Program, UpdateProgram},
    repository::Repository,
};

#[derive(Clone)]
pub struct ProgramsService {
    repository: Repository,
}

impl ProgramsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Program>> {
        self.repository.programs.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Program> {
        self.repository.programs.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateProgram) -> AppResult<Program> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.programs.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateProgram) -> AppResult<Program> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.programs.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.programs.delete(id).await
    }
}
