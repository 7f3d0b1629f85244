//! Student management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::student::{CreateStudent, StudentDetails, UpdateStudent},
    repository::Repository,
};

#[derive(Clone)]
pub struct StudentsService {
    repository: Repository,
}

impl StudentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<StudentDetails>> {
        self.repository.students.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<StudentDetails> {
        self.repository.students.get_by_id(id).await
    }

    /// Create a student. The program must exist.
    pub async fn create(&self, data: &CreateStudent) -> AppResult<StudentDetails> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.require_program(data.id_programa).await?;

        let id = self.repository.students.create(data).await?;
        self.repository.students.get_by_id(id).await
    }

    /// Update a student. The target program must exist.
    pub async fn update(&self, id: i32, data: &UpdateStudent) -> AppResult<StudentDetails> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.require_program(data.id_programa).await?;

        self.repository.students.update(id, data).await?;
        self.repository.students.get_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.students.delete(id).await
    }

    async fn require_program(&self, id_programa: i32) -> AppResult<()> {
        if !self.repository.programs.exists(id_programa).await? {
            return Err(AppError::NotFound(format!(
                "Programa {} no encontrado",
                id_programa
            )));
        }
        Ok(())
    }
}
