//! Assignment ledger service

use chrono::{NaiveDate, Utc};

use crate::{
    error::AppResult,
    models::assignment::{AssignmentDetails, CreateAssignment, UpdateAssignment},
    repository::Repository,
};

#[derive(Clone)]
pub struct AssignmentsService {
    repository: Repository,
}

impl AssignmentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<AssignmentDetails>> {
        self.repository.assignments.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<AssignmentDetails> {
        self.repository.assignments.get_by_id(id).await
    }

    /// Check out an instrument to a student
    pub async fn checkout(&self, data: &CreateAssignment) -> AppResult<AssignmentDetails> {
        let id = self.repository.assignments.create(data).await?;
        self.repository.assignments.get_by_id(id).await
    }

    /// Update ledger fields without touching the instrument state. The
    /// referenced instrument and student must exist.
    pub async fn update(&self, id: i32, data: &UpdateAssignment) -> AppResult<AssignmentDetails> {
        self.repository.instruments.get_by_id(data.id_instrumento).await?;
        self.repository.students.get_by_id(data.id_alumno).await?;

        self.repository.assignments.update(id, data).await?;
        self.repository.assignments.get_by_id(id).await
    }

    /// Record the return of an instrument. The return date defaults to the
    /// current date.
    pub async fn return_instrument(
        &self,
        id: i32,
        fecha_devolucion: Option<NaiveDate>,
    ) -> AppResult<AssignmentDetails> {
        let fecha = fecha_devolucion.unwrap_or_else(|| Utc::now().date_naive());
        self.repository.assignments.return_instrument(id, fecha).await?;
        self.repository.assignments.get_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.assignments.delete(id).await
    }
}
