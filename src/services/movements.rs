//! Movement ledger service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::movement::{CreateMovement, MovementDetails, UpdateMovement},
    repository::Repository,
};

#[derive(Clone)]
pub struct MovementsService {
    repository: Repository,
}

impl MovementsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<MovementDetails>> {
        self.repository.movements.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MovementDetails> {
        self.repository.movements.get_by_id(id).await
    }

    /// Record a movement; the instrument transitions to the state the
    /// movement type maps to.
    pub async fn create(&self, data: &CreateMovement) -> AppResult<MovementDetails> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let id = self.repository.movements.create(data).await?;
        self.repository.movements.get_by_id(id).await
    }

    /// Edit a movement log entry; the instrument state is left untouched.
    pub async fn update(&self, id: i32, data: &UpdateMovement) -> AppResult<MovementDetails> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.instruments.get_by_id(data.id_instrumento).await?;

        self.repository.movements.update(id, data).await?;
        self.repository.movements.get_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.movements.delete(id).await
    }
}
