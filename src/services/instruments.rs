//! Instrument directory service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::instrument::{CreateInstrument, Instrument, UpdateInstrument},
    repository::Repository,
};

#[derive(Clone)]
pub struct InstrumentsService {
    repository: Repository,
}

impl InstrumentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Instrument>> {
        self.repository.instruments.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Instrument> {
        self.repository.instruments.get_by_id(id).await
    }

    /// Register a new instrument. Serial numbers are unique.
    pub async fn create(&self, data: &CreateInstrument) -> AppResult<Instrument> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.instruments.serial_exists(&data.numero_serie).await? {
            return Err(AppError::Conflict(format!(
                "El número de serie {} ya está registrado",
                data.numero_serie
            )));
        }

        self.repository.instruments.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateInstrument) -> AppResult<Instrument> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.instruments.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.instruments.delete(id).await
    }
}
