use crate::domain::installment::Competence;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeeError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("No disbursement date scheduled for competence {0}")]
    MissingScheduleError(Competence),
    #[error("Invalid input: {0}")]
    InvalidInputError(String),
    #[error("Over-allocation detected, engine defect: {0}")]
    OverAllocationError(String),
    #[error("Persistence error: {0}")]
    PersistenceError(Box<dyn std::error::Error + Send + Sync>),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for FeeError {
    fn from(err: rocksdb::Error) -> Self {
        FeeError::PersistenceError(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, FeeError>;
