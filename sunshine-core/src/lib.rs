pub mod repository;
pub mod inventory;
pub mod schedule;
pub mod analytics;

pub use repository::{AnalyticsRepository, InventoryRepository, RepoError, ScheduleRepository};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Persistence error: {0}")]
    PersistenceError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl From<sunshine_catalog::InventoryError> for CoreError {
    fn from(err: sunshine_catalog::InventoryError) -> Self {
        use sunshine_catalog::InventoryError;
        match err {
            InventoryError::NotFound(_) | InventoryError::CategoryNotFound(_) => CoreError::NotFound(err.to_string()),
            _ => CoreError::ValidationError(err.to_string()),
        }
    }
}

impl From<schedule::ScheduleError> for CoreError {
    fn from(err: schedule::ScheduleError) -> Self {
        CoreError::ValidationError(err.to_string())
    }
}
