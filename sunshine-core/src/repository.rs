use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sunshine_catalog::{InventoryCategory, InventoryItem, InventoryTransaction};
use uuid::Uuid;

use crate::analytics::DailyAnalytics;
use crate::schedule::Shift;

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;

/// Inventory tables: items, categories and the restock audit log
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn list_items(&self) -> Result<Vec<InventoryItem>, RepoError>;

    async fn get_item(&self, id: Uuid) -> Result<Option<InventoryItem>, RepoError>;

    async fn list_categories(&self) -> Result<Vec<InventoryCategory>, RepoError>;

    async fn get_category(&self, id: Uuid) -> Result<Option<InventoryCategory>, RepoError>;

    async fn create_item(&self, item: &InventoryItem) -> Result<Uuid, RepoError>;

    /// Overwrite the stored quantity. Last write wins.
    async fn update_quantity(
        &self,
        id: Uuid,
        quantity: i32,
        last_restocked: DateTime<Utc>,
    ) -> Result<(), RepoError>;

    async fn record_transaction(&self, tx: &InventoryTransaction) -> Result<(), RepoError>;
}

/// Staff shift table
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Shifts with `from <= shift_date <= to`, ordered by date then start time
    async fn list_shifts(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Shift>, RepoError>;

    async fn create_shift(&self, shift: &Shift) -> Result<Uuid, RepoError>;
}

/// Daily park figures
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Records with `date >= since`, oldest first
    async fn list_daily(&self, since: NaiveDate) -> Result<Vec<DailyAnalytics>, RepoError>;
}
