pub mod app_config;
pub mod database;
pub mod inventory_repo;
pub mod schedule_repo;
pub mod analytics_repo;
pub mod memory;

pub use database::DbClient;
pub use inventory_repo::StoreInventoryRepository;
pub use schedule_repo::StoreScheduleRepository;
pub use analytics_repo::StoreAnalyticsRepository;
pub use memory::{MemoryAnalyticsRepository, MemoryInventoryRepository, MemoryScheduleRepository};
