use std::sync::Arc;

use chrono::{Duration, Local};
use sunshine_catalog::{Promotion, TicketCatalog, MAX_TICKETS_PER_TYPE};
use sunshine_core::repository::{AnalyticsRepository, InventoryRepository, ScheduleRepository};
use sunshine_store::{MemoryAnalyticsRepository, MemoryInventoryRepository, MemoryScheduleRepository};

use crate::sessions::CheckoutSessions;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<TicketCatalog>,
    pub promotions: Arc<Vec<Promotion>>,
    pub sessions: CheckoutSessions,
    pub inventory_repo: Arc<dyn InventoryRepository>,
    pub schedule_repo: Arc<dyn ScheduleRepository>,
    pub analytics_repo: Arc<dyn AnalyticsRepository>,
    pub auth: AuthConfig,
    pub max_tickets_per_type: u32,
}

impl AppState {
    pub fn new(
        inventory_repo: Arc<dyn InventoryRepository>,
        schedule_repo: Arc<dyn ScheduleRepository>,
        analytics_repo: Arc<dyn AnalyticsRepository>,
        auth: AuthConfig,
        max_tickets_per_type: u32,
    ) -> Self {
        Self {
            catalog: Arc::new(TicketCatalog::standard()),
            promotions: Arc::new(Promotion::current()),
            sessions: CheckoutSessions::default(),
            inventory_repo,
            schedule_repo,
            analytics_repo,
            auth,
            max_tickets_per_type,
        }
    }

    /// State backed by the seeded in-memory repositories
    pub fn in_memory(jwt_secret: &str) -> Self {
        let today = Local::now().date_naive();
        Self::new(
            Arc::new(MemoryInventoryRepository::seeded()),
            Arc::new(MemoryScheduleRepository::seeded(today)),
            Arc::new(MemoryAnalyticsRepository::seeded(today)),
            AuthConfig { secret: jwt_secret.to_string() },
            MAX_TICKETS_PER_TYPE,
        )
    }

    /// Replace the session store with one that expires idle checkouts after `ttl`
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.sessions = CheckoutSessions::new(ttl);
        self
    }
}
