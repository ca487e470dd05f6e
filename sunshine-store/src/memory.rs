//! In-process repositories for development and tests.
//!
//! Used when no database URL is configured. Seeded with the same demo data
//! the staff dashboard ships with.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use sunshine_catalog::{InventoryCategory, InventoryItem, InventoryTransaction, StockStatus};
use sunshine_core::analytics::DailyAnalytics;
use sunshine_core::repository::{AnalyticsRepository, InventoryRepository, RepoError, ScheduleRepository};
use sunshine_core::schedule::{Shift, ShiftStatus};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryInventoryRepository {
    items: RwLock<Vec<InventoryItem>>,
    categories: RwLock<Vec<InventoryCategory>>,
    transactions: RwLock<Vec<InventoryTransaction>>,
}

impl MemoryInventoryRepository {
    pub fn new(categories: Vec<InventoryCategory>, items: Vec<InventoryItem>) -> Self {
        Self {
            items: RwLock::new(items),
            categories: RwLock::new(categories),
            transactions: RwLock::new(Vec::new()),
        }
    }

    pub fn seeded() -> Self {
        let category = |name: &str, description: &str| InventoryCategory {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: Some(description.to_string()),
        };
        let food = category("Food", "Food items and snacks");
        let drinks = category("Drinks", "Beverages");
        let merch = category("Merchandise", "Souvenirs and gifts");

        let item = |name: &str, description: &str, quantity: i32, min_quantity: i32, unit: &str, status: StockStatus, cat: &InventoryCategory| {
            InventoryItem {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: Some(description.to_string()),
                category_id: Some(cat.id),
                category_name: Some(cat.name.clone()),
                quantity,
                min_quantity,
                unit: unit.to_string(),
                status,
                last_restocked: None,
            }
        };

        let items = vec![
            item("Popcorn", "Fresh buttered popcorn", 150, 50, "bags", StockStatus::InStock, &food),
            item("Soda", "Assorted soft drinks", 45, 100, "cans", StockStatus::LowStock, &drinks),
            item("T-Shirts", "Sunshine Park branded shirts", 0, 20, "pieces", StockStatus::OutOfStock, &merch),
            item("Hot Dogs", "Grilled hot dogs with buns", 200, 80, "pieces", StockStatus::InStock, &food),
            item("Water Bottles", "Cold bottled water", 30, 100, "bottles", StockStatus::LowStock, &drinks),
            item("Ice Cream", "Various flavors", 120, 60, "servings", StockStatus::InStock, &food),
            item("Caps", "Sunshine Park baseball caps", 35, 30, "pieces", StockStatus::InStock, &merch),
        ];

        Self::new(vec![food, drinks, merch], items)
    }

    /// Audit log, oldest first
    pub async fn transactions(&self) -> Vec<InventoryTransaction> {
        self.transactions.read().await.clone()
    }
}

#[async_trait]
impl InventoryRepository for MemoryInventoryRepository {
    async fn list_items(&self) -> Result<Vec<InventoryItem>, RepoError> {
        Ok(self.items.read().await.clone())
    }

    async fn get_item(&self, id: Uuid) -> Result<Option<InventoryItem>, RepoError> {
        Ok(self.items.read().await.iter().find(|i| i.id == id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<InventoryCategory>, RepoError> {
        Ok(self.categories.read().await.clone())
    }

    async fn get_category(&self, id: Uuid) -> Result<Option<InventoryCategory>, RepoError> {
        Ok(self.categories.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn create_item(&self, item: &InventoryItem) -> Result<Uuid, RepoError> {
        self.items.write().await.push(item.clone());
        Ok(item.id)
    }

    async fn update_quantity(
        &self,
        id: Uuid,
        quantity: i32,
        last_restocked: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| format!("inventory item {} not found", id))?;
        item.quantity = quantity;
        item.last_restocked = Some(last_restocked);
        Ok(())
    }

    async fn record_transaction(&self, tx: &InventoryTransaction) -> Result<(), RepoError> {
        self.transactions.write().await.push(tx.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryScheduleRepository {
    shifts: RwLock<Vec<Shift>>,
}

impl MemoryScheduleRepository {
    pub fn new(shifts: Vec<Shift>) -> Self {
        Self { shifts: RwLock::new(shifts) }
    }

    /// Demo shifts spread over the four days starting `today`
    pub fn seeded(today: NaiveDate) -> Self {
        let shift = |days: i64, start: u32, end: u32, position: &str, location: &str, notes: Option<&str>| Shift {
            id: Uuid::new_v4(),
            user_id: "demo-staff".to_string(),
            shift_date: today + Duration::days(days),
            shift_start: NaiveTime::from_hms_opt(start, 0, 0).unwrap_or_default(),
            shift_end: NaiveTime::from_hms_opt(end, 0, 0).unwrap_or_default(),
            position: position.to_string(),
            location: location.to_string(),
            status: ShiftStatus::Scheduled,
            notes: notes.map(str::to_string),
        };

        Self::new(vec![
            shift(0, 9, 17, "Ride Operator", "Rides Area", None),
            shift(0, 10, 18, "Food & Beverage", "Food Court", None),
            shift(1, 8, 16, "Security", "Main Entrance", None),
            shift(1, 11, 19, "Ride Operator", "Water Park", None),
            shift(2, 9, 17, "Maintenance", "Rides Area", Some("Regular inspection")),
            shift(3, 10, 18, "Guest Services", "Main Entrance", None),
        ])
    }
}

#[async_trait]
impl ScheduleRepository for MemoryScheduleRepository {
    async fn list_shifts(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Shift>, RepoError> {
        let mut shifts: Vec<Shift> = self
            .shifts
            .read()
            .await
            .iter()
            .filter(|s| s.shift_date >= from && s.shift_date <= to)
            .cloned()
            .collect();
        shifts.sort_by_key(|s| (s.shift_date, s.shift_start));
        Ok(shifts)
    }

    async fn create_shift(&self, shift: &Shift) -> Result<Uuid, RepoError> {
        self.shifts.write().await.push(shift.clone());
        Ok(shift.id)
    }
}

#[derive(Default)]
pub struct MemoryAnalyticsRepository {
    days: RwLock<Vec<DailyAnalytics>>,
}

impl MemoryAnalyticsRepository {
    pub fn new(days: Vec<DailyAnalytics>) -> Self {
        Self { days: RwLock::new(days) }
    }

    /// One demo week ending yesterday
    pub fn seeded(today: NaiveDate) -> Self {
        let figures: [(i64, f64, f64, f64); 7] = [
            (1200, 24000.0, 3000.0, 8000.0),
            (1500, 30000.0, 4000.0, 10000.0),
            (1800, 36000.0, 5000.0, 12000.0),
            (1400, 28000.0, 3500.0, 9000.0),
            (2000, 40000.0, 6000.0, 14000.0),
            (2200, 44000.0, 6500.0, 15000.0),
            (1900, 38000.0, 5500.0, 13000.0),
        ];

        let days = figures
            .iter()
            .enumerate()
            .map(|(i, (visitors, tickets, merch, food))| DailyAnalytics {
                date: today - Duration::days(7 - i as i64),
                total_visitors: *visitors,
                ticket_revenue: *tickets,
                merchandise_sales: *merch,
                food_beverage_sales: *food,
                weather: None,
            })
            .collect();

        Self::new(days)
    }
}

#[async_trait]
impl AnalyticsRepository for MemoryAnalyticsRepository {
    async fn list_daily(&self, since: NaiveDate) -> Result<Vec<DailyAnalytics>, RepoError> {
        let mut days: Vec<DailyAnalytics> =
            self.days.read().await.iter().filter(|d| d.date >= since).cloned().collect();
        days.sort_by_key(|d| d.date);
        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunshine_core::inventory::restock_item;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[tokio::test]
    async fn test_seeded_soda_restock() {
        let repo = MemoryInventoryRepository::seeded();
        let soda = repo
            .list_items()
            .await
            .unwrap()
            .into_iter()
            .find(|i| i.name == "Soda")
            .unwrap();
        assert_eq!(soda.quantity, 45);

        restock_item(&repo, soda.id, 30, None, None, Utc::now()).await.unwrap();

        let stored = repo.get_item(soda.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 75);
        let log = repo.transactions().await;
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].quantity_change, 30);
        assert_eq!(log[0].quantity_after, 75);
    }

    #[tokio::test]
    async fn test_shifts_window_and_order() {
        let repo = MemoryScheduleRepository::seeded(today());
        let tomorrow = today() + Duration::days(1);

        let shifts = repo.list_shifts(today(), tomorrow).await.unwrap();
        assert_eq!(shifts.len(), 4);
        assert!(shifts.windows(2).all(|w| (w[0].shift_date, w[0].shift_start) <= (w[1].shift_date, w[1].shift_start)));
    }

    #[tokio::test]
    async fn test_analytics_since() {
        let repo = MemoryAnalyticsRepository::seeded(today());
        assert_eq!(repo.list_daily(today() - Duration::days(30)).await.unwrap().len(), 7);
        assert_eq!(repo.list_daily(today() - Duration::days(2)).await.unwrap().len(), 2);
    }
}
