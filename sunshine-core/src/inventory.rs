use chrono::{DateTime, Utc};
use sunshine_catalog::{
    InventoryError, InventoryFilter, InventoryItem, InventoryStats, InventoryTransaction, NewInventoryItem,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::repository::InventoryRepository;
use crate::{CoreError, CoreResult};

fn persistence(err: impl std::fmt::Display) -> CoreError {
    CoreError::PersistenceError(err.to_string())
}

/// Items matching `filter`, in repository order
pub async fn list_items(repo: &dyn InventoryRepository, filter: &InventoryFilter) -> CoreResult<Vec<InventoryItem>> {
    let items = repo.list_items().await.map_err(persistence)?;
    Ok(filter.apply(&items))
}

pub async fn stats(repo: &dyn InventoryRepository) -> CoreResult<InventoryStats> {
    let items = repo.list_items().await.map_err(persistence)?;
    Ok(InventoryStats::from_items(&items))
}

/// Validate and insert a new item
pub async fn add_item(repo: &dyn InventoryRepository, new_item: NewInventoryItem) -> CoreResult<InventoryItem> {
    let category_id = new_item.category_id.ok_or(InventoryError::MissingField("category_id"))?;
    let category = repo
        .get_category(category_id)
        .await
        .map_err(persistence)?
        .ok_or_else(|| InventoryError::CategoryNotFound(category_id.to_string()))?;

    let item = new_item.into_item(&category)?;

    repo.create_item(&item).await.map_err(|e| {
        error!("Error adding item: {}", e);
        persistence(e)
    })?;

    info!(item_id = %item.id, name = %item.name, "inventory item added");
    Ok(item)
}

/// Add stock to an item and append the audit record.
///
/// The quantity update must succeed. A failed audit insert is logged and
/// does not undo the update.
pub async fn restock_item(
    repo: &dyn InventoryRepository,
    item_id: Uuid,
    quantity_change: i32,
    user_id: Option<String>,
    notes: Option<String>,
    now: DateTime<Utc>,
) -> CoreResult<(InventoryItem, InventoryTransaction)> {
    let mut item = repo
        .get_item(item_id)
        .await
        .map_err(persistence)?
        .ok_or_else(|| InventoryError::NotFound(item_id.to_string()))?;

    let tx = item.restock(quantity_change, user_id, notes, now)?;

    repo.update_quantity(item.id, item.quantity, now).await.map_err(|e| {
        error!("Error updating inventory: {}", e);
        persistence(e)
    })?;

    if let Err(e) = repo.record_transaction(&tx).await {
        warn!(item_id = %item.id, "restock applied but audit record failed: {}", e);
    }

    info!(item_id = %item.id, change = quantity_change, quantity = item.quantity, "item restocked");
    Ok((item, tx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepoError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use sunshine_catalog::{InventoryCategory, StockStatus};

    #[derive(Default)]
    struct FakeRepo {
        items: Mutex<Vec<InventoryItem>>,
        categories: Vec<InventoryCategory>,
        transactions: Mutex<Vec<InventoryTransaction>>,
        fail_audit: bool,
    }

    #[async_trait]
    impl InventoryRepository for FakeRepo {
        async fn list_items(&self) -> Result<Vec<InventoryItem>, RepoError> {
            Ok(self.items.lock().unwrap().clone())
        }

        async fn get_item(&self, id: Uuid) -> Result<Option<InventoryItem>, RepoError> {
            Ok(self.items.lock().unwrap().iter().find(|i| i.id == id).cloned())
        }

        async fn list_categories(&self) -> Result<Vec<InventoryCategory>, RepoError> {
            Ok(self.categories.clone())
        }

        async fn get_category(&self, id: Uuid) -> Result<Option<InventoryCategory>, RepoError> {
            Ok(self.categories.iter().find(|c| c.id == id).cloned())
        }

        async fn create_item(&self, item: &InventoryItem) -> Result<Uuid, RepoError> {
            self.items.lock().unwrap().push(item.clone());
            Ok(item.id)
        }

        async fn update_quantity(&self, id: Uuid, quantity: i32, last_restocked: DateTime<Utc>) -> Result<(), RepoError> {
            let mut items = self.items.lock().unwrap();
            let item = items.iter_mut().find(|i| i.id == id).ok_or("missing item")?;
            item.quantity = quantity;
            item.last_restocked = Some(last_restocked);
            Ok(())
        }

        async fn record_transaction(&self, tx: &InventoryTransaction) -> Result<(), RepoError> {
            if self.fail_audit {
                return Err("audit table unavailable".into());
            }
            self.transactions.lock().unwrap().push(tx.clone());
            Ok(())
        }
    }

    fn soda() -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            name: "Soda".to_string(),
            description: Some("Assorted soft drinks".to_string()),
            category_id: None,
            category_name: Some("Drinks".to_string()),
            quantity: 45,
            min_quantity: 100,
            unit: "cans".to_string(),
            status: StockStatus::LowStock,
            last_restocked: None,
        }
    }

    #[tokio::test]
    async fn test_restock_persists_quantity_and_audit() {
        let item = soda();
        let repo = FakeRepo { items: Mutex::new(vec![item.clone()]), ..Default::default() };

        let (updated, tx) = restock_item(&repo, item.id, 30, Some("staff-1".to_string()), None, Utc::now())
            .await
            .unwrap();

        assert_eq!(updated.quantity, 75);
        assert_eq!(tx.quantity_change, 30);
        assert_eq!(tx.quantity_after, 75);
        assert_eq!(repo.items.lock().unwrap()[0].quantity, 75);
        assert_eq!(repo.transactions.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_restock_survives_audit_failure() {
        let item = soda();
        let repo = FakeRepo { items: Mutex::new(vec![item.clone()]), fail_audit: true, ..Default::default() };

        let (updated, _) = restock_item(&repo, item.id, 5, None, None, Utc::now()).await.unwrap();
        assert_eq!(updated.quantity, 50);
        assert!(repo.transactions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_restock_unknown_item() {
        let repo = FakeRepo::default();
        let result = restock_item(&repo, Uuid::new_v4(), 5, None, None, Utc::now()).await;
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_restock_invalid_quantity_leaves_item() {
        let item = soda();
        let repo = FakeRepo { items: Mutex::new(vec![item.clone()]), ..Default::default() };

        let result = restock_item(&repo, item.id, 0, None, None, Utc::now()).await;
        assert!(matches!(result, Err(CoreError::ValidationError(_))));
        assert_eq!(repo.items.lock().unwrap()[0].quantity, 45);
    }

    #[tokio::test]
    async fn test_add_item_requires_known_category() {
        let repo = FakeRepo::default();
        let new_item = NewInventoryItem {
            name: "Nachos".to_string(),
            description: None,
            category_id: Some(Uuid::new_v4()),
            quantity: Some(10),
            min_quantity: Some(5),
            unit: None,
        };
        assert!(matches!(add_item(&repo, new_item).await, Err(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_add_item_and_filter() {
        let food = InventoryCategory { id: Uuid::new_v4(), name: "Food".to_string(), description: None };
        let repo = FakeRepo { categories: vec![food.clone()], ..Default::default() };

        let new_item = NewInventoryItem {
            name: "Nachos".to_string(),
            description: None,
            category_id: Some(food.id),
            quantity: Some(10),
            min_quantity: Some(5),
            unit: Some("trays".to_string()),
        };
        add_item(&repo, new_item).await.unwrap();

        let filter = InventoryFilter { category: Some("Food".to_string()), ..Default::default() };
        let found = list_items(&repo, &filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].unit, "trays");

        let totals = stats(&repo).await.unwrap();
        assert_eq!(totals.total_items, 10);
    }
}
