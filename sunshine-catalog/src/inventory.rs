use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stock level label stored alongside an item.
///
/// Recorded independently of `quantity` and `min_quantity`; nothing here
/// derives one from the other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in_stock",
            StockStatus::LowStock => "low_stock",
            StockStatus::OutOfStock => "out_of_stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_stock" => Ok(StockStatus::InStock),
            "low_stock" => Ok(StockStatus::LowStock),
            "out_of_stock" => Ok(StockStatus::OutOfStock),
            other => Err(InventoryError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryCategory {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// A stocked supply item (food, drinks, merchandise)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub quantity: i32,
    pub min_quantity: i32,
    pub unit: String,
    pub status: StockStatus,
    pub last_restocked: Option<DateTime<Utc>>,
}

impl InventoryItem {
    /// Add `quantity_change` units and produce the audit record.
    ///
    /// Status is left as stored.
    pub fn restock(
        &mut self,
        quantity_change: i32,
        user_id: Option<String>,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<InventoryTransaction, InventoryError> {
        if quantity_change <= 0 {
            return Err(InventoryError::InvalidQuantity(quantity_change));
        }

        let quantity_after = self
            .quantity
            .checked_add(quantity_change)
            .ok_or(InventoryError::InvalidQuantity(quantity_change))?;

        self.quantity = quantity_after;
        self.last_restocked = Some(now);

        Ok(InventoryTransaction {
            id: Uuid::new_v4(),
            item_id: self.id,
            user_id,
            transaction_type: TransactionType::Restock,
            quantity_change,
            quantity_after,
            notes: notes.filter(|n| !n.is_empty()),
            created_at: now,
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Restock,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Restock => "restock",
        }
    }
}

/// Append-only audit entry for a stock movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub id: Uuid,
    pub item_id: Uuid,
    pub user_id: Option<String>,
    pub transaction_type: TransactionType,
    pub quantity_change: i32,
    pub quantity_after: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Form input for a new inventory item
#[derive(Debug, Clone, Deserialize)]
pub struct NewInventoryItem {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub min_quantity: Option<i32>,
    pub unit: Option<String>,
}

impl NewInventoryItem {
    /// Check required fields and build the item under `category`.
    pub fn into_item(self, category: &InventoryCategory) -> Result<InventoryItem, InventoryError> {
        if self.name.is_empty() {
            return Err(InventoryError::MissingField("name"));
        }
        let quantity = self.quantity.ok_or(InventoryError::MissingField("quantity"))?;
        let min_quantity = self.min_quantity.ok_or(InventoryError::MissingField("min_quantity"))?;
        if quantity < 0 {
            return Err(InventoryError::InvalidQuantity(quantity));
        }
        if min_quantity < 0 {
            return Err(InventoryError::InvalidQuantity(min_quantity));
        }

        let unit = self
            .unit
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| "units".to_string());

        Ok(InventoryItem {
            id: Uuid::new_v4(),
            name: self.name,
            description: self.description.filter(|d| !d.is_empty()),
            category_id: Some(category.id),
            category_name: Some(category.name.clone()),
            quantity,
            min_quantity,
            unit,
            status: StockStatus::InStock,
            last_restocked: None,
        })
    }
}

/// List filter. `None` and `"all"` leave a dimension unconstrained.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

impl InventoryFilter {
    pub fn matches(&self, item: &InventoryItem) -> bool {
        let matches_search = match self.search.as_deref() {
            Some(term) if !term.is_empty() => {
                item.name.to_lowercase().contains(&term.to_lowercase())
            }
            _ => true,
        };

        let matches_category = match self.category.as_deref() {
            None | Some("all") => true,
            Some(category) => item.category_name.as_deref() == Some(category),
        };

        let matches_status = match self.status.as_deref() {
            None | Some("all") => true,
            Some(status) => item.status.as_str() == status,
        };

        matches_search && matches_category && matches_status
    }

    pub fn apply<'a, I>(&self, items: I) -> Vec<InventoryItem>
    where
        I: IntoIterator<Item = &'a InventoryItem>,
    {
        items.into_iter().filter(|item| self.matches(item)).cloned().collect()
    }
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct InventoryStats {
    pub total_items: i64,
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
}

impl InventoryStats {
    pub fn from_items(items: &[InventoryItem]) -> Self {
        Self {
            total_items: items.iter().map(|i| i64::from(i.quantity)).sum(),
            low_stock_count: items.iter().filter(|i| i.status == StockStatus::LowStock).count(),
            out_of_stock_count: items.iter().filter(|i| i.status == StockStatus::OutOfStock).count(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Inventory item not found: {0}")]
    NotFound(String),

    #[error("Inventory category not found: {0}")]
    CategoryNotFound(String),

    #[error("Quantity must be a positive number, got {0}")]
    InvalidQuantity(i32),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown stock status: {0}")]
    UnknownStatus(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: &str, quantity: i32, status: StockStatus) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            category_id: Some(Uuid::new_v4()),
            category_name: Some(category.to_string()),
            quantity,
            min_quantity: 50,
            unit: "pieces".to_string(),
            status,
            last_restocked: None,
        }
    }

    fn sample() -> Vec<InventoryItem> {
        vec![
            item("Popcorn", "Food", 150, StockStatus::InStock),
            item("Soda", "Drinks", 45, StockStatus::LowStock),
            item("T-Shirts", "Merchandise", 0, StockStatus::OutOfStock),
            item("Hot Dogs", "Food", 200, StockStatus::InStock),
        ]
    }

    #[test]
    fn test_restock_updates_quantity_and_records_audit() {
        let mut soda = item("Soda", "Drinks", 45, StockStatus::LowStock);
        let now = Utc::now();

        let tx = soda.restock(30, Some("staff-1".to_string()), Some("weekly delivery".to_string()), now).unwrap();

        assert_eq!(soda.quantity, 75);
        assert_eq!(soda.last_restocked, Some(now));
        assert_eq!(tx.quantity_change, 30);
        assert_eq!(tx.quantity_after, 75);
        assert_eq!(tx.item_id, soda.id);
        assert_eq!(tx.transaction_type, TransactionType::Restock);
        // status is stored, not recomputed
        assert_eq!(soda.status, StockStatus::LowStock);
    }

    #[test]
    fn test_restock_rejects_non_positive() {
        let mut soda = item("Soda", "Drinks", 45, StockStatus::LowStock);

        assert!(soda.restock(0, None, None, Utc::now()).is_err());
        assert!(soda.restock(-5, None, None, Utc::now()).is_err());
        assert_eq!(soda.quantity, 45);
        assert!(soda.last_restocked.is_none());
    }

    #[test]
    fn test_empty_notes_are_dropped() {
        let mut soda = item("Soda", "Drinks", 45, StockStatus::LowStock);
        let tx = soda.restock(1, None, Some(String::new()), Utc::now()).unwrap();
        assert!(tx.notes.is_none());
    }

    #[test]
    fn test_filter_search_is_case_insensitive_substring() {
        let filter = InventoryFilter { search: Some("HOT".to_string()), ..Default::default() };
        let found = filter.apply(&sample());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Hot Dogs");
    }

    #[test]
    fn test_filter_category_and_status() {
        let items = sample();

        let food = InventoryFilter { category: Some("Food".to_string()), ..Default::default() };
        assert_eq!(food.apply(&items).len(), 2);

        let low = InventoryFilter { status: Some("low_stock".to_string()), ..Default::default() };
        assert_eq!(low.apply(&items)[0].name, "Soda");

        let all = InventoryFilter {
            search: Some(String::new()),
            category: Some("all".to_string()),
            status: Some("all".to_string()),
        };
        assert_eq!(all.apply(&items).len(), 4);

        let none = InventoryFilter {
            category: Some("Food".to_string()),
            status: Some("out_of_stock".to_string()),
            ..Default::default()
        };
        assert!(none.apply(&items).is_empty());
    }

    #[test]
    fn test_stats() {
        let stats = InventoryStats::from_items(&sample());
        assert_eq!(stats.total_items, 395);
        assert_eq!(stats.low_stock_count, 1);
        assert_eq!(stats.out_of_stock_count, 1);
    }

    #[test]
    fn test_new_item_defaults() {
        let category = InventoryCategory { id: Uuid::new_v4(), name: "Food".to_string(), description: None };
        let new_item = NewInventoryItem {
            name: "Nachos".to_string(),
            description: Some(String::new()),
            category_id: Some(category.id),
            quantity: Some(40),
            min_quantity: Some(10),
            unit: None,
        };

        let created = new_item.into_item(&category).unwrap();
        assert_eq!(created.unit, "units");
        assert_eq!(created.status, StockStatus::InStock);
        assert_eq!(created.category_name.as_deref(), Some("Food"));
        assert!(created.description.is_none());
    }

    #[test]
    fn test_new_item_requires_fields() {
        let category = InventoryCategory { id: Uuid::new_v4(), name: "Food".to_string(), description: None };
        let missing_qty = NewInventoryItem {
            name: "Nachos".to_string(),
            description: None,
            category_id: Some(category.id),
            quantity: None,
            min_quantity: Some(10),
            unit: None,
        };
        assert!(matches!(missing_qty.into_item(&category), Err(InventoryError::MissingField("quantity"))));
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [StockStatus::InStock, StockStatus::LowStock, StockStatus::OutOfStock] {
            assert_eq!(status.as_str().parse::<StockStatus>().unwrap(), status);
        }
        assert!("discontinued".parse::<StockStatus>().is_err());
    }
}
