use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sunshine_catalog::{InventoryCategory, InventoryItem, InventoryTransaction};
use sunshine_core::repository::{InventoryRepository, RepoError};
use uuid::Uuid;

pub struct StoreInventoryRepository {
    pool: PgPool,
}

impl StoreInventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ITEM_COLUMNS: &str = r#"
    SELECT i.id, i.name, i.description, i.category_id, c.name AS category_name,
           i.quantity, i.min_quantity, i.unit, i.status, i.last_restocked
    FROM inventory_items i
    LEFT JOIN inventory_categories c ON c.id = i.category_id
"#;

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    category_id: Option<Uuid>,
    category_name: Option<String>,
    quantity: i32,
    min_quantity: i32,
    unit: String,
    status: String,
    last_restocked: Option<DateTime<Utc>>,
}

impl TryFrom<ItemRow> for InventoryItem {
    type Error = RepoError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(InventoryItem {
            id: row.id,
            name: row.name,
            description: row.description,
            category_id: row.category_id,
            category_name: row.category_name,
            quantity: row.quantity,
            min_quantity: row.min_quantity,
            unit: row.unit,
            status: row.status.parse()?,
            last_restocked: row.last_restocked,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    description: Option<String>,
}

impl From<CategoryRow> for InventoryCategory {
    fn from(row: CategoryRow) -> Self {
        InventoryCategory { id: row.id, name: row.name, description: row.description }
    }
}

#[async_trait]
impl InventoryRepository for StoreInventoryRepository {
    async fn list_items(&self) -> Result<Vec<InventoryItem>, RepoError> {
        let rows: Vec<ItemRow> = sqlx::query_as(&format!("{ITEM_COLUMNS} ORDER BY i.name"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(InventoryItem::try_from).collect()
    }

    async fn get_item(&self, id: Uuid) -> Result<Option<InventoryItem>, RepoError> {
        let row: Option<ItemRow> = sqlx::query_as(&format!("{ITEM_COLUMNS} WHERE i.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(InventoryItem::try_from).transpose()
    }

    async fn list_categories(&self) -> Result<Vec<InventoryCategory>, RepoError> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT id, name, description FROM inventory_categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(InventoryCategory::from).collect())
    }

    async fn get_category(&self, id: Uuid) -> Result<Option<InventoryCategory>, RepoError> {
        let row: Option<CategoryRow> =
            sqlx::query_as("SELECT id, name, description FROM inventory_categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(InventoryCategory::from))
    }

    async fn create_item(&self, item: &InventoryItem) -> Result<Uuid, RepoError> {
        sqlx::query(
            r#"
            INSERT INTO inventory_items (id, name, description, category_id, quantity, min_quantity, unit, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.category_id)
        .bind(item.quantity)
        .bind(item.min_quantity)
        .bind(&item.unit)
        .bind(item.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(item.id)
    }

    async fn update_quantity(
        &self,
        id: Uuid,
        quantity: i32,
        last_restocked: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        let result = sqlx::query("UPDATE inventory_items SET quantity = $2, last_restocked = $3 WHERE id = $1")
            .bind(id)
            .bind(quantity)
            .bind(last_restocked)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(format!("inventory item {} not found", id).into());
        }
        Ok(())
    }

    async fn record_transaction(&self, tx: &InventoryTransaction) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO inventory_transactions
                (id, item_id, user_id, transaction_type, quantity_change, quantity_after, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(tx.id)
        .bind(tx.item_id)
        .bind(&tx.user_id)
        .bind(tx.transaction_type.as_str())
        .bind(tx.quantity_change)
        .bind(tx.quantity_after)
        .bind(&tx.notes)
        .bind(tx.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
