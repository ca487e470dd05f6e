use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use sunshine_core::analytics::DailyAnalytics;
use sunshine_core::repository::{AnalyticsRepository, RepoError};

pub struct StoreAnalyticsRepository {
    pool: PgPool,
}

impl StoreAnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AnalyticsRow {
    date: NaiveDate,
    total_visitors: i64,
    ticket_revenue: f64,
    merchandise_sales: f64,
    food_beverage_sales: f64,
    weather: Option<String>,
}

impl From<AnalyticsRow> for DailyAnalytics {
    fn from(row: AnalyticsRow) -> Self {
        DailyAnalytics {
            date: row.date,
            total_visitors: row.total_visitors,
            ticket_revenue: row.ticket_revenue,
            merchandise_sales: row.merchandise_sales,
            food_beverage_sales: row.food_beverage_sales,
            weather: row.weather,
        }
    }
}

#[async_trait]
impl AnalyticsRepository for StoreAnalyticsRepository {
    async fn list_daily(&self, since: NaiveDate) -> Result<Vec<DailyAnalytics>, RepoError> {
        // NUMERIC columns come back as FLOAT8 so no decimal crate is needed
        let rows: Vec<AnalyticsRow> = sqlx::query_as(
            r#"
            SELECT date,
                   total_visitors::BIGINT AS total_visitors,
                   ticket_revenue::FLOAT8 AS ticket_revenue,
                   merchandise_sales::FLOAT8 AS merchandise_sales,
                   food_beverage_sales::FLOAT8 AS food_beverage_sales,
                   weather
            FROM park_analytics
            WHERE date >= $1
            ORDER BY date ASC
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DailyAnalytics::from).collect())
    }
}
