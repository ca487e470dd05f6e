use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use sunshine_core::repository::{RepoError, ScheduleRepository};
use sunshine_core::schedule::Shift;
use uuid::Uuid;

pub struct StoreScheduleRepository {
    pool: PgPool,
}

impl StoreScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ShiftRow {
    id: Uuid,
    user_id: String,
    shift_date: NaiveDate,
    shift_start: NaiveTime,
    shift_end: NaiveTime,
    position: String,
    location: String,
    status: String,
    notes: Option<String>,
}

impl TryFrom<ShiftRow> for Shift {
    type Error = RepoError;

    fn try_from(row: ShiftRow) -> Result<Self, Self::Error> {
        Ok(Shift {
            id: row.id,
            user_id: row.user_id,
            shift_date: row.shift_date,
            shift_start: row.shift_start,
            shift_end: row.shift_end,
            position: row.position,
            location: row.location,
            status: row.status.parse()?,
            notes: row.notes,
        })
    }
}

#[async_trait]
impl ScheduleRepository for StoreScheduleRepository {
    async fn list_shifts(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Shift>, RepoError> {
        let rows: Vec<ShiftRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, shift_date, shift_start, shift_end, position, location, status, notes
            FROM staff_schedules
            WHERE shift_date >= $1 AND shift_date <= $2
            ORDER BY shift_date, shift_start
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Shift::try_from).collect()
    }

    async fn create_shift(&self, shift: &Shift) -> Result<Uuid, RepoError> {
        sqlx::query(
            r#"
            INSERT INTO staff_schedules
                (id, user_id, shift_date, shift_start, shift_end, position, location, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(shift.id)
        .bind(&shift.user_id)
        .bind(shift.shift_date)
        .bind(shift.shift_start)
        .bind(shift.shift_end)
        .bind(&shift.position)
        .bind(&shift.location)
        .bind(shift.status.as_str())
        .bind(&shift.notes)
        .execute(&self.pool)
        .await?;

        Ok(shift.id)
    }
}
