//! Equipment history repository
//!
//! Read-only access to the audit ledger. Appends happen exclusively inside
//! the lifecycle transactions in the equipment repository; no update or
//! delete statement exists for this table.

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::history::EquipmentHistoryDetails};

#[derive(Clone)]
pub struct HistoryRepository {
    pool: Pool<Postgres>,
}

impl HistoryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// History entries for a piece of equipment, newest first
    pub async fn list_for_equipment(
        &self,
        equipment_id: i32,
    ) -> AppResult<Vec<EquipmentHistoryDetails>> {
        let entries = sqlx::query_as::<_, EquipmentHistoryDetails>(
            r#"
            SELECT h.id, h.equipment_id, h.from_user_id, u.name as from_user_name,
                   h.action, h.condition, h.notes, h.created_at
            FROM equipment_history h
            LEFT JOIN users u ON h.from_user_id = u.id
            WHERE h.equipment_id = $1
            ORDER BY h.created_at DESC
            "#,
        )
        .bind(equipment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Number of ledger entries recorded in the trailing `days` days
    pub async fn count_recent(&self, days: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM equipment_history WHERE created_at >= NOW() - $1 * INTERVAL '1 day'",
        )
        .bind(days)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
