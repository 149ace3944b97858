//! Maintenance records repository

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        enums::MaintenanceStatus,
        maintenance::{CreateMaintenanceRecord, MaintenanceRecord},
    },
};

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: Pool<Postgres>,
}

impl MaintenanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Maintenance records for a piece of equipment, newest first
    pub async fn list_for_equipment(&self, equipment_id: i32) -> AppResult<Vec<MaintenanceRecord>> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT * FROM maintenance_records WHERE equipment_id = $1 ORDER BY date DESC",
        )
        .bind(equipment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// Create a maintenance record
    pub async fn create(
        &self,
        equipment_id: i32,
        data: &CreateMaintenanceRecord,
    ) -> AppResult<MaintenanceRecord> {
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records (equipment_id, status, maintenance_type, description, cost, date)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()))
            RETURNING *
            "#,
        )
        .bind(equipment_id)
        .bind(data.status.unwrap_or(MaintenanceStatus::Scheduled))
        .bind(&data.maintenance_type)
        .bind(&data.description)
        .bind(data.cost)
        .bind(data.date)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }
}
