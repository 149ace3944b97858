//! Maintenance record model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::MaintenanceStatus;

/// Maintenance record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceRecord {
    pub id: i32,
    pub equipment_id: i32,
    pub status: MaintenanceStatus,
    pub maintenance_type: Option<String>,
    pub description: Option<String>,
    pub cost: Option<Decimal>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Create maintenance record request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMaintenanceRecord {
    pub status: Option<MaintenanceStatus>,
    pub maintenance_type: Option<String>,
    pub description: Option<String>,
    pub cost: Option<Decimal>,
    pub date: Option<DateTime<Utc>>,
}
