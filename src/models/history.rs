//! Equipment history ledger model
//!
//! History rows are append-only: they are inserted inside lifecycle
//! transactions and never updated or deleted afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::{EquipmentCondition, HistoryAction};

/// One entry in the equipment audit trail
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentHistory {
    pub id: i32,
    pub equipment_id: i32,
    /// Owner the equipment moved away from (null for intake events)
    pub from_user_id: Option<i32>,
    pub action: HistoryAction,
    /// Condition recorded at the time of the event
    pub condition: Option<EquipmentCondition>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// History entry with the previous owner resolved for display
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EquipmentHistoryDetails {
    pub id: i32,
    pub equipment_id: i32,
    pub from_user_id: Option<i32>,
    pub from_user_name: Option<String>,
    pub action: HistoryAction,
    pub condition: Option<EquipmentCondition>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
