//! Equipment model and lifecycle request/response types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{EquipmentCondition, EquipmentStatus};
use super::user::UserShort;

/// Equipment record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Unique serial number
    pub serial_number: String,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: String,
    pub status: EquipmentStatus,
    pub condition: Option<EquipmentCondition>,
    pub current_owner_id: Option<i32>,
    pub location: Option<String>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub purchase_method: Option<String>,
    pub purchase_price: Option<Decimal>,
    pub warranty_expiry: Option<DateTime<Utc>>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Equipment with its current owner resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EquipmentDetails {
    #[serde(flatten)]
    pub equipment: Equipment,
    pub current_owner: Option<UserShort>,
}

/// Equipment list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    /// Filter by status slug
    pub status: Option<EquipmentStatus>,
    /// Filter by category
    pub category: Option<String>,
    /// Search over name, serial number and brand
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Paginated equipment list response
#[derive(Debug, Serialize, ToSchema)]
pub struct EquipmentList {
    pub items: Vec<EquipmentDetails>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// Create equipment request (intake)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Serial number must not be empty"))]
    pub serial_number: String,
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    /// Intake status; only `available` or `pending` are accepted
    pub status: Option<EquipmentStatus>,
    pub condition: Option<EquipmentCondition>,
    pub location: Option<String>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub purchase_method: Option<String>,
    pub purchase_price: Option<Decimal>,
    pub warranty_expiry: Option<DateTime<Utc>>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Update equipment request (descriptive fields only; status moves through
/// the lifecycle endpoints)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub purchase_method: Option<String>,
    pub purchase_price: Option<Decimal>,
    pub warranty_expiry: Option<DateTime<Utc>>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Assign request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignEquipment {
    /// User receiving the equipment
    pub user_id: i32,
    pub notes: Option<String>,
}

/// Unassign (return) request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UnassignEquipment {
    /// Condition reported at return time
    pub condition: EquipmentCondition,
    pub notes: Option<String>,
}

/// Administrative status override request
#[derive(Debug, Deserialize, ToSchema)]
pub struct OverrideStatus {
    /// Target status; `assigned` is rejected (use the assign endpoint)
    pub status: EquipmentStatus,
    pub notes: Option<String>,
}

/// Response for lifecycle transitions
#[derive(Debug, Serialize, ToSchema)]
pub struct TransitionResponse {
    pub equipment: EquipmentDetails,
    pub new_status: EquipmentStatus,
}
