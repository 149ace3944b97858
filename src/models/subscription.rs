//! Subscription and invoice models for billing tracking

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::BillingCycle;

/// Software subscription from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subscription {
    pub id: i32,
    pub name: String,
    pub vendor: Option<String>,
    pub price: Option<Decimal>,
    pub billing_cycle: BillingCycle,
    pub renewal_date: Option<DateTime<Utc>>,
    pub active: bool,
    pub assigned_user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create subscription request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubscription {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub vendor: Option<String>,
    pub price: Option<Decimal>,
    pub billing_cycle: Option<BillingCycle>,
    pub renewal_date: Option<DateTime<Utc>>,
    pub assigned_user_id: Option<i32>,
}

/// Update subscription request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSubscription {
    pub name: Option<String>,
    pub vendor: Option<String>,
    pub price: Option<Decimal>,
    pub billing_cycle: Option<BillingCycle>,
    pub renewal_date: Option<DateTime<Utc>>,
    pub active: Option<bool>,
    pub assigned_user_id: Option<i32>,
}

/// Invoice from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Invoice {
    pub id: i32,
    pub subscription_id: Option<i32>,
    pub vendor: Option<String>,
    pub amount: Decimal,
    pub issued_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
}
