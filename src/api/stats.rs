//! Statistics endpoints

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::AuthenticatedUser;

/// Composite equipment workflow statistics
#[derive(Serialize, ToSchema)]
pub struct WorkflowStats {
    /// Total number of equipment rows
    pub total_equipment: i64,
    pub available_equipment: i64,
    pub assigned_equipment: i64,
    pub maintenance_equipment: i64,
    pub broken_equipment: i64,
    /// Items needing attention: in maintenance or broken, or assigned with
    /// overdue maintenance or expired warranty
    pub pending_actions: i64,
    /// History entries recorded in the trailing 7 days
    pub recent_activity: i64,
    /// Count per category, descending
    pub category_distribution: Vec<StatEntry>,
    /// Trailing 6 months of intake, bucketed by creation month
    pub monthly_trend: Vec<MonthlyTrendEntry>,
    /// Maintenance records grouped by status
    pub maintenance_by_status: Vec<StatEntry>,
    /// Equipment age from purchase date: 0-1yr, 1-2yr, 2-3yr, 3+yr
    pub age_distribution: Vec<AgeBucket>,
    /// Top 10 users by currently assigned equipment
    pub top_owners: Vec<TopOwner>,
}

#[derive(Serialize, ToSchema)]
pub struct StatEntry {
    /// Label
    pub label: String,
    /// Value
    pub value: i64,
}

/// One month in the equipment trend
#[derive(Serialize, ToSchema)]
pub struct MonthlyTrendEntry {
    /// Month label (YYYY-MM)
    pub period: String,
    pub total: i64,
    pub available: i64,
    pub assigned: i64,
    pub maintenance: i64,
    pub broken: i64,
}

#[derive(Serialize, ToSchema)]
pub struct AgeBucket {
    /// Bucket label (0-1yr, 1-2yr, 2-3yr, 3+yr)
    pub bucket: String,
    pub value: i64,
}

/// User ranked by currently assigned equipment
#[derive(Serialize, ToSchema)]
pub struct TopOwner {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub assigned_count: i64,
}

/// Billing dashboard statistics
#[derive(Serialize, ToSchema)]
pub struct BillingStats {
    pub total_subscriptions: i64,
    pub active_subscriptions: i64,
    /// Monthly-equivalent spend over active subscriptions
    #[schema(value_type = f64)]
    pub monthly_spend: Decimal,
    pub paid_invoices: i64,
    pub open_invoices: i64,
    /// Sum of unpaid invoice amounts
    #[schema(value_type = f64)]
    pub outstanding_amount: Decimal,
    pub subscriptions_by_vendor: Vec<StatEntry>,
}

/// Get equipment workflow statistics
#[utoipa::path(
    get,
    path = "/equipment/workflow-stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Workflow statistics", body = WorkflowStats),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_workflow_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<WorkflowStats>> {
    let stats = state.services.stats.get_workflow_stats().await?;
    Ok(Json(stats))
}

/// Get billing statistics
#[utoipa::path(
    get,
    path = "/stats/billing",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Billing statistics", body = BillingStats),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_billing_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<BillingStats>> {
    let stats = state.services.stats.get_billing_stats().await?;
    Ok(Json(stats))
}
