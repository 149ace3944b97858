//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, equipment, health, stats, subscriptions, users};
use crate::error::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ProfiCo Inventory API",
        version = "1.0.0",
        description = "Inventory management REST API: equipment lifecycle, subscriptions and billing",
        license(name = "MIT"),
        contact(name = "ProfiCo Team", email = "dev@profico.com")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::decommission_equipment,
        equipment::assign_equipment,
        equipment::unassign_equipment,
        equipment::override_equipment_status,
        equipment::get_equipment_history,
        equipment::list_maintenance_records,
        equipment::create_maintenance_record,
        equipment::export_equipment,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user_role,
        // Stats
        stats::get_workflow_stats,
        stats::get_billing_stats,
        // Subscriptions
        subscriptions::list_subscriptions,
        subscriptions::get_subscription,
        subscriptions::create_subscription,
        subscriptions::update_subscription,
        subscriptions::list_invoices,
    ),
    components(
        schemas(
            ErrorResponse,
            // Health
            health::HealthResponse,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Enums
            crate::models::enums::UserRole,
            crate::models::enums::EquipmentStatus,
            crate::models::enums::EquipmentCondition,
            crate::models::enums::HistoryAction,
            crate::models::enums::MaintenanceStatus,
            crate::models::enums::BillingCycle,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentDetails,
            crate::models::equipment::EquipmentList,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::AssignEquipment,
            crate::models::equipment::UnassignEquipment,
            crate::models::equipment::OverrideStatus,
            crate::models::equipment::TransitionResponse,
            // History & maintenance
            crate::models::history::EquipmentHistory,
            crate::models::history::EquipmentHistoryDetails,
            crate::models::maintenance::MaintenanceRecord,
            crate::models::maintenance::CreateMaintenanceRecord,
            // Users
            crate::models::user::User,
            crate::models::user::UserShort,
            crate::models::user::CreateUser,
            crate::models::user::UpdateRole,
            users::UserList,
            // Stats
            stats::WorkflowStats,
            stats::StatEntry,
            stats::MonthlyTrendEntry,
            stats::AgeBucket,
            stats::TopOwner,
            stats::BillingStats,
            // Subscriptions
            crate::models::subscription::Subscription,
            crate::models::subscription::CreateSubscription,
            crate::models::subscription::UpdateSubscription,
            crate::models::subscription::Invoice,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Authentication"),
        (name = "equipment", description = "Equipment lifecycle and export"),
        (name = "users", description = "User management"),
        (name = "stats", description = "Dashboards"),
        (name = "subscriptions", description = "Subscriptions and billing")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
