//! Subscription and invoice endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::subscription::{CreateSubscription, Invoice, Subscription, UpdateSubscription},
};

use super::AuthenticatedUser;

/// List subscriptions
#[utoipa::path(
    get,
    path = "/subscriptions",
    tag = "subscriptions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Subscription list", body = Vec<Subscription>)
    )
)]
pub async fn list_subscriptions(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Subscription>>> {
    let subscriptions = state.services.subscriptions.list().await?;
    Ok(Json(subscriptions))
}

/// Get subscription by ID
#[utoipa::path(
    get,
    path = "/subscriptions/{id}",
    tag = "subscriptions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Subscription ID")),
    responses(
        (status = 200, description = "Subscription details", body = Subscription),
        (status = 404, description = "Subscription not found")
    )
)]
pub async fn get_subscription(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Subscription>> {
    let subscription = state.services.subscriptions.get_by_id(id).await?;
    Ok(Json(subscription))
}

/// Create a subscription
#[utoipa::path(
    post,
    path = "/subscriptions",
    tag = "subscriptions",
    security(("bearer_auth" = [])),
    request_body = CreateSubscription,
    responses(
        (status = 201, description = "Subscription created", body = Subscription),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "Insufficient role")
    )
)]
pub async fn create_subscription(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateSubscription>,
) -> AppResult<(StatusCode, Json<Subscription>)> {
    claims.require_equipment_manager()?;

    let subscription = state.services.subscriptions.create(&data).await?;
    Ok((StatusCode::CREATED, Json(subscription)))
}

/// Update a subscription
#[utoipa::path(
    put,
    path = "/subscriptions/{id}",
    tag = "subscriptions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Subscription ID")),
    request_body = UpdateSubscription,
    responses(
        (status = 200, description = "Subscription updated", body = Subscription),
        (status = 403, description = "Insufficient role"),
        (status = 404, description = "Subscription not found")
    )
)]
pub async fn update_subscription(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateSubscription>,
) -> AppResult<Json<Subscription>> {
    claims.require_equipment_manager()?;

    let subscription = state.services.subscriptions.update(id, &data).await?;
    Ok(Json(subscription))
}

/// List invoices
#[utoipa::path(
    get,
    path = "/invoices",
    tag = "subscriptions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Invoice list", body = Vec<Invoice>)
    )
)]
pub async fn list_invoices(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Invoice>>> {
    let invoices = state.services.subscriptions.list_invoices().await?;
    Ok(Json(invoices))
}
