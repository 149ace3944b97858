//! Equipment endpoints: CRUD, lifecycle transitions, history and export

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        equipment::{
            AssignEquipment, CreateEquipment, EquipmentDetails, EquipmentList, EquipmentQuery,
            OverrideStatus, TransitionResponse, UnassignEquipment, UpdateEquipment,
        },
        history::EquipmentHistoryDetails,
        maintenance::{CreateMaintenanceRecord, MaintenanceRecord},
    },
    services::export::parse_id_list,
};

use super::AuthenticatedUser;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// List equipment
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Equipment list", body = EquipmentList)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<EquipmentQuery>,
) -> AppResult<Json<EquipmentList>> {
    let list = state.services.equipment.list(&query).await?;
    Ok(Json(list))
}

/// Export query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ExportQuery {
    /// Comma-separated equipment ids; absent means export everything
    pub ids: Option<String>,
}

/// Export equipment as a spreadsheet
#[utoipa::path(
    get,
    path = "/equipment/export",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(ExportQuery),
    responses(
        (status = 200, description = "Spreadsheet download", body = Vec<u8>, content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 400, description = "Malformed id list")
    )
)]
pub async fn export_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl axum::response::IntoResponse> {
    let ids = query.ids.as_deref().map(parse_id_list).transpose()?;

    let bytes = state
        .services
        .export
        .export_equipment(ids.as_deref())
        .await?;

    let filename = format!("equipment-export-{}.xlsx", Utc::now().format("%Y-%m-%d"));
    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    Ok((headers, bytes))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = EquipmentDetails),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentDetails>> {
    let equipment = state.services.equipment.get_details(id).await?;
    Ok(Json(equipment))
}

/// Create equipment (intake)
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = EquipmentDetails),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Serial number already exists")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<EquipmentDetails>)> {
    claims.require_equipment_manager()?;
    data.validate()?;

    let equipment = state.services.equipment.create(&data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment descriptive fields
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = EquipmentDetails),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<EquipmentDetails>> {
    claims.require_equipment_manager()?;
    data.validate()?;

    let equipment = state.services.equipment.update(id, &data).await?;
    Ok(Json(equipment))
}

/// Decommission equipment. Rows are never deleted; this transitions the
/// item to the decommissioned status and records it in the history ledger.
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment decommissioned", body = TransitionResponse),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Already decommissioned")
    )
)]
pub async fn decommission_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<TransitionResponse>> {
    claims.require_admin()?;

    let result = state.services.equipment.decommission(id, &claims).await?;
    Ok(Json(result))
}

/// Assign equipment to a user
#[utoipa::path(
    post,
    path = "/equipment/{id}/assign",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = AssignEquipment,
    responses(
        (status = 200, description = "Equipment assigned", body = TransitionResponse),
        (status = 403, description = "Insufficient role"),
        (status = 404, description = "Equipment or user not found"),
        (status = 409, description = "Equipment not assignable")
    )
)]
pub async fn assign_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<AssignEquipment>,
) -> AppResult<Json<TransitionResponse>> {
    claims.require_equipment_manager()?;

    let result = state.services.equipment.assign(id, &request, &claims).await?;
    Ok(Json(result))
}

/// Return (unassign) equipment. The reported condition determines the
/// resulting status: excellent/good/fair leave it available, poor sends it
/// to maintenance and broken marks it broken.
#[utoipa::path(
    post,
    path = "/equipment/{id}/unassign",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UnassignEquipment,
    responses(
        (status = 200, description = "Equipment returned", body = TransitionResponse),
        (status = 403, description = "Insufficient role"),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Equipment is not currently assigned")
    )
)]
pub async fn unassign_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UnassignEquipment>,
) -> AppResult<Json<TransitionResponse>> {
    claims.require_equipment_manager()?;

    let result = state
        .services
        .equipment
        .unassign(id, &request, &claims)
        .await?;
    Ok(Json(result))
}

/// Administrative status override (lost, stolen, decommissioned, ...)
#[utoipa::path(
    put,
    path = "/equipment/{id}/status",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = OverrideStatus,
    responses(
        (status = 200, description = "Status changed", body = TransitionResponse),
        (status = 400, description = "Assigned is not a valid override target"),
        (status = 403, description = "Insufficient role"),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Already in the requested status")
    )
)]
pub async fn override_equipment_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<OverrideStatus>,
) -> AppResult<Json<TransitionResponse>> {
    claims.require_admin()?;

    let result = state
        .services
        .equipment
        .override_status(id, request.status, request.notes.as_deref(), &claims)
        .await?;
    Ok(Json(result))
}

/// Get the audit trail for a piece of equipment
#[utoipa::path(
    get,
    path = "/equipment/{id}/history",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "History entries, newest first", body = Vec<EquipmentHistoryDetails>),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment_history(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<EquipmentHistoryDetails>>> {
    let history = state.services.equipment.history(id).await?;
    Ok(Json(history))
}

/// List maintenance records for a piece of equipment
#[utoipa::path(
    get,
    path = "/equipment/{id}/maintenance",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Maintenance records, newest first", body = Vec<MaintenanceRecord>),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn list_maintenance_records(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<MaintenanceRecord>>> {
    let records = state.services.equipment.maintenance_records(id).await?;
    Ok(Json(records))
}

/// Record maintenance for a piece of equipment
#[utoipa::path(
    post,
    path = "/equipment/{id}/maintenance",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = CreateMaintenanceRecord,
    responses(
        (status = 201, description = "Maintenance record created", body = MaintenanceRecord),
        (status = 403, description = "Insufficient role"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn create_maintenance_record(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<CreateMaintenanceRecord>,
) -> AppResult<(StatusCode, Json<MaintenanceRecord>)> {
    claims.require_equipment_manager()?;

    let record = state
        .services
        .equipment
        .create_maintenance_record(id, &data)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}
