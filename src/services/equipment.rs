//! Equipment lifecycle service
//!
//! Orchestrates the state machine governing equipment status transitions.
//! The repository performs each transition inside a row-locked transaction;
//! this layer enforces input rules and resolves display relations.

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::EquipmentStatus,
        equipment::{
            AssignEquipment, CreateEquipment, EquipmentDetails, EquipmentList, EquipmentQuery,
            TransitionResponse, UnassignEquipment, UpdateEquipment,
        },
        history::EquipmentHistoryDetails,
        maintenance::{CreateMaintenanceRecord, MaintenanceRecord},
        user::UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List equipment with filters
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<EquipmentList> {
        let (items, total) = self.repository.equipment.list(query).await?;
        Ok(EquipmentList {
            items,
            total,
            page: query.page.unwrap_or(1).max(1),
            per_page: query.per_page.unwrap_or(50).clamp(1, 500),
        })
    }

    /// Get equipment with owner resolved
    pub async fn get_details(&self, id: i32) -> AppResult<EquipmentDetails> {
        self.repository.equipment.get_details(id).await
    }

    /// Intake: create equipment in `available` or `pending`
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<EquipmentDetails> {
        if let Some(status) = data.status {
            if !status.is_assignable() {
                return Err(AppError::Validation(format!(
                    "New equipment must be available or pending, not {}",
                    status
                )));
            }
        }
        let equipment = self.repository.equipment.create(data).await?;
        Ok(EquipmentDetails {
            equipment,
            current_owner: None,
        })
    }

    /// Update descriptive fields
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<EquipmentDetails> {
        self.repository.equipment.update(id, data).await?;
        self.repository.equipment.get_details(id).await
    }

    /// Return equipment from its current owner. The reported condition
    /// determines the resulting status (available / maintenance / broken).
    pub async fn unassign(
        &self,
        id: i32,
        request: &UnassignEquipment,
        acting: &UserClaims,
    ) -> AppResult<TransitionResponse> {
        let equipment = self
            .repository
            .equipment
            .unassign(
                id,
                request.condition,
                request.notes.as_deref(),
                &acting.sub,
            )
            .await?;

        let new_status = equipment.status;
        Ok(TransitionResponse {
            equipment: EquipmentDetails {
                equipment,
                current_owner: None,
            },
            new_status,
        })
    }

    /// Hand equipment to a user
    pub async fn assign(
        &self,
        id: i32,
        request: &AssignEquipment,
        acting: &UserClaims,
    ) -> AppResult<TransitionResponse> {
        let recipient = self.repository.users.get_short(request.user_id).await?;

        let equipment = self
            .repository
            .equipment
            .assign(id, request.user_id, request.notes.as_deref(), &acting.sub)
            .await?;

        let new_status = equipment.status;
        Ok(TransitionResponse {
            equipment: EquipmentDetails {
                equipment,
                current_owner: Some(recipient),
            },
            new_status,
        })
    }

    /// Administrative override to a non-assigned status
    pub async fn override_status(
        &self,
        id: i32,
        status: EquipmentStatus,
        notes: Option<&str>,
        acting: &UserClaims,
    ) -> AppResult<TransitionResponse> {
        if status == EquipmentStatus::Assigned {
            return Err(AppError::Validation(
                "Use the assign endpoint to assign equipment".to_string(),
            ));
        }

        let equipment = self
            .repository
            .equipment
            .override_status(id, status, notes, &acting.sub)
            .await?;

        let new_status = equipment.status;
        Ok(TransitionResponse {
            equipment: EquipmentDetails {
                equipment,
                current_owner: None,
            },
            new_status,
        })
    }

    /// Decommission: the delete operation of this system. Rows are never
    /// hard-deleted; decommissioning is a status value.
    pub async fn decommission(
        &self,
        id: i32,
        acting: &UserClaims,
    ) -> AppResult<TransitionResponse> {
        self.override_status(id, EquipmentStatus::Decommissioned, None, acting)
            .await
    }

    /// Audit trail for a piece of equipment, newest first
    pub async fn history(&self, id: i32) -> AppResult<Vec<EquipmentHistoryDetails>> {
        // Surface NotFound for unknown equipment rather than an empty list
        self.repository.equipment.get_by_id(id).await?;
        self.repository.history.list_for_equipment(id).await
    }

    /// Maintenance records for a piece of equipment
    pub async fn maintenance_records(&self, id: i32) -> AppResult<Vec<MaintenanceRecord>> {
        self.repository.equipment.get_by_id(id).await?;
        self.repository.maintenance.list_for_equipment(id).await
    }

    /// Record maintenance for a piece of equipment
    pub async fn create_maintenance_record(
        &self,
        id: i32,
        data: &CreateMaintenanceRecord,
    ) -> AppResult<MaintenanceRecord> {
        self.repository.equipment.get_by_id(id).await?;
        self.repository.maintenance.create(id, data).await
    }
}
