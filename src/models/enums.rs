//! Shared domain enums for the inventory lifecycle

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Implements the sqlx glue for a slug enum stored as TEXT
macro_rules! impl_pg_slug {
    ($name:ident) => {
        impl sqlx::Type<Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s: String = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> sqlx::encode::IsNull {
                let s: String = self.as_str().to_string();
                <String as Encode<Postgres>>::encode(s, buf)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// User roles, ordered by privilege
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    TeamLead,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::TeamLead => "team_lead",
            UserRole::User => "user",
        }
    }

    /// Equipment mutations (assign/unassign) require one of {admin, team_lead}
    pub fn can_manage_equipment(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::TeamLead)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "team_lead" => Ok(UserRole::TeamLead),
            "user" => Ok(UserRole::User),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

impl_pg_slug!(UserRole);

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Equipment lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Pending,
    Available,
    Assigned,
    Maintenance,
    Broken,
    Lost,
    Stolen,
    Decommissioned,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Pending => "pending",
            EquipmentStatus::Available => "available",
            EquipmentStatus::Assigned => "assigned",
            EquipmentStatus::Maintenance => "maintenance",
            EquipmentStatus::Broken => "broken",
            EquipmentStatus::Lost => "lost",
            EquipmentStatus::Stolen => "stolen",
            EquipmentStatus::Decommissioned => "decommissioned",
        }
    }

    /// Only pending and available equipment can be handed to a user.
    /// Anything else must first be brought back through a status override.
    pub fn is_assignable(&self) -> bool {
        matches!(self, EquipmentStatus::Pending | EquipmentStatus::Available)
    }
}

impl std::str::FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(EquipmentStatus::Pending),
            "available" => Ok(EquipmentStatus::Available),
            "assigned" => Ok(EquipmentStatus::Assigned),
            "maintenance" => Ok(EquipmentStatus::Maintenance),
            "broken" => Ok(EquipmentStatus::Broken),
            "lost" => Ok(EquipmentStatus::Lost),
            "stolen" => Ok(EquipmentStatus::Stolen),
            "decommissioned" => Ok(EquipmentStatus::Decommissioned),
            _ => Err(format!("Invalid equipment status: {}", s)),
        }
    }
}

impl_pg_slug!(EquipmentStatus);

// ---------------------------------------------------------------------------
// EquipmentCondition
// ---------------------------------------------------------------------------

/// Reported physical condition of a piece of equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCondition {
    Excellent,
    Good,
    Fair,
    Poor,
    Broken,
}

impl EquipmentCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentCondition::Excellent => "excellent",
            EquipmentCondition::Good => "good",
            EquipmentCondition::Fair => "fair",
            EquipmentCondition::Poor => "poor",
            EquipmentCondition::Broken => "broken",
        }
    }

    /// Status a returned item lands in, given its reported condition
    pub fn returned_status(&self) -> EquipmentStatus {
        match self {
            EquipmentCondition::Excellent
            | EquipmentCondition::Good
            | EquipmentCondition::Fair => EquipmentStatus::Available,
            EquipmentCondition::Poor => EquipmentStatus::Maintenance,
            EquipmentCondition::Broken => EquipmentStatus::Broken,
        }
    }
}

impl std::str::FromStr for EquipmentCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "excellent" => Ok(EquipmentCondition::Excellent),
            "good" => Ok(EquipmentCondition::Good),
            "fair" => Ok(EquipmentCondition::Fair),
            "poor" => Ok(EquipmentCondition::Poor),
            "broken" => Ok(EquipmentCondition::Broken),
            _ => Err(format!("Invalid equipment condition: {}", s)),
        }
    }
}

impl_pg_slug!(EquipmentCondition);

// ---------------------------------------------------------------------------
// HistoryAction
// ---------------------------------------------------------------------------

/// Action tag recorded in the equipment history ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    Assigned,
    Returned,
    StatusChanged,
}

impl HistoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryAction::Assigned => "assigned",
            HistoryAction::Returned => "returned",
            HistoryAction::StatusChanged => "status_changed",
        }
    }
}

impl std::str::FromStr for HistoryAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assigned" => Ok(HistoryAction::Assigned),
            "returned" => Ok(HistoryAction::Returned),
            "status_changed" => Ok(HistoryAction::StatusChanged),
            _ => Err(format!("Invalid history action: {}", s)),
        }
    }
}

impl_pg_slug!(HistoryAction);

// ---------------------------------------------------------------------------
// MaintenanceStatus
// ---------------------------------------------------------------------------

/// Maintenance record status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Scheduled => "scheduled",
            MaintenanceStatus::InProgress => "in_progress",
            MaintenanceStatus::Completed => "completed",
            MaintenanceStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for MaintenanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(MaintenanceStatus::Scheduled),
            "in_progress" => Ok(MaintenanceStatus::InProgress),
            "completed" => Ok(MaintenanceStatus::Completed),
            "cancelled" => Ok(MaintenanceStatus::Cancelled),
            _ => Err(format!("Invalid maintenance status: {}", s)),
        }
    }
}

impl_pg_slug!(MaintenanceStatus);

// ---------------------------------------------------------------------------
// BillingCycle
// ---------------------------------------------------------------------------

/// Subscription billing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "monthly",
            BillingCycle::Yearly => "yearly",
        }
    }
}

impl std::str::FromStr for BillingCycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(BillingCycle::Monthly),
            "yearly" => Ok(BillingCycle::Yearly),
            _ => Err(format!("Invalid billing cycle: {}", s)),
        }
    }
}

impl_pg_slug!(BillingCycle);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returned_status_maps_every_condition() {
        assert_eq!(
            EquipmentCondition::Excellent.returned_status(),
            EquipmentStatus::Available
        );
        assert_eq!(
            EquipmentCondition::Good.returned_status(),
            EquipmentStatus::Available
        );
        assert_eq!(
            EquipmentCondition::Fair.returned_status(),
            EquipmentStatus::Available
        );
        assert_eq!(
            EquipmentCondition::Poor.returned_status(),
            EquipmentStatus::Maintenance
        );
        assert_eq!(
            EquipmentCondition::Broken.returned_status(),
            EquipmentStatus::Broken
        );
    }

    #[test]
    fn role_capabilities() {
        assert!(UserRole::Admin.can_manage_equipment());
        assert!(UserRole::TeamLead.can_manage_equipment());
        assert!(!UserRole::User.can_manage_equipment());
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::TeamLead.is_admin());
    }

    #[test]
    fn only_pending_and_available_are_assignable() {
        assert!(EquipmentStatus::Pending.is_assignable());
        assert!(EquipmentStatus::Available.is_assignable());
        assert!(!EquipmentStatus::Assigned.is_assignable());
        assert!(!EquipmentStatus::Maintenance.is_assignable());
        assert!(!EquipmentStatus::Broken.is_assignable());
        assert!(!EquipmentStatus::Lost.is_assignable());
        assert!(!EquipmentStatus::Stolen.is_assignable());
        assert!(!EquipmentStatus::Decommissioned.is_assignable());
    }

    #[test]
    fn slug_round_trips() {
        for status in [
            EquipmentStatus::Pending,
            EquipmentStatus::Available,
            EquipmentStatus::Assigned,
            EquipmentStatus::Maintenance,
            EquipmentStatus::Broken,
            EquipmentStatus::Lost,
            EquipmentStatus::Stolen,
            EquipmentStatus::Decommissioned,
        ] {
            assert_eq!(status.as_str().parse::<EquipmentStatus>(), Ok(status));
        }
        assert!("retired".parse::<EquipmentStatus>().is_err());
        assert!("mint".parse::<EquipmentCondition>().is_err());
        assert!("owner".parse::<UserRole>().is_err());
    }
}
