//! Business logic services

pub mod auth;
pub mod equipment;
pub mod export;
pub mod stats;
pub mod subscriptions;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub equipment: equipment::EquipmentService,
    pub stats: stats::StatsService,
    pub export: export::ExportService,
    pub users: users::UsersService,
    pub subscriptions: subscriptions::SubscriptionsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            equipment: equipment::EquipmentService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            export: export::ExportService::new(repository.clone()),
            users: users::UsersService::new(repository.clone()),
            subscriptions: subscriptions::SubscriptionsService::new(repository),
        }
    }
}
