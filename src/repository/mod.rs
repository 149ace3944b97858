//! Repository layer for database operations

pub mod equipment;
pub mod history;
pub mod maintenance;
pub mod subscriptions;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub users: users::UsersRepository,
    pub history: history::HistoryRepository,
    pub maintenance: maintenance::MaintenanceRepository,
    pub subscriptions: subscriptions::SubscriptionsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            history: history::HistoryRepository::new(pool.clone()),
            maintenance: maintenance::MaintenanceRepository::new(pool.clone()),
            subscriptions: subscriptions::SubscriptionsRepository::new(pool.clone()),
            pool,
        }
    }
}
