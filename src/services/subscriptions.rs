//! Subscription and invoice service

use validator::Validate;

use crate::{
    error::AppResult,
    models::subscription::{CreateSubscription, Invoice, Subscription, UpdateSubscription},
    repository::Repository,
};

#[derive(Clone)]
pub struct SubscriptionsService {
    repository: Repository,
}

impl SubscriptionsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List subscriptions
    pub async fn list(&self) -> AppResult<Vec<Subscription>> {
        self.repository.subscriptions.list().await
    }

    /// Get subscription by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Subscription> {
        self.repository.subscriptions.get_by_id(id).await
    }

    /// Create a subscription, verifying the assignee exists when set
    pub async fn create(&self, data: &CreateSubscription) -> AppResult<Subscription> {
        data.validate()?;
        if let Some(user_id) = data.assigned_user_id {
            self.repository.users.get_by_id(user_id).await?;
        }
        self.repository.subscriptions.create(data).await
    }

    /// Update a subscription
    pub async fn update(&self, id: i32, data: &UpdateSubscription) -> AppResult<Subscription> {
        if let Some(user_id) = data.assigned_user_id {
            self.repository.users.get_by_id(user_id).await?;
        }
        self.repository.subscriptions.update(id, data).await
    }

    /// List invoices
    pub async fn list_invoices(&self) -> AppResult<Vec<Invoice>> {
        self.repository.subscriptions.list_invoices().await
    }
}
