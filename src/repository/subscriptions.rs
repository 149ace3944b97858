//! Subscriptions and invoices repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::BillingCycle,
        subscription::{CreateSubscription, Invoice, Subscription, UpdateSubscription},
    },
};

#[derive(Clone)]
pub struct SubscriptionsRepository {
    pool: Pool<Postgres>,
}

impl SubscriptionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List subscriptions, active first, then by renewal date
    pub async fn list(&self) -> AppResult<Vec<Subscription>> {
        let subscriptions = sqlx::query_as::<_, Subscription>(
            "SELECT * FROM subscriptions ORDER BY active DESC, renewal_date ASC NULLS LAST",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(subscriptions)
    }

    /// Get subscription by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Subscription> {
        sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Subscription {} not found", id)))
    }

    /// Create a subscription
    pub async fn create(&self, data: &CreateSubscription) -> AppResult<Subscription> {
        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            INSERT INTO subscriptions (name, vendor, price, billing_cycle, renewal_date, assigned_user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.vendor)
        .bind(data.price)
        .bind(data.billing_cycle.unwrap_or(BillingCycle::Monthly))
        .bind(data.renewal_date)
        .bind(data.assigned_user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(subscription)
    }

    /// Update a subscription
    pub async fn update(&self, id: i32, data: &UpdateSubscription) -> AppResult<Subscription> {
        let mut sets = vec!["updated_at = NOW()".to_string()];
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.vendor, "vendor");
        add_field!(data.price, "price");
        add_field!(data.billing_cycle, "billing_cycle");
        add_field!(data.renewal_date, "renewal_date");
        add_field!(data.active, "active");
        add_field!(data.assigned_user_id, "assigned_user_id");

        let query = format!(
            "UPDATE subscriptions SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Subscription>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.vendor);
        bind_field!(data.price);
        bind_field!(data.billing_cycle);
        bind_field!(data.renewal_date);
        bind_field!(data.active);
        bind_field!(data.assigned_user_id);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Subscription {} not found", id)))
    }

    /// List invoices, newest first
    pub async fn list_invoices(&self) -> AppResult<Vec<Invoice>> {
        let invoices =
            sqlx::query_as::<_, Invoice>("SELECT * FROM invoices ORDER BY issued_date DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(invoices)
    }
}
