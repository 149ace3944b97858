//! Statistics service
//!
//! Read-only aggregation queries for the workflow and billing dashboards.
//! Each sub-metric is computed in a single query round trip; sub-metrics are
//! not required to be mutually snapshot-consistent.

use rust_decimal::Decimal;
use sqlx::Row;

use crate::{
    api::stats::{
        AgeBucket, BillingStats, MonthlyTrendEntry, StatEntry, TopOwner, WorkflowStats,
    },
    error::AppResult,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Composite equipment workflow statistics
    pub async fn get_workflow_stats(&self) -> AppResult<WorkflowStats> {
        let pool = &self.repository.pool;

        // Totals, per-status counts and the pending-actions union in one pass
        let counts = sqlx::query(
            r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE status = 'available') as available,
                COUNT(*) FILTER (WHERE status = 'assigned') as assigned,
                COUNT(*) FILTER (WHERE status = 'maintenance') as maintenance,
                COUNT(*) FILTER (WHERE status = 'broken') as broken,
                COUNT(*) FILTER (
                    WHERE status IN ('maintenance', 'broken')
                       OR (status = 'assigned'
                           AND (next_maintenance_date < NOW() OR warranty_expiry < NOW()))
                ) as pending_actions
            FROM equipment
            "#,
        )
        .fetch_one(pool)
        .await?;

        let recent_activity = self.repository.history.count_recent(7).await?;

        let category_distribution = sqlx::query(
            r#"
            SELECT category as label, COUNT(*) as value
            FROM equipment
            GROUP BY category
            ORDER BY value DESC
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| StatEntry {
            label: row.get("label"),
            value: row.get("value"),
        })
        .collect();

        // Trailing 6 months bucketed by creation month
        let monthly_trend = sqlx::query(
            r#"
            SELECT
                TO_CHAR(DATE_TRUNC('month', created_at), 'YYYY-MM') as period,
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE status = 'available') as available,
                COUNT(*) FILTER (WHERE status = 'assigned') as assigned,
                COUNT(*) FILTER (WHERE status = 'maintenance') as maintenance,
                COUNT(*) FILTER (WHERE status = 'broken') as broken
            FROM equipment
            WHERE created_at >= DATE_TRUNC('month', NOW()) - INTERVAL '5 months'
            GROUP BY DATE_TRUNC('month', created_at)
            ORDER BY period
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| MonthlyTrendEntry {
            period: row.get("period"),
            total: row.get("total"),
            available: row.get("available"),
            assigned: row.get("assigned"),
            maintenance: row.get("maintenance"),
            broken: row.get("broken"),
        })
        .collect();

        let maintenance_by_status = sqlx::query(
            r#"
            SELECT status as label, COUNT(*) as value
            FROM maintenance_records
            GROUP BY status
            ORDER BY value DESC
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| StatEntry {
            label: row.get("label"),
            value: row.get("value"),
        })
        .collect();

        let age_distribution = sqlx::query(
            r#"
            SELECT CASE
                WHEN purchase_date >= NOW() - INTERVAL '1 year' THEN '0-1yr'
                WHEN purchase_date >= NOW() - INTERVAL '2 years' THEN '1-2yr'
                WHEN purchase_date >= NOW() - INTERVAL '3 years' THEN '2-3yr'
                ELSE '3+yr'
            END as bucket, COUNT(*) as value
            FROM equipment
            WHERE purchase_date IS NOT NULL
            GROUP BY bucket
            ORDER BY bucket
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| AgeBucket {
            bucket: row.get("bucket"),
            value: row.get("value"),
        })
        .collect();

        let top_owners = sqlx::query(
            r#"
            SELECT u.id as user_id, u.name, u.email, COUNT(*) as assigned_count
            FROM equipment e
            JOIN users u ON e.current_owner_id = u.id
            WHERE e.status = 'assigned'
            GROUP BY u.id, u.name, u.email
            ORDER BY assigned_count DESC, u.id ASC
            LIMIT 10
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| TopOwner {
            user_id: row.get("user_id"),
            name: row.get("name"),
            email: row.get("email"),
            assigned_count: row.get("assigned_count"),
        })
        .collect();

        Ok(WorkflowStats {
            total_equipment: counts.get("total"),
            available_equipment: counts.get("available"),
            assigned_equipment: counts.get("assigned"),
            maintenance_equipment: counts.get("maintenance"),
            broken_equipment: counts.get("broken"),
            pending_actions: counts.get("pending_actions"),
            recent_activity,
            category_distribution,
            monthly_trend,
            maintenance_by_status,
            age_distribution,
            top_owners,
        })
    }

    /// Billing dashboard: subscription and invoice aggregates
    pub async fn get_billing_stats(&self) -> AppResult<BillingStats> {
        let pool = &self.repository.pool;

        let subscription_counts = sqlx::query(
            r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE active) as active,
                COALESCE(SUM(
                    CASE billing_cycle WHEN 'monthly' THEN price ELSE price / 12 END
                ) FILTER (WHERE active AND price IS NOT NULL), 0) as monthly_spend
            FROM subscriptions
            "#,
        )
        .fetch_one(pool)
        .await?;

        let invoice_counts = sqlx::query(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE paid) as paid_count,
                COUNT(*) FILTER (WHERE NOT paid) as open_count,
                COALESCE(SUM(amount) FILTER (WHERE NOT paid), 0) as outstanding
            FROM invoices
            "#,
        )
        .fetch_one(pool)
        .await?;

        let by_vendor = sqlx::query(
            r#"
            SELECT COALESCE(vendor, 'unknown') as label, COUNT(*) as value
            FROM subscriptions
            WHERE active
            GROUP BY vendor
            ORDER BY value DESC
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| StatEntry {
            label: row.get("label"),
            value: row.get("value"),
        })
        .collect();

        Ok(BillingStats {
            total_subscriptions: subscription_counts.get("total"),
            active_subscriptions: subscription_counts.get("active"),
            monthly_spend: subscription_counts.get::<Decimal, _>("monthly_spend"),
            paid_invoices: invoice_counts.get("paid_count"),
            open_invoices: invoice_counts.get("open_count"),
            outstanding_amount: invoice_counts.get::<Decimal, _>("outstanding"),
            subscriptions_by_vendor: by_vendor,
        })
    }
}
