//! Equipment repository: CRUD and the transactional lifecycle transitions

use sqlx::{FromRow, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{EquipmentCondition, EquipmentStatus, HistoryAction},
        equipment::{
            CreateEquipment, Equipment, EquipmentDetails, EquipmentQuery, UpdateEquipment,
        },
        user::UserShort,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT e.*, u.name as owner_name, u.email as owner_email
    FROM equipment e
    LEFT JOIN users u ON e.current_owner_id = u.id
"#;

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn map_details(row: &sqlx::postgres::PgRow) -> Result<EquipmentDetails, sqlx::Error> {
        let equipment = Equipment::from_row(row)?;
        let current_owner = match equipment.current_owner_id {
            Some(id) => Some(UserShort {
                id,
                name: row.try_get("owner_name")?,
                email: row.try_get("owner_email")?,
            }),
            None => None,
        };
        Ok(EquipmentDetails {
            equipment,
            current_owner,
        })
    }

    /// List equipment with optional filters, paginated
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<(Vec<EquipmentDetails>, i64)> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.status.is_some() {
            conditions.push(format!("e.status = ${}", idx));
            idx += 1;
        }
        if query.category.is_some() {
            conditions.push(format!("e.category = ${}", idx));
            idx += 1;
        }
        if query.search.is_some() {
            conditions.push(format!(
                "(e.name ILIKE ${} OR e.serial_number ILIKE ${} OR e.brand ILIKE ${})",
                idx, idx, idx
            ));
            idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(50).clamp(1, 500);

        let list_sql = format!(
            "{}{} ORDER BY e.updated_at DESC LIMIT ${} OFFSET ${}",
            DETAILS_SELECT,
            where_clause,
            idx,
            idx + 1
        );
        let count_sql = format!("SELECT COUNT(*) FROM equipment e{}", where_clause);

        let mut list_query = sqlx::query(&list_sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);

        if let Some(status) = query.status {
            list_query = list_query.bind(status);
            count_query = count_query.bind(status);
        }
        if let Some(ref category) = query.category {
            list_query = list_query.bind(category);
            count_query = count_query.bind(category);
        }
        if let Some(ref search) = query.search {
            let pattern = format!("%{}%", search);
            list_query = list_query.bind(pattern.clone());
            count_query = count_query.bind(pattern);
        }

        let rows = list_query
            .bind(per_page)
            .bind((page - 1) * per_page)
            .fetch_all(&self.pool)
            .await?;

        let total = count_query.fetch_one(&self.pool).await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            items.push(Self::map_details(row)?);
        }

        Ok((items, total))
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Get equipment by ID with the current owner resolved
    pub async fn get_details(&self, id: i32) -> AppResult<EquipmentDetails> {
        let sql = format!("{} WHERE e.id = $1", DETAILS_SELECT);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;
        Ok(Self::map_details(&row)?)
    }

    /// Fetch equipment rows for export, optionally restricted to an id list,
    /// newest update first. Includes the owner, the most recent maintenance
    /// record and comma-joined tag names per row.
    pub async fn list_for_export(
        &self,
        ids: Option<&[i32]>,
    ) -> AppResult<Vec<sqlx::postgres::PgRow>> {
        let base = r#"
            SELECT e.*, u.name as owner_name, u.email as owner_email,
                   m.date as last_maintenance_date, m.cost as last_maintenance_cost,
                   COALESCE((
                       SELECT STRING_AGG(t.name, ', ' ORDER BY t.name)
                       FROM equipment_tags et
                       JOIN tags t ON et.tag_id = t.id
                       WHERE et.equipment_id = e.id
                   ), '') as tag_names
            FROM equipment e
            LEFT JOIN users u ON e.current_owner_id = u.id
            LEFT JOIN LATERAL (
                SELECT date, cost FROM maintenance_records
                WHERE equipment_id = e.id
                ORDER BY date DESC
                LIMIT 1
            ) m ON TRUE
        "#;

        let rows = match ids {
            Some(ids) => {
                let sql = format!("{} WHERE e.id = ANY($1) ORDER BY e.updated_at DESC", base);
                sqlx::query(&sql).bind(ids).fetch_all(&self.pool).await?
            }
            None => {
                let sql = format!("{} ORDER BY e.updated_at DESC", base);
                sqlx::query(&sql).fetch_all(&self.pool).await?
            }
        };

        Ok(rows)
    }

    /// Create equipment (intake)
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let status = data.status.unwrap_or(EquipmentStatus::Available);

        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                serial_number, name, brand, model, category, status, condition,
                location, purchase_date, purchase_method, purchase_price,
                warranty_expiry, next_maintenance_date, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(&data.serial_number)
        .bind(&data.name)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(data.category.as_deref().unwrap_or("other"))
        .bind(status)
        .bind(data.condition)
        .bind(&data.location)
        .bind(data.purchase_date)
        .bind(&data.purchase_method)
        .bind(data.purchase_price)
        .bind(data.warranty_expiry)
        .bind(data.next_maintenance_date)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(format!(
                "Equipment with serial number {} already exists",
                data.serial_number
            )),
            other => AppError::from(other),
        })?;

        Ok(row)
    }

    /// Update descriptive equipment fields
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
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
        add_field!(data.brand, "brand");
        add_field!(data.model, "model");
        add_field!(data.category, "category");
        add_field!(data.location, "location");
        add_field!(data.purchase_date, "purchase_date");
        add_field!(data.purchase_method, "purchase_method");
        add_field!(data.purchase_price, "purchase_price");
        add_field!(data.warranty_expiry, "warranty_expiry");
        add_field!(data.next_maintenance_date, "next_maintenance_date");
        add_field!(data.notes, "notes");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.brand);
        bind_field!(data.model);
        bind_field!(data.category);
        bind_field!(data.location);
        bind_field!(data.purchase_date);
        bind_field!(data.purchase_method);
        bind_field!(data.purchase_price);
        bind_field!(data.warranty_expiry);
        bind_field!(data.next_maintenance_date);
        bind_field!(data.notes);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Return (unassign) equipment.
    ///
    /// The row is locked for the duration of the transaction so that a
    /// concurrent second return observes the committed state and fails the
    /// assigned-with-owner precondition.
    pub async fn unassign(
        &self,
        id: i32,
        condition: EquipmentCondition,
        notes: Option<&str>,
        acting_user_name: &str,
    ) -> AppResult<Equipment> {
        let mut tx = self.pool.begin().await?;

        let equipment =
            sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;

        let previous_owner = match (equipment.status, equipment.current_owner_id) {
            (EquipmentStatus::Assigned, Some(owner_id)) => owner_id,
            _ => {
                return Err(AppError::InvalidState(format!(
                    "Equipment {} is not currently assigned",
                    equipment.serial_number
                )))
            }
        };

        let new_status = condition.returned_status();

        let updated = sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET status = $1, condition = $2, current_owner_id = NULL, updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(new_status)
        .bind(condition)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let note = notes.map(str::to_string).unwrap_or_else(|| {
            format!(
                "Returned by {} in {} condition",
                acting_user_name, condition
            )
        });

        sqlx::query(
            r#"
            INSERT INTO equipment_history (equipment_id, from_user_id, action, condition, notes)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(previous_owner)
        .bind(HistoryAction::Returned)
        .bind(condition)
        .bind(&note)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Assign equipment to a user
    pub async fn assign(
        &self,
        id: i32,
        user_id: i32,
        notes: Option<&str>,
        acting_user_name: &str,
    ) -> AppResult<Equipment> {
        let mut tx = self.pool.begin().await?;

        let equipment =
            sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;

        if equipment.status == EquipmentStatus::Assigned {
            return Err(AppError::InvalidState(format!(
                "Equipment {} is already assigned",
                equipment.serial_number
            )));
        }
        if !equipment.status.is_assignable() {
            return Err(AppError::InvalidState(format!(
                "Equipment {} cannot be assigned while {}",
                equipment.serial_number, equipment.status
            )));
        }

        let recipient = sqlx::query_as::<_, UserShort>(
            "SELECT id, name, email FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let updated = sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET status = $1, current_owner_id = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(EquipmentStatus::Assigned)
        .bind(user_id)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let note = notes.map(str::to_string).unwrap_or_else(|| {
            format!("Assigned to {} by {}", recipient.name, acting_user_name)
        });

        sqlx::query(
            r#"
            INSERT INTO equipment_history (equipment_id, from_user_id, action, condition, notes)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(HistoryAction::Assigned)
        .bind(equipment.condition)
        .bind(&note)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Administrative status override (lost, stolen, decommissioned,
    /// maintenance, back to available). Same transactional shape as the
    /// assign/unassign transitions; clears the owner when leaving `assigned`.
    pub async fn override_status(
        &self,
        id: i32,
        status: EquipmentStatus,
        notes: Option<&str>,
        acting_user_name: &str,
    ) -> AppResult<Equipment> {
        let mut tx = self.pool.begin().await?;

        let equipment =
            sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;

        if equipment.status == status {
            return Err(AppError::InvalidState(format!(
                "Equipment {} is already {}",
                equipment.serial_number, status
            )));
        }

        let previous_owner = equipment.current_owner_id;

        let updated = sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET status = $1, current_owner_id = NULL, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let note = notes.map(str::to_string).unwrap_or_else(|| {
            format!(
                "Status changed from {} to {} by {}",
                equipment.status, status, acting_user_name
            )
        });

        sqlx::query(
            r#"
            INSERT INTO equipment_history (equipment_id, from_user_id, action, condition, notes)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(previous_owner)
        .bind(HistoryAction::StatusChanged)
        .bind(equipment.condition)
        .bind(&note)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }
}
