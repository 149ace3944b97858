//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::UserRole,
        user::{User, UserQuery, UserShort},
    },
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Get user by email (for login)
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// List users with optional name/email search, paginated
    pub async fn list(&self, query: &UserQuery) -> AppResult<(Vec<User>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(50).clamp(1, 500);

        let (users, total) = match query.search {
            Some(ref search) => {
                let pattern = format!("%{}%", search);
                let users = sqlx::query_as::<_, User>(
                    r#"
                    SELECT * FROM users
                    WHERE name ILIKE $1 OR email ILIKE $1
                    ORDER BY name
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(&pattern)
                .bind(per_page)
                .bind((page - 1) * per_page)
                .fetch_all(&self.pool)
                .await?;

                let total: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM users WHERE name ILIKE $1 OR email ILIKE $1",
                )
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await?;

                (users, total)
            }
            None => {
                let users = sqlx::query_as::<_, User>(
                    "SELECT * FROM users ORDER BY name LIMIT $1 OFFSET $2",
                )
                .bind(per_page)
                .bind((page - 1) * per_page)
                .fetch_all(&self.pool)
                .await?;

                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                    .fetch_one(&self.pool)
                    .await?;

                (users, total)
            }
        };

        Ok((users, total))
    }

    /// Create a user; the password arrives already hashed
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: Option<&str>,
        role: UserRole,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("User with email {} already exists", email))
            }
            other => AppError::from(other),
        })
    }

    /// Change a user's role
    pub async fn update_role(&self, id: i32, role: UserRole) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET role = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(role)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Short form for embedding in equipment responses
    pub async fn get_short(&self, id: i32) -> AppResult<UserShort> {
        sqlx::query_as::<_, UserShort>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}
