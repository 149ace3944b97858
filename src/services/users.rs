//! User management service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        enums::UserRole,
        user::{CreateUser, User, UserQuery},
    },
    repository::Repository,
};

use super::auth::AuthService;

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List users
    pub async fn list(&self, query: &UserQuery) -> AppResult<(Vec<User>, i64)> {
        self.repository.users.list(query).await
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Create a user, hashing the password if one was supplied
    pub async fn create(&self, auth: &AuthService, data: &CreateUser) -> AppResult<User> {
        data.validate()?;

        let password_hash = match data.password.as_deref() {
            Some(password) => Some(auth.hash_password(password)?),
            None => None,
        };

        self.repository
            .users
            .create(
                &data.name,
                &data.email,
                password_hash.as_deref(),
                data.role.unwrap_or(UserRole::User),
            )
            .await
    }

    /// Change a user's role
    pub async fn update_role(&self, id: i32, role: UserRole) -> AppResult<User> {
        self.repository.users.update_role(id, role).await
    }
}
