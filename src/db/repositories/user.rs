use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use thiserror::Error;
use tokio::task;

use crate::config::SecurityConfig;
use crate::entities::users;

/// Write failures that callers need to tell apart from plain database errors.
///
/// Uniqueness is enforced by the UNIQUE constraints on `users.username` and
/// `users.email`; a violation surfaces here instead of being pre-checked, so
/// concurrent creates cannot race past the check.
#[derive(Debug, Error)]
pub enum UserWriteError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Database error: {0}")]
    Database(sea_orm::DbErr),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Classify a write error: constraint violations become duplicate errors.
fn classify(err: sea_orm::DbErr) -> UserWriteError {
    let msg = err.to_string();
    if msg.contains("UNIQUE constraint failed") {
        if msg.contains("users.username") {
            return UserWriteError::DuplicateUsername;
        }
        if msg.contains("users.email") {
            return UserWriteError::DuplicateEmail;
        }
    }
    UserWriteError::Database(err)
}

/// Input for creating a user; `password` is plaintext and hashed on insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
}

impl UserChanges {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.role.is_none()
            && self.active.is_none()
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<users::Model>> {
        users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")
    }

    pub async fn list_by_role(&self, role: &str) -> Result<Vec<users::Model>> {
        users::Entity::find()
            .filter(users::Column::Role.eq(role))
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users by role")
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<users::Model>> {
        users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")
    }

    pub async fn get_by_id_and_role(&self, id: i32, role: &str) -> Result<Option<users::Model>> {
        users::Entity::find_by_id(id)
            .filter(users::Column::Role.eq(role))
            .one(&self.conn)
            .await
            .context("Failed to query user by ID and role")
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")
    }

    pub async fn count(&self) -> Result<u64> {
        users::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count users")
    }

    /// Verify a username/password pair and return the user on success.
    ///
    /// An unknown username and a wrong password are indistinguishable to the
    /// caller; both come back as `Ok(None)`.
    ///
    /// Note: this uses `spawn_blocking` because Argon2 verification is
    /// CPU-intensive and would block the async runtime if run directly.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<users::Model>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        let Some(user) = user else {
            return Ok(None);
        };

        let password_hash = user.password_hash.clone();
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            let argon2 = Argon2::default();
            Ok::<bool, anyhow::Error>(
                argon2
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid.then_some(user))
    }

    /// Insert a new user. A UNIQUE violation on username or email comes back
    /// as the matching duplicate error.
    pub async fn create(
        &self,
        input: NewUser,
        security: &SecurityConfig,
    ) -> Result<users::Model, UserWriteError> {
        let password = input.password;
        let security = security.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, &security))
            .await
            .map_err(|e| anyhow::anyhow!("Password hashing task panicked: {e}"))??;

        let model = users::ActiveModel {
            username: Set(input.username),
            email: Set(input.email),
            password_hash: Set(password_hash),
            role: Set(input.role),
            active: Set(true),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        model.insert(&self.conn).await.map_err(classify)
    }

    /// Apply a partial update. Absent fields stay untouched; a password change
    /// re-hashes; username/email duplicates surface via the UNIQUE constraints.
    pub async fn update(
        &self,
        user: users::Model,
        changes: UserChanges,
        security: &SecurityConfig,
    ) -> Result<users::Model, UserWriteError> {
        if changes.is_empty() {
            return Ok(user);
        }

        let mut active: users::ActiveModel = user.into();

        if let Some(username) = changes.username {
            active.username = Set(username);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(role) = changes.role {
            active.role = Set(role);
        }
        if let Some(flag) = changes.active {
            active.active = Set(flag);
        }
        if let Some(password) = changes.password {
            let security = security.clone();
            let password_hash = task::spawn_blocking(move || hash_password(&password, &security))
                .await
                .map_err(|e| anyhow::anyhow!("Password hashing task panicked: {e}"))??;
            active.password_hash = Set(password_hash);
        }

        active.update(&self.conn).await.map_err(classify)
    }

    /// Hard delete. Returns false when the id does not exist.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let res = users::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete user")?;

        Ok(res.rows_affected > 0)
    }

    /// Soft delete: flip the active flag, keep the row.
    pub async fn deactivate(&self, user: users::Model) -> Result<users::Model> {
        let mut active: users::ActiveModel = user.into();
        active.active = Set(false);

        active
            .update(&self.conn)
            .await
            .context("Failed to deactivate user")
    }
}

/// Hash a password using Argon2id with the configured cost parameters.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None, // output length (use default)
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}
