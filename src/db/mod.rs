use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::entities::{lockers, payments, reservations, users};

pub mod migrator;
pub mod repositories;
pub mod seed;

pub use repositories::locker::NewLocker;
pub use repositories::payment::NewPayment;
pub use repositories::reservation::NewReservation;
pub use repositories::user::{NewUser, UserChanges, UserWriteError};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// Drop every table and reapply the schema from scratch. Used at startup
    /// when `recreate_on_start` is set.
    pub async fn reset(&self) -> Result<()> {
        use sea_orm_migration::MigratorTrait;

        migrator::Migrator::fresh(&self.conn).await?;
        info!("Database reset: all tables dropped and recreated");
        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn locker_repo(&self) -> repositories::locker::LockerRepository {
        repositories::locker::LockerRepository::new(self.conn.clone())
    }

    fn reservation_repo(&self) -> repositories::reservation::ReservationRepository {
        repositories::reservation::ReservationRepository::new(self.conn.clone())
    }

    fn payment_repo(&self) -> repositories::payment::PaymentRepository {
        repositories::payment::PaymentRepository::new(self.conn.clone())
    }

    // ========== Users ==========

    pub async fn list_users(&self) -> Result<Vec<users::Model>> {
        self.user_repo().list().await
    }

    pub async fn list_users_by_role(&self, role: &str) -> Result<Vec<users::Model>> {
        self.user_repo().list_by_role(role).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<users::Model>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_role(&self, id: i32, role: &str) -> Result<Option<users::Model>> {
        self.user_repo().get_by_id_and_role(id, role).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn count_users(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<users::Model>> {
        self.user_repo().verify_credentials(username, password).await
    }

    pub async fn create_user(
        &self,
        input: NewUser,
        security: &SecurityConfig,
    ) -> Result<users::Model, UserWriteError> {
        self.user_repo().create(input, security).await
    }

    pub async fn update_user(
        &self,
        user: users::Model,
        changes: UserChanges,
        security: &SecurityConfig,
    ) -> Result<users::Model, UserWriteError> {
        self.user_repo().update(user, changes, security).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    pub async fn deactivate_user(&self, user: users::Model) -> Result<users::Model> {
        self.user_repo().deactivate(user).await
    }

    // ========== Lockers ==========

    pub async fn list_lockers(&self) -> Result<Vec<lockers::Model>> {
        self.locker_repo().list().await
    }

    pub async fn count_lockers(&self) -> Result<u64> {
        self.locker_repo().count().await
    }

    pub async fn count_lockers_by_status(&self, status: &str) -> Result<u64> {
        self.locker_repo().count_by_status(status).await
    }

    pub async fn lockers_empty(&self) -> Result<bool> {
        self.locker_repo().is_empty().await
    }

    pub async fn add_locker(&self, input: NewLocker) -> Result<lockers::Model> {
        self.locker_repo().insert(input).await
    }

    // ========== Reservations ==========

    pub async fn list_reservations(&self) -> Result<Vec<reservations::Model>> {
        self.reservation_repo().list().await
    }

    pub async fn reservations_empty(&self) -> Result<bool> {
        self.reservation_repo().is_empty().await
    }

    pub async fn add_reservation(&self, input: NewReservation) -> Result<reservations::Model> {
        self.reservation_repo().insert(input).await
    }

    // ========== Payments ==========

    pub async fn list_payments(&self) -> Result<Vec<payments::Model>> {
        self.payment_repo().list().await
    }

    pub async fn count_payments_by_status(&self, status: &str) -> Result<u64> {
        self.payment_repo().count_by_status(status).await
    }

    pub async fn payments_empty(&self) -> Result<bool> {
        self.payment_repo().is_empty().await
    }

    pub async fn add_payment(&self, input: NewPayment) -> Result<payments::Model> {
        self.payment_repo().insert(input).await
    }
}
