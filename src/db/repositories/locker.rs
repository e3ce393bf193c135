use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::lockers;

/// Input for inserting a locker (seeding only; lockers are read-only over HTTP).
#[derive(Debug, Clone)]
pub struct NewLocker {
    pub number: String,
    pub status: String,
    pub assigned_user_id: Option<i32>,
    pub assigned_user_name: Option<String>,
}

pub struct LockerRepository {
    conn: DatabaseConnection,
}

impl LockerRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<lockers::Model>> {
        lockers::Entity::find()
            .order_by_asc(lockers::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list lockers")
    }

    pub async fn count(&self) -> Result<u64> {
        lockers::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count lockers")
    }

    pub async fn count_by_status(&self, status: &str) -> Result<u64> {
        lockers::Entity::find()
            .filter(lockers::Column::Status.eq(status))
            .count(&self.conn)
            .await
            .context("Failed to count lockers by status")
    }

    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.count().await? == 0)
    }

    pub async fn insert(&self, input: NewLocker) -> Result<lockers::Model> {
        let model = lockers::ActiveModel {
            number: Set(input.number),
            status: Set(input.status),
            assigned_user_id: Set(input.assigned_user_id),
            assigned_user_name: Set(input.assigned_user_name),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        model
            .insert(&self.conn)
            .await
            .context("Failed to insert locker")
    }
}
