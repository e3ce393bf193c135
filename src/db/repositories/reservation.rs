use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};

use crate::entities::reservations;

/// Input for inserting a reservation (seeding only; reservations are
/// read-only over HTTP).
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: Option<i32>,
    pub locker_id: Option<i32>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
}

pub struct ReservationRepository {
    conn: DatabaseConnection,
}

impl ReservationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<reservations::Model>> {
        reservations::Entity::find()
            .order_by_asc(reservations::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list reservations")
    }

    pub async fn is_empty(&self) -> Result<bool> {
        let count = reservations::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count reservations")?;
        Ok(count == 0)
    }

    pub async fn insert(&self, input: NewReservation) -> Result<reservations::Model> {
        let model = reservations::ActiveModel {
            user_id: Set(input.user_id),
            locker_id: Set(input.locker_id),
            start_time: Set(input.start_time),
            end_time: Set(input.end_time),
            status: Set(input.status),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        model
            .insert(&self.conn)
            .await
            .context("Failed to insert reservation")
    }
}
