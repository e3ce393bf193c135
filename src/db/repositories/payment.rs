use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::payments;

/// Input for inserting a payment (seeding only; payments are read-only over HTTP).
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub user_id: Option<i32>,
    pub amount: f64,
    pub status: String,
}

pub struct PaymentRepository {
    conn: DatabaseConnection,
}

impl PaymentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<payments::Model>> {
        payments::Entity::find()
            .order_by_asc(payments::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list payments")
    }

    pub async fn count_by_status(&self, status: &str) -> Result<u64> {
        payments::Entity::find()
            .filter(payments::Column::Status.eq(status))
            .count(&self.conn)
            .await
            .context("Failed to count payments by status")
    }

    pub async fn is_empty(&self) -> Result<bool> {
        let count = payments::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count payments")?;
        Ok(count == 0)
    }

    pub async fn insert(&self, input: NewPayment) -> Result<payments::Model> {
        let model = payments::ActiveModel {
            user_id: Set(input.user_id),
            amount: Set(input.amount),
            status: Set(input.status),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        model
            .insert(&self.conn)
            .await
            .context("Failed to insert payment")
    }
}
