use sea_orm::entity::prelude::*;

/// Role strings stored in `users.role`.
pub mod role {
    pub const ADMIN: &str = "admin";
    pub const USER: &str = "user";
    pub const CUSTOMER: &str = "customer";
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// One of `admin`, `user`, `customer`
    pub role: String,

    /// Soft-delete flag; customer deletion flips this instead of removing the row.
    pub active: bool,

    pub created_at: DateTimeUtc,
}

impl Model {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == role::ADMIN
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
