use sea_orm::entity::prelude::*;

/// Locker status strings stored in `lockers.status`.
pub mod status {
    pub const AVAILABLE: &str = "available";
    pub const OCCUPIED: &str = "occupied";
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lockers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub number: String,

    /// `available` or `occupied`. Maintained independently of reservations.
    pub status: String,

    pub assigned_user_id: Option<i32>,

    /// Denormalized display name of the assigned user.
    pub assigned_user_name: Option<String>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AssignedUserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
