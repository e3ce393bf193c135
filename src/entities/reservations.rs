use sea_orm::entity::prelude::*;

/// Reservation status strings stored in `reservations.status`.
pub mod status {
    pub const PENDING: &str = "pending";
    pub const ACTIVE: &str = "active";
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: Option<i32>,

    pub locker_id: Option<i32>,

    pub start_time: DateTimeUtc,

    pub end_time: DateTimeUtc,

    /// `pending` or `active`
    pub status: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Users,

    #[sea_orm(
        belongs_to = "super::lockers::Entity",
        from = "Column::LockerId",
        to = "super::lockers::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Lockers,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::lockers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lockers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
