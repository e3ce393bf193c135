pub use super::lockers::Entity as Lockers;
pub use super::payments::Entity as Payments;
pub use super::reservations::Entity as Reservations;
pub use super::users::Entity as Users;
