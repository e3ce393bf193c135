pub mod prelude;

pub mod lockers;
pub mod payments;
pub mod reservations;
pub mod users;
