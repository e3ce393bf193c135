pub mod locker;
pub mod payment;
pub mod reservation;
pub mod user;
