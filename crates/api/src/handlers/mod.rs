//! Request handlers, one module per resource.

pub mod auth;
pub mod bookings;
pub mod reports;
pub mod rooms;
pub mod trainings;
pub mod users;
