//! Domain core for the gym booking platform.
//!
//! Pure logic with zero internal dependencies: schedule arithmetic and
//! collision detection, occupancy aggregation, role constants, and the
//! shared error taxonomy. Persistence and HTTP live in `gymbook-db` and
//! `gymbook-api`.

pub mod error;
pub mod occupancy;
pub mod roles;
pub mod schedule;
pub mod types;
