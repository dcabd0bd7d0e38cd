//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `profiles.role` in the
//! migrations.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TRAINER: &str = "trainer";
pub const ROLE_CLIENT: &str = "client";
