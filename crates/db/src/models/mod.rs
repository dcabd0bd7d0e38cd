//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Where listings need joined data, a dedicated read model

pub mod booking;
pub mod profile;
pub mod room;
pub mod training;
