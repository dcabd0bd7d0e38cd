//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated caller from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireStaff`] -- Requires `trainer` or `admin` role.
//! - [`rbac::RequireClient`] -- Requires the `client` role.

pub mod auth;
pub mod rbac;
