//! Spreadsheet export for the admin report endpoints.

pub mod xlsx;
