//! CLI operation mode handlers.
//!
//! - [`admin_tui`]: Full-screen review console
//! - [`plain_listing`]: Print the applications table once and exit

pub mod admin_tui;
pub mod plain_listing;
