//! Data layer module
//!
//! Handles all data persistence:
//! - SQLite database operations
//! - Row/wire models for accounts and messages

mod database;
mod models;

pub use database::Database;
pub use models::*;
