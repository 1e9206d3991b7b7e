//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Database: SQLite contact store
//! - Adapters: Front-ends driving the store (console window)

pub mod adapters;
pub mod config;
pub mod database;
