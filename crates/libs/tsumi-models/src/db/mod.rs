//! PostgreSQL connection setup.

pub mod config;
pub mod connection;
