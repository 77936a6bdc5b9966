//! User persistence for the tsumi service.
//!
//! Handlers only need three queries (by email, by id, insert), so they talk to
//! the [`store::UserStore`] trait. [`db::connection::DbConnection`] backs it
//! with PostgreSQL through Diesel; [`memory::MemoryUserStore`] keeps rows in
//! process for tests and local runs.
//!
//! # Usage
//!
//! ```rust,no_run
//! use tsumi_models::{db::{config::DbConfig, connection::DbConnection}, store::UserStore};
//!
//! let config = DbConfig::from_env().unwrap();
//! let conn = DbConnection::new(&config).unwrap().setup().unwrap();
//!
//! let user = conn.fetch_by_email("a@b.com").unwrap();
//! println!("Found {:?}", user);
//! ```

pub mod db;
pub mod error;
pub mod memory;
pub mod prelude;
pub mod store;
pub mod user;
mod schema;
