//! Database module - PostgreSQL connection pool using SQLx
//!
//! Provides the pool the PostgreSQL verification store runs on, plus the
//! bundled migrations under `infra/migrations`.

pub mod connection;


pub use connection::DatabasePool;
