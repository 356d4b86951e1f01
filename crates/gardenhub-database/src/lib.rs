//! # gardenhub-database
//!
//! PostgreSQL connection management, the [`Store`]/[`UnitOfWork`]
//! abstraction every service runs its writes through, and two
//! implementations of it: [`PgStore`] over sqlx transactions and
//! [`MemoryStore`] for tests and local experiments.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{Store, UnitOfWork};
