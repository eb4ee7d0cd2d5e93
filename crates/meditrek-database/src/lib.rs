//! # meditrek-database
//!
//! Store traits for the three MediTrek collections, their PostgreSQL
//! repositories, process-local in-memory implementations, and the
//! [`Datastore`] that selects between them from configuration.

pub mod connection;
pub mod datastore;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use datastore::Datastore;
pub use store::{AlertFilter, AlertStore, DiagnosticFilter, DiagnosticTestStore, StatusCounts, UserStore};
