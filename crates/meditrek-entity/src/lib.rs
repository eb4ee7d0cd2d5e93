//! # meditrek-entity
//!
//! Domain entity models for MediTrek. Every struct in this crate represents
//! a database row or a domain value object. Row types derive `sqlx::FromRow`
//! and serialize in camelCase, which is the shape the REST API exposes.

pub mod alert;
pub mod diagnostic;
pub mod user;
