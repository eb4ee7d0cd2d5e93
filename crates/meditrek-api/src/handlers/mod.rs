//! HTTP request handlers, one module per resource.

pub mod alert;
pub mod auth;
pub mod chat;
pub mod diagnostic;
pub mod health;
pub mod user;
