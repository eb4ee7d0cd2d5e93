//! End-to-end tests over the full router backed by the in-memory store.

mod helpers;

mod alerts_test;
mod auth_test;
mod chat_test;
mod diagnostics_test;
mod health_test;
