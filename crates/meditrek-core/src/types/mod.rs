//! Core type definitions used across the MediTrek workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse, Pagination};
