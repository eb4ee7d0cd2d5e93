//! Alert inbox and expiry.

pub mod expiry;
pub mod service;

pub use expiry::AlertExpirySweeper;
pub use service::{AlertListQuery, AlertService, CreateAlertRequest};
