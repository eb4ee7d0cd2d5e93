//! Alert domain entities.

pub mod kind;
pub mod model;
pub mod priority;

pub use kind::AlertType;
pub use model::{Alert, NewAlert};
pub use priority::AlertPriority;
