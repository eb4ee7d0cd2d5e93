//! User domain entities.

pub mod model;

pub use model::{CreateUser, UpdateProfile, User, UserProfile};
