//! # meditrek-auth
//!
//! Credential handling for MediTrek.
//!
//! ## Modules
//!
//! - `jwt` issues and validates the HS256 bearer tokens
//! - `password` hashes passwords with Argon2id and enforces the length policy

pub mod jwt;
pub mod password;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
