//! PostgreSQL repository implementations of the store traits.

pub mod alert;
pub mod diagnostic;
pub mod user;

pub use alert::AlertRepository;
pub use diagnostic::DiagnosticTestRepository;
pub use user::UserRepository;
