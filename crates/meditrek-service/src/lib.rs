//! # meditrek-service
//!
//! Business logic service layer for MediTrek. Each service orchestrates the
//! store traits and the auth primitives to implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references.

pub mod account;
pub mod alert;
pub mod chat;
pub mod context;
pub mod diagnostic;
pub mod validation;

pub use account::{AccountService, AuthSession, Dashboard, DashboardStats, UpdateProfileRequest};
pub use alert::{AlertExpirySweeper, AlertListQuery, AlertService, CreateAlertRequest};
pub use chat::{
    ChatMessage, ChatReply, ChatRole, ChatService, ChatTurn, HttpInferenceClient, InferenceClient,
};
pub use context::RequestContext;
pub use diagnostic::{CreateTestRequest, DiagnosticListQuery, DiagnosticService, UpdateTestRequest};
