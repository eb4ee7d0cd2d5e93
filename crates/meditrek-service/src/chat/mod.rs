//! Same-origin relay to a hosted chat-completions endpoint.

pub mod client;
pub mod message;
pub mod service;

pub use client::{HttpInferenceClient, InferenceClient};
pub use message::{ChatMessage, ChatRole, ChatTurn};
pub use service::{ChatReply, ChatService, FALLBACK_REPLY};
