//! Chat relay: assembles the conversation and forwards it upstream.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use validator::ValidationErrors;

use meditrek_core::config::ChatConfig;
use meditrek_core::result::AppResult;

use super::client::InferenceClient;
use super::message::{ChatMessage, ChatRole, ChatTurn};
use crate::validation::{self, invalid, not_blank};

/// Reply sent whenever the upstream call cannot produce an answer.
pub const FALLBACK_REPLY: &str = "Something went wrong. Please try again later.";

/// The assistant's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub reply: String,
    /// `true` when `reply` is the canned apology.
    pub fallback: bool,
}

impl ChatReply {
    fn fallback() -> Self {
        Self {
            reply: FALLBACK_REPLY.to_string(),
            fallback: true,
        }
    }
}

/// Relays conversations to the inference endpoint.
#[derive(Debug, Clone)]
pub struct ChatService {
    /// `None` when the relay is disabled.
    client: Option<Arc<dyn InferenceClient>>,
    system_prompt: String,
    max_history: usize,
}

impl ChatService {
    /// Creates a relay. Pass `None` to answer every message with the fallback.
    pub fn new(config: &ChatConfig, client: Option<Arc<dyn InferenceClient>>) -> Self {
        Self {
            client,
            system_prompt: config.system_prompt.clone(),
            max_history: config.max_history,
        }
    }

    /// Builds `[system] + recent history + {user: message}`.
    pub fn build_conversation(
        &self,
        history: Vec<ChatTurn>,
        message: &str,
    ) -> AppResult<Vec<ChatMessage>> {
        let mut errors = ValidationErrors::new();
        let message = message.trim();
        if not_blank(message).is_err() {
            errors.add("message", invalid("required", "Message is required"));
        }

        let skip = history.len().saturating_sub(self.max_history);
        let mut recent = Vec::with_capacity(history.len() - skip);
        for turn in history.into_iter().skip(skip) {
            match ChatMessage::try_from(turn) {
                Ok(m) => recent.push(m),
                Err(e) => errors.add("messages", invalid("role", e.message)),
            }
        }
        validation::check(errors)?;

        let mut conversation = Vec::with_capacity(recent.len() + 2);
        conversation.push(ChatMessage::new(ChatRole::System, self.system_prompt.clone()));
        conversation.extend(recent);
        conversation.push(ChatMessage::new(ChatRole::User, message));
        Ok(conversation)
    }

    /// Forwards the conversation and returns the cleaned reply.
    ///
    /// Malformed input is an error. Upstream failures are not: they produce
    /// the fallback reply.
    pub async fn reply(&self, history: Vec<ChatTurn>, message: &str) -> AppResult<ChatReply> {
        let conversation = self.build_conversation(history, message)?;

        let Some(client) = &self.client else {
            warn!("Chat relay disabled, returning fallback");
            return Ok(ChatReply::fallback());
        };

        match client.complete(&conversation).await {
            Ok(raw) => {
                let reply = clean_reply(&raw);
                if reply.is_empty() {
                    warn!("Inference endpoint returned an empty reply");
                    return Ok(ChatReply::fallback());
                }
                info!(turns = conversation.len(), "Chat reply relayed");
                Ok(ChatReply {
                    reply,
                    fallback: false,
                })
            }
            Err(e) => {
                warn!(error = %e, "Chat relay failed");
                Ok(ChatReply::fallback())
            }
        }
    }
}

/// Turns literal `\n` sequences into newlines and trims.
pub fn clean_reply(raw: &str) -> String {
    raw.replace("\\n", "\n").trim().to_string()
}
