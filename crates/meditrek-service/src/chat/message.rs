//! Conversation messages exchanged with the inference endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use meditrek_core::error::AppError;

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The preamble the server prepends. Never accepted from clients.
    System,
    /// The patient.
    User,
    /// The model.
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client-supplied roles. `model` is accepted as an alias of `assistant`.
impl FromStr for ChatRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "assistant" | "model" => Ok(Self::Assistant),
            other => Err(AppError::validation(format!(
                "Invalid role '{other}'. Expected one of: user, assistant"
            ))),
        }
    }
}

/// A message as sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A history entry as received from the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl TryFrom<ChatTurn> for ChatMessage {
    type Error = AppError;

    fn try_from(turn: ChatTurn) -> Result<Self, Self::Error> {
        Ok(ChatMessage::new(turn.role.parse()?, turn.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_is_assistant_alias() {
        assert_eq!("model".parse::<ChatRole>().unwrap(), ChatRole::Assistant);
        assert_eq!("user".parse::<ChatRole>().unwrap(), ChatRole::User);
    }

    #[test]
    fn test_system_role_not_accepted_from_clients() {
        assert!("system".parse::<ChatRole>().is_err());
        assert!("tool".parse::<ChatRole>().is_err());
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_value(ChatMessage::new(ChatRole::Assistant, "hi")).unwrap();
        assert_eq!(json["role"], "assistant");
    }
}
