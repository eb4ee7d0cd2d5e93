//! Chat relay configuration.

use serde::{Deserialize, Serialize};

/// Settings for the inference endpoint behind `/api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Whether the relay forwards messages at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Base URL of the inference service; `/chat/completions` is appended.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Bearer credential for the inference service. Never sent to clients.
    #[serde(default)]
    pub api_key: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Nucleus sampling parameter.
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// System preamble prepended to every conversation.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Upstream request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Most recent history messages forwarded upstream.
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_endpoint(),
            api_key: String::new(),
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            system_prompt: default_system_prompt(),
            timeout_seconds: default_timeout(),
            max_history: default_max_history(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_endpoint() -> String {
    "https://models.github.ai/inference".to_string()
}

fn default_model() -> String {
    "openai/gpt-4.1".to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_top_p() -> f32 {
    1.0
}

fn default_system_prompt() -> String {
    "You are MediTrek's health assistant. Answer questions about diagnostic tests, \
     alerts and general wellbeing clearly and briefly. You are not a doctor: for \
     symptoms or results that may need treatment, advise the user to consult a \
     healthcare professional."
        .to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_history() -> usize {
    20
}
