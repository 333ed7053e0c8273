use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, info};

use super::extract::{extract, ExtractedReply};
use super::prompts::{COACH_SYSTEM_PROMPT, FOOD_AGENT_SYSTEM_PROMPT};
use crate::config::LlmConfig;
use crate::llm::{ChatCompletion, ChatMessage, CompletionRequest, OpenAiClient, ResponseFormat};

pub const MISSING_KEY_CHAT_REPLY: &str = "Error: OpenAI API Key not configured on backend.";
pub const CHAT_UNAVAILABLE_REPLY: &str =
    "Sorry, I'm having trouble connecting to my brain right now. Please try again.";
const TEMPERATURE: f64 = 0.7;

pub fn offline_advice() -> Value {
    json!({
        "todayStatus": "Coach Mode: Offline (No API Key)",
        "adjustments": [{
            "title": "Setup Required",
            "why": "API Key missing",
            "do": "Add OPENAI_API_KEY to .env"
        }]
    })
}

pub fn advice_unavailable() -> Value {
    json!({ "error": "Coach is sleeping. Try again later." })
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("history must not be empty")]
    EmptyHistory,
}

/// Coaching and meal-chat backend. Upstream problems become well-formed
/// replies; only a request the model cannot answer at all is an error.
#[async_trait]
pub trait Advisor: Send + Sync {
    async fn daily_advice(&self, context: &Value) -> Value;
    async fn food_chat(&self, history: &[ChatMessage]) -> Result<ExtractedReply, ChatError>;
}

/// Used when no LLM credential is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineAdvisor;

#[async_trait]
impl Advisor for OfflineAdvisor {
    async fn daily_advice(&self, _context: &Value) -> Value {
        offline_advice()
    }

    async fn food_chat(&self, _history: &[ChatMessage]) -> Result<ExtractedReply, ChatError> {
        Ok(ExtractedReply::text(MISSING_KEY_CHAT_REPLY))
    }
}

pub struct LlmAdvisor {
    model: Arc<dyn ChatCompletion>,
    coach_model: String,
    chat_model: String,
}

impl LlmAdvisor {
    pub fn new(model: Arc<dyn ChatCompletion>, coach_model: &str, chat_model: &str) -> Self {
        Self {
            model,
            coach_model: coach_model.to_string(),
            chat_model: chat_model.to_string(),
        }
    }
}

#[async_trait]
impl Advisor for LlmAdvisor {
    async fn daily_advice(&self, context: &Value) -> Value {
        let request = CompletionRequest {
            model: self.coach_model.clone(),
            messages: vec![
                ChatMessage::system(COACH_SYSTEM_PROMPT),
                ChatMessage::user(format!("Here is my data for today: {context}")),
            ],
            temperature: TEMPERATURE,
            response_format: ResponseFormat::JsonObject,
        };

        let reply = match self.model.complete(&request).await {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, "coach request failed");
                return advice_unavailable();
            }
        };
        match serde_json::from_str::<Value>(&reply) {
            Ok(advice) => advice,
            Err(e) => {
                error!(error = %e, "coach reply is not json");
                advice_unavailable()
            }
        }
    }

    async fn food_chat(&self, history: &[ChatMessage]) -> Result<ExtractedReply, ChatError> {
        if history.is_empty() {
            return Err(ChatError::EmptyHistory);
        }

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(FOOD_AGENT_SYSTEM_PROMPT));
        messages.extend_from_slice(history);

        let request = CompletionRequest {
            model: self.chat_model.clone(),
            messages,
            temperature: TEMPERATURE,
            response_format: ResponseFormat::Text,
        };

        let reply = match self.model.complete(&request).await {
            Ok(reply) => extract(&reply),
            Err(e) => {
                error!(error = %e, "food chat request failed");
                ExtractedReply::text(CHAT_UNAVAILABLE_REPLY)
            }
        };
        Ok(reply)
    }
}

/// Picks the advisor once at startup from the presence of an API key.
pub fn from_config(cfg: &LlmConfig, http: reqwest::Client) -> Arc<dyn Advisor> {
    match &cfg.api_key {
        Some(key) => {
            info!(coach_model = %cfg.coach_model, chat_model = %cfg.chat_model, "llm advisor enabled");
            let client = Arc::new(OpenAiClient::new(http, &cfg.base_url, key));
            Arc::new(LlmAdvisor::new(client, &cfg.coach_model, &cfg.chat_model))
        }
        None => {
            info!("OPENAI_API_KEY not set; coach runs offline");
            Arc::new(OfflineAdvisor)
        }
    }
}
