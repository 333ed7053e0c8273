use serde::Deserialize;

use crate::llm::ChatMessage;

/// Body of `POST /chat/food`: `{"history": [...]}` or a bare message array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ChatRequest {
    Wrapped { history: Vec<ChatMessage> },
    Bare(Vec<ChatMessage>),
}

impl ChatRequest {
    pub fn into_history(self) -> Vec<ChatMessage> {
        match self {
            ChatRequest::Wrapped { history } | ChatRequest::Bare(history) => history,
        }
    }
}
