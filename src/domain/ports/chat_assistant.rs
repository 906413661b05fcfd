//! Driving port for the dashboard chat assistant.

use async_trait::async_trait;

use crate::domain::Error;

/// One prior turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    /// Speaker label, e.g. `user` or `assistant`.
    pub role: String,
    pub content: String,
}

/// An assistant request assembled by the inbound adapter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<ChatTurn>,
    /// Dashboard data the user is currently looking at, passed through as
    /// JSON for the model to cite.
    pub data_context: Option<serde_json::Value>,
}

/// A district the user appears to be asking about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub district_code: String,
    pub district_name: String,
    pub state_code: String,
}

/// The assistant's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub message: String,
    /// Set when the message names a known district.
    pub navigate_to: Option<NavigationTarget>,
}

/// Port answering dashboard questions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatAssistant: Send + Sync {
    /// Produce a reply for one user message.
    async fn respond(&self, request: &ChatRequest) -> Result<ChatReply, Error>;
}
