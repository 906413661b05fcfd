//! Driven port for the external generative-text API.

use async_trait::async_trait;

/// Errors surfaced while requesting a completion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatCompletionError {
    /// Network transport failed before receiving a response.
    #[error("chat completion transport failed: {message}")]
    Transport { message: String },
    /// The provider rejected the request (bad key, quota, safety block).
    #[error("chat completion rejected: {message}")]
    Rejected { message: String },
    /// The response body could not be decoded.
    #[error("chat completion decode failed: {message}")]
    Decode { message: String },
}

impl ChatCompletionError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port generating one text completion for an assembled prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Generate a completion for the full prompt text.
    async fn generate(&self, prompt: &str) -> Result<String, ChatCompletionError>;
}
