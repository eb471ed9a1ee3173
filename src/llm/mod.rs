//! Reasoner client module.
//!
//! Provides a trait-based abstraction over the remote language model, with
//! the nilAI chat-completions endpoint as the primary implementation.
//!
//! The model has no native function-calling support: every request is a
//! plain ordered list of role-tagged messages, and every response is a
//! single text completion. Structure is negotiated in prompt text by the
//! dispatch pipeline, not on the wire.

mod error;
mod nilai;

pub use error::{ReasonerError, ReasonerErrorKind};
pub use nilai::NilaiClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role in a chat conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in a chat conversation. Order is significant: system first,
/// then user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        ChatMessage {
            role,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

/// Trait for reasoner clients.
///
/// One outbound network call per invocation; no retries, no caching.
/// Sampling parameters are fixed by the implementation so all pipeline
/// stages see identical decoding behavior.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a completion request and return the single text completion.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ReasonerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = ChatMessage::system("hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "hello");
    }

    #[test]
    fn test_message_order_is_preserved() {
        let messages = vec![ChatMessage::system("a"), ChatMessage::user("b")];
        let json = serde_json::to_value(&messages).unwrap();
        assert_eq!(json[0]["role"], "system");
        assert_eq!(json[1]["role"], "user");
    }
}
