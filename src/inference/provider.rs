use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

use super::types::{Context, StreamChunk};

/// Errors that can occur during transport operations.
/// Variants carry enough info to determine retryability (future use).
#[derive(Debug)]
pub enum TransportError {
    /// Transport misconfigured (missing API key, bad URL). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// API returned an error response. Retryable if status >= 500 or 429.
    Api { status: u16, message: String },
    /// Failed to parse the API's response. Not retryable.
    Parse(String),
    /// The mpsc channel was closed (UI dropped the receiver). Not retryable.
    ChannelClosed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Config(msg) => write!(f, "config error: {msg}"),
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
            TransportError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            TransportError::Parse(msg) => write!(f, "parse error: {msg}"),
            TransportError::ChannelClosed => write!(f, "channel closed"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Everything the transport needs to fulfill one request.
pub struct ChatRequest<'a> {
    pub context: &'a Context,
    pub model: &'a str,
}

/// The external language-model collaborator.
///
/// Two operations mirror the two upstream endpoints: a streaming chat with
/// the Astro persona injected ahead of the history, and a one-shot
/// generative-UI completion returning the raw `{"role","content"}` envelope
/// text whose `content` is expected (but not guaranteed) to be a JSON
/// directive.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Returns the name of the transport.
    fn name(&self) -> &str;

    /// Streams a persona-guided chat completion, sending chunks to the
    /// provided channel. The full context history is forwarded.
    async fn stream_chat(
        &self,
        request: ChatRequest<'_>,
        sender: Sender<StreamChunk>,
    ) -> Result<(), TransportError>;

    /// Requests a UI directive for the latest user message and returns the
    /// assistant envelope as raw JSON text.
    async fn generate_ui(&self, request: ChatRequest<'_>) -> Result<String, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubTransport;

    #[test]
    fn test_trait_object_round_trip() {
        // The trait stays object-safe and usable behind Arc<dyn _>.
        let transport: &dyn ChatTransport = &StubTransport;
        assert_eq!(transport.name(), "stub");

        let mut context = Context::new();
        context.add_user_message("hi".to_string());
        let raw = tokio_test::block_on(transport.generate_ui(ChatRequest {
            context: &context,
            model: "test-model",
        }))
        .unwrap();
        let envelope: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(envelope["role"], "assistant");
    }

    #[test]
    fn test_error_display() {
        let err = TransportError::Api {
            status: 429,
            message: "slow down".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 429): slow down");
        assert_eq!(
            TransportError::Config("no key".to_string()).to_string(),
            "config error: no key"
        );
        assert_eq!(TransportError::ChannelClosed.to_string(), "channel closed");
    }
}
