//! Shared helpers for unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::inference::{ChatRequest, ChatTransport, StreamChunk, TransportError};

/// A transport that answers instantly with canned content.
pub struct StubTransport;

#[async_trait]
impl ChatTransport for StubTransport {
    fn name(&self) -> &str {
        "stub"
    }

    async fn stream_chat(
        &self,
        _request: ChatRequest<'_>,
        sender: Sender<StreamChunk>,
    ) -> Result<(), TransportError> {
        let _ = sender.send(StreamChunk::Content("stub reply".to_string())).await;
        let _ = sender.send(StreamChunk::Completed).await;
        Ok(())
    }

    async fn generate_ui(&self, _request: ChatRequest<'_>) -> Result<String, TransportError> {
        Ok(serde_json::json!({"role": "assistant", "content": "stub"}).to_string())
    }
}

pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        chat_model: "test-chat-model".to_string(),
        ui_model: "test-ui-model".to_string(),
        persona: "You are a test persona.".to_string(),
        mistral_api_key: Some("test-key".to_string()),
        mistral_base_url: "http://localhost:0".to_string(),
    }
}

pub fn test_app() -> App {
    App::new(Arc::new(StubTransport), &test_config())
}
