//! Mistral provider implementation using the chat-completions API.
//!
//! Two call shapes share one wire format:
//! - chat: full history + persona system prompt, `stream: true`, SSE deltas
//! - generate-ui: directive system prompt + latest user message only,
//!   non-streaming, wrapped into a `{"role","content"}` envelope

use async_trait::async_trait;
use futures::StreamExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::Sender;

use crate::core::prompt::{ASTRO_PERSONA, EMPTY_QUESTION_REPLY, GENERATE_UI_DIRECTIVE};
use crate::inference::{
    ChatRequest, ChatTransport, ContextSegment, Source, StreamChunk, TransportError,
};

// ============================================================================
// Mistral Chat Completions API Types
// ============================================================================

/// Role in a wire message (OpenAI-compatible terminology)
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
enum Role {
    System,
    User,
    Assistant,
}

#[derive(Serialize, Debug)]
struct WireMessage {
    role: Role,
    content: String,
}

/// The request body for the chat-completions endpoint
#[derive(Serialize, Debug)]
struct CompletionsRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Non-streaming response body (only the fields we consume)
#[derive(Deserialize, Debug)]
struct CompletionsResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

/// One SSE `data:` event in a streaming response
#[derive(Deserialize, Debug)]
struct StreamEvent {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize, Debug)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Deserialize, Debug, Default)]
struct Delta {
    #[serde(default)]
    content: String,
}

// ============================================================================
// Translation Layer
// ============================================================================

fn source_to_role(source: &Source) -> Role {
    match source {
        Source::Directive => Role::System,
        Source::User => Role::User,
        Source::Model => Role::Assistant,
    }
}

/// Prepends a system prompt and converts the history into wire messages.
fn messages_with_system(system: &str, items: &[ContextSegment]) -> Vec<WireMessage> {
    let mut messages = Vec::with_capacity(items.len() + 1);
    messages.push(WireMessage {
        role: Role::System,
        content: system.to_string(),
    });
    messages.extend(items.iter().map(|seg| WireMessage {
        role: source_to_role(&seg.source),
        content: seg.content.clone(),
    }));
    messages
}

/// Builds the assistant envelope the parser consumes downstream. The
/// `content` string is whatever the model produced, JSON or not.
fn assistant_envelope(content: &str) -> String {
    serde_json::json!({
        "role": "assistant",
        "content": content,
    })
    .to_string()
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub const DEFAULT_MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";

/// Mistral API provider
pub struct MistralProvider {
    api_key: String,
    base_url: String,
    persona: String,
    client: reqwest::Client,
}

impl MistralProvider {
    /// Creates a new Mistral provider.
    ///
    /// # Arguments
    /// * `api_key` - Mistral API key
    /// * `base_url` - Optional custom base URL (defaults to Mistral's API)
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_MISTRAL_BASE_URL.to_string()),
            persona: ASTRO_PERSONA.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Replaces the chat persona prompt (config override).
    pub fn with_persona(mut self, persona: String) -> Self {
        self.persona = persona;
        self
    }

    /// Sends a request to the chat-completions endpoint and returns the
    /// response after status checking.
    async fn send_request(
        &self,
        request: &CompletionsRequest,
    ) -> Result<reqwest::Response, TransportError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        debug!("Mistral response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Mistral API error: {} - {}", status, err_body);
            return Err(TransportError::Api {
                status,
                message: err_body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatTransport for MistralProvider {
    fn name(&self) -> &str {
        "mistral"
    }

    async fn stream_chat(
        &self,
        request: ChatRequest<'_>,
        sender: Sender<StreamChunk>,
    ) -> Result<(), TransportError> {
        let completions_request = CompletionsRequest {
            model: request.model.to_string(),
            messages: messages_with_system(&self.persona, &request.context.items),
            stream: Some(true),
        };

        info!(
            "Mistral chat request: model={}, message_count={}",
            request.model,
            completions_request.messages.len(),
        );

        let response = self.send_request(&completions_request).await?;

        // Process the SSE stream line by line
        let mut stream = response.bytes_stream();
        let mut buffer = String::new();
        let mut total_content_len = 0usize;
        let mut chunk_count = 0usize;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| TransportError::Network(e.to_string()))?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            // Process complete lines from buffer
            while let Some(pos) = buffer.find('\n') {
                let line = buffer[..pos].to_string();
                buffer.drain(..pos + 1);
                let line = line.trim();

                let Some(data) = line.strip_prefix("data: ") else {
                    continue;
                };

                if data == "[DONE]" {
                    info!(
                        "Stream complete: {} chunks, {} content bytes",
                        chunk_count, total_content_len
                    );
                    if sender.send(StreamChunk::Completed).await.is_err() {
                        warn!("Completed send failed: receiver dropped");
                        return Err(TransportError::ChannelClosed);
                    }
                    return Ok(());
                }

                match serde_json::from_str::<StreamEvent>(data) {
                    Ok(event) => {
                        let Some(choice) = event.choices.first() else {
                            continue;
                        };
                        if choice.delta.content.is_empty() {
                            continue;
                        }
                        chunk_count += 1;
                        total_content_len += choice.delta.content.len();
                        if sender
                            .send(StreamChunk::Content(choice.delta.content.clone()))
                            .await
                            .is_err()
                        {
                            warn!("Content chunk send failed: receiver dropped");
                            return Err(TransportError::ChannelClosed);
                        }
                    }
                    Err(e) => {
                        debug!("Skipping unparseable SSE data ({}): {}", e, data);
                    }
                }
            }
        }

        // Stream ended without a [DONE] marker; the receiver treats a closed
        // channel as completion.
        info!(
            "Stream ended: {} chunks processed, {} total content bytes",
            chunk_count, total_content_len
        );
        Ok(())
    }

    async fn generate_ui(&self, request: ChatRequest<'_>) -> Result<String, TransportError> {
        // Only the latest user question is forwarded; earlier turns would
        // dilute the JSON-only instruction.
        let Some(last_user) = request.context.last_user_message() else {
            info!("generate_ui called with no user message; returning canned envelope");
            return Ok(assistant_envelope(EMPTY_QUESTION_REPLY));
        };

        let completions_request = CompletionsRequest {
            model: request.model.to_string(),
            messages: vec![
                WireMessage {
                    role: Role::System,
                    content: GENERATE_UI_DIRECTIVE.to_string(),
                },
                WireMessage {
                    role: Role::User,
                    content: last_user.content.clone(),
                },
            ],
            stream: None,
        };

        info!("Mistral generate-ui request: model={}", request.model);

        let response = self.send_request(&completions_request).await?;
        let body: CompletionsResponse = response
            .json()
            .await
            .map_err(|e| TransportError::Parse(e.to_string()))?;

        let content = body
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| TransportError::Parse("response carried no choices".to_string()))?;

        debug!("generate-ui content: {} bytes", content.len());
        Ok(assistant_envelope(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::Context;

    #[test]
    fn test_messages_with_system_prepends_directive() {
        let mut ctx = Context::new();
        ctx.add_user_message("Hello".to_string());
        ctx.append_to_last_model_message("Hi!");

        let messages = messages_with_system("be helpful", &ctx.items);

        assert_eq!(messages.len(), 3);
        assert!(matches!(messages[0].role, Role::System));
        assert_eq!(messages[0].content, "be helpful");
        assert!(matches!(messages[1].role, Role::User));
        assert!(matches!(messages[2].role, Role::Assistant));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_completions_request_omits_stream_when_none() {
        let request = CompletionsRequest {
            model: "test".to_string(),
            messages: vec![],
            stream: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("stream"));

        let request = CompletionsRequest {
            model: "test".to_string(),
            messages: vec![],
            stream: Some(true),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""stream":true"#));
    }

    #[test]
    fn test_assistant_envelope_shape() {
        let envelope = assistant_envelope("hello");
        let value: serde_json::Value = serde_json::from_str(&envelope).unwrap();
        assert_eq!(value["role"], "assistant");
        assert_eq!(value["content"], "hello");
    }

    #[test]
    fn test_assistant_envelope_escapes_nested_json() {
        let inner = r#"{"componentType":"PlanetCard","props":{"name":"Mars"}}"#;
        let envelope = assistant_envelope(inner);
        let value: serde_json::Value = serde_json::from_str(&envelope).unwrap();
        // The nested JSON survives as a string, not an object
        assert_eq!(value["content"].as_str().unwrap(), inner);
    }

    #[test]
    fn test_stream_event_deserialization() {
        let json = r#"{"id":"x","choices":[{"index":0,"delta":{"content":"Hello"}}]}"#;
        let event: StreamEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.choices[0].delta.content, "Hello");
    }

    #[test]
    fn test_stream_event_missing_delta_content() {
        let json = r#"{"choices":[{"index":0,"delta":{"role":"assistant"}}]}"#;
        let event: StreamEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.choices[0].delta.content, "");
    }
}
