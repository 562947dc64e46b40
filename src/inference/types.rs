use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub enum Source {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Model,
    #[serde(rename = "system")]
    Directive,
}

/// A single role-tagged message in a panel's conversation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContextSegment {
    #[serde(rename = "role")]
    pub source: Source,
    pub content: String,
}

/// Helper function to replace typographic characters with ASCII equivalents.
fn replace_typography(text: &str) -> String {
    text.replace(['‘', '’'], "'") // Single quotes
        .replace(['“', '”'], "\"") // Double quotes
        .replace('—', "--") // Em dash
        .replace('…', "...") // Ellipsis
}

/// The message history of one chat panel.
///
/// Holds user and assistant turns only. System prompts are injected by the
/// transport per request, never stored here.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct Context {
    pub items: Vec<ContextSegment>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Context { items: Vec::new() }
    }

    /// Creates a context seeded with an assistant welcome message.
    pub fn with_welcome(welcome: &str) -> Self {
        Context {
            items: vec![ContextSegment {
                source: Source::Model,
                content: welcome.to_string(),
            }],
        }
    }

    /// Adds a segment and returns a reference to it.
    pub fn add(&mut self, segment: ContextSegment) -> &ContextSegment {
        self.items.push(segment);
        self.items.last().expect("just pushed")
    }

    pub fn add_user_message(&mut self, content: String) -> &ContextSegment {
        self.add(ContextSegment {
            source: Source::User,
            content,
        })
    }

    /// Appends content to the last message if it is from the model.
    /// If the last message is not from the model, creates a new one.
    pub fn append_to_last_model_message(&mut self, content: &str) {
        let normalized = replace_typography(content);

        if let Some(seg) = self.items.last_mut()
            && seg.source == Source::Model
        {
            seg.content.push_str(&normalized);
            return;
        }

        self.add(ContextSegment {
            source: Source::Model,
            content: normalized,
        });
    }

    /// Returns the most recent user message, if any.
    pub fn last_user_message(&self) -> Option<&ContextSegment> {
        self.items
            .iter()
            .rev()
            .find(|seg| seg.source == Source::User)
    }
}

/// Represents a chunk of streamed content from the model.
#[derive(Debug, PartialEq)]
pub enum StreamChunk {
    Content(String),
    Completed,
}
