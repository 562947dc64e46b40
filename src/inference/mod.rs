pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{ChatRequest, ChatTransport, TransportError};
pub use providers::{DEFAULT_MISTRAL_BASE_URL, MistralProvider};
pub use types::{Context, ContextSegment, Source, StreamChunk};
