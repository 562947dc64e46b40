mod mistral;

pub use mistral::{DEFAULT_MISTRAL_BASE_URL, MistralProvider};
