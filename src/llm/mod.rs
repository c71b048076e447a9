pub mod openai;
pub mod provider;
pub mod types;

pub use openai::OpenAiProvider;
pub use provider::{ChatGenerator, Embedder};
pub use types::{ChatMessage, Role};
