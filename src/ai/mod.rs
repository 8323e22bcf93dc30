pub mod client;
pub mod parser;
pub mod prompt;

// Public API exports
pub use client::{classify_api_error, FlashcardGenerator, ModelConfig, OpenRouterClient};
pub use parser::{format_flashcards, parse_flashcards};
pub use prompt::build_prompt;
