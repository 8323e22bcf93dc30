pub mod ai;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod logger;
pub mod models;
pub mod pipeline;
pub mod session;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use ai::{build_prompt, parse_flashcards, FlashcardGenerator, ModelConfig, OpenRouterClient};
pub use cli::Args;
pub use config::AppConfig;
pub use error::{FlashcardError, Result};
pub use export::{export, write_exports, ExportArtifact, ExportFormat};
pub use ingest::ingest;
pub use models::{
    AnswerLength, AppState, Difficulty, Flashcard, FlashcardRequest, GenerationOutcome,
    GeneratorSession,
};
pub use pipeline::{generate_flashcards, generate_with_config};
pub use session::{build_request, handle_key, SessionAction};
pub use ui::draw;
pub use utils::calculate_wrapped_cursor_position;
