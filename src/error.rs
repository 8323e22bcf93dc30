use std::path::PathBuf;
use thiserror::Error;

/// Every way a generation request can fail, from input collection to export.
///
/// The `Display` text of each variant is what the user sees, so messages are
/// written as sentences rather than debug dumps.
#[derive(Error, Debug)]
pub enum FlashcardError {
    #[error("Please provide some content to generate flashcards")]
    NoContent,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Could not read {}: {source}", path.display())]
    ContentFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a UTF-8 plain text file", path.display())]
    ContentEncoding { path: PathBuf },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Flashcard generation failed: {0}")]
    Generation(String),

    #[error("The model did not answer within {0} seconds")]
    Timeout(u64),

    #[error("The model returned an empty response")]
    EmptyResponse,

    #[error(
        "The model responded, but no flashcards could be parsed from it ({discarded} malformed entries)"
    )]
    Parse { discarded: usize },

    #[error("Export failed: {0}")]
    Export(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FlashcardError {
    /// Failures that a second attempt could plausibly fix.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Generation(_) | Self::Timeout(_))
    }
}

pub type Result<T> = std::result::Result<T, FlashcardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_kinds() {
        assert!(FlashcardError::Generation("503".to_string()).is_transient());
        assert!(FlashcardError::Timeout(45).is_transient());
        assert!(!FlashcardError::EmptyResponse.is_transient());
        assert!(!FlashcardError::Authentication("no key".to_string()).is_transient());
        assert!(!FlashcardError::Parse { discarded: 0 }.is_transient());
    }

    #[test]
    fn test_messages_are_readable() {
        assert_eq!(
            FlashcardError::NoContent.to_string(),
            "Please provide some content to generate flashcards"
        );
        assert_eq!(
            FlashcardError::Timeout(30).to_string(),
            "The model did not answer within 30 seconds"
        );
        let err = FlashcardError::ContentEncoding {
            path: PathBuf::from("notes.pdf"),
        };
        assert_eq!(err.to_string(), "notes.pdf is not a UTF-8 plain text file");
    }
}
