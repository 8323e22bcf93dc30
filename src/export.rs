use crate::error::{FlashcardError, Result};
use crate::models::Flashcard;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    AnkiTsv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Json, ExportFormat::Csv, ExportFormat::AnkiTsv];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Json => "flashcards.json",
            Self::Csv => "flashcards.csv",
            Self::AnkiTsv => "flashcards.tsv",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
            Self::AnkiTsv => "text/tab-separated-values",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Json => "JSON",
            Self::Csv => "CSV",
            Self::AnkiTsv => "Anki",
        };
        f.write_str(label)
    }
}

/// Rendered export, recomputed on demand from the current cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub content: String,
}

impl ExportArtifact {
    pub fn file_name(&self) -> &'static str {
        self.format.file_name()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}

pub fn export(cards: &[Flashcard], format: ExportFormat) -> Result<ExportArtifact> {
    let content = match format {
        ExportFormat::Json => to_json(cards)?,
        ExportFormat::Csv => to_csv(cards)?,
        ExportFormat::AnkiTsv => to_anki_tsv(cards),
    };
    Ok(ExportArtifact { format, content })
}

/// Pretty-printed array of `{"question", "answer"}` objects.
pub fn to_json(cards: &[Flashcard]) -> Result<String> {
    serde_json::to_string_pretty(cards).map_err(|e| FlashcardError::Export(e.to_string()))
}

/// RFC 4180 CSV with a `question,answer` header.
pub fn to_csv(cards: &[Flashcard]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["question", "answer"])
        .map_err(|e| FlashcardError::Export(e.to_string()))?;
    for card in cards {
        writer
            .write_record([card.question.as_str(), card.answer.as_str()])
            .map_err(|e| FlashcardError::Export(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| FlashcardError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| FlashcardError::Export(e.to_string()))
}

/// One `question<TAB>answer` line per card, no header, as Anki's plain text
/// import expects.
pub fn to_anki_tsv(cards: &[Flashcard]) -> String {
    cards
        .iter()
        .map(|card| format!("{}\t{}\n", anki_field(&card.question), anki_field(&card.answer)))
        .collect()
}

/// Keeps a field on one row: tabs become spaces and line breaks become
/// `<br>`, which Anki renders as a break inside the field.
fn anki_field(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', " ")
        .replace('\n', "<br>")
}

/// Writes the requested formats into `dir`, creating it if needed, and
/// returns the paths written.
pub fn write_exports(dir: &Path, cards: &[Flashcard], formats: &[ExportFormat]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let artifact = export(cards, *format)?;
        let path = dir.join(artifact.file_name());
        fs::write(&path, artifact.as_bytes())?;
        tracing::info!(
            "Exported {} flashcards as {} to {}",
            cards.len(),
            format,
            path.display()
        );
        written.push(path);
    }
    Ok(written)
}
