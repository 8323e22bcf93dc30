use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::error::Result;
use crate::models::{AnswerLength, Difficulty, FormState};
use crate::utils::TextInput;

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
pub struct Args {
    /// Study text to turn into flashcards
    #[arg(short, long, value_name = "TEXT")]
    pub text: Option<String>,

    /// UTF-8 .txt file to read the study text from (ignored when --text is given)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Subject hint for the model, e.g. "Biology"
    #[arg(short, long)]
    pub subject: Option<String>,

    /// Easy, Medium or Hard
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Number of flashcards to request (5-20)
    #[arg(short = 'n', long)]
    pub count: Option<u8>,

    /// Short, Medium or Long
    #[arg(short, long)]
    pub answer_length: Option<AnswerLength>,

    /// OpenRouter model id (overrides FLASHCARDS_MODEL)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Directory exported files are written to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Seconds to wait for one model call
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Generate once, print the cards and write every export format, without the TUI
    #[arg(long)]
    pub headless: bool,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Layers command-line overrides on top of the environment configuration.
    pub fn apply_to(&self, mut config: AppConfig) -> Result<AppConfig> {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = std::time::Duration::from_secs(secs);
        }
        config.validate()
    }

    /// Initial form values for the interactive screen. Counts outside the
    /// allowed range are clamped rather than rejected here; the request is
    /// validated again when generating.
    pub fn prefill_form(&self) -> FormState {
        let mut form = FormState::default();
        if let Some(text) = &self.text {
            form.content = TextInput::new(text.clone());
        }
        if let Some(file) = &self.file {
            form.file_path = TextInput::new(file.to_string_lossy().to_string());
        }
        if let Some(subject) = &self.subject {
            form.subject = TextInput::new(subject.clone());
        }
        if let Some(difficulty) = self.difficulty {
            form.difficulty = difficulty;
        }
        if let Some(count) = self.count {
            form.count = count.clamp(crate::models::MIN_CARD_COUNT, crate::models::MAX_CARD_COUNT);
        }
        if let Some(answer_length) = self.answer_length {
            form.answer_length = answer_length;
        }
        form
    }
}
