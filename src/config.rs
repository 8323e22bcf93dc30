use crate::error::{FlashcardError, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const MODEL_VAR: &str = "FLASHCARDS_MODEL";
pub const TIMEOUT_VAR: &str = "FLASHCARDS_TIMEOUT_SECS";
pub const MAX_ATTEMPTS_VAR: &str = "FLASHCARDS_MAX_ATTEMPTS";
pub const OUTPUT_DIR_VAR: &str = "FLASHCARDS_OUTPUT_DIR";
pub const LOG_FILE_VAR: &str = "FLASHCARDS_LOG_FILE";

pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-lite-001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 45;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;
pub const MAX_ATTEMPTS_LIMIT: u32 = 2;
pub const DEFAULT_LOG_FILE: &str = "flashcards_debug.log";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
    pub max_attempts: u32,
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            output_dir: PathBuf::from("."),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Reads the process environment after loading a `.env` file from the
    /// working directory, if one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        config.api_key = get(API_KEY_VAR);
        if let Some(model) = get(MODEL_VAR) {
            config.model = model;
        }
        if let Some(raw) = get(TIMEOUT_VAR) {
            config.timeout = Duration::from_secs(parse_number::<u64>(TIMEOUT_VAR, &raw)?);
        }
        if let Some(raw) = get(MAX_ATTEMPTS_VAR) {
            config.max_attempts = parse_number::<u32>(MAX_ATTEMPTS_VAR, &raw)?;
        }
        if let Some(dir) = get(OUTPUT_DIR_VAR) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(file) = get(LOG_FILE_VAR) {
            config.log_file = PathBuf::from(file);
        }

        config.validate()
    }

    /// Clamps the attempt budget and rejects a zero timeout.
    pub fn validate(mut self) -> Result<Self> {
        if self.timeout.is_zero() {
            return Err(FlashcardError::InvalidConfiguration(format!(
                "{} must be greater than zero",
                TIMEOUT_VAR
            )));
        }
        self.max_attempts = self.max_attempts.clamp(1, MAX_ATTEMPTS_LIMIT);
        Ok(self)
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_number<T: std::str::FromStr>(var: &str, raw: &str) -> Result<T> {
    raw.parse::<T>().map_err(|_| {
        FlashcardError::InvalidConfiguration(format!("{} must be a whole number, got '{}'", var, raw))
    })
}
