use crate::error::{FlashcardError, Result};
use crate::utils::TextInput;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const MIN_CARD_COUNT: u8 = 5;
pub const MAX_CARD_COUNT: u8 = 20;
pub const DEFAULT_CARD_COUNT: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::Easy => Self::Hard,
            Self::Medium => Self::Easy,
            Self::Hard => Self::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        };
        f.write_str(label)
    }
}

impl FromStr for Difficulty {
    type Err = FlashcardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(FlashcardError::InvalidConfiguration(format!(
                "unknown difficulty '{}' (expected Easy, Medium or Hard)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl AnswerLength {
    pub const ALL: [AnswerLength; 3] = [AnswerLength::Short, AnswerLength::Medium, AnswerLength::Long];

    pub fn next(self) -> Self {
        match self {
            Self::Short => Self::Medium,
            Self::Medium => Self::Long,
            Self::Long => Self::Short,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::Short => Self::Long,
            Self::Medium => Self::Short,
            Self::Long => Self::Medium,
        }
    }

    /// How the model should size each answer.
    pub fn guidance(self) -> &'static str {
        match self {
            Self::Short => "one sentence",
            Self::Medium => "two or three sentences",
            Self::Long => "a detailed paragraph",
        }
    }
}

impl fmt::Display for AnswerLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Short => "Short",
            Self::Medium => "Medium",
            Self::Long => "Long",
        };
        f.write_str(label)
    }
}

impl FromStr for AnswerLength {
    type Err = FlashcardError;

    /// Accepts the bare names as well as labelled forms such as
    /// "Short (1 sentence)".
    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        let name = lowered.split_whitespace().next().unwrap_or_default();
        match name {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            _ => Err(FlashcardError::InvalidConfiguration(format!(
                "unknown answer length '{}' (expected Short, Medium or Long)",
                s.trim()
            ))),
        }
    }
}

/// A validated, immutable description of one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardRequest {
    content: String,
    difficulty: Difficulty,
    count: u8,
    answer_length: AnswerLength,
    subject: Option<String>,
}

impl FlashcardRequest {
    pub fn new(
        content: &str,
        difficulty: Difficulty,
        count: u8,
        answer_length: AnswerLength,
        subject: Option<&str>,
    ) -> Result<Self> {
        let content = content.trim();
        if content.is_empty() {
            return Err(FlashcardError::NoContent);
        }
        if !(MIN_CARD_COUNT..=MAX_CARD_COUNT).contains(&count) {
            return Err(FlashcardError::InvalidConfiguration(format!(
                "flashcard count must be between {} and {}, got {}",
                MIN_CARD_COUNT, MAX_CARD_COUNT, count
            )));
        }
        let subject = subject
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            content: content.to_string(),
            difficulty,
            count,
            answer_length,
            subject,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn answer_length(&self) -> AnswerLength {
        self.answer_length
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Cards produced by one successful generation, alongside what was asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    pub flashcards: Vec<Flashcard>,
    pub requested: u8,
}

impl GenerationOutcome {
    pub fn count_matches(&self) -> bool {
        self.flashcards.len() == self.requested as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Form,
    Generating,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Content,
    File,
    Subject,
    Difficulty,
    Count,
    AnswerLength,
    Generate,
}

impl FormField {
    const ORDER: [FormField; 7] = [
        FormField::Content,
        FormField::File,
        FormField::Subject,
        FormField::Difficulty,
        FormField::Count,
        FormField::AnswerLength,
        FormField::Generate,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub content: TextInput,
    pub content_scroll_y: u16,
    pub file_path: TextInput,
    pub subject: TextInput,
    pub difficulty: Difficulty,
    pub count: u8,
    pub answer_length: AnswerLength,
    pub focus: FormField,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            content: TextInput::default(),
            content_scroll_y: 0,
            file_path: TextInput::default(),
            subject: TextInput::default(),
            difficulty: Difficulty::default(),
            count: DEFAULT_CARD_COUNT,
            answer_length: AnswerLength::default(),
            focus: FormField::Content,
        }
    }
}

impl FormState {
    pub fn file(&self) -> Option<PathBuf> {
        let trimmed = self.file_path.value().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }

    pub fn increment_count(&mut self) {
        self.count = (self.count + 1).min(MAX_CARD_COUNT);
    }

    pub fn decrement_count(&mut self) {
        self.count = self.count.saturating_sub(1).max(MIN_CARD_COUNT);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// The last generated deck together with how it is currently being viewed.
#[derive(Debug, Clone)]
pub struct ResultsView {
    pub outcome: GenerationOutcome,
    pub selected: usize,
    pub expanded: Vec<bool>,
    pub list_offset: usize,
}

impl ResultsView {
    pub fn new(outcome: GenerationOutcome) -> Self {
        let expanded = vec![false; outcome.flashcards.len()];
        Self {
            outcome,
            selected: 0,
            expanded,
            list_offset: 0,
        }
    }

    pub fn flashcards(&self) -> &[Flashcard] {
        &self.outcome.flashcards
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.outcome.flashcards.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn toggle_selected(&mut self) {
        if let Some(flag) = self.expanded.get_mut(self.selected) {
            *flag = !*flag;
        }
    }

    /// Collapses everything when every card is open, otherwise opens all.
    pub fn toggle_all(&mut self) {
        let open = !self.expanded.iter().all(|e| *e);
        self.expanded.iter_mut().for_each(|e| *e = open);
    }
}

/// State owned by one run of the interactive generator.
///
/// Nothing here is global: the event loop owns the session and hands it to
/// input handlers and renderers by reference.
#[derive(Debug)]
pub struct GeneratorSession {
    pub state: AppState,
    pub form: FormState,
    pub results: Option<ResultsView>,
    pub status: Option<StatusMessage>,
    pub output_dir: PathBuf,
    pub model: String,
    pub ai_enabled: bool,
}

impl GeneratorSession {
    pub fn new(form: FormState, output_dir: PathBuf, model: String, ai_enabled: bool) -> Self {
        Self {
            state: AppState::Form,
            form,
            results: None,
            status: None,
            output_dir,
            model,
            ai_enabled,
        }
    }

    /// Applies the result of a pipeline run. A failure keeps the previous
    /// deck so it can still be browsed and exported.
    pub fn apply_generation(&mut self, result: Result<GenerationOutcome>) {
        match result {
            Ok(outcome) => {
                let mut message = format!(
                    "Successfully generated {} flashcards!",
                    outcome.flashcards.len()
                );
                if !outcome.count_matches() {
                    message.push_str(&format!(" ({} requested)", outcome.requested));
                }
                self.status = Some(StatusMessage::success(message));
                self.results = Some(ResultsView::new(outcome));
                self.state = AppState::Results;
            }
            Err(e) => {
                self.status = Some(StatusMessage::error(e.to_string()));
                self.state = AppState::Form;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parsing_is_case_insensitive() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" HARD ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_answer_length_accepts_labelled_options() {
        assert_eq!(
            "Short (1 sentence)".parse::<AnswerLength>().unwrap(),
            AnswerLength::Short
        );
        assert_eq!(
            "Long (detailed)".parse::<AnswerLength>().unwrap(),
            AnswerLength::Long
        );
        assert_eq!("medium".parse::<AnswerLength>().unwrap(), AnswerLength::Medium);
        assert!("tiny".parse::<AnswerLength>().is_err());
        assert!("".parse::<AnswerLength>().is_err());
    }

    #[test]
    fn test_selector_cycling() {
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.previous(), Difficulty::Hard);
        assert_eq!(AnswerLength::Long.next(), AnswerLength::Short);
        assert_eq!(AnswerLength::Medium.previous(), AnswerLength::Short);
    }

    #[test]
    fn test_request_trims_content_and_subject() {
        let request = FlashcardRequest::new(
            "  Photosynthesis converts light into energy \n",
            Difficulty::Medium,
            5,
            AnswerLength::Short,
            Some("   "),
        )
        .unwrap();
        assert_eq!(request.content(), "Photosynthesis converts light into energy");
        assert_eq!(request.subject(), None);
        assert_eq!(request.count(), 5);
    }

    #[test]
    fn test_request_rejects_blank_content() {
        let result = FlashcardRequest::new(" \n\t", Difficulty::Easy, 10, AnswerLength::Medium, None);
        assert!(matches!(result, Err(FlashcardError::NoContent)));
    }

    #[test]
    fn test_request_rejects_out_of_range_count() {
        for count in [0, 4, 21, 100] {
            let result =
                FlashcardRequest::new("text", Difficulty::Easy, count, AnswerLength::Medium, None);
            assert!(matches!(
                result,
                Err(FlashcardError::InvalidConfiguration(_))
            ));
        }
        assert!(FlashcardRequest::new("text", Difficulty::Easy, 20, AnswerLength::Long, None).is_ok());
    }

    #[test]
    fn test_form_field_cycle_wraps() {
        assert_eq!(FormField::Generate.next(), FormField::Content);
        assert_eq!(FormField::Content.previous(), FormField::Generate);
        assert_eq!(FormField::Subject.next(), FormField::Difficulty);
    }

    #[test]
    fn test_count_stays_in_bounds() {
        let mut form = FormState::default();
        form.count = MAX_CARD_COUNT;
        form.increment_count();
        assert_eq!(form.count, MAX_CARD_COUNT);
        form.count = MIN_CARD_COUNT;
        form.decrement_count();
        assert_eq!(form.count, MIN_CARD_COUNT);
    }

    #[test]
    fn test_toggle_all_expands_then_collapses() {
        let mut view = ResultsView::new(GenerationOutcome {
            flashcards: vec![Flashcard::new("Q1", "A1"), Flashcard::new("Q2", "A2")],
            requested: 2,
        });
        view.toggle_selected();
        assert_eq!(view.expanded, vec![true, false]);
        view.toggle_all();
        assert_eq!(view.expanded, vec![true, true]);
        view.toggle_all();
        assert_eq!(view.expanded, vec![false, false]);
    }

    #[test]
    fn test_failed_generation_keeps_previous_results() {
        let mut session = GeneratorSession::new(
            FormState::default(),
            PathBuf::from("."),
            "test-model".to_string(),
            true,
        );
        session.apply_generation(Ok(GenerationOutcome {
            flashcards: vec![Flashcard::new("Q", "A")],
            requested: 5,
        }));
        assert_eq!(session.state, AppState::Results);
        let status = session.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Success);
        assert!(status.text.contains("(5 requested)"));

        session.apply_generation(Err(FlashcardError::EmptyResponse));
        assert_eq!(session.state, AppState::Form);
        assert_eq!(session.status.as_ref().unwrap().kind, StatusKind::Error);
        assert_eq!(session.results.as_ref().unwrap().flashcards().len(), 1);
    }
}
