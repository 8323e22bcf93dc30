use crate::models::FlashcardRequest;

pub const SYSTEM_PROMPT: &str = "You are an educational assistant that writes study flashcards. \
Follow the requested output format exactly and do not add any other text.";

const DEFAULT_SUBJECT: &str = "general knowledge";

/// Builds the instruction sent to the model for one request.
///
/// The model is asked for blocks of the form
///
/// ```text
/// Q: <question on one line>
/// A: <answer on one line>
/// ```
///
/// separated by exactly one blank line, which is the shape
/// [`parse_flashcards`](crate::ai::parse_flashcards) inverts.
pub fn build_prompt(request: &FlashcardRequest) -> String {
    let subject = request.subject().unwrap_or(DEFAULT_SUBJECT);

    format!(
        r#"Generate {count} question-answer flashcards based on the following content.
The subject is: {subject}.
Difficulty level: {difficulty}.
Answer length: {length} (each answer should be {guidance}).

For each flashcard:
- The question should be clear and test understanding of the content
- The answer should be accurate and self-contained

Output format (follow it exactly):
- Write each flashcard as two lines: "Q: <question>" then "A: <answer>"
- Keep each question and each answer on a single line
- Separate flashcards with one blank line
- Do not number the flashcards and do not add headings, introductions or closing remarks

Content:
{content}
"#,
        count = request.count(),
        subject = subject,
        difficulty = request.difficulty(),
        length = request.answer_length(),
        guidance = request.answer_length().guidance(),
        content = request.content(),
    )
}
