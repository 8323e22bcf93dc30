use crate::error::{FlashcardError, Result};
use crate::models::Flashcard;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// "1. ", "2) ", "- ", "* ", "• " at the start of a line.
    static ref LIST_MARKER_RE: Regex =
        Regex::new(r"^(?:\d+[.)]|[-*•])\s+").expect("list marker pattern is valid");

    /// "Q:", "Question 3:", "**A:**", "**A**:", "__Answer__:". Emphasis is
    /// only consumed when it wraps the label; the text after it is kept as is.
    static ref LABEL_RE: Regex = Regex::new(concat!(
        r"(?i)^(?:",
        r"\*\*(?P<bold>question|answer|q|a)(?:\s*\d+)?\s*(?::\*\*|\*\*\s*:)",
        r"|__(?P<under>question|answer|q|a)(?:\s*\d+)?\s*(?::__|__\s*:)",
        r"|(?P<plain>question|answer|q|a)(?:\s*\d+)?\s*:",
        r")\s*(?P<rest>.*)$"
    ))
    .expect("label pattern is valid");

    /// "Flashcard 2", "### Card 3:", "**Card 4**".
    static ref HEADING_RE: Regex =
        Regex::new(r"(?i)^(?:#+\s*)?(?:\*\*)?(?:flash)?card\s*\d+\s*:?\s*(?:\*\*)?$")
            .expect("heading pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Question,
    Answer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Question,
    Answer,
}

#[derive(Debug, Default)]
struct PendingCard {
    question: String,
    answer: String,
    field: Option<Field>,
}

impl PendingCard {
    fn starting_with(question: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: String::new(),
            field: Some(Field::Question),
        }
    }

    fn append(&mut self, text: &str) {
        let target = match self.field {
            Some(Field::Answer) => &mut self.answer,
            _ => &mut self.question,
        };
        if !target.is_empty() {
            target.push(' ');
        }
        target.push_str(text);
    }
}

/// Running result of a parse: accepted cards and how many blocks were dropped.
#[derive(Debug, Default)]
struct ParseState {
    cards: Vec<Flashcard>,
    discarded: usize,
    pending: Option<PendingCard>,
}

impl ParseState {
    fn close(&mut self) {
        let Some(card) = self.pending.take() else {
            return;
        };
        let question = card.question.trim();
        let answer = card.answer.trim();
        if question.is_empty() || answer.is_empty() {
            tracing::debug!(
                "Discarding incomplete flashcard (question: {:?}, answer: {:?})",
                question, answer
            );
            self.discarded += 1;
        } else {
            self.cards.push(Flashcard::new(question, answer));
        }
    }
}

fn is_decoration(line: &str) -> bool {
    line.starts_with("```")
        || line.chars().all(|c| matches!(c, '-' | '*' | '_' | '=' | ' '))
        || HEADING_RE.is_match(line)
}

fn split_label(line: &str) -> Option<(Label, &str)> {
    let caps = LABEL_RE.captures(line)?;
    let word = caps
        .name("bold")
        .or_else(|| caps.name("under"))
        .or_else(|| caps.name("plain"))?;
    let label = match word.as_str().to_ascii_lowercase().as_str() {
        "q" | "question" => Label::Question,
        _ => Label::Answer,
    };
    let rest = caps.name("rest").map_or("", |m| m.as_str().trim());
    Some((label, rest))
}

/// Turns raw model output into flashcards.
///
/// A record starts at a `Q:` label and ends at the next `Q:` label, or at a
/// blank line once its `A:` label has been seen. Blank lines between a
/// question and its answer are skipped. Lines outside
/// any record (preambles, sign-offs) are ignored, incomplete records are
/// dropped, and continuation lines are joined with a single space.
///
/// Fails with [`FlashcardError::Parse`] only when nothing usable remains.
pub fn parse_flashcards(raw: &str) -> Result<Vec<Flashcard>> {
    let mut state = ParseState::default();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            let answering = state
                .pending
                .as_ref()
                .is_some_and(|card| card.field == Some(Field::Answer));
            if answering {
                state.close();
            }
            continue;
        }
        if is_decoration(line) {
            continue;
        }
        let line = LIST_MARKER_RE.replace(line, "");
        let line = line.trim();

        match split_label(line) {
            Some((Label::Question, rest)) => {
                state.close();
                state.pending = Some(PendingCard::starting_with(rest));
            }
            Some((Label::Answer, rest)) => match state.pending.as_mut() {
                Some(card) if card.field == Some(Field::Question) => {
                    card.field = Some(Field::Answer);
                    card.answer = rest.to_string();
                }
                Some(card) => card.append(rest),
                None => {
                    tracing::debug!("Ignoring answer without a question: {:?}", rest);
                    state.discarded += 1;
                }
            },
            None => {
                if let Some(card) = state.pending.as_mut() {
                    card.append(line);
                }
            }
        }
    }
    state.close();

    tracing::info!(
        "Parsed {} flashcards ({} discarded)",
        state.cards.len(),
        state.discarded
    );

    if state.cards.is_empty() {
        return Err(FlashcardError::Parse {
            discarded: state.discarded,
        });
    }
    Ok(state.cards)
}

/// Writes cards in the canonical `Q:`/`A:` block format that
/// [`parse_flashcards`] reads.
pub fn format_flashcards(cards: &[Flashcard]) -> String {
    cards
        .iter()
        .map(|card| format!("Q: {}\nA: {}\n", card.question, card.answer))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_blocks() {
        let raw = "Q: What is photosynthesis?\nA: Converting light into chemical energy.\n\nQ: Where does it happen?\nA: In the chloroplasts.\n";
        let cards = parse_flashcards(raw).unwrap();
        assert_eq!(
            cards,
            vec![
                Flashcard::new("What is photosynthesis?", "Converting light into chemical energy."),
                Flashcard::new("Where does it happen?", "In the chloroplasts."),
            ]
        );
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_blank_lines() {
        let raw = "\n\n   Q:   First?  \n  A: One.   \n\n\n\n Q: Second?\n A: Two.\n\n\n";
        let cards = parse_flashcards(raw).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0], Flashcard::new("First?", "One."));
        assert_eq!(cards[1], Flashcard::new("Second?", "Two."));
    }

    #[test]
    fn test_parse_numbered_and_bulleted_records() {
        let raw = "1. Q: What is ATP?\n   A: The energy currency of the cell.\n\n2) Q: What is NADPH?\nA: An electron carrier.\n\n- Q: What is RuBisCO?\n- A: An enzyme.";
        let cards = parse_flashcards(raw).unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].question, "What is ATP?");
        assert_eq!(cards[1].answer, "An electron carrier.");
        assert_eq!(cards[2], Flashcard::new("What is RuBisCO?", "An enzyme."));
    }

    #[test]
    fn test_parse_long_labels_and_markdown() {
        let raw = "**Question 1:** What absorbs light?\n**Answer:** Chlorophyll.\n\nquestion: lowercase?\nANSWER: still works";
        let cards = parse_flashcards(raw).unwrap();
        assert_eq!(cards[0], Flashcard::new("What absorbs light?", "Chlorophyll."));
        assert_eq!(cards[1], Flashcard::new("lowercase?", "still works"));
    }

    #[test]
    fn test_parse_bold_label_with_inner_colon() {
        let cards = parse_flashcards("**Q:** Inner colon?\n**A:** Yes.").unwrap();
        assert_eq!(cards, vec![Flashcard::new("Inner colon?", "Yes.")]);
    }

    #[test]
    fn test_parse_ignores_chatter_headings_and_fences() {
        let raw = "Here are your flashcards:\n\n```\n### Flashcard 1\nQ: What is glucose?\nA: A sugar.\n```\n\n---\n\n**Card 2**\nQ: What is oxygen?\nA: A by-product.\n\nLet me know if you need more!";
        let cards = parse_flashcards(raw).unwrap();
        assert_eq!(
            cards,
            vec![
                Flashcard::new("What is glucose?", "A sugar."),
                Flashcard::new("What is oxygen?", "A by-product."),
            ]
        );
    }

    #[test]
    fn test_parse_joins_continuation_lines() {
        let raw = "Q: What are the two stages\nof photosynthesis?\nA: The light-dependent reactions\nand the Calvin cycle.";
        let cards = parse_flashcards(raw).unwrap();
        assert_eq!(
            cards[0],
            Flashcard::new(
                "What are the two stages of photosynthesis?",
                "The light-dependent reactions and the Calvin cycle."
            )
        );
    }

    #[test]
    fn test_parse_new_question_closes_previous_without_blank_line() {
        let raw = "Q: One?\nA: 1\nQ: Two?\nA: 2";
        let cards = parse_flashcards(raw).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1], Flashcard::new("Two?", "2"));
    }

    #[test]
    fn test_parse_question_text_on_next_line() {
        let cards = parse_flashcards("Q:\nWhat is a leaf?\nA:\nAn organ.").unwrap();
        assert_eq!(cards, vec![Flashcard::new("What is a leaf?", "An organ.")]);
    }

    #[test]
    fn test_parse_discards_malformed_records_but_keeps_good_ones() {
        let raw = "A: Orphan answer\n\nQ: No answer here\n\nQ: Good?\nA: Yes.\n\nQ:\nA: Missing question";
        let cards = parse_flashcards(raw).unwrap();
        assert_eq!(cards, vec![Flashcard::new("Good?", "Yes.")]);
    }

    #[test]
    fn test_parse_error_when_nothing_usable() {
        let err = parse_flashcards("I'm sorry, I can't help with that.").unwrap_err();
        assert!(matches!(err, FlashcardError::Parse { discarded: 0 }));

        let err = parse_flashcards("Q: Only a question\n\nQ: Another").unwrap_err();
        assert!(matches!(err, FlashcardError::Parse { discarded: 2 }));

        assert!(parse_flashcards("").is_err());
    }

    #[test]
    fn test_parse_inverts_format() {
        let cards = vec![
            Flashcard::new("What is 2+2?", "Four, or 4."),
            Flashcard::new("Who wrote \"Origin of Species\"?", "Charles Darwin."),
            Flashcard::new("Q-learning is?", "A reinforcement learning method: model-free."),
        ];
        let raw = format_flashcards(&cards);
        assert_eq!(parse_flashcards(&raw).unwrap(), cards);
    }

    #[test]
    fn test_parse_is_idempotent_on_its_output() {
        let raw = "1. Q: First?\nA: One\n\n2. Q: Second?\nA: Two";
        let once = parse_flashcards(raw).unwrap();
        let twice = parse_flashcards(&format_flashcards(&once)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_parse_blank_line_between_question_and_answer() {
        let raw = "Q: What is ATP?\n\nA: Energy currency.\n\nQ: What is DNA?\n\n\nA: Genetic material.";
        let cards = parse_flashcards(raw).unwrap();
        assert_eq!(
            cards,
            vec![
                Flashcard::new("What is ATP?", "Energy currency."),
                Flashcard::new("What is DNA?", "Genetic material."),
            ]
        );
    }

    #[test]
    fn test_parse_keeps_emphasis_and_underscores_in_fields() {
        let cards = vec![
            Flashcard::new("What does Python call on construction?", "Python calls __init__"),
            Flashcard::new("What drives the light reactions?", "**Light** is required"),
            Flashcard::new("Which cycle fixes carbon?", "The **Calvin cycle**"),
            Flashcard::new("**Bold** question about `code`?", "__main__ runs *first*"),
        ];
        let raw = format_flashcards(&cards);
        assert_eq!(parse_flashcards(&raw).unwrap(), cards);
    }

    #[test]
    fn test_parse_emphasised_labels_leave_field_markdown_alone() {
        let raw = "**Q**: What is **RuBisCO**?\n**A:** An enzyme, see __rubisco__\n\n__Question__: Plain?\n__Answer__: Yes";
        let cards = parse_flashcards(raw).unwrap();
        assert_eq!(
            cards,
            vec![
                Flashcard::new("What is **RuBisCO**?", "An enzyme, see __rubisco__"),
                Flashcard::new("Plain?", "Yes"),
            ]
        );
    }

    #[test]
    fn test_parse_is_idempotent_with_markdown_and_blank_lines() {
        let raw = "Q: Define **osmosis**\n\nA: Water crossing a membrane\ntowards higher solute.\n\nQ: What is `H2O`?\nA: __water__";
        let once = parse_flashcards(raw).unwrap();
        assert_eq!(once.len(), 2);
        assert_eq!(once[0].answer, "Water crossing a membrane towards higher solute.");
        let twice = parse_flashcards(&format_flashcards(&once)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_flashcards(&[]), "");
    }
}
