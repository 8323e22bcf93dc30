pub mod layout;
mod form;
mod results;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::{AppState, GeneratorSession, StatusKind, StatusMessage};
use layout::centered_rect;

pub use form::draw_form;
pub use layout::{calculate_form_chunks, calculate_results_chunks};
pub use results::draw_results;

/// Renders whichever screen the session is on.
pub fn draw(f: &mut Frame, session: &mut GeneratorSession) {
    match session.state {
        AppState::Form => draw_form(f, session),
        AppState::Generating => {
            draw_form(f, session);
            draw_generating_popup(f, &session.model);
        }
        AppState::Results => draw_results(f, session),
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// A row of `key label` hints, keys highlighted.
fn help_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (key, label)) in hints.iter().enumerate() {
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        let sep = if i + 1 < hints.len() { "  " } else { "" };
        spans.push(Span::from(format!(" {}{}", label, sep)));
    }
    Line::from(spans)
}

fn draw_status(f: &mut Frame, status: Option<&StatusMessage>, area: Rect) {
    let (text, style) = match status {
        Some(message) => {
            let color = match message.kind {
                StatusKind::Info => Color::Blue,
                StatusKind::Success => Color::Green,
                StatusKind::Error => Color::Red,
            };
            (
                message.text.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        }
        None => (String::new(), Style::default()),
    };
    let paragraph = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

/// Modal shown while the model call is in flight.
fn draw_generating_popup(f: &mut Frame, model: &str) {
    let area = centered_rect(50, 25, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(Span::styled(
            "Generating flashcards...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Model: {}", model)),
        Line::from(Span::styled(
            "This can take a little while.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let popup = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Please wait")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Flashcard, FormField, FormState, GenerationOutcome};
    use crate::utils::TextInput;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;
    use std::path::PathBuf;

    fn new_session(ai_enabled: bool) -> GeneratorSession {
        GeneratorSession::new(
            FormState::default(),
            PathBuf::from("."),
            "google/gemini-2.0-flash-lite-001".to_string(),
            ai_enabled,
        )
    }

    fn render(session: &mut GeneratorSession, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, session)).unwrap();
        terminal
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let mut text = String::new();
        for row in buffer.content.chunks(buffer.area.width as usize) {
            for cell in row {
                text.push_str(cell.symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_help_line_spans() {
        let line = help_line(&[("Tab", "Next"), ("q", "Quit")]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Tab Next  q Quit");
    }

    #[test]
    fn test_form_renders_fields_and_ai_status() {
        let mut session = new_session(false);
        let terminal = render(&mut session, 100, 30);
        let text = buffer_text(terminal.backend().buffer());

        assert!(text.contains("LLM Flashcard Generator"));
        assert!(text.contains("Content"));
        assert!(text.contains("Difficulty"));
        assert!(text.contains("◀ Medium ▶"));
        assert!(text.contains("◀ 15 ▶"));
        assert!(text.contains("Generate"));
        assert!(text.contains("Set OPENROUTER_API_KEY"));
    }

    #[test]
    fn test_content_scroll_follows_cursor() {
        let mut session = new_session(true);
        let long: String = (0..60).map(|i| format!("line {}\n", i)).collect();
        session.form.content = TextInput::new(long);
        session.form.focus = FormField::Content;

        render(&mut session, 80, 24);
        assert!(session.form.content_scroll_y > 0);
    }

    #[test]
    fn test_generating_popup_overlays_form() {
        let mut session = new_session(true);
        session.state = AppState::Generating;
        let terminal = render(&mut session, 100, 30);
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Generating flashcards..."));
    }

    #[test]
    fn test_results_render_cards_and_expanded_answer() {
        let mut session = new_session(true);
        session.apply_generation(Ok(GenerationOutcome {
            flashcards: vec![
                Flashcard::new("What is ATP?", "The **energy** currency of the cell."),
                Flashcard::new("What is NADPH?", "An electron carrier."),
            ],
            requested: 5,
        }));
        session.results.as_mut().unwrap().toggle_selected();

        let terminal = render(&mut session, 100, 30);
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Generated Flashcards (2 of 5 requested)"));
        assert!(text.contains("Card 1:"));
        assert!(text.contains("Card 2: What is NADPH?"));
        assert!(text.contains("Answer:"));
        assert!(text.contains("The energy currency of the cell."));
        assert!(!text.contains("An electron carrier."));
        assert!(text.contains("Successfully generated 2 flashcards!"));
    }
}
