use crate::error::Result;
use crate::export::{write_exports, ExportFormat};
use crate::ingest::ingest;
use crate::models::{
    AppState, FlashcardRequest, FormField, FormState, GeneratorSession, StatusMessage,
};
use crate::utils::TextInput;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    None,
    Generate,
    Quit,
}

/// Collects the form's content (typed text or file) and validates it into a
/// request.
pub fn build_request(form: &FormState) -> Result<FlashcardRequest> {
    let file = form.file();
    let content = ingest(Some(form.content.value()), file.as_deref())?;
    FlashcardRequest::new(
        &content,
        form.difficulty,
        form.count,
        form.answer_length,
        Some(form.subject.value()),
    )
}

pub fn handle_key(session: &mut GeneratorSession, key: KeyEvent) -> SessionAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return SessionAction::Quit;
    }
    match session.state {
        AppState::Form => handle_form_input(session, key),
        AppState::Results => handle_results_input(session, key),
        AppState::Generating => SessionAction::None,
    }
}

fn edit_text(input: &mut TextInput, key: KeyEvent, multiline: bool) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert(c),
        KeyCode::Enter if multiline => input.insert('\n'),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    true
}

pub fn handle_form_input(session: &mut GeneratorSession, key: KeyEvent) -> SessionAction {
    let form = &mut session.form;

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('g') => return SessionAction::Generate,
            KeyCode::Char('r') => {
                if session.results.is_some() {
                    session.state = AppState::Results;
                } else {
                    session.status = Some(StatusMessage::info("No flashcards generated yet"));
                }
                return SessionAction::None;
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::Esc => return SessionAction::Quit,
        KeyCode::Tab => {
            form.focus = form.focus.next();
            return SessionAction::None;
        }
        KeyCode::BackTab => {
            form.focus = form.focus.previous();
            return SessionAction::None;
        }
        _ => {}
    }

    match form.focus {
        FormField::Content => {
            edit_text(&mut form.content, key, true);
        }
        FormField::File | FormField::Subject => {
            let input = if form.focus == FormField::File {
                &mut form.file_path
            } else {
                &mut form.subject
            };
            match key.code {
                KeyCode::Enter | KeyCode::Down => form.focus = form.focus.next(),
                KeyCode::Up => form.focus = form.focus.previous(),
                _ => {
                    edit_text(input, key, false);
                }
            }
        }
        FormField::Difficulty | FormField::Count | FormField::AnswerLength => match key.code {
            KeyCode::Left => match form.focus {
                FormField::Difficulty => form.difficulty = form.difficulty.previous(),
                FormField::Count => form.decrement_count(),
                _ => form.answer_length = form.answer_length.previous(),
            },
            KeyCode::Right => match form.focus {
                FormField::Difficulty => form.difficulty = form.difficulty.next(),
                FormField::Count => form.increment_count(),
                _ => form.answer_length = form.answer_length.next(),
            },
            KeyCode::Enter | KeyCode::Down => form.focus = form.focus.next(),
            KeyCode::Up => form.focus = form.focus.previous(),
            _ => {}
        },
        FormField::Generate => match key.code {
            KeyCode::Enter => return SessionAction::Generate,
            KeyCode::Up => form.focus = form.focus.previous(),
            KeyCode::Down => form.focus = form.focus.next(),
            _ => {}
        },
    }
    SessionAction::None
}

pub fn handle_results_input(session: &mut GeneratorSession, key: KeyEvent) -> SessionAction {
    let Some(view) = session.results.as_mut() else {
        session.state = AppState::Form;
        return SessionAction::None;
    };

    match key.code {
        KeyCode::Esc | KeyCode::Char('n') => session.state = AppState::Form,
        KeyCode::Char('q') => return SessionAction::Quit,
        KeyCode::Down | KeyCode::Char('j') => view.select_next(),
        KeyCode::Up | KeyCode::Char('k') => view.select_previous(),
        KeyCode::Enter | KeyCode::Char(' ') => view.toggle_selected(),
        KeyCode::Char('a') => view.toggle_all(),
        KeyCode::Char('1') => export_results(session, &[ExportFormat::Json]),
        KeyCode::Char('2') => export_results(session, &[ExportFormat::Csv]),
        KeyCode::Char('3') => export_results(session, &[ExportFormat::AnkiTsv]),
        KeyCode::Char('e') => export_results(session, &ExportFormat::ALL),
        _ => {}
    }
    SessionAction::None
}

/// Writes the current deck in the given formats and reports the outcome in
/// the status line.
pub fn export_results(session: &mut GeneratorSession, formats: &[ExportFormat]) {
    let Some(view) = session.results.as_ref() else {
        return;
    };
    match write_exports(&session.output_dir, view.flashcards(), formats) {
        Ok(paths) => {
            let names: Vec<String> = paths
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .collect();
            session.status = Some(StatusMessage::success(format!(
                "Saved {} to {}",
                names.join(", "),
                session.output_dir.display()
            )));
        }
        Err(e) => {
            tracing::error!("Export failed: {}", e);
            session.status = Some(StatusMessage::error(e.to_string()));
        }
    }
}
