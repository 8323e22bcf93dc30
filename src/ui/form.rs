use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::layout::calculate_form_chunks;
use super::{border_style, draw_status, help_line};
use crate::models::{FormField, FormState, GeneratorSession};
use crate::utils::{calculate_wrapped_cursor_position, follow_cursor, wrap_text, TextInput};

const CONTENT_PLACEHOLDER: &str =
    "Paste your book excerpt, chapter, or any educational content here...";

pub fn draw_form(f: &mut Frame, session: &mut GeneratorSession) {
    let layout = calculate_form_chunks(f.area());

    let title = Paragraph::new("LLM Flashcard Generator")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let form = &mut session.form;
    draw_content(f, form, layout.content_area);
    draw_line_input(
        f,
        &form.file_path,
        "File (.txt)",
        "path/to/notes.txt",
        form.focus == FormField::File,
        layout.file_area,
    );
    draw_line_input(
        f,
        &form.subject,
        "Subject (optional)",
        "e.g. Biology",
        form.focus == FormField::Subject,
        layout.subject_area,
    );
    draw_selector(
        f,
        "Difficulty",
        &form.difficulty.to_string(),
        form.focus == FormField::Difficulty,
        layout.difficulty_area,
    );
    draw_selector(
        f,
        "Cards (5-20)",
        &form.count.to_string(),
        form.focus == FormField::Count,
        layout.count_area,
    );
    draw_selector(
        f,
        "Answer Length",
        &form.answer_length.to_string(),
        form.focus == FormField::AnswerLength,
        layout.answer_length_area,
    );
    draw_generate_button(f, form.focus == FormField::Generate, layout.generate_area);

    draw_status(f, session.status.as_ref(), layout.status_area);

    let ai_status_content = if session.ai_enabled {
        vec![
            Line::from("AI: Enabled"),
            Line::from(format!("Model: {}", session.model)),
        ]
    } else {
        vec![
            Line::from("AI: Disabled"),
            Line::from("Set OPENROUTER_API_KEY"),
        ]
    };
    let ai_status = Paragraph::new(ai_status_content)
        .style(
            Style::default()
                .fg(if session.ai_enabled {
                    Color::Green
                } else {
                    Color::Yellow
                })
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title("AI Status"));
    f.render_widget(ai_status, layout.ai_status_area);

    let mut help = vec![help_line(&[
        ("Tab", "Next field"),
        ("←/→", "Change"),
        ("Ctrl+G", "Generate"),
    ])];
    let mut second = vec![("Esc/Ctrl+C", "Quit")];
    if session.results.is_some() {
        second.insert(0, ("Ctrl+R", "Results"));
    }
    help.push(help_line(&second));
    let help = Paragraph::new(help)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

/// The multi-line content box. Text is wrapped here rather than by the
/// widget so the cursor lands exactly where the wrapped text is drawn.
fn draw_content(f: &mut Frame, form: &mut FormState, area: Rect) {
    let focused = form.focus == FormField::Content;
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Content")
        .border_style(border_style(focused));

    let inner_width = area.width.saturating_sub(2) as usize;
    let visible_height = area.height.saturating_sub(2) as usize;

    if form.content.value().is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            CONTENT_PLACEHOLDER,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
        .block(block);
        f.render_widget(placeholder, area);
        form.content_scroll_y = 0;
        if focused {
            f.set_cursor_position((area.x + 1, area.y + 1));
        }
        return;
    }

    let text = form.content.value();
    let (cursor_line, cursor_col) =
        calculate_wrapped_cursor_position(text, form.content.cursor(), inner_width);
    form.content_scroll_y = follow_cursor(form.content_scroll_y, cursor_line, visible_height);

    let lines: Vec<Line> = wrap_text(text, inner_width)
        .into_iter()
        .map(Line::from)
        .collect();
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((form.content_scroll_y, 0));
    f.render_widget(paragraph, area);

    if focused {
        let cursor_x = area.x + 1 + cursor_col as u16;
        let cursor_y = area.y + 1 + (cursor_line as u16).saturating_sub(form.content_scroll_y);
        f.set_cursor_position((cursor_x, cursor_y));
    }
}

fn draw_line_input(
    f: &mut Frame,
    input: &TextInput,
    title: &str,
    placeholder: &str,
    focused: bool,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(border_style(focused));
    let inner_width = area.width.saturating_sub(2) as usize;

    if input.value().is_empty() {
        let paragraph = Paragraph::new(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        f.render_widget(paragraph, area);
        if focused {
            f.set_cursor_position((area.x + 1, area.y + 1));
        }
        return;
    }

    // Scroll horizontally so the cursor stays inside the box.
    let cursor_col = input.value()[..input.cursor()].width();
    let offset = cursor_col.saturating_sub(inner_width.saturating_sub(1));
    let paragraph = Paragraph::new(input.value().to_string())
        .block(block)
        .scroll((0, offset as u16));
    f.render_widget(paragraph, area);

    if focused {
        f.set_cursor_position((area.x + 1 + (cursor_col - offset) as u16, area.y + 1));
    }
}

fn draw_selector(f: &mut Frame, title: &str, value: &str, focused: bool, area: Rect) {
    let value_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let arrow_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled("◀ ", arrow_style),
        Span::styled(value.to_string(), value_style),
        Span::styled(" ▶", arrow_style),
    ]);
    let paragraph = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(border_style(focused)),
    );
    f.render_widget(paragraph, area);
}

fn draw_generate_button(f: &mut Frame, focused: bool, area: Rect) {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };
    let button = Paragraph::new(Span::styled(" Generate ", style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(focused)),
        );
    f.render_widget(button, area);
}
