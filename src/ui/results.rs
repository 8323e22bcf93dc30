use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::layout::calculate_results_chunks;
use super::{draw_status, help_line};
use crate::models::{GeneratorSession, ResultsView};
use crate::utils::markdown::{render_inline, wrap_spans};
use crate::utils::truncate_string;

pub fn draw_results(f: &mut Frame, session: &mut GeneratorSession) {
    let layout = calculate_results_chunks(f.area());

    let header_text = match session.results.as_ref() {
        Some(view) if view.outcome.count_matches() => {
            format!("Generated Flashcards ({})", view.flashcards().len())
        }
        Some(view) => format!(
            "Generated Flashcards ({} of {} requested)",
            view.flashcards().len(),
            view.outcome.requested
        ),
        None => "Generated Flashcards".to_string(),
    };
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    if let Some(view) = session.results.as_mut() {
        draw_card_list(f, view, layout.list_area);
    }

    draw_status(f, session.status.as_ref(), layout.status_area);

    let help = vec![
        help_line(&[
            ("↑/↓", "Navigate"),
            ("Enter", "Show/Hide"),
            ("a", "Show all"),
            ("n/Esc", "New"),
            ("q", "Quit"),
        ]),
        help_line(&[
            ("1", "JSON"),
            ("2", "CSV"),
            ("3", "Anki"),
            ("e", "Export all"),
        ]),
    ];
    let help = Paragraph::new(help)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

fn card_item(
    index: usize,
    question: &str,
    answer: &str,
    expanded: bool,
    width: usize,
) -> ListItem<'static> {
    let marker = if expanded { "▾" } else { "▸" };
    let label = format!("{} Card {}: ", marker, index + 1);
    let label_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    if !expanded {
        let room = width.saturating_sub(label.chars().count());
        return ListItem::new(Line::from(vec![
            Span::styled(label, label_style),
            Span::from(truncate_string(question, room)),
        ]));
    }

    let mut lines = vec![Line::from(Span::styled(label, label_style))];
    lines.extend(expanded_lines(question, answer, width));
    ListItem::new(lines)
}

/// Body of an expanded card. Markdown is rendered before wrapping.
fn expanded_lines(question: &str, answer: &str, width: usize) -> Vec<Line<'static>> {
    let indent = "    ";
    let body_width = width.saturating_sub(indent.len());
    let indented = |spans: Vec<Span<'static>>| {
        let mut line = vec![Span::from(indent)];
        line.extend(spans);
        Line::from(line)
    };

    let question_spans = render_inline(question)
        .into_iter()
        .map(|s| s.patch_style(Style::default().add_modifier(Modifier::BOLD)))
        .collect();
    let mut lines: Vec<Line<'static>> = wrap_spans(question_spans, body_width)
        .into_iter()
        .map(indented)
        .collect();
    lines.push(indented(vec![Span::styled(
        "Answer:",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )]));
    lines.extend(wrap_spans(render_inline(answer), body_width).into_iter().map(indented));
    lines.push(Line::from(""));
    lines
}

fn draw_card_list(f: &mut Frame, view: &mut ResultsView, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Flashcards");

    if view.flashcards().is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No flashcards in this deck",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    // Leave room for the borders and the highlight symbol.
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = view
        .flashcards()
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let expanded = view.expanded.get(i).copied().unwrap_or(false);
            card_item(i, &card.question, &card.answer, expanded, width)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default()
        .with_offset(view.list_offset)
        .with_selected(Some(view.selected));
    f.render_stateful_widget(list, area, &mut state);
    view.list_offset = state.offset();
}
