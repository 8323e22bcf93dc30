use lazy_static::lazy_static;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};
use regex::Regex;
use unicode_width::UnicodeWidthStr;

lazy_static! {
    static ref INLINE_RE: Regex =
        Regex::new(r"\*\*(?P<bold>[^*]+)\*\*|`(?P<code>[^`]+)`|\*(?P<italic>[^*]+)\*")
            .expect("inline markdown pattern is valid");
}

/// Turns the inline markdown models like to sprinkle into answers
/// (`**bold**`, `*italic*`, `` `code` ``) into styled spans.
pub fn render_inline(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(Span::raw(text[last..whole.start()].to_string()));
        }
        if let Some(m) = caps.name("bold") {
            spans.push(Span::styled(
                m.as_str().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        } else if let Some(m) = caps.name("code") {
            spans.push(Span::styled(
                m.as_str().to_string(),
                Style::default().fg(Color::Yellow),
            ));
        } else if let Some(m) = caps.name("italic") {
            spans.push(Span::styled(
                m.as_str().to_string(),
                Style::default().add_modifier(Modifier::ITALIC),
            ));
        }
        last = whole.end();
    }

    if last < text.len() {
        spans.push(Span::raw(text[last..].to_string()));
    }
    spans
}

/// Greedy word wrap over already styled spans, so emphasis that crosses a
/// line break keeps its style on both lines. Whitespace runs collapse to a
/// single space. Text glued to a span boundary (`**ATP**.`) never breaks.
pub fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Vec<Span<'static>>> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    let mut gap = false;

    for span in spans {
        for (i, piece) in span.content.split(char::is_whitespace).enumerate() {
            if i > 0 {
                gap = true;
            }
            if piece.is_empty() {
                continue;
            }
            let piece_width = piece.width();
            if gap && used > 0 {
                if used + 1 + piece_width > width {
                    lines.push(std::mem::take(&mut current));
                    used = 0;
                } else {
                    current.push(Span::raw(" "));
                    used += 1;
                }
            }
            current.push(Span::styled(piece.to_string(), span.style));
            used += piece_width;
            gap = false;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
