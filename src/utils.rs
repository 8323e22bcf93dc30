pub mod markdown;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Editable single- or multi-line text with a cursor.
///
/// The cursor is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.value[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
            self.value.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.value[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.value[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = self.value[..self.cursor].rfind('\n').map_or(0, |i| i + 1);
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value[self.cursor..]
            .find('\n')
            .map_or(self.value.len(), |i| self.cursor + i);
    }
}

/// Shortens `s` to at most `max_width` columns, ending with "..." when cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

/// A visual line after wrapping: the byte range of `text` it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VisualLine {
    start: usize,
    end: usize,
}

/// Breaks `text` into visual lines of at most `max_width` columns, honouring
/// explicit newlines. Character-level wrapping, matching how the input boxes
/// are rendered.
fn wrap_lines(text: &str, max_width: usize) -> Vec<VisualLine> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    let mut start = 0;
    let mut width = 0;

    for (idx, ch) in text.char_indices() {
        if ch == '\n' {
            lines.push(VisualLine { start, end: idx });
            start = idx + 1;
            width = 0;
            continue;
        }
        let w = ch.width().unwrap_or(0);
        if width + w > max_width && width > 0 {
            lines.push(VisualLine { start, end: idx });
            start = idx;
            width = 0;
        }
        width += w;
    }
    lines.push(VisualLine {
        start,
        end: text.len(),
    });
    lines
}

/// Returns (line, column) of the cursor once `text` is wrapped to
/// `max_width` columns. The cursor is a byte offset into `text`.
pub fn calculate_wrapped_cursor_position(
    text: &str,
    cursor_index: usize,
    max_width: usize,
) -> (usize, usize) {
    let cursor_index = cursor_index.min(text.len());
    let lines = wrap_lines(text, max_width);

    let mut found = (0, 0);
    for (line_idx, line) in lines.iter().enumerate() {
        if cursor_index >= line.start && cursor_index <= line.end {
            let col = text[line.start..cursor_index].width();
            found = (line_idx, col);
            // A cursor sitting exactly on a soft wrap belongs to the next line
            // only when that line starts at the same offset; keep scanning.
            if cursor_index < line.end {
                break;
            }
        }
    }

    // Past the right edge: show the cursor at the start of the next line.
    if found.1 >= max_width.max(1) {
        return (found.0 + 1, 0);
    }
    found
}

/// The visual lines of `text`, split exactly where the cursor arithmetic
/// above expects them.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<&str> {
    wrap_lines(text, max_width)
        .into_iter()
        .map(|line| &text[line.start..line.end])
        .collect()
}

/// Scroll offset that keeps `cursor_line` inside a window of
/// `visible_height` lines, starting from the current offset.
pub fn follow_cursor(current: u16, cursor_line: usize, visible_height: usize) -> u16 {
    let visible_height = visible_height.max(1);
    let mut scroll = current as usize;
    if cursor_line < scroll {
        scroll = cursor_line;
    } else if cursor_line >= scroll + visible_height {
        scroll = cursor_line + 1 - visible_height;
    }
    scroll as u16
}
