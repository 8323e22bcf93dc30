use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct FormLayout {
    pub header_area: Rect,
    pub content_area: Rect,
    pub file_area: Rect,
    pub subject_area: Rect,
    pub difficulty_area: Rect,
    pub count_area: Rect,
    pub answer_length_area: Rect,
    pub generate_area: Rect,
    pub status_area: Rect,
    pub ai_status_area: Rect,
    pub help_area: Rect,
}

pub struct ResultsLayout {
    pub header_area: Rect,
    pub list_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_form_chunks(area: Rect) -> FormLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(area);

    let input_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    let options_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(chunks[3]);

    let footer = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[5]);

    FormLayout {
        header_area: chunks[0],
        content_area: chunks[1],
        file_area: input_row[0],
        subject_area: input_row[1],
        difficulty_area: options_row[0],
        count_area: options_row[1],
        answer_length_area: options_row[2],
        generate_area: options_row[3],
        status_area: chunks[4],
        ai_status_area: footer[0],
        help_area: footer[1],
    }
}

pub fn calculate_results_chunks(area: Rect) -> ResultsLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(area);

    ResultsLayout {
        header_area: chunks[0],
        list_area: chunks[1],
        status_area: chunks[2],
        help_area: chunks[3],
    }
}

/// A rectangle of the given percentages, centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_layout() {
        let area = Rect::new(0, 0, 100, 100);
        let layout = calculate_form_chunks(area);

        // Margin 1 leaves 98 rows; fixed rows take 3+3+3+3+4.
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.content_area.height, 98 - 16);
        assert_eq!(layout.file_area.height, 3);
        assert_eq!(layout.help_area.height, 4);
        assert_eq!(layout.file_area.y, layout.subject_area.y);
        assert!(layout.file_area.width > layout.subject_area.width);
        assert_eq!(layout.difficulty_area.y, layout.generate_area.y);
        assert!(layout.generate_area.x > layout.answer_length_area.x);
    }

    #[test]
    fn test_form_layout_small_terminal_keeps_content_row() {
        let layout = calculate_form_chunks(Rect::new(0, 0, 80, 24));
        assert!(layout.content_area.height >= 5);
        assert_eq!(layout.status_area.height, 3);
    }

    #[test]
    fn test_results_layout() {
        let area = Rect::new(0, 0, 100, 100);
        let layout = calculate_results_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.status_area.height, 3);
        assert_eq!(layout.help_area.height, 4);
        assert_eq!(layout.list_area.height, 98 - 10);
    }

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(50, 20, area);
        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 10);
        assert_eq!(popup.x, 25);
        assert_eq!(popup.y, 20);
    }
}
