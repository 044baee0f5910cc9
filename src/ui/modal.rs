// Modal UI components.
// Page size prompt drawn on top of the current view.

use ratatui::{prelude::*, widgets::*};

/// Page sizes offered as hints in the prompt.
const SUGGESTED_SIZES: [usize; 4] = [5, 10, 20, 50];

/// Draw the page size prompt.
pub fn draw_page_size_modal(frame: &mut Frame, input: &str, current: usize) {
    let area = frame.area();

    let modal_width = 44.min(area.width);
    let modal_height = 6.min(area.height);
    let modal_x = (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = (area.height.saturating_sub(modal_height)) / 2;

    let modal_area = Rect::new(modal_x, modal_y, modal_width, modal_height);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let suggestions = SUGGESTED_SIZES
        .iter()
        .map(|size| size.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let lines = vec![
        Line::from(vec![
            Span::styled("Per page: ", Style::default().fg(Color::DarkGray)),
            Span::raw(input),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::styled(
            format!("Current: {}  Common: {}", current, suggestions),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled(" Enter", Style::default().fg(Color::Yellow)),
            Span::styled(" = Apply  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" = Cancel ", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Page Size "),
    );
    frame.render_widget(widget, modal_area);
}
