// Pagination bar rendering.
// One numbered control per page, with the current page highlighted.

use ratatui::{prelude::*, widgets::*};

use crate::state::{PageControl, RenderedPage};

/// Draw the pagination controls for the rendered page.
///
/// When the controls do not fit, a window around the current page is shown.
pub fn draw_pagination(frame: &mut Frame, page: &RenderedPage, area: Rect) {
    let (start, end) = visible_window(&page.controls, area.width.saturating_sub(2) as usize);
    let hidden = |n: usize| if n > 0 { "… " } else { "" };

    let title = match page.controls.iter().find(|c| c.current) {
        Some(current) => format!(" Pages {}/{} ", current.number, page.total_pages()),
        None => " Pages ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title);

    let mut spans = vec![Span::raw(hidden(start))];
    for control in &page.controls[start..end] {
        let style = if control.current {
            Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", control.number), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw(hidden(page.controls.len() - end)));

    let widget = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(widget, area);
}

/// Range of controls that fits in `width` columns, kept around the current page.
fn visible_window(controls: &[PageControl], width: usize) -> (usize, usize) {
    let len = controls.len();
    // " n " plus a gap, sized for the widest number.
    let cell = controls.last().map_or(1, |c| c.number.to_string().len()) + 3;
    // Room for the two overflow markers.
    let capacity = (width.saturating_sub(4) / cell).max(1);
    if len * cell <= width {
        return (0, len);
    }

    let current = controls.iter().position(|c| c.current).unwrap_or(0);
    let start = current.saturating_sub(capacity / 2).min(len - capacity.min(len));
    (start, (start + capacity).min(len))
}
