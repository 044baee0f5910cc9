// Repository card list rendering.
// Provides the card view with loading and empty states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::state::{Card, Phase};

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(" Repositories "));
    frame.render_widget(text, area);
}

/// Two lines per card: name and language, then the description.
fn card_item(card: &Card) -> ListItem<'_> {
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                card.name.as_str(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!(" {} ", card.language),
                Style::default().fg(Color::Black).bg(Color::Gray),
            ),
        ]),
        Line::from(Span::styled(
            format!("  {}", card.description),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

/// Render the current page of repository cards.
pub fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    if app.phase == Phase::Loading {
        render_loading(frame, area, "Loading repositories");
        return;
    }

    let page = &app.page;
    if page.cards.is_empty() {
        let message = if page.total > 0 {
            "No repositories on this page".to_string()
        } else if app.view.is_filtered() {
            format!("No repositories match \"{}\"", app.view.filter)
        } else {
            "No repositories found".to_string()
        };
        render_empty(frame, area, &message);
        return;
    }

    let first = (app.view.current_page - 1) * app.view.page_size + 1;
    let last = first + page.cards.len() - 1;
    let title = format!(" Repositories {}-{} of {} ", first, last, page.total);

    let items: Vec<ListItem> = page.cards.iter().map(card_item).collect();
    let list_widget = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(list_widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_relative_time() {
        let now = Utc::now();
        assert_eq!(format_relative_time(&now), "just now");
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::minutes(5))),
            "5m ago"
        );
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::hours(3))),
            "3h ago"
        );
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::days(2))),
            "2d ago"
        );
    }
}
