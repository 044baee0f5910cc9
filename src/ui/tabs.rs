// Header line: which user is being browsed, and the two tabs.
// The console tab carries a badge counting unread warnings and errors.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::state::Phase;

const TABS: [Tab; 2] = [Tab::Repositories, Tab::Console];

/// Draw the tab bar at the top of the screen.
pub fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles = TABS.map(|tab| tab_title(tab, app.console.unread));
    let selected = TABS.iter().position(|t| *t == app.active_tab);

    let header = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(subject(app))
        .title_alignment(Alignment::Right);

    let widget = Tabs::new(titles)
        .block(header)
        .select(selected.unwrap_or(0))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");

    frame.render_widget(widget, area);
}

fn tab_title(tab: Tab, unread: usize) -> Line<'static> {
    let mut spans = vec![Span::raw(tab.title())];
    if tab == Tab::Console && unread > 0 {
        spans.push(Span::styled(
            format!(" [{}]", unread),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

/// "alice (12 repos)" once loaded.
fn subject(app: &App) -> Line<'static> {
    let detail = match app.phase {
        Phase::Loading => "loading".to_string(),
        Phase::Ready if app.items.len() == 1 => "1 repo".to_string(),
        Phase::Ready => format!("{} repos", app.items.len()),
    };
    Line::from(vec![
        Span::styled(
            app.config.user.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" ({}) ", detail), Style::default().fg(Color::DarkGray)),
    ])
}
