// UI module for rendering the TUI.
// Contains widgets for tabs, the profile panel, repository cards, and pagination.

mod list;
mod modal;
mod pagination;
mod profile;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, InputMode, Tab};
use crate::state::ConsoleLevel;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);

    match app.active_tab {
        Tab::Repositories => draw_repositories_tab(frame, app, chunks[1]),
        Tab::Console => draw_console_tab(frame, app, chunks[1]),
    }

    draw_status_bar(frame, app, chunks[2]);

    if app.input_mode == InputMode::PageSize {
        modal::draw_page_size_modal(frame, &app.input, app.view.page_size);
    }

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the profile panel, card list, pagination, and filter line.
fn draw_repositories_tab(frame: &mut Frame, app: &App, area: Rect) {
    let show_filter = app.input_mode == InputMode::Filter || app.view.is_filtered();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),                               // Profile
            Constraint::Min(3),                                  // Cards
            Constraint::Length(3),                               // Pagination
            Constraint::Length(if show_filter { 1 } else { 0 }), // Filter input
        ])
        .split(area);

    profile::draw_profile(frame, &app.profile, chunks[0]);
    list::render_cards(frame, app, chunks[1]);
    pagination::draw_pagination(frame, &app.page, chunks[2]);

    if show_filter {
        let editing = app.input_mode == InputMode::Filter;
        let mut spans = vec![
            Span::styled("/", Style::default().fg(Color::Yellow)),
            Span::raw(app.view.filter.as_str()),
        ];
        if editing {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        let filter_widget =
            Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
        frame.render_widget(filter_widget, chunks[3]);
    }
}

/// Draw the Console tab with log messages.
fn draw_console_tab(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Console ");

    if app.console.messages.is_empty() {
        let text = Paragraph::new("No messages")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    // Show newest messages first (reverse order)
    let items: Vec<ListItem> = app
        .console
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let (icon, color) = match msg.level {
                ConsoleLevel::Error => ("❌", Color::Red),
                ConsoleLevel::Warn => ("⚠️", Color::Yellow),
                ConsoleLevel::Info => ("ℹ️", Color::Cyan),
            };

            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", icon)),
                Span::styled(
                    msg.timestamp.format("%H:%M:%S").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::styled(msg.message.clone(), Style::default().fg(color)),
            ]))
        })
        .collect();

    let list_widget = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, area, &mut app.console.list_state);
}

/// Draw the status bar with keybinding hints, rate limit, and cache age.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints = match app.input_mode {
        InputMode::Filter => vec![
            Span::raw(" Type "),
            Span::styled("Filter by name", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵ "),
            Span::styled("Keep", Style::default().fg(Color::DarkGray)),
            Span::raw("  Esc "),
            Span::styled("Clear", Style::default().fg(Color::DarkGray)),
        ],
        InputMode::PageSize => vec![
            Span::raw(" ↵ "),
            Span::styled("Apply", Style::default().fg(Color::DarkGray)),
            Span::raw("  Esc "),
            Span::styled("Cancel", Style::default().fg(Color::DarkGray)),
        ],
        InputMode::Normal => vec![
            Span::raw(" ←→ "),
            Span::styled("Page", Style::default().fg(Color::DarkGray)),
            Span::raw("  / "),
            Span::styled("Filter", Style::default().fg(Color::DarkGray)),
            Span::raw("  p "),
            Span::styled("Page size", Style::default().fg(Color::DarkGray)),
            Span::raw("  Tab "),
            Span::styled("Switch", Style::default().fg(Color::DarkGray)),
            Span::raw("  ? "),
            Span::styled("Help", Style::default().fg(Color::DarkGray)),
            Span::raw("  q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ],
    };

    if let Some(client) = &app.client {
        let rate = client.rate_limit();
        if rate.is_known() {
            let rate_color = if rate.remaining < 10 {
                Color::Red
            } else if rate.remaining < 30 {
                Color::Yellow
            } else {
                Color::DarkGray
            };
            hints.push(Span::styled(
                format!("  API: {}/{}", rate.remaining, rate.limit),
                Style::default().fg(rate_color),
            ));
        }
    }

    if let Some(cached_at) = &app.cached_at {
        hints.push(Span::styled(
            format!("  cached {}", list::format_relative_time(cached_at)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let status = Paragraph::new(Line::from(hints));
    frame.render_widget(status, area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let popup_width = 50.min(area.width);
    let popup_height = 17.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = |keys: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(keys, Style::default().fg(Color::Cyan)),
            Span::raw(action),
        ])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        key("  ←/→ or h/l    ", "Previous / next page"),
        key("  Home/End g/G  ", "First / last page"),
        key("  1-9           ", "Jump to page"),
        key("  /             ", "Filter by name"),
        key("  Esc           ", "Clear filter / close help"),
        key("  p             ", "Set repositories per page"),
        key("  Tab           ", "Switch tabs"),
        key("  ↑/↓ or j/k    ", "Scroll console"),
        key("  ?             ", "Show/hide this help"),
        key("  q             ", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}
