// Profile panel rendering.

use ratatui::{prelude::*, widgets::*};

use crate::state::ProfileView;

/// Draw the user's profile summary.
pub fn draw_profile(frame: &mut Frame, profile: &ProfileView, area: Rect) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                profile.login.as_str(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", profile.profile_url), label),
        ]),
        Line::from(Span::raw(profile.bio.as_str())),
        Line::from(vec![
            Span::styled("Followers: ", label),
            Span::styled(profile.followers.as_str(), value),
            Span::styled("  Following: ", label),
            Span::styled(profile.following.as_str(), value),
            Span::styled("  Public repos: ", label),
            Span::styled(profile.public_repos.as_str(), value),
        ]),
        Line::from(Span::styled(format!("Avatar: {}", profile.avatar_url), label)),
    ];

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Profile "));
    frame.render_widget(widget, area);
}
