// Console state management.
// Activity log shown in the Console tab, with an unread counter for the badge.

use chrono::{DateTime, Utc};
use ratatui::widgets::ListState;

/// Console message level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Info,
    Warn,
    Error,
}

/// A console message for the activity log.
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ConsoleMessage {
    pub fn new(level: ConsoleLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Message list plus scroll state.
#[derive(Debug, Default)]
pub struct Console {
    pub messages: Vec<ConsoleMessage>,
    /// Warnings and errors logged since the tab was last viewed.
    pub unread: usize,
    pub list_state: ListState,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.record(ConsoleLevel::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.record(ConsoleLevel::Warn, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{}", message);
        self.record(ConsoleLevel::Error, message);
    }

    /// Add a message without emitting a log record.
    pub fn record(&mut self, level: ConsoleLevel, message: impl Into<String>) {
        if level != ConsoleLevel::Info {
            self.unread += 1;
        }
        self.messages.push(ConsoleMessage::new(level, message));
        // Newest is drawn first.
        self.list_state.select(Some(0));
    }

    pub fn mark_read(&mut self) {
        self.unread = 0;
    }

    /// Select the newer neighbour in the list.
    pub fn select_prev(&mut self) {
        if self.messages.is_empty() {
            return;
        }
        let i = self.list_state.selected().unwrap_or(0).saturating_sub(1);
        self.list_state.select(Some(i));
    }

    /// Select the older neighbour in the list.
    pub fn select_next(&mut self) {
        if self.messages.is_empty() {
            return;
        }
        let last = self.messages.len() - 1;
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(last),
            None => 0,
        };
        self.list_state.select(Some(i));
    }
}
