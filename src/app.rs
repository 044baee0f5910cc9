// App state and main event loop.
// Bootstraps the fetch, owns the repository list, and maps keys to view changes.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;
use crate::github::{GitHubClient, Item, Profile};
use crate::state::{
    Console, ConsoleLevel, Phase, ProfileView, RenderedPage, ViewState, render_view,
};
use crate::ui;

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Repositories,
    Console,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Repositories => "Repositories",
            Tab::Console => "Console",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Repositories => Tab::Console,
            Tab::Console => Tab::Repositories,
        }
    }
}

/// What keystrokes currently edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Filter,
    PageSize,
}

/// Result of the joined profile and repository fetches.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Both fetches settled; either may be unavailable.
    Fetched {
        profile: Option<Profile>,
        items: Option<Vec<Item>>,
        /// Why each unavailable fetch failed.
        errors: Vec<String>,
    },
    /// A fetch task died before settling.
    Failed(String),
}

/// Keep the data, or record why it is unavailable.
fn settle<T>(result: Result<T>, errors: &mut Vec<String>) -> Option<T> {
    result.map_err(|e| errors.push(e.to_string())).ok()
}

/// Fetch profile and repositories concurrently and wait for both.
pub async fn fetch_all(client: Arc<GitHubClient>, user: String) -> FetchOutcome {
    let profile_task = tokio::spawn({
        let client = Arc::clone(&client);
        let user = user.clone();
        async move { client.fetch_profile(&user).await }
    });
    let items_task = tokio::spawn(async move { client.fetch_items(&user).await });

    match tokio::try_join!(profile_task, items_task) {
        Ok((profile, items)) => {
            let mut errors = Vec::new();
            let profile = settle(profile, &mut errors);
            let items = settle(items, &mut errors);
            FetchOutcome::Fetched {
                profile,
                items,
                errors,
            }
        }
        Err(e) => FetchOutcome::Failed(e.to_string()),
    }
}

/// Main application state.
pub struct App {
    pub config: Config,
    /// Currently active tab.
    pub active_tab: Tab,
    pub phase: Phase,
    pub profile: ProfileView,
    /// Full repository list as last fetched or loaded from cache.
    pub items: Vec<Item>,
    pub view: ViewState,
    /// Page currently on screen, rebuilt on every view change.
    pub page: RenderedPage,
    pub console: Console,
    pub input_mode: InputMode,
    /// Text being typed in the page size prompt.
    pub input: String,
    /// When the shown list was written to or read from the cache.
    pub cached_at: Option<DateTime<Utc>>,
    pub client: Option<Arc<GitHubClient>>,
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    cache: CacheStore,
    runtime: Handle,
    fetch_rx: Option<mpsc::UnboundedReceiver<FetchOutcome>>,
    warned_empty: bool,
}

impl App {
    pub fn new(config: Config, cache: CacheStore, runtime: Handle) -> Result<Self> {
        let client = if config.offline {
            None
        } else {
            Some(Arc::new(GitHubClient::new(
                &config.api_base,
                config.token.as_deref(),
            )?))
        };
        let view = ViewState::new(config.page_size);

        Ok(Self {
            config,
            active_tab: Tab::default(),
            phase: Phase::Loading,
            profile: ProfileView::loading(),
            items: Vec::new(),
            view,
            page: RenderedPage::default(),
            console: Console::new(),
            input_mode: InputMode::Normal,
            input: String::new(),
            cached_at: None,
            client,
            show_help: false,
            should_quit: false,
            cache,
            runtime,
            fetch_rx: None,
            warned_empty: false,
        })
    }

    /// Start loading: spawn both fetches, or read the cache when offline.
    pub fn bootstrap(&mut self) {
        let user = self.config.user.clone();
        self.profile = ProfileView::loading();

        let Some(client) = self.client.clone() else {
            self.load_from_cache();
            return;
        };

        self.console
            .info(format!("Fetching {} from {}", user, client.base_url()));
        let (tx, rx) = mpsc::unbounded_channel();
        self.fetch_rx = Some(rx);
        self.runtime.spawn(async move {
            let outcome = fetch_all(client, user).await;
            let _ = tx.send(outcome);
        });
    }

    fn load_from_cache(&mut self) {
        self.profile = ProfileView::from_profile(None);
        match self.cache.read_items(&self.config.user) {
            Ok(cached) => {
                self.console.info(format!(
                    "Loaded {} cached repositories",
                    cached.data.len()
                ));
                self.items = cached.data;
                self.cached_at = Some(cached.cached_at);
            }
            Err(e) => self.console.error(format!("Error reading cache: {}", e)),
        }
        self.phase = Phase::Ready;
        self.rerender();
    }

    /// Move to Ready with the fetched data. A failed join keeps the app loading.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        let (profile, items) = match outcome {
            FetchOutcome::Fetched {
                profile,
                items,
                errors,
            } => {
                // Already logged by the client.
                for e in errors {
                    self.console
                        .record(ConsoleLevel::Error, format!("Error fetching user data: {}", e));
                }
                (profile, items)
            }
            FetchOutcome::Failed(e) => {
                self.console
                    .error(format!("Error fetching user data: {}", e));
                return;
            }
        };

        self.profile = ProfileView::from_profile(profile.as_ref());

        match items {
            Some(items) => {
                match self.cache.write_items(&self.config.user, &items) {
                    Ok(()) => self.cached_at = Some(Utc::now()),
                    Err(e) => self.console.error(format!("Error writing cache: {}", e)),
                }
                self.items = items;
            }
            None => self
                .console
                .warn("Repository list unavailable; cache left untouched"),
        }

        self.phase = Phase::Ready;
        self.rerender();
    }

    /// Apply a finished fetch if one has arrived.
    fn poll_fetch(&mut self) {
        let outcome = match self.fetch_rx.as_mut().map(|rx| rx.try_recv()) {
            Some(Ok(outcome)) => outcome,
            Some(Err(mpsc::error::TryRecvError::Disconnected)) => {
                self.fetch_rx = None;
                return;
            }
            _ => return,
        };
        self.fetch_rx = None;
        self.apply_outcome(outcome);
    }

    #[cfg(test)]
    pub(crate) async fn recv_fetch(&mut self) -> Option<FetchOutcome> {
        self.fetch_rx.as_mut()?.recv().await
    }

    /// Rebuild the visible page from the in-memory list.
    fn rerender(&mut self) {
        self.page = render_view(&self.items, &self.view);

        if self.page.total == 0 {
            if !self.warned_empty {
                let message = if self.view.is_filtered() {
                    format!("No repositories match \"{}\"", self.view.filter)
                } else {
                    "No repositories found for the user.".to_string()
                };
                self.console.record(ConsoleLevel::Warn, message);
                self.warned_empty = true;
            }
        } else {
            self.warned_empty = false;
        }
    }

    /// Activate a pagination control.
    pub fn select_page(&mut self, page: usize) {
        if self.phase != Phase::Ready || page == 0 || page > self.page.total_pages() {
            return;
        }
        self.view.select_page(page);
        self.rerender();
    }

    pub fn next_page(&mut self) {
        self.select_page(self.view.current_page + 1);
    }

    pub fn prev_page(&mut self) {
        self.select_page(self.view.current_page.saturating_sub(1));
    }

    /// Apply a name filter typed by the user.
    pub fn apply_filter(&mut self, query: &str) {
        self.view.set_filter(query);
        if self.phase == Phase::Ready {
            self.rerender();
        }
    }

    /// Apply a page size typed by the user.
    pub fn apply_page_size(&mut self, value: &str) {
        match self.view.set_page_size(value) {
            Ok(size) => {
                self.console.info(format!("Showing {} repositories per page", size));
                if self.phase == Phase::Ready {
                    self.rerender();
                }
            }
            Err(e) => self.console.warn(e.to_string()),
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        self.bootstrap();
        while !self.should_quit {
            self.poll_fetch();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key.code),
            InputMode::Filter => self.handle_filter_key(key.code),
            InputMode::PageSize => self.handle_page_size_key(key.code),
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) {
        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab | KeyCode::BackTab => {
                self.active_tab = self.active_tab.next();
                if self.active_tab == Tab::Console {
                    self.console.mark_read();
                }
            }
            KeyCode::Up | KeyCode::Char('k') if self.active_tab == Tab::Console => {
                self.console.select_prev()
            }
            KeyCode::Down | KeyCode::Char('j') if self.active_tab == Tab::Console => {
                self.console.select_next()
            }
            _ if self.active_tab == Tab::Console => {}
            KeyCode::Left | KeyCode::Char('h') => self.prev_page(),
            KeyCode::Right | KeyCode::Char('l') => self.next_page(),
            KeyCode::Home | KeyCode::Char('g') => self.select_page(1),
            KeyCode::End | KeyCode::Char('G') => self.select_page(self.page.total_pages()),
            KeyCode::Char(c @ '1'..='9') => {
                self.select_page(c.to_digit(10).map_or(0, |d| d as usize))
            }
            KeyCode::Char('/') => self.input_mode = InputMode::Filter,
            KeyCode::Char('p') => {
                self.input = self.view.page_size.to_string();
                self.input_mode = InputMode::PageSize;
            }
            KeyCode::Esc if self.view.is_filtered() => self.apply_filter(""),
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.apply_filter("");
            }
            KeyCode::Backspace => {
                let mut query = self.view.filter.clone();
                query.pop();
                self.apply_filter(&query);
            }
            KeyCode::Char(c) => {
                let query = format!("{}{}", self.view.filter, c);
                self.apply_filter(&query);
            }
            _ => {}
        }
    }

    fn handle_page_size_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                let value = std::mem::take(&mut self.input);
                self.input_mode = InputMode::Normal;
                self.apply_page_size(&value);
            }
            KeyCode::Esc => {
                self.input.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::test_server::{self, Route};
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn config(user: &str, api_base: &str) -> Config {
        Config {
            user: user.to_string(),
            page_size: 10,
            api_base: api_base.to_string(),
            token: None,
            offline: false,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn repos_json(n: usize) -> String {
        let items: Vec<String> = (1..=n)
            .map(|i| format!(r#"{{"name":"repo-{}","language":"Rust"}}"#, i))
            .collect();
        format!("[{}]", items.join(","))
    }

    fn ready_app(temp_dir: &TempDir, n: usize) -> App {
        let mut app = App::new(
            config("alice", "http://127.0.0.1:9"),
            CacheStore::at(temp_dir.path()),
            Handle::current(),
        )
        .unwrap();
        let items = (1..=n).map(|i| Item::new(format!("repo-{}", i))).collect();
        app.apply_outcome(FetchOutcome::Fetched {
            profile: None,
            items: Some(items),
            errors: Vec::new(),
        });
        app
    }

    #[tokio::test]
    async fn test_bootstrap_end_to_end() {
        let base = test_server::spawn(vec![
            Route::ok("/users/alice", r#"{"login":"alice","followers":5}"#),
            Route::ok("/users/alice/repos", repos_json(12)),
        ])
        .await;
        let temp_dir = TempDir::new().unwrap();
        let mut app = App::new(
            config("alice", &base),
            CacheStore::at(temp_dir.path()),
            Handle::current(),
        )
        .unwrap();

        app.bootstrap();
        assert_eq!(app.phase, Phase::Loading);
        assert_eq!(app.profile.followers, "Loading...");

        let outcome = app.recv_fetch().await.unwrap();
        app.apply_outcome(outcome);

        assert_eq!(app.phase, Phase::Ready);
        assert_eq!(app.page.cards.len(), 10);
        assert_eq!(app.page.total_pages(), 2);
        assert_eq!(app.profile.followers, "5");
        assert_eq!(app.profile.login, "alice");

        let cached = CacheStore::at(temp_dir.path()).read_items("alice").unwrap();
        assert_eq!(cached.data.len(), 12);
        assert!(app.cached_at.is_some());
    }

    #[tokio::test]
    async fn test_fetch_errors_reach_console() {
        let base = test_server::spawn(vec![
            Route::status("/users/alice", 403, r#"{"message":"API rate limit exceeded"}"#),
            Route::status("/users/alice/repos", 403, r#"{"message":"API rate limit exceeded"}"#),
        ])
        .await;
        let temp_dir = TempDir::new().unwrap();
        let mut app = App::new(
            config("alice", &base),
            CacheStore::at(temp_dir.path()),
            Handle::current(),
        )
        .unwrap();

        app.bootstrap();
        let outcome = app.recv_fetch().await.unwrap();
        app.apply_outcome(outcome);

        assert_eq!(app.phase, Phase::Ready);
        assert_eq!(app.profile.login, "Username");
        let errors: Vec<&str> = app
            .console
            .messages
            .iter()
            .filter(|m| m.level == ConsoleLevel::Error)
            .map(|m| m.message.as_str())
            .collect();
        assert_eq!(errors.len(), 2);
        assert!(
            errors
                .iter()
                .all(|m| m.starts_with("Error fetching user data:") && m.contains("403"))
        );
    }

    #[tokio::test]
    async fn test_fetches_run_concurrently() {
        // Neither response is sent until both requests have arrived.
        let base = test_server::spawn_gated(
            vec![
                Route::ok("/users/alice", r#"{"login":"alice"}"#),
                Route::ok("/users/alice/repos", repos_json(3)),
            ],
            2,
        )
        .await;
        let client = Arc::new(GitHubClient::new(&base, None).unwrap());

        let outcome = tokio::time::timeout(
            Duration::from_secs(10),
            fetch_all(client, "alice".to_string()),
        )
        .await
        .expect("fetches did not overlap");

        match outcome {
            FetchOutcome::Fetched {
                profile,
                items,
                errors,
            } => {
                assert!(errors.is_empty(), "{:?}", errors);
                assert_eq!(profile.and_then(|p| p.login).as_deref(), Some("alice"));
                assert_eq!(items.map(|items| items.len()), Some(3));
            }
            FetchOutcome::Failed(e) => panic!("join failed: {}", e),
        }
    }

    #[tokio::test]
    async fn test_failed_join_stays_loading() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = App::new(
            config("alice", "http://127.0.0.1:9"),
            CacheStore::at(temp_dir.path()),
            Handle::current(),
        )
        .unwrap();

        app.apply_outcome(FetchOutcome::Failed("task panicked".to_string()));
        assert_eq!(app.phase, Phase::Loading);
        assert_eq!(app.console.unread, 1);
    }

    #[tokio::test]
    async fn test_unavailable_items_keep_cache() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::at(temp_dir.path());
        store.write_items("alice", &[Item::new("kept")]).unwrap();

        let mut app = App::new(
            config("alice", "http://127.0.0.1:9"),
            store.clone(),
            Handle::current(),
        )
        .unwrap();
        app.apply_outcome(FetchOutcome::Fetched {
            profile: None,
            items: None,
            errors: Vec::new(),
        });

        assert_eq!(app.phase, Phase::Ready);
        assert!(app.page.cards.is_empty());
        assert_eq!(app.profile.login, "Username");
        assert_eq!(store.read_items("alice").unwrap().data, vec![Item::new("kept")]);
    }

    #[tokio::test]
    async fn test_offline_reads_cache() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::at(temp_dir.path());
        store
            .write_items("alice", &[Item::new("one"), Item::new("two")])
            .unwrap();

        let mut offline = config("alice", "http://127.0.0.1:9");
        offline.offline = true;
        let mut app = App::new(offline, store, Handle::current()).unwrap();
        assert!(app.client.is_none());

        app.bootstrap();
        assert_eq!(app.phase, Phase::Ready);
        assert_eq!(app.page.cards.len(), 2);
        assert!(app.cached_at.is_some());
    }

    #[tokio::test]
    async fn test_offline_cache_miss_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let mut offline = config("nobody", "http://127.0.0.1:9");
        offline.offline = true;
        let mut app = App::new(offline, CacheStore::at(temp_dir.path()), Handle::current()).unwrap();

        app.bootstrap();
        assert_eq!(app.phase, Phase::Ready);
        assert!(app.items.is_empty());
        assert!(
            app.console
                .messages
                .iter()
                .any(|m| m.level == ConsoleLevel::Error)
        );
    }

    #[tokio::test]
    async fn test_page_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = ready_app(&temp_dir, 25);

        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.view.current_page, 2);
        assert_eq!(app.page.cards[0].name, "repo-11");

        app.handle_key(key(KeyCode::End));
        assert_eq!(app.view.current_page, 3);
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.view.current_page, 3);

        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.view.current_page, 2);
        // No control for page 9.
        app.handle_key(key(KeyCode::Char('9')));
        assert_eq!(app.view.current_page, 2);

        app.handle_key(key(KeyCode::Home));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.view.current_page, 1);
    }

    #[tokio::test]
    async fn test_filter_typing() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = ready_app(&temp_dir, 25);
        app.handle_key(key(KeyCode::Right));

        app.handle_key(key(KeyCode::Char('/')));
        for c in "REPO-2".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(app.input_mode, InputMode::Filter);
        assert_eq!(app.view.current_page, 1);
        // repo-2, repo-20..repo-25
        assert_eq!(app.page.total, 7);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);

        // Filter survives a page change.
        app.apply_page_size("3");
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.view.current_page, 2);
        assert_eq!(app.page.total, 7);
        assert_eq!(app.page.cards[0].name, "repo-22");

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.view.is_filtered());
        assert_eq!(app.page.total, 25);
    }

    #[tokio::test]
    async fn test_filter_without_match_shows_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = ready_app(&temp_dir, 25);
        app.select_page(3);

        app.apply_filter("nothing-like-this");
        assert!(app.page.cards.is_empty());
        assert!(app.page.controls.is_empty());
    }

    #[tokio::test]
    async fn test_page_size_prompt() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = ready_app(&temp_dir, 12);
        app.handle_key(key(KeyCode::Right));

        app.handle_key(key(KeyCode::Char('p')));
        assert_eq!(app.input, "10");
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Char('5')));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.view.page_size, 5);
        assert_eq!(app.view.current_page, 1);
        assert_eq!(app.page.total_pages(), 3);

        // Garbage is rejected and the size kept.
        app.handle_key(key(KeyCode::Char('p')));
        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.view.page_size, 5);
        assert!(
            app.console
                .messages
                .iter()
                .any(|m| m.level == ConsoleLevel::Warn)
        );
    }

    #[tokio::test]
    async fn test_console_tab_clears_badge() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = ready_app(&temp_dir, 0);
        assert_eq!(app.console.unread, 1);

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.active_tab, Tab::Console);
        assert_eq!(app.console.unread, 0);

        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.view.current_page, 1);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
