// folio: browse a GitHub user's profile and repositories in the terminal.

mod app;
mod cache;
mod config;
mod error;
mod github;
mod state;
mod ui;

use std::fs::{self, OpenOptions};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::cache::CacheStore;
use crate::config::{Cli, Config};

/// Send log records to the cache directory; the terminal belongs to the UI.
fn init_logging() {
    let Some(path) = cache::paths::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "folio=info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("folio: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("folio: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> error::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let cache = CacheStore::from_env()?;
    tracing::info!(user = %config.user, offline = config.offline, "starting");

    let mut app = App::new(config, cache, runtime.handle().clone())?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result?;
    Ok(())
}
