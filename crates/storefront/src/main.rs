//! Elegant Boutique - Terminal storefront demo.
//!
//! This binary runs the interactive storefront in the terminal.
//!
//! # Architecture
//!
//! - Ratatui over crossterm for the interface
//! - A keyboard driven catalog browser with filtering and sorting
//! - Cart and theme state persisted to a shared JSON document
//! - A storage watcher that folds writes from other sessions into
//!   this one, last writer wins
//!
//! Logs go to a file under the data directory so the alternate screen
//! stays clean. Set `RUST_LOG` to change verbosity.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use boutique_storefront::cart::CartStore;
use boutique_storefront::catalog::Catalog;
use boutique_storefront::config::StorefrontConfig;
use boutique_storefront::error::Result;
use boutique_storefront::events::{self, UiEvent};
use boutique_storefront::render;
use boutique_storefront::state::App;
use boutique_storefront::storage::{FileStorage, SharedStorage};
use boutique_storefront::theme::ThemePreference;
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

/// Restores the terminal when dropped, including on panic.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn setup_terminal() -> io::Result<(Terminal<CrosstermBackend<io::Stdout>>, TerminalGuard)> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, TerminalGuard))
}

fn main() -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    std::fs::create_dir_all(&config.data_dir)?;
    if let Some(parent) = config.log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // The alternate screen owns stdout, so logs go to a file.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boutique=info,boutique_storefront=info".into()),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    tracing::info!("Elegant Boutique starting");
    tracing::info!("data dir: {}", config.data_dir.display());

    // Subscribe before handing the storage to the stores so that the
    // watcher only reports writes made outside this process.
    let storage = FileStorage::open(config.storage_path())?;
    let storage_events = storage.subscribe();
    let _watcher = storage.spawn_watcher(config.watch_interval);
    let storage: Arc<dyn SharedStorage> = Arc::new(storage);

    let catalog = Arc::new(Catalog::demo());
    let cart = CartStore::open(Arc::clone(&catalog), Arc::clone(&storage));
    let theme = ThemePreference::open(storage);
    let mut app = App::new(catalog, cart, theme);

    let (tx, rx) = mpsc::channel();
    let _input = events::spawn_input_reader(tx.clone());
    let _bridge = events::spawn_storage_bridge(storage_events, tx);

    let (mut terminal, _guard) = setup_terminal()?;
    loop {
        terminal.draw(|frame| render::render_view(frame, &app))?;
        match rx.recv_timeout(Duration::from_millis(200)) {
            Ok(event) => {
                if app.handle_event(event) {
                    break;
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                app.handle_event(UiEvent::Tick);
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    tracing::info!("goodbye");
    Ok(())
}
