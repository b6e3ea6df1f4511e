use structlog_view::adapters::TungsteniteConnector;
use structlog_view::app::App;
use structlog_view::cli::{parse_args, run_cli_command, USAGE};
use structlog_view::config::{spawn_config_watcher, ConfigSource};
use structlog_view::logging::init_logging;
use structlog_view::terminal::{setup_panic_hook, TerminalManager};
use structlog_view::ui;

use chrono::Utc;
use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Redraw cadence while the metric chart scrolls
const TICK_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let options = match run_cli_command(parse_args(std::env::args())) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}\n\n{}", message, USAGE);
            std::process::exit(2);
        }
    };

    color_eyre::install()?;
    init_logging();

    let source = match options.config_path {
        Some(path) => ConfigSource::new(path, options.overrides),
        None => ConfigSource::default_location(options.overrides)?,
    };
    let config = source.load()?;
    info!(
        "Starting structlog-view in {} mode against {}",
        config.mode, config.endpoint
    );

    // Setup panic hook to ensure terminal cleanup on panic
    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async {
        let mut app = App::new(source, config, Arc::new(TungsteniteConnector::default()));
        let mut term_manager = TerminalManager::new()?;
        let result = run_app(&mut term_manager, &mut app).await;
        app.quit();
        term_manager.restore();
        result
    });

    if let Err(e) = &result {
        error!("Exiting with error: {}", e);
    }
    result
}

async fn run_app(term_manager: &mut TerminalManager, app: &mut App) -> Result<()> {
    app.start();

    // Dropping the watcher stops it, so hold it for the whole loop
    let _watcher = spawn_config_watcher(&app.source.path, app.message_tx.clone());

    let mut event_stream = EventStream::new();
    let mut message_rx = app.message_rx.take();
    let mut tick = tokio::time::interval(TICK_INTERVAL);

    loop {
        if app.needs_redraw {
            term_manager.terminal().draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = tick.tick() => {
                app.tick(Utc::now());
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => app.quit(),
                }
            }

            Some(msg) = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                app.handle_message(msg, Utc::now());
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
