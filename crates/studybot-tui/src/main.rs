//! Study Bot dashboard - a terminal admin console for the Study Bot.
//!
//! Polls the bot's statistics endpoint, renders counters and charts, and
//! sends broadcast messages to every registered user.

mod app;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde_json::{json, Map, Value};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use studybot_core::charts::Canvas;
use studybot_core::dashboard::{StatsOutcome, Target};
use studybot_core::{Config, DashboardSession};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file name inside the log directory
const LOG_FILE: &str = "studybot.log";

/// Initialize the tracing subscriber for logging.
///
/// With a log directory, output goes to a file so it cannot corrupt the
/// terminal UI. Without one it goes to stderr.
fn init_tracing(log_dir: Option<PathBuf>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = log_dir.filter(|dir| std::fs::create_dir_all(dir).is_ok());
    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
            None
        }
    }
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {:#}. Using default configuration.", e);
            let mut config = Config::default();
            config.apply_overrides(|key| std::env::var(key).ok());
            config
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = load_config();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--once" {
        let _guard = init_tracing(None);
        return print_snapshot(&config).await;
    }
    if args.len() > 1 && args[1] == "--init-config" {
        let _guard = init_tracing(None);
        let path = config.save()?;
        eprintln!("Configuration written to {}", path.display());
        return Ok(());
    }

    // Initialize logging; keep the guard alive so buffered lines are flushed
    let _guard = init_tracing(config.log_dir().ok());
    info!(base_url = %config.base_url, "Study Bot dashboard starting");

    // Create app before touching the terminal so config errors print normally
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start();

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    app.session.stop();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Study Bot dashboard shutting down");
    Ok(())
}

/// Fetch statistics once and print what the dashboard would display as JSON
async fn print_snapshot(config: &Config) -> Result<()> {
    eprintln!("Fetching statistics from {}...", config.base_url);
    let snapshot = build_snapshot(config).await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Load statistics once. Fails unless they were rendered.
async fn build_snapshot(config: &Config) -> Result<Value> {
    let mut session = DashboardSession::from_config(config)?;

    match session.load_stats().await {
        StatsOutcome::Applied => {}
        StatsOutcome::Failed => {
            let message = session
                .view
                .blocking_alert
                .take()
                .unwrap_or_else(|| session.locale().stats_load_failed().to_string());
            return Err(anyhow!(message));
        }
        StatsOutcome::Stale => return Err(anyhow!("Stats response was superseded")),
    }

    let mut targets = Map::new();
    for target in Target::ALL {
        targets.insert(
            target.element_id().to_string(),
            Value::String(session.view.text_or_placeholder(target).to_string()),
        );
    }

    let mut charts = Map::new();
    for canvas in Canvas::ALL {
        match session.charts.spec(canvas) {
            Some(spec) => {
                charts.insert(canvas.element_id().to_string(), serde_json::to_value(spec)?);
            }
            None => warn!(canvas = canvas.element_id(), "Chart was not drawn"),
        }
    }

    Ok(json!({
        "targets": targets,
        "top_users": serde_json::to_value(&session.view.top_users)?,
        "charts": charts,
        "footer_year": session.view.footer_year(),
    }))
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key) {
                    return Ok(());
                }
            }
        }

        // Check for completed background tasks
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATS_JSON: &str = r#"{
        "users": {"total": 42, "active": 30, "groups": 3},
        "schedules": {"morning": 12, "evening": 9, "custom": 4, "none": 5},
        "points": {"total": 1500},
        "achievements": {
            "completed_days": 12,
            "avg_points": 25.5,
            "top_users": [{"name": "Ahmed", "points": 75}, {"name": "Sara", "points": 45}]
        },
        "activity": [
            {"date": "2025-05-02", "study": 7, "prayer": 10, "other": 3},
            {"date": "2025-05-01", "study": 5, "prayer": 8, "other": 2}
        ]
    }"#;

    #[tokio::test]
    async fn test_snapshot_contains_targets_and_charts() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/stats")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(STATS_JSON)
            .create_async()
            .await;

        let config = Config {
            base_url: server.url(),
            ..Config::default()
        };
        let snapshot = build_snapshot(&config).await.expect("snapshot");

        assert_eq!(snapshot["targets"]["total-users"], "42");
        assert_eq!(snapshot["targets"]["avg-points"], "25.5");
        assert!(snapshot["charts"].get("activity-chart").is_some());
        assert_eq!(snapshot["top_users"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_snapshot_fails_when_backend_unreachable() {
        let config = Config {
            base_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let err = build_snapshot(&config).await.expect_err("should fail");
        assert_eq!(err.to_string(), config.locale.stats_load_failed());
    }

    #[tokio::test]
    async fn test_snapshot_fails_on_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/stats")
            .with_status(500)
            .create_async()
            .await;

        let config = Config {
            base_url: server.url(),
            ..Config::default()
        };
        assert!(build_snapshot(&config).await.is_err());
    }
}
