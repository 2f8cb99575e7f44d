//! # Pyramid Host - Main Entry Point
//!
//! Thin host around the pyramid chest limiter. It loads the zone and limit
//! configuration, sets up logging and replays chest interactions through the
//! limiter, printing one JSON outcome per interaction.
//!
//! ## Quick Start
//!
//! ```bash
//! # Read interactions from stdin with pyramids.toml (created if missing)
//! pyramid-host < interactions.jsonl
//!
//! # Replay a recorded log with another config and debug logs
//! pyramid-host --config server.toml --events interactions.jsonl --log-level debug
//!
//! # JSON logging on stderr
//! pyramid-host --json-logs
//! ```
//!
//! ## Event Format
//!
//! One JSON object per line; `timestamp` is optional local time:
//!
//! ```json
//! {"player_id":"550e8400-e29b-41d4-a716-446655440000","x":7810,"y":40,"z":-7750,"timestamp":"2026-10-19T08:30:00"}
//! ```
//!
//! ## Exit Codes
//!
//! * **0**: Event stream ended or shutdown signal received
//! * **1**: Error during startup, configuration, or replay

use tracing::error;

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod signals;

use app::Application;
use cli::CliArgs;
use config::AppConfig;

/// Runs the host: parse CLI, load config, set up logging, replay events.
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Logging settings come from the config file, so peek at it first.
    // A missing file is written later by Application::new, once logs work.
    let mut logging_config = AppConfig::read_from_file(&args.config_path)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
        .logging;
    if let Some(level) = &args.log_level {
        logging_config.level = level.clone();
    }

    if let Err(e) = logging::setup_logging(&logging_config, args.json_logs) {
        eprintln!("❌ Failed to setup logging: {e}");
        std::process::exit(1);
    }

    match Application::new(args).await {
        Ok(app) => {
            if let Err(e) = app.run().await {
                error!("❌ Application error: {:?}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("❌ Failed to start application: {e:?}");
            std::process::exit(1);
        }
    }

    Ok(())
}

pub use config::LoggingSettings;
