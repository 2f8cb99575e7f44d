//! Main application logic and lifecycle management.
//!
//! The `Application` owns the configured [`ChestGuard`], replays interaction
//! events from a file or stdin through it and writes one JSON outcome line
//! per event to stdout until the stream ends or a shutdown signal arrives.

use crate::{cli::CliArgs, config::AppConfig, logging::display_banner, signals::setup_signal_handlers};
use pyramid_limiter::{BlockPos, ChestGuard, GuardStats, InteractEvent, PlayerId};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{info, warn};

/// Interval between periodic statistics reports.
const STATS_INTERVAL_SECS: u64 = 60;

/// One line of replay output.
#[derive(Debug, Serialize)]
pub struct OutcomeRecord {
    pub player_id: PlayerId,
    #[serde(flatten)]
    pub position: BlockPos,
    pub outcome: &'static str,
    pub cancelled: bool,
    pub message: Option<&'static str>,
}

/// Counts from a single replay run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Lines turned into outcomes
    pub processed: u64,
    /// Lines that were not valid interaction events
    pub malformed: u64,
}

/// Reads interaction events line by line and writes their outcomes.
///
/// Blank lines are skipped. Lines that fail to parse are logged and
/// skipped; they never stop the replay.
pub async fn replay<R, W>(
    guard: &ChestGuard,
    reader: R,
    writer: &mut W,
) -> Result<ReplaySummary, std::io::Error>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = ReplaySummary::default();
    let mut lines = reader.lines();
    let mut line_number = 0u64;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: InteractEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                warn!("⚠️ Skipping malformed event on line {}: {}", line_number, e);
                summary.malformed += 1;
                continue;
            }
        };

        let outcome = guard.on_interact(&event);
        let record = OutcomeRecord {
            player_id: event.player_id,
            position: event.position,
            outcome: outcome.as_str(),
            cancelled: outcome.cancelled(),
            message: outcome.message(),
        };

        let mut json = serde_json::to_vec(&record)?;
        json.push(b'\n');
        writer.write_all(&json).await?;
        writer.flush().await?;
        summary.processed += 1;
    }

    Ok(summary)
}

/// Main application struct.
pub struct Application {
    /// Loaded application configuration
    config: AppConfig,
    /// Event log to replay; `None` reads stdin
    events_path: Option<PathBuf>,
    /// The limiter every event goes through
    guard: Arc<ChestGuard>,
}

impl Application {
    /// Loads configuration, applies CLI overrides, validates and builds the guard.
    pub async fn new(args: CliArgs) -> Result<Self, Box<dyn std::error::Error>> {
        info!("🔧 Loading configuration from: {}", args.config_path.display());
        let mut config = AppConfig::load_from_file(&args.config_path).await?;

        if let Some(log_level) = args.log_level {
            config.logging.level = log_level;
        }

        if args.json_logs {
            config.logging.json_format = true;
        }

        if let Err(e) = config.validate() {
            return Err(format!("Configuration validation failed: {e}").into());
        } else {
            info!("✅ Configuration loaded and validated successfully");
        }

        display_banner();

        let guard = ChestGuard::with_system_clock(&config.pyramid_config())?;

        info!("🏺 Pyramid chest limiter enabled!");

        Ok(Self {
            config,
            events_path: args.events_path,
            guard: Arc::new(guard),
        })
    }

    /// Replays the event stream until it ends or a shutdown signal arrives.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        self.log_configuration_summary();

        let reader: Box<dyn AsyncBufRead + Unpin + Send> = match &self.events_path {
            Some(path) => {
                info!("📂 Replaying events from {}", path.display());
                Box::new(BufReader::new(tokio::fs::File::open(path).await?))
            }
            None => {
                info!("📂 Reading events from stdin");
                Box::new(BufReader::new(tokio::io::stdin()))
            }
        };

        let monitoring_handle = {
            let guard = Arc::clone(&self.guard);

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(STATS_INTERVAL_SECS));
                let mut last_seen = 0u64;

                loop {
                    interval.tick().await;

                    let stats = guard.stats();
                    info!(
                        "📊 Limiter Health - {} events/min | {} allowed | {} denied | {} players tracked",
                        stats.events_seen - last_seen,
                        stats.allowed,
                        stats.denied(),
                        guard.tracker().tracked_players()
                    );
                    last_seen = stats.events_seen;
                }
            })
        };

        let mut stdout = tokio::io::stdout();
        tokio::select! {
            result = replay(&self.guard, reader, &mut stdout) => {
                let summary = result?;
                info!(
                    "✅ Event stream finished - {} processed, {} malformed",
                    summary.processed, summary.malformed
                );
            }
            signal = setup_signal_handlers() => {
                signal?;
                info!("🛑 Shutdown signal received, stopping replay");
            }
        }

        monitoring_handle.abort();

        log_final_statistics(&self.guard.stats(), self.guard.tracker().tracked_players());
        info!("🏺 Pyramid chest limiter disabled!");

        Ok(())
    }

    fn log_configuration_summary(&self) {
        let limits = &self.config.limits;
        info!("📋 Configuration Summary:");
        info!("  🏺 Pyramids: {}", self.config.pyramids.len());
        for named in self.guard.zones().iter() {
            let zone = &named.zone;
            info!(
                "    - {}: x {}..={} | y {}..={} | z {}..={}",
                named.name, zone.min_x, zone.max_x, zone.min_y, zone.max_y, zone.min_z, zone.max_z
            );
        }
        info!(
            "  📅 Daily: {} runs, {} items",
            limits.max_runs_per_day, limits.max_items_per_day
        );
        info!(
            "  ⏱️ Cooldown: {} items per {} minutes",
            limits.max_items_per_period, limits.cooldown_minutes
        );
    }
}

fn log_final_statistics(stats: &GuardStats, tracked_players: usize) {
    info!("📊 Final Statistics:");
    info!("  - Events seen: {}", stats.events_seen);
    info!("  - Outside pyramids: {}", stats.ignored);
    info!("  - Allowed: {}", stats.allowed);
    info!(
        "  - Denied: {} (runs {}, items {}, cooldown {})",
        stats.denied(),
        stats.denied_daily_runs,
        stats.denied_daily_items,
        stats.denied_cooldown
    );
    info!("  - Players tracked: {}", tracked_players);
}
