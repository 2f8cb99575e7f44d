//! # Chest Guard
//!
//! The adapter a host wires its interaction events into. It filters clicks
//! through the [`ZoneIndex`], runs gated ones through the [`QuotaTracker`]
//! and tells the host whether to cancel the interaction and what to say.
//!
//! ## Interaction Flow
//!
//! ```text
//! InteractEvent { player, block, timestamp? }
//!     ↓
//! block inside any pyramid? ── no ──→ Ignored
//!     ↓ yes
//! timestamp or clock.now()
//!     ↓
//! QuotaTracker::evaluate → Decision
//!     ↓
//! Evaluated { decision } (host cancels + messages on deny)
//! ```

use crate::clock::{Clock, SystemClock};
use crate::config::PyramidConfig;
use crate::decision::Decision;
use crate::error::LimiterError;
use crate::quota::QuotaTracker;
use crate::types::InteractEvent;
use crate::zones::ZoneIndex;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// What the host should do with one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractOutcome {
    /// The block is not inside a pyramid; the limiter has no opinion
    Ignored,
    /// The block is gated and the tracker produced a decision
    Evaluated { decision: Decision },
}

impl InteractOutcome {
    /// Whether the host must cancel the interaction.
    pub fn cancelled(&self) -> bool {
        match self {
            InteractOutcome::Ignored => false,
            InteractOutcome::Evaluated { decision } => !decision.is_allowed(),
        }
    }

    /// Message to forward to the player, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            InteractOutcome::Ignored => None,
            InteractOutcome::Evaluated { decision } => decision.message(),
        }
    }

    pub fn decision(&self) -> Option<Decision> {
        match self {
            InteractOutcome::Ignored => None,
            InteractOutcome::Evaluated { decision } => Some(*decision),
        }
    }

    /// Label used in logs and host output.
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractOutcome::Ignored => "ignored",
            InteractOutcome::Evaluated { decision } => decision.as_str(),
        }
    }
}

/// Snapshot of guard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GuardStats {
    pub events_seen: u64,
    pub ignored: u64,
    pub allowed: u64,
    pub denied_daily_runs: u64,
    pub denied_daily_items: u64,
    pub denied_cooldown: u64,
}

impl GuardStats {
    pub fn denied(&self) -> u64 {
        self.denied_daily_runs + self.denied_daily_items + self.denied_cooldown
    }
}

#[derive(Debug, Default)]
struct Counters {
    events_seen: AtomicU64,
    ignored: AtomicU64,
    allowed: AtomicU64,
    denied_daily_runs: AtomicU64,
    denied_daily_items: AtomicU64,
    denied_cooldown: AtomicU64,
}

impl Counters {
    fn record(&self, decision: Decision) {
        let counter = match decision {
            Decision::Allow => &self.allowed,
            Decision::DenyDailyRunLimit => &self.denied_daily_runs,
            Decision::DenyDailyItemLimit => &self.denied_daily_items,
            Decision::DenyCooldownPeriod => &self.denied_cooldown,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> GuardStats {
        GuardStats {
            events_seen: self.events_seen.load(Ordering::Relaxed),
            ignored: self.ignored.load(Ordering::Relaxed),
            allowed: self.allowed.load(Ordering::Relaxed),
            denied_daily_runs: self.denied_daily_runs.load(Ordering::Relaxed),
            denied_daily_items: self.denied_daily_items.load(Ordering::Relaxed),
            denied_cooldown: self.denied_cooldown.load(Ordering::Relaxed),
        }
    }
}

/// Zone filter, quota tracker and clock composed behind one call.
pub struct ChestGuard {
    zones: ZoneIndex,
    tracker: QuotaTracker,
    clock: Arc<dyn Clock>,
    counters: Counters,
}

impl ChestGuard {
    pub fn new(zones: ZoneIndex, tracker: QuotaTracker, clock: Arc<dyn Clock>) -> Self {
        Self {
            zones,
            tracker,
            clock,
            counters: Counters::default(),
        }
    }

    /// Builds a guard from configuration, reading time from `clock`.
    ///
    /// Zones that can never match are kept and reported with a warning.
    pub fn from_config(config: &PyramidConfig, clock: Arc<dyn Clock>) -> Result<Self, LimiterError> {
        let policy = config.limits.to_policy()?;

        if config.pyramids.is_empty() {
            warn!("🏺 No pyramid zones configured - chest limiter is disabled");
        }
        for name in config.empty_zones() {
            warn!("🏺 Pyramid zone '{}' has inverted bounds and will never match", name);
        }

        Ok(Self::new(
            ZoneIndex::from_config(&config.pyramids),
            QuotaTracker::new(policy),
            clock,
        ))
    }

    /// Same as [`ChestGuard::from_config`] with the system clock.
    pub fn with_system_clock(config: &PyramidConfig) -> Result<Self, LimiterError> {
        Self::from_config(config, Arc::new(SystemClock))
    }

    /// Handles one interaction.
    pub fn on_interact(&self, event: &InteractEvent) -> InteractOutcome {
        self.counters.events_seen.fetch_add(1, Ordering::Relaxed);

        let Some(zone) = self.zones.zone_containing(event.position) else {
            self.counters.ignored.fetch_add(1, Ordering::Relaxed);
            return InteractOutcome::Ignored;
        };

        let now = event.timestamp.unwrap_or_else(|| self.clock.now());
        let decision = self.tracker.evaluate(event.player_id, now);
        self.counters.record(decision);

        if decision.is_allowed() {
            trace!(
                "🏺 Player {} looted chest at {} in '{}'",
                event.player_id, event.position, zone.name
            );
        } else {
            debug!(
                "🏺 Player {} denied at {} in '{}': {}",
                event.player_id, event.position, zone.name, decision
            );
        }

        InteractOutcome::Evaluated { decision }
    }

    pub fn stats(&self) -> GuardStats {
        self.counters.snapshot()
    }

    pub fn zones(&self) -> &ZoneIndex {
        &self.zones
    }

    pub fn tracker(&self) -> &QuotaTracker {
        &self.tracker
    }
}
