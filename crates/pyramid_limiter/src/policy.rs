//! Limit constants applied by the quota tracker.

use chrono::Duration;

/// Default number of counted chest runs per player per day
pub const DEFAULT_MAX_RUNS_PER_DAY: u32 = 10;
/// Default number of granted items per player per day
pub const DEFAULT_MAX_ITEMS_PER_DAY: u32 = 10;
/// Default batch size checked against the cooldown window
pub const DEFAULT_MAX_ITEMS_PER_PERIOD: u32 = 3;
/// Default cooldown window in minutes
pub const DEFAULT_COOLDOWN_MINUTES: i64 = 10;

/// Per-player limits enforced by [`QuotaTracker`](crate::QuotaTracker).
///
/// `max_items_per_period` must be non-zero; configuration loading rejects
/// zero before a policy is ever built from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPolicy {
    pub max_runs_per_day: u32,
    pub max_items_per_day: u32,
    pub max_items_per_period: u32,
    pub cooldown_period: Duration,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            max_runs_per_day: DEFAULT_MAX_RUNS_PER_DAY,
            max_items_per_day: DEFAULT_MAX_ITEMS_PER_DAY,
            max_items_per_period: DEFAULT_MAX_ITEMS_PER_PERIOD,
            cooldown_period: Duration::minutes(DEFAULT_COOLDOWN_MINUTES),
        }
    }
}
