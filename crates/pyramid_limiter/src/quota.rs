//! # Quota Tracker
//!
//! Per-player daily run/item counters and the item cooldown check.
//!
//! ## Evaluation Pipeline
//!
//! Each call to [`QuotaTracker::evaluate`] runs these steps in order, and any
//! step may stop with a denial before the later ones run:
//!
//! 1. Create the player's record on first sight, or reset both counters when
//!    the calendar date changed. Otherwise deny if the run quota is used up.
//! 2. Count the run. A run stays counted even when a later step denies.
//! 3. Deny if the daily item quota is used up.
//! 4. Deny if the last pickup is inside the cooldown window **and** the item
//!    count is a multiple of the per-period batch size.
//! 5. Grant the item and remember when it was picked up.
//!
//! ## Thread Safety
//!
//! Records live in a `DashMap` and the whole pipeline runs while holding the
//! player's entry, so two evaluations for the same player can never
//! interleave. Different players only contend when they share a shard.

use crate::decision::Decision;
use crate::policy::QuotaPolicy;
use crate::types::PlayerId;
use chrono::{NaiveDate, NaiveDateTime};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, trace};

/// Counters kept for one player. Created lazily, never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerQuotaState {
    /// Interactions counted today
    pub run_count: u32,
    /// Items granted today
    pub item_count: u32,
    /// Calendar date of the last counted interaction
    pub last_run_date: NaiveDate,
    /// Time of the last granted item; `None` means never
    pub last_item_pickup: Option<NaiveDateTime>,
}

impl PlayerQuotaState {
    fn new(today: NaiveDate) -> Self {
        Self {
            run_count: 0,
            item_count: 0,
            last_run_date: today,
            last_item_pickup: None,
        }
    }

    // last_item_pickup is kept and still feeds the cooldown check on the new day.
    fn roll_over(&mut self, today: NaiveDate) {
        self.run_count = 0;
        self.item_count = 0;
        self.last_run_date = today;
    }
}

/// Stateful decision engine for chest interactions.
///
/// Callers must only evaluate interactions that already passed the
/// [`ZoneIndex`](crate::ZoneIndex) check; the tracker never looks at
/// locations.
#[derive(Debug)]
pub struct QuotaTracker {
    policy: QuotaPolicy,
    players: DashMap<PlayerId, PlayerQuotaState>,
}

impl QuotaTracker {
    pub fn new(policy: QuotaPolicy) -> Self {
        Self {
            policy,
            players: DashMap::new(),
        }
    }

    /// Creates a tracker with the stock 10 runs / 10 items / 3 per 10 minutes.
    pub fn with_defaults() -> Self {
        Self::new(QuotaPolicy::default())
    }

    pub fn policy(&self) -> &QuotaPolicy {
        &self.policy
    }

    /// Decides whether `player` may loot a chest at local time `now`.
    ///
    /// Never fails: unknown players, and timestamps earlier than a previous
    /// call, still produce a decision. A pickup time in the future yields a
    /// negative elapsed time, which counts as inside the cooldown window.
    pub fn evaluate(&self, player: PlayerId, now: NaiveDateTime) -> Decision {
        let today = now.date();
        let policy = &self.policy;

        let mut state = match self.players.entry(player) {
            Entry::Vacant(vacant) => {
                trace!("🏺 New quota record for player {}", player);
                vacant.insert(PlayerQuotaState::new(today))
            }
            Entry::Occupied(occupied) => {
                let mut state = occupied.into_ref();
                if state.last_run_date != today {
                    debug!(
                        "🏺 Daily rollover for player {} ({} -> {})",
                        player, state.last_run_date, today
                    );
                    state.roll_over(today);
                } else if state.run_count >= policy.max_runs_per_day {
                    return Decision::DenyDailyRunLimit;
                }
                state
            }
        };

        state.run_count += 1;

        if state.item_count >= policy.max_items_per_day {
            return Decision::DenyDailyItemLimit;
        }

        let within_cooldown = state
            .last_item_pickup
            .is_some_and(|last| now.signed_duration_since(last) < policy.cooldown_period);
        let batch_complete = state.item_count.checked_rem(policy.max_items_per_period) == Some(0);
        if within_cooldown && batch_complete {
            return Decision::DenyCooldownPeriod;
        }

        state.item_count += 1;
        state.last_item_pickup = Some(now);
        Decision::Allow
    }

    /// Returns a copy of the player's current record, if one exists.
    pub fn state(&self, player: PlayerId) -> Option<PlayerQuotaState> {
        self.players.get(&player).map(|state| state.value().clone())
    }

    /// Number of players that have interacted at least once.
    pub fn tracked_players(&self) -> usize {
        self.players.len()
    }
}

impl Default for QuotaTracker {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    /// Policy without a cooldown so daily limits can be hit back to back.
    fn no_cooldown() -> QuotaPolicy {
        QuotaPolicy {
            cooldown_period: Duration::zero(),
            ..QuotaPolicy::default()
        }
    }

    #[test]
    fn test_first_interaction_is_allowed() {
        let tracker = QuotaTracker::with_defaults();
        let player = PlayerId::new();

        assert_eq!(tracker.evaluate(player, at(19, 12, 0, 0)), Decision::Allow);

        let state = tracker.state(player).unwrap();
        assert_eq!(state.run_count, 1);
        assert_eq!(state.item_count, 1);
        assert_eq!(state.last_run_date, at(19, 12, 0, 0).date());
        assert_eq!(state.last_item_pickup, Some(at(19, 12, 0, 0)));
    }

    #[test]
    fn test_batch_of_three_triggers_cooldown() {
        let tracker = QuotaTracker::with_defaults();
        let player = PlayerId::new();
        let t0 = at(19, 12, 0, 0);

        for (i, offset) in [0, 1, 2].into_iter().enumerate() {
            let decision = tracker.evaluate(player, t0 + Duration::seconds(offset));
            assert_eq!(decision, Decision::Allow);
            assert_eq!(tracker.state(player).unwrap().item_count, i as u32 + 1);
        }

        let decision = tracker.evaluate(player, t0 + Duration::seconds(3));
        assert_eq!(decision, Decision::DenyCooldownPeriod);

        let state = tracker.state(player).unwrap();
        assert_eq!(state.item_count, 3);
        assert_eq!(state.run_count, 4);
        assert_eq!(state.last_item_pickup, Some(t0 + Duration::seconds(2)));
    }

    #[test]
    fn test_cooldown_lifts_after_window() {
        let tracker = QuotaTracker::with_defaults();
        let player = PlayerId::new();
        let t0 = at(19, 12, 0, 0);

        for offset in 0..3 {
            tracker.evaluate(player, t0 + Duration::seconds(offset));
        }

        let decision = tracker.evaluate(player, t0 + Duration::minutes(11));
        assert_eq!(decision, Decision::Allow);
        assert_eq!(tracker.state(player).unwrap().item_count, 4);
    }

    #[test]
    fn test_cooldown_boundary_is_exclusive() {
        let tracker = QuotaTracker::with_defaults();
        let player = PlayerId::new();
        let t0 = at(19, 12, 0, 0);

        for offset in 0..3 {
            tracker.evaluate(player, t0 + Duration::seconds(offset));
        }

        // Exactly ten minutes after the third pickup is no longer inside the window
        let decision = tracker.evaluate(player, t0 + Duration::seconds(2) + Duration::minutes(10));
        assert_eq!(decision, Decision::Allow);
    }

    #[test]
    fn test_cooldown_only_on_batch_boundary() {
        let tracker = QuotaTracker::with_defaults();
        let player = PlayerId::new();
        let t0 = at(19, 12, 0, 0);

        for offset in 0..3 {
            tracker.evaluate(player, t0 + Duration::seconds(offset));
        }
        assert_eq!(
            tracker.evaluate(player, t0 + Duration::minutes(11)),
            Decision::Allow
        );

        // item_count is 4 now, so pickups inside the window go through until 6
        let t1 = t0 + Duration::minutes(11);
        assert_eq!(tracker.evaluate(player, t1 + Duration::seconds(1)), Decision::Allow);
        assert_eq!(tracker.evaluate(player, t1 + Duration::seconds(2)), Decision::Allow);
        assert_eq!(
            tracker.evaluate(player, t1 + Duration::seconds(3)),
            Decision::DenyCooldownPeriod
        );
        assert_eq!(tracker.state(player).unwrap().item_count, 6);
    }

    #[test]
    fn test_daily_run_limit() {
        let tracker = QuotaTracker::with_defaults();
        let player = PlayerId::new();
        let t0 = at(19, 8, 0, 0);

        // Ten runs spread out so the cooldown never triggers
        for i in 0..10 {
            let decision = tracker.evaluate(player, t0 + Duration::minutes(11 * i));
            assert_eq!(decision, Decision::Allow, "run {} should be allowed", i + 1);
        }
        assert_eq!(tracker.state(player).unwrap().run_count, 10);

        let decision = tracker.evaluate(player, at(19, 23, 0, 0));
        assert_eq!(decision, Decision::DenyDailyRunLimit);
        assert_eq!(tracker.state(player).unwrap().run_count, 10);

        // Still denied, still not counted
        assert_eq!(
            tracker.evaluate(player, at(19, 23, 30, 0)),
            Decision::DenyDailyRunLimit
        );
        assert_eq!(tracker.state(player).unwrap().run_count, 10);
    }

    #[test]
    fn test_daily_item_limit_still_counts_run() {
        let policy = QuotaPolicy {
            max_runs_per_day: 20,
            ..no_cooldown()
        };
        let tracker = QuotaTracker::new(policy);
        let player = PlayerId::new();
        let t0 = at(19, 8, 0, 0);

        for i in 0..10 {
            assert_eq!(
                tracker.evaluate(player, t0 + Duration::seconds(i)),
                Decision::Allow
            );
        }

        let decision = tracker.evaluate(player, t0 + Duration::seconds(10));
        assert_eq!(decision, Decision::DenyDailyItemLimit);

        let state = tracker.state(player).unwrap();
        assert_eq!(state.item_count, 10);
        assert_eq!(state.run_count, 11);
    }

    #[test]
    fn test_new_day_resets_counters() {
        let tracker = QuotaTracker::new(no_cooldown());
        let player = PlayerId::new();

        for i in 0..10 {
            tracker.evaluate(player, at(19, 10, 0, i));
        }
        assert_eq!(
            tracker.evaluate(player, at(19, 11, 0, 0)),
            Decision::DenyDailyRunLimit
        );

        assert_eq!(tracker.evaluate(player, at(20, 9, 0, 0)), Decision::Allow);

        let state = tracker.state(player).unwrap();
        assert_eq!(state.run_count, 1);
        assert_eq!(state.item_count, 1);
        assert_eq!(state.last_run_date, at(20, 9, 0, 0).date());
    }

    #[test]
    fn test_rollover_is_by_calendar_date() {
        let tracker = QuotaTracker::new(no_cooldown());
        let player = PlayerId::new();

        for i in 0..10 {
            tracker.evaluate(player, at(19, 23, 59, i));
        }

        // Two minutes later, but on the next date
        assert_eq!(tracker.evaluate(player, at(20, 0, 1, 0)), Decision::Allow);
        assert_eq!(tracker.state(player).unwrap().run_count, 1);
    }

    #[test]
    fn test_pickup_time_survives_rollover() {
        let tracker = QuotaTracker::with_defaults();
        let player = PlayerId::new();

        tracker.evaluate(player, at(19, 23, 58, 0));

        // Counters reset to zero, which is a batch boundary, and the last
        // pickup is two minutes old
        assert_eq!(
            tracker.evaluate(player, at(20, 0, 0, 0)),
            Decision::DenyCooldownPeriod
        );
        let state = tracker.state(player).unwrap();
        assert_eq!(state.run_count, 1);
        assert_eq!(state.item_count, 0);
    }

    #[test]
    fn test_clock_moving_backwards_still_gates() {
        let tracker = QuotaTracker::with_defaults();
        let player = PlayerId::new();
        let t0 = at(19, 12, 0, 0);

        for offset in 0..3 {
            tracker.evaluate(player, t0 + Duration::seconds(offset));
        }

        let decision = tracker.evaluate(player, t0 - Duration::hours(1));
        assert_eq!(decision, Decision::DenyCooldownPeriod);
    }

    #[test]
    fn test_players_are_independent() {
        let tracker = QuotaTracker::with_defaults();
        let alice = PlayerId::new();
        let bob = PlayerId::new();
        let t0 = at(19, 12, 0, 0);

        for offset in 0..3 {
            tracker.evaluate(alice, t0 + Duration::seconds(offset));
        }
        assert_eq!(
            tracker.evaluate(alice, t0 + Duration::seconds(3)),
            Decision::DenyCooldownPeriod
        );
        assert_eq!(tracker.evaluate(bob, t0 + Duration::seconds(3)), Decision::Allow);
        assert_eq!(tracker.tracked_players(), 2);
    }

    #[test]
    fn test_concurrent_same_player_never_exceeds_limits() {
        use std::sync::Arc;

        let tracker = Arc::new(QuotaTracker::new(no_cooldown()));
        let player = PlayerId::new();
        let now = at(19, 12, 0, 0);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                std::thread::spawn(move || {
                    (0..10)
                        .filter(|_| tracker.evaluate(player, now).is_allowed())
                        .count()
                })
            })
            .collect();

        let allowed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        let state = tracker.state(player).unwrap();

        assert_eq!(allowed, 10);
        assert_eq!(state.item_count, 10);
        assert_eq!(state.run_count, 10);
    }
}
