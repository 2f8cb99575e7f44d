//! # Interaction Decisions
//!
//! Every evaluation ends in exactly one [`Decision`]. Denials carry a fixed
//! message the host forwards to the player before cancelling the interaction.

use serde::{Deserialize, Serialize};

pub const DAILY_RUN_LIMIT_MESSAGE: &str =
    "You have reached the daily run limit for the pyramid mini-game.";
pub const DAILY_ITEM_LIMIT_MESSAGE: &str =
    "You have already picked up the maximum number of items from the pyramid today.";
pub const COOLDOWN_PERIOD_MESSAGE: &str =
    "You have reached the item pickup limit for the current period. Please wait before picking up more items.";

/// Outcome of a single quota evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The interaction proceeds and an item is granted
    Allow,
    /// The player already used every run for today
    DenyDailyRunLimit,
    /// The player already received every item for today
    DenyDailyItemLimit,
    /// A batch of items was completed inside the cooldown window
    DenyCooldownPeriod,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Message to send to the player, `None` when the interaction is allowed.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Decision::Allow => None,
            Decision::DenyDailyRunLimit => Some(DAILY_RUN_LIMIT_MESSAGE),
            Decision::DenyDailyItemLimit => Some(DAILY_ITEM_LIMIT_MESSAGE),
            Decision::DenyCooldownPeriod => Some(COOLDOWN_PERIOD_MESSAGE),
        }
    }

    /// Short machine-readable label, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::DenyDailyRunLimit => "deny_daily_run_limit",
            Decision::DenyDailyItemLimit => "deny_daily_item_limit",
            Decision::DenyCooldownPeriod => "deny_cooldown_period",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
