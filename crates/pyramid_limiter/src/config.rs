//! Configuration records for zones and limits.
//!
//! These are the pieces of the host configuration file the limiter owns:
//! the `[limits]` table and the `[pyramids.<name>]` tables. Reading the file
//! from disk is left to the host.

use crate::error::LimiterError;
use crate::policy::{
    QuotaPolicy, DEFAULT_COOLDOWN_MINUTES, DEFAULT_MAX_ITEMS_PER_DAY,
    DEFAULT_MAX_ITEMS_PER_PERIOD, DEFAULT_MAX_RUNS_PER_DAY,
};
use crate::zones::Zone;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_max_runs_per_day() -> u32 { DEFAULT_MAX_RUNS_PER_DAY }
fn default_max_items_per_day() -> u32 { DEFAULT_MAX_ITEMS_PER_DAY }
fn default_max_items_per_period() -> u32 { DEFAULT_MAX_ITEMS_PER_PERIOD }
fn default_cooldown_minutes() -> u32 { DEFAULT_COOLDOWN_MINUTES as u32 }

/// Gated zones keyed by name, as found under `[pyramids]`.
pub type ZoneConfig = BTreeMap<String, Zone>;

/// Name of the zone written into a freshly generated configuration.
pub const LEGACY_ZONE_NAME: &str = "default";

/// The desert pyramid zone written into generated configurations.
///
/// Its Z bounds are inverted, so it never contains a block until an
/// operator swaps `min_z` and `max_z` in the file.
pub fn legacy_default_zone() -> Zone {
    Zone::new(7800, 7860, 32, 128, -7730, -7780)
}

/// `[limits]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitSettings {
    /// Counted chest runs per player per day
    #[serde(default = "default_max_runs_per_day")]
    pub max_runs_per_day: u32,
    /// Granted items per player per day
    #[serde(default = "default_max_items_per_day")]
    pub max_items_per_day: u32,
    /// Batch size checked against the cooldown window (must be non-zero)
    #[serde(default = "default_max_items_per_period")]
    pub max_items_per_period: u32,
    /// Cooldown window in minutes
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: u32,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            max_runs_per_day: default_max_runs_per_day(),
            max_items_per_day: default_max_items_per_day(),
            max_items_per_period: default_max_items_per_period(),
            cooldown_minutes: default_cooldown_minutes(),
        }
    }
}

impl LimitSettings {
    pub fn validate(&self) -> Result<(), LimiterError> {
        if self.max_items_per_period == 0 {
            return Err(LimiterError::InvalidLimit {
                field: "max_items_per_period",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Validates the settings and turns them into a tracker policy.
    pub fn to_policy(&self) -> Result<QuotaPolicy, LimiterError> {
        self.validate()?;
        Ok(QuotaPolicy {
            max_runs_per_day: self.max_runs_per_day,
            max_items_per_day: self.max_items_per_day,
            max_items_per_period: self.max_items_per_period,
            cooldown_period: Duration::minutes(i64::from(self.cooldown_minutes)),
        })
    }
}

/// Everything the limiter needs to build a [`ChestGuard`](crate::ChestGuard).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PyramidConfig {
    #[serde(default)]
    pub limits: LimitSettings,
    /// Gated zones keyed by an arbitrary name
    #[serde(default)]
    pub pyramids: ZoneConfig,
}

impl PyramidConfig {
    /// Default limits plus the legacy desert pyramid zone.
    pub fn legacy() -> Self {
        let mut pyramids = BTreeMap::new();
        pyramids.insert(LEGACY_ZONE_NAME.to_string(), legacy_default_zone());
        Self {
            limits: LimitSettings::default(),
            pyramids,
        }
    }

    /// Parses a TOML document holding `[limits]` and `[pyramids.*]` tables.
    ///
    /// Limits are validated; inverted zones are accepted.
    pub fn from_toml_str(content: &str) -> Result<Self, LimiterError> {
        let config: PyramidConfig = toml::from_str(content)?;
        config.limits.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, LimiterError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Names of configured zones that can never contain a block.
    pub fn empty_zones(&self) -> Vec<&str> {
        self.pyramids
            .iter()
            .filter(|(_, zone)| zone.is_empty())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
