//! # Pyramid Limiter
//!
//! Daily and cooldown quotas for loot chests inside pyramid zones.
//!
//! ## Overview
//!
//! A player clicking a chest inside a configured pyramid is checked against
//! three limits before the chest opens:
//!
//! - **Daily runs**: at most 10 counted interactions per calendar day
//! - **Daily items**: at most 10 granted items per calendar day
//! - **Cooldown**: after each batch of 3 items, further pickups inside a
//!   10 minute window are refused
//!
//! Clicks outside every pyramid are not counted at all.
//!
//! ## Example Usage
//!
//! ```rust
//! use pyramid_limiter::{BlockPos, ChestGuard, InteractEvent, PlayerId, PyramidConfig, Zone};
//!
//! let mut config = PyramidConfig::default();
//! config.pyramids.insert("desert".to_string(), Zone::new(0, 10, 0, 10, 0, 10));
//!
//! let guard = ChestGuard::with_system_clock(&config)?;
//! let outcome = guard.on_interact(&InteractEvent::new(PlayerId::new(), BlockPos::new(5, 5, 5)));
//! assert!(!outcome.cancelled());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`zones`] - Inclusive axis-aligned zones and the zone index
//! - [`quota`] - Per-player counters and the evaluation pipeline
//! - [`decision`] - Evaluation outcomes and player-facing messages
//! - [`guard`] - Host adapter composing zones, tracker and clock
//! - [`config`] - Limit and zone configuration records

pub mod clock;
pub mod config;
pub mod decision;
pub mod error;
pub mod guard;
pub mod policy;
pub mod quota;
pub mod types;
pub mod zones;


pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{LimitSettings, PyramidConfig, ZoneConfig};
pub use decision::Decision;
pub use error::LimiterError;
pub use guard::{ChestGuard, GuardStats, InteractOutcome};
pub use policy::QuotaPolicy;
pub use quota::{PlayerQuotaState, QuotaTracker};
pub use types::{BlockPos, InteractEvent, PlayerId};
pub use zones::{NamedZone, Zone, ZoneIndex};
