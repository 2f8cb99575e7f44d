//! # Core Types
//!
//! Identity, position and event types shared by the zone index, the quota
//! tracker and the host adapter.
//!
//! - [`PlayerId`] - Stable opaque player identity
//! - [`BlockPos`] - Integer block coordinates of an interacted object
//! - [`InteractEvent`] - One player/chest interaction as delivered by a host

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player.
///
/// Wraps a UUID so player ids cannot be confused with any other identifier
/// and can be used directly as a map key.
///
/// # Examples
///
/// ```rust
/// use pyramid_limiter::PlayerId;
///
/// let player_id = PlayerId::from_str("550e8400-e29b-41d4-a716-446655440000")?;
/// println!("Player ID: {}", player_id);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Creates a new random player ID using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a player ID from its hyphenated UUID form.
    pub fn from_str(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::str::FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s)
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer block coordinates in the game world.
///
/// Chests sit on whole blocks, so every containment test works on the block
/// the player clicked rather than on a floating point position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    /// X coordinate (east-west axis)
    pub x: i32,
    /// Y coordinate (vertical axis)
    pub y: i32,
    /// Z coordinate (north-south axis)
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl std::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A player interacting with a block that may be a gated chest.
///
/// Hosts deliver one of these per click. The optional `timestamp` lets a
/// replayed event log carry its own time; live hosts leave it unset and the
/// guard's clock is used instead.
///
/// ```json
/// {"player_id":"550e8400-e29b-41d4-a716-446655440000","x":7810,"y":40,"z":-7750}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractEvent {
    /// Player performing the interaction
    pub player_id: PlayerId,
    /// Coordinates of the clicked block
    #[serde(flatten)]
    pub position: BlockPos,
    /// Local wall-clock time of the interaction, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
}

impl InteractEvent {
    pub fn new(player_id: PlayerId, position: BlockPos) -> Self {
        Self {
            player_id,
            position,
            timestamp: None,
        }
    }

    /// Pins the event to a specific wall-clock time.
    pub fn at(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
