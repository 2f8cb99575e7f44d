//! # Pyramid Zone Index
//!
//! Axis-aligned boxes that gate the chest limiter. A clicked block is gated
//! when it lies inside at least one configured zone; everything else passes
//! through the guard untouched.
//!
//! Bounds are inclusive on every axis. No ordering is enforced between a
//! minimum and its maximum: a zone with `min > max` on any axis simply never
//! contains anything, and configuration carrying such a zone is still loaded.

use crate::types::BlockPos;
use serde::{Deserialize, Serialize};
use crate::config::ZoneConfig;

/// A single inclusive axis-aligned box.
///
/// Field names follow snake_case in TOML, with the camelCase spellings
/// (`minX`, `maxZ`, ...) accepted as aliases. A missing field reads as `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Zone {
    #[serde(alias = "minX")]
    pub min_x: i32,
    #[serde(alias = "maxX")]
    pub max_x: i32,
    #[serde(alias = "minY")]
    pub min_y: i32,
    #[serde(alias = "maxY")]
    pub max_y: i32,
    #[serde(alias = "minZ")]
    pub min_z: i32,
    #[serde(alias = "maxZ")]
    pub max_z: i32,
}

impl Zone {
    pub fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32, min_z: i32, max_z: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        }
    }

    /// Checks if a block lies within this zone on all three axes.
    pub fn contains(&self, pos: BlockPos) -> bool {
        pos.x >= self.min_x
            && pos.x <= self.max_x
            && pos.y >= self.min_y
            && pos.y <= self.max_y
            && pos.z >= self.min_z
            && pos.z <= self.max_z
    }

    /// True when some axis is inverted, i.e. the zone can never match.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y || self.min_z > self.max_z
    }
}

/// A zone together with the name it was configured under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedZone {
    pub name: String,
    pub zone: Zone,
}

/// The set of gated zones, scanned linearly.
///
/// Expected cardinality is a handful of pyramids, so a spatial index would
/// cost more than it saves. An empty index contains nothing, which disables
/// the limiter entirely.
#[derive(Debug, Clone, Default)]
pub struct ZoneIndex {
    zones: Vec<NamedZone>,
}

impl ZoneIndex {
    /// Builds an index from unnamed zones; each gets its position as a name.
    pub fn new(zones: Vec<Zone>) -> Self {
        let zones = zones
            .into_iter()
            .enumerate()
            .map(|(i, zone)| NamedZone {
                name: format!("zone_{i}"),
                zone,
            })
            .collect();
        Self { zones }
    }

    /// Builds an index from a name → zone mapping as found in configuration.
    pub fn from_config(pyramids: &ZoneConfig) -> Self {
        let zones = pyramids
            .iter()
            .map(|(name, zone)| NamedZone {
                name: name.clone(),
                zone: *zone,
            })
            .collect();
        Self { zones }
    }

    /// Checks if a block is gated by any zone.
    pub fn contains(&self, pos: BlockPos) -> bool {
        self.zones.iter().any(|named| named.zone.contains(pos))
    }

    /// Returns the first zone containing the block, if any.
    pub fn zone_containing(&self, pos: BlockPos) -> Option<&NamedZone> {
        self.zones.iter().find(|named| named.zone.contains(pos))
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedZone> {
        self.zones.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pyramid() -> Zone {
        Zone::new(7800, 7860, 32, 128, -7780, -7730)
    }

    #[test]
    fn test_inclusive_bounds() {
        let zone = pyramid();

        assert!(zone.contains(BlockPos::new(7800, 32, -7780)));
        assert!(zone.contains(BlockPos::new(7860, 128, -7730)));
        assert!(zone.contains(BlockPos::new(7830, 64, -7750)));
    }

    #[test]
    fn test_one_unit_outside_each_axis() {
        let zone = pyramid();

        assert!(!zone.contains(BlockPos::new(7799, 64, -7750)));
        assert!(!zone.contains(BlockPos::new(7861, 64, -7750)));
        assert!(!zone.contains(BlockPos::new(7830, 31, -7750)));
        assert!(!zone.contains(BlockPos::new(7830, 129, -7750)));
        assert!(!zone.contains(BlockPos::new(7830, 64, -7781)));
        assert!(!zone.contains(BlockPos::new(7830, 64, -7729)));
    }

    #[test]
    fn test_inverted_zone_contains_nothing() {
        // Legacy default: min_z > max_z
        let zone = Zone::new(7800, 7860, 32, 128, -7730, -7780);

        assert!(zone.is_empty());
        assert!(!zone.contains(BlockPos::new(7830, 64, -7750)));
        assert!(!zone.contains(BlockPos::new(7830, 64, -7730)));
        assert!(!zone.contains(BlockPos::new(7830, 64, -7780)));
    }

    #[test]
    fn test_single_block_zone() {
        let zone = Zone::new(5, 5, 5, 5, 5, 5);

        assert!(!zone.is_empty());
        assert!(zone.contains(BlockPos::new(5, 5, 5)));
        assert!(!zone.contains(BlockPos::new(5, 5, 6)));
    }

    #[test]
    fn test_empty_index_contains_nothing() {
        let index = ZoneIndex::default();

        assert!(index.is_empty());
        assert!(!index.contains(BlockPos::new(0, 0, 0)));
        assert!(index.zone_containing(BlockPos::new(0, 0, 0)).is_none());
    }

    #[test]
    fn test_any_zone_matches() {
        let index = ZoneIndex::new(vec![pyramid(), Zone::new(0, 10, 0, 10, 0, 10)]);

        assert_eq!(index.len(), 2);
        assert!(index.contains(BlockPos::new(7830, 64, -7750)));
        assert!(index.contains(BlockPos::new(3, 3, 3)));
        assert!(!index.contains(BlockPos::new(100, 100, 100)));
    }

    #[test]
    fn test_from_config_keeps_names() {
        let mut pyramids = ZoneConfig::new();
        pyramids.insert("desert".to_string(), pyramid());
        pyramids.insert("jungle".to_string(), Zone::new(0, 10, 0, 10, 0, 10));

        let index = ZoneIndex::from_config(&pyramids);
        let hit = index.zone_containing(BlockPos::new(1, 1, 1)).unwrap();

        assert_eq!(hit.name, "jungle");
        assert_eq!(index.iter().count(), 2);
    }

    #[test]
    fn test_zone_camel_case_and_missing_fields() {
        let zone: Zone = toml::from_str("minX = -5\nmaxX = 5\nmax_y = 10").unwrap();

        assert_eq!(zone.min_x, -5);
        assert_eq!(zone.max_x, 5);
        assert_eq!(zone.min_y, 0);
        assert_eq!(zone.max_y, 10);
        assert_eq!(zone.min_z, 0);
        assert_eq!(zone.max_z, 0);
    }
}
