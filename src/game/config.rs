//! Encounter Configuration
//!
//! Every tunable of the boss fight. `Default` reproduces the stock
//! Moldorm; a JSON file may override any subset of fields.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::rect::Rect;
use crate::game::assets::BodyPart;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Could not read the file.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON.
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The boss needs at least one body segment.
    #[error("moldorm node chain is empty")]
    EmptyChain,

    /// A body segment has unusable geometry.
    #[error("moldorm node {index}: {reason}")]
    InvalidNode {
        index: usize,
        reason: &'static str,
    },

    /// Boss health must start positive.
    #[error("moldorm health must be positive, got {0}")]
    InvalidHealth(i32),

    /// Speeds must be positive.
    #[error("speed must be positive, got {0}")]
    InvalidSpeed(f32),

    /// Speed tiers must be strictly ascending by health threshold.
    #[error("speed tiers must be strictly ascending by health threshold")]
    UnsortedSpeedTiers,

    /// A dialog message would never finish revealing.
    #[error("intro message {index}: reveal speed must be positive")]
    InvalidMessage {
        index: usize,
    },
}

// =============================================================================
// BOSS
// =============================================================================

/// One step of the health-to-speed table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedTier {
    /// Applies while health is strictly below this value
    pub below_health: i32,
    /// Speed in pixels per second
    pub speed: f32,
}

/// Health-to-speed step function.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedTable {
    /// Speed when no tier applies
    pub base: f32,
    /// Tiers, ascending by `below_health`
    pub tiers: Vec<SpeedTier>,
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            base: 100.0,
            tiers: vec![
                SpeedTier { below_health: 12, speed: 200.0 },
                SpeedTier { below_health: 16, speed: 120.0 },
            ],
        }
    }
}

impl SpeedTable {
    /// Speed for the given health.
    ///
    /// The first (lowest) threshold above `health` wins.
    pub fn speed_for(&self, health: i32) -> f32 {
        self.tiers
            .iter()
            .find(|tier| health < tier.below_health)
            .map_or(self.base, |tier| tier.speed)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base <= 0.0 {
            return Err(ConfigError::InvalidSpeed(self.base));
        }
        if let Some(tier) = self.tiers.iter().find(|tier| tier.speed <= 0.0) {
            return Err(ConfigError::InvalidSpeed(tier.speed));
        }
        if self.tiers.windows(2).any(|pair| pair[0].below_health >= pair[1].below_health) {
            return Err(ConfigError::UnsortedSpeedTiers);
        }
        Ok(())
    }
}

/// One body segment of the chain.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Sprite role
    pub part: BodyPart,
    /// Collision size
    pub size: Vec2,
    /// Sprite offset from the segment's position
    pub offset: Vec2,
    /// Slack allowed before the segment follows its parent
    pub max_distance: f32,
}

/// Moldorm boss tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoldormConfig {
    /// Head spawn position (top-left)
    pub spawn: Vec2,
    /// Starting health
    pub health: i32,
    /// Health-to-speed table
    pub speed: SpeedTable,
    /// Damage dealt to the player on contact
    pub contact_damage: i32,
    /// Head collision size
    pub head_size: Vec2,
    /// Hitbox position relative to the head
    pub hitbox_offset: Vec2,
    /// Hitbox size
    pub hitbox_size: Vec2,
    /// Body segments, from the one behind the head to the tail
    pub nodes: Vec<NodeSpec>,
}

impl Default for MoldormConfig {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(120.0, 72.0),
            health: 20,
            speed: SpeedTable::default(),
            contact_damage: 2,
            head_size: Vec2::new(22.0, 22.0),
            hitbox_offset: Vec2::new(-49.0, -50.0),
            hitbox_size: Vec2::new(130.0, 130.0),
            nodes: vec![
                NodeSpec {
                    part: BodyPart::Middle3,
                    size: Vec2::new(17.0, 15.0),
                    offset: Vec2::new(-8.0, -8.0),
                    max_distance: 18.0,
                },
                NodeSpec {
                    part: BodyPart::Middle2,
                    size: Vec2::new(17.0, 15.0),
                    offset: Vec2::new(-8.0, -8.0),
                    max_distance: 13.0,
                },
                NodeSpec {
                    part: BodyPart::Middle1,
                    size: Vec2::new(12.0, 12.0),
                    offset: Vec2::new(-10.0, -10.0),
                    max_distance: 12.0,
                },
                NodeSpec {
                    part: BodyPart::Tail,
                    size: Vec2::new(16.0, 16.0),
                    offset: Vec2::new(-8.0, -8.0),
                    max_distance: 12.0,
                },
            ],
        }
    }
}

impl MoldormConfig {
    /// Check the boss can be built from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.health <= 0 {
            return Err(ConfigError::InvalidHealth(self.health));
        }
        if self.nodes.is_empty() {
            return Err(ConfigError::EmptyChain);
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if node.size.x <= 0.0 || node.size.y <= 0.0 {
                return Err(ConfigError::InvalidNode { index, reason: "size must be positive" });
            }
            if node.max_distance <= 0.0 {
                return Err(ConfigError::InvalidNode { index, reason: "max distance must be positive" });
            }
        }

        self.speed.validate()
    }
}

// =============================================================================
// ARENA, PLAYER, VIEWPORT, DIALOG
// =============================================================================

/// Room the fight takes place in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Room width
    pub width: f32,
    /// Room height
    pub height: f32,
    /// Thickness of the four boundary walls
    pub wall_thickness: f32,
    /// Extra terrain inside the room
    pub obstacles: Vec<Rect>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 256.0,
            height: 224.0,
            wall_thickness: 16.0,
            obstacles: Vec::new(),
        }
    }
}

impl ArenaConfig {
    /// The four boundary walls: top, bottom, left, right.
    pub fn walls(&self) -> [Rect; 4] {
        let (w, h, t) = (self.width, self.height, self.wall_thickness);
        [
            Rect::new(0.0, 0.0, w, t),
            Rect::new(0.0, h - t, w, t),
            Rect::new(0.0, 0.0, t, h),
            Rect::new(w - t, 0.0, t, h),
        ]
    }
}

/// Player tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Spawn position (top-left)
    pub spawn: Vec2,
    /// Collision size
    pub size: Vec2,
    /// Starting health
    pub health: i32,
    /// Seconds of invulnerability after taking damage
    pub invulnerability_secs: f32,
    /// How far the sword reaches past the body on every side
    pub attack_reach: f32,
    /// Damage per swing
    pub attack_damage: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(120.0, 176.0),
            size: Vec2::new(16.0, 16.0),
            health: 24,
            invulnerability_secs: 1.0,
            attack_reach: 12.0,
            attack_damage: 1,
        }
    }
}

/// Screen geometry used for UI layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Window width
    pub width: f32,
    /// Window height
    pub height: f32,
    /// Narrowest supported width; the UI is laid out against it
    pub min_width: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 256.0,
            height: 224.0,
            min_width: 240.0,
        }
    }
}

/// A dialog message as written in configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageConfig {
    /// First line
    pub line1: String,
    /// Second line
    #[serde(default)]
    pub line2: String,
    /// Characters revealed per second
    pub speed: f32,
}

/// Complete encounter configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// Boss tuning
    pub boss: MoldormConfig,
    /// Room layout
    pub arena: ArenaConfig,
    /// Player tuning
    pub player: PlayerConfig,
    /// Screen geometry
    pub viewport: ViewportConfig,
    /// Messages shown before the fight starts
    pub intro: Vec<MessageConfig>,
    /// Draw collision boxes
    pub debug: bool,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            boss: MoldormConfig::default(),
            arena: ArenaConfig::default(),
            player: PlayerConfig::default(),
            viewport: ViewportConfig::default(),
            intro: vec![
                MessageConfig {
                    line1: "The floor shakes...".to_string(),
                    line2: "Moldorm guards the tower!".to_string(),
                    speed: 30.0,
                },
            ],
            debug: false,
        }
    }
}

impl EncounterConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.boss.validate()?;

        if let Some(index) = self.intro.iter().position(|message| message.speed <= 0.0) {
            return Err(ConfigError::InvalidMessage { index });
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_speed_tiers() {
        let table = SpeedTable::default();

        assert_eq!(table.speed_for(20), 100.0);
        assert_eq!(table.speed_for(16), 100.0);
        assert_eq!(table.speed_for(15), 120.0);
        assert_eq!(table.speed_for(12), 120.0);
        assert_eq!(table.speed_for(11), 200.0);
        assert_eq!(table.speed_for(0), 200.0);
        assert_eq!(table.speed_for(-3), 200.0);
    }

    #[test]
    fn test_default_chain_matches_stock_boss() {
        let config = MoldormConfig::default();
        assert!(config.validate().is_ok());

        let distances: Vec<f32> = config.nodes.iter().map(|n| n.max_distance).collect();
        assert_eq!(distances, vec![18.0, 13.0, 12.0, 12.0]);
        assert_eq!(config.nodes.last().map(|n| n.part), Some(BodyPart::Tail));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EncounterConfig::from_json_str(
            r#"{ "boss": { "health": 8 }, "debug": true, "intro": [] }"#,
        )
        .unwrap();

        assert_eq!(config.boss.health, 8);
        assert_eq!(config.boss.nodes.len(), 4);
        assert!(config.debug);
        assert!(config.intro.is_empty());
        assert_eq!(config.arena, ArenaConfig::default());
    }

    #[test]
    fn test_json_vectors_are_pairs() {
        let config = EncounterConfig::from_json_str(
            r#"{ "boss": { "spawn": [40.0, 50.0] }, "arena": { "obstacles": [ { "position": [1, 2], "size": [3, 4] } ] } }"#,
        )
        .unwrap();

        assert_eq!(config.boss.spawn, Vec2::new(40.0, 50.0));
        assert_eq!(config.arena.obstacles, vec![Rect::new(1.0, 2.0, 3.0, 4.0)]);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = EncounterConfig::default();
        config.boss.nodes.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyChain)));

        let mut config = EncounterConfig::default();
        config.boss.nodes[2].max_distance = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidNode { index: 2, .. })));

        let mut config = EncounterConfig::default();
        config.boss.speed.tiers.reverse();
        assert!(matches!(config.validate(), Err(ConfigError::UnsortedSpeedTiers)));

        let mut config = EncounterConfig::default();
        config.boss.health = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidHealth(0))));

        let mut config = EncounterConfig::default();
        config.intro[0].speed = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMessage { index: 0 })));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            EncounterConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = EncounterConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_arena_walls_enclose_room() {
        let arena = ArenaConfig::default();
        let [top, bottom, left, right] = arena.walls();

        assert_eq!(top.min().y, 0.0);
        assert_eq!(bottom.max().y, arena.height);
        assert_eq!(left.min().x, 0.0);
        assert_eq!(right.max().x, arena.width);
    }
}
