//! Player State
//!
//! The boss fight only needs the player as a body that takes contact
//! damage and swings a sword.

use glam::Vec2;

use crate::core::rect::Rect;
use crate::game::collision::{BodyId, BodyTag, Collider, Damageable, EntityKind, Movable};
use crate::game::config::PlayerConfig;

/// The player character.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    id: BodyId,
    rect: Rect,
    health: i32,
    invulnerable_for: f32,
    invulnerability: f32,
    attack_reach: f32,
    attack_damage: i32,
}

impl Player {
    /// Create the player from its configuration.
    pub fn new(id: BodyId, config: &PlayerConfig) -> Self {
        Self {
            id,
            rect: Rect::from_parts(config.spawn, config.size),
            health: config.health,
            invulnerable_for: 0.0,
            invulnerability: config.invulnerability_secs,
            attack_reach: config.attack_reach,
            attack_damage: config.attack_damage,
        }
    }

    /// Body identifier.
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Top-left corner.
    pub fn position(&self) -> Vec2 {
        self.rect.position
    }

    /// Current health.
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Seconds of invulnerability left.
    pub fn invulnerable_for(&self) -> f32 {
        self.invulnerable_for
    }

    /// Damage dealt per sword swing.
    pub fn attack_damage(&self) -> i32 {
        self.attack_damage
    }

    /// Area covered by a sword swing.
    pub fn attack_area(&self) -> Rect {
        self.rect.inflated(self.attack_reach)
    }

    /// Decay the invulnerability window.
    pub fn tick(&mut self, delta: f32) {
        self.invulnerable_for = (self.invulnerable_for - delta).max(0.0);
    }
}

impl Collider for Player {
    fn tag(&self) -> BodyTag {
        BodyTag::entity(self.id, EntityKind::Player)
    }

    fn bounds(&self) -> Rect {
        self.rect
    }
}

impl Damageable for Player {
    fn damage(&mut self, _from: BodyId, amount: i32) {
        if self.invulnerable_for > 0.0 {
            return;
        }

        self.health -= amount;
        self.invulnerable_for = self.invulnerability;
    }
}

impl Movable for Player {
    fn set_position(&mut self, position: Vec2) {
        self.rect.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_opens_invulnerability_window() {
        let config = PlayerConfig::default();
        let mut player = Player::new(BodyId(1), &config);
        let start = player.health();

        player.damage(BodyId(2), 2);
        assert_eq!(player.health(), start - 2);

        // Second contact inside the window is ignored
        player.damage(BodyId(2), 2);
        assert_eq!(player.health(), start - 2);

        player.tick(config.invulnerability_secs);
        player.damage(BodyId(2), 2);
        assert_eq!(player.health(), start - 4);
    }

    #[test]
    fn test_attack_area_surrounds_player() {
        let player = Player::new(BodyId(1), &PlayerConfig::default());
        let area = player.attack_area();

        assert!(area.contains(player.bounds().min()));
        assert!(area.contains(player.bounds().max()));
        assert!(area.size.x > player.bounds().size.x);
    }
}
