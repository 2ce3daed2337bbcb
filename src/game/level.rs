//! Level Container
//!
//! Owns the arena terrain, the player, the collidable registry, the
//! active screen effect and the event queue. Entities that live outside
//! the level (the boss) move through `try_move`.

use std::collections::BTreeSet;

use glam::Vec2;
use tracing::{debug, trace};

use crate::core::hash::StateHasher;
use crate::game::collision::{check_collision, Body, BodyId, Collider, Movable};
use crate::game::config::{ArenaConfig, PlayerConfig};
use crate::game::effect::Fade;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::player::Player;
use crate::game::render::{DrawCommand, RenderList, DEBUG_GREEN};

/// The scene the encounter plays out in.
#[derive(Clone, Debug)]
pub struct Level {
    next_id: u32,
    tick: u32,
    walls: Vec<Body>,
    player: Player,
    /// Registered bodies. BTreeSet for deterministic iteration.
    collidables: BTreeSet<BodyId>,
    effect: Option<Fade>,
    pending_events: Vec<GameEvent>,
}

impl Level {
    /// Build the arena walls and spawn the player.
    ///
    /// The player gets the first id, walls and obstacles follow in order.
    pub fn new(arena: &ArenaConfig, player: &PlayerConfig) -> Self {
        let mut level = Self {
            next_id: 1,
            tick: 0,
            walls: Vec::new(),
            player: Player::new(BodyId::default(), player),
            collidables: BTreeSet::new(),
            effect: None,
            pending_events: Vec::new(),
        };

        let player_id = level.allocate_id();
        level.player = Player::new(player_id, player);
        level.add_collidable(player_id);

        for rect in arena.walls().into_iter().chain(arena.obstacles.iter().copied()) {
            let id = level.allocate_id();
            level.walls.push(Body::terrain(id, rect));
            level.add_collidable(id);
        }

        level
    }

    /// Hand out a fresh body id.
    pub fn allocate_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Current tick.
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Advance the tick counter.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The player, mutably.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Terrain bodies.
    pub fn walls(&self) -> &[Body] {
        &self.walls
    }

    /// Active screen effect, if any.
    pub fn effect(&self) -> Option<&Fade> {
        self.effect.as_ref()
    }

    // =========================================================================
    // COLLIDABLE REGISTRY
    // =========================================================================

    /// Register a body for collision queries.
    pub fn add_collidable(&mut self, id: BodyId) {
        self.collidables.insert(id);
    }

    /// Unregister a body. Returns false if it was not registered.
    pub fn remove_collidable(&mut self, id: BodyId) -> bool {
        let removed = self.collidables.remove(&id);
        if removed {
            debug!(?id, "collidable removed");
            self.push_event(GameEventData::CollidableRemoved { id });
        }
        removed
    }

    /// Is `id` registered?
    pub fn is_collidable(&self, id: BodyId) -> bool {
        self.collidables.contains(&id)
    }

    /// Registered ids in ascending order.
    pub fn collidables(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.collidables.iter().copied()
    }

    // =========================================================================
    // MOVEMENT
    // =========================================================================

    /// Move `mover` by `step`, resolving collisions.
    ///
    /// Terrain the mover may collide with blocks the step. Touching the
    /// player gives the mover a chance to handle the contact; an
    /// unhandled contact blocks as well. A blocked mover is put back
    /// where it was.
    pub fn try_move<M: Movable>(&mut self, mover: &mut M, step: Vec2) -> bool {
        let origin = mover.bounds().position;
        mover.set_position(origin + step);

        let blocked = self
            .walls
            .iter()
            .filter(|wall| self.collidables.contains(&wall.tag.id))
            .any(|wall| check_collision(&*mover, wall));

        if blocked {
            trace!(mover = ?mover.tag().id, "blocked by terrain");
            mover.set_position(origin);
            return false;
        }

        if self.collidables.contains(&self.player.id()) && check_collision(&*mover, &self.player) {
            let before = self.player.health();
            let handled = mover.handle_collision_with(&mut self.player);
            let after = self.player.health();

            if after != before {
                self.push_event(GameEventData::PlayerDamaged {
                    source: mover.tag().id,
                    amount: before - after,
                    health: after,
                });
            }

            if !handled {
                mover.set_position(origin);
                return false;
            }
        }

        true
    }

    // =========================================================================
    // EFFECTS AND EVENTS
    // =========================================================================

    /// Replace the active screen effect.
    pub fn change_effect(&mut self, fade: Fade) {
        self.push_event(GameEventData::EffectStarted {
            direction: fade.direction(),
            seconds: fade.duration(),
        });
        self.effect = Some(fade);
    }

    /// Advance the active effect, queueing its completion event.
    pub fn update_effect(&mut self, delta: f32) {
        let completed = self.effect.as_mut().and_then(|fade| fade.tick(delta));
        if let Some(event) = completed {
            self.push_event(event);
        }
    }

    /// Queue an event stamped with the current tick.
    pub fn push_event(&mut self, data: GameEventData) {
        self.pending_events.push(GameEvent::new(self.tick, data));
    }

    /// Drain queued events, sorted by tick then priority.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        let mut events = std::mem::take(&mut self.pending_events);
        events.sort();
        events
    }

    // =========================================================================
    // DRAWING AND HASHING
    // =========================================================================

    /// Debug boxes for registered terrain and the player.
    pub fn draw_debug(&self, out: &mut RenderList) {
        for wall in self.walls.iter().filter(|wall| self.is_collidable(wall.tag.id)) {
            out.push(DrawCommand::DebugBox { rect: wall.rect, color: DEBUG_GREEN });
        }
        out.push(DrawCommand::DebugBox { rect: self.player.bounds(), color: DEBUG_GREEN });
    }

    /// Overlay of the active effect.
    pub fn draw_effect(&self, out: &mut RenderList) {
        if let Some(fade) = &self.effect {
            fade.draw(out);
        }
    }

    /// Feed the level's state into `hasher`.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_rect(&self.player.bounds());
        hasher.update_i32(self.player.health());
        hasher.update_f32(self.player.invulnerable_for());

        hasher.update_u32(self.collidables.len() as u32);
        for id in &self.collidables {
            hasher.update_u32(id.0);
        }

        match &self.effect {
            Some(fade) => {
                hasher.update_bool(true);
                hasher.update_f32(fade.progress());
            }
            None => hasher.update_bool(false),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rect::Rect;
    use crate::game::collision::{BodyTag, EntityKind, Mob};
    use crate::game::effect::FadeDirection;

    /// Block that deals contact damage and reports it as handled or not.
    struct Crawler {
        id: BodyId,
        rect: Rect,
        handles_contact: bool,
    }

    impl Collider for Crawler {
        fn tag(&self) -> BodyTag {
            BodyTag::entity(self.id, EntityKind::Enemy)
        }

        fn bounds(&self) -> Rect {
            self.rect
        }

        fn handle_collision_with(&self, mob: &mut dyn Mob) -> bool {
            mob.damage(self.id, 3);
            self.handles_contact
        }
    }

    impl Movable for Crawler {
        fn set_position(&mut self, position: Vec2) {
            self.rect.position = position;
        }
    }

    fn level() -> Level {
        Level::new(&ArenaConfig::default(), &PlayerConfig::default())
    }

    #[test]
    fn test_ids_are_unique_and_registered() {
        let mut level = level();
        let player = level.player().id();

        assert_eq!(player, BodyId(1));
        assert_eq!(level.walls().len(), 4);
        assert!(level.is_collidable(player));
        assert!(level.walls().iter().all(|w| level.is_collidable(w.tag.id)));

        let fresh = level.allocate_id();
        assert_eq!(fresh, BodyId(6));
    }

    #[test]
    fn test_terrain_blocks_and_reverts() {
        let mut level = level();
        let mut crawler = Crawler {
            id: level.allocate_id(),
            rect: Rect::new(20.0, 100.0, 10.0, 10.0),
            handles_contact: true,
        };

        assert!(level.try_move(&mut crawler, Vec2::new(5.0, 0.0)));
        assert_eq!(crawler.rect.position, Vec2::new(25.0, 100.0));

        // Left wall spans x in 0..16
        assert!(!level.try_move(&mut crawler, Vec2::new(-10.0, 0.0)));
        assert_eq!(crawler.rect.position, Vec2::new(25.0, 100.0));
    }

    #[test]
    fn test_unregistered_terrain_does_not_block() {
        let mut level = level();
        let left_wall = level.walls()[2].tag.id;
        assert!(level.remove_collidable(left_wall));
        assert!(!level.remove_collidable(left_wall));

        let mut crawler = Crawler {
            id: level.allocate_id(),
            rect: Rect::new(20.0, 100.0, 10.0, 10.0),
            handles_contact: true,
        };
        assert!(level.try_move(&mut crawler, Vec2::new(-10.0, 0.0)));

        let events = level.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, GameEventData::CollidableRemoved { id: left_wall });
    }

    #[test]
    fn test_handled_player_contact_passes_through() {
        let mut level = level();
        let spawn = level.player().position();
        let start_health = level.player().health();
        let mut crawler = Crawler {
            id: level.allocate_id(),
            rect: Rect::from_parts(spawn - Vec2::new(0.0, 12.0), Vec2::splat(10.0)),
            handles_contact: true,
        };

        assert!(level.try_move(&mut crawler, Vec2::new(0.0, 4.0)));
        assert_eq!(level.player().health(), start_health - 3);

        let events = level.take_events();
        assert_eq!(
            events[0].data,
            GameEventData::PlayerDamaged { source: crawler.id, amount: 3, health: start_health - 3 }
        );
    }

    #[test]
    fn test_unhandled_player_contact_blocks() {
        let mut level = level();
        let spawn = level.player().position();
        let mut crawler = Crawler {
            id: level.allocate_id(),
            rect: Rect::from_parts(spawn - Vec2::new(0.0, 12.0), Vec2::splat(10.0)),
            handles_contact: false,
        };
        let before = crawler.rect.position;

        assert!(!level.try_move(&mut crawler, Vec2::new(0.0, 4.0)));
        assert_eq!(crawler.rect.position, before);
    }

    #[test]
    fn test_effect_completion_is_queued() {
        let mut level = level();
        level.change_effect(Fade::out(1.0).then(GameEventData::GameWon));

        level.update_effect(0.5);
        level.advance_tick();
        level.update_effect(0.5);

        let events = level.take_events();
        assert_eq!(
            events[0].data,
            GameEventData::EffectStarted { direction: FadeDirection::Out, seconds: 1.0 }
        );
        assert_eq!(events[1].data, GameEventData::GameWon);
        assert_eq!(events[1].tick, 1);
        assert!(level.take_events().is_empty());
    }
}
