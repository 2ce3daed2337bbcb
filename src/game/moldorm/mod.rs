//! Moldorm Boss
//!
//! A worm made of a head and a chain of trailing segments.
//!
//! ## Movement
//!
//! The head travels along `(-sin θ, cos θ)` with θ = `rotation` in degrees,
//! one axis at a time:
//!
//! - X blocked: `rotation = 360 - rotation` and nothing else moves
//! - X free, Y blocked: `rotation = 180 - rotation`
//!
//! After a free X step the hitbox is re-pinned and every segment follows,
//! tail first. Rotation is never wrapped, so it can drift outside 0..360
//! over many bounces.
//!
//! ## Damage
//!
//! The head cannot be damaged. Attacks resolve against the hitbox proxy,
//! which costs one health per hit whatever the attack's strength. Speed
//! follows health through a step table.

mod hitbox;
mod segment;

pub use hitbox::{HitboxMut, HitboxRegion, HitboxView};
pub use segment::{NodeParent, SegmentNode};

use glam::Vec2;
use tracing::{debug, info};

use crate::core::hash::StateHasher;
use crate::core::rect::Rect;
use crate::game::assets::MoldormAssets;
use crate::game::collision::{BodyId, BodyTag, Collider, Damageable, EntityKind, Mob, Movable};
use crate::game::config::{ConfigError, MoldormConfig, SpeedTable};
use crate::game::effect::Fade;
use crate::game::events::GameEventData;
use crate::game::level::Level;
use crate::game::render::{DrawCommand, RenderList, DEBUG_BLUE};

/// Seconds the music and the screen take to fade after defeat.
pub const DEFEAT_FADE_SECS: f32 = 2.0;

/// Anchor of the head sprite's rotation, relative to the head position.
const HEAD_PIVOT: Vec2 = Vec2::new(11.0, 10.0);

/// Head sprite offset from the pivot.
const HEAD_SPRITE_OFFSET: Vec2 = Vec2::new(-16.0, -15.0);

/// Direction a character faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Toward the top of the screen
    Up,
    /// Toward the bottom of the screen
    Down,
    /// Toward the left
    Left,
    /// Toward the right
    Right,
}

/// The boss.
#[derive(Clone, Debug)]
pub struct Moldorm {
    id: BodyId,
    rect: Rect,
    facing: Facing,
    /// Degrees, unbounded
    rotation: f32,
    speed: f32,
    health: i32,
    contact_damage: i32,
    speed_table: SpeedTable,
    /// Tail first; the last node follows the head.
    nodes: Vec<SegmentNode>,
    hitbox: HitboxRegion,
    animation_time: f32,
    dead: bool,
}

impl Moldorm {
    /// Spawn the boss into `level` and register its hitbox.
    ///
    /// Every segment starts at the head's position.
    pub fn new(level: &mut Level, config: &MoldormConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let id = level.allocate_id();
        let hitbox_id = level.allocate_id();

        // Config lists segments head-first; the arena stores them tail-first
        let count = config.nodes.len();
        let nodes = config
            .nodes
            .iter()
            .rev()
            .enumerate()
            .map(|(index, spec)| {
                let parent = if index + 1 < count {
                    NodeParent::Node(index + 1)
                } else {
                    NodeParent::Head
                };
                SegmentNode::new(spec, config.spawn, parent)
            })
            .collect();

        let boss = Self {
            id,
            rect: Rect::from_parts(config.spawn, config.head_size),
            facing: Facing::Down,
            rotation: 0.0,
            speed: config.speed.speed_for(config.health),
            health: config.health,
            contact_damage: config.contact_damage,
            speed_table: config.speed.clone(),
            nodes,
            hitbox: HitboxRegion::new(hitbox_id, config.spawn, config.hitbox_offset, config.hitbox_size),
            animation_time: 0.0,
            dead: false,
        };

        level.add_collidable(boss.hitbox.id);
        debug!(?id, ?hitbox_id, segments = count, "moldorm spawned");

        Ok(boss)
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Head body id.
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Head top-left corner.
    pub fn position(&self) -> Vec2 {
        self.rect.position
    }

    /// Facing. Always down; travel follows `rotation`.
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Rotation in degrees.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Current speed in pixels per second.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Current health.
    pub fn health(&self) -> i32 {
        self.health
    }

    /// The head never takes damage directly.
    pub fn is_vulnerable(&self) -> bool {
        false
    }

    /// Has the defeat sequence run?
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Segments, tail first.
    pub fn nodes(&self) -> &[SegmentNode] {
        &self.nodes
    }

    /// The last segment.
    pub fn tail(&self) -> Option<&SegmentNode> {
        self.nodes.first()
    }

    /// Center of whatever `parent` refers to.
    pub fn parent_center(&self, parent: NodeParent) -> Vec2 {
        match parent {
            NodeParent::Head => self.rect.center(),
            NodeParent::Node(index) => self
                .nodes
                .get(index)
                .map_or_else(|| self.rect.center(), SegmentNode::center),
        }
    }

    /// Unit travel vector derived from `rotation`.
    pub fn direction(&self) -> Vec2 {
        let angle = self.rotation.to_radians();
        Vec2::new(-angle.sin(), angle.cos())
    }

    /// Hitbox proxy.
    pub fn hitbox(&self) -> HitboxView<'_> {
        HitboxView { boss: self }
    }

    /// Hitbox proxy as a damage sink.
    pub fn hitbox_mut(&mut self) -> HitboxMut<'_> {
        HitboxMut { boss: self }
    }

    // =========================================================================
    // SIMULATION
    // =========================================================================

    /// Advance the boss by `delta` seconds.
    pub fn update(&mut self, level: &mut Level, delta: f32) {
        self.facing = Facing::Down;
        self.animation_time += delta;

        let direction = self.direction();
        let step = self.speed * delta;

        if level.try_move(self, Vec2::new(direction.x, 0.0) * step) {
            if !level.try_move(self, Vec2::new(0.0, direction.y) * step) {
                self.rotation = 180.0 - self.rotation;
                debug!(rotation = self.rotation, "moldorm bounced vertically");
            }

            self.hitbox.pin(self.rect.position);
            self.update_nodes(delta);
        } else {
            self.rotation = 360.0 - self.rotation;
            debug!(rotation = self.rotation, "moldorm bounced horizontally");
        }

        self.refresh_speed(level);
    }

    /// Let every segment follow its parent, tail first.
    fn update_nodes(&mut self, delta: f32) {
        for index in 0..self.nodes.len() {
            let parent = self.parent_center(self.nodes[index].parent());
            let speed = self.speed;
            self.nodes[index].update(parent, speed, delta);
        }
    }

    /// Apply the speed table to the current health.
    fn refresh_speed(&mut self, level: &mut Level) {
        let speed = self.speed_table.speed_for(self.health);
        if speed != self.speed {
            debug!(health = self.health, speed, "moldorm speed tier changed");
            self.speed = speed;
            level.push_event(GameEventData::BossSpeedChanged { speed });
        }
    }

    /// Lose one health.
    pub fn hit(&mut self) {
        self.health -= 1;
        debug!(health = self.health, "moldorm hit");
    }

    /// Steering hook: turn two degrees.
    pub fn rotate(&mut self) {
        self.rotation += 2.0;
    }

    /// Run the defeat sequence once.
    ///
    /// Detaches the hitbox, stops the music and fades to black; the fade's
    /// completion signals the win.
    pub fn die(&mut self, level: &mut Level) {
        if self.dead {
            return;
        }
        self.dead = true;
        info!(tick = level.tick(), "moldorm defeated");

        level.push_event(GameEventData::BossDefeated);
        level.remove_collidable(self.hitbox.id);
        level.push_event(GameEventData::MusicQueueCleared);
        level.push_event(GameEventData::MusicFadeOut { seconds: DEFEAT_FADE_SECS });
        level.change_effect(Fade::out(DEFEAT_FADE_SECS).then(GameEventData::GameWon));
    }

    // =========================================================================
    // DRAWING AND HASHING
    // =========================================================================

    /// Draw the segments, then the rotated head.
    pub fn draw(&self, assets: &MoldormAssets, debug: bool, out: &mut RenderList) {
        for node in &self.nodes {
            node.draw(assets.part(node.part()), out);
        }

        if let Some(sprite) = assets.head.frame_at(self.animation_time) {
            out.push(DrawCommand::RotatedSprite {
                sprite,
                anchor: self.rect.position + HEAD_PIVOT,
                rotation: self.rotation,
                offset: HEAD_SPRITE_OFFSET,
            });
        }

        if debug {
            for node in &self.nodes {
                out.push(DrawCommand::DebugBox { rect: node.bounds(), color: DEBUG_BLUE });
            }
            out.push(DrawCommand::DebugBox { rect: self.hitbox.rect, color: DEBUG_BLUE });
        }
    }

    /// Feed the boss's state into `hasher`.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_rect(&self.rect);
        hasher.update_f32(self.rotation);
        hasher.update_f32(self.speed);
        hasher.update_i32(self.health);
        hasher.update_bool(self.dead);
        hasher.update_rect(&self.hitbox.rect);

        hasher.update_u32(self.nodes.len() as u32);
        for node in &self.nodes {
            hasher.update_rect(&node.bounds());
        }
    }
}

impl Collider for Moldorm {
    fn tag(&self) -> BodyTag {
        BodyTag::entity(self.id, EntityKind::Boss)
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    /// Terrain and the player only, never the own hitbox.
    fn can_collide_with(&self, other: &BodyTag) -> bool {
        other.id != self.hitbox.id && (!other.is_entity() || other.is_player())
    }

    /// Entities also collide with any segment.
    fn collides_with(&self, other: &dyn Collider) -> bool {
        let area = other.bounds();

        if other.tag().is_entity() && self.nodes.iter().any(|node| node.bounds().overlaps(&area)) {
            return true;
        }

        self.rect.overlaps(&area)
    }

    fn handle_collision_with(&self, mob: &mut dyn Mob) -> bool {
        mob.damage(self.id, self.contact_damage);
        true
    }
}

impl Damageable for Moldorm {
    fn damage(&mut self, _from: BodyId, _amount: i32) {
        if self.is_vulnerable() {
            self.hit();
        }
    }
}

impl Movable for Moldorm {
    fn set_position(&mut self, position: Vec2) {
        self.rect.position = position;
    }
}

// =============================================================================
// TESTS
// =============================================================================
