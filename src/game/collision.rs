//! Collision Protocol
//!
//! The flat capability set shared by every collidable thing in the arena:
//! the boss head, its hitbox proxy, the player and plain rectangles
//! (walls, attack regions).

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::rect::Rect;

// =============================================================================
// BODY IDENTITY
// =============================================================================

/// Identifier of a body within a level.
///
/// Allocated by `Level::allocate_id`, monotonic, never reused.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl fmt::Debug for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a living entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EntityKind {
    /// The player character
    Player = 0,
    /// A boss (head or hitbox)
    Boss = 1,
    /// Any other hostile mob
    Enemy = 2,
    /// Non-hostile character
    Npc = 3,
}

/// What a body is, as far as collision predicates care.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Static obstacle that is not an entity
    Terrain,
    /// Living entity
    Entity(EntityKind),
}

/// Identity plus kind, the key every `can_collide_with` predicate looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyTag {
    /// Body identifier
    pub id: BodyId,
    /// Body kind
    pub kind: BodyKind,
}

impl BodyTag {
    /// Tag for a terrain body.
    pub const fn terrain(id: BodyId) -> Self {
        Self { id, kind: BodyKind::Terrain }
    }

    /// Tag for an entity.
    pub const fn entity(id: BodyId, kind: EntityKind) -> Self {
        Self { id, kind: BodyKind::Entity(kind) }
    }

    /// Is this body an entity?
    #[inline]
    pub fn is_entity(&self) -> bool {
        matches!(self.kind, BodyKind::Entity(_))
    }

    /// Is this body the player?
    #[inline]
    pub fn is_player(&self) -> bool {
        self.kind == BodyKind::Entity(EntityKind::Player)
    }
}

// =============================================================================
// CAPABILITIES
// =============================================================================

/// Anything that takes part in collision queries.
pub trait Collider {
    /// Identity and kind.
    fn tag(&self) -> BodyTag;

    /// Current bounding rectangle.
    fn bounds(&self) -> Rect;

    /// Whether this body is allowed to collide with `other` at all.
    fn can_collide_with(&self, _other: &BodyTag) -> bool {
        true
    }

    /// Whether this body currently overlaps `other`.
    fn collides_with(&self, other: &dyn Collider) -> bool {
        self.bounds().overlaps(&other.bounds())
    }

    /// React to touching `mob`. Returns true if the contact was handled,
    /// in which case it does not block movement.
    fn handle_collision_with(&self, _mob: &mut dyn Mob) -> bool {
        false
    }
}

/// Something that can take damage.
pub trait Damageable {
    /// Receive `amount` damage from `from`.
    fn damage(&mut self, from: BodyId, amount: i32);
}

/// A collidable, damageable entity.
pub trait Mob: Collider + Damageable {}

impl<T: Collider + Damageable> Mob for T {}

/// Something whose position the level may change while resolving movement.
pub trait Movable: Collider {
    /// Place the body's top-left corner at `position`.
    fn set_position(&mut self, position: glam::Vec2);
}

// =============================================================================
// GENERIC SHAPE
// =============================================================================

/// Plain rectangle body: walls, obstacles, attack regions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Identity and kind
    pub tag: BodyTag,
    /// Extent
    pub rect: Rect,
}

impl Body {
    /// Create a terrain body.
    pub const fn terrain(id: BodyId, rect: Rect) -> Self {
        Self { tag: BodyTag::terrain(id), rect }
    }

    /// Create an entity-shaped body (e.g. an attack region owned by an entity).
    pub const fn entity(id: BodyId, kind: EntityKind, rect: Rect) -> Self {
        Self { tag: BodyTag::entity(id, kind), rect }
    }
}

impl Collider for Body {
    fn tag(&self) -> BodyTag {
        self.tag
    }

    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// Check whether `a` collides with `b` from `a`'s point of view.
///
/// Combines the permission predicate with the geometric test, the way
/// the level asks every collidable.
#[inline]
pub fn check_collision(a: &dyn Collider, b: &dyn Collider) -> bool {
    a.can_collide_with(&b.tag()) && a.collides_with(b)
}

// =============================================================================
// TESTS
// =============================================================================
