//! Hitbox Proxy
//!
//! The head is invulnerable; attacks land on a large region pinned to it
//! instead. The region has its own id in the level and is reached through
//! views borrowing the boss.

use glam::Vec2;

use crate::core::rect::Rect;
use crate::game::assets::MoldormAssets;
use crate::game::collision::{BodyId, BodyTag, Collider, Damageable, EntityKind, Mob};
use crate::game::render::{DrawCommand, RenderList};

use super::Moldorm;

/// Where the proxy region sits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitboxRegion {
    pub(super) id: BodyId,
    pub(super) rect: Rect,
    pub(super) offset: Vec2,
}

impl HitboxRegion {
    pub(super) fn new(id: BodyId, head: Vec2, offset: Vec2, size: Vec2) -> Self {
        Self {
            id,
            rect: Rect::from_parts(head + offset, size),
            offset,
        }
    }

    /// Re-anchor to the head's top-left corner.
    pub(super) fn pin(&mut self, head: Vec2) {
        self.rect.position = head + self.offset;
    }
}

/// Read-only view of the proxy.
#[derive(Clone, Copy)]
pub struct HitboxView<'a> {
    pub(super) boss: &'a Moldorm,
}

impl HitboxView<'_> {
    /// Proxy body id.
    pub fn id(&self) -> BodyId {
        self.boss.hitbox.id
    }

    /// Draw the tail sprite, placed at the tail relative to the proxy.
    pub fn draw(&self, assets: &MoldormAssets, out: &mut RenderList) {
        let region = self.boss.hitbox.rect.position;
        let relative = self.boss.tail().map_or(Vec2::ZERO, |tail| tail.position() - region);

        out.push(DrawCommand::Sprite {
            sprite: assets.tail,
            position: region + relative,
        });
    }
}

impl Collider for HitboxView<'_> {
    fn tag(&self) -> BodyTag {
        BodyTag::entity(self.boss.hitbox.id, EntityKind::Boss)
    }

    fn bounds(&self) -> Rect {
        self.boss.hitbox.rect
    }

    fn can_collide_with(&self, other: &BodyTag) -> bool {
        other.id != self.boss.id && self.boss.can_collide_with(other)
    }

    fn collides_with(&self, other: &dyn Collider) -> bool {
        self.boss.collides_with(other)
    }

    fn handle_collision_with(&self, mob: &mut dyn Mob) -> bool {
        self.boss.handle_collision_with(mob)
    }
}

/// Damage sink of the proxy. Every hit costs the boss exactly one health.
pub struct HitboxMut<'a> {
    pub(super) boss: &'a mut Moldorm,
}

impl HitboxMut<'_> {
    fn view(&self) -> HitboxView<'_> {
        HitboxView { boss: self.boss }
    }
}

impl Collider for HitboxMut<'_> {
    fn tag(&self) -> BodyTag {
        self.view().tag()
    }

    fn bounds(&self) -> Rect {
        self.view().bounds()
    }

    fn can_collide_with(&self, other: &BodyTag) -> bool {
        self.view().can_collide_with(other)
    }

    fn collides_with(&self, other: &dyn Collider) -> bool {
        self.view().collides_with(other)
    }

    fn handle_collision_with(&self, mob: &mut dyn Mob) -> bool {
        self.view().handle_collision_with(mob)
    }
}

impl Damageable for HitboxMut<'_> {
    fn damage(&mut self, _from: BodyId, _amount: i32) {
        self.boss.hit();
    }
}
