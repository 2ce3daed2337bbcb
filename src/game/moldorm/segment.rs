//! Body Segments
//!
//! A segment waits until its parent has pulled more than `max_distance`
//! away, then crawls straight toward it at the head's speed.

use glam::Vec2;

use crate::core::rect::Rect;
use crate::game::assets::{BodyPart, Sprite};
use crate::game::config::NodeSpec;
use crate::game::render::{DrawCommand, RenderList};

/// What a segment follows. Indices point into the head's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeParent {
    /// The head itself
    Head,
    /// Another segment, closer to the head
    Node(usize),
}

/// One body segment.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentNode {
    rect: Rect,
    offset: Vec2,
    max_distance: f32,
    part: BodyPart,
    parent: NodeParent,
}

impl SegmentNode {
    /// Create a segment at `position` following `parent`.
    pub fn new(spec: &NodeSpec, position: Vec2, parent: NodeParent) -> Self {
        Self {
            rect: Rect::from_parts(position, spec.size),
            offset: spec.offset,
            max_distance: spec.max_distance,
            part: spec.part,
            parent,
        }
    }

    /// Collision rectangle.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.rect
    }

    /// Top-left corner.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.rect.position
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Sprite offset from the position.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Slack before the segment follows.
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Sprite role.
    pub fn part(&self) -> BodyPart {
        self.part
    }

    /// What this segment follows.
    pub fn parent(&self) -> NodeParent {
        self.parent
    }

    /// Close the gap to `parent_center` if it exceeds `max_distance`.
    ///
    /// Moves `speed * delta` along the straight line toward the parent.
    /// Returns whether the segment moved.
    pub fn update(&mut self, parent_center: Vec2, speed: f32, delta: f32) -> bool {
        let gap = parent_center - self.center();
        if gap.length() <= self.max_distance {
            return false;
        }

        self.rect.position += gap.normalize_or_zero() * speed * delta;
        true
    }

    /// Draw `sprite` at the offset position.
    pub fn draw(&self, sprite: Sprite, out: &mut RenderList) {
        out.push(DrawCommand::Sprite {
            sprite,
            position: self.rect.position + self.offset,
        });
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn spec(max_distance: f32) -> NodeSpec {
        NodeSpec {
            part: BodyPart::Middle2,
            size: Vec2::new(17.0, 15.0),
            offset: Vec2::new(-8.0, -8.0),
            max_distance,
        }
    }

    #[test]
    fn test_waits_within_slack() {
        let mut node = SegmentNode::new(&spec(13.0), Vec2::ZERO, NodeParent::Head);
        let parent = node.center() + Vec2::new(13.0, 0.0);

        assert!(!node.update(parent, 100.0, 1.0 / 60.0));
        assert_eq!(node.position(), Vec2::ZERO);
    }

    #[test]
    fn test_follows_straight_toward_parent() {
        let mut node = SegmentNode::new(&spec(13.0), Vec2::ZERO, NodeParent::Head);
        let parent = node.center() + Vec2::new(0.0, 30.0);

        assert!(node.update(parent, 120.0, 0.5));
        assert!((node.position() - Vec2::new(0.0, 60.0)).length() < 1e-4);
    }

    #[test]
    fn test_draw_applies_offset() {
        let node = SegmentNode::new(&spec(13.0), Vec2::new(40.0, 40.0), NodeParent::Node(1));
        let sprite = Sprite { sheet: "body.png", row: 2, column: 0, width: 32, height: 30 };
        let mut out = RenderList::new();

        node.draw(sprite, &mut out);

        assert_eq!(
            out.commands(),
            &[DrawCommand::Sprite { sprite, position: Vec2::new(32.0, 32.0) }]
        );
    }

    proptest! {
        /// A segment moves exactly when it is out of slack, and then by
        /// one step along the line to its parent.
        #[test]
        fn prop_update_moves_only_out_of_slack(
            px in -200.0f32..200.0,
            py in -200.0f32..200.0,
            max_distance in 1.0f32..30.0,
            speed in 50.0f32..250.0,
        ) {
            let mut node = SegmentNode::new(&spec(max_distance), Vec2::ZERO, NodeParent::Head);
            let parent = Vec2::new(px, py);
            let before = node.center().distance(parent);
            let step = speed / 60.0;

            let moved = node.update(parent, speed, 1.0 / 60.0);
            let after = node.center().distance(parent);

            prop_assert_eq!(moved, before > max_distance);
            if moved {
                prop_assert!((after - (before - step).abs()).abs() < 1e-3);
            } else {
                prop_assert_eq!(node.position(), Vec2::ZERO);
            }
        }

        /// When the parent moves first and no faster than the segment,
        /// the segment never ends a tick out of slack.
        #[test]
        fn prop_follower_stays_within_slack(
            headings in prop::collection::vec(0.0f32..360.0, 1..120),
            max_distance in 5.0f32..30.0,
            speed in 50.0f32..250.0,
        ) {
            let delta = 1.0 / 60.0;
            let mut node = SegmentNode::new(&spec(max_distance), Vec2::ZERO, NodeParent::Head);
            let mut parent = node.center();

            for heading in headings {
                parent += Vec2::from_angle(heading.to_radians()) * speed * delta;
                node.update(parent, speed, delta);
                prop_assert!(node.center().distance(parent) <= max_distance + 1e-3);
            }
        }
    }
}
