//! Render List
//!
//! Drawing produces backend-agnostic commands; the host replays them
//! on whatever renderer it owns.

use glam::Vec2;

use crate::core::rect::Rect;
use crate::game::assets::Sprite;

/// RGB color, components in 0..=1.
pub type Color = [f32; 3];

/// Debug box color for boss parts.
pub const DEBUG_BLUE: Color = [0.0, 0.0, 1.0];

/// Debug box color for terrain and the player.
pub const DEBUG_GREEN: Color = [0.0, 1.0, 0.0];

/// One drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Sprite with its top-left corner at `position`.
    Sprite {
        sprite: Sprite,
        position: Vec2,
    },

    /// Sprite drawn under a translate-then-rotate transform:
    /// translate to `anchor`, rotate by `rotation` degrees, draw at `offset`.
    RotatedSprite {
        sprite: Sprite,
        anchor: Vec2,
        rotation: f32,
        offset: Vec2,
    },

    /// Outline of a rectangle (debug mode).
    DebugBox {
        rect: Rect,
        color: Color,
    },

    /// Line of text with its top-left corner at `position`.
    Text {
        position: Vec2,
        text: String,
    },

    /// Full-screen black overlay with the given opacity.
    Overlay {
        alpha: f32,
    },
}

/// Commands for one frame, in paint order.
#[derive(Clone, Debug, Default)]
pub struct RenderList {
    commands: Vec<DrawCommand>,
}

impl RenderList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command.
    #[inline]
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// All commands in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if nothing was drawn.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop all commands (reuse the allocation for the next frame).
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Iterate over the text commands.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Count the debug boxes.
    pub fn debug_box_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::DebugBox { .. }))
            .count()
    }
}
