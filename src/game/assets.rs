//! Sprite Assets
//!
//! Sprite handles addressed by sheet path and grid coordinates. Decoding
//! pixels is the renderer's job; the simulation only passes handles around.
//!
//! The boss's handles are process-wide: `MoldormAssets::load()` initializes
//! them once, every boss instance reads them afterwards.

use glam::Vec2;
use once_cell::sync::OnceCell;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Asset errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssetError {
    /// Sprite dimensions are zero or do not fit the sheet.
    #[error("sprite sheet {path}: {sprite_width}x{sprite_height} sprites do not fit a {width}x{height} image")]
    BadGeometry {
        path: &'static str,
        width: u32,
        height: u32,
        sprite_width: u32,
        sprite_height: u32,
    },

    /// Requested sprites fall outside the sheet's grid.
    #[error("sprite sheet {path}: row {row}, {count} sprites requested but grid is {rows}x{columns}")]
    OutOfGrid {
        path: &'static str,
        row: u32,
        count: u32,
        rows: u32,
        columns: u32,
    },

    /// `MoldormAssets::get()` before `MoldormAssets::load()`.
    #[error("moldorm assets not loaded")]
    NotLoaded,
}

// =============================================================================
// SPRITES
// =============================================================================

/// Handle to one cell of a sprite sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Sprite {
    /// Sheet image path
    pub sheet: &'static str,
    /// Grid row
    pub row: u32,
    /// Grid column
    pub column: u32,
    /// Sprite width in pixels
    pub width: u32,
    /// Sprite height in pixels
    pub height: u32,
}

/// Image cut into a grid of equally-sized sprites.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteSheet {
    path: &'static str,
    width: u32,
    height: u32,
    sprite_width: u32,
    sprite_height: u32,
}

impl SpriteSheet {
    /// Describe a sheet of `width`x`height` pixels cut into
    /// `sprite_width`x`sprite_height` cells.
    pub fn new(
        path: &'static str,
        width: u32,
        height: u32,
        sprite_width: u32,
        sprite_height: u32,
    ) -> Result<Self, AssetError> {
        if sprite_width == 0 || sprite_height == 0 || sprite_width > width || sprite_height > height {
            return Err(AssetError::BadGeometry {
                path,
                width,
                height,
                sprite_width,
                sprite_height,
            });
        }

        Ok(Self { path, width, height, sprite_width, sprite_height })
    }

    /// Image path.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Number of grid rows.
    pub fn rows(&self) -> u32 {
        self.height / self.sprite_height
    }

    /// Number of grid columns.
    pub fn columns(&self) -> u32 {
        self.width / self.sprite_width
    }

    /// The first `count` sprites of `row`.
    pub fn sprites(&self, row: u32, count: u32) -> Result<Vec<Sprite>, AssetError> {
        if row >= self.rows() || count == 0 || count > self.columns() {
            return Err(AssetError::OutOfGrid {
                path: self.path,
                row,
                count,
                rows: self.rows(),
                columns: self.columns(),
            });
        }

        Ok((0..count)
            .map(|column| Sprite {
                sheet: self.path,
                row,
                column,
                width: self.sprite_width,
                height: self.sprite_height,
            })
            .collect())
    }

    /// A single sprite.
    pub fn sprite(&self, row: u32, column: u32) -> Result<Sprite, AssetError> {
        let mut row_sprites = self.sprites(row, column + 1)?;
        row_sprites.pop().ok_or(AssetError::OutOfGrid {
            path: self.path,
            row,
            count: column + 1,
            rows: self.rows(),
            columns: self.columns(),
        })
    }
}

/// Animation frames plus playback parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteSet {
    frames: Vec<Sprite>,
    idle_frame: usize,
    frame_duration: f32,
    origin: Vec2,
}

impl SpriteSet {
    /// Create a sprite set.
    ///
    /// `frame_duration` is in seconds; `origin` is the set's anchor inside
    /// the frame.
    pub fn new(frames: Vec<Sprite>, idle_frame: usize, frame_duration: f32, origin: Vec2) -> Self {
        Self { frames, idle_frame, frame_duration, origin }
    }

    /// Frame shown when the animation is not running.
    pub fn idle(&self) -> Option<Sprite> {
        self.frames.get(self.idle_frame).or_else(|| self.frames.first()).copied()
    }

    /// Frame shown `elapsed` seconds into a looping animation.
    pub fn frame_at(&self, elapsed: f32) -> Option<Sprite> {
        if self.frames.is_empty() || self.frame_duration <= 0.0 {
            return self.idle();
        }

        let index = (elapsed.max(0.0) / self.frame_duration) as usize % self.frames.len();
        self.frames.get(index).copied()
    }

    /// Anchor inside the frame.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if the set has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

// =============================================================================
// MOLDORM ASSETS
// =============================================================================

/// Body sprite sheet path.
pub const MOLDORM_SHEET_PATH: &str = "charset/moldorm/body.png";

/// Visual role of a body segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    /// Last segment
    Tail,
    /// Smallest middle segment
    Middle1,
    /// Medium middle segment
    Middle2,
    /// Largest middle segment
    Middle3,
}

/// Sprite handles for the Moldorm boss.
#[derive(Clone, Debug, PartialEq)]
pub struct MoldormAssets {
    /// Head animation
    pub head: SpriteSet,
    /// Tail segment
    pub tail: Sprite,
    /// Middle segment, row 1
    pub middle1: Sprite,
    /// Middle segment, row 2
    pub middle2: Sprite,
    /// Middle segment, row 3
    pub middle3: Sprite,
}

static MOLDORM_ASSETS: OnceCell<MoldormAssets> = OnceCell::new();

impl MoldormAssets {
    /// Cut the body sheet into the boss's sprites.
    ///
    /// One 32x30 column, five rows: tail, three middles, head.
    pub fn build() -> Result<Self, AssetError> {
        let sheet = SpriteSheet::new(MOLDORM_SHEET_PATH, 32, 150, 32, 30)?;

        Ok(Self {
            tail: sheet.sprite(0, 0)?,
            middle1: sheet.sprite(1, 0)?,
            middle2: sheet.sprite(2, 0)?,
            middle3: sheet.sprite(3, 0)?,
            head: SpriteSet::new(sheet.sprites(4, 1)?, 0, 0.030, Vec2::new(49.0, 50.0)),
        })
    }

    /// Initialize the process-wide handles. Later calls return the same set.
    pub fn load() -> Result<&'static Self, AssetError> {
        MOLDORM_ASSETS.get_or_try_init(Self::build)
    }

    /// The process-wide handles.
    pub fn get() -> Result<&'static Self, AssetError> {
        MOLDORM_ASSETS.get().ok_or(AssetError::NotLoaded)
    }

    /// Sprite for a body segment.
    pub fn part(&self, part: BodyPart) -> Sprite {
        match part {
            BodyPart::Tail => self.tail,
            BodyPart::Middle1 => self.middle1,
            BodyPart::Middle2 => self.middle2,
            BodyPart::Middle3 => self.middle3,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
