//! # Moldorm Arena
//!
//! Simulation of the Moldorm boss fight: a worm whose head bounces around
//! the arena dragging a chain of trailing segments, attackable only
//! through a hitbox proxy.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       MOLDORM ARENA                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── rect.rs     - Axis-aligned rectangles                   │
//! │  └── hash.rs     - State hashing for replays                 │
//! │                                                              │
//! │  game/           - Encounter logic                           │
//! │  ├── moldorm/    - Head, segments, hitbox proxy              │
//! │  ├── dialog.rs   - Typewriter intro                          │
//! │  ├── encounter.rs- Tick loop                                 │
//! │  ├── level.rs    - Terrain, registry, effects, events        │
//! │  ├── collision.rs- Collision capabilities                    │
//! │  ├── player.rs   - Player body                               │
//! │  ├── effect.rs   - Screen fades                              │
//! │  ├── assets.rs   - Sprite handles                            │
//! │  ├── render.rs   - Draw commands                             │
//! │  ├── input.rs    - Key presses                               │
//! │  ├── events.rs   - Game events                               │
//! │  └── config.rs   - Tunables                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! The simulation has no clock, no randomness and no hash maps: a fixed
//! `delta` and the same inputs reproduce the same state hash on every run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::rect::Rect;
pub use crate::core::hash::StateHash;
pub use game::assets::MoldormAssets;
pub use game::config::EncounterConfig;
pub use game::encounter::{Encounter, EncounterError, EncounterPhase, TickResult};
pub use game::input::{InputState, Key};
pub use game::moldorm::Moldorm;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at `TICK_RATE`
pub const TICK_DELTA: f32 = 1.0 / TICK_RATE as f32;
