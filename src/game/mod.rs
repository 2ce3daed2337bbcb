//! Game Logic Module
//!
//! The Moldorm encounter and the small world it runs in.
//!
//! ## Module Structure
//!
//! - `moldorm`: Boss head, trailing segments, hitbox proxy
//! - `dialog`: Typewriter text for the intro
//! - `encounter`: Tick loop tying everything together
//! - `level`: Terrain, player, collidable registry, effects, events
//! - `collision`: Collision capabilities shared by every body
//! - `player`: Player body, health, sword reach
//! - `effect`: Screen fades
//! - `assets`: Sprite handles
//! - `render`: Backend-agnostic draw commands
//! - `input`: Key presses
//! - `events`: Game events for hosts and replays
//! - `config`: Tunables

pub mod assets;
pub mod collision;
pub mod config;
pub mod dialog;
pub mod effect;
pub mod encounter;
pub mod events;
pub mod input;
pub mod level;
pub mod moldorm;
pub mod player;
pub mod render;

// Re-export key types
pub use assets::MoldormAssets;
pub use config::EncounterConfig;
pub use encounter::{Encounter, EncounterError, EncounterPhase, TickResult};
pub use events::{GameEvent, GameEventData};
pub use input::{InputState, Key};
pub use moldorm::Moldorm;
