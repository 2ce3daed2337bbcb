//! Core primitives.
//!
//! Geometry and state hashing shared by every game module.

pub mod rect;
pub mod hash;

// Re-export core types
pub use rect::Rect;
pub use hash::{StateHash, StateHasher, compute_state_hash};
