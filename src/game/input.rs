//! Input Capture
//!
//! Key presses delivered by the host, consumed at most once by the
//! simulation. Packed into bit flags like a single-frame input record.

use serde::{Serialize, Deserialize};

/// Keys the simulation reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Key {
    /// Confirm / talk / advance dialog
    Action = 0x01,
    /// Swing the sword
    Attack = 0x02,
}

impl Key {
    #[inline]
    const fn bit(self) -> u8 {
        self as u8
    }
}

/// Pending key presses.
///
/// A press stays pending until something consumes it, so a confirm
/// pressed before a message is fully revealed is kept for later.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    /// Pending presses (packed bits):
    /// - Bit 0: Action
    /// - Bit 1: Attack
    /// - Bit 2-7: Reserved
    pub pending: u8,
}

impl InputState {
    /// Create an empty input state.
    pub const fn new() -> Self {
        Self { pending: 0 }
    }

    /// Create an input state with `key` already pressed.
    pub const fn with_key(key: Key) -> Self {
        Self { pending: key.bit() }
    }

    /// Register a press.
    #[inline]
    pub fn press(&mut self, key: Key) {
        self.pending |= key.bit();
    }

    /// Is `key` pending?
    #[inline]
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pending & key.bit() != 0
    }

    /// Consume a pending press. Returns true if `key` was pending.
    #[inline]
    pub fn consume(&mut self, key: Key) -> bool {
        let pressed = self.is_pressed(key);
        self.pending &= !key.bit();
        pressed
    }

    /// Drop every pending press.
    #[inline]
    pub fn clear(&mut self) {
        self.pending = 0;
    }

    /// Check if nothing is pending.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pending == 0
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_once() {
        let mut input = InputState::new();
        assert!(!input.consume(Key::Action));

        input.press(Key::Action);
        assert!(input.is_pressed(Key::Action));
        assert!(input.consume(Key::Action));
        assert!(!input.consume(Key::Action));
        assert!(input.is_idle());
    }

    #[test]
    fn test_keys_are_independent() {
        let mut input = InputState::with_key(Key::Attack);
        input.press(Key::Action);

        assert!(input.consume(Key::Action));
        assert!(input.is_pressed(Key::Attack));

        input.clear();
        assert!(!input.is_pressed(Key::Attack));
    }
}
