//! Dialog Typewriter
//!
//! Two-line messages revealed a character at a time. A fully revealed
//! message stays up until the player confirms it.

use glam::Vec2;

use crate::game::config::{MessageConfig, ViewportConfig};
use crate::game::input::{InputState, Key};
use crate::game::render::{DrawCommand, RenderList};

/// Offset of the first line from the bottom of the viewport.
const LINE1_FROM_BOTTOM: f32 = 74.0;

/// Offset of the second line from the bottom of the viewport.
const LINE2_FROM_BOTTOM: f32 = 37.0;

/// One message.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    line1: String,
    line2: String,
    speed: f32,
    length: usize,
}

impl Message {
    /// Create a message revealed at `speed` characters per second.
    pub fn new(line1: impl Into<String>, line2: impl Into<String>, speed: f32) -> Self {
        let line1 = line1.into();
        let line2 = line2.into();
        let length = line1.chars().count() + line2.chars().count();
        Self { line1, line2, speed, length }
    }

    /// Characters across both lines.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Reveal speed in characters per second.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Visible part of both lines once `until` characters are revealed.
    pub fn visible(&self, until: usize) -> (&str, &str) {
        let line1_len = self.line1.chars().count();

        if until >= self.length {
            (&self.line1, &self.line2)
        } else if until >= line1_len {
            (&self.line1, char_prefix(&self.line2, until - line1_len))
        } else {
            (char_prefix(&self.line1, until), "")
        }
    }
}

impl From<&MessageConfig> for Message {
    fn from(config: &MessageConfig) -> Self {
        Self::new(config.line1.clone(), config.line2.clone(), config.speed)
    }
}

/// The first `count` characters of `text`.
fn char_prefix(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// A sequence of messages.
#[derive(Clone, Debug, PartialEq)]
pub struct Dialog {
    messages: Vec<Message>,
    elapsed: f32,
    current: usize,
    line1_position: Vec2,
    line2_position: Vec2,
}

impl Dialog {
    /// Create a dialog laid out for `viewport`.
    pub fn new(messages: Vec<Message>, viewport: &ViewportConfig) -> Self {
        let x = viewport.width - viewport.min_width;

        Self {
            messages,
            elapsed: 0.0,
            current: 0,
            line1_position: Vec2::new(x, viewport.height - LINE1_FROM_BOTTOM),
            line2_position: Vec2::new(x, viewport.height - LINE2_FROM_BOTTOM),
        }
    }

    /// Index of the message on screen.
    pub fn index(&self) -> usize {
        self.current
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the dialog has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Seconds since the current message appeared.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Message on screen, if any is left.
    pub fn current(&self) -> Option<&Message> {
        self.messages.get(self.current)
    }

    /// Characters of the current message revealed so far.
    pub fn revealed(&self) -> usize {
        self.current()
            .map_or(0, |message| (self.elapsed * message.speed).max(0.0) as usize)
    }

    /// Every message has been confirmed.
    pub fn is_finished(&self) -> bool {
        self.current >= self.messages.len()
    }

    /// Advance by `delta` seconds.
    ///
    /// A confirm press is consumed only once the current message is fully
    /// revealed. Returns the new index when the dialog moves on.
    pub fn tick(&mut self, delta: f32, input: &mut InputState) -> Option<usize> {
        let message = self.messages.get(self.current)?;
        self.elapsed += delta;

        if self.elapsed * message.speed >= message.length as f32 && input.consume(Key::Action) {
            self.current += 1;
            self.elapsed = 0.0;
            return Some(self.current);
        }

        None
    }

    /// Draw the revealed text of the current message.
    pub fn render(&self, out: &mut RenderList) {
        let Some(message) = self.current() else {
            return;
        };
        let until = self.revealed();
        let (line1, line2) = message.visible(until);

        out.push(DrawCommand::Text {
            position: self.line1_position,
            text: line1.to_string(),
        });

        if until >= message.line1.chars().count() {
            out.push(DrawCommand::Text {
                position: self.line2_position,
                text: line2.to_string(),
            });
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dialog(messages: Vec<Message>) -> Dialog {
        Dialog::new(messages, &ViewportConfig::default())
    }

    fn rendered(dialog: &Dialog) -> Vec<String> {
        let mut out = RenderList::new();
        dialog.render(&mut out);
        out.texts().map(str::to_string).collect()
    }

    #[test]
    fn test_confirm_after_full_reveal() {
        let mut dialog = dialog(vec![Message::new("AB", "CD", 1.0)]);
        let mut input = InputState::new();

        assert_eq!(dialog.revealed(), 0);
        assert_eq!(rendered(&dialog), vec![""]);

        for _ in 0..4 {
            assert_eq!(dialog.tick(1.0, &mut input), None);
        }
        assert_eq!(dialog.index(), 0);
        assert_eq!(rendered(&dialog), vec!["AB", "CD"]);

        input.press(Key::Action);
        assert_eq!(dialog.tick(0.0, &mut input), Some(1));
        assert!(dialog.is_finished());
        assert!(input.is_idle());
        assert!(rendered(&dialog).is_empty());
    }

    #[test]
    fn test_early_confirm_is_kept() {
        let mut dialog = dialog(vec![Message::new("AB", "CD", 1.0)]);
        let mut input = InputState::with_key(Key::Action);

        assert_eq!(dialog.tick(1.0, &mut input), None);
        assert!(input.is_pressed(Key::Action));

        assert_eq!(dialog.tick(3.0, &mut input), Some(1));
    }

    #[test]
    fn test_partial_reveal() {
        let mut dialog = dialog(vec![Message::new("Hello", "world", 2.0)]);
        let mut input = InputState::new();

        dialog.tick(1.0, &mut input);
        assert_eq!(rendered(&dialog), vec!["He"]);

        dialog.tick(2.0, &mut input);
        assert_eq!(rendered(&dialog), vec!["Hello", "w"]);
    }

    #[test]
    fn test_multibyte_prefix() {
        let message = Message::new("héllo", "ñu", 1.0);
        assert_eq!(message.length(), 7);
        assert_eq!(message.visible(2), ("hé", ""));
        assert_eq!(message.visible(6), ("héllo", "ñ"));
    }

    #[test]
    fn test_empty_dialog_is_finished() {
        let mut dialog = dialog(Vec::new());
        let mut input = InputState::with_key(Key::Action);

        assert!(dialog.is_finished());
        assert_eq!(dialog.tick(1.0, &mut input), None);
        assert!(input.is_pressed(Key::Action));
    }

    #[test]
    fn test_layout_from_viewport() {
        let viewport = ViewportConfig { width: 320.0, height: 240.0, min_width: 256.0 };
        let mut dialog = Dialog::new(vec![Message::new("A", "B", 10.0)], &viewport);
        dialog.tick(1.0, &mut InputState::new());

        let mut out = RenderList::new();
        dialog.render(&mut out);
        let positions: Vec<Vec2> = out
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { position, .. } => Some(*position),
                _ => None,
            })
            .collect();

        assert_eq!(positions, vec![Vec2::new(64.0, 166.0), Vec2::new(64.0, 203.0)]);
    }

    proptest! {
        /// The index only moves on a consumed confirm and never passes the end.
        #[test]
        fn prop_index_bounded(
            steps in prop::collection::vec((0.0f32..2.0, any::<bool>()), 0..60),
            count in 0usize..4,
        ) {
            let messages = (0..count).map(|i| Message::new("abc", format!("{i}"), 3.0)).collect();
            let mut dialog = dialog(messages);

            for (delta, confirm) in steps {
                let mut input = InputState::new();
                if confirm {
                    input.press(Key::Action);
                }
                let before = dialog.index();
                let advanced = dialog.tick(delta, &mut input);

                prop_assert!(dialog.index() <= count);
                match advanced {
                    Some(index) => {
                        prop_assert!(confirm && !input.is_pressed(Key::Action));
                        prop_assert_eq!(index, before + 1);
                    }
                    None => prop_assert_eq!(dialog.index(), before),
                }
            }
        }
    }
}
