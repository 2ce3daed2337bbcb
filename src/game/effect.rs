//! Screen Effects
//!
//! Timed full-screen transitions with a completion signal.

use serde::{Serialize, Deserialize};

use crate::game::events::GameEventData;
use crate::game::render::{DrawCommand, RenderList};

/// Fade direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FadeDirection {
    /// From black to the scene
    In,
    /// From the scene to black
    Out,
}

/// Linear fade over a fixed duration.
#[derive(Clone, Debug, PartialEq)]
pub struct Fade {
    direction: FadeDirection,
    duration: f32,
    elapsed: f32,
    on_complete: Option<GameEventData>,
}

impl Fade {
    /// Create a fade.
    pub fn new(direction: FadeDirection, duration: f32) -> Self {
        Self {
            direction,
            duration,
            elapsed: 0.0,
            on_complete: None,
        }
    }

    /// Fade to black over `duration` seconds.
    pub fn out(duration: f32) -> Self {
        Self::new(FadeDirection::Out, duration)
    }

    /// Emit `event` once the fade completes.
    pub fn then(mut self, event: GameEventData) -> Self {
        self.on_complete = Some(event);
        self
    }

    /// Fade direction.
    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    /// Total duration in seconds.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Advance by `delta` seconds.
    ///
    /// Returns the completion event on the tick the fade finishes, and
    /// never again.
    pub fn tick(&mut self, delta: f32) -> Option<GameEventData> {
        if !self.is_finished() {
            self.elapsed += delta;
        }

        if self.is_finished() {
            self.on_complete.take()
        } else {
            None
        }
    }

    /// Check if the fade has run its course.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Progress in 0..=1.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Overlay opacity.
    pub fn alpha(&self) -> f32 {
        match self.direction {
            FadeDirection::Out => self.progress(),
            FadeDirection::In => 1.0 - self.progress(),
        }
    }

    /// Draw the overlay.
    pub fn draw(&self, out: &mut RenderList) {
        out.push(DrawCommand::Overlay { alpha: self.alpha() });
    }
}
