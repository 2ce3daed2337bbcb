//! Game Events
//!
//! Events generated during simulation. The host reacts to them
//! (audio, UI, scene transitions) and they make replays comparable.

use serde::{Serialize, Deserialize};

use crate::game::collision::BodyId;
use crate::game::effect::FadeDirection;

/// Priority for event processing order.
///
/// Lower value = processed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventPriority {
    /// Boss defeat and win processed first
    Outcome = 0,
    /// Then damage
    Damage = 1,
    /// Then registry changes
    World = 2,
    /// Then audio
    Audio = 3,
    /// Then visual effects
    Effect = 4,
    /// Lowest priority
    Other = 255,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Boss lost one health through its hitbox
    BossHit {
        health: i32,
    },

    /// Boss moved to another speed tier
    BossSpeedChanged {
        speed: f32,
    },

    /// Player took contact damage
    PlayerDamaged {
        source: BodyId,
        amount: i32,
        health: i32,
    },

    /// Boss health reached zero
    BossDefeated,

    /// A body left the level's collidable set
    CollidableRemoved {
        id: BodyId,
    },

    /// Queued music tracks dropped
    MusicQueueCleared,

    /// Current music fading out
    MusicFadeOut {
        seconds: f32,
    },

    /// Screen transition started
    EffectStarted {
        direction: FadeDirection,
        seconds: f32,
    },

    /// The game has been won
    GameWon,

    /// Dialog moved to the next message
    DialogAdvanced {
        index: usize,
    },
}

impl GameEventData {
    /// Processing priority of this kind of event.
    pub fn priority(&self) -> EventPriority {
        match self {
            GameEventData::BossDefeated | GameEventData::GameWon => EventPriority::Outcome,
            GameEventData::BossHit { .. } | GameEventData::PlayerDamaged { .. } => EventPriority::Damage,
            GameEventData::CollidableRemoved { .. } => EventPriority::World,
            GameEventData::MusicQueueCleared | GameEventData::MusicFadeOut { .. } => EventPriority::Audio,
            GameEventData::EffectStarted { .. } => EventPriority::Effect,
            GameEventData::BossSpeedChanged { .. } | GameEventData::DialogAdvanced { .. } => {
                EventPriority::Other
            }
        }
    }
}

/// A game event with timing and priority.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Processing priority
    pub priority: EventPriority,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event with the data's natural priority.
    pub fn new(tick: u32, data: GameEventData) -> Self {
        Self {
            tick,
            priority: data.priority(),
            data,
        }
    }

    /// Create boss hit event.
    pub fn boss_hit(tick: u32, health: i32) -> Self {
        Self::new(tick, GameEventData::BossHit { health })
    }

    /// Create player damaged event.
    pub fn player_damaged(tick: u32, source: BodyId, amount: i32, health: i32) -> Self {
        Self::new(tick, GameEventData::PlayerDamaged { source, amount, health })
    }

    /// Create game won event.
    pub fn game_won(tick: u32) -> Self {
        Self::new(tick, GameEventData::GameWon)
    }
}

impl PartialEq for GameEvent {
    fn eq(&self, other: &Self) -> bool {
        self.tick == other.tick && self.priority == other.priority
    }
}

impl Eq for GameEvent {}

impl PartialOrd for GameEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GameEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: tick, then priority
        self.tick
            .cmp(&other.tick)
            .then(self.priority.cmp(&other.priority))
    }
}
