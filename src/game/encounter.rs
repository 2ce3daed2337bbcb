//! Encounter Loop
//!
//! Runs the boss fight one tick at a time: intro dialog, fight, defeat
//! fade, win. Given the same configuration and the same inputs every run
//! produces the same state hash.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::info;

use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::rect::Rect;
use crate::game::assets::{AssetError, MoldormAssets};
use crate::game::collision::{check_collision, Body, Collider, Damageable, EntityKind};
use crate::game::config::{ConfigError, EncounterConfig};
use crate::game::dialog::{Dialog, Message};
use crate::game::events::{GameEvent, GameEventData};
use crate::game::input::{InputState, Key};
use crate::game::level::Level;
use crate::game::moldorm::Moldorm;
use crate::game::render::RenderList;

/// Encounter setup errors.
#[derive(Debug, Error)]
pub enum EncounterError {
    /// Unusable configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Sprites missing or malformed.
    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Encounter phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EncounterPhase {
    /// Intro dialog on screen
    Intro = 0,
    /// Boss active
    Fighting = 1,
    /// Boss dead, screen fading out
    Defeated = 2,
    /// Fade complete
    Won = 3,
}

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Whether the encounter was won this tick
    pub won: bool,
}

/// The boss fight.
#[derive(Debug)]
pub struct Encounter {
    level: Level,
    boss: Moldorm,
    dialog: Dialog,
    phase: EncounterPhase,
    debug: bool,
    assets: &'static MoldormAssets,
}

impl Encounter {
    /// Set up the arena, the boss and the intro.
    ///
    /// `MoldormAssets::load()` must have run first.
    pub fn new(config: &EncounterConfig) -> Result<Self, EncounterError> {
        config.validate()?;
        let assets = MoldormAssets::get()?;

        let mut level = Level::new(&config.arena, &config.player);
        let boss = Moldorm::new(&mut level, &config.boss)?;
        let dialog = Dialog::new(config.intro.iter().map(Message::from).collect(), &config.viewport);

        let phase = if dialog.is_finished() {
            EncounterPhase::Fighting
        } else {
            EncounterPhase::Intro
        };

        Ok(Self {
            level,
            boss,
            dialog,
            phase,
            debug: config.debug,
            assets,
        })
    }

    /// Current phase.
    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    /// Ticks simulated so far.
    pub fn tick_count(&self) -> u32 {
        self.level.tick()
    }

    /// The boss.
    pub fn boss(&self) -> &Moldorm {
        &self.boss
    }

    /// The level.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// The level, mutably (scripted player placement).
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    /// The intro dialog.
    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    /// Run one simulation tick of `delta` seconds.
    pub fn tick(&mut self, delta: f32, input: &mut InputState) -> TickResult {
        let mut result = TickResult::default();

        // 0. Advance tick counter
        self.level.advance_tick();

        // 1. Phase-specific logic
        match self.phase {
            EncounterPhase::Intro => self.tick_intro(delta, input),
            EncounterPhase::Fighting => self.tick_fight(delta, input),
            EncounterPhase::Defeated | EncounterPhase::Won => {}
        }

        // 2. Screen effect runs in every phase
        self.level.update_effect(delta);

        // 3. Collect events
        result.events = self.level.take_events();

        // 4. Check end condition
        let won = result.events.iter().any(|event| event.data == GameEventData::GameWon);
        if won && self.phase != EncounterPhase::Won {
            info!(tick = self.level.tick(), "encounter won");
            self.phase = EncounterPhase::Won;
            result.won = true;
        }

        result
    }

    fn tick_intro(&mut self, delta: f32, input: &mut InputState) {
        if let Some(index) = self.dialog.tick(delta, input) {
            self.level.push_event(GameEventData::DialogAdvanced { index });
        }

        if self.dialog.is_finished() {
            info!(tick = self.level.tick(), "intro finished, fight starts");
            self.phase = EncounterPhase::Fighting;
        }
    }

    fn tick_fight(&mut self, delta: f32, input: &mut InputState) {
        self.level.player_mut().tick(delta);

        if input.consume(Key::Attack) {
            let player = self.level.player();
            let (area, damage) = (player.attack_area(), player.attack_damage());
            self.strike(area, damage);
        }

        self.boss.update(&mut self.level, delta);

        if self.boss.health() <= 0 {
            self.boss.die(&mut self.level);
            self.phase = EncounterPhase::Defeated;
        }
    }

    /// Resolve a player attack covering `area` against the boss's hitbox.
    ///
    /// Returns whether the attack landed.
    pub fn strike(&mut self, area: Rect, amount: i32) -> bool {
        if !self.level.is_collidable(self.boss.hitbox().id()) {
            return false;
        }

        let attack = Body::entity(self.level.player().id(), EntityKind::Player, area);
        if !check_collision(&self.boss.hitbox(), &attack) {
            return false;
        }

        self.boss.hitbox_mut().damage(attack.tag().id, amount);
        self.level.push_event(GameEventData::BossHit { health: self.boss.health() });
        true
    }

    /// Emit the frame in paint order.
    pub fn draw(&self, out: &mut RenderList) {
        if self.debug {
            self.level.draw_debug(out);
        }

        self.boss.draw(self.assets, self.debug, out);
        if self.level.is_collidable(self.boss.hitbox().id()) {
            self.boss.hitbox().draw(self.assets, out);
        }

        if self.phase == EncounterPhase::Intro {
            self.dialog.render(out);
        }

        self.level.draw_effect(out);
    }

    /// Hash of the complete simulation state.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.level.tick(), |hasher| {
            hasher.update_u8(self.phase as u8);
            self.level.hash_into(hasher);
            self.boss.hash_into(hasher);
            hasher.update_u32(self.dialog.index() as u32);
            hasher.update_f32(self.dialog.elapsed());
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
