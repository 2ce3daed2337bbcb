//! Moldorm Arena
//!
//! Runs a scripted Moldorm fight headless and checks the run replays to
//! the same state hash.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use glam::Vec2;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use moldorm::{
    Encounter, EncounterConfig, EncounterPhase, InputState, Key, MoldormAssets, StateHash,
    TICK_DELTA, TICK_RATE, VERSION,
    game::collision::{Collider, Movable},
    game::events::GameEventData,
    game::render::RenderList,
};

/// Headless Moldorm boss fight
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON encounter configuration (defaults apply to missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ticks to simulate
    #[arg(short, long, default_value_t = 3600)]
    ticks: u32,

    /// Attack every N ticks during the fight
    #[arg(short, long, default_value_t = 20)]
    strike_every: u32,

    /// Draw collision boxes
    #[arg(short, long)]
    debug: bool,
}

/// Outcome of one scripted run.
struct RunSummary {
    hash: StateHash,
    ticks: u32,
    phase: EncounterPhase,
    events: usize,
    draw_commands: usize,
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    info!("Moldorm Arena v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    if args.strike_every == 0 {
        bail!("--strike-every must be at least 1");
    }

    let mut config = match &args.config {
        Some(path) => EncounterConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => EncounterConfig::default(),
    };
    config.debug |= args.debug;

    MoldormAssets::load().context("loading moldorm sprites")?;

    info!("=== Starting Encounter ===");
    let first = run(&config, &args, true)?;

    info!("=== Encounter Results ===");
    info!("Phase: {:?} after {} ticks", first.phase, first.ticks);
    info!("Events: {}, draw commands in last frame: {}", first.events, first.draw_commands);
    info!("Final State Hash: {}", hex::encode(first.hash));

    info!("=== Verifying Determinism ===");
    let replay = run(&config, &args, false)?;
    info!("Replay State Hash: {}", hex::encode(replay.hash));

    if first.hash == replay.hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
        Ok(())
    } else {
        bail!("DETERMINISM FAILURE: Hashes differ!")
    }
}

/// Play the encounter with scripted input.
///
/// Confirms every intro message as soon as it is fully shown, and during
/// the fight periodically steps next to the tail and swings.
fn run(config: &EncounterConfig, args: &Args, log_events: bool) -> Result<RunSummary> {
    let mut encounter = Encounter::new(config)?;
    let mut events = 0;

    for t in 0..args.ticks {
        let mut input = InputState::new();

        match encounter.phase() {
            EncounterPhase::Intro => {
                let revealed = encounter
                    .dialog()
                    .current()
                    .is_some_and(|message| encounter.dialog().revealed() >= message.length());
                if revealed {
                    input.press(Key::Action);
                }
            }
            EncounterPhase::Fighting if t % args.strike_every == 0 => {
                stand_by_tail(&mut encounter);
                input.press(Key::Attack);
            }
            _ => {}
        }

        let result = encounter.tick(TICK_DELTA, &mut input);
        events += result.events.len();

        if log_events {
            for event in &result.events {
                log_event(event.tick, &event.data);
            }
        }

        if result.won {
            break;
        }
    }

    let mut frame = RenderList::new();
    encounter.draw(&mut frame);

    Ok(RunSummary {
        hash: encounter.compute_hash(),
        ticks: encounter.tick_count(),
        phase: encounter.phase(),
        events,
        draw_commands: frame.len(),
    })
}

/// Teleport the player just above the boss's tail.
fn stand_by_tail(encounter: &mut Encounter) {
    let Some(tail) = encounter.boss().tail().map(|node| node.center()) else {
        return;
    };
    let size = encounter.level().player().bounds().size;
    let position = tail - Vec2::new(size.x * 0.5, size.y + 4.0);
    encounter.level_mut().player_mut().set_position(position);
}

fn log_event(tick: u32, data: &GameEventData) {
    match data {
        GameEventData::BossHit { health } => info!("Tick {}: boss hit, health {}", tick, health),
        GameEventData::BossSpeedChanged { speed } => info!("Tick {}: boss speed now {}", tick, speed),
        GameEventData::PlayerDamaged { amount, health, .. } => {
            warn!("Tick {}: player took {} damage, health {}", tick, amount, health)
        }
        GameEventData::BossDefeated => info!("Tick {}: boss defeated", tick),
        GameEventData::GameWon => info!("Tick {}: game won", tick),
        GameEventData::DialogAdvanced { index } => info!("Tick {}: dialog message {}", tick, index),
        _ => {}
    }
}
