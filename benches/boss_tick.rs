//! Boss tick benchmarks: a single boss update and a full scripted fight.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use glam::Vec2;
use moldorm::game::config::{ArenaConfig, MoldormConfig, PlayerConfig};
use moldorm::game::level::Level;
use moldorm::{Encounter, EncounterConfig, InputState, Key, Moldorm, MoldormAssets, TICK_DELTA};

fn setup_boss() -> (Level, Moldorm) {
    let arena = ArenaConfig {
        width: 2000.0,
        height: 2000.0,
        ..ArenaConfig::default()
    };
    let player = PlayerConfig {
        spawn: Vec2::new(1900.0, 1900.0),
        ..PlayerConfig::default()
    };
    let mut level = Level::new(&arena, &player);
    let config = MoldormConfig {
        spawn: Vec2::new(1000.0, 200.0),
        ..MoldormConfig::default()
    };
    let boss = Moldorm::new(&mut level, &config).expect("default boss config is valid");
    (level, boss)
}

fn bench_boss_update(c: &mut Criterion) {
    c.bench_function("moldorm_update_600_ticks", |b| {
        b.iter_batched(
            setup_boss,
            |(mut level, mut boss)| {
                for _ in 0..600 {
                    boss.update(&mut level, black_box(TICK_DELTA));
                }
                (level, boss)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_encounter(c: &mut Criterion) {
    MoldormAssets::load().expect("sprites load");
    let config = EncounterConfig {
        intro: Vec::new(),
        ..EncounterConfig::default()
    };

    c.bench_function("encounter_full_fight", |b| {
        b.iter_batched(
            || Encounter::new(&config).expect("encounter builds"),
            |mut encounter| {
                for t in 0..1200u32 {
                    let mut input = if t % 20 == 0 {
                        InputState::with_key(Key::Attack)
                    } else {
                        InputState::new()
                    };
                    if encounter.tick(TICK_DELTA, &mut input).won {
                        break;
                    }
                }
                encounter.compute_hash()
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_boss_update, bench_encounter);
criterion_main!(benches);
