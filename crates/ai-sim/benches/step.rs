use ai_agent::{Species, Vec2};
use ai_sim::{PlayerSpec, SimConfig, SpawnSpec, Simulation};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn scenario() -> SimConfig {
    let spawns = vec![
        SpawnSpec {
            species: Species::Wolf,
            position: Vec2::new(20.0, 0.0),
            count: 5,
            rarity: None,
        },
        SpawnSpec {
            species: Species::Bison,
            position: Vec2::new(-20.0, 10.0),
            count: 8,
            rarity: None,
        },
        SpawnSpec {
            species: Species::Bear,
            position: Vec2::new(0.0, 25.0),
            count: 3,
            rarity: None,
        },
        SpawnSpec {
            species: Species::Tiger,
            position: Vec2::new(0.0, -25.0),
            count: 2,
            rarity: None,
        },
    ];
    let players = (0..4)
        .map(|i| PlayerSpec {
            id: i,
            position: Vec2::new(i as f32 * 4.0, 0.0),
            velocity: Vec2::new(0.5, 0.3),
            health: 1.0e6,
            dps: 5.0,
            attack_range: 2.5,
            noise_radius: 6.0,
        })
        .collect();
    SimConfig {
        spawns,
        players,
        ..SimConfig::default()
    }
}

fn bench_sim_step(c: &mut Criterion) {
    let Ok(mut sim) = Simulation::new(scenario()) else {
        return;
    };
    c.bench_function("ai-sim/step(agents=18,players=4)", |b| {
        b.iter(|| {
            sim.step();
            black_box(sim.live_agents());
        })
    });
}

criterion_group!(benches, bench_sim_step);
criterion_main!(benches);
