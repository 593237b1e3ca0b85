#![allow(dead_code)]

use ai_agent::{Agent, EntityId, EntityInfo, SandboxWorld, Vec2};
use ai_core::TickContext;
use ai_species::{Spawner, SpawnerConfig};

pub const DT: f32 = 0.1;

pub fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, DT, tick as f64 * DT as f64, 42)
}

pub fn spawner() -> Spawner {
    Spawner::new(SpawnerConfig {
        seed: 42,
        elite_chance: 0.0,
        ..SpawnerConfig::default()
    })
}

pub fn player(world: &mut SandboxWorld, id: u64, position: Vec2, facing: Vec2) -> EntityId {
    let pid = EntityId::Player(id);
    world.upsert(EntityInfo {
        id: pid,
        position,
        facing,
        alive: true,
        noise_radius: 3.0,
    });
    pid
}

/// One scheduler pass over `agents` in slice order.
pub fn step(agents: &mut [Agent], world: &mut SandboxWorld, tick: u64) {
    for agent in agents.iter_mut() {
        agent.update(&ctx(tick), world);
        world.upsert(agent.info());
    }
}

pub fn run(agents: &mut [Agent], world: &mut SandboxWorld, ticks: std::ops::Range<u64>) {
    for tick in ticks {
        step(agents, world, tick);
    }
}
