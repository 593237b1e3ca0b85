#![allow(dead_code)]

use ai_agent::{Agent, AgentTuning, BaseStats, EntityId, EntityInfo, SandboxWorld, Species, Vec2};
use ai_core::TickContext;

pub const DT: f32 = 0.1;

pub fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, DT, tick as f64 * DT as f64, 99)
}

pub fn stats() -> BaseStats {
    BaseStats {
        max_health: 100.0,
        damage: 10.0,
        attack_range: 2.0,
        attack_cooldown: 1.0,
        walk_speed: 2.0,
        run_speed: 4.0,
        sprint_speed: 6.0,
        vision_range: 20.0,
        vision_angle: 90.0,
        hearing_range: 5.0,
        aggro_range: 12.0,
        territory_radius: 20.0,
        flee_health_fraction: 0.2,
        xp_reward: 10,
        loot_tier: 1,
    }
}

pub fn agent_at(id: u64, position: Vec2) -> Agent {
    Agent::new(id, Species::Wolf, position, stats(), AgentTuning::default(), 1)
}

pub fn player(world: &mut SandboxWorld, id: u64, position: Vec2) -> EntityId {
    let pid = EntityId::Player(id);
    let mut info = EntityInfo::new(pid, position);
    info.noise_radius = 3.0;
    world.upsert(info);
    pid
}

/// Runs `ticks` updates starting at `start`, mirroring the agent into the world.
pub fn run(agent: &mut Agent, world: &mut SandboxWorld, start: u64, ticks: u64) {
    for t in start..start + ticks {
        agent.update(&ctx(t), world);
        world.upsert(agent.info());
    }
}
