//! Crocodiles lurk in water.
//!
//! Whether the croc is in water is sampled every [`WATER_SAMPLE_SECONDS`]
//! rather than every tick. In water it swims fast and bites harder; its
//! wander points are pulled toward the nearest water.

use ai_agent::leaves::{acquire_target, engage, flee_when_hurt, return_home, wander};
use ai_agent::nodes::{action, condition, selector, sequence, CreatureNode};
use ai_agent::{Agent, AgentState, SpeciesHooks, SpeedTier, Vec2, World};
use ai_bt::BtStatus;
use ai_core::{BbKey, TickContext};

const WATER: BbKey<WaterSense> = BbKey::new(0x3601);

pub const WATER_SAMPLE_SECONDS: f64 = 0.5;
pub const SWIM_SPEED_MULTIPLIER: f32 = 1.8;
pub const WATER_DAMAGE_MULTIPLIER: f32 = 1.25;
/// How far a wander point may be pulled to reach water.
pub const WATER_SEARCH_RADIUS: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterSense {
    pub in_water: bool,
    pub next_sample_at: f64,
}

pub fn hooks() -> SpeciesHooks {
    SpeciesHooks {
        on_update: Some(on_update),
        patrol_bias: Some(patrol_bias),
        speed_multiplier: Some(speed_multiplier),
        environment_bonus: Some(environment_bonus),
        ..SpeciesHooks::none()
    }
}

pub fn in_water(agent: &Agent) -> bool {
    agent
        .context()
        .species
        .get_copied(WATER)
        .is_some_and(|w| w.in_water)
}

fn on_update(agent: &mut Agent, ctx: &TickContext, world: &mut dyn World) {
    let now = ctx.now_seconds;
    let due = agent
        .context()
        .species
        .get_copied(WATER)
        .map_or(true, |w| now >= w.next_sample_at);
    if !due {
        return;
    }
    let wet = world.is_water(agent.position());
    if wet != in_water(agent) {
        tracing::trace!(agent = agent.id(), in_water = wet, "water state");
    }
    agent.context_mut().species.set(
        WATER,
        WaterSense {
            in_water: wet,
            next_sample_at: now + WATER_SAMPLE_SECONDS,
        },
    );
}

fn patrol_bias(agent: &Agent, world: &dyn World, candidate: Vec2) -> Vec2 {
    world
        .nearest_water(candidate, WATER_SEARCH_RADIUS)
        .or_else(|| world.nearest_water(agent.home(), WATER_SEARCH_RADIUS))
        .unwrap_or(candidate)
}

fn speed_multiplier(agent: &Agent) -> f32 {
    if in_water(agent) {
        SWIM_SPEED_MULTIPLIER
    } else {
        1.0
    }
}

fn environment_bonus(agent: &Agent) -> f32 {
    if in_water(agent) {
        WATER_DAMAGE_MULTIPLIER
    } else {
        1.0
    }
}

/// Drifts in the water, keeping still between wander points.
fn lurk() -> CreatureNode {
    action(|_ctx, agent, world| {
        if agent.wander(world) {
            agent.set_state(AgentState::Swim);
        } else {
            agent.hold(world);
            agent.set_state(AgentState::Idle);
        }
        Ok(BtStatus::Success)
    })
}

pub fn tree() -> CreatureNode {
    selector(vec![
        flee_when_hurt(SpeedTier::Run),
        sequence(vec![acquire_target(), engage(SpeedTier::Run)]),
        return_home(),
        sequence(vec![condition(|_ctx, agent, _world| in_water(agent)), lurk()]),
        wander(),
    ])
}
