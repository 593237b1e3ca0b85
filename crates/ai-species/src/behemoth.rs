//! The behemoth is the boss species.
//!
//! Its phases come from [`ai_boss::phase`]: every update the hook feeds the
//! current health ratio in, and a crossed threshold enrages the behemoth for
//! a moment (it stands and roars while the shockwave goes off). In the last
//! phase it sprints after its target. Thresholds and multipliers come from
//! the profile the spawner attached.

use ai_agent::leaves::{acquire_target, engage, investigate, return_home, wander};
use ai_agent::nodes::{action, condition, selector, sequence, CreatureNode};
use ai_agent::{Agent, AgentState, SpeciesHooks, SpeedTier, World};
use ai_boss::phase;
use ai_bt::BtStatus;
use ai_core::TickContext;

pub fn hooks() -> SpeciesHooks {
    SpeciesHooks {
        on_update: Some(on_update),
        ..SpeciesHooks::none()
    }
}

fn on_update(agent: &mut Agent, ctx: &TickContext, world: &mut dyn World) {
    let profile = phase::profile_of(agent);
    if phase::track_phase(agent, ctx.now_seconds, world, &profile).is_some() {
        agent.reset_tree();
    }
}

fn enraged() -> CreatureNode {
    action(|ctx, agent, world| {
        if !phase::is_enraged(agent, ctx.now_seconds) {
            return Ok(BtStatus::Failure);
        }
        agent.hold(world);
        agent.set_state(AgentState::Enraged);
        Ok(BtStatus::Running)
    })
}

fn last_phase() -> CreatureNode {
    condition(|_ctx, agent, _world| phase::current_phase(agent) >= 3)
}

pub fn tree() -> CreatureNode {
    selector(vec![
        enraged(),
        sequence(vec![
            acquire_target(),
            selector(vec![
                sequence(vec![last_phase(), engage(SpeedTier::Sprint)]),
                engage(SpeedTier::Run),
            ]),
        ]),
        investigate(),
        return_home(),
        wander(),
    ])
}
