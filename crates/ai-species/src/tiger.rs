//! Tigers stalk.
//!
//! While the prey has not looked at it, a tiger creeps in at walking pace and
//! its first strike is an ambush worth [`AMBUSH_MULTIPLIER`]. The moment the
//! prey faces the tiger (within the [`DETECT_DOT`] cone) the stalk is blown
//! for the rest of the pursuit: the tiger sprints and hits normally.

use ai_agent::leaves::{
    acquire_target, chase_step, flee_when_hurt, investigate, return_home, wander,
};
use ai_agent::nodes::{action, selector, sequence, CreatureNode};
use ai_agent::{
    Agent, AgentState, DamageKind, EntityId, EntityInfo, SpeciesHooks, SpeedTier, Strike, Vec2,
    World,
};
use ai_bt::BtStatus;
use ai_core::{BbKey, TickContext};

const STALK: BbKey<Stalk> = BbKey::new(0x3501);

/// Prey facing within this cosine of the tiger counts as having spotted it.
pub const DETECT_DOT: f32 = 0.5;
pub const AMBUSH_MULTIPLIER: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stalk {
    pub target: EntityId,
    pub detected: bool,
}

pub fn hooks() -> SpeciesHooks {
    SpeciesHooks {
        on_update: Some(on_update),
        target_bonus: Some(target_bonus),
        ..SpeciesHooks::none()
    }
}

fn on_update(agent: &mut Agent, _ctx: &TickContext, _world: &mut dyn World) {
    observe_prey(agent);
}

/// Refreshes the stalk record for the current target. Detection sticks until
/// the target changes or is lost.
pub fn observe_prey(agent: &mut Agent) -> Option<Stalk> {
    let Some(target) = agent.target_info() else {
        agent.context_mut().species.remove(STALK);
        return None;
    };

    let mut stalk = match agent.context().species.get_copied(STALK) {
        Some(s) if s.target == target.id => s,
        _ => Stalk {
            target: target.id,
            detected: false,
        },
    };
    if !stalk.detected && spotted_by(agent, &target) {
        stalk.detected = true;
        tracing::debug!(agent = agent.id(), prey = %target.id, "stalk detected");
    }
    agent.context_mut().species.set(STALK, stalk);
    Some(stalk)
}

fn target_bonus(agent: &Agent, target: &EntityInfo) -> f32 {
    match stalk(agent) {
        Some(s) if s.target == target.id && !s.detected => AMBUSH_MULTIPLIER,
        _ => 1.0,
    }
}

/// Whether `prey` is facing the tiger.
pub fn spotted_by(agent: &Agent, prey: &EntityInfo) -> bool {
    let to_tiger = (agent.position() - prey.position).normalize_or_zero();
    to_tiger != Vec2::ZERO && prey.facing.normalize_or_zero().dot(to_tiger) >= DETECT_DOT
}

pub fn stalk(agent: &Agent) -> Option<Stalk> {
    agent.context().species.get_copied(STALK)
}

/// Creeps up undetected, sprints once detected, strikes in range.
fn hunt() -> CreatureNode {
    action(|ctx, agent, world| {
        let Some(target) = agent.target_info() else {
            return Ok(BtStatus::Failure);
        };
        let detected = observe_prey(agent).map_or(true, |s| s.detected);

        if agent.in_reach(target.position, agent.stats().live.attack_range) {
            agent.hold(world);
            agent.set_state(AgentState::Attack);
            let kind = if detected {
                DamageKind::Melee
            } else {
                DamageKind::Ambush
            };
            let strike = Strike::new(kind, 1.0);
            let landed = agent.attack_with(ctx.now_seconds, world, target.id, strike);
            if landed && !detected {
                // an ambush only works once
                if let Some(s) = agent.context_mut().species.get_mut(STALK) {
                    s.detected = true;
                }
            }
            return Ok(if landed {
                BtStatus::Success
            } else {
                BtStatus::Running
            });
        }

        if detected {
            return Ok(chase_step(agent, world, SpeedTier::Sprint));
        }
        let status = chase_step(agent, world, SpeedTier::Walk);
        if status == BtStatus::Running {
            agent.set_state(AgentState::Stalk);
        }
        Ok(status)
    })
}

pub fn tree() -> CreatureNode {
    selector(vec![
        flee_when_hurt(SpeedTier::Sprint),
        sequence(vec![acquire_target(), hunt()]),
        investigate(),
        return_home(),
        wander(),
    ])
}
