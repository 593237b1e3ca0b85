//! Leaves shared by every species.
//!
//! A vanished or invalid target is an ordinary `Failure` here, never a fault.

use ai_bt::BtStatus;
use ai_nav::Vec2;

use crate::agent::Agent;
use crate::nodes::{action, condition, selector, sequence, CreatureNode};
use crate::state::AgentState;
use crate::stats::SpeedTier;
use crate::world::World;

pub fn has_target() -> CreatureNode {
    condition(|_ctx, agent, _world| agent.target_info().is_some())
}

pub fn is_low_health() -> CreatureNode {
    condition(|_ctx, agent, _world| agent.is_low_health())
}

pub fn is_alerted() -> CreatureNode {
    condition(|_ctx, agent, _world| agent.context().alert >= agent.tuning().alert_threshold)
}

pub fn target_in_attack_range() -> CreatureNode {
    condition(|_ctx, agent, _world| {
        agent
            .target_info()
            .is_some_and(|t| agent.in_reach(t.position, agent.stats().live.attack_range))
    })
}

/// Takes the nearest perceived hostile inside aggro range as target.
pub fn acquire_target() -> CreatureNode {
    action(|_ctx, agent, _world| {
        if agent.target_info().is_some() {
            return Ok(BtStatus::Success);
        }
        let Some(seen) = agent.context().perceived else {
            return Ok(BtStatus::Failure);
        };
        if !agent.in_reach(seen.position, agent.stats().live.aggro_range) {
            return Ok(BtStatus::Failure);
        }
        agent.set_target(seen.id, Some(seen.position));
        agent.context_mut().target_info = Some(seen);
        agent.set_state(AgentState::Alert);
        tracing::debug!(agent = agent.id(), target = %seen.id, "target acquired");
        Ok(BtStatus::Success)
    })
}

/// Pursues the target until it is inside attack range.
///
/// Gives up (clears the target, heads home) once the target leaves the leash.
pub fn chase_target(tier: SpeedTier) -> CreatureNode {
    action(move |_ctx, agent, world| Ok(chase_step(agent, world, tier)))
}

/// One pursuit step; shared by species that pick their speed per tick.
pub fn chase_step(agent: &mut Agent, world: &mut dyn World, tier: SpeedTier) -> BtStatus {
    let Some(target) = agent.target_info() else {
        return BtStatus::Failure;
    };
    if agent.beyond_leash(target.position) {
        agent.clear_target();
        agent.set_state(AgentState::Return);
        return BtStatus::Failure;
    }
    if agent.in_reach(target.position, agent.stats().live.attack_range) {
        return BtStatus::Success;
    }
    agent.move_to(world, target.position, tier);
    agent.set_state(AgentState::Chase);
    BtStatus::Running
}

/// Basic melee. Running while waiting out the cooldown in range.
pub fn attack_target() -> CreatureNode {
    action(|ctx, agent, world| {
        let Some(target) = agent.target_info() else {
            return Ok(BtStatus::Failure);
        };
        if !agent.in_reach(target.position, agent.stats().live.attack_range) {
            return Ok(BtStatus::Failure);
        }
        agent.hold(world);
        agent.face_towards(target.position);
        agent.set_state(AgentState::Attack);
        if agent.attack(ctx.now_seconds, world, target.id) {
            Ok(BtStatus::Success)
        } else {
            Ok(BtStatus::Running)
        }
    })
}

/// `has_target -> (attack if in range | chase)`.
pub fn engage(tier: SpeedTier) -> CreatureNode {
    sequence(vec![
        has_target(),
        selector(vec![
            sequence(vec![target_in_attack_range(), attack_target()]),
            chase_target(tier),
        ]),
    ])
}

/// Runs away from the latest threat until out of its sight.
pub fn flee_from_threat(tier: SpeedTier) -> CreatureNode {
    action(move |_ctx, agent, world| {
        let threat = agent
            .context()
            .threat_position
            .or(agent.context().last_known_target_position);
        let Some(threat) = threat else {
            return Ok(BtStatus::Failure);
        };

        if agent.distance_to(threat) > agent.stats().live.vision_range {
            agent.context_mut().threat = None;
            agent.context_mut().threat_position = None;
            agent.clear_target();
            agent.set_state(AgentState::Return);
            return Ok(BtStatus::Success);
        }

        let mut away = (agent.position() - threat).normalize_or_zero();
        if away == Vec2::ZERO {
            away = -agent.facing();
        }
        let dest = agent.position() + away * agent.tuning().wander_radius;
        agent.move_to(world, dest, tier);
        agent.set_state(AgentState::Flee);
        Ok(BtStatus::Running)
    })
}

/// `is_low_health -> flee`.
pub fn flee_when_hurt(tier: SpeedTier) -> CreatureNode {
    sequence(vec![
        condition(|_ctx, agent, _world| {
            agent.is_low_health()
                && (agent.context().threat_position.is_some()
                    || agent.context().last_known_target_position.is_some())
        }),
        flee_from_threat(tier),
    ])
}

/// Walks to the last known target position while alerted and targetless.
pub fn investigate() -> CreatureNode {
    action(|_ctx, agent, world| {
        if agent.target_info().is_some() {
            return Ok(BtStatus::Failure);
        }
        let Some(spot) = agent.context().last_known_target_position else {
            return Ok(BtStatus::Failure);
        };
        if let Some(seen) = agent.context().perceived {
            if agent.in_reach(seen.position, agent.stats().live.aggro_range) {
                return Ok(BtStatus::Failure);
            }
        }
        if agent.context().alert < agent.tuning().alert_threshold {
            return Ok(BtStatus::Failure);
        }
        if agent.move_to(world, spot, SpeedTier::Walk) {
            agent.set_state(AgentState::Alert);
            Ok(BtStatus::Running)
        } else {
            agent.context_mut().last_known_target_position = None;
            agent.set_state(AgentState::Idle);
            Ok(BtStatus::Success)
        }
    })
}

/// Heads home once outside the territory radius (or after a leash break).
pub fn return_home() -> CreatureNode {
    action(|_ctx, agent, world| {
        let far = agent.distance_to(agent.home()) > agent.stats().live.territory_radius;
        if !far && agent.state() != AgentState::Return {
            return Ok(BtStatus::Failure);
        }
        if agent.move_to(world, agent.home(), SpeedTier::Run) {
            agent.set_state(AgentState::Return);
            Ok(BtStatus::Running)
        } else {
            agent.set_state(AgentState::Idle);
            Ok(BtStatus::Success)
        }
    })
}

/// One step of the built-in stroll. Always succeeds so the tree re-evaluates
/// from the top next tick.
pub fn wander() -> CreatureNode {
    action(|_ctx, agent, world| {
        if !agent.state().is_peaceful() {
            agent.set_state(AgentState::Patrol);
        }
        agent.wander(world);
        Ok(BtStatus::Success)
    })
}

/// Stands still this tick.
pub fn idle() -> CreatureNode {
    action(|_ctx, agent, world| {
        agent.hold(world);
        agent.set_state(AgentState::Idle);
        Ok(BtStatus::Success)
    })
}

/// Default hostile tree: flee when hurt, engage, investigate, return, wander.
pub fn hostile_tree(chase: SpeedTier) -> CreatureNode {
    selector(vec![
        flee_when_hurt(SpeedTier::Run),
        sequence(vec![acquire_target(), engage(chase)]),
        investigate(),
        return_home(),
        wander(),
    ])
}
