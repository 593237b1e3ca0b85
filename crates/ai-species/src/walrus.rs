//! Walruses defend a small territory, but warn before they fight.
//!
//! A player stepping inside the territory radius gets a [`WARNING_SECONDS`]
//! display. When it runs out the walrus looks again: an intruder still within
//! `1.2 x` the radius becomes its target, one that has left is forgotten.
//! Hitting a walrus skips the warning.

use ai_agent::leaves::{engage, has_target, return_home, wander};
use ai_agent::nodes::{action, selector, sequence, CreatureNode};
use ai_agent::{Agent, AgentState, EntityId, Notification, SpeciesHooks, SpeedTier, World};
use ai_bt::BtStatus;
use ai_core::BbKey;

const WARNING: BbKey<Warning> = BbKey::new(0x3401);

pub const WARNING_SECONDS: f64 = 3.0;
/// The intruder must still be within this multiple of the territory radius
/// when the warning runs out.
pub const RECHECK_FACTOR: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Warning {
    pub intruder: EntityId,
    pub until: f64,
}

pub fn hooks() -> SpeciesHooks {
    SpeciesHooks {
        on_damaged: Some(on_damaged),
        ..SpeciesHooks::none()
    }
}

fn on_damaged(
    agent: &mut Agent,
    _now: f64,
    _amount: f32,
    source: Option<EntityId>,
    _world: &mut dyn World,
) {
    if source.is_some() && agent.context_mut().species.remove(WARNING).is_some() {
        agent.reset_tree();
    }
}

pub fn warning(agent: &Agent) -> Option<Warning> {
    agent.context().species.get_copied(WARNING)
}

/// Starts, holds, or resolves a warning. Fails when there is nobody to warn.
fn warn_intruders() -> CreatureNode {
    action(|ctx, agent, world| {
        let now = ctx.now_seconds;
        let radius = agent.stats().live.territory_radius;

        let Some(active) = warning(agent) else {
            let Some(seen) = agent.context().perceived else {
                return Ok(BtStatus::Failure);
            };
            if !agent.in_reach(seen.position, radius) {
                return Ok(BtStatus::Failure);
            }
            let until = now + WARNING_SECONDS;
            agent.context_mut().species.set(
                WARNING,
                Warning {
                    intruder: seen.id,
                    until,
                },
            );
            agent.hold(world);
            agent.face_towards(seen.position);
            agent.set_state(AgentState::Warning);
            tracing::debug!(agent = agent.id(), intruder = %seen.id, until, "territory warning");
            world.notify(Notification::WarningStarted {
                agent: agent.id(),
                intruder: seen.id,
                until,
            });
            return Ok(BtStatus::Running);
        };

        let intruder = world.entity(active.intruder).filter(|i| i.alive);
        if now < active.until {
            agent.hold(world);
            if let Some(info) = intruder {
                agent.face_towards(info.position);
            }
            agent.set_state(AgentState::Warning);
            return Ok(BtStatus::Running);
        }

        agent.context_mut().species.remove(WARNING);
        match intruder {
            Some(info) if agent.in_reach(info.position, radius * RECHECK_FACTOR) => {
                tracing::debug!(agent = agent.id(), intruder = %info.id, "warning ignored, attacking");
                agent.set_target(info.id, Some(info.position));
                agent.context_mut().target_info = Some(info);
                agent.set_state(AgentState::Alert);
            }
            _ => {
                agent.clear_target();
                agent.context_mut().threat = None;
                agent.context_mut().threat_position = None;
                agent.set_state(AgentState::Idle);
            }
        }
        Ok(BtStatus::Success)
    })
}

/// Sluggish pacing near home.
fn loll() -> CreatureNode {
    action(|_ctx, agent, world| {
        let home = agent.home();
        if agent.distance_to(home) > 2.0 && agent.move_to(world, home, SpeedTier::Walk) {
            agent.set_state(AgentState::Patrol);
            return Ok(BtStatus::Success);
        }
        Ok(BtStatus::Failure)
    })
}

pub fn tree() -> CreatureNode {
    selector(vec![
        sequence(vec![has_target(), engage(SpeedTier::Run)]),
        warn_intruders(),
        return_home(),
        loll(),
        wander(),
    ])
}
