//! Wolves hunt in packs.
//!
//! The Alpha engages directly while broadcasting alerts, Betas circle to a
//! flank before biting, Scouts range ahead and report sightings. Sprinting
//! and lunging draw from a [`Stamina`] pool. When the Alpha dies the whole
//! pack retreats to its den.

use ai_agent::leaves::{
    acquire_target, attack_target, chase_step, flee_when_hurt, has_target, investigate,
    return_home, target_in_attack_range, wander,
};
use ai_agent::nodes::{action, condition, inverter, parallel, selector, sequence, CreatureNode};
use ai_agent::{Agent, AgentState, DamageKind, Notification, SpeciesHooks, SpeedTier, Strike, World};
use ai_bt::BtStatus;
use ai_core::{BbKey, TickContext};
use ai_group::GroupRole;

use crate::stamina::Stamina;

pub const STAMINA: BbKey<Stamina> = BbKey::new(0x3001);
const SPRINTED: BbKey<bool> = BbKey::new(0x3002);
const SAW_RETREAT: BbKey<bool> = BbKey::new(0x3003);

pub const SPRINT_COST_PER_SECOND: f32 = 20.0;
pub const LUNGE_COST: f32 = 30.0;
pub const LUNGE_REACH: f32 = 3.5;
pub const LUNGE_MULTIPLIER: f32 = 1.3;

pub fn hooks() -> SpeciesHooks {
    SpeciesHooks {
        on_spawn: Some(on_spawn),
        on_update: Some(on_update),
        on_death: Some(on_death),
        ..SpeciesHooks::none()
    }
}

fn on_spawn(agent: &mut Agent) {
    agent.context_mut().species.set(STAMINA, Stamina::default());
}

fn on_update(agent: &mut Agent, ctx: &TickContext, _world: &mut dyn World) {
    let sprinted = agent
        .context_mut()
        .species
        .remove(SPRINTED)
        .unwrap_or(false);
    if !sprinted {
        if let Some(stamina) = agent.context_mut().species.get_mut(STAMINA) {
            stamina.regen(ctx.dt_seconds);
        }
    }

    let retreating = agent
        .group()
        .is_some_and(|g| g.borrow().is_retreating(ctx.now_seconds));
    let saw = agent
        .context()
        .species
        .get_copied(SAW_RETREAT)
        .unwrap_or(false);
    if retreating && !saw {
        agent.clear_target();
    }
    agent.context_mut().species.set(SAW_RETREAT, retreating);
}

fn on_death(agent: &mut Agent, now: f64, _world: &mut dyn World) {
    if agent.group_role() != Some(GroupRole::Alpha) {
        return;
    }
    if let Some(group) = agent.group() {
        tracing::info!(agent = agent.id(), group = group.borrow().id(), "alpha down, pack retreats");
        group.borrow_mut().trigger_retreat(now);
    }
}

pub fn stamina(agent: &Agent) -> Option<&Stamina> {
    agent.context().species.get(STAMINA)
}

fn is_role(role: GroupRole) -> CreatureNode {
    condition(move |_ctx, agent, _world| agent.group_role() == Some(role))
}

fn in_group() -> CreatureNode {
    condition(|_ctx, agent, _world| agent.group().is_some())
}

/// Runs home while the pack is retreating.
fn retreat() -> CreatureNode {
    action(|ctx, agent, world| {
        let retreating = agent
            .group()
            .is_some_and(|g| g.borrow().is_retreating(ctx.now_seconds));
        if !retreating {
            return Ok(BtStatus::Failure);
        }
        if agent.context().target.is_some() {
            agent.clear_target();
        }
        if !agent.move_to(world, agent.home(), SpeedTier::Run) {
            agent.hold(world);
        }
        agent.set_state(AgentState::Flee);
        Ok(BtStatus::Running)
    })
}

/// Sprints while stamina lasts, runs otherwise.
fn pursue() -> CreatureNode {
    action(|_ctx, agent, world| {
        let dt = agent.context().dt;
        let sprint = agent
            .context_mut()
            .species
            .get_mut(STAMINA)
            .is_some_and(|s| s.spend(SPRINT_COST_PER_SECOND * dt));
        let tier = if sprint {
            agent.context_mut().species.set(SPRINTED, true);
            SpeedTier::Sprint
        } else {
            SpeedTier::Run
        };
        Ok(chase_step(agent, world, tier))
    })
}

/// Leaping bite from just outside normal reach.
fn lunge() -> CreatureNode {
    action(|ctx, agent, world| {
        let Some(target) = agent.target_info() else {
            return Ok(BtStatus::Failure);
        };
        let distance = agent.distance_to(target.position);
        let affordable = stamina(agent).is_some_and(|s| s.can_afford(LUNGE_COST));
        if distance > LUNGE_REACH || !affordable || !agent.attack_ready(ctx.now_seconds) {
            return Ok(BtStatus::Failure);
        }
        let strike = Strike::new(DamageKind::Melee, LUNGE_MULTIPLIER).with_reach(LUNGE_REACH);
        if !agent.attack_with(ctx.now_seconds, world, target.id, strike) {
            return Ok(BtStatus::Failure);
        }
        if let Some(s) = agent.context_mut().species.get_mut(STAMINA) {
            s.spend(LUNGE_COST);
        }
        agent.set_state(AgentState::Attack);
        tracing::trace!(agent = agent.id(), target = %target.id, "lunge");
        Ok(BtStatus::Success)
    })
}

fn engage() -> CreatureNode {
    sequence(vec![
        has_target(),
        selector(vec![
            sequence(vec![target_in_attack_range(), attack_target()]),
            lunge(),
            pursue(),
        ]),
    ])
}

/// Publishes the Alpha's target and broadcasts alerts on the group cooldown.
fn lead_hunt() -> CreatureNode {
    action(|ctx, agent, world| {
        let Some(target) = agent.target_info() else {
            return Ok(BtStatus::Failure);
        };
        let Some(group) = agent.group().cloned() else {
            return Ok(BtStatus::Failure);
        };
        let mut g = group.borrow_mut();
        g.set_shared_target(target.id, target.position);
        if g.broadcast_alert(ctx.now_seconds) {
            world.notify(Notification::PackAlert {
                group: g.id(),
                agent: agent.id(),
                level: g.alert_level(ctx.now_seconds),
            });
        }
        Ok(BtStatus::Running)
    })
}

/// Moves to this Beta's flank slot. Succeeds once there or already in reach.
fn flank() -> CreatureNode {
    action(|_ctx, agent, world| {
        let Some(target) = agent.target_info() else {
            return Ok(BtStatus::Failure);
        };
        if agent.beyond_leash(target.position) {
            agent.clear_target();
            agent.set_state(AgentState::Return);
            return Ok(BtStatus::Failure);
        }
        if agent.in_reach(target.position, agent.stats().live.attack_range) {
            return Ok(BtStatus::Success);
        }
        let slot = agent
            .group()
            .and_then(|g| g.borrow().flank_position_for(agent.id(), target.position));
        let Some(slot) = slot else {
            return Ok(BtStatus::Success);
        };
        if agent.distance_to(slot) <= 1.0 {
            return Ok(BtStatus::Success);
        }
        agent.move_to(world, slot, SpeedTier::Run);
        agent.set_state(AgentState::Chase);
        Ok(BtStatus::Running)
    })
}

fn report_sighting() -> CreatureNode {
    action(|ctx, agent, world| {
        let Some(target) = agent.target_info() else {
            return Ok(BtStatus::Failure);
        };
        if let Some(group) = agent.group().cloned() {
            let mut g = group.borrow_mut();
            if g.report_sighting(target.id, target.position, ctx.now_seconds) {
                world.notify(Notification::PackAlert {
                    group: g.id(),
                    agent: agent.id(),
                    level: g.alert_level(ctx.now_seconds),
                });
            }
        }
        Ok(BtStatus::Success)
    })
}

fn scout_ahead() -> CreatureNode {
    action(|_ctx, agent, world| {
        let point = agent
            .group()
            .and_then(|g| g.borrow().scout_position_for(agent.id()));
        let Some(point) = point else {
            return Ok(BtStatus::Failure);
        };
        if agent.move_to(world, point, SpeedTier::Walk) {
            agent.set_state(AgentState::Patrol);
        } else {
            agent.hold(world);
            agent.set_state(AgentState::Idle);
        }
        Ok(BtStatus::Success)
    })
}

/// Non-leaders keep to their trailing formation slot.
fn follow_leader() -> CreatureNode {
    action(|_ctx, agent, world| {
        if agent.group_role() == Some(GroupRole::Alpha) {
            return Ok(BtStatus::Failure);
        }
        let slot = agent
            .group()
            .and_then(|g| g.borrow().formation_position_for(agent.id()));
        let Some(slot) = slot else {
            return Ok(BtStatus::Failure);
        };
        let tier = if agent.distance_to(slot) > 10.0 {
            SpeedTier::Run
        } else {
            SpeedTier::Walk
        };
        if agent.distance_to(slot) > 1.5 && agent.move_to(world, slot, tier) {
            agent.set_state(AgentState::Patrol);
        } else {
            agent.hold(world);
            agent.set_state(AgentState::Idle);
        }
        Ok(BtStatus::Success)
    })
}

pub fn tree() -> CreatureNode {
    selector(vec![
        retreat(),
        flee_when_hurt(SpeedTier::Run),
        sequence(vec![
            is_role(GroupRole::Alpha),
            acquire_target(),
            parallel(1, vec![lead_hunt(), engage()]),
        ]),
        sequence(vec![
            is_role(GroupRole::Beta),
            acquire_target(),
            flank(),
            engage(),
        ]),
        sequence(vec![
            is_role(GroupRole::Scout),
            acquire_target(),
            report_sighting(),
            engage(),
        ]),
        sequence(vec![inverter(in_group()), acquire_target(), engage()]),
        investigate(),
        return_home(),
        sequence(vec![is_role(GroupRole::Scout), scout_ahead()]),
        follow_leader(),
        wander(),
    ])
}
