//! Boars charge.
//!
//! From mid range a boar commits to a straight-line charge: the heading is
//! locked at activation, the charge lasts at most [`CHARGE_MAX_SECONDS`] and
//! ends at the first player it connects with. Every charge is followed by a
//! short recovery in which the boar stands winded.

use ai_agent::leaves::{acquire_target, engage, flee_when_hurt, investigate, return_home, wander};
use ai_agent::nodes::{action, condition, selector, sequence, CreatureNode};
use ai_agent::{Agent, AgentState, DamageEffects, DamageKind, SpeciesHooks, SpeedTier, Strike, Vec2};
use ai_bt::BtStatus;
use ai_core::BbKey;

const CHARGE: BbKey<ChargeState> = BbKey::new(0x3201);

pub const CHARGE_COOLDOWN: f64 = 6.0;
pub const CHARGE_MAX_SECONDS: f64 = 1.5;
pub const CHARGE_MIN_DISTANCE: f32 = 4.0;
pub const CHARGE_MAX_DISTANCE: f32 = 14.0;
pub const CHARGE_MULTIPLIER: f32 = 2.0;
pub const CHARGE_KNOCKBACK: f32 = 4.0;
pub const RECOVERY_SECONDS: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveCharge {
    pub direction: Vec2,
    pub started_at: f64,
    pub until: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChargeState {
    pub ready_at: f64,
    pub active: Option<ActiveCharge>,
    pub recover_until: f64,
}

pub fn hooks() -> SpeciesHooks {
    SpeciesHooks {
        on_spawn: Some(on_spawn),
        ..SpeciesHooks::none()
    }
}

fn on_spawn(agent: &mut Agent) {
    set_charge_state(agent, ChargeState::default());
}

pub fn charge_state(agent: &Agent) -> ChargeState {
    agent
        .context()
        .species
        .get_copied(CHARGE)
        .unwrap_or_default()
}

fn set_charge_state(agent: &mut Agent, state: ChargeState) {
    agent.context_mut().species.set(CHARGE, state);
}

/// Locks the heading and starts a charge if cooldown and range allow.
pub fn try_start_charge(agent: &mut Agent, now: f64) -> bool {
    let mut state = charge_state(agent);
    if state.active.is_some() || now < state.ready_at || now < state.recover_until {
        return false;
    }
    let Some(target) = agent.target_info() else {
        return false;
    };
    let distance = agent.distance_to(target.position);
    if !(CHARGE_MIN_DISTANCE..=CHARGE_MAX_DISTANCE).contains(&distance) {
        return false;
    }
    let direction = (target.position - agent.position()).normalize_or_zero();
    if direction == Vec2::ZERO {
        return false;
    }

    state.active = Some(ActiveCharge {
        direction,
        started_at: now,
        until: now + CHARGE_MAX_SECONDS,
    });
    state.ready_at = now + CHARGE_COOLDOWN;
    set_charge_state(agent, state);
    agent.face_direction(direction);
    agent.set_state(AgentState::Charge);
    tracing::debug!(agent = agent.id(), target = %target.id, distance, "charge");
    true
}

fn end_charge(agent: &mut Agent, now: f64) {
    let mut state = charge_state(agent);
    state.active = None;
    state.recover_until = now + RECOVERY_SECONDS;
    set_charge_state(agent, state);
    agent.set_state(AgentState::Recover);
}

fn charging() -> CreatureNode {
    condition(|_ctx, agent, _world| charge_state(agent).active.is_some())
}

fn recovering() -> CreatureNode {
    condition(|ctx, agent, _world| ctx.now_seconds < charge_state(agent).recover_until)
}

fn start_charge() -> CreatureNode {
    action(|ctx, agent, world| {
        let Some(target) = agent.target_info() else {
            return Ok(BtStatus::Failure);
        };
        if !agent.can_see_info(&*world, &target) {
            return Ok(BtStatus::Failure);
        }
        Ok(BtStatus::from_bool(try_start_charge(agent, ctx.now_seconds)))
    })
}

/// Runs the locked charge. Running until it connects or times out.
fn charge_step() -> CreatureNode {
    action(|ctx, agent, world| {
        let now = ctx.now_seconds;
        let Some(charge) = charge_state(agent).active else {
            return Ok(BtStatus::Failure);
        };
        if now >= charge.until {
            end_charge(agent, now);
            agent.hold(world);
            return Ok(BtStatus::Success);
        }

        let reach = agent.stats().live.attack_range;
        let hit = world
            .query_nearby(agent.position(), reach)
            .into_iter()
            .filter(|e| e.alive && e.id.is_player())
            .min_by(|a, b| {
                a.position
                    .distance_squared(agent.position())
                    .total_cmp(&b.position.distance_squared(agent.position()))
            });
        if let Some(info) = hit {
            let push = DamageEffects::knockback(charge.direction, CHARGE_KNOCKBACK);
            let strike = Strike::new(DamageKind::Charge, CHARGE_MULTIPLIER).with_effects(push);
            agent.strike(world, &info, strike);
            end_charge(agent, now);
            agent.hold(world);
            return Ok(BtStatus::Success);
        }

        let dest = agent.position() + charge.direction * 20.0;
        let speed = agent.speed(SpeedTier::Sprint);
        agent.move_direct(world, dest, speed);
        agent.set_state(AgentState::Charge);
        Ok(BtStatus::Running)
    })
}

fn recover() -> CreatureNode {
    action(|ctx, agent, world| {
        agent.hold(world);
        if ctx.now_seconds < charge_state(agent).recover_until {
            agent.set_state(AgentState::Recover);
            Ok(BtStatus::Running)
        } else {
            agent.set_state(AgentState::Alert);
            Ok(BtStatus::Success)
        }
    })
}

pub fn tree() -> CreatureNode {
    selector(vec![
        sequence(vec![charging(), charge_step()]),
        sequence(vec![recovering(), recover()]),
        flee_when_hurt(SpeedTier::Run),
        sequence(vec![
            acquire_target(),
            selector(vec![
                sequence(vec![start_charge(), charge_step()]),
                engage(SpeedTier::Run),
            ]),
        ]),
        investigate(),
        return_home(),
        wander(),
    ])
}
